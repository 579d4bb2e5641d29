//! Facet controls.
//!
//! A facet is either a closed list of options with one selection (defaulting to
//! [`ANY`]) or a bounded number. Facets never touch records; they only feed the
//! owning category's predicate.

use serde::{Deserialize, Serialize};

use super::error::{Result, SearchError};

/// The neutral selection of every choice facet.
pub const ANY: &str = "Any";

/// One filterable dimension of a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FacetChoice {
    Choice {
        title: String,
        options: Vec<String>,
        selected: String,
    },
    Range {
        title: String,
        min: f64,
        max: f64,
        value: f64,
    },
}

/// A new value for a facet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FacetValue {
    Number(f64),
    Option(String),
}

impl From<&str> for FacetValue {
    fn from(value: &str) -> Self {
        Self::Option(value.to_string())
    }
}

impl From<f64> for FacetValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl FacetChoice {
    /// A choice facet with [`ANY`] prepended to `options` and selected.
    pub fn choice<I, S>(title: &str, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let options = std::iter::once(ANY.to_string())
            .chain(options.into_iter().map(Into::into))
            .collect();
        Self::Choice {
            title: title.to_string(),
            options,
            selected: ANY.to_string(),
        }
    }

    pub fn range(title: &str, min: f64, max: f64, value: f64) -> Self {
        Self::Range {
            title: title.to_string(),
            min,
            max,
            value: value.clamp(min, max),
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Choice { title, .. } | Self::Range { title, .. } => title,
        }
    }

    /// The selected option, or `None` while the facet is on [`ANY`].
    pub fn selection(&self) -> Option<&str> {
        match self {
            Self::Choice { selected, .. } if selected != ANY => Some(selected.as_str()),
            _ => None,
        }
    }

    pub fn range_value(&self) -> Option<f64> {
        match self {
            Self::Range { value, .. } => Some(*value),
            Self::Choice { .. } => None,
        }
    }

    pub fn options(&self) -> &[String] {
        match self {
            Self::Choice { options, .. } => options,
            Self::Range { .. } => &[],
        }
    }

    /// Apply a new value.
    ///
    /// Choice values must be one of the options. Range values are clamped into
    /// `[min, max]` like a spin control would.
    pub fn apply(&mut self, value: FacetValue) -> Result<()> {
        match (self, value) {
            (
                Self::Choice {
                    title,
                    options,
                    selected,
                },
                FacetValue::Option(option),
            ) => {
                if !options.contains(&option) {
                    return Err(SearchError::InvalidOption {
                        choice: title.clone(),
                        value: option,
                    });
                }
                *selected = option;
                Ok(())
            }
            (
                Self::Range {
                    min, max, value, ..
                },
                FacetValue::Number(number),
            ) => {
                let clamped = number.clamp(*min, *max);
                if clamped != number {
                    log::debug!("Facet value {number} clamped to {clamped}");
                }
                *value = clamped;
                Ok(())
            }
            (facet, _) => Err(SearchError::ValueKindMismatch {
                choice: facet.title().to_string(),
            }),
        }
    }
}
