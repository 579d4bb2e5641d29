//! Resource records and lightweight result entries.
//!
//! A [`ResourceRecord`] is one fetched compendium entity (spell, monster, item,
//! ...). The API never tags records with a type, so everything downstream works
//! off field presence and the record's own URL. Field presence follows the
//! truthiness of the upstream JSON: `null`, `false`, `0` and `""` count as
//! absent, while arrays and objects count as present even when empty.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::{CompendiumError, Result};

// ============================================================================
// ResourceRecord
// ============================================================================

/// An immutable JSON object that always carries a string `url`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct ResourceRecord {
    fields: Map<String, Value>,
}

impl ResourceRecord {
    /// Build a record from parsed JSON.
    ///
    /// Fails with [`CompendiumError::Malformed`] when the value is not an object
    /// or has no string `url`.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(fields) => match fields.get("url") {
                Some(Value::String(_)) => Ok(Self { fields }),
                _ => {
                    let hint = fields
                        .get("index")
                        .and_then(Value::as_str)
                        .unwrap_or("<unknown>")
                        .to_string();
                    Err(CompendiumError::malformed(hint, "record has no string `url` field"))
                }
            },
            other => Err(CompendiumError::malformed(
                "<unknown>",
                format!("expected a JSON object, found {}", json_kind(&other)),
            )),
        }
    }

    /// Stable identifier and path of this record.
    pub fn url(&self) -> &str {
        self.fields
            .get("url")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    pub fn name(&self) -> Option<&str> {
        self.str_field("name")
    }

    /// The API's slug for the record (`"fireball"`, `"aboleth"`).
    pub fn index(&self) -> Option<&str> {
        self.str_field("index")
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Whether `field` is present and truthy.
    pub fn has(&self, field: &str) -> bool {
        self.fields.get(field).is_some_and(is_truthy)
    }

    /// Length of a list field, `0` when absent or not a list.
    pub fn list_len(&self, field: &str) -> usize {
        self.fields
            .get(field)
            .and_then(Value::as_array)
            .map_or(0, Vec::len)
    }

    pub fn str_field(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }

    /// `record[field].name` for reference-shaped fields such as `school`.
    pub fn nested_name(&self, field: &str) -> Option<&str> {
        self.fields
            .get(field)
            .and_then(|v| v.get("name"))
            .and_then(Value::as_str)
    }

    /// Names of every element of a list of references (`classes[].name`).
    pub fn names_in(&self, field: &str) -> Vec<&str> {
        self.fields
            .get(field)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item.get("name").and_then(Value::as_str))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn number(&self, field: &str) -> Option<f64> {
        self.fields.get(field).and_then(Value::as_f64)
    }

    /// Render a scalar field as the upstream UI would print it.
    ///
    /// Integral numbers drop their fractional part (`3.0` renders as `"3"`).
    pub fn scalar_string(&self, field: &str) -> Option<String> {
        match self.fields.get(field)? {
            Value::String(s) => Some(s.clone()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(i.to_string())
                } else if let Some(u) = n.as_u64() {
                    Some(u.to_string())
                } else {
                    n.as_f64().map(|f| {
                        if f.fract() == 0.0 && f.abs() < 1e15 {
                            format!("{}", f as i64)
                        } else {
                            f.to_string()
                        }
                    })
                }
            }
            _ => None,
        }
    }

    /// Every reference embedded in the record, in field order.
    ///
    /// A reference is an object with a string `url`, either directly under a
    /// field (`school`) or as an element of a list (`classes`, `subclasses`).
    /// These are the entries a detail page offers for further navigation.
    pub fn linked_entries(&self) -> Vec<ResultEntry> {
        let mut links = Vec::new();
        for value in self.fields.values() {
            match value {
                Value::Object(_) => {
                    if let Some(entry) = reference_entry(value) {
                        links.push(entry);
                    }
                }
                Value::Array(items) => {
                    links.extend(items.iter().filter_map(reference_entry));
                }
                _ => {}
            }
        }
        links
    }
}

impl TryFrom<Value> for ResourceRecord {
    type Error = CompendiumError;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_value(value)
    }
}

impl From<ResourceRecord> for Value {
    fn from(record: ResourceRecord) -> Self {
        Value::Object(record.fields)
    }
}

fn reference_entry(value: &Value) -> Option<ResultEntry> {
    if !value.get("url").is_some_and(Value::is_string) {
        return None;
    }
    ResourceRecord::from_value(value.clone())
        .ok()
        .map(ResultEntry::from_record)
}

/// JavaScript-style truthiness of a JSON value.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ============================================================================
// ResultEntry
// ============================================================================

fn visible_by_default() -> bool {
    true
}

/// A list-displayable projection of a record.
///
/// `visible` is derived state owned by the search session and is never
/// serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultEntry {
    pub name: String,
    pub url: String,
    pub data: ResourceRecord,
    #[serde(skip_serializing, default = "visible_by_default")]
    pub visible: bool,
}

impl ResultEntry {
    /// Project a record into a visible entry.
    ///
    /// Records without a name fall back to their index, then their URL.
    pub fn from_record(record: ResourceRecord) -> Self {
        let name = record
            .name()
            .or_else(|| record.index())
            .unwrap_or_else(|| record.url())
            .to_string();
        Self {
            name,
            url: record.url().to_string(),
            data: record,
            visible: true,
        }
    }
}
