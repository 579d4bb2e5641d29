//! In-memory compendium backed by a bundled JSON dataset.
//!
//! The dataset is one JSON object keyed by section, with the API's dashes
//! replaced by underscores:
//!
//! ```json
//! {
//!   "spells": [{"index": "fireball", "name": "Fireball", "url": "/api/spells/fireball", ...}],
//!   "magic_schools": [...]
//! }
//! ```
//!
//! URLs follow the API layout `/api/<section>[/<index>[/<sub-section>]]`:
//!
//! | URL | Result |
//! |-----|--------|
//! | `/api/spells` | every record of the section |
//! | `/api/spells/fireball` | the record whose `index` is `fireball` |
//! | `/api/classes/wizard/subclasses` | records of `subclasses` whose URL contains `wizard` |

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use serde_json::Value;

use super::error::{CompendiumError, Result};
use super::record::{ResourceRecord, ResultEntry};
use super::source::CompendiumSource;

/// Parsed form of a compendium URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalPath<'a> {
    Section { section: String },
    Record { section: String, index: &'a str },
    Nested { sub_section: String, parent: &'a str },
}

impl<'a> LocalPath<'a> {
    /// Split `/api/<section>/<index>/<sub>` into its lookup form.
    ///
    /// Returns `None` when the URL has no section component.
    pub fn parse(url: &'a str) -> Option<Self> {
        let mut parts = url.split('/').skip(2);
        let section = parts.next().filter(|s| !s.is_empty())?;
        let index = parts.next().filter(|s| !s.is_empty());
        let sub = parts.next().filter(|s| !s.is_empty());

        Some(match (index, sub) {
            (None, _) => Self::Section {
                section: section_key(section),
            },
            (Some(index), None) => Self::Record {
                section: section_key(section),
                index,
            },
            (Some(parent), Some(sub)) => Self::Nested {
                sub_section: section_key(sub),
                parent,
            },
        })
    }
}

/// Dataset key for a URL section (`magic-schools` -> `magic_schools`).
pub fn section_key(section: &str) -> String {
    section.replace('-', "_")
}

/// Read-only in-memory table of compendium records.
#[derive(Debug, Default, Clone)]
pub struct LocalCompendium {
    sections: HashMap<String, Vec<ResourceRecord>>,
}

impl LocalCompendium {
    /// Create an empty compendium (for testing).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Add or replace a section. Builder-style, used by fixtures.
    pub fn with_section(mut self, section: &str, records: Vec<ResourceRecord>) -> Self {
        self.sections.insert(section_key(section), records);
        self
    }

    /// Build from a parsed dataset document.
    ///
    /// Entries that are not valid records are logged and skipped; the
    /// compendium holds whatever parsed successfully.
    pub fn from_json(document: Value) -> Result<Self> {
        let Value::Object(sections) = document else {
            return Err(CompendiumError::malformed(
                "<dataset>",
                "dataset root must be an object keyed by section",
            ));
        };

        let mut table = HashMap::with_capacity(sections.len());
        for (section, items) in sections {
            let Value::Array(items) = items else {
                log::warn!("Skipping dataset section '{section}': not a list");
                continue;
            };
            let mut records = Vec::with_capacity(items.len());
            for item in items {
                match ResourceRecord::from_value(item) {
                    Ok(record) => records.push(record),
                    Err(e) => log::warn!("Skipping entry in section '{section}': {e}"),
                }
            }
            table.insert(section_key(&section), records);
        }

        log::info!(
            "Local compendium loaded: {} sections, {} records",
            table.len(),
            table.values().map(Vec::len).sum::<usize>()
        );

        Ok(Self { sections: table })
    }

    /// Load a dataset file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let document: Value = serde_json::from_str(&contents)?;
        log::debug!("Read compendium dataset from {}", path.display());
        Self::from_json(document)
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    pub fn record_count(&self) -> usize {
        self.sections.values().map(Vec::len).sum()
    }

    fn section(&self, key: &str, url: &str) -> Result<&[ResourceRecord]> {
        self.sections
            .get(key)
            .map(Vec::as_slice)
            .ok_or_else(|| CompendiumError::not_found(url))
    }

    fn lookup(&self, url: &str) -> Result<&ResourceRecord> {
        match LocalPath::parse(url) {
            Some(LocalPath::Record { section, index }) => self
                .section(&section, url)?
                .iter()
                .find(|r| r.index() == Some(index))
                .ok_or_else(|| CompendiumError::not_found(url)),
            _ => Err(CompendiumError::not_found(url)),
        }
    }

    fn listing(&self, path: &str) -> Result<Vec<&ResourceRecord>> {
        match LocalPath::parse(path) {
            Some(LocalPath::Section { section }) => {
                Ok(self.section(&section, path)?.iter().collect())
            }
            Some(LocalPath::Nested {
                sub_section,
                parent,
            }) => Ok(self
                .section(&sub_section, path)?
                .iter()
                .filter(|r| r.url().contains(parent))
                .collect()),
            _ => Err(CompendiumError::not_found(path)),
        }
    }
}

#[async_trait]
impl CompendiumSource for LocalCompendium {
    fn id(&self) -> &str {
        "local"
    }

    async fn resolve(&self, url: &str) -> Result<ResourceRecord> {
        self.lookup(url).cloned()
    }

    async fn list_category(&self, path: &str) -> Result<Vec<ResultEntry>> {
        Ok(self
            .listing(path)?
            .into_iter()
            .cloned()
            .map(ResultEntry::from_record)
            .collect())
    }
}
