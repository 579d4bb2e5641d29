//! Instrumented compendium sources.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::core::compendium::{
    CompendiumError, CompendiumSource, LocalCompendium, ResourceRecord, ResultEntry, Result,
};

/// Wraps a local compendium, counting resolutions per URL and failing the
/// URLs marked broken with a transport error.
pub struct CountingSource {
    inner: LocalCompendium,
    broken: HashSet<String>,
    resolves: Mutex<HashMap<String, usize>>,
}

impl CountingSource {
    pub fn new(inner: LocalCompendium) -> Self {
        Self {
            inner,
            broken: HashSet::new(),
            resolves: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_broken(mut self, url: &str) -> Self {
        self.broken.insert(url.to_string());
        self
    }

    /// How many times `url` reached this source.
    pub fn resolve_count(&self, url: &str) -> usize {
        self.resolves
            .lock()
            .unwrap()
            .get(url)
            .copied()
            .unwrap_or_default()
    }

    pub fn total_resolves(&self) -> usize {
        self.resolves.lock().unwrap().values().sum()
    }
}

#[async_trait]
impl CompendiumSource for CountingSource {
    fn id(&self) -> &str {
        "counting"
    }

    async fn resolve(&self, url: &str) -> Result<ResourceRecord> {
        *self
            .resolves
            .lock()
            .unwrap()
            .entry(url.to_string())
            .or_default() += 1;
        if self.broken.contains(url) {
            return Err(CompendiumError::Transport(format!("connection reset: {url}")));
        }
        self.inner.resolve(url).await
    }

    async fn list_category(&self, path: &str) -> Result<Vec<ResultEntry>> {
        self.inner.list_category(path).await
    }
}
