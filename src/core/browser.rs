//! Browser context.
//!
//! [`Browser`] is the explicit context the presentation layer talks to. It owns
//! the shared compendium source and the facet catalogue (loaded once, read-only)
//! and hands out independent [`SearchSession`]s and navigation frames.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use thiserror::Error;

use super::bookmarks::Bookmarks;
use super::classifier::{classify, UnknownVariantError};
use super::compendium::{
    CachedCompendium, CompendiumError, CompendiumSource, LocalCompendium, RemoteCompendium,
};
use super::navigation::{NavigationFrame, NavigationStack};
use super::search::{FacetCatalogue, SearchSession, DEFAULT_DEBOUNCE_MS};
use crate::config::{AppConfig, SourceKind, DEFAULT_SEED_CATEGORIES};

/// Failures opening a record.
#[derive(Error, Debug)]
pub enum BrowseError {
    #[error(transparent)]
    Compendium(#[from] CompendiumError),

    #[error(transparent)]
    UnknownVariant(#[from] UnknownVariantError),
}

pub type Result<T> = std::result::Result<T, BrowseError>;

/// Build the configured compendium source, wrapped in the resolve cache.
pub fn build_source(config: &AppConfig) -> std::result::Result<Arc<dyn CompendiumSource>, CompendiumError> {
    let capacity = config.data.cache_capacity;
    let source: Arc<dyn CompendiumSource> = match config.data.source {
        SourceKind::Local => {
            let local = LocalCompendium::load(&config.dataset_path())?;
            cached(local, capacity)
        }
        SourceKind::Remote => {
            let remote = RemoteCompendium::new(
                &config.data.api_base_url,
                Duration::from_secs(config.data.request_timeout_secs),
            )?;
            cached(remote, capacity)
        }
    };
    log::info!("Using {} compendium source", source.id());
    Ok(source)
}

fn cached<S: CompendiumSource + 'static>(
    source: S,
    capacity: Option<usize>,
) -> Arc<dyn CompendiumSource> {
    match capacity {
        Some(capacity) => Arc::new(CachedCompendium::with_capacity(source, capacity)),
        None => Arc::new(CachedCompendium::new(source)),
    }
}

/// Shared context for every tab.
pub struct Browser {
    source: Arc<dyn CompendiumSource>,
    catalogue: Arc<FacetCatalogue>,
    seed_paths: Vec<String>,
    debounce: Duration,
}

impl Browser {
    /// Create a browser over `source`, loading the facet catalogue.
    pub async fn new(source: Arc<dyn CompendiumSource>) -> Self {
        let catalogue = Arc::new(FacetCatalogue::load(source.as_ref()).await);
        Self {
            source,
            catalogue,
            seed_paths: DEFAULT_SEED_CATEGORIES.iter().map(|s| s.to_string()).collect(),
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
        }
    }

    /// Create a browser from configuration (source, seeds, debounce).
    pub async fn from_config(config: &AppConfig) -> std::result::Result<Self, CompendiumError> {
        let source = build_source(config)?;
        Ok(Self::new(source)
            .await
            .with_seed_paths(config.search.seed_categories.clone())
            .with_debounce(Duration::from_millis(config.search.debounce_ms)))
    }

    pub fn with_seed_paths(mut self, seed_paths: Vec<String>) -> Self {
        self.seed_paths = seed_paths;
        self
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn source(&self) -> &Arc<dyn CompendiumSource> {
        &self.source
    }

    pub fn catalogue(&self) -> &Arc<FacetCatalogue> {
        &self.catalogue
    }

    pub fn seed_paths(&self) -> &[String] {
        &self.seed_paths
    }

    /// New session seeded with the configured category listings.
    pub async fn create_session(&self) -> SearchSession {
        self.create_session_from(&self.seed_paths).await
    }

    /// New session seeded with the given listings, concatenated in order.
    ///
    /// A listing that fails to load is logged and skipped.
    pub async fn create_session_from<S: AsRef<str>>(&self, seed_paths: &[S]) -> SearchSession {
        let listings = join_all(
            seed_paths
                .iter()
                .map(|path| self.source.list_category(path.as_ref())),
        )
        .await;

        let mut entries = Vec::new();
        let mut skipped = 0;
        for (path, listing) in seed_paths.iter().zip(listings) {
            match listing {
                Ok(listing) => entries.extend(listing),
                Err(e) => {
                    skipped += 1;
                    log::warn!("Skipping listing {}: {e}", path.as_ref());
                }
            }
        }

        log::info!(
            "Search session created: {} entries from {} listings ({} skipped)",
            entries.len(),
            seed_paths.len() - skipped,
            skipped
        );
        SearchSession::new(self.source.clone(), self.catalogue.clone(), entries)
            .with_debounce(self.debounce)
    }

    /// Resolve and classify the record behind `url`.
    pub async fn open(&self, url: &str) -> Result<NavigationFrame> {
        let record = self.source.resolve(url).await?;
        let tag = classify(&record)?;
        Ok(NavigationFrame::new(record, tag))
    }

    /// Open `url` on top of `stack` and return the new current frame.
    pub async fn open_in<'a>(
        &self,
        stack: &'a mut NavigationStack,
        url: &str,
    ) -> Result<&'a NavigationFrame> {
        let frame = self.open(url).await?;
        stack.push(frame);
        stack
            .current()
            .ok_or_else(|| CompendiumError::not_found(url).into())
    }

    /// Reopen every bookmark as a pinned tab.
    ///
    /// A bookmark that fails to open is logged and skipped.
    pub async fn restore_bookmarks(&self, bookmarks: &Bookmarks) -> Vec<NavigationStack> {
        let mut tabs = Vec::with_capacity(bookmarks.len());
        for bookmark in bookmarks.iter() {
            match self.open(&bookmark.url).await {
                Ok(frame) => {
                    let mut stack = NavigationStack::new();
                    stack.push(frame);
                    stack.set_pinned(true);
                    tabs.push(stack);
                }
                Err(e) => log::warn!("Skipping bookmark '{}' ({}): {e}", bookmark.name, bookmark.url),
            }
        }
        tabs
    }
}
