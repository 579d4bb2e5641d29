//! The data-access contract consumed by the classifier and the search engine.

use async_trait::async_trait;

use super::error::Result;
use super::record::{ResourceRecord, ResultEntry};

/// Resolve-by-URL capability over the compendium.
///
/// Implementations may be backed by an in-memory table or by the network;
/// callers treat both the same way and must expect every call to suspend.
#[async_trait]
pub trait CompendiumSource: Send + Sync {
    /// Short identifier used in logs.
    fn id(&self) -> &str;

    /// Resolve the full record behind `url` (e.g. `/api/spells/fireball`).
    ///
    /// Fails with `NotFound` for unknown URLs and `Transport` when a remote
    /// backend is unreachable.
    async fn resolve(&self, url: &str) -> Result<ResourceRecord>;

    /// List the entries of a category path (e.g. `/api/spells`).
    async fn list_category(&self, path: &str) -> Result<Vec<ResultEntry>>;
}
