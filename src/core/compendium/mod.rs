//! Compendium data access.
//!
//! Everything the classifier and the search engine know about the rules
//! compendium comes through [`CompendiumSource`]: resolve a record by URL, or
//! list a category. Two backends are provided:
//!
//! - [`LocalCompendium`]: the bundled dataset held in memory
//! - [`RemoteCompendium`]: the public HTTP API
//!
//! Either can be wrapped in a [`CachedCompendium`] so repeated facet
//! evaluations resolve each URL once.

pub mod cache;
pub mod error;
pub mod local;
pub mod record;
pub mod remote;
pub mod source;

pub use cache::{CacheStats, CachedCompendium};
pub use error::{CompendiumError, Result};
pub use local::LocalCompendium;
pub use record::{ResourceRecord, ResultEntry};
pub use remote::RemoteCompendium;
pub use source::CompendiumSource;
