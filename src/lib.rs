/// Questscribe - D&D 5e SRD compendium browser
///
/// Core library providing record classification, faceted search,
/// navigation and bookmarks over a local or remote rules compendium.

pub mod config;
pub mod core;


pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
