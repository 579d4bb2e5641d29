//! Faceted search over compendium entries.
//!
//! # Overview
//!
//! - [`FacetCatalogue`]: per-category facet definitions, loaded once
//! - [`FacetChoice`]: a choice (`"Any"` by default) or a bounded number
//! - [`predicate`]: the per-category match rules
//! - [`SearchSession`]: text + active filters -> per-entry visibility
//!
//! # Matching
//!
//! ```text
//! visible = text_matches(name, text)
//!           && (no filters || any(filter.matches(url)))
//! ```
//!
//! Within one filter every non-"Any" facet must match (AND); across filters
//! any match is enough (OR).

pub mod category;
pub mod engine;
pub mod error;
pub mod facet;
pub mod predicate;
pub mod session;
pub mod text;

pub use category::{CategoryDefinition, CategoryKind, FacetCatalogue, ReferenceOptions};
pub use engine::{recompute_visibility, EntryFailure, VisibilityReport, RESOLVE_CONCURRENCY};
pub use error::{Result, SearchError};
pub use facet::{FacetChoice, FacetValue, ANY};
pub use session::{ActiveFilter, FilterHandle, SearchSession, DEFAULT_DEBOUNCE_MS};
pub use text::text_matches;
