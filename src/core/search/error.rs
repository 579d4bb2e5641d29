//! Search Error Types
//!
//! Errors for session and facet operations. Per-entry resolution failures are
//! not errors at this level: they are reported in the visibility report.

use thiserror::Error;

use super::category::CategoryKind;
use super::session::FilterHandle;
use crate::core::compendium::CompendiumError;

/// Search session errors
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Unknown filter category: {0}")]
    UnknownCategory(String),

    #[error("Filter not active in this session: {0}")]
    UnknownFilter(FilterHandle),

    #[error("A {0} filter is already active in this session")]
    DuplicateFilter(CategoryKind),

    #[error("Facet index {index} out of bounds ({len} facets)")]
    ChoiceOutOfBounds { index: usize, len: usize },

    #[error("'{value}' is not an option of facet '{choice}'")]
    InvalidOption { choice: String, value: String },

    #[error("Value kind does not match facet '{choice}'")]
    ValueKindMismatch { choice: String },

    #[error("Compendium error: {0}")]
    Compendium(#[from] CompendiumError),
}

/// Result type alias for search operations
pub type Result<T> = std::result::Result<T, SearchError>;
