//! Compendium Error Types
//!
//! Error handling for record resolution and category listings.

use thiserror::Error;

/// Data-access errors shared by every [`CompendiumSource`](super::CompendiumSource).
#[derive(Error, Debug)]
pub enum CompendiumError {
    /// The URL has no backing record.
    #[error("Record not found: {url}")]
    NotFound { url: String },

    /// The remote source could not be reached or answered with a failure status.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The backing data exists but does not have the shape of a resource record.
    #[error("Malformed record at {url}: {reason}")]
    Malformed { url: String, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CompendiumError {
    pub fn not_found(url: impl Into<String>) -> Self {
        Self::NotFound { url: url.into() }
    }

    pub fn malformed(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Whether the caller may retry the same request later.
    ///
    /// Only transport failures qualify; the core never retries on its own.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<reqwest::Error> for CompendiumError {
    fn from(e: reqwest::Error) -> Self {
        CompendiumError::Transport(e.to_string())
    }
}

/// Result type alias for compendium operations
pub type Result<T> = std::result::Result<T, CompendiumError>;
