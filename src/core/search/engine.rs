//! Visibility recomputation.
//!
//! An entry is visible when its name passes the text match and, if any filters
//! are active, at least one filter's predicate accepts it (filters are OR-ed).
//! Entries are evaluated independently: a record that fails to resolve hides
//! only that entry and is reported as an [`EntryFailure`].

use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};

use super::predicate;
use super::session::ActiveFilter;
use super::text::text_matches;
use crate::core::compendium::{CompendiumSource, ResourceRecord, ResultEntry};

/// Maximum number of in-flight resolutions during one recomputation.
pub const RESOLVE_CONCURRENCY: usize = 16;

/// A per-entry resolution failure recorded for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryFailure {
    pub name: String,
    pub url: String,
    pub error: String,
    /// The underlying failure was a transport error the caller may retry.
    pub retryable: bool,
}

/// Outcome of one recomputation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibilityReport {
    pub total: usize,
    pub visible: usize,
    pub failures: Vec<EntryFailure>,
    /// Whether the filter row should be shown (at least one active filter).
    pub filters_revealed: bool,
}

/// Recompute `visible` for every entry.
pub async fn recompute_visibility(
    entries: &mut [ResultEntry],
    search_text: &str,
    filters: &[ActiveFilter],
    source: &dyn CompendiumSource,
) -> VisibilityReport {
    let outcomes: Vec<Result<bool, EntryFailure>> = stream::iter(entries.iter())
        .map(|entry| evaluate_entry(entry, search_text, filters, source))
        .buffered(RESOLVE_CONCURRENCY)
        .collect()
        .await;

    let mut report = VisibilityReport {
        total: entries.len(),
        filters_revealed: !filters.is_empty(),
        ..Default::default()
    };

    for (entry, outcome) in entries.iter_mut().zip(outcomes) {
        entry.visible = match outcome {
            Ok(visible) => visible,
            Err(failure) => {
                report.failures.push(failure);
                false
            }
        };
        if entry.visible {
            report.visible += 1;
        }
    }

    log::debug!(
        "Visibility recomputed: {}/{} visible, {} filters, {} failures",
        report.visible,
        report.total,
        filters.len(),
        report.failures.len()
    );
    report
}

async fn evaluate_entry(
    entry: &ResultEntry,
    search_text: &str,
    filters: &[ActiveFilter],
    source: &dyn CompendiumSource,
) -> Result<bool, EntryFailure> {
    if !text_matches(&entry.name, search_text) {
        return Ok(false);
    }
    if filters.is_empty() {
        return Ok(true);
    }

    let gated: Vec<&ActiveFilter> = filters
        .iter()
        .filter(|filter| predicate::url_gate(filter.kind(), &entry.url))
        .collect();

    // URL-only filters need no record.
    if gated.iter().any(|filter| !predicate::needs_record(filter.kind())) {
        return Ok(true);
    }

    // Resolved lazily, at most once per entry.
    let mut record: Option<ResourceRecord> = None;

    for filter in gated {
        if record.is_none() {
            match source.resolve(&entry.url).await {
                Ok(resolved) => record = Some(resolved),
                Err(e) => {
                    log::warn!("Could not resolve '{}' ({}): {e}", entry.name, entry.url);
                    return Err(EntryFailure {
                        name: entry.name.clone(),
                        url: entry.url.clone(),
                        error: e.to_string(),
                        retryable: e.is_retryable(),
                    });
                }
            }
        }
        if let Some(resolved) = &record {
            if predicate::matches_record(filter.kind(), filter.choices(), resolved) {
                return Ok(true);
            }
        }
    }

    Ok(false)
}
