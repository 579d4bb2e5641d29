//! Search sessions.
//!
//! A [`SearchSession`] is one independent search context (one browser tab):
//! a flat list of entries, the current search text and the active filters.
//! Every operation recomputes visibility and returns a [`VisibilityReport`].
//! Sessions share the compendium source and the facet catalogue read-only and
//! own everything else, so no locking happens inside a session.
//!
//! Text input can be applied immediately with [`SearchSession::set_search_text`]
//! or coalesced with [`SearchSession::queue_search_text`] + [`SearchSession::tick`],
//! which only recomputes once the input has been quiet for the debounce interval.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use super::category::{CategoryKind, FacetCatalogue};
use super::engine::{recompute_visibility, VisibilityReport};
use super::error::{Result, SearchError};
use super::facet::{FacetChoice, FacetValue};
use crate::core::compendium::{CompendiumSource, ResultEntry};

/// Default quiet period before queued search text is applied.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

// ============================================================================
// ActiveFilter
// ============================================================================

/// Opaque identifier of an active filter within its session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterHandle(u64);

impl fmt::Display for FilterHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "filter#{}", self.0)
    }
}

/// A category attached to a session, with its own copy of facet state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveFilter {
    handle: FilterHandle,
    kind: CategoryKind,
    choices: Vec<FacetChoice>,
}

impl ActiveFilter {
    pub fn new(handle: FilterHandle, kind: CategoryKind, choices: Vec<FacetChoice>) -> Self {
        Self {
            handle,
            kind,
            choices,
        }
    }

    pub fn handle(&self) -> FilterHandle {
        self.handle
    }

    pub fn kind(&self) -> CategoryKind {
        self.kind
    }

    pub fn title(&self) -> &'static str {
        self.kind.title()
    }

    pub fn choices(&self) -> &[FacetChoice] {
        &self.choices
    }
}

// ============================================================================
// SearchSession
// ============================================================================

/// One search/browse context with its own text query and filters.
pub struct SearchSession {
    source: Arc<dyn CompendiumSource>,
    catalogue: Arc<FacetCatalogue>,
    entries: Vec<ResultEntry>,
    search_text: String,
    filters: Vec<ActiveFilter>,
    next_handle: u64,
    last_report: VisibilityReport,

    // ── Debounce state ──────────────────────────────────────────────
    debounce: Duration,
    /// Search text typed but not yet applied.
    pending_text: Option<String>,
    /// Timestamp of the last queued edit.
    last_edit: Option<Instant>,
}

impl SearchSession {
    /// Create a session over `entries`. All entries start visible.
    pub fn new(
        source: Arc<dyn CompendiumSource>,
        catalogue: Arc<FacetCatalogue>,
        mut entries: Vec<ResultEntry>,
    ) -> Self {
        for entry in &mut entries {
            entry.visible = true;
        }
        let total = entries.len();
        Self {
            source,
            catalogue,
            entries,
            search_text: String::new(),
            filters: Vec::new(),
            next_handle: 1,
            last_report: VisibilityReport {
                total,
                visible: total,
                ..Default::default()
            },
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            pending_text: None,
            last_edit: None,
        }
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn entries(&self) -> &[ResultEntry] {
        &self.entries
    }

    pub fn visible_entries(&self) -> impl Iterator<Item = &ResultEntry> {
        self.entries.iter().filter(|e| e.visible)
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn filters(&self) -> &[ActiveFilter] {
        &self.filters
    }

    pub fn filter(&self, handle: FilterHandle) -> Option<&ActiveFilter> {
        self.filters.iter().find(|f| f.handle == handle)
    }

    /// Whether the filter row is shown (at least one active filter).
    pub fn filters_revealed(&self) -> bool {
        !self.filters.is_empty()
    }

    pub fn last_report(&self) -> &VisibilityReport {
        &self.last_report
    }

    pub fn catalogue(&self) -> &FacetCatalogue {
        &self.catalogue
    }

    // ========================================================================
    // Search text
    // ========================================================================

    /// Replace the search text and recompute immediately.
    pub async fn set_search_text(&mut self, text: &str) -> VisibilityReport {
        self.pending_text = None;
        self.last_edit = None;
        self.search_text = text.to_string();
        self.recompute().await
    }

    /// Record a text edit without recomputing; see [`Self::tick`].
    pub fn queue_search_text(&mut self, text: &str) {
        self.pending_text = Some(text.to_string());
        self.last_edit = Some(Instant::now());
    }

    pub fn has_pending_text(&self) -> bool {
        self.pending_text.is_some()
    }

    /// Apply queued text once the debounce interval has elapsed.
    ///
    /// Returns `None` when nothing is pending or the input is still active.
    pub async fn tick(&mut self) -> Option<VisibilityReport> {
        let quiet = self
            .last_edit
            .is_some_and(|ts| ts.elapsed() >= self.debounce);
        if self.pending_text.is_some() && quiet {
            self.flush().await
        } else {
            None
        }
    }

    /// Apply queued text now, regardless of the debounce interval.
    pub async fn flush(&mut self) -> Option<VisibilityReport> {
        let text = self.pending_text.take()?;
        self.last_edit = None;
        self.search_text = text;
        Some(self.recompute().await)
    }

    // ========================================================================
    // Filters
    // ========================================================================

    /// Attach a category with its default facet state.
    ///
    /// A session holds at most one filter per category.
    pub async fn add_filter(&mut self, kind: CategoryKind) -> Result<(FilterHandle, VisibilityReport)> {
        if self.filters.iter().any(|f| f.kind == kind) {
            return Err(SearchError::DuplicateFilter(kind));
        }
        let definition = self
            .catalogue
            .get(kind)
            .ok_or_else(|| SearchError::UnknownCategory(kind.title().to_string()))?;

        let handle = FilterHandle(self.next_handle);
        self.next_handle += 1;
        self.filters
            .push(ActiveFilter::new(handle, kind, definition.choices.clone()));
        log::info!("Added {kind} filter ({handle})");

        let report = self.recompute().await;
        Ok((handle, report))
    }

    /// Attach a category by display name (`"Magic Items"`).
    pub async fn add_filter_named(&mut self, name: &str) -> Result<(FilterHandle, VisibilityReport)> {
        let kind: CategoryKind = name.parse()?;
        self.add_filter(kind).await
    }

    /// Detach a filter. Removing the last one collapses the filter row.
    pub async fn remove_filter(&mut self, handle: FilterHandle) -> Result<VisibilityReport> {
        let position = self
            .filters
            .iter()
            .position(|f| f.handle == handle)
            .ok_or(SearchError::UnknownFilter(handle))?;
        let removed = self.filters.remove(position);
        log::info!("Removed {} filter ({handle})", removed.kind);

        Ok(self.recompute().await)
    }

    /// Change one facet of an active filter.
    pub async fn update_facet(
        &mut self,
        handle: FilterHandle,
        choice_index: usize,
        value: impl Into<FacetValue>,
    ) -> Result<VisibilityReport> {
        let filter = self
            .filters
            .iter_mut()
            .find(|f| f.handle == handle)
            .ok_or(SearchError::UnknownFilter(handle))?;
        let len = filter.choices.len();
        let choice = filter
            .choices
            .get_mut(choice_index)
            .ok_or(SearchError::ChoiceOutOfBounds {
                index: choice_index,
                len,
            })?;
        choice.apply(value.into())?;

        Ok(self.recompute().await)
    }

    // ========================================================================
    // Recomputation
    // ========================================================================

    /// Recompute visibility for every entry.
    ///
    /// Queued text is applied first so the latest input always wins.
    pub async fn recompute(&mut self) -> VisibilityReport {
        if let Some(text) = self.pending_text.take() {
            self.search_text = text;
            self.last_edit = None;
        }
        let report = recompute_visibility(
            &mut self.entries,
            &self.search_text,
            &self.filters,
            self.source.as_ref(),
        )
        .await;
        self.last_report = report.clone();
        report
    }
}
