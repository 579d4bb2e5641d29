//! Per-tab navigation stack.
//!
//! Every tab starts on its search page. Opening an entry pushes a
//! [`NavigationFrame`] holding the resolved, classified record; the frame's
//! embedded references can be opened in turn, so navigation is recursive.
//! Going back pops one frame; the search page itself is never popped.

use serde::{Deserialize, Serialize};

use super::classifier::VariantTag;
use super::compendium::{ResourceRecord, ResultEntry};

/// One opened record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationFrame {
    pub url: String,
    pub title: String,
    pub tag: VariantTag,
    pub record: ResourceRecord,
}

impl NavigationFrame {
    pub fn new(record: ResourceRecord, tag: VariantTag) -> Self {
        let title = record.name().unwrap_or_else(|| record.url()).to_string();
        Self {
            url: record.url().to_string(),
            title,
            tag,
            record,
        }
    }

    /// Entries this page links to (school, classes, subclasses, ...).
    pub fn links(&self) -> Vec<ResultEntry> {
        self.record.linked_entries()
    }
}

/// Frames opened on top of a tab's search page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NavigationStack {
    frames: Vec<NavigationFrame>,
    pinned: bool,
}

impl NavigationStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, frame: NavigationFrame) {
        log::info!("navigated to {}", frame.url);
        self.frames.push(frame);
    }

    /// Pop the current frame. Returns `None` on the search page.
    pub fn back(&mut self) -> Option<NavigationFrame> {
        self.frames.pop()
    }

    /// The visible frame, or `None` while the search page is showing.
    pub fn current(&self) -> Option<&NavigationFrame> {
        self.frames.last()
    }

    pub fn can_go_back(&self) -> bool {
        !self.frames.is_empty()
    }

    /// Number of frames above the search page.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn frames(&self) -> &[NavigationFrame] {
        &self.frames
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    pub fn set_pinned(&mut self, pinned: bool) {
        self.pinned = pinned;
    }

    /// Flip the pin and return the new state.
    pub fn toggle_pinned(&mut self) -> bool {
        self.pinned = !self.pinned;
        self.pinned
    }
}
