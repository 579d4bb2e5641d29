//! Bookmark persistence.
//!
//! Bookmarked records reopen as pinned tabs at startup. The state is a small
//! JSON document:
//!
//! ```json
//! {"bookmarks": [{"url": "/api/monsters/aboleth", "name": "Aboleth"}]}
//! ```
//!
//! Storage is injected through [`BookmarkStore`]; [`FileBookmarkStore`] keeps
//! the document in the user config directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File name of the persisted state.
pub const STATE_FILE_NAME: &str = "questscribe_state.json";

/// Bookmark persistence errors.
#[derive(Error, Debug)]
pub enum BookmarkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("No user config directory available")]
    NoConfigDir,
}

pub type Result<T> = std::result::Result<T, BookmarkError>;

/// A pinned `{url, name}` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bookmark {
    pub url: String,
    pub name: String,
}

impl Bookmark {
    pub fn new(url: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            name: name.into(),
        }
    }
}

/// The persisted state document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmarks {
    #[serde(default)]
    pub bookmarks: Vec<Bookmark>,
}

impl Default for Bookmarks {
    /// First-run state: a single bookmark so the pinned-tab flow is visible.
    fn default() -> Self {
        Self {
            bookmarks: vec![Bookmark::new("/api/monsters/aboleth", "Aboleth")],
        }
    }
}

impl Bookmarks {
    pub fn empty() -> Self {
        Self {
            bookmarks: Vec::new(),
        }
    }

    pub fn contains(&self, url: &str) -> bool {
        self.bookmarks.iter().any(|b| b.url == url)
    }

    /// Pin `bookmark` if absent, unpin it if present. Returns whether it is
    /// pinned afterwards.
    pub fn toggle(&mut self, bookmark: Bookmark) -> bool {
        if let Some(pos) = self.bookmarks.iter().position(|b| b.url == bookmark.url) {
            self.bookmarks.remove(pos);
            false
        } else {
            self.bookmarks.push(bookmark);
            true
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bookmark> {
        self.bookmarks.iter()
    }

    pub fn len(&self) -> usize {
        self.bookmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookmarks.is_empty()
    }
}

/// Load/save capability for the bookmark document.
pub trait BookmarkStore: Send + Sync {
    fn load(&self) -> Result<Bookmarks>;
    fn save(&self, bookmarks: &Bookmarks) -> Result<()>;

    /// Load the stored state, falling back to (and persisting) the default
    /// state when nothing usable is stored yet.
    fn load_or_init(&self) -> Bookmarks {
        match self.load() {
            Ok(bookmarks) => {
                log::info!("loaded state: {} bookmarks", bookmarks.len());
                bookmarks
            }
            Err(e) => {
                log::debug!("No usable bookmark state ({e}), writing defaults");
                let defaults = Bookmarks::default();
                if let Err(e) = self.save(&defaults) {
                    log::warn!("error saving state: {e}");
                }
                defaults
            }
        }
    }
}

/// JSON file store, by default `<config_dir>/questscribe_state.json`.
#[derive(Debug, Clone)]
pub struct FileBookmarkStore {
    path: PathBuf,
}

impl FileBookmarkStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store in the platform's user config directory.
    pub fn in_config_dir() -> Result<Self> {
        let dir = dirs::config_dir().ok_or(BookmarkError::NoConfigDir)?;
        Ok(Self::new(dir.join(STATE_FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BookmarkStore for FileBookmarkStore {
    fn load(&self) -> Result<Bookmarks> {
        let contents = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    fn save(&self, bookmarks: &Bookmarks) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string(bookmarks)?;
        fs::write(&self.path, json)?;
        log::info!("saved state to {}", self.path.display());
        Ok(())
    }
}
