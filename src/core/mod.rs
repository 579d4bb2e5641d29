pub mod abilities;
pub mod bookmarks;
pub mod browser;
pub mod classifier;
pub mod compendium;
pub mod logging;
pub mod navigation;
pub mod search;
