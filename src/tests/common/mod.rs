//! Common Test Utilities
//!
//! Shared fixtures used across test modules.


pub use fixtures::*;
