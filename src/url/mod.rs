//! URL handling module for ics-scout
//!
//! This module provides URL normalization (defragmentation), dedup-key
//! derivation, and host extraction.

mod domain;
mod normalize;

// Re-export main functions
pub use domain::extract_host;
pub use normalize::{dedup_key, normalize_url};
