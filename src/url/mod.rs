//! URL handling module for Quest-Scribe
//!
//! This module provides domain extraction, link resolution, and the
//! allowed-domain check applied before a detail page is fetched.

mod domain;
mod link;

// Re-export main functions
pub use domain::{extract_domain, is_allowed_domain};
pub use link::resolve_link;
