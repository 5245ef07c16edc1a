//! State module for tracking crawl progress
//!
//! This module provides the per-domain pacing state used while detail pages
//! are fetched. It is the only mutable state shared between fetch lanes.

mod domain_state;

// Re-export main types
pub use domain_state::DomainState;
