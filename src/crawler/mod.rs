//! Crawler module for fetching the index and detail pages
//!
//! This module contains the network side of a harvest, including:
//! - HTTP fetching with browser-like headers
//! - Per-domain pacing with randomized spacing
//! - Dispatch of detail page requests and correlation of their completions
//! - Overall run coordination

mod coordinator;
mod dispatcher;
mod fetcher;
mod scheduler;

pub use coordinator::{harvest, Harvester};
pub use dispatcher::{Dispatcher, RequestId};
pub use fetcher::{build_http_client, fetch_url, FetchError, FetchedPage, HttpFetcher, PageFetcher};
pub use scheduler::{PacingPolicy, Scheduler};
