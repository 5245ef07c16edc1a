//! Configuration module for Quest-Scribe
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use quest_scribe::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("quests.toml")).unwrap();
//! println!("Index page: {}", config.crawler.index_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{BrowserConfig, Config, CrawlerConfig, OutputConfig, RegionSpec};

// Re-export parser functions
pub use parser::{load_config, parse_config};
