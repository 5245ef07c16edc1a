use crate::quest::Category;
use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Quest-Scribe
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub browser: BrowserConfig,
    pub output: OutputConfig,
    /// Regions in processing order
    #[serde(default, rename = "region")]
    pub regions: Vec<RegionSpec>,
}

/// Crawl target and pacing configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// The page listing every region's quests
    #[serde(rename = "index-url")]
    pub index_url: String,

    /// Hosts that detail pages may be fetched from (empty allows any host)
    #[serde(rename = "allowed-domains", default)]
    pub allowed_domains: Vec<String>,

    /// Fixed delay between two requests to the same domain (milliseconds)
    #[serde(rename = "base-delay-ms", default = "default_base_delay_ms")]
    pub base_delay_ms: u64,

    /// Upper bound of the random delay added to the base delay (milliseconds)
    #[serde(rename = "max-jitter-ms", default = "default_max_jitter_ms")]
    pub max_jitter_ms: u64,

    /// Overall timeout for a single request (seconds)
    #[serde(rename = "request-timeout-secs", default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl CrawlerConfig {
    /// Returns the base delay as a duration
    pub fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }

    /// Returns the jitter bound as a duration
    pub fn max_jitter(&self) -> Duration {
        Duration::from_millis(self.max_jitter_ms)
    }

    /// Returns the request timeout as a duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Outbound headers sent with every request
///
/// The defaults mimic a desktop Chrome build so the target site serves its
/// regular markup.
#[derive(Debug, Clone, Deserialize)]
pub struct BrowserConfig {
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_accept")]
    pub accept: String,

    #[serde(rename = "accept-language", default = "default_accept_language")]
    pub accept_language: String,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            accept: default_accept(),
            accept_language: default_accept_language(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path of the CSV file to write
    #[serde(rename = "csv-path")]
    pub csv_path: String,

    /// Written in the steps column when no layout yielded a step count
    #[serde(rename = "unknown-steps-marker", default = "default_unknown_marker")]
    pub unknown_steps_marker: String,
}

/// One region of the index page and the ids of its two heading anchors
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegionSpec {
    pub name: String,

    /// Id of the element whose text titles the reputation quest list
    #[serde(rename = "reputation-anchor")]
    pub reputation_anchor: String,

    /// Id of the element whose text titles the non-reputation quest list
    #[serde(rename = "non-reputation-anchor")]
    pub non_reputation_anchor: String,
}

impl RegionSpec {
    pub fn new(
        name: impl Into<String>,
        reputation_anchor: impl Into<String>,
        non_reputation_anchor: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            reputation_anchor: reputation_anchor.into(),
            non_reputation_anchor: non_reputation_anchor.into(),
        }
    }

    /// Returns the anchor id that titles this region's list for `category`
    pub fn anchor(&self, category: Category) -> &str {
        match category {
            Category::Reputation => &self.reputation_anchor,
            Category::NonReputation => &self.non_reputation_anchor,
        }
    }
}

fn default_base_delay_ms() -> u64 {
    2000
}

fn default_max_jitter_ms() -> u64 {
    1000
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/91.0.4472.124 Safari/537.36"
        .to_string()
}

fn default_accept() -> String {
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8".to_string()
}

fn default_accept_language() -> String {
    "en-US,en;q=0.5".to_string()
}

fn default_unknown_marker() -> String {
    crate::output::DEFAULT_UNKNOWN_STEPS_MARKER.to_string()
}
