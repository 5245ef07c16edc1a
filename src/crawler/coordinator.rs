//! Harvest coordinator - main run orchestration
//!
//! A run goes through three stages:
//! - Fetching and scanning the index page for quest references
//! - Dispatching detail page fetches under per-domain pacing
//! - Extracting each fetched page and aggregating records in discovery order

use crate::config::Config;
use crate::crawler::dispatcher::Dispatcher;
use crate::crawler::fetcher::{HttpFetcher, PageFetcher};
use crate::crawler::scheduler::PacingPolicy;
use crate::extract::{scan_index, ExtractionChain, IndexScan};
use crate::output::{HarvestReport, ResultAggregator};
use crate::{ConfigError, ScribeError};
use chrono::Utc;
use url::Url;

/// Runs a complete harvest for one configuration
pub struct Harvester<F> {
    config: Config,
    fetcher: F,
    extraction: ExtractionChain,
}

impl Harvester<HttpFetcher> {
    /// Creates a harvester that fetches over HTTP with the configured headers
    pub fn new(config: Config) -> Result<Self, ScribeError> {
        let fetcher = HttpFetcher::new(&config.browser, config.crawler.request_timeout())?;
        Ok(Self::with_fetcher(config, fetcher))
    }
}

impl<F: PageFetcher> Harvester<F> {
    /// Creates a harvester around any fetch collaborator
    pub fn with_fetcher(config: Config, fetcher: F) -> Self {
        Self {
            config,
            fetcher,
            extraction: ExtractionChain::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Fetches the index page and scans it for quest references
    ///
    /// A failed index fetch is fatal.
    pub async fn scan(&self) -> Result<IndexScan, ScribeError> {
        let index_url = Url::parse(&self.config.crawler.index_url).map_err(|e| {
            ConfigError::InvalidUrl(format!("{}: {}", self.config.crawler.index_url, e))
        })?;

        tracing::info!(url = %index_url, "Fetching index page");
        let page = self.fetcher.fetch(&index_url).await?;
        tracing::info!(
            url = %page.final_url,
            status = page.status_code,
            "Index page fetched"
        );

        let document = page.parse();
        let scan = scan_index(&document, &page.final_url, &self.config.regions);

        tracing::info!(
            quests = scan.quests.len(),
            unresolved = scan.unresolved.len(),
            "Index scan complete"
        );
        Ok(scan)
    }

    /// Runs the whole harvest and returns the report
    ///
    /// Detail page failures are collected in the report; only an index page
    /// failure aborts the run.
    pub async fn run(&self) -> Result<HarvestReport, ScribeError> {
        let started_at = Utc::now();
        let IndexScan { quests, unresolved } = self.scan().await?;
        let discovered = quests.len();

        let dispatcher = Dispatcher::new(
            &self.fetcher,
            PacingPolicy::from_config(&self.config.crawler),
        )
        .with_allowed_domains(self.config.crawler.allowed_domains.clone());

        let extraction = &self.extraction;
        let mut aggregator = ResultAggregator::new(discovered);

        dispatcher
            .dispatch(quests, |id, quest, result| match result {
                Ok(page) => {
                    let document = page.parse();
                    let found = extraction.extract(&document);
                    tracing::debug!(
                        request = %id,
                        quest = %quest.name,
                        steps_format = found.steps_format().unwrap_or("none"),
                        rewards_layout = found.rewards.as_ref().map_or("none", |hit| hit.strategy_id),
                        "Extracted detail page"
                    );
                    aggregator.record(id, found.into_detail(&quest));
                }
                Err(error) => {
                    tracing::warn!(
                        request = %id,
                        quest = %quest.name,
                        region = %quest.region,
                        "Detail page failed: {}",
                        error
                    );
                    aggregator.record_failure(id, quest, error);
                }
            })
            .await;

        let (details, failures) = aggregator.into_parts();
        let report = HarvestReport {
            started_at,
            finished_at: Utc::now(),
            discovered,
            details,
            failures,
            unresolved,
        };

        tracing::info!(
            discovered = report.discovered,
            extracted = report.fetched(),
            failed = report.failures.len(),
            "Harvest finished"
        );
        Ok(report)
    }
}

/// Runs a harvest over HTTP
pub async fn harvest(config: Config) -> Result<HarvestReport, ScribeError> {
    Harvester::new(config)?.run().await
}
