//! Summary of one harvest run

use crate::extract::UnresolvedAnchor;
use crate::output::aggregator::FailedQuest;
use crate::quest::QuestDetail;
use chrono::{DateTime, Utc};

/// Everything a harvest produced
#[derive(Debug, Clone)]
pub struct HarvestReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,

    /// Quest references found on the index page
    pub discovered: usize,

    /// Extracted records in discovery order
    pub details: Vec<QuestDetail>,

    /// Quests whose detail page could not be fetched, in discovery order
    pub failures: Vec<FailedQuest>,

    /// Region anchors that resolved to no label
    pub unresolved: Vec<UnresolvedAnchor>,
}

impl HarvestReport {
    /// Number of detail pages fetched and extracted
    pub fn fetched(&self) -> usize {
        self.details.len()
    }

    /// Number of records with no step count
    pub fn unknown_steps(&self) -> usize {
        self.details
            .iter()
            .filter(|detail| detail.step_count.is_none())
            .count()
    }

    /// Number of records holding only the reward sentinel
    pub fn missing_rewards(&self) -> usize {
        self.details
            .iter()
            .filter(|detail| !detail.rewards_found)
            .count()
    }

    /// Wall-clock duration of the run in seconds
    pub fn duration_seconds(&self) -> i64 {
        (self.finished_at - self.started_at).num_seconds()
    }
}

/// Prints the report to stdout
pub fn print_report(report: &HarvestReport) {
    println!("=== Harvest Summary ===\n");

    println!("Run:");
    println!("  Started:  {}", report.started_at.to_rfc3339());
    println!("  Finished: {}", report.finished_at.to_rfc3339());
    println!("  Duration: {}s", report.duration_seconds());
    println!();

    println!("Quests:");
    println!("  Discovered: {}", report.discovered);
    println!("  Extracted: {}", report.fetched());
    println!("  Failed: {}", report.failures.len());
    println!("  Unknown step count: {}", report.unknown_steps());
    println!("  No rewards found: {}", report.missing_rewards());
    println!();

    if !report.unresolved.is_empty() {
        println!("Unresolved Anchors ({}):", report.unresolved.len());
        for anchor in &report.unresolved {
            println!(
                "  - {} {}: #{}",
                anchor.region, anchor.category, anchor.anchor
            );
        }
        println!();
    }

    if !report.failures.is_empty() {
        println!("Failed Quests ({}):", report.failures.len());
        for failure in &report.failures {
            println!(
                "  - {} [{}] {}: {}",
                failure.id, failure.quest.region, failure.quest.name, failure.error
            );
        }
        println!();
    }
}
