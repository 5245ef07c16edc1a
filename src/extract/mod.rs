//! Extraction from fetched pages
//!
//! This module contains:
//! - The index scan that turns region anchors into quest references
//! - The step-count and reward strategy chains for detail pages
//! - The per-page extraction that combines both chains

mod chain;
mod index;
mod rewards;
mod steps;

pub use chain::{ChainHit, Strategy, StrategyChain, StrategyFn};
pub use index::{scan_index, scrape_index, IndexScan, UnresolvedAnchor};
pub use rewards::{
    reward_chain, BODY_LIST, CENTERED_TABLE, HOUSING_TABLE, POSITIONAL_TABLE, REWARDS_HEADING,
};
pub use steps::{step_chain, CURRENT_FORMAT, LEGACY_FORMAT};

use crate::quest::{QuestDetail, QuestRef};
use scraper::Html;

/// What the two chains found on one detail page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageExtraction {
    pub steps: Option<ChainHit<u32>>,
    pub rewards: Option<ChainHit<Vec<String>>>,
}

impl PageExtraction {
    /// Layout id that produced the step count, if any
    pub fn steps_format(&self) -> Option<&'static str> {
        self.steps.as_ref().map(|hit| hit.strategy_id)
    }

    /// Builds the quest record, substituting the reward sentinel when needed
    pub fn into_detail(self, quest: &QuestRef) -> QuestDetail {
        let step_count = self.steps.map(|hit| hit.value);
        let rewards = self.rewards.map(|hit| hit.value).unwrap_or_default();
        QuestDetail::new(quest, step_count, rewards)
    }
}

/// The step-count and reward chains of a detail page
///
/// The two fields are extracted independently of each other.
#[derive(Debug)]
pub struct ExtractionChain {
    steps: StrategyChain<u32>,
    rewards: StrategyChain<Vec<String>>,
}

impl Default for ExtractionChain {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractionChain {
    pub fn new() -> Self {
        Self {
            steps: step_chain(),
            rewards: reward_chain(),
        }
    }

    /// Returns the step count, or None when no layout yielded one
    pub fn extract_steps(&self, document: &Html) -> Option<u32> {
        self.steps.run(document).map(|hit| hit.value)
    }

    /// Returns the rewards of the first layout that yielded any, or an empty list
    pub fn extract_rewards(&self, document: &Html) -> Vec<String> {
        self.rewards
            .run(document)
            .map(|hit| hit.value)
            .unwrap_or_default()
    }

    /// Runs both chains and keeps the winning strategy ids
    pub fn extract(&self, document: &Html) -> PageExtraction {
        PageExtraction {
            steps: self.steps.run(document),
            rewards: self.rewards.run(document),
        }
    }
}
