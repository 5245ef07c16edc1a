use crate::quest::Category;
use url::Url;

/// Reward entry written when no reward layout matched a detail page
pub const NO_REWARDS_SENTINEL: &str = "No rewards found";

/// A quest discovered on the index page
///
/// Identity is positional: the same quest listed under two regions yields two
/// refs, and both are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestRef {
    /// Trimmed link text
    pub name: String,

    /// Absolute URL of the detail page
    pub link: Url,

    /// Name of the region whose listing contained the quest
    pub region: String,

    /// Section of the region listing
    pub category: Category,
}

/// Fields extracted from one quest detail page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestDetail {
    pub region: String,

    pub name: String,

    /// Number of steps, absent when no layout yielded a count
    pub step_count: Option<u32>,

    /// Reward descriptions in page order, never empty
    pub rewards: Vec<String>,

    /// False when `rewards` holds only [`NO_REWARDS_SENTINEL`]
    pub rewards_found: bool,
}

impl QuestDetail {
    /// Builds the record for `quest`
    ///
    /// An empty reward list is replaced by the single sentinel entry so that
    /// "extraction found nothing" stays distinguishable from "never extracted".
    pub fn new(quest: &QuestRef, step_count: Option<u32>, rewards: Vec<String>) -> Self {
        let rewards_found = !rewards.is_empty();
        let rewards = if rewards_found {
            rewards
        } else {
            vec![NO_REWARDS_SENTINEL.to_string()]
        };

        Self {
            region: quest.region.clone(),
            name: quest.name.clone(),
            step_count,
            rewards,
            rewards_found,
        }
    }
}
