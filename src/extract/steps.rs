//! Step-count strategies
//!
//! Detail pages list quest steps either as an ordered list inside a
//! `div.genshin_quest` container (current layout) or as table rows directly
//! under the article body (legacy layout).

use crate::extract::chain::{selector, Strategy, StrategyChain};
use scraper::Html;

/// Id of the ordered-list layout
pub const CURRENT_FORMAT: &str = "current-format";

/// Id of the table layout
pub const LEGACY_FORMAT: &str = "legacy-format";

/// Builds the step-count chain, newest layout first
pub fn step_chain() -> StrategyChain<u32> {
    StrategyChain::new(vec![
        Strategy::new(CURRENT_FORMAT, current_format_steps),
        Strategy::new(LEGACY_FORMAT, legacy_table_steps),
    ])
}

/// Counts the items of the quest-steps ordered list
fn current_format_steps(document: &Html) -> Option<u32> {
    let items = selector("div.genshin_quest > ol > li")?;
    let count = document.select(&items).count();

    if count > 0 {
        u32::try_from(count).ok()
    } else {
        None
    }
}

/// Takes the longest article table and discounts its header row
fn legacy_table_steps(document: &Html) -> Option<u32> {
    let tables = selector("#article-body > table")?;
    let rows = selector("tr")?;

    let longest = document
        .select(&tables)
        .map(|table| table.select(&rows).count())
        .max()?;

    let steps = longest.saturating_sub(1);
    if steps > 0 {
        u32::try_from(steps).ok()
    } else {
        None
    }
}
