//! Reward strategies
//!
//! The reward section of a detail page has gone through several layouts.
//! They are tried newest first; reordering them changes the output for pages
//! that match more than one layout.

use crate::extract::chain::{
    next_element_sibling, non_empty, selector, text_of, Strategy, StrategyChain,
};
use scraper::Html;

pub const REWARDS_HEADING: &str = "rewards-heading";
pub const BODY_LIST: &str = "body-list";
pub const CENTERED_TABLE: &str = "centered-table";
pub const HOUSING_TABLE: &str = "housing-table";
pub const POSITIONAL_TABLE: &str = "positional-table";

/// Heading text that introduces the reward list
const REWARDS_LABEL: &str = "Rewards List";

/// Row label whose value holds one item per line
const ITEMS_LABEL: &str = "Items";

/// Builds the reward chain in priority order
pub fn reward_chain() -> StrategyChain<Vec<String>> {
    StrategyChain::new(vec![
        Strategy::new(REWARDS_HEADING, rewards_heading_list),
        Strategy::new(BODY_LIST, body_lists),
        Strategy::new(CENTERED_TABLE, centered_table_cells),
        Strategy::new(HOUSING_TABLE, housing_table_rows),
        Strategy::new(POSITIONAL_TABLE, positional_table_rows),
    ])
}

/// The list right after a "Rewards List" heading
fn rewards_heading_list(document: &Html) -> Option<Vec<String>> {
    let headings = selector("#article-body > h3")?;
    let items = selector("li")?;

    let mut rewards = Vec::new();
    for heading in document.select(&headings) {
        if !heading.text().collect::<String>().contains(REWARDS_LABEL) {
            continue;
        }

        let Some(list) = next_element_sibling(heading) else {
            continue;
        };
        if list.value().name() != "ul" {
            continue;
        }

        rewards.extend(list.select(&items).map(text_of));
    }

    non_empty(rewards)
}

/// Every plain list directly under the article body
fn body_lists(document: &Html) -> Option<Vec<String>> {
    let lists = selector("#article-body > ul")?;
    let items = selector("li")?;

    let rewards = document
        .select(&lists)
        .flat_map(|list| list.select(&items).map(text_of).collect::<Vec<_>>())
        .filter(|text| !text.is_empty())
        .collect();

    non_empty(rewards)
}

/// Every cell of the centered reward table
fn centered_table_cells(document: &Html) -> Option<Vec<String>> {
    let cells = selector("#article-body table.genshin_center td")?;

    let rewards = document
        .select(&cells)
        .map(text_of)
        .filter(|text| !text.is_empty())
        .collect();

    non_empty(rewards)
}

/// Label/value rows of the housing reward table
fn housing_table_rows(document: &Html) -> Option<Vec<String>> {
    let rows = selector("#article-body > div.genshin_housyu > table > tbody > tr")?;
    let label_cells = selector("th")?;
    let value_cells = selector("td")?;

    let mut rewards = Vec::new();
    for row in document.select(&rows) {
        let label = joined_text(row.select(&label_cells));
        let value = joined_text(row.select(&value_cells));

        if label.is_empty() || value.is_empty() {
            continue;
        }

        if label == ITEMS_LABEL {
            rewards.extend(
                value
                    .split('\n')
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(str::to_string),
            );
        } else {
            rewards.push(format!("{} x {}", label, value));
        }
    }

    non_empty(rewards)
}

/// Name/amount rows of the 34th child table of the article body
fn positional_table_rows(document: &Html) -> Option<Vec<String>> {
    let rows = selector("#article-body > table:nth-child(34) > tbody > tr")?;
    let cells = selector("td")?;

    let mut rewards = Vec::new();
    for row in document.select(&rows) {
        let row_cells: Vec<String> = row.select(&cells).map(text_of).collect();
        if row_cells.len() < 2 {
            continue;
        }

        let (name, amount) = (&row_cells[0], &row_cells[1]);
        if name.is_empty() || amount.is_empty() {
            continue;
        }

        rewards.push(format!("{} x {}", name, amount));
    }

    non_empty(rewards)
}

/// Text of several elements concatenated, then trimmed
fn joined_text<'a>(elements: impl Iterator<Item = scraper::ElementRef<'a>>) -> String {
    elements
        .flat_map(|element| element.text())
        .collect::<String>()
        .trim()
        .to_string()
}
