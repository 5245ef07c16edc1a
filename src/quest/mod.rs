//! Quest records flowing through the harvest
//!
//! A [`QuestRef`] is produced by the index scan and consumed by the
//! dispatcher; a [`QuestDetail`] is produced once per fetched detail page.

mod category;
mod record;

pub use category::Category;
pub use record::{QuestDetail, QuestRef, NO_REWARDS_SENTINEL};
