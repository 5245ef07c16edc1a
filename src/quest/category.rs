/// Quest category definitions
///
/// Every region lists its world quests in two sections on the index page.
use std::fmt;

/// The section of a region's listing a quest was found in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Quests that raise the region's reputation
    Reputation,

    /// Every other world quest of the region
    NonReputation,
}

impl Category {
    /// Both categories in scan order
    pub const ALL: [Category; 2] = [Category::Reputation, Category::NonReputation];

    /// Returns the display label used in logs and reports
    pub fn label(&self) -> &'static str {
        match self {
            Self::Reputation => "Reputation",
            Self::NonReputation => "Non-Reputation",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
