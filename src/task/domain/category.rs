//! Task category labels.

use super::ParseCategoryError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a task's intent.
///
/// Categories are either supplied by the client or derived from the task
/// text by [`categorize`](super::categorize). A stored task always carries
/// exactly one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Professional work.
    Work,
    /// Personal and family matters.
    Personal,
    /// Purchases and errands.
    Shopping,
    /// Health and fitness.
    Health,
    /// Study and self-improvement.
    Learning,
    /// Trips and bookings.
    Travel,
    /// Bills and money.
    Finance,
    /// Anything not matching another category.
    #[default]
    Other,
}

impl Category {
    /// Every category in declaration order.
    pub const ALL: [Self; 8] = [
        Self::Work,
        Self::Personal,
        Self::Shopping,
        Self::Health,
        Self::Learning,
        Self::Travel,
        Self::Finance,
        Self::Other,
    ];

    /// Returns the canonical label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Work => "Work",
            Self::Personal => "Personal",
            Self::Shopping => "Shopping",
            Self::Health => "Health",
            Self::Learning => "Learning",
            Self::Travel => "Travel",
            Self::Finance => "Finance",
            Self::Other => "Other",
        }
    }
}

impl TryFrom<&str> for Category {
    type Error = ParseCategoryError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(normalized))
            .ok_or_else(|| ParseCategoryError(value.to_owned()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
