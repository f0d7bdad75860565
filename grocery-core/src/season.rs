//! Seasonal contexts a shopper can switch between.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum Season {
    #[default]
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    /// Every season, in display order.
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Fall, Season::Winter];

    /// Case-sensitive key used in seed data and seasonal mappings.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
            Season::Winter => "Winter",
        }
    }

    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|season| season.label() == label)
    }
}

/// The fixed season list offered to the presentation layer.
#[must_use]
pub const fn list_seasons() -> &'static [Season] {
    &Season::ALL
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown season `{0}` (expected one of Spring, Summer, Fall, Winter)")]
pub struct SeasonParseError(pub String);

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Season {
    type Err = SeasonParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| SeasonParseError(s.to_string()))
    }
}
