//! Grade slot and grade entry models

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the three fixed assessment slots of a subject
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradeSlot {
    /// First assessment (weight 1)
    First,
    /// Second assessment (weight 2)
    Second,
    /// Third, optional assessment that may stand in for either of the others
    Third,
}

impl GradeSlot {
    /// All slots in evaluation order
    pub const ALL: [Self; 3] = [Self::First, Self::Second, Self::Third];

    /// Weight label stored alongside an entry.
    ///
    /// Informational only: the average formula hardcodes its weights.
    #[must_use]
    pub const fn weight(self) -> u8 {
        match self {
            Self::Second => 2,
            Self::First | Self::Third => 1,
        }
    }

    /// Stable key used in files and save plans
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Second => "second",
            Self::Third => "third",
        }
    }

    /// Human-facing column label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::First => "Grade A",
            Self::Second => "Grade B",
            Self::Third => "Grade C",
        }
    }
}

impl FromStr for GradeSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|slot| normalized == slot.key() || normalized == slot.label().to_ascii_lowercase())
            .ok_or_else(|| format!("Unknown grade slot: '{s}'"))
    }
}

impl fmt::Display for GradeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A recorded score for one slot of one subject
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeEntry {
    /// Store-assigned identifier; `None` until the entry has been persisted
    pub id: Option<String>,
    /// Slot this score fills
    pub slot: GradeSlot,
    /// Score, nominally in `[0, 10]` (range is not enforced here)
    pub score: f64,
}

impl GradeEntry {
    /// Create an entry that already exists in the store
    #[must_use]
    pub const fn stored(id: String, slot: GradeSlot, score: f64) -> Self {
        Self {
            id: Some(id),
            slot,
            score,
        }
    }

    /// Create an entry that has not been persisted yet
    #[must_use]
    pub const fn unsaved(slot: GradeSlot, score: f64) -> Self {
        Self {
            id: None,
            slot,
            score,
        }
    }

    /// Weight label of this entry's slot
    #[must_use]
    pub const fn weight(&self) -> u8 {
        self.slot.weight()
    }
}

/// Scores of the three slots, each optionally absent
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SlotScores {
    /// First assessment score
    pub first: Option<f64>,
    /// Second assessment score
    pub second: Option<f64>,
    /// Third assessment score
    pub third: Option<f64>,
}

impl SlotScores {
    /// Build from already-parsed scores
    #[must_use]
    pub const fn new(first: Option<f64>, second: Option<f64>, third: Option<f64>) -> Self {
        Self {
            first,
            second,
            third,
        }
    }

    /// Build from raw text fields; unparseable or empty text counts as absent
    #[must_use]
    pub fn from_raw(first: &str, second: &str, third: &str) -> Self {
        use crate::core::grading::parse_score;
        Self::new(parse_score(first), parse_score(second), parse_score(third))
    }

    /// Score of a single slot
    #[must_use]
    pub const fn get(&self, slot: GradeSlot) -> Option<f64> {
        match slot {
            GradeSlot::First => self.first,
            GradeSlot::Second => self.second,
            GradeSlot::Third => self.third,
        }
    }

    /// Replace the score of a single slot
    pub fn set(&mut self, slot: GradeSlot, score: Option<f64>) {
        match slot {
            GradeSlot::First => self.first = score,
            GradeSlot::Second => self.second = score,
            GradeSlot::Third => self.third = score,
        }
    }

    /// Whether no slot holds a score
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.first.is_none() && self.second.is_none() && self.third.is_none()
    }
}
