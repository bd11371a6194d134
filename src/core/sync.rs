//! Save planning: what a save of the grade form sends to the store
//!
//! The store itself is out of reach of this crate. Building a [`SavePlan`]
//! turns the edited form state plus the identifiers of already-persisted
//! entries into the per-slot writes the store has to execute.

use crate::core::models::{GradeSlot, SlotScores};
use crate::debug;

/// Store identifiers of persisted grade entries, by slot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredGrades {
    first: Option<String>,
    second: Option<String>,
    third: Option<String>,
}

impl StoredGrades {
    /// Identifier stored for a slot
    #[must_use]
    pub fn id(&self, slot: GradeSlot) -> Option<&str> {
        match slot {
            GradeSlot::First => self.first.as_deref(),
            GradeSlot::Second => self.second.as_deref(),
            GradeSlot::Third => self.third.as_deref(),
        }
    }

    /// Record (or clear) the identifier of a slot
    pub fn set(&mut self, slot: GradeSlot, id: Option<String>) {
        match slot {
            GradeSlot::First => self.first = id,
            GradeSlot::Second => self.second = id,
            GradeSlot::Third => self.third = id,
        }
    }
}

/// Write needed for one slot
#[derive(Debug, Clone, PartialEq)]
pub enum GradeWrite {
    /// Nothing stored and nothing entered
    Skip,
    /// First save of a score
    Insert {
        /// Score to store
        score: f64,
    },
    /// Overwrite an existing entry (last write wins)
    Update {
        /// Store identifier of the entry
        id: String,
        /// Score to store
        score: f64,
    },
    /// Field cleared; drop the stored entry
    Delete {
        /// Store identifier of the entry
        id: String,
    },
}

/// A [`GradeWrite`] bound to its slot
#[derive(Debug, Clone, PartialEq)]
pub struct SlotWrite {
    /// Slot the write targets
    pub slot: GradeSlot,
    /// What to do with it
    pub write: GradeWrite,
}

impl SlotWrite {
    /// Weight label sent along with inserts and updates
    #[must_use]
    pub const fn weight(&self) -> u8 {
        self.slot.weight()
    }
}

/// Everything one save sends to the store for a subject
#[derive(Debug, Clone, PartialEq)]
pub struct SavePlan {
    /// Subject being saved
    pub subject_id: String,
    /// One write per slot, in first/second/third order
    pub writes: Vec<SlotWrite>,
    /// Final absence count
    pub absences: u32,
}

impl SavePlan {
    /// Build the plan for a save.
    ///
    /// Per slot: entered + stored → update, entered + not stored → insert,
    /// cleared + stored → delete, cleared + not stored → skip.
    #[must_use]
    pub fn build(
        subject_id: &str,
        stored: &StoredGrades,
        edited: &SlotScores,
        absences: u32,
    ) -> Self {
        let writes = GradeSlot::ALL
            .into_iter()
            .map(|slot| {
                let write = match (edited.get(slot), stored.id(slot)) {
                    (Some(score), Some(id)) => GradeWrite::Update {
                        id: id.to_string(),
                        score,
                    },
                    (Some(score), None) => GradeWrite::Insert { score },
                    (None, Some(id)) => GradeWrite::Delete { id: id.to_string() },
                    (None, None) => GradeWrite::Skip,
                };
                SlotWrite { slot, write }
            })
            .collect();

        let plan = Self {
            subject_id: subject_id.to_string(),
            writes,
            absences,
        };
        debug!(
            "Save plan for subject {subject_id}: {} grade write(s), {absences} absence(s)",
            plan.change_count()
        );
        plan
    }

    /// Number of grade writes that are not skips
    #[must_use]
    pub fn change_count(&self) -> usize {
        self.writes
            .iter()
            .filter(|w| w.write != GradeWrite::Skip)
            .count()
    }

    /// Write planned for a slot
    #[must_use]
    pub fn write_for(&self, slot: GradeSlot) -> Option<&GradeWrite> {
        self.writes.iter().find(|w| w.slot == slot).map(|w| &w.write)
    }
}
