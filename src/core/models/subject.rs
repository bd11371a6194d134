//! Subject model

use crate::core::attendance::AttendanceTracker;
use crate::core::grading::SubjectEvaluation;
use crate::core::models::{GradeEntry, GradeSlot, SlotScores};
use crate::core::sync::{GradeWrite, SavePlan, StoredGrades};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a subject
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectStatus {
    /// Not started yet
    #[default]
    Pending,
    /// Currently being taken
    InProgress,
    /// Finished
    Completed,
}

impl SubjectStatus {
    /// Next status in the toggle cycle: pending → in progress → completed → pending
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Pending => Self::InProgress,
            Self::InProgress => Self::Completed,
            Self::Completed => Self::Pending,
        }
    }

    /// Whether grades and absences are tracked for a subject in this status
    #[must_use]
    pub const fn has_details(self) -> bool {
        matches!(self, Self::InProgress | Self::Completed)
    }

    /// Stable key used in files
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }
}

impl FromStr for SubjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace([' ', '-'], "_").as_str() {
            "" | "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "completed" | "done" => Ok(Self::Completed),
            _ => Err(format!("Unknown subject status: '{s}'")),
        }
    }
}

impl fmt::Display for SubjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A course subject with its grades and absence counter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    /// Identifier assigned by the store
    pub id: String,

    /// Display name (e.g., "Linear Algebra")
    pub name: String,

    /// Term the subject belongs to; 0 when unknown
    pub term: u32,

    /// Lifecycle status
    pub status: SubjectStatus,

    /// Elective rather than required
    pub optional: bool,

    /// Absence ceiling; `None` or 0 falls back to the default of 20
    pub max_absences: Option<u32>,

    /// Absences recorded so far
    pub absences: u32,

    /// At most one entry per slot
    grades: Vec<GradeEntry>,
}

impl Subject {
    /// Create a pending subject with no grades or absences
    #[must_use]
    pub const fn new(id: String, name: String, term: u32) -> Self {
        Self {
            id,
            name,
            term,
            status: SubjectStatus::Pending,
            optional: false,
            max_absences: None,
            absences: 0,
            grades: Vec::new(),
        }
    }

    /// Recorded grade entries, in insertion order
    #[must_use]
    pub fn grades(&self) -> &[GradeEntry] {
        &self.grades
    }

    /// Entry for a slot, if one exists
    #[must_use]
    pub fn grade(&self, slot: GradeSlot) -> Option<&GradeEntry> {
        self.grades.iter().find(|entry| entry.slot == slot)
    }

    /// Insert or replace the entry for the entry's slot
    pub fn set_grade(&mut self, entry: GradeEntry) {
        if let Some(existing) = self.grades.iter_mut().find(|e| e.slot == entry.slot) {
            *existing = entry;
        } else {
            self.grades.push(entry);
        }
    }

    /// Remove the entry for a slot, returning it
    pub fn remove_grade(&mut self, slot: GradeSlot) -> Option<GradeEntry> {
        let idx = self.grades.iter().position(|e| e.slot == slot)?;
        Some(self.grades.remove(idx))
    }

    /// Current scores by slot
    #[must_use]
    pub fn scores(&self) -> SlotScores {
        let mut scores = SlotScores::default();
        for entry in &self.grades {
            scores.set(entry.slot, Some(entry.score));
        }
        scores
    }

    /// Store identifiers of the persisted entries, by slot
    #[must_use]
    pub fn stored_grades(&self) -> StoredGrades {
        let mut stored = StoredGrades::default();
        for entry in &self.grades {
            if let Some(id) = &entry.id {
                stored.set(entry.slot, Some(id.clone()));
            }
        }
        stored
    }

    /// Attendance counter seeded from this subject
    #[must_use]
    pub const fn attendance(&self) -> AttendanceTracker {
        AttendanceTracker::new(self.absences, self.max_absences)
    }

    /// Evaluate the current scores
    #[must_use]
    pub fn evaluate(&self) -> SubjectEvaluation {
        SubjectEvaluation::evaluate(&self.scores())
    }

    /// Advance the lifecycle status one step
    pub fn toggle_status(&mut self) -> SubjectStatus {
        self.status = self.status.next();
        self.status
    }

    /// Apply a save plan as the store would, leaving this subject in its post-save state
    ///
    /// Applying the same plan twice yields the same state. Inserted entries
    /// keep `id: None` until the store hands back an identifier.
    pub fn apply(&mut self, plan: &SavePlan) {
        for write in &plan.writes {
            match &write.write {
                GradeWrite::Skip => {}
                GradeWrite::Delete { .. } => {
                    self.remove_grade(write.slot);
                }
                GradeWrite::Update { id, score } => {
                    self.set_grade(GradeEntry::stored(id.clone(), write.slot, *score));
                }
                GradeWrite::Insert { score } => {
                    self.set_grade(GradeEntry::unsaved(write.slot, *score));
                }
            }
        }
        self.absences = plan.absences;
    }
}
