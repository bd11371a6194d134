//! Data models for `pdash`

pub mod grade;
pub mod gradebook;
pub mod subject;

pub use grade::{GradeEntry, GradeSlot, SlotScores};
pub use gradebook::{CourseProgress, Gradebook, TermGroup};
pub use subject::{Subject, SubjectStatus};
