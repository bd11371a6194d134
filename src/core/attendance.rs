//! Absence counter for a single subject

use serde::{Deserialize, Serialize};

/// Absence ceiling used when a subject has none (or zero) configured
pub const DEFAULT_MAX_ABSENCES: u32 = 20;

/// Caller-owned absence counter.
///
/// Mutations only touch memory; the final count travels to the store in a
/// [`SavePlan`](crate::core::sync::SavePlan). Exceeding the ceiling is
/// allowed and only reported through [`is_over_limit`](Self::is_over_limit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceTracker {
    count: u32,
    ceiling: Option<u32>,
}

impl Default for AttendanceTracker {
    fn default() -> Self {
        Self::new(0, None)
    }
}

impl AttendanceTracker {
    /// Create a tracker at `count` absences against an optional ceiling
    #[must_use]
    pub const fn new(count: u32, ceiling: Option<u32>) -> Self {
        Self { count, ceiling }
    }

    /// Absences so far
    #[must_use]
    pub const fn count(&self) -> u32 {
        self.count
    }

    /// Effective ceiling; unset or zero means [`DEFAULT_MAX_ABSENCES`]
    #[must_use]
    pub const fn ceiling(&self) -> u32 {
        match self.ceiling {
            Some(ceiling) if ceiling > 0 => ceiling,
            _ => DEFAULT_MAX_ABSENCES,
        }
    }

    /// Record one more absence
    pub fn increment(&mut self) {
        self.count = self.count.saturating_add(1);
    }

    /// Remove one absence, never going below zero
    pub fn decrement(&mut self) {
        self.count = self.count.saturating_sub(1);
    }

    /// Share of the ceiling used, as a percentage (may exceed 100)
    #[must_use]
    pub fn utilization(&self) -> f64 {
        f64::from(self.count) / f64::from(self.ceiling()) * 100.0
    }

    /// More absences than the ceiling allows
    #[must_use]
    pub const fn is_over_limit(&self) -> bool {
        self.count > self.ceiling()
    }
}
