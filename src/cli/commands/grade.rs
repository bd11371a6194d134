//! Grade command handler
//!
//! Evaluates one subject from the raw text of its three grade fields, the
//! same way the dashboard form does, and reports attendance alongside.

use pdash::attendance::AttendanceTracker;
use pdash::grading::SubjectEvaluation;
use pdash::models::SlotScores;
use pdash::verbose;

/// Raw inputs of the grade command
#[derive(Debug, Clone, Copy)]
pub struct GradeInput<'a> {
    pub first: &'a str,
    pub second: &'a str,
    pub third: &'a str,
    pub absences: u32,
    pub max_absences: Option<u32>,
    pub add_absences: u32,
    pub remove_absences: u32,
}

impl GradeInput<'_> {
    /// Tracker after applying the requested absence changes
    fn tracker(&self) -> AttendanceTracker {
        let mut tracker = AttendanceTracker::new(self.absences, self.max_absences);
        for _ in 0..self.add_absences {
            tracker.increment();
        }
        for _ in 0..self.remove_absences {
            tracker.decrement();
        }
        tracker
    }
}

/// Run the grade command
pub fn run(input: &GradeInput<'_>, precision: usize) {
    for line in report_lines(input, precision) {
        println!("{line}");
    }
}

fn report_lines(input: &GradeInput<'_>, precision: usize) -> Vec<String> {
    let scores = SlotScores::from_raw(input.first, input.second, input.third);
    verbose!("Parsed scores: {scores:?}");
    let eval = SubjectEvaluation::evaluate(&scores);

    let mut lines = Vec::new();
    let mark = if eval.passing { '✓' } else { '✗' };
    lines.push(format!(
        "{mark} Average: {} ({})",
        eval.display_average(precision),
        eval.verdict()
    ));

    if let Some(needed) = eval.required_second {
        lines.push(format!("  Needs {needed:.1} on Grade B to pass"));
    }
    if eval.suggest_third {
        lines.push("  Take Grade C to replace the lower assessment".to_string());
    }

    let tracker = input.tracker();
    let attendance_mark = if tracker.is_over_limit() { '✗' } else { '✓' };
    lines.push(format!(
        "{attendance_mark} Absences: {}/{} ({:.0}%)",
        tracker.count(),
        tracker.ceiling(),
        tracker.utilization()
    ));
    if tracker.is_over_limit() {
        lines.push("  Absence limit exceeded".to_string());
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input<'a>(first: &'a str, second: &'a str, third: &'a str) -> GradeInput<'a> {
        GradeInput {
            first,
            second,
            third,
            absences: 0,
            max_absences: None,
            add_absences: 0,
            remove_absences: 0,
        }
    }

    #[test]
    fn test_third_grade_rescues_subject() {
        let lines = report_lines(&input("4", "5", "9"), 2);
        assert_eq!(lines[0], "✓ Average: 7.33 (Passed)");
        assert_eq!(lines[1], "✓ Absences: 0/20 (0%)");
    }

    #[test]
    fn test_projection_shown_without_second_grade() {
        let lines = report_lines(&input("6", "", ""), 2);
        assert_eq!(lines[0], "✗ Average: 2.00 (Failed)");
        assert_eq!(lines[1], "  Needs 6.0 on Grade B to pass");
    }

    #[test]
    fn test_hint_when_failing_with_two_grades() {
        let lines = report_lines(&input("4", "5", ""), 1);
        assert_eq!(lines[0], "✗ Average: 4.7 (Failed)");
        assert!(lines.iter().any(|l| l.contains("Take Grade C")));
    }

    #[test]
    fn test_absence_changes_are_applied() {
        let mut grade = input("8", "8", "");
        grade.absences = 19;
        grade.add_absences = 3;
        grade.remove_absences = 1;
        let lines = report_lines(&grade, 2);
        assert!(lines.contains(&"✗ Absences: 21/20 (105%)".to_string()));
        assert!(lines.contains(&"  Absence limit exceeded".to_string()));
    }

    #[test]
    fn test_absences_never_negative() {
        let mut grade = input("", "", "");
        grade.remove_absences = 5;
        assert_eq!(grade.tracker().count(), 0);
    }
}
