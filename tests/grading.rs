//! Integration tests for the grade evaluation engine

use pdash::attendance::AttendanceTracker;
use pdash::grading::{
    compute_average, is_passing, parse_score, required_second_score, SubjectEvaluation,
};
use pdash::models::SlotScores;

const EPS: f64 = 1e-9;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < EPS
}

/// Scores 0.0, 0.5, ..., 10.0
fn score_grid() -> impl Iterator<Item = f64> + Clone {
    (0..=20).map(|i| f64::from(i) * 0.5)
}

#[test]
fn average_without_third_is_weighted_base() {
    for a in score_grid() {
        for b in score_grid() {
            let expected = (a + 2.0 * b) / 3.0;
            assert!(approx(compute_average(Some(a), Some(b), None), expected));
        }
    }
}

#[test]
fn third_grade_never_lowers_the_average() {
    for a in score_grid() {
        for b in score_grid() {
            let base = compute_average(Some(a), Some(b), None);
            for c in score_grid() {
                assert!(compute_average(Some(a), Some(b), Some(c)) >= base - EPS);
            }
        }
    }
}

#[test]
fn boundary_averages() {
    assert!(approx(compute_average(Some(0.0), Some(0.0), None), 0.0));
    assert!(approx(compute_average(None, None, None), 0.0));
    assert!(!is_passing(0.0));

    assert!(approx(compute_average(Some(10.0), Some(10.0), None), 10.0));
    assert!(is_passing(10.0));

    assert!(is_passing(6.0));
    assert!(!is_passing(5.999));
}

#[test]
fn third_grade_replaces_weaker_assessment() {
    let avg = compute_average(Some(4.0), Some(5.0), Some(9.0));
    assert!(approx(avg, 22.0 / 3.0));
    assert!(is_passing(avg));

    let eval = SubjectEvaluation::evaluate(&SlotScores::from_raw("4", "5", "9"));
    assert_eq!(eval.display_average(2), "7.33");
}

#[test]
fn third_grade_in_second_slot_case() {
    // replacing the double-weighted second wins here
    let replace_second = (4.0 + 2.0 * 9.0) / 3.0;
    let replace_first = (9.0 + 2.0 * 5.0) / 3.0;
    assert!(replace_second > replace_first);
    assert!(approx(
        compute_average(Some(4.0), Some(5.0), Some(9.0)),
        replace_second
    ));
}

#[test]
fn projection_values() {
    assert!(approx(required_second_score(Some(6.0)), 6.0));
    assert!(approx(required_second_score(Some(10.0)), 4.0));
    assert!(approx(required_second_score(Some(20.0)), 0.0));
    assert!(approx(required_second_score(None), 9.0));
}

#[test]
fn projection_meets_threshold_exactly() {
    for a in score_grid() {
        let needed = required_second_score(Some(a));
        assert!(is_passing(compute_average(Some(a), Some(needed), None) + EPS));
    }
}

#[test]
fn raw_fields_behave_like_the_form() {
    assert_eq!(parse_score(""), None);
    assert_eq!(parse_score("  "), None);
    assert_eq!(parse_score("abc"), None);
    assert_eq!(parse_score("7,5"), Some(7.5));
    assert_eq!(parse_score(" 8 "), Some(8.0));

    let eval = SubjectEvaluation::evaluate(&SlotScores::from_raw("x", "", "y"));
    assert!(approx(eval.average, 0.0));
    assert!(!eval.passing);
}

#[test]
fn evaluation_projection_only_without_second_grade() {
    let pending_second = SubjectEvaluation::evaluate(&SlotScores::new(Some(6.0), None, None));
    assert_eq!(pending_second.required_second, Some(6.0));

    let with_second = SubjectEvaluation::evaluate(&SlotScores::new(Some(6.0), Some(2.0), None));
    assert_eq!(with_second.required_second, None);
    assert!(with_second.suggest_third);

    let with_third =
        SubjectEvaluation::evaluate(&SlotScores::new(Some(1.0), Some(2.0), Some(2.0)));
    assert!(!with_third.suggest_third);
}

#[test]
fn attendance_scenarios() {
    let mut tracker = AttendanceTracker::new(0, Some(20));
    for _ in 0..5 {
        tracker.increment();
    }
    assert!(approx(tracker.utilization(), 25.0));
    assert!(!tracker.is_over_limit());

    for _ in 5..21 {
        tracker.increment();
    }
    assert_eq!(tracker.count(), 21);
    assert!(tracker.is_over_limit());

    let mut empty = AttendanceTracker::default();
    empty.decrement();
    assert_eq!(empty.count(), 0);
}

#[test]
fn attendance_zero_ceiling_uses_default() {
    let tracker = AttendanceTracker::new(10, Some(0));
    assert_eq!(tracker.ceiling(), 20);
    assert!(approx(tracker.utilization(), 50.0));

    let at_limit = AttendanceTracker::new(20, None);
    assert!(!at_limit.is_over_limit());
}
