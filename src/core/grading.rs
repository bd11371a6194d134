//! Grade evaluation engine
//!
//! A subject is graded on three slots. The final average is
//! `(first + 2 * second) / 3`; when the third assessment has been taken it may
//! stand in for either of the other two, and the best of the three candidate
//! averages wins. Absent scores count as zero.

use crate::core::models::SlotScores;
use crate::debug;

/// Minimum average that passes (inclusive)
pub const PASSING_AVERAGE: f64 = 6.0;

/// Parse a raw score field.
///
/// Empty or non-numeric text is an absent score, never an error. A leading
/// numeric prefix is accepted (`"7.5 pts"` is 7.5) and a decimal comma is
/// read as a point.
#[must_use]
pub fn parse_score(raw: &str) -> Option<f64> {
    let text = raw.trim().replace(',', ".");
    if text.is_empty() {
        return None;
    }
    (1..=text.len())
        .rev()
        .filter(|&end| text.is_char_boundary(end))
        .find_map(|end| text[..end].parse::<f64>().ok())
        .filter(|value| value.is_finite())
}

/// Best achievable average under the third-assessment substitution rule.
///
/// Returns the unrounded maximum of the base average and, when `third` is
/// present, the averages with `third` replacing `first` and replacing
/// `second` (keeping the slot weights). All absent yields 0.
#[must_use]
pub fn compute_average(first: Option<f64>, second: Option<f64>, third: Option<f64>) -> f64 {
    let a = first.unwrap_or(0.0);
    let b = second.unwrap_or(0.0);
    let base = 2.0f64.mul_add(b, a) / 3.0;

    let Some(c) = third else {
        return base;
    };

    let replace_first = 2.0f64.mul_add(b, c) / 3.0;
    let replace_second = 2.0f64.mul_add(c, a) / 3.0;
    base.max(replace_first).max(replace_second)
}

/// Whether an average passes
#[must_use]
pub fn is_passing(average: f64) -> bool {
    average >= PASSING_AVERAGE
}

/// Minimum second-slot score needed to pass given the first slot.
///
/// `(first + 2 * second) / 3 >= 6` solves to `second >= (18 - first) / 2`,
/// floored at 0. Only meaningful while the second slot is still empty.
#[must_use]
pub fn required_second_score(first: Option<f64>) -> f64 {
    let needed = (PASSING_AVERAGE.mul_add(3.0, -first.unwrap_or(0.0))) / 2.0;
    needed.max(0.0)
}

/// Everything the presentation layer shows about a subject's grades
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubjectEvaluation {
    /// Unrounded final average
    pub average: f64,
    /// `average >= 6.0`
    pub passing: bool,
    /// Second-slot score still needed; only set while the second slot is
    /// empty and the first slot has a score
    pub required_second: Option<f64>,
    /// Failing with first and second taken and the third not yet attempted
    pub suggest_third: bool,
}

impl SubjectEvaluation {
    /// Evaluate a set of slot scores
    #[must_use]
    pub fn evaluate(scores: &SlotScores) -> Self {
        let average = compute_average(scores.first, scores.second, scores.third);
        let passing = is_passing(average);

        let required_second = match (scores.first, scores.second) {
            (Some(_), None) => Some(required_second_score(scores.first)),
            _ => None,
        };

        let suggest_third =
            !passing && scores.third.is_none() && scores.first.is_some() && scores.second.is_some();

        debug!(
            "Evaluated scores {:?}/{:?}/{:?}: average {average}, passing {passing}",
            scores.first, scores.second, scores.third
        );

        Self {
            average,
            passing,
            required_second,
            suggest_third,
        }
    }

    /// Average rounded for display
    #[must_use]
    pub fn display_average(&self, precision: usize) -> String {
        format!("{:.precision$}", self.average)
    }

    /// "Passed" or "Failed"
    #[must_use]
    pub const fn verdict(&self) -> &'static str {
        if self.passing {
            "Passed"
        } else {
            "Failed"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn test_parse_score_plain_and_empty() {
        assert_eq!(parse_score("7.5"), Some(7.5));
        assert_eq!(parse_score("  10 "), Some(10.0));
        assert_eq!(parse_score(""), None);
        assert_eq!(parse_score("   "), None);
    }

    #[test]
    fn test_parse_score_degrades_to_absent() {
        assert_eq!(parse_score("abc"), None);
        assert_eq!(parse_score("-"), None);
        assert_eq!(parse_score("inf"), None);
        assert_eq!(parse_score("NaN"), None);
    }

    #[test]
    fn test_parse_score_prefix_and_comma() {
        assert_eq!(parse_score("7.5abc"), Some(7.5));
        assert_eq!(parse_score("8,25"), Some(8.25));
        assert_eq!(parse_score(".5"), Some(0.5));
    }

    #[test]
    fn test_parse_score_keeps_out_of_range_values() {
        assert_eq!(parse_score("12"), Some(12.0));
        assert_eq!(parse_score("-1"), Some(-1.0));
    }

    #[test]
    fn test_average_without_third() {
        assert!(approx(compute_average(Some(6.0), Some(9.0), None), 8.0));
        assert!(approx(compute_average(None, Some(3.0), None), 2.0));
        assert!(approx(compute_average(None, None, None), 0.0));
    }

    #[test]
    fn test_third_replaces_first() {
        // (9 + 2*5) / 3 beats base (2 + 10) / 3 and (2 + 18) / 3
        let avg = compute_average(Some(2.0), Some(8.0), Some(9.0));
        assert!(approx(avg, (9.0 + 16.0) / 3.0));
    }

    #[test]
    fn test_third_replaces_second() {
        let avg = compute_average(Some(4.0), Some(5.0), Some(9.0));
        assert!(approx(avg, 22.0 / 3.0));
    }

    #[test]
    fn test_low_third_never_hurts() {
        let avg = compute_average(Some(8.0), Some(8.0), Some(0.0));
        assert!(approx(avg, 8.0));
    }

    #[test]
    fn test_third_alone() {
        assert!(approx(compute_average(None, None, Some(9.0)), 6.0));
    }

    #[test]
    fn test_passing_boundary() {
        assert!(is_passing(6.0));
        assert!(!is_passing(5.999));
        assert!(is_passing(10.0));
        assert!(!is_passing(0.0));
    }

    #[test]
    fn test_required_second_score() {
        assert!(approx(required_second_score(Some(6.0)), 6.0));
        assert!(approx(required_second_score(Some(10.0)), 4.0));
        assert!(approx(required_second_score(Some(20.0)), 0.0));
        assert!(approx(required_second_score(None), 9.0));
    }

    #[test]
    fn test_evaluation_projection_only_when_second_missing() {
        let eval = SubjectEvaluation::evaluate(&SlotScores::new(Some(6.0), None, None));
        assert_eq!(eval.required_second, Some(6.0));

        let eval = SubjectEvaluation::evaluate(&SlotScores::new(Some(6.0), Some(3.0), None));
        assert_eq!(eval.required_second, None);

        let eval = SubjectEvaluation::evaluate(&SlotScores::default());
        assert_eq!(eval.required_second, None);
    }

    #[test]
    fn test_evaluation_suggests_third_when_failing() {
        let eval = SubjectEvaluation::evaluate(&SlotScores::new(Some(4.0), Some(5.0), None));
        assert!(!eval.passing);
        assert!(eval.suggest_third);

        let eval = SubjectEvaluation::evaluate(&SlotScores::new(Some(4.0), Some(5.0), Some(9.0)));
        assert!(eval.passing);
        assert!(!eval.suggest_third);

        let eval = SubjectEvaluation::evaluate(&SlotScores::new(Some(4.0), None, None));
        assert!(!eval.suggest_third);
    }

    #[test]
    fn test_display_average() {
        let eval = SubjectEvaluation::evaluate(&SlotScores::new(Some(4.0), Some(5.0), Some(9.0)));
        assert_eq!(eval.display_average(2), "7.33");
        assert_eq!(eval.display_average(0), "7");
        assert_eq!(eval.verdict(), "Passed");
    }
}
