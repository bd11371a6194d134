//! Report generation for gradebooks
//!
//! Renders a transcript-style report (one section per term, one row per
//! subject) in Markdown or HTML through askama templates.

pub mod formats;

use crate::core::models::{GradeSlot, Gradebook, Subject, TermGroup};
use std::error::Error;
use std::fs;
use std::path::Path;

pub use formats::{HtmlReporter, MarkdownReporter, ReportFormat};

/// Placeholder shown for an absent score or value
const EMPTY_CELL: &str = "-";

/// Data context for report generation
#[derive(Debug, Clone, Copy)]
pub struct ReportContext<'a> {
    /// Gradebook being reported
    pub gradebook: &'a Gradebook,
    /// Decimal places for averages
    pub precision: usize,
}

/// One subject as shown in a report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectRow {
    /// Subject name
    pub name: String,
    /// Lifecycle status key
    pub status: String,
    /// Elective flag
    pub optional: bool,
    /// Formatted scores in slot order
    pub scores: Vec<String>,
    /// Formatted average, or `-` for subjects without grades tracked
    pub average: String,
    /// "Passed"/"Failed", or `-`
    pub verdict: String,
    /// Whether the subject is currently passing
    pub passing: bool,
    /// Second-slot score still needed, empty when not applicable
    pub needs: String,
    /// Hint to attempt the third assessment
    pub suggest_third: bool,
    /// `count/ceiling (pct%)`
    pub absences: String,
    /// More absences than allowed
    pub over_limit: bool,
}

/// One term of the report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermSection {
    /// Heading, e.g. "Term 2" or "Unassigned"
    pub label: String,
    /// Completed subjects in this term
    pub completed: usize,
    /// Subjects in this term
    pub total: usize,
    /// Rows sorted by subject name
    pub rows: Vec<SubjectRow>,
}

impl<'a> ReportContext<'a> {
    /// Create a new report context
    #[must_use]
    pub const fn new(gradebook: &'a Gradebook, precision: usize) -> Self {
        Self {
            gradebook,
            precision,
        }
    }

    /// Institution name or an empty string
    #[must_use]
    pub fn institution(&self) -> &str {
        self.gradebook.institution.as_deref().unwrap_or_default()
    }

    /// Course progress formatted as a whole percentage
    #[must_use]
    pub fn progress_percent(&self) -> String {
        format!("{:.0}", self.gradebook.progress().percent)
    }

    /// Term sections in ascending term order
    #[must_use]
    pub fn sections(&self) -> Vec<TermSection> {
        self.gradebook
            .by_term()
            .iter()
            .map(|group| self.section(group))
            .collect()
    }

    fn section(&self, group: &TermGroup<'_>) -> TermSection {
        let progress = group.progress();
        let label = if group.term == 0 {
            "Unassigned".to_string()
        } else {
            format!("Term {}", group.term)
        };
        TermSection {
            label,
            completed: progress.completed,
            total: progress.total,
            rows: group.subjects.iter().map(|s| self.row(s)).collect(),
        }
    }

    fn row(&self, subject: &Subject) -> SubjectRow {
        let scores = subject.scores();
        let formatted_scores = GradeSlot::ALL
            .iter()
            .map(|&slot| {
                scores
                    .get(slot)
                    .map_or_else(|| EMPTY_CELL.to_string(), |v| format!("{v:.1}"))
            })
            .collect();

        let attendance = subject.attendance();
        let absences = format!(
            "{}/{} ({:.0}%)",
            attendance.count(),
            attendance.ceiling(),
            attendance.utilization()
        );

        let mut row = SubjectRow {
            name: subject.name.clone(),
            status: subject.status.to_string(),
            optional: subject.optional,
            scores: formatted_scores,
            average: EMPTY_CELL.to_string(),
            verdict: EMPTY_CELL.to_string(),
            passing: false,
            needs: String::new(),
            suggest_third: false,
            absences,
            over_limit: attendance.is_over_limit(),
        };

        if subject.status.has_details() {
            let eval = subject.evaluate();
            row.average = eval.display_average(self.precision);
            row.verdict = eval.verdict().to_string();
            row.passing = eval.passing;
            row.needs = eval
                .required_second
                .map(|needed| format!("{needed:.1}"))
                .unwrap_or_default();
            row.suggest_third = eval.suggest_third;
        }

        row
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Render report content as a string
    ///
    /// # Errors
    /// Returns an error if template rendering fails
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>>;

    /// Render a report and write it to `output_path`, creating parent directories
    ///
    /// # Errors
    /// Returns an error if rendering or file writing fails
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let content = self.render(ctx)?;
        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(output_path, content)?;
        Ok(())
    }
}
