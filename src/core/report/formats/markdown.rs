//! Markdown report generator
//!
//! One table per term; renders well in GitHub, GitLab, and VS Code.

use crate::core::report::{ReportContext, ReportGenerator, TermSection};
use askama::Template;
use std::error::Error;

#[derive(Template)]
#[template(path = "report.md", escape = "none")]
struct MarkdownTemplate<'a> {
    title: &'a str,
    institution: &'a str,
    completed: usize,
    total: usize,
    percent: String,
    sections: Vec<TermSection>,
}

/// Markdown report generator
#[derive(Debug, Default)]
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

/// Escape pipes so text cannot split a table cell
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

fn escape_rows(mut sections: Vec<TermSection>) -> Vec<TermSection> {
    for row in sections.iter_mut().flat_map(|section| section.rows.iter_mut()) {
        row.name = escape_cell(&row.name);
    }
    sections
}

impl ReportGenerator for MarkdownReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        let progress = ctx.gradebook.progress();
        let template = MarkdownTemplate {
            title: &ctx.gradebook.title,
            institution: ctx.institution(),
            completed: progress.completed,
            total: progress.total,
            percent: ctx.progress_percent(),
            sections: escape_rows(ctx.sections()),
        };
        Ok(template.render()?)
    }
}
