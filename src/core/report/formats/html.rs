//! HTML report generator
//!
//! Self-contained page with embedded CSS. Subject names and titles are
//! HTML-escaped by the template engine.

use crate::core::report::{ReportContext, ReportGenerator, TermSection};
use askama::Template;
use std::error::Error;

#[derive(Template)]
#[template(path = "report.html")]
struct HtmlTemplate<'a> {
    title: &'a str,
    institution: &'a str,
    completed: usize,
    total: usize,
    percent: String,
    sections: Vec<TermSection>,
}

/// HTML report generator
#[derive(Debug, Default)]
pub struct HtmlReporter;

impl HtmlReporter {
    /// Create a new HTML reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ReportGenerator for HtmlReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        let progress = ctx.gradebook.progress();
        let template = HtmlTemplate {
            title: &ctx.gradebook.title,
            institution: ctx.institution(),
            completed: progress.completed,
            total: progress.total,
            percent: ctx.progress_percent(),
            sections: ctx.sections(),
        };
        Ok(template.render()?)
    }
}
