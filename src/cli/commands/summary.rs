//! Summary command handler

use pdash::config::Config;
use pdash::gradebook::{parse_gradebook_csv, resolve_gradebook_path};
use pdash::models::{Gradebook, Subject};
use pdash::{error, info, verbose};
use std::path::{Path, PathBuf};

/// Print progress and per-term subject lines for each gradebook
pub fn run(input_files: &[PathBuf], config: &Config, verbose: bool) {
    let gradebooks_dir = Path::new(&config.paths.gradebooks_dir);

    for input in input_files {
        let path = resolve_gradebook_path(input, gradebooks_dir);
        let gradebook = match parse_gradebook_csv(&path) {
            Ok(book) => book,
            Err(e) => {
                error!("Failed to load gradebook {}: {e}", path.display());
                eprintln!("✗ Failed to load {}: {e}", path.display());
                continue;
            }
        };
        info!("Gradebook loaded: {}", path.display());

        for line in summary_lines(&gradebook, config.display.precision) {
            println!("{line}");
        }
        if verbose {
            let active = gradebook.in_progress().count();
            verbose!("{active} subject(s) in progress in {}", path.display());
        }
    }
}

fn summary_lines(gradebook: &Gradebook, precision: usize) -> Vec<String> {
    let progress = gradebook.progress();
    let mut lines = vec![format!("\n=== {} ===", gradebook.title)];
    if let Some(institution) = &gradebook.institution {
        lines.push(format!("Institution: {institution}"));
    }
    lines.push(format!(
        "Progress: {}/{} completed ({:.0}%)",
        progress.completed, progress.total, progress.percent
    ));

    for group in gradebook.by_term() {
        let term_progress = group.progress();
        let heading = if group.term == 0 {
            "Unassigned".to_string()
        } else {
            format!("Term {}", group.term)
        };
        lines.push(format!(
            "\n{heading} ({}/{})",
            term_progress.completed, term_progress.total
        ));
        lines.extend(group.subjects.iter().map(|s| subject_line(s, precision)));
    }

    lines
}

fn subject_line(subject: &Subject, precision: usize) -> String {
    let attendance = subject.attendance();
    let mut line = format!("  {:<32} {:<12}", subject.name, subject.status.to_string());

    if subject.status.has_details() {
        let eval = subject.evaluate();
        let mark = if eval.passing { '✓' } else { '✗' };
        line.push_str(&format!(" {mark} {}", eval.display_average(precision)));
        if let Some(needed) = eval.required_second {
            line.push_str(&format!(" (needs {needed:.1})"));
        }
        if eval.suggest_third {
            line.push_str(" (try Grade C)");
        }
    }

    line.push_str(&format!(
        "  absences {}/{}",
        attendance.count(),
        attendance.ceiling()
    ));
    if attendance.is_over_limit() {
        line.push_str(" ⚠ over limit");
    }
    line
}
