//! Report command handler
//!
//! Renders a gradebook transcript as Markdown or HTML.

use pdash::config::Config;
use pdash::gradebook::{parse_gradebook_csv, resolve_gradebook_path};
use pdash::report::{ReportContext, ReportFormat};
use pdash::{error, info};
use std::path::{Path, PathBuf};

/// Run the report command.
///
/// # Arguments
/// * `input_file` - Gradebook CSV path, or a name inside `gradebooks_dir`
/// * `output_file` - Optional output path; defaults to `reports_dir/<stem>.<ext>`
/// * `format_str` - Report format (markdown, html)
/// * `config` - Configuration providing directories and precision
pub fn run(input_file: &Path, output_file: Option<&Path>, format_str: &str, config: &Config) {
    match generate_report(input_file, output_file, format_str, config) {
        Ok(path) => {
            println!("✓ Report generated: {}", path.display());
            info!("Report exported to: {}", path.display());
        }
        Err(err) => {
            error!("Report generation failed for {}: {err}", input_file.display());
            eprintln!("{err}");
        }
    }
}

/// Default output path for a report of `input_file`
fn default_output_path(input_file: &Path, reports_dir: &Path, format: ReportFormat) -> PathBuf {
    let stem = input_file
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("gradebook");
    reports_dir.join(format!("{stem}.{}", format.extension()))
}

fn generate_report(
    input_file: &Path,
    output_file: Option<&Path>,
    format_str: &str,
    config: &Config,
) -> Result<PathBuf, String> {
    let format = format_str
        .parse::<ReportFormat>()
        .map_err(|e| format!("✗ {e}. Use: markdown or html"))?;

    let path = resolve_gradebook_path(input_file, Path::new(&config.paths.gradebooks_dir));
    let gradebook = parse_gradebook_csv(&path)
        .map_err(|e| format!("✗ Failed to load {}: {e}", path.display()))?;
    info!("Gradebook loaded: {}", path.display());

    let output_path = output_file.map_or_else(
        || default_output_path(&path, Path::new(&config.paths.reports_dir), format),
        Path::to_path_buf,
    );

    let ctx = ReportContext::new(&gradebook, config.display.precision);
    format
        .reporter()
        .generate(&ctx, &output_path)
        .map_err(|e| format!("✗ Failed to generate {format} report: {e}"))?;

    Ok(output_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_path_uses_stem_and_extension() {
        let path = default_output_path(
            Path::new("books/engineering.csv"),
            Path::new("/reports"),
            ReportFormat::Markdown,
        );
        assert_eq!(path, PathBuf::from("/reports/engineering.md"));
    }

    #[test]
    fn test_generate_report_into_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("eng.csv");
        std::fs::write(
            &input,
            "Gradebook,Eng\nSubjects\nSubject ID,Name,Term,Status,Grade A,Grade B\nc,Calc,1,in_progress,4,5\n",
        )
        .unwrap();

        let mut config = Config::from_defaults();
        config.paths.reports_dir = dir.path().join("out").to_string_lossy().to_string();

        let written = generate_report(&input, None, "md", &config).unwrap();
        assert_eq!(written, dir.path().join("out").join("eng.md"));
        let content = std::fs::read_to_string(written).unwrap();
        assert!(content.contains("Calc"));
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let config = Config::from_defaults();
        let err = generate_report(Path::new("x.csv"), None, "pdf", &config).unwrap_err();
        assert!(err.contains("markdown or html"));
    }
}
