//! Gradebook loading

pub mod csv_parser;

pub use csv_parser::{parse_gradebook_csv, parse_gradebook_str};

use std::path::{Path, PathBuf};

/// Locate a gradebook file.
///
/// An existing path is used as given. Otherwise the name is looked up in
/// `gradebooks_dir`, with and without a `.csv` extension. Falls back to the
/// input unchanged so the caller reports the original path when nothing matches.
#[must_use]
pub fn resolve_gradebook_path(input: &Path, gradebooks_dir: &Path) -> PathBuf {
    if input.exists() || input.is_absolute() {
        return input.to_path_buf();
    }

    let in_dir = gradebooks_dir.join(input);
    let candidates = [in_dir.clone(), in_dir.with_extension("csv")];
    candidates
        .into_iter()
        .find(|candidate| candidate.is_file())
        .unwrap_or_else(|| input.to_path_buf())
}
