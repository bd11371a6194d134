//! CSV parser for gradebook files
//!
//! Layout:
//!
//! ```text
//! Gradebook,Computer Engineering
//! Institution,Example University
//! Subjects
//! Subject ID,Name,Term,Status,Optional,Max Absences,Absences,Grade A,Grade B,Grade C
//! calc1,Calculus I,1,completed,false,20,2,7.5,8,
//! ```

use crate::core::csv::parse_csv_line;
use crate::core::grading::parse_score;
use crate::core::models::{GradeEntry, GradeSlot, Gradebook, Subject, SubjectStatus};
use crate::{debug, warn};
use std::error::Error;
use std::fs;
use std::path::Path;

/// Metadata rows are only looked for in the first lines of the file
const METADATA_LINES: usize = 10;

/// Parsed gradebook metadata from the CSV header
#[derive(Debug, Clone, Default)]
pub struct GradebookMetadata {
    /// Course title
    pub title: String,
    /// Institution name
    pub institution: String,
}

/// Parse a gradebook CSV file
///
/// # Errors
/// Returns an error if the file cannot be read or lacks the title or `Subjects` section
pub fn parse_gradebook_csv<P: AsRef<Path>>(path: P) -> Result<Gradebook, Box<dyn Error>> {
    let content = fs::read_to_string(path)?;
    parse_gradebook_str(&content)
}

/// Parse gradebook CSV content
///
/// Rows without a subject id or name are skipped with a warning, as are
/// rows repeating an id already seen.
///
/// # Errors
/// Returns an error if the title or the `Subjects` section is missing
pub fn parse_gradebook_str(content: &str) -> Result<Gradebook, Box<dyn Error>> {
    let lines: Vec<&str> = content.lines().collect();

    let subjects_start = lines
        .iter()
        .position(|line| {
            parse_csv_line(line)
                .first()
                .is_some_and(|cell| cell.eq_ignore_ascii_case("subjects"))
        })
        .ok_or("No 'Subjects' section found in CSV")?;

    let metadata = parse_metadata(&lines[..subjects_start])?;
    let mut gradebook = Gradebook::new(metadata.title);
    if !metadata.institution.is_empty() {
        gradebook.institution = Some(metadata.institution);
    }

    let header_line = lines
        .get(subjects_start + 1)
        .ok_or("No subject header found")?;
    let headers = parse_csv_line(header_line);

    for (offset, line) in lines.iter().enumerate().skip(subjects_start + 2) {
        if line.trim().is_empty() {
            continue;
        }
        let line_no = offset + 1;
        let fields = parse_csv_line(line);

        match parse_subject(&fields, &headers) {
            Ok(subject) => {
                let id = subject.id.clone();
                if !gradebook.add_subject(subject) {
                    warn!("Line {line_no}: duplicate subject id '{id}' skipped");
                }
            }
            Err(e) => warn!("Line {line_no}: {e}"),
        }
    }

    debug!(
        "Parsed gradebook '{}' with {} subject(s)",
        gradebook.title,
        gradebook.subjects.len()
    );
    Ok(gradebook)
}

/// Parse gradebook metadata from the lines above the `Subjects` marker
fn parse_metadata(lines: &[&str]) -> Result<GradebookMetadata, Box<dyn Error>> {
    let mut metadata = GradebookMetadata::default();

    for line in lines.iter().take(METADATA_LINES) {
        let parts = parse_csv_line(line);
        if parts.len() < 2 {
            continue;
        }

        match parts[0].to_lowercase().as_str() {
            "gradebook" | "course" => metadata.title.clone_from(&parts[1]),
            "institution" => metadata.institution.clone_from(&parts[1]),
            _ => {}
        }
    }

    if metadata.title.is_empty() {
        return Err("Missing Gradebook title".into());
    }

    Ok(metadata)
}

/// Get a field value by header name
fn get_field<'a>(fields: &'a [String], header_name: &str, headers: &[String]) -> Option<&'a str> {
    headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(header_name))
        .and_then(|idx| fields.get(idx))
        .map(String::as_str)
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "true" | "yes" | "y" | "1" | "x"
    )
}

/// Parse a single subject row
fn parse_subject(fields: &[String], headers: &[String]) -> Result<Subject, Box<dyn Error>> {
    let id = get_field(fields, "Subject ID", headers).unwrap_or_default();
    let name = get_field(fields, "Name", headers).unwrap_or_default();
    if id.is_empty() || name.is_empty() {
        return Err("Missing subject id or name".into());
    }

    let term = get_field(fields, "Term", headers)
        .filter(|v| !v.is_empty())
        .map_or(Ok(0), str::parse::<u32>)
        .map_err(|_| format!("Invalid term for subject '{id}'"))?;

    let mut subject = Subject::new(id.to_string(), name.to_string(), term);

    subject.status = get_field(fields, "Status", headers)
        .unwrap_or_default()
        .parse::<SubjectStatus>()?;
    subject.optional = get_field(fields, "Optional", headers).is_some_and(parse_flag);
    subject.max_absences = match get_field(fields, "Max Absences", headers) {
        None | Some("") => None,
        Some(raw) => Some(
            raw.parse::<u32>()
                .map_err(|_| format!("Invalid absence ceiling '{raw}' for subject '{id}'"))?,
        )
        .filter(|&ceiling| ceiling > 0),
    };
    subject.absences = match get_field(fields, "Absences", headers) {
        None | Some("") => 0,
        Some(raw) => raw
            .parse::<u32>()
            .map_err(|_| format!("Invalid absence count '{raw}' for subject '{id}'"))?,
    };

    for slot in GradeSlot::ALL {
        if let Some(score) = get_field(fields, slot.label(), headers).and_then(parse_score) {
            let entry_id = format!("{id}-{}", slot.key());
            subject.set_grade(GradeEntry::stored(entry_id, slot, score));
        }
    }

    Ok(subject)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Gradebook,Computer Engineering
Institution,Example University
Subjects
Subject ID,Name,Term,Status,Optional,Max Absences,Absences,Grade A,Grade B,Grade C
calc1,Calculus I,1,completed,false,20,2,7.5,8,
phys1,\"Physics I, Mechanics\",1,in_progress,no,,5,4,5,9
ethics,Ethics,2,pending,yes,10,0,,,
";

    #[test]
    fn test_parse_sample() {
        let book = parse_gradebook_str(SAMPLE).unwrap();
        assert_eq!(book.title, "Computer Engineering");
        assert_eq!(book.institution.as_deref(), Some("Example University"));
        assert_eq!(book.subjects.len(), 3);

        let phys = book.get_subject("phys1").unwrap();
        assert_eq!(phys.name, "Physics I, Mechanics");
        assert_eq!(phys.status, SubjectStatus::InProgress);
        assert_eq!(phys.max_absences, None);
        assert_eq!(phys.absences, 5);
        assert_eq!(phys.scores().third, Some(9.0));

        let ethics = book.get_subject("ethics").unwrap();
        assert!(ethics.optional);
        assert!(ethics.scores().is_empty());
        assert_eq!(ethics.max_absences, Some(10));
    }

    #[test]
    fn test_grade_entries_get_stable_ids() {
        let book = parse_gradebook_str(SAMPLE).unwrap();
        let calc = book.get_subject("calc1").unwrap();
        let entry = calc.grade(GradeSlot::Second).unwrap();
        assert_eq!(entry.id.as_deref(), Some("calc1-second"));
        assert!(calc.grade(GradeSlot::Third).is_none());
    }

    #[test]
    fn test_subject_ids_never_read_as_metadata() {
        let content = "\
Gradebook,Computer Engineering
Institution,Uni
Subjects
Subject ID,Name,Term
course,Course Design,1
institution,Institutional Ethics,1
gradebook,Gradebook Tools,2
";
        let book = parse_gradebook_str(content).unwrap();
        assert_eq!(book.title, "Computer Engineering");
        assert_eq!(book.institution.as_deref(), Some("Uni"));
        assert_eq!(book.subjects.len(), 3);
        assert_eq!(book.get_subject("course").unwrap().name, "Course Design");
    }

    #[test]
    fn test_title_only_in_subject_rows_is_error() {
        let content = "Subjects\nSubject ID,Name\ncourse,Course Design\n";
        assert!(parse_gradebook_str(content).is_err());
    }

    #[test]
    fn test_bad_absence_ceiling_skips_row() {
        let content = "\
Gradebook,X
Subjects
Subject ID,Name,Max Absences
a,Alpha,ten
b,Beta,0
c,Gamma,
";
        let book = parse_gradebook_str(content).unwrap();
        let ids: Vec<&str> = book.subjects.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);
        assert_eq!(book.get_subject("b").unwrap().max_absences, None);
        assert_eq!(book.get_subject("b").unwrap().attendance().ceiling(), 20);
    }

    #[test]
    fn test_missing_title_is_error() {
        let result = parse_gradebook_str("Subjects\nSubject ID,Name\na,B\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_section_is_error() {
        let result = parse_gradebook_str("Gradebook,X\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_bad_rows_are_skipped() {
        let content = "\
Gradebook,X
Subjects
Subject ID,Name,Term,Status,Absences
a,Alpha,1,pending,0
,Nameless,1,pending,0
b,Beta,one,pending,0
c,Gamma,1,dropped,0
a,Alpha again,2,pending,0
d,Delta,2,completed,-3
e,Epsilon,,,
";
        let book = parse_gradebook_str(content).unwrap();
        let ids: Vec<&str> = book.subjects.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "e"]);
        assert_eq!(book.get_subject("e").unwrap().term, 0);
    }
}
