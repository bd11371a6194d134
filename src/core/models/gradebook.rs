//! Gradebook model: every subject of a course, with progress aggregation

use crate::core::models::{Subject, SubjectStatus};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Completed-vs-total counts for a set of subjects
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CourseProgress {
    /// Subjects marked completed
    pub completed: usize,
    /// All subjects counted
    pub total: usize,
    /// `completed / total * 100`, or 0 when there are no subjects
    pub percent: f64,
}

impl CourseProgress {
    /// Compute progress over a set of subjects
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_subjects<'a, I>(subjects: I) -> Self
    where
        I: IntoIterator<Item = &'a Subject>,
    {
        let (completed, total) = subjects.into_iter().fold((0, 0), |(done, all), s| {
            (done + usize::from(s.status == SubjectStatus::Completed), all + 1)
        });
        let percent = if total > 0 {
            completed as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        Self {
            completed,
            total,
            percent,
        }
    }
}

/// Subjects of a single term
#[derive(Debug, Clone)]
pub struct TermGroup<'a> {
    /// Term number (0 when unknown)
    pub term: u32,
    /// Subjects sorted by name
    pub subjects: Vec<&'a Subject>,
}

impl TermGroup<'_> {
    /// Progress within this term
    #[must_use]
    pub fn progress(&self) -> CourseProgress {
        CourseProgress::from_subjects(self.subjects.iter().copied())
    }
}

/// A course's full list of subjects
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Gradebook {
    /// Course title (e.g., "Computer Engineering")
    pub title: String,
    /// Institution name, if known
    pub institution: Option<String>,
    /// All subjects in file order
    pub subjects: Vec<Subject>,
}

impl Gradebook {
    /// Create an empty gradebook
    #[must_use]
    pub const fn new(title: String) -> Self {
        Self {
            title,
            institution: None,
            subjects: Vec::new(),
        }
    }

    /// Add a subject. Returns `false` and leaves the gradebook unchanged if the id is taken.
    pub fn add_subject(&mut self, subject: Subject) -> bool {
        if self.get_subject(&subject.id).is_some() {
            return false;
        }
        self.subjects.push(subject);
        true
    }

    /// Look up a subject by id
    #[must_use]
    pub fn get_subject(&self, id: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.id == id)
    }

    /// Look up a subject by id for mutation
    pub fn get_subject_mut(&mut self, id: &str) -> Option<&mut Subject> {
        self.subjects.iter_mut().find(|s| s.id == id)
    }

    /// Subjects grouped by term ascending, each group sorted by name
    #[must_use]
    pub fn by_term(&self) -> Vec<TermGroup<'_>> {
        let mut terms: BTreeMap<u32, Vec<&Subject>> = BTreeMap::new();
        for subject in &self.subjects {
            terms.entry(subject.term).or_default().push(subject);
        }
        terms
            .into_iter()
            .map(|(term, mut subjects)| {
                subjects.sort_by(|a, b| a.name.cmp(&b.name));
                TermGroup { term, subjects }
            })
            .collect()
    }

    /// Progress over the whole course
    #[must_use]
    pub fn progress(&self) -> CourseProgress {
        CourseProgress::from_subjects(&self.subjects)
    }

    /// Subjects currently being taken
    pub fn in_progress(&self) -> impl Iterator<Item = &Subject> {
        self.subjects
            .iter()
            .filter(|s| s.status == SubjectStatus::InProgress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject(id: &str, name: &str, term: u32, status: SubjectStatus) -> Subject {
        let mut s = Subject::new(id.to_string(), name.to_string(), term);
        s.status = status;
        s
    }

    fn sample() -> Gradebook {
        let mut book = Gradebook::new("Computer Engineering".to_string());
        book.add_subject(subject("3", "Physics I", 2, SubjectStatus::InProgress));
        book.add_subject(subject("1", "Calculus I", 1, SubjectStatus::Completed));
        book.add_subject(subject("2", "Algorithms", 1, SubjectStatus::Pending));
        book.add_subject(subject("4", "Seminar", 0, SubjectStatus::Completed));
        book
    }

    #[test]
    fn test_progress() {
        let progress = sample().progress();
        assert_eq!(progress.completed, 2);
        assert_eq!(progress.total, 4);
        assert!((progress.percent - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_progress_is_zero() {
        let progress = Gradebook::new("Empty".to_string()).progress();
        assert_eq!(progress.total, 0);
        assert!(progress.percent.abs() < f64::EPSILON);
    }

    #[test]
    fn test_by_term_orders_terms_and_names() {
        let book = sample();
        let groups = book.by_term();

        let terms: Vec<u32> = groups.iter().map(|g| g.term).collect();
        assert_eq!(terms, vec![0, 1, 2]);

        let names: Vec<&str> = groups[1].subjects.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Algorithms", "Calculus I"]);

        let term_one = groups[1].progress();
        assert_eq!((term_one.completed, term_one.total), (1, 2));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut book = sample();
        assert!(!book.add_subject(subject("1", "Other", 3, SubjectStatus::Pending)));
        assert_eq!(book.subjects.len(), 4);
    }

    #[test]
    fn test_in_progress_filter() {
        let book = sample();
        let ids: Vec<&str> = book.in_progress().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["3"]);
    }
}
