//! Session-scoped dataset held for the lifetime of the window.

use super::loader::{year_set, Row};
use super::selection::Selection;
use std::path::{Path, PathBuf};

/// Immutable dataset plus the years derived from it at load time.
#[derive(Debug, Clone, Default)]
pub struct Session {
    rows: Vec<Row>,
    years: Vec<i32>,
    source: Option<PathBuf>,
}

impl Session {
    pub fn new(rows: Vec<Row>) -> Self {
        let years = year_set(&rows);
        Self {
            rows,
            years,
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Distinct years, ascending.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Selection to draw right after loading; `None` when no year was found.
    pub fn initial_selection(&self) -> Option<Selection> {
        (!self.years.is_empty()).then_some(Selection::All)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn years_are_derived_once_at_construction() {
        let rows = vec![
            Row {
                date: "Jan 2021".into(),
                year: 2021,
                value: 1.0,
            },
            Row {
                date: "Jan 2020".into(),
                year: 2020,
                value: 2.0,
            },
        ];
        let session = Session::new(rows).with_source("crossings.csv");
        assert_eq!(session.years(), &[2020, 2021]);
        assert_eq!(session.row_count(), 2);
        assert_eq!(session.source(), Some(Path::new("crossings.csv")));
        assert_eq!(session.initial_selection(), Some(Selection::All));
    }

    #[test]
    fn empty_session_has_no_years() {
        let session = Session::new(Vec::new());
        assert!(session.is_empty());
        assert!(session.years().is_empty());
        assert_eq!(session.initial_selection(), None);
    }
}
