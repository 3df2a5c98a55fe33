//! Year selection model behind the dropdown.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Option value and label of the "every year" entry.
pub const ALL_LABEL: &str = "All";

#[derive(Error, Debug, PartialEq)]
pub enum SelectionError {
    #[error("'{0}' is neither \"All\" nor a year")]
    Invalid(String),
    #[error("{0} is not one of the available options")]
    NotAnOption(Selection),
}

/// Current dropdown value: every year, or one specific year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    All,
    Year(i32),
}

impl Selection {
    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    /// Whether a row from `year` belongs to this selection.
    pub fn includes(&self, year: i32) -> bool {
        match self {
            Selection::All => true,
            Selection::Year(y) => *y == year,
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => f.write_str(ALL_LABEL),
            Selection::Year(y) => write!(f, "{}", y),
        }
    }
}

impl FromStr for Selection {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == ALL_LABEL {
            return Ok(Selection::All);
        }
        s.parse()
            .map(Selection::Year)
            .map_err(|_| SelectionError::Invalid(s.to_string()))
    }
}

/// One dropdown entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub text: String,
}

impl From<Selection> for SelectOption {
    fn from(selection: Selection) -> Self {
        let label = selection.to_string();
        Self {
            value: label.clone(),
            text: label,
        }
    }
}

/// "All" followed by one option per year, in the order given.
pub fn year_options(years: &[i32]) -> Vec<SelectOption> {
    std::iter::once(Selection::All)
        .chain(years.iter().copied().map(Selection::Year))
        .map(SelectOption::from)
        .collect()
}

/// Dropdown state: available options plus the current value.
///
/// Changes are reported back to the caller from [`YearSelector::select`],
/// which returns the new selection only when the value actually changed.
#[derive(Debug, Clone)]
pub struct YearSelector {
    options: Vec<SelectOption>,
    current: Selection,
}

impl Default for YearSelector {
    fn default() -> Self {
        Self {
            options: year_options(&[]),
            current: Selection::All,
        }
    }
}

impl YearSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the options with "All" plus `years`, and reset to "All".
    pub fn populate(&mut self, years: &[i32]) {
        self.options = year_options(years);
        self.current = Selection::All;
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn current(&self) -> Selection {
        self.current
    }

    /// Set the value without reporting a change.
    pub fn set(&mut self, selection: Selection) -> Result<(), SelectionError> {
        if !self.contains(selection) {
            return Err(SelectionError::NotAnOption(selection));
        }
        self.current = selection;
        Ok(())
    }

    /// Pick an option by its value string. Returns `Some` when the value changed.
    pub fn select(&mut self, value: &str) -> Result<Option<Selection>, SelectionError> {
        let selection: Selection = value.parse()?;
        let previous = self.current;
        self.set(selection)?;
        Ok((selection != previous).then_some(selection))
    }

    fn contains(&self, selection: Selection) -> bool {
        let value = selection.to_string();
        self.options.iter().any(|opt| opt.value == value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_and_years() {
        assert_eq!("All".parse::<Selection>(), Ok(Selection::All));
        assert_eq!("2020".parse::<Selection>(), Ok(Selection::Year(2020)));
        assert_eq!(
            "all".parse::<Selection>(),
            Err(SelectionError::Invalid("all".to_string()))
        );
        assert!("20x0".parse::<Selection>().is_err());
    }

    #[test]
    fn options_start_with_all_then_years() {
        let opts = year_options(&[2019, 2020, 2021]);
        let values: Vec<&str> = opts.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, ["All", "2019", "2020", "2021"]);
        assert!(opts.iter().all(|o| o.value == o.text));
    }

    #[test]
    fn empty_year_set_leaves_only_all() {
        let mut selector = YearSelector::new();
        selector.populate(&[]);
        assert_eq!(selector.options(), &[SelectOption::from(Selection::All)]);
        assert_eq!(selector.current(), Selection::All);
    }

    #[test]
    fn select_reports_only_real_changes() {
        let mut selector = YearSelector::new();
        selector.populate(&[2020, 2021]);

        assert_eq!(selector.select("2021"), Ok(Some(Selection::Year(2021))));
        assert_eq!(selector.select("2021"), Ok(None));
        assert_eq!(selector.select("All"), Ok(Some(Selection::All)));
        assert_eq!(selector.current(), Selection::All);
    }

    #[test]
    fn unknown_year_is_rejected() {
        let mut selector = YearSelector::new();
        selector.populate(&[2020]);
        assert_eq!(
            selector.select("1999"),
            Err(SelectionError::NotAnOption(Selection::Year(1999)))
        );
        assert!(selector.set(Selection::Year(1999)).is_err());
        assert_eq!(selector.current(), Selection::All);
    }

    #[test]
    fn populate_resets_current_value() {
        let mut selector = YearSelector::new();
        selector.populate(&[2020, 2021]);
        selector.set(Selection::Year(2020)).unwrap();
        selector.populate(&[2022]);
        assert_eq!(selector.current(), Selection::All);
    }
}
