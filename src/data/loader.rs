//! CSV Data Loader Module
//! Reads the border crossing CSV with Polars and turns it into typed rows.

use polars::prelude::*;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Column holding "<Month> <Year>" text.
pub const DATE_COLUMN: &str = "Date";
/// Column holding the crossing count as text.
pub const VALUE_COLUMN: &str = "Value";

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Missing required column '{0}'")]
    MissingColumn(String),
    #[error("Row {row}: cannot read a year from date '{text}'")]
    InvalidDate { row: usize, text: String },
    #[error("Row {row}: '{text}' is not a valid crossing count")]
    InvalidValue { row: usize, text: String },
}

/// One border crossing observation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    /// Raw date text as it appears in the source, e.g. "Mar 2023".
    pub date: String,
    pub year: i32,
    pub value: f64,
}

impl Row {
    /// Parse one data row. `row` is the 1-based data row number used in errors.
    pub fn parse(row: usize, date: Option<&str>, value: Option<&str>) -> Result<Self, LoaderError> {
        let date = date.unwrap_or_default();
        let year = parse_year(date).ok_or_else(|| LoaderError::InvalidDate {
            row,
            text: date.to_string(),
        })?;

        let value_text = value.unwrap_or_default();
        let value = parse_value(value_text).ok_or_else(|| LoaderError::InvalidValue {
            row,
            text: value_text.to_string(),
        })?;

        Ok(Self {
            date: date.to_string(),
            year,
            value,
        })
    }
}

/// Extract the year from "<Month> <Year>": second whitespace token as an integer.
pub fn parse_year(date: &str) -> Option<i32> {
    date.split_whitespace().nth(1)?.parse().ok()
}

/// Crossing counts must be finite and non-negative.
pub fn parse_value(text: &str) -> Option<f64> {
    let value: f64 = text.trim().parse().ok()?;
    (value.is_finite() && value >= 0.0).then_some(value)
}

/// Load a CSV file and parse every row, preserving source order.
pub fn load_csv(path: &Path) -> Result<Vec<Row>, LoaderError> {
    // A zero-byte file is an empty dataset, not a malformed one
    if fs::metadata(path).is_ok_and(|meta| meta.len() == 0) {
        return Ok(Vec::new());
    }

    // Schema inference disabled: every column arrives as text and is parsed below
    let df = LazyCsvReader::new(path)
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .finish()?
        .collect()?;

    rows_from_dataframe(&df)
}

/// Convert a loaded DataFrame into rows. Fails on the first malformed row.
pub fn rows_from_dataframe(df: &DataFrame) -> Result<Vec<Row>, LoaderError> {
    let dates = text_column(df, DATE_COLUMN)?;
    let values = text_column(df, VALUE_COLUMN)?;

    dates
        .par_iter()
        .zip(values.par_iter())
        .enumerate()
        .map(|(idx, (date, value))| Row::parse(idx + 1, date.as_deref(), value.as_deref()))
        .collect()
}

/// Distinct years across all rows, ascending.
pub fn year_set(rows: &[Row]) -> Vec<i32> {
    rows.iter()
        .map(|row| row.year)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn text_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, LoaderError> {
    let column = df
        .column(name)
        .map_err(|_| LoaderError::MissingColumn(name.to_string()))?;
    let text = column.cast(&DataType::String)?;
    let ca = text.str()?;

    Ok(ca.into_iter().map(|v| v.map(str::to_string)).collect())
}
