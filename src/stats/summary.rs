//! Series Summary Module
//! Descriptive statistics over the yearly totals currently on screen.

use crate::data::AggregatedSeries;
use statrs::statistics::Statistics;

/// One year's total, in millions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearValue {
    pub year: i32,
    pub value: f64,
}

/// Change from the previous plotted point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearChange {
    pub year: i32,
    pub value: f64,
    /// Percent change; `None` when the previous total was zero.
    pub percent: Option<f64>,
}

/// Summary of an aggregated series. All values are in millions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SeriesSummary {
    pub count: usize,
    pub total: f64,
    pub mean: Option<f64>,
    /// Sample standard deviation; needs at least two points.
    pub std_dev: Option<f64>,
    pub min: Option<YearValue>,
    pub max: Option<YearValue>,
    pub changes: Vec<YearChange>,
}

impl SeriesSummary {
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Compute the summary for `series`.
pub fn summarize(series: &AggregatedSeries) -> SeriesSummary {
    let points: Vec<YearValue> = series
        .years()
        .into_iter()
        .zip(series.in_millions())
        .map(|(year, value)| YearValue { year, value })
        .collect();

    if points.is_empty() {
        return SeriesSummary::default();
    }

    let values: Vec<f64> = points.iter().map(|p| p.value).collect();
    let total: f64 = values.iter().sum();
    let mean = values.iter().mean();
    let std_dev = if values.len() > 1 {
        Some(values.iter().std_dev())
    } else {
        None
    };

    let min = points
        .iter()
        .copied()
        .min_by(|a, b| a.value.total_cmp(&b.value));
    let max = points
        .iter()
        .copied()
        .max_by(|a, b| a.value.total_cmp(&b.value));

    let changes = points
        .windows(2)
        .map(|pair| {
            let (prev, curr) = (pair[0], pair[1]);
            let percent = (prev.value != 0.0).then(|| (curr.value - prev.value) / prev.value * 100.0);
            YearChange {
                year: curr.year,
                value: curr.value,
                percent,
            }
        })
        .collect();

    SeriesSummary {
        count: points.len(),
        total,
        mean: Some(mean),
        std_dev,
        min,
        max,
        changes,
    }
}
