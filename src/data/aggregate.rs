//! Yearly aggregation of crossing counts.

use super::loader::Row;
use super::selection::Selection;
use std::collections::HashMap;

/// Divisor used to express totals in millions.
pub const MILLION: f64 = 1_000_000.0;

/// Summed crossings for one year.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearTotal {
    pub year: i32,
    pub total: f64,
}

/// Year totals in first-occurrence order of the filtered rows.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AggregatedSeries {
    points: Vec<YearTotal>,
}

impl AggregatedSeries {
    pub fn points(&self) -> &[YearTotal] {
        &self.points
    }

    pub fn years(&self) -> Vec<i32> {
        self.points.iter().map(|p| p.year).collect()
    }

    /// Raw totals.
    pub fn totals(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.total).collect()
    }

    /// Totals divided by one million.
    pub fn in_millions(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.total / MILLION).collect()
    }

    pub fn sum(&self) -> f64 {
        self.points.iter().map(|p| p.total).sum()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Rows belonging to `selection`, in source order.
pub fn filter_rows(rows: &[Row], selection: Selection) -> impl Iterator<Item = &Row> {
    rows.iter().filter(move |row| selection.includes(row.year))
}

/// Filter by `selection`, then sum `value` per year.
pub fn aggregate(rows: &[Row], selection: Selection) -> AggregatedSeries {
    let mut index: HashMap<i32, usize> = HashMap::new();
    let mut points: Vec<YearTotal> = Vec::new();

    for row in filter_rows(rows, selection) {
        let slot = *index.entry(row.year).or_insert_with(|| {
            points.push(YearTotal {
                year: row.year,
                total: 0.0,
            });
            points.len() - 1
        });
        points[slot].total += row.value;
    }

    AggregatedSeries { points }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(date: &str, value: f64) -> Row {
        Row {
            date: date.to_string(),
            year: crate::data::loader::parse_year(date).unwrap(),
            value,
        }
    }

    fn sample() -> Vec<Row> {
        vec![
            row("Jan 2020", 100.0),
            row("Feb 2020", 200.0),
            row("Jan 2021", 50.0),
        ]
    }

    #[test]
    fn all_groups_every_year() {
        let series = aggregate(&sample(), Selection::All);
        assert_eq!(series.years(), vec![2020, 2021]);
        assert_eq!(series.totals(), vec![300.0, 50.0]);
    }

    #[test]
    fn single_year_filters_rows() {
        let rows = sample();
        assert_eq!(filter_rows(&rows, Selection::Year(2020)).count(), 2);

        let series = aggregate(&rows, Selection::Year(2020));
        assert_eq!(series.points(), &[YearTotal { year: 2020, total: 300.0 }]);
    }

    #[test]
    fn groups_follow_first_occurrence() {
        let rows = vec![
            row("Jan 2022", 1.0),
            row("Jan 2019", 2.0),
            row("Feb 2022", 3.0),
            row("Mar 2020", 4.0),
        ];
        let series = aggregate(&rows, Selection::All);
        assert_eq!(series.years(), vec![2022, 2019, 2020]);
        assert_eq!(series.totals(), vec![4.0, 2.0, 4.0]);
    }

    #[test]
    fn all_total_matches_dataset_total() {
        let rows = vec![
            row("Jan 2018", 1_250_000.0),
            row("Jun 2019", 730_000.0),
            row("Dec 2018", 20_000.0),
            row("Jul 2021", 4_000_000.0),
        ];
        let series = aggregate(&rows, Selection::All);
        let expected: f64 = rows.iter().map(|r| r.value).sum::<f64>() / MILLION;
        let got: f64 = series.in_millions().iter().sum();
        assert!((got - expected).abs() < 1e-12);
    }

    #[test]
    fn per_year_sum_matches_filtered_rows() {
        let rows = vec![
            row("Jan 2018", 10.0),
            row("Jun 2019", 20.0),
            row("Dec 2018", 30.0),
            row("Jul 2019", 40.0),
        ];
        for year in crate::data::loader::year_set(&rows) {
            let series = aggregate(&rows, Selection::Year(year));
            let expected: f64 = rows.iter().filter(|r| r.year == year).map(|r| r.value).sum();
            assert_eq!(series.years(), vec![year]);
            assert_eq!(series.sum(), expected);
        }
    }

    #[test]
    fn unknown_year_and_empty_input_give_empty_series() {
        assert!(aggregate(&sample(), Selection::Year(1990)).is_empty());
        assert!(aggregate(&[], Selection::All).is_empty());
    }

    #[test]
    fn millions_conversion() {
        let series = aggregate(&sample(), Selection::All);
        assert_eq!(series.in_millions(), vec![0.0003, 0.00005]);
    }
}
