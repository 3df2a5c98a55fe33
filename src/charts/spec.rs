//! Chart Specification Module
//! Builds the trace + layout payload for the yearly crossings line chart.
//!
//! Field names follow Plotly's JSON schema so a spec can be exported and
//! opened by any Plotly-compatible surface unchanged.

use crate::data::{aggregate, AggregatedSeries, Selection, Session};
use serde::Serialize;

pub const LINE_COLOR: &str = "#005A8B";
pub const PLOT_BACKGROUND: &str = "#f9f9f9";
pub const CHART_TITLE: &str = "Crossings by Year";
pub const X_AXIS_TITLE: &str = "Year";
pub const Y_AXIS_TITLE: &str = "Number of Crossings (MM)";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineStyle {
    pub color: &'static str,
    pub width: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerStyle {
    pub color: &'static str,
}

/// A single line-plus-marker series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    /// Year labels, one per point.
    pub x: Vec<String>,
    /// Totals in millions.
    pub y: Vec<f64>,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub mode: &'static str,
    pub line: LineStyle,
    pub marker: MarkerStyle,
    /// Per-point labels; empty when no labels are drawn.
    pub text: Vec<String>,
    pub textposition: &'static str,
    pub hoverinfo: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickangle: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickmode: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickvals: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticktext: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickformat: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Margin {
    pub t: u32,
    pub b: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: &'static str,
    pub xaxis: Axis,
    pub yaxis: Axis,
    pub plot_bgcolor: &'static str,
    pub margin: Margin,
    pub showlegend: bool,
}

/// Everything the plotting surface needs for one render.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub trace: Trace,
    pub layout: Layout,
}

impl ChartSpec {
    /// Plotly figure JSON: `{"data": [trace], "layout": {...}}`.
    pub fn to_plotly_json(&self) -> serde_json::Value {
        serde_json::json!({
            "data": [&self.trace],
            "layout": &self.layout,
        })
    }

    pub fn has_labels(&self) -> bool {
        !self.trace.text.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.trace.x.is_empty()
    }
}

/// Result of one render: the selection it was built for, the series and the spec.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedChart {
    pub selection: Selection,
    pub series: AggregatedSeries,
    pub spec: ChartSpec,
}

/// Filter, aggregate and build the chart for `selection`. Never mutates the session.
pub fn render(session: &Session, selection: Selection) -> RenderedChart {
    let series = aggregate(session.rows(), selection);
    let spec = build_chart_spec(&series, selection);
    RenderedChart {
        selection,
        series,
        spec,
    }
}

/// Assemble trace and layout. Labels are drawn only for a single-year view,
/// rounded half away from zero.
pub fn build_chart_spec(series: &AggregatedSeries, selection: Selection) -> ChartSpec {
    let years: Vec<String> = series.years().iter().map(|y| y.to_string()).collect();
    let crossings = series.in_millions();

    let text = if selection.is_all() {
        Vec::new()
    } else {
        crossings.iter().map(|v| format!("{:.0}", v.round())).collect()
    };

    let trace = Trace {
        x: years.clone(),
        y: crossings,
        kind: "scatter",
        mode: "lines+markers+text",
        line: LineStyle {
            color: LINE_COLOR,
            width: 3.0,
        },
        marker: MarkerStyle { color: LINE_COLOR },
        text,
        textposition: "top center",
        hoverinfo: "text",
    };

    let layout = Layout {
        title: CHART_TITLE,
        xaxis: Axis {
            title: X_AXIS_TITLE,
            tickangle: Some(45),
            tickmode: Some("linear"),
            tickvals: Some(years.clone()),
            ticktext: Some(years),
            tickformat: None,
        },
        yaxis: Axis {
            title: Y_AXIS_TITLE,
            tickangle: None,
            tickmode: None,
            tickvals: None,
            ticktext: None,
            tickformat: Some(",.0f"),
        },
        plot_bgcolor: PLOT_BACKGROUND,
        margin: Margin { t: 50, b: 150 },
        showlegend: false,
    };

    ChartSpec { trace, layout }
}

/// Zero decimals with comma thousands grouping (Plotly's `,.0f`), rounding
/// half away from zero.
pub fn format_thousands(value: f64) -> String {
    let rounded = format!("{:.0}", value.abs().round());
    let mut grouped = String::with_capacity(rounded.len() + rounded.len() / 3);
    for (i, ch) in rounded.chars().enumerate() {
        if i > 0 && (rounded.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if value < 0.0 && rounded != "0" {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Parse "#rrggbb" into RGB components.
pub fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Row;

    fn session() -> Session {
        let row = |date: &str, year, value| Row {
            date: date.to_string(),
            year,
            value,
        };
        Session::new(vec![
            row("Jan 2020", 2020, 100.0),
            row("Feb 2020", 2020, 200.0),
            row("Jan 2021", 2021, 50.0),
        ])
    }

    #[test]
    fn all_selection_has_no_labels() {
        let chart = render(&session(), Selection::All);
        assert_eq!(chart.spec.trace.x, vec!["2020", "2021"]);
        assert_eq!(chart.spec.trace.y, vec![0.0003, 0.00005]);
        assert!(chart.spec.trace.text.is_empty());
        assert!(!chart.spec.has_labels());
    }

    #[test]
    fn year_selection_labels_rounded_values() {
        let chart = render(&session(), Selection::Year(2020));
        assert_eq!(chart.spec.trace.x, vec!["2020"]);
        assert_eq!(chart.spec.trace.y, vec![0.0003]);
        assert_eq!(chart.spec.trace.text, vec!["0"]);
    }

    #[test]
    fn labels_round_to_nearest_million() {
        let rows = vec![Row {
            date: "May 2019".into(),
            year: 2019,
            value: 2_600_000.0,
        }];
        let chart = render(&Session::new(rows), Selection::Year(2019));
        assert_eq!(chart.spec.trace.text, vec!["3"]);
    }

    #[test]
    fn rendering_is_idempotent() {
        let session = session();
        for selection in [Selection::All, Selection::Year(2021)] {
            let a = render(&session, selection);
            let b = render(&session, selection);
            assert_eq!(a.spec.trace.x, b.spec.trace.x);
            assert_eq!(a.spec.trace.y, b.spec.trace.y);
            assert_eq!(a.spec.trace.text, b.spec.trace.text);
        }
    }

    #[test]
    fn layout_uses_fixed_styling() {
        let spec = render(&session(), Selection::All).spec;
        assert_eq!(spec.layout.title, "Crossings by Year");
        assert_eq!(spec.layout.xaxis.tickangle, Some(45));
        assert_eq!(spec.layout.xaxis.ticktext, Some(spec.trace.x.clone()));
        assert_eq!(spec.layout.yaxis.tickformat, Some(",.0f"));
        assert!(!spec.layout.showlegend);
        assert_eq!(spec.trace.line.color, spec.trace.marker.color);
    }

    #[test]
    fn plotly_json_shape() {
        let json = render(&session(), Selection::Year(2021)).spec.to_plotly_json();
        assert_eq!(json["data"][0]["type"], "scatter");
        assert_eq!(json["data"][0]["mode"], "lines+markers+text");
        assert_eq!(json["data"][0]["x"][0], "2021");
        assert_eq!(json["layout"]["margin"]["b"], 150);
        assert_eq!(json["layout"]["showlegend"], false);
        assert!(json["layout"]["yaxis"].get("tickangle").is_none());
    }

    #[test]
    fn thousands_formatting() {
        assert_eq!(format_thousands(0.0), "0");
        assert_eq!(format_thousands(0.4), "0");
        assert_eq!(format_thousands(999.0), "999");
        assert_eq!(format_thousands(1234.0), "1,234");
        assert_eq!(format_thousands(1_234_567.6), "1,234,568");
        assert_eq!(format_thousands(-4500.0), "-4,500");
        assert_eq!(format_thousands(-0.2), "0");
        assert_eq!(format_thousands(2.5), "3");
        assert_eq!(format_thousands(999.5), "1,000");
        assert_eq!(format_thousands(-2.5), "-3");
    }

    #[test]
    fn hex_colors() {
        assert_eq!(parse_hex_color("#005A8B"), Some((0x00, 0x5A, 0x8B)));
        assert_eq!(parse_hex_color("#f9f9f9"), Some((0xf9, 0xf9, 0xf9)));
        assert_eq!(parse_hex_color("005A8B"), None);
        assert_eq!(parse_hex_color("#12345"), None);
    }
}
