//! Static Chart Export
//! Renders a [`ChartSpec`] to PNG with plotters, or writes it out as Plotly JSON.

use crate::charts::spec::{format_thousands, parse_hex_color, ChartSpec};
use image::{ImageFormat, RgbImage};
use plotters::coord::ranged1d::SegmentValue;
use plotters::prelude::*;
use plotters::style::FontTransform;
use std::fs;
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Nothing to export: the chart has no points")]
    EmptyChart,
    #[error("Drawing failed: {0}")]
    Draw(String),
    #[error("Image buffer size mismatch")]
    Buffer,
    #[error("Image encoding failed: {0}")]
    Image(#[from] image::ImageError),
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

const FALLBACK_RGB: (u8, u8, u8) = (0, 90, 139);

/// Up to this many year labels fit side by side without rotation.
const HORIZONTAL_LABEL_LIMIT: usize = 12;

fn rgb(hex: &str) -> RGBColor {
    let (r, g, b) = parse_hex_color(hex).unwrap_or(FALLBACK_RGB);
    RGBColor(r, g, b)
}

fn draw_err<E: std::fmt::Display>(e: E) -> ExportError {
    ExportError::Draw(e.to_string())
}

/// Headroom above the tallest point so labels stay inside the plot.
fn y_range(values: &[f64]) -> (f64, f64) {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() || max <= 0.0 {
        return (0.0, 1.0);
    }
    (0.0, max * 1.15)
}

/// plotters only rotates in 90° steps, so angled ticks are drawn upright
/// while they fit and turned on their side once they would overlap.
fn rotate_x_labels(tickangle: Option<i32>, label_count: usize) -> bool {
    matches!(tickangle, Some(angle) if angle != 0) && label_count > HORIZONTAL_LABEL_LIMIT
}

/// Render to an in-memory PNG.
pub fn render_png_bytes(spec: &ChartSpec, width: u32, height: u32) -> Result<Vec<u8>, ExportError> {
    if spec.is_empty() {
        return Err(ExportError::EmptyChart);
    }

    let mut buffer = vec![0u8; (width as usize) * (height as usize) * 3];
    draw_chart(spec, &mut buffer, width, height)?;

    let img = RgbImage::from_raw(width, height, buffer).ok_or(ExportError::Buffer)?;
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

fn draw_chart(spec: &ChartSpec, buffer: &mut [u8], width: u32, height: u32) -> Result<(), ExportError> {
    let trace = &spec.trace;
    let layout = &spec.layout;
    let labels = layout.xaxis.ticktext.clone().unwrap_or_else(|| trace.x.clone());
    let n = trace.y.len() as i32;
    let (y_min, y_max) = y_range(&trace.y);

    let root = BitMapBackend::with_buffer(buffer, (width, height)).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(layout.title, ("sans-serif", 28))
        .margin(20)
        .margin_top(layout.margin.t.min(height / 4))
        .x_label_area_size(layout.margin.b.min(height / 3))
        .y_label_area_size(90)
        .build_cartesian_2d((0..n).into_segmented(), y_min..y_max)
        .map_err(draw_err)?;

    chart
        .plotting_area()
        .fill(&rgb(layout.plot_bgcolor))
        .map_err(draw_err)?;

    let x_label_style = if rotate_x_labels(layout.xaxis.tickangle, labels.len()) {
        ("sans-serif", 16)
            .into_font()
            .transform(FontTransform::Rotate90)
    } else {
        ("sans-serif", 16).into_font()
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(labels.len())
        .x_label_style(x_label_style)
        .x_label_formatter(&|x| match x {
            SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => {
                labels.get(*i as usize).cloned().unwrap_or_default()
            }
            SegmentValue::Last => String::new(),
        })
        .y_label_formatter(&|y| format_thousands(*y))
        .x_desc(layout.xaxis.title)
        .y_desc(layout.yaxis.title)
        .axis_desc_style(("sans-serif", 18))
        .draw()
        .map_err(draw_err)?;

    let line_color = rgb(trace.line.color);
    let marker_color = rgb(trace.marker.color);
    let points: Vec<(SegmentValue<i32>, f64)> = trace
        .y
        .iter()
        .enumerate()
        .map(|(i, &y)| (SegmentValue::CenterOf(i as i32), y))
        .collect();

    chart
        .draw_series(LineSeries::new(
            points.iter().cloned(),
            line_color.stroke_width(trace.line.width.round() as u32),
        ))
        .map_err(draw_err)?;

    chart
        .draw_series(
            points
                .iter()
                .map(|point| Circle::new(point.clone(), 5, marker_color.filled())),
        )
        .map_err(draw_err)?;

    // Text is anchored at its top-left corner; shift it up and left of the marker
    let label_font = ("sans-serif", 16).into_font().color(&BLACK);
    chart
        .draw_series(trace.text.iter().zip(points.iter()).map(|(label, point)| {
            EmptyElement::at(point.clone())
                + Text::new(label.clone(), (-8, -26), label_font.clone())
        }))
        .map_err(draw_err)?;

    root.present().map_err(draw_err)?;
    Ok(())
}

/// Render and write a PNG file.
pub fn save_png(spec: &ChartSpec, path: &Path, width: u32, height: u32) -> Result<(), ExportError> {
    let bytes = render_png_bytes(spec, width, height)?;
    fs::write(path, &bytes)?;
    info!(path = %path.display(), width, height, "chart exported as PNG");
    Ok(())
}

/// Write the Plotly-compatible figure JSON.
pub fn save_json(spec: &ChartSpec, path: &Path) -> Result<(), ExportError> {
    let json = serde_json::to_string_pretty(&spec.to_plotly_json())?;
    fs::write(path, json)?;
    info!(path = %path.display(), "chart spec exported as JSON");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::spec::build_chart_spec;
    use crate::data::{aggregate, Row, Selection};

    fn spec(selection: Selection) -> ChartSpec {
        let rows = vec![
            Row {
                date: "Jan 2020".into(),
                year: 2020,
                value: 1_500_000.0,
            },
            Row {
                date: "Jan 2021".into(),
                year: 2021,
                value: 2_500_000.0,
            },
        ];
        build_chart_spec(&aggregate(&rows, selection), selection)
    }

    #[test]
    fn empty_chart_is_not_rendered() {
        let empty = build_chart_spec(&Default::default(), Selection::All);
        assert!(matches!(
            render_png_bytes(&empty, 200, 100),
            Err(ExportError::EmptyChart)
        ));
    }

    #[test]
    fn renders_png_with_requested_size() {
        let bytes = render_png_bytes(&spec(Selection::All), 640, 480).unwrap();
        assert_eq!(&bytes[..8], &[137, 80, 78, 71, 13, 10, 26, 10]);

        let img = image::load_from_memory(&bytes).unwrap();
        assert_eq!((img.width(), img.height()), (640, 480));
    }

    #[test]
    fn single_year_png_is_written_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.png");
        save_png(&spec(Selection::Year(2020)), &path, 400, 300).unwrap();

        let img = image::open(&path).unwrap();
        assert_eq!((img.width(), img.height()), (400, 300));
    }

    #[test]
    fn year_labels_rotate_only_when_crowded() {
        assert!(!rotate_x_labels(Some(45), 2));
        assert!(!rotate_x_labels(Some(45), HORIZONTAL_LABEL_LIMIT));
        assert!(rotate_x_labels(Some(45), HORIZONTAL_LABEL_LIMIT + 1));
        assert!(!rotate_x_labels(Some(0), 40));
        assert!(!rotate_x_labels(None, 40));
    }

    #[test]
    fn y_range_has_headroom() {
        assert_eq!(y_range(&[]), (0.0, 1.0));
        assert_eq!(y_range(&[0.0]), (0.0, 1.0));
        let (lo, hi) = y_range(&[1.0, 2.0]);
        assert_eq!(lo, 0.0);
        assert!(hi > 2.0);
    }

    #[test]
    fn json_export_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.json");
        save_json(&spec(Selection::Year(2021)), &path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["data"][0]["x"], serde_json::json!(["2021"]));
        assert_eq!(value["data"][0]["text"], serde_json::json!(["3"]));
        assert_eq!(value["layout"]["title"], "Crossings by Year");
    }
}
