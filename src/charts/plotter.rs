//! Chart Plotter Module
//! Draws a [`ChartSpec`] interactively using egui_plot.

use crate::charts::spec::{format_thousands, parse_hex_color, ChartSpec};
use crate::stats::SeriesSummary;
use egui::{Color32, RichText};
use egui_plot::{GridMark, Line, Plot, PlotPoint, PlotPoints, Points, Text};

/// Fallback when a spec color cannot be parsed.
pub const DEFAULT_COLOR: Color32 = Color32::from_rgb(0, 90, 139);

/// Convert a "#rrggbb" spec color.
pub fn spec_color(hex: &str) -> Color32 {
    parse_hex_color(hex)
        .map(|(r, g, b)| Color32::from_rgb(r, g, b))
        .unwrap_or(DEFAULT_COLOR)
}

/// Draws crossings charts.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Line + markers at integer x positions, one tick per year.
    pub fn draw_line_chart(ui: &mut egui::Ui, spec: &ChartSpec, height: f32) {
        let trace = &spec.trace;
        let layout = &spec.layout;
        let color = spec_color(trace.line.color);
        let marker_color = spec_color(trace.marker.color);

        let tick_text = layout
            .xaxis
            .ticktext
            .clone()
            .unwrap_or_else(|| trace.x.clone());
        let tick_count = tick_text.len();

        let points: Vec<[f64; 2]> = trace
            .y
            .iter()
            .enumerate()
            .map(|(i, &y)| [i as f64, y])
            .collect();

        egui::Frame::none()
            .fill(spec_color(layout.plot_bgcolor))
            .rounding(5.0)
            .show(ui, |ui| {
                Plot::new("crossings_by_year")
                    .height(height)
                    .x_axis_label(layout.xaxis.title)
                    .y_axis_label(layout.yaxis.title)
                    .allow_scroll(false)
                    .include_x(-0.5)
                    .include_x(tick_count.saturating_sub(1) as f64 + 0.5)
                    .x_grid_spacer(move |_input| {
                        (0..tick_count)
                            .map(|i| GridMark {
                                value: i as f64,
                                step_size: 1.0,
                            })
                            .collect()
                    })
                    .x_axis_formatter(move |mark, _range| {
                        let idx = mark.value.round();
                        if idx >= 0.0 && (idx - mark.value).abs() < 1e-6 {
                            tick_text.get(idx as usize).cloned().unwrap_or_default()
                        } else {
                            String::new()
                        }
                    })
                    .y_axis_formatter(|mark, _range| format_thousands(mark.value))
                    .show(ui, |plot_ui| {
                        if points.is_empty() {
                            return;
                        }

                        plot_ui.line(
                            Line::new(PlotPoints::from_iter(points.iter().copied()))
                                .color(color)
                                .width(trace.line.width),
                        );
                        plot_ui.points(
                            Points::new(PlotPoints::from_iter(points.iter().copied()))
                                .radius(4.0)
                                .color(marker_color),
                        );

                        // Labels sit just above their marker
                        for (label, point) in trace.text.iter().zip(points.iter()) {
                            plot_ui.text(
                                Text::new(
                                    PlotPoint::new(point[0], point[1]),
                                    RichText::new(label).size(13.0).color(Color32::BLACK),
                                )
                                .anchor(egui::Align2::CENTER_BOTTOM),
                            );
                        }
                    });
            });
    }

    /// Draw the series summary table
    pub fn draw_summary_table(ui: &mut egui::Ui, summary: &SeriesSummary) {
        if summary.is_empty() {
            return;
        }

        let fmt = |v: f64| format!("{:.3}", v);
        let dash = || "-".to_string();

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new("series_summary")
                    .striped(true)
                    .min_col_width(70.0)
                    .spacing([8.0, 4.0])
                    .show(ui, |ui| {
                        for header in ["Years", "Total", "Mean", "Std", "Min", "Max"] {
                            ui.label(RichText::new(header).strong().size(11.0));
                        }
                        ui.end_row();

                        let cells = [
                            summary.count.to_string(),
                            fmt(summary.total),
                            summary.mean.map(fmt).unwrap_or_else(dash),
                            summary.std_dev.map(fmt).unwrap_or_else(dash),
                            summary
                                .min
                                .map(|p| format!("{} ({})", fmt(p.value), p.year))
                                .unwrap_or_else(dash),
                            summary
                                .max
                                .map(|p| format!("{} ({})", fmt(p.value), p.year))
                                .unwrap_or_else(dash),
                        ];
                        for cell in cells {
                            ui.label(RichText::new(cell).size(11.0));
                        }
                        ui.end_row();
                    });

                if summary.changes.is_empty() {
                    return;
                }

                ui.add_space(8.0);
                egui::Grid::new("series_changes")
                    .striped(true)
                    .min_col_width(70.0)
                    .spacing([8.0, 4.0])
                    .show(ui, |ui| {
                        ui.label(RichText::new("Year").strong().size(11.0));
                        ui.label(RichText::new("Crossings (MM)").strong().size(11.0));
                        ui.label(RichText::new("Change").strong().size(11.0));
                        ui.end_row();

                        let default_text_color = ui.visuals().text_color();
                        for change in &summary.changes {
                            ui.label(RichText::new(change.year.to_string()).size(11.0));
                            ui.label(RichText::new(fmt(change.value)).size(11.0));
                            match change.percent {
                                Some(p) => {
                                    let color = if p < 0.0 {
                                        Color32::from_rgb(220, 53, 69)
                                    } else if p > 0.0 {
                                        Color32::from_rgb(40, 167, 69)
                                    } else {
                                        default_text_color
                                    };
                                    ui.label(
                                        RichText::new(format!("{:+.1}%", p))
                                            .size(11.0)
                                            .color(color),
                                    );
                                }
                                None => {
                                    ui.label(RichText::new("-").size(11.0));
                                }
                            }
                            ui.end_row();
                        }
                    });
            });
    }
}
