//! Chart Viewer Widget
//! Central panel showing the current crossings chart and its summary.

use crate::charts::{ChartPlotter, RenderedChart};
use crate::stats::{summarize, SeriesSummary};
use egui::{Color32, RichText, ScrollArea};

const MIN_CHART_HEIGHT: f32 = 320.0;
const SUMMARY_RESERVE: f32 = 220.0;

/// Holds at most one chart; each render replaces the previous one wholesale.
#[derive(Default)]
pub struct ChartViewer {
    pub chart: Option<RenderedChart>,
    summary: SeriesSummary,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.chart = None;
        self.summary = SeriesSummary::default();
    }

    pub fn set_chart(&mut self, chart: RenderedChart) {
        self.summary = summarize(&chart.series);
        self.chart = Some(chart);
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        let Some(chart) = &self.chart else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        let chart_height = (ui.available_height() - SUMMARY_RESERVE).max(MIN_CHART_HEIGHT);

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                egui::Frame::none()
                    .rounding(8.0)
                    .stroke(egui::Stroke::new(2.0, Color32::from_rgb(0, 90, 139)))
                    .fill(ui.visuals().widgets.noninteractive.bg_fill)
                    .inner_margin(12.0)
                    .show(ui, |ui| {
                        ui.vertical_centered(|ui| {
                            ui.label(RichText::new(chart.spec.layout.title).size(18.0).strong());
                            ui.label(
                                RichText::new(format!("Showing: {}", chart.selection))
                                    .size(12.0)
                                    .color(Color32::GRAY),
                            );
                        });
                        ui.add_space(8.0);

                        ChartPlotter::draw_line_chart(ui, &chart.spec, chart_height);

                        ui.add_space(10.0);
                        ui.label(RichText::new("Summary (millions)").size(14.0).strong());
                        ChartPlotter::draw_summary_table(ui, &self.summary);
                    });
            });
    }
}
