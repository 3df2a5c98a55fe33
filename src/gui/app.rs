//! Border Crossings Main Application
//! Main window with control panel and chart viewer.

use crate::charts::{self, export};
use crate::config::AppConfig;
use crate::data::{load_csv, Row, Selection, Session};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use egui::SidePanel;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};
use std::thread;
use tracing::{debug, error, info, warn};

/// CSV loading result from background thread
enum LoadResult {
    Progress(String),
    Complete { rows: Vec<Row>, source: PathBuf },
    Error(String),
}

/// Main application window.
pub struct CrossingsApp {
    config: AppConfig,
    session: Option<Session>,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,

    // Async CSV loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl CrossingsApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let mut app = Self {
            session: None,
            control_panel: ControlPanel::new(),
            chart_viewer: ChartViewer::new(),
            load_rx: None,
            is_loading: false,
            config,
        };
        let path = app.config.csv_path.clone();
        app.start_load(path);
        app
    }

    /// Handle CSV file selection
    fn handle_browse_csv(&mut self) {
        if self.is_loading {
            return;
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            self.start_load(path);
        }
    }

    /// Load a CSV in a background thread; results arrive through `load_rx`.
    fn start_load(&mut self, path: PathBuf) {
        info!(path = %path.display(), "loading dataset");

        // A new load replaces the session and everything derived from it
        self.session = None;
        self.chart_viewer.clear();
        self.control_panel.populate_years(&[]);
        self.control_panel.export_enabled = false;
        self.control_panel.csv_path = Some(path.clone());
        self.control_panel.set_status("Loading CSV file...");
        self.set_loading(true);

        let (tx, rx) = channel();
        self.load_rx = Some(rx);

        thread::spawn(move || {
            let _ = tx.send(LoadResult::Progress("Reading CSV file...".to_string()));

            match load_csv(&path) {
                Ok(rows) => {
                    let _ = tx.send(LoadResult::Complete { rows, source: path });
                }
                Err(e) => {
                    let _ = tx.send(LoadResult::Error(e.to_string()));
                }
            }
        });
    }

    /// Check for CSV loading results
    fn check_load_results(&mut self) {
        let rx = self.load_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    LoadResult::Progress(status) => {
                        self.control_panel.set_status(&status);
                    }
                    LoadResult::Complete { rows, source } => {
                        self.install_session(Session::new(rows).with_source(source));
                        self.set_loading(false);
                        should_keep_receiver = false;
                    }
                    LoadResult::Error(e) => {
                        error!(error = %e, "dataset load failed");
                        self.control_panel.set_status(&format!("Error: {}", e));
                        self.set_loading(false);
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.load_rx = Some(rx);
            }
        }
    }

    /// Populate the dropdown and draw the initial "All" chart when any year exists.
    fn install_session(&mut self, session: Session) {
        let years = session.years().to_vec();
        info!(
            rows = session.row_count(),
            years = years.len(),
            source = ?session.source(),
            "dataset loaded"
        );

        self.control_panel.populate_years(&years);
        self.control_panel.set_status(&format!(
            "Loaded {} rows, {} years",
            session.row_count(),
            years.len()
        ));
        let initial = session.initial_selection();
        self.session = Some(session);

        let Some(selection) = initial else {
            warn!("dataset has no years; skipping initial render");
            return;
        };

        // populate_years has already reset the dropdown to "All"
        self.render(selection);
    }

    /// Rebuild the chart for `selection` from the session dataset.
    fn render(&mut self, selection: Selection) {
        let Some(session) = &self.session else {
            return;
        };

        let chart = charts::render(session, selection);
        debug!(selection = %selection, points = chart.series.len(), "chart rendered");

        self.control_panel.export_enabled = !chart.spec.is_empty();
        self.chart_viewer.set_chart(chart);
    }

    /// Handle PNG export of the current chart
    fn handle_export_png(&mut self) {
        let Some(chart) = &self.chart_viewer.chart else {
            self.control_panel.set_status("No chart to export");
            return;
        };

        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name(format!("crossings_{}.png", chart.selection))
            .save_file()
        else {
            return;
        };

        let result = export::save_png(
            &chart.spec,
            &path,
            self.config.export_width,
            self.config.export_height,
        );
        self.finish_export(result, &path);
    }

    /// Handle JSON export of the current chart spec
    fn handle_export_json(&mut self) {
        let Some(chart) = &self.chart_viewer.chart else {
            self.control_panel.set_status("No chart to export");
            return;
        };

        let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name(format!("crossings_{}.json", chart.selection))
            .save_file()
        else {
            return;
        };

        let result = export::save_json(&chart.spec, &path);
        self.finish_export(result, &path);
    }

    fn finish_export(&mut self, result: Result<(), export::ExportError>, path: &Path) {
        match result {
            Ok(()) => {
                self.control_panel
                    .set_status(&format!("Exported {}", path.display()));
                if self.control_panel.open_after_export {
                    if let Err(e) = open::that(path) {
                        warn!(path = %path.display(), error = %e, "could not open exported file");
                    }
                }
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "export failed");
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }

    fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
        self.control_panel.is_loading = loading;
    }
}

impl eframe::App for CrossingsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for background results
        self.check_load_results();

        // Request repaint while loading
        if self.is_loading {
            ctx.request_repaint();
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(260.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);

                    match action {
                        ControlPanelAction::BrowseCsv => self.handle_browse_csv(),
                        ControlPanelAction::SelectionChanged(selection) => {
                            self.render(selection)
                        }
                        ControlPanelAction::ExportPng => self.handle_export_png(),
                        ControlPanelAction::ExportJson => self.handle_export_json(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}
