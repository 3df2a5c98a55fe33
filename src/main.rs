//! Border Crossings Viewer - yearly border crossing totals as an interactive chart
//!
//! Loads the border crossing CSV, lets the user pick a year and plots
//! total crossings per year in millions.

mod charts;
mod config;
mod data;
mod gui;
mod stats;

use config::AppConfig;
use eframe::egui;
use gui::CrossingsApp;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> anyhow::Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let config = AppConfig::load()?;
    tracing::info!(csv = %config.csv_path.display(), "startup");

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size)
            .with_title("Border Crossings"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Border Crossings",
        options,
        Box::new(move |cc| Ok(Box::new(CrossingsApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("window error: {}", e))
}
