//! Application configuration: defaults, environment overrides, then the
//! first positional argument as the CSV path.

use anyhow::{Context, Result};
use std::path::PathBuf;

pub const DEFAULT_CSV_PATH: &str = "static/data/Border_Crossing_Entry_Data.csv";

pub const ENV_CSV_PATH: &str = "CROSSINGS_CSV";
pub const ENV_EXPORT_WIDTH: &str = "CROSSINGS_EXPORT_WIDTH";
pub const ENV_EXPORT_HEIGHT: &str = "CROSSINGS_EXPORT_HEIGHT";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub csv_path: PathBuf,
    /// PNG export size in pixels
    pub export_width: u32,
    pub export_height: u32,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from(DEFAULT_CSV_PATH),
            export_width: 1400,
            export_height: 1000,
            window_size: [1200.0, 800.0],
            min_window_size: [900.0, 600.0],
        }
    }
}

impl AppConfig {
    /// Build from the process environment and command line.
    pub fn load() -> Result<Self> {
        Self::from_sources(|key| std::env::var(key).ok(), std::env::args().skip(1))
    }

    pub fn from_sources<E, A>(env: E, args: A) -> Result<Self>
    where
        E: Fn(&str) -> Option<String>,
        A: IntoIterator<Item = String>,
    {
        let mut config = Self::default();

        if let Some(path) = env(ENV_CSV_PATH).filter(|p| !p.trim().is_empty()) {
            config.csv_path = PathBuf::from(path);
        }
        if let Some(width) = env(ENV_EXPORT_WIDTH) {
            config.export_width = parse_dimension(ENV_EXPORT_WIDTH, &width)?;
        }
        if let Some(height) = env(ENV_EXPORT_HEIGHT) {
            config.export_height = parse_dimension(ENV_EXPORT_HEIGHT, &height)?;
        }

        if let Some(path) = args.into_iter().find(|a| !a.starts_with('-')) {
            config.csv_path = PathBuf::from(path);
        }

        Ok(config)
    }
}

fn parse_dimension(key: &str, text: &str) -> Result<u32> {
    let value: u32 = text
        .trim()
        .parse()
        .with_context(|| format!("{} must be a positive integer, got '{}'", key, text))?;
    anyhow::ensure!(value > 0, "{} must be greater than zero", key);
    Ok(value)
}
