//! Charts module - Chart specification, on-screen plotting and export

pub mod export;
mod plotter;
mod spec;

pub use plotter::ChartPlotter;
pub use spec::{render, RenderedChart};
