//! Stats module - Summary statistics for the plotted series

mod summary;

pub use summary::{summarize, SeriesSummary};
