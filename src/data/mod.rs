//! Data module - CSV loading, selection and aggregation

mod aggregate;
pub mod loader;
mod selection;
mod session;

pub use aggregate::{aggregate, AggregatedSeries};
pub use loader::{load_csv, Row};
pub use selection::{Selection, YearSelector};
pub use session::Session;
