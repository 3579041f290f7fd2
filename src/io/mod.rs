//! Persisted-array store: loading inputs and writing per-appliance outputs.

pub mod export;
pub mod import;

use crate::error::DatasetError;
use crate::pipeline::types::{ApplianceSeries, Series};

pub use export::CsvSink;
pub use import::CsvSource;

/// Source of recorded house series and synthetic appliance series.
pub trait SeriesSource {
    /// Loads the full recording of `house`.
    fn load_house(&self, house: &str) -> Result<Series, DatasetError>;

    /// Loads the synthetic series generated for `appliance`.
    fn load_synthetic(&self, appliance: &str) -> Result<Series, DatasetError>;
}

/// Destination for the finished per-appliance series.
pub trait SeriesSink {
    /// Persists every series of a completed run.
    ///
    /// Implementations should write all entries or none.
    fn write_all(&mut self, outputs: &ApplianceSeries) -> Result<(), DatasetError>;
}
