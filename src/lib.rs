//! Training-set builder for appliance-level energy disaggregation.
//!
//! Aggregates per-house multi-channel power recordings, oversamples houses by
//! replaying them under a collision-free synthetic clock, splits the result
//! per appliance and optionally appends synthetic appliance data.

pub mod cli;
pub mod config;
pub mod error;
/// CSV-backed series store.
pub mod io;
pub mod pipeline;
pub mod reporting;

pub use error::DatasetError;
