//! Augmentation engine: clock, repeater, aggregator, extractor, fuser and
//! the mode orchestrator that chains them.

pub mod aggregator;
/// Running clock for synthesized timestamps.
pub mod clock;
pub mod extractor;
pub mod fuser;
pub mod mode;
pub mod orchestrator;
/// Temporal repeater.
pub mod repeater;
pub mod types;

pub use aggregator::{RepeatFactors, aggregate};
pub use clock::RunningClock;
pub use extractor::extract;
pub use fuser::fuse;
pub use mode::{Mode, PipelinePlan};
pub use orchestrator::Orchestrator;
pub use repeater::repeat;
pub use types::{ApplianceSeries, Series, SeriesShape};
