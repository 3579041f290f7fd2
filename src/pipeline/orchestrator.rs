//! Mode orchestrator: runs one augmentation pipeline end to end.

use super::aggregator::{RepeatFactors, aggregate};
use super::clock::RunningClock;
use super::extractor::extract;
use super::fuser::fuse;
use super::mode::Mode;
use super::types::{APPLIANCE_CHANNELS, ApplianceSeries};
use crate::config::DatasetConfig;
use crate::error::DatasetError;
use crate::io::{SeriesSink, SeriesSource};
use crate::reporting::{Reporter, RunSummary};

/// Owns the static inputs of a run: house order, repeat factors, synthetic
/// order and the clock baseline.
///
/// Every call to [`build`](Orchestrator::build) or [`run`](Orchestrator::run)
/// starts a fresh [`RunningClock`], so repeated runs are bit-identical.
#[derive(Debug, Clone)]
pub struct Orchestrator {
    houses: Vec<String>,
    factors: RepeatFactors,
    synthetic: Vec<String>,
    baseline_epoch_secs: i64,
}

impl Orchestrator {
    /// Creates an orchestrator from explicit inputs.
    ///
    /// # Arguments
    ///
    /// * `houses` - House identifiers in processing order
    /// * `factors` - Repeat factors used by modes that oversample
    /// * `synthetic` - Appliances to fuse synthetic data for, in fusion order
    /// * `baseline_epoch_secs` - Clock baseline
    pub fn new(
        houses: Vec<String>,
        factors: RepeatFactors,
        synthetic: Vec<String>,
        baseline_epoch_secs: i64,
    ) -> Self {
        Self {
            houses,
            factors,
            synthetic,
            baseline_epoch_secs,
        }
    }

    /// Creates an orchestrator from a configuration that already passed
    /// [`DatasetConfig::validate`].
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the clock baseline does not parse.
    pub fn from_config(config: &DatasetConfig) -> Result<Self, DatasetError> {
        let baseline = super::clock::parse_baseline(&config.clock.baseline)?;
        Ok(Self::new(
            config.house_ids(),
            config.factors(),
            config.synthetic_appliances(),
            baseline,
        ))
    }

    /// Computes the per-appliance series for `mode` without writing anything.
    ///
    /// Stage order on the clock is fixed: houses in order, every pass of a
    /// house before the next house, then synthetic appliances in order.
    ///
    /// # Errors
    ///
    /// Propagates any load, shape or config error; nothing partial is
    /// returned.
    pub fn build<S: SeriesSource + ?Sized>(
        &self,
        mode: Mode,
        source: &S,
    ) -> Result<ApplianceSeries, DatasetError> {
        let plan = mode.plan();
        let mut clock = RunningClock::starting_at(self.baseline_epoch_secs);

        let uniform = RepeatFactors::uniform();
        let factors = if plan.apply_repeat_factors {
            &self.factors
        } else {
            &uniform
        };

        let combined = aggregate(source, &self.houses, factors, &mut clock)?;
        let mut outputs = extract(&combined, APPLIANCE_CHANNELS)?;

        if plan.fuse_synthetic {
            let mut synthetic = ApplianceSeries::new();
            for appliance in &self.synthetic {
                synthetic.insert(appliance.clone(), source.load_synthetic(appliance)?);
            }
            outputs = fuse(outputs, &synthetic, &mut clock)?;
        }

        log::debug!("clock stamped {} readings", clock.emitted());
        Ok(outputs)
    }

    /// Runs `mode`, hands the result to `sink`, then reports every appliance.
    ///
    /// The sink is only called after the whole pipeline succeeded.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors and sink write errors.
    pub fn run<S, W, R>(
        &self,
        mode: Mode,
        source: &S,
        sink: &mut W,
        reporter: &mut R,
    ) -> Result<RunSummary, DatasetError>
    where
        S: SeriesSource + ?Sized,
        W: SeriesSink + ?Sized,
        R: Reporter + ?Sized,
    {
        log::info!("running {mode} mode ...");
        let outputs = self.build(mode, source)?;
        sink.write_all(&outputs)?;
        for (appliance, series) in outputs.iter() {
            reporter.report(appliance, series);
        }
        log::info!("{mode} mode completed");
        Ok(RunSummary::from_outputs(mode, &outputs))
    }
}
