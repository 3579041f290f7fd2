//! Run summaries and shape reporting.

use std::fmt;

use crate::pipeline::mode::Mode;
use crate::pipeline::types::{ApplianceSeries, Series};

/// Receives the finished series of a run for observability.
pub trait Reporter {
    /// Called once per appliance after the sink accepted the outputs.
    fn report(&mut self, appliance: &str, series: &Series);
}

/// Reporter emitting one `info` log line per appliance.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn report(&mut self, appliance: &str, series: &Series) {
        log::info!("{appliance} shape: {series}");
    }
}

/// Row count and width of one output series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplianceSummary {
    pub appliance: String,
    pub rows: usize,
    pub width: usize,
}

/// Outcome of one completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub mode: Mode,
    pub appliances: Vec<ApplianceSummary>,
}

impl RunSummary {
    pub fn from_outputs(mode: Mode, outputs: &ApplianceSeries) -> Self {
        Self {
            mode,
            appliances: outputs
                .iter()
                .map(|(appliance, s)| ApplianceSummary {
                    appliance: appliance.to_string(),
                    rows: s.len(),
                    width: s.width(),
                })
                .collect(),
        }
    }

    /// Total rows across every appliance.
    pub fn total_rows(&self) -> usize {
        self.appliances.iter().map(|a| a.rows).sum()
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Dataset Report ({}) ---", self.mode)?;
        for a in &self.appliances {
            writeln!(f, "{}: rows={} channels={}", a.appliance, a.rows, a.width)?;
        }
        write!(f, "Total rows: {}", self.total_rows())
    }
}
