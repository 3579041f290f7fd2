use chrono::NaiveDateTime;

use crate::config::ConfigError;

/// Seconds the clock advances for every emitted reading.
pub const STEP_SECS: i64 = 60;

/// Default baseline instant, interpreted as UTC.
pub const DEFAULT_BASELINE: &str = "2020-02-16 14:30:00";

/// Accepted baseline format.
pub const BASELINE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Running clock that stamps every reading emitted during one pipeline run.
///
/// Each [`tick`](RunningClock::tick) advances the clock by [`STEP_SECS`]
/// before returning, so the first emitted reading is stamped one step after
/// the baseline. The clock is neither `Clone` nor `Copy`; a run owns exactly
/// one and threads it by `&mut` through every stage that emits
/// readings.
///
/// # Examples
///
/// ```
/// use nilm_augment::pipeline::clock::RunningClock;
///
/// let mut clock = RunningClock::starting_at(1_000);
/// assert_eq!(clock.tick(), 1_060.0);
/// assert_eq!(clock.tick(), 1_120.0);
/// assert_eq!(clock.emitted(), 2);
/// ```
#[derive(Debug)]
pub struct RunningClock {
    /// Timestamp of the last emitted reading (or the baseline)
    current: i64,
    /// Readings stamped so far
    emitted: usize,
}

impl RunningClock {
    /// Creates a clock whose first tick lands at `baseline + STEP_SECS`.
    pub fn starting_at(baseline_epoch_secs: i64) -> Self {
        Self {
            current: baseline_epoch_secs,
            emitted: 0,
        }
    }

    /// Advances by one step and returns the new timestamp.
    pub fn tick(&mut self) -> f64 {
        self.current += STEP_SECS;
        self.emitted += 1;
        self.current as f64
    }

    /// Timestamp of the most recently emitted reading, or the baseline if
    /// nothing has been emitted yet.
    pub fn current(&self) -> f64 {
        self.current as f64
    }

    /// Number of readings stamped so far.
    pub fn emitted(&self) -> usize {
        self.emitted
    }
}

/// Parses a baseline instant into epoch seconds (UTC).
///
/// # Errors
///
/// Returns a `ConfigError` on `clock.baseline` if the string is not in
/// [`BASELINE_FORMAT`].
pub fn parse_baseline(baseline: &str) -> Result<i64, ConfigError> {
    NaiveDateTime::parse_from_str(baseline.trim(), BASELINE_FORMAT)
        .map(|dt| dt.and_utc().timestamp())
        .map_err(|e| ConfigError {
            field: "clock.baseline".to_string(),
            message: format!("cannot parse \"{baseline}\" as {BASELINE_FORMAT}: {e}"),
        })
}
