//! Temporal repeater: replays a series while re-stamping every reading.

use super::clock::RunningClock;
use super::types::{Series, SeriesShape, TIMESTAMP_CHANNEL};
use crate::error::DatasetError;

/// Replays `series` `count` times, stamping each emitted reading from `clock`.
///
/// Passes are emitted back to back in original row order: all `n` rows of
/// pass 1, then all `n` rows of pass 2, and so on. For every emitted row the
/// clock advances one step and channel 0 becomes `[t, t]`; every other
/// channel is copied verbatim. Incoming timestamps are discarded.
///
/// # Arguments
///
/// * `series` - Source readings
/// * `count` - Number of full passes (must be >= 1)
/// * `shape` - Declared layout; `series.width()` must equal `shape.width()`
/// * `clock` - The run's clock, advanced once per emitted reading
///
/// # Errors
///
/// * `ShapeMismatch` if the series width does not match `shape`
/// * `Config` if `count` is zero
///
/// # Examples
///
/// ```
/// use nilm_augment::pipeline::clock::RunningClock;
/// use nilm_augment::pipeline::repeater::repeat;
/// use nilm_augment::pipeline::types::{Series, SeriesShape};
///
/// let src = Series::from_rows(3, [[[9.0, 9.0], [1.0, 0.0], [0.2, 0.0]]]).unwrap();
/// let mut clock = RunningClock::starting_at(0);
/// let out = repeat(&src, 3, SeriesShape::Synthetic, &mut clock).unwrap();
/// assert_eq!(out.timestamps().collect::<Vec<_>>(), vec![60.0, 120.0, 180.0]);
/// ```
pub fn repeat(
    series: &Series,
    count: u32,
    shape: SeriesShape,
    clock: &mut RunningClock,
) -> Result<Series, DatasetError> {
    if series.width() != shape.width() {
        return Err(DatasetError::shape(
            format!("{shape:?} series repeat"),
            shape.width(),
            series.width(),
        ));
    }
    if count == 0 {
        return Err(DatasetError::config("repeat_factors", "repeat count must be >= 1"));
    }

    let mut expanded = Series::with_capacity(series.width(), series.len() * count as usize);
    for _ in 0..count {
        for row in series.rows() {
            expanded.push_row(row)?;
            let t = clock.tick();
            if let Some(last) = expanded.last_row_mut() {
                last[TIMESTAMP_CHANNEL] = [t, t];
            }
        }
    }

    log::debug!(
        "repeated {} rows x{count} -> {} rows, clock at {}",
        series.len(),
        expanded.len(),
        clock.current()
    );
    Ok(expanded)
}
