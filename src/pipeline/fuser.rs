//! Synthetic fuser: appends re-stamped synthetic readings after real ones.

use super::clock::RunningClock;
use super::repeater::repeat;
use super::types::{ApplianceSeries, SeriesShape};
use crate::error::DatasetError;

/// Appends each synthetic series after the real series of the same appliance.
///
/// Synthetic entries are processed in their own order; each is repeated once
/// through the run's clock, so its readings are stamped strictly after
/// everything emitted before it, including earlier synthetic appliances.
/// Real readings always come first; appliances without a synthetic entry pass
/// through unchanged, and the output keeps the order of `real`.
///
/// # Errors
///
/// * `Config` if a synthetic entry names an appliance absent from `real`
/// * `ShapeMismatch` if a synthetic series is not 3 channels wide
pub fn fuse(
    mut real: ApplianceSeries,
    synthetic: &ApplianceSeries,
    clock: &mut RunningClock,
) -> Result<ApplianceSeries, DatasetError> {
    for (appliance, synth) in synthetic.iter() {
        let Some(target) = real.get_mut(appliance) else {
            return Err(DatasetError::config(
                "synthetic",
                format!("no extracted series for appliance \"{appliance}\""),
            ));
        };
        let stamped = repeat(synth, 1, SeriesShape::Synthetic, clock).map_err(|e| match e {
            DatasetError::ShapeMismatch { expected, got, .. } => {
                DatasetError::shape(format!("synthetic \"{appliance}\""), expected, got)
            }
            other => other,
        })?;
        log::debug!(
            "fusing {} synthetic rows after {} real rows for {appliance}",
            stamped.len(),
            target.len()
        );
        target.append(&stamped)?;
    }
    Ok(real)
}
