//! Channel extractor: splits a combined house series per appliance.

use super::types::{AGGREGATE_CHANNEL, ApplianceSeries, Series, TIMESTAMP_CHANNEL};
use crate::error::DatasetError;

/// Selects `[timestamp, aggregate, appliance]` from every reading, once per
/// entry of `channels`, preserving row order and values.
///
/// Pure: never touches the clock. Only indices are checked; appliance names
/// are taken as given.
///
/// # Errors
///
/// Returns `ShapeMismatch` if an index is not an appliance channel of
/// `combined` (i.e. outside `2..width`).
pub fn extract(
    combined: &Series,
    channels: &[(&str, usize)],
) -> Result<ApplianceSeries, DatasetError> {
    let mut out = ApplianceSeries::new();
    for &(appliance, index) in channels {
        if index <= AGGREGATE_CHANNEL || index >= combined.width() {
            return Err(DatasetError::shape(
                format!("extracting \"{appliance}\" at channel {index}"),
                combined.width(),
                index + 1,
            ));
        }
        let series = combined.select_channels(&[TIMESTAMP_CHANNEL, AGGREGATE_CHANNEL, index]);
        out.insert(appliance, series);
    }
    Ok(out)
}
