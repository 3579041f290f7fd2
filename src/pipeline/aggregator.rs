//! Source aggregator: loads, repeats and concatenates houses in order.

use super::clock::RunningClock;
use super::repeater::repeat;
use super::types::{HOUSE_CHANNELS, Series, SeriesShape};
use crate::error::DatasetError;
use crate::io::SeriesSource;

/// Per-house oversampling multipliers, kept in insertion order.
///
/// Houses without an entry repeat once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepeatFactors {
    entries: Vec<(String, u32)>,
}

impl RepeatFactors {
    /// Every house repeats once.
    pub fn uniform() -> Self {
        Self::default()
    }

    /// Builds a factor list from `(house, factor)` pairs.
    pub fn from_pairs<S: Into<String>>(pairs: impl IntoIterator<Item = (S, u32)>) -> Self {
        Self {
            entries: pairs.into_iter().map(|(h, f)| (h.into(), f)).collect(),
        }
    }

    /// Repeat count for `house`, defaulting to 1.
    pub fn get(&self, house: &str) -> u32 {
        self.entries
            .iter()
            .find(|(h, _)| h == house)
            .map_or(1, |(_, f)| *f)
    }
}

/// Loads every house in `houses` order, repeats it by its factor and
/// concatenates the results into one series.
///
/// House order is never changed: the first house listed receives the earliest
/// synthesized timestamps. Each house occupies one contiguous block of
/// `len * factor` rows.
///
/// # Errors
///
/// Any load or shape failure aborts the whole aggregation; no partial series
/// is returned.
pub fn aggregate<S: SeriesSource + ?Sized>(
    source: &S,
    houses: &[String],
    factors: &RepeatFactors,
    clock: &mut RunningClock,
) -> Result<Series, DatasetError> {
    let mut combined = Series::empty(HOUSE_CHANNELS);
    for house in houses {
        let factor = factors.get(house);
        log::info!("processing house {house} (x{factor}) ...");
        let data = source.load_house(house)?;
        let expanded = repeat(&data, factor, SeriesShape::House, clock).map_err(|e| match e {
            DatasetError::ShapeMismatch { expected, got, .. } => {
                DatasetError::shape(format!("house \"{house}\""), expected, got)
            }
            other => other,
        })?;
        combined.append(&expanded)?;
    }
    Ok(combined)
}
