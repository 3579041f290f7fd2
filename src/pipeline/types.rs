//! Core dataset types: multi-channel series and per-appliance collections.

use std::fmt;

use crate::error::DatasetError;

/// Channel holding the synthesized epoch-seconds timestamp (both fields).
pub const TIMESTAMP_CHANNEL: usize = 0;
/// Whole-house aggregate channel (active, reactive).
pub const AGGREGATE_CHANNEL: usize = 1;
/// Channel width of a recorded house series.
pub const HOUSE_CHANNELS: usize = 5;
/// Channel width of a synthetic or extracted per-appliance series.
pub const SYNTHETIC_CHANNELS: usize = 3;

/// One channel of one reading: `[active, reactive]`, or `[t, t]` for the
/// timestamp channel.
pub type Channel = [f64; 2];

/// Fixed appliance-to-channel assignment of the recorded house data.
pub const APPLIANCE_CHANNELS: &[(&str, usize)] = &[
    ("air_conditioner", 2),
    ("shower", 3),
    ("refrigerator", 4),
];

/// Returns `true` if `name` is a key of [`APPLIANCE_CHANNELS`].
pub fn is_known_appliance(name: &str) -> bool {
    APPLIANCE_CHANNELS.iter().any(|(a, _)| *a == name)
}

/// Declared layout of a series handed to the repeater.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesShape {
    /// Full house recording: timestamp, aggregate and every appliance.
    House,
    /// Synthetic per-appliance recording: timestamp, aggregate, one appliance.
    Synthetic,
}

impl SeriesShape {
    /// Number of channels a series of this shape must have.
    pub fn width(self) -> usize {
        match self {
            SeriesShape::House => HOUSE_CHANNELS,
            SeriesShape::Synthetic => SYNTHETIC_CHANNELS,
        }
    }
}

/// An ordered sequence of readings, each `width` channels wide.
///
/// Stored row-major in one flat buffer, so a series of `n` rows holds
/// `n * width` channels.
///
/// # Examples
///
/// ```
/// use nilm_augment::pipeline::types::Series;
///
/// let s = Series::from_rows(3, [
///     [[0.0, 0.0], [1.0, 0.1], [0.5, 0.0]],
///     [[60.0, 60.0], [2.0, 0.2], [0.0, 0.0]],
/// ])
/// .unwrap();
/// assert_eq!(s.shape(), (2, 3, 2));
/// assert_eq!(s.timestamps().collect::<Vec<_>>(), vec![0.0, 60.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    width: usize,
    cells: Vec<Channel>,
}

impl Series {
    /// Creates an empty series of the given width.
    ///
    /// # Panics
    ///
    /// Panics if `width` is zero.
    pub fn empty(width: usize) -> Self {
        Self::with_capacity(width, 0)
    }

    /// Creates an empty series with room for `rows` readings.
    ///
    /// # Panics
    ///
    /// Panics if `width` is zero.
    pub fn with_capacity(width: usize, rows: usize) -> Self {
        assert!(width > 0, "series width must be > 0");
        Self {
            width,
            cells: Vec::with_capacity(width * rows),
        }
    }

    /// Builds a series from rows, checking every row against `width`.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if `width` is zero or any row has a different
    /// channel count.
    pub fn from_rows<R, I>(width: usize, rows: I) -> Result<Self, DatasetError>
    where
        R: AsRef<[Channel]>,
        I: IntoIterator<Item = R>,
    {
        if width == 0 {
            return Err(DatasetError::shape("series construction", 1, 0));
        }
        let mut series = Self::empty(width);
        for row in rows {
            series.push_row(row.as_ref())?;
        }
        Ok(series)
    }

    /// Number of channels per reading.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of readings.
    pub fn len(&self) -> usize {
        self.cells.len() / self.width
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Logical array shape `(rows, channels, 2)`.
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.len(), self.width, 2)
    }

    /// Returns reading `index`, or `None` past the end.
    pub fn row(&self, index: usize) -> Option<&[Channel]> {
        let start = index.checked_mul(self.width)?;
        self.cells.get(start..start + self.width)
    }

    /// Iterates readings in order.
    pub fn rows(&self) -> std::slice::ChunksExact<'_, Channel> {
        self.cells.chunks_exact(self.width)
    }

    /// Iterates the timestamp of every reading (field 0 of channel 0).
    pub fn timestamps(&self) -> impl Iterator<Item = f64> + '_ {
        self.rows().map(|row| row[TIMESTAMP_CHANNEL][0])
    }

    /// Appends one reading.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if `row` is not exactly `width` channels.
    pub fn push_row(&mut self, row: &[Channel]) -> Result<(), DatasetError> {
        if row.len() != self.width {
            return Err(DatasetError::shape("row append", self.width, row.len()));
        }
        self.cells.extend_from_slice(row);
        Ok(())
    }

    /// Concatenates `other` after `self`.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the two widths differ.
    pub fn append(&mut self, other: &Series) -> Result<(), DatasetError> {
        if other.width != self.width {
            return Err(DatasetError::shape("concatenation", self.width, other.width));
        }
        self.cells.extend_from_slice(&other.cells);
        Ok(())
    }

    /// Builds a new series from the given channel indices of every reading.
    ///
    /// Callers must have checked every index against `width`.
    pub(crate) fn select_channels(&self, channels: &[usize]) -> Series {
        let mut out = Series::with_capacity(channels.len(), self.len());
        for row in self.rows() {
            out.cells.extend(channels.iter().map(|&c| row[c]));
        }
        out
    }

    /// Mutable access used by the repeater to stamp emitted rows.
    pub(crate) fn last_row_mut(&mut self) -> Option<&mut [Channel]> {
        let len = self.cells.len();
        if len == 0 {
            return None;
        }
        self.cells.get_mut(len - self.width..)
    }
}

/// Per-appliance output series, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplianceSeries {
    entries: Vec<(String, Series)>,
}

impl ApplianceSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `series` under `appliance`, replacing any earlier entry in place.
    pub fn insert(&mut self, appliance: impl Into<String>, series: Series) {
        let appliance = appliance.into();
        match self.entries.iter_mut().find(|(name, _)| *name == appliance) {
            Some((_, slot)) => *slot = series,
            None => self.entries.push((appliance, series)),
        }
    }

    pub fn get(&self, appliance: &str) -> Option<&Series> {
        self.entries
            .iter()
            .find(|(name, _)| name == appliance)
            .map(|(_, s)| s)
    }

    pub fn get_mut(&mut self, appliance: &str) -> Option<&mut Series> {
        self.entries
            .iter_mut()
            .find(|(name, _)| name == appliance)
            .map(|(_, s)| s)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appliance names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Series)> {
        self.entries.iter().map(|(name, s)| (name.as_str(), s))
    }
}

impl IntoIterator for ApplianceSeries {
    type Item = (String, Series);
    type IntoIter = std::vec::IntoIter<(String, Series)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl FromIterator<(String, Series)> for ApplianceSeries {
    fn from_iter<T: IntoIterator<Item = (String, Series)>>(iter: T) -> Self {
        let mut out = Self::new();
        for (name, series) in iter {
            out.insert(name, series);
        }
        out
    }
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (rows, width, fields) = self.shape();
        write!(f, "({rows}, {width}, {fields})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row3(t: f64, agg: f64, app: f64) -> [Channel; 3] {
        [[t, t], [agg, agg / 10.0], [app, 0.0]]
    }

    #[test]
    fn from_rows_rejects_wrong_width() {
        let rows: Vec<Vec<Channel>> = vec![vec![[0.0, 0.0]; 3], vec![[0.0, 0.0]; 2]];
        let err = Series::from_rows(3, rows).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::ShapeMismatch {
                expected: 3,
                got: 2,
                ..
            }
        ));
    }

    #[test]
    fn rows_and_len_agree() {
        let s = Series::from_rows(3, [row3(0.0, 1.0, 0.5), row3(60.0, 2.0, 0.0)]).unwrap();
        assert_eq!(s.len(), 2);
        assert_eq!(s.rows().count(), 2);
        assert_eq!(s.row(1).map(|r| r[1][0]), Some(2.0));
        assert!(s.row(2).is_none());
    }

    #[test]
    fn append_checks_width() {
        let mut a = Series::empty(3);
        let b = Series::empty(5);
        assert!(a.append(&b).is_err());
        let c = Series::from_rows(3, [row3(1.0, 1.0, 1.0)]).unwrap();
        a.append(&c).unwrap();
        assert_eq!(a.len(), 1);
    }

    #[test]
    fn select_channels_keeps_values() {
        let s = Series::from_rows(3, [row3(5.0, 7.0, 9.0)]).unwrap();
        let picked = s.select_channels(&[0, 2]);
        assert_eq!(picked.width(), 2);
        assert_eq!(picked.row(0), Some(&[[5.0, 5.0], [9.0, 0.0]][..]));
    }

    #[test]
    fn empty_series_has_zero_rows() {
        let s = Series::empty(5);
        assert!(s.is_empty());
        assert_eq!(s.shape(), (0, 5, 2));
        assert_eq!(s.to_string(), "(0, 5, 2)");
    }

    #[test]
    fn appliance_series_preserves_insertion_order() {
        let mut map = ApplianceSeries::new();
        map.insert("shower", Series::empty(3));
        map.insert("air_conditioner", Series::empty(3));
        map.insert("shower", Series::from_rows(3, [row3(0.0, 0.0, 0.0)]).unwrap());
        assert_eq!(map.names().collect::<Vec<_>>(), vec!["shower", "air_conditioner"]);
        assert_eq!(map.get("shower").map(Series::len), Some(1));
    }

    #[test]
    fn shape_widths() {
        assert_eq!(SeriesShape::House.width(), 5);
        assert_eq!(SeriesShape::Synthetic.width(), 3);
        assert!(is_known_appliance("refrigerator"));
        assert!(!is_known_appliance("toaster"));
    }
}
