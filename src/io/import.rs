//! CSV import of recorded and synthetic series.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use super::SeriesSource;
use crate::config::DatasetConfig;
use crate::error::DatasetError;
use crate::pipeline::types::{Channel, Series};

/// Column name for `field` (0 or 1) of `channel`.
pub fn column_name(channel: usize, field: usize) -> String {
    format!("c{channel}_{field}")
}

/// Reads a series stored as CSV from any reader.
///
/// The header must list `c<ch>_<field>` for every channel and both fields in
/// order; the width is taken from the header. `what` and `path` only label
/// errors.
///
/// # Errors
///
/// Returns `Load` for a malformed header, a ragged row or an unparsable
/// number.
pub fn read_series<R: Read>(reader: R, what: &str, path: &Path) -> Result<Series, DatasetError> {
    let load_err = |reason: String| DatasetError::Load {
        what: what.to_string(),
        path: path.to_path_buf(),
        reason,
    };

    let mut rdr = csv::ReaderBuilder::new().from_reader(reader);
    let headers = rdr
        .headers()
        .map_err(|e| load_err(format!("cannot read header: {e}")))?
        .clone();

    if headers.is_empty() || headers.len() % 2 != 0 {
        return Err(load_err(format!(
            "expected an even, non-zero number of columns, got {}",
            headers.len()
        )));
    }
    for (i, name) in headers.iter().enumerate() {
        let expected = column_name(i / 2, i % 2);
        if name.trim() != expected {
            return Err(load_err(format!(
                "column {i} is \"{name}\", expected \"{expected}\""
            )));
        }
    }

    let width = headers.len() / 2;
    let mut series = Series::empty(width);
    let mut row: Vec<Channel> = Vec::with_capacity(width);
    for (row_num, result) in rdr.records().enumerate() {
        let record = result.map_err(|e| load_err(format!("row {row_num}: {e}")))?;
        row.clear();
        for ch in 0..width {
            let mut fields = [0.0; 2];
            for (f, slot) in fields.iter_mut().enumerate() {
                let raw = &record[ch * 2 + f];
                *slot = raw.trim().parse::<f64>().map_err(|e| {
                    load_err(format!("row {row_num} {}: \"{raw}\": {e}", column_name(ch, f)))
                })?;
            }
            row.push(fields);
        }
        series.push_row(&row)?;
    }
    Ok(series)
}

/// Reads a series from a CSV file.
///
/// # Errors
///
/// Returns `Load` if the file cannot be opened or parsed.
pub fn read_series_file(path: &Path, what: &str) -> Result<Series, DatasetError> {
    let file = File::open(path).map_err(|e| DatasetError::Load {
        what: what.to_string(),
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    read_series(std::io::BufReader::new(file), what, path)
}

/// File-backed [`SeriesSource`] resolving keys through the dataset config.
#[derive(Debug, Clone)]
pub struct CsvSource {
    houses: Vec<(String, PathBuf)>,
    synthetic: Vec<(String, PathBuf)>,
}

impl CsvSource {
    /// Resolves every house and synthetic path of `config` against its data
    /// root.
    pub fn from_config(config: &DatasetConfig) -> Self {
        Self {
            houses: config
                .houses
                .iter()
                .map(|h| (h.id.clone(), config.resolve_input(&h.path)))
                .collect(),
            synthetic: config
                .synthetic
                .iter()
                .map(|s| (s.appliance.clone(), config.resolve_input(&s.path)))
                .collect(),
        }
    }

    fn lookup<'a>(
        entries: &'a [(String, PathBuf)],
        key: &str,
        field: &str,
    ) -> Result<&'a Path, DatasetError> {
        entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, p)| p.as_path())
            .ok_or_else(|| DatasetError::config(field, format!("no path configured for \"{key}\"")))
    }
}

impl SeriesSource for CsvSource {
    fn load_house(&self, house: &str) -> Result<Series, DatasetError> {
        let path = Self::lookup(&self.houses, house, "houses")?;
        let series = read_series_file(path, &format!("house \"{house}\""))?;
        log::debug!("loaded {house}: {series} from {}", path.display());
        Ok(series)
    }

    fn load_synthetic(&self, appliance: &str) -> Result<Series, DatasetError> {
        let path = Self::lookup(&self.synthetic, appliance, "synthetic")?;
        let series = read_series_file(path, &format!("synthetic \"{appliance}\""))?;
        log::debug!("loaded synthetic {appliance}: {series} from {}", path.display());
        Ok(series)
    }
}
