//! CSV export of per-appliance series.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::SeriesSink;
use super::import::column_name;
use crate::error::DatasetError;
use crate::pipeline::types::{ApplianceSeries, Series};

/// Writes a series as CSV to any writer.
///
/// One header row of `c<ch>_<field>` names, then one row per reading. Values
/// use the shortest representation that parses back to the same `f64`, so
/// output is deterministic and lossless.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_series(series: &Series, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    let header: Vec<String> = (0..series.width())
        .flat_map(|ch| [column_name(ch, 0), column_name(ch, 1)])
        .collect();
    wtr.write_record(&header)?;

    let mut record: Vec<String> = Vec::with_capacity(series.width() * 2);
    for row in series.rows() {
        record.clear();
        record.extend(row.iter().flat_map(|c| [c[0].to_string(), c[1].to_string()]));
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes a series to a CSV file, creating parent directories.
///
/// # Errors
///
/// Returns an `io::Error` if directory creation, file creation or writing
/// fails.
pub fn export_series(series: &Series, path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    write_series(series, io::BufWriter::new(file))
}

/// File-backed [`SeriesSink`] writing `<dir>/<prefix><appliance>.csv`.
///
/// Every file is first staged next to its destination and only renamed into
/// place once all of them were written, so a failed write leaves earlier
/// outputs untouched. Existing outputs are overwritten. If a rename fails,
/// files renamed before it stay replaced and the remaining staged files are
/// removed.
#[derive(Debug, Clone)]
pub struct CsvSink {
    dir: PathBuf,
    prefix: String,
}

impl CsvSink {
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
        }
    }

    /// Destination file for `appliance`.
    pub fn path_for(&self, appliance: &str) -> PathBuf {
        self.dir.join(format!("{}{appliance}.csv", self.prefix))
    }

    fn staged_path(path: &Path) -> PathBuf {
        let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        path.with_file_name(name)
    }
}

/// Removes staged files that will not be renamed into place.
fn discard(staged: &[(PathBuf, PathBuf)]) {
    for (tmp, _) in staged {
        if let Err(e) = fs::remove_file(tmp) {
            log::warn!("could not remove staged file {}: {e}", tmp.display());
        }
    }
}

impl SeriesSink for CsvSink {
    fn write_all(&mut self, outputs: &ApplianceSeries) -> Result<(), DatasetError> {
        let mut staged: Vec<(PathBuf, PathBuf)> = Vec::with_capacity(outputs.len());

        for (appliance, series) in outputs.iter() {
            let dest = self.path_for(appliance);
            let tmp = Self::staged_path(&dest);
            if let Err(source) = export_series(series, &tmp) {
                if tmp.is_file() {
                    discard(&[(tmp, dest.clone())]);
                }
                discard(&staged);
                return Err(DatasetError::Write { path: dest, source });
            }
            staged.push((tmp, dest));
        }

        for (i, (tmp, dest)) in staged.iter().enumerate() {
            if let Err(source) = fs::rename(tmp, dest) {
                discard(&staged[i..]);
                return Err(DatasetError::Write {
                    path: dest.clone(),
                    source,
                });
            }
            log::debug!("wrote {}", dest.display());
        }
        Ok(())
    }
}
