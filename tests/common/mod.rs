//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::path::Path;

use nilm_augment::DatasetError;
use nilm_augment::io::SeriesSource;
use nilm_augment::io::export::export_series;
use nilm_augment::pipeline::types::{Channel, Series};

/// Baseline used across tests (`2020-02-16 14:30:00` UTC).
pub const BASELINE: i64 = 1_581_863_400;

/// In-memory source keyed by house id and appliance name.
#[derive(Default)]
pub struct MemorySource {
    pub houses: Vec<(String, Series)>,
    pub synthetic: Vec<(String, Series)>,
}

impl MemorySource {
    pub fn with_house(mut self, id: &str, series: Series) -> Self {
        self.houses.push((id.to_string(), series));
        self
    }

    pub fn with_synthetic(mut self, appliance: &str, series: Series) -> Self {
        self.synthetic.push((appliance.to_string(), series));
        self
    }
}

fn not_found(what: String) -> DatasetError {
    DatasetError::Load {
        path: what.clone().into(),
        what,
        reason: "not in memory source".to_string(),
    }
}

impl SeriesSource for MemorySource {
    fn load_house(&self, house: &str) -> Result<Series, DatasetError> {
        self.houses
            .iter()
            .find(|(h, _)| h == house)
            .map(|(_, s)| s.clone())
            .ok_or_else(|| not_found(format!("house \"{house}\"")))
    }

    fn load_synthetic(&self, appliance: &str) -> Result<Series, DatasetError> {
        self.synthetic
            .iter()
            .find(|(a, _)| a == appliance)
            .map(|(_, s)| s.clone())
            .ok_or_else(|| not_found(format!("synthetic \"{appliance}\"")))
    }
}

/// 5-channel house recording whose values encode `(tag, row)` so rows can be
/// traced back to their origin. Recorded timestamps are all -7.
pub fn house_series(rows: usize, tag: f64) -> Series {
    let data: Vec<[Channel; 5]> = (0..rows)
        .map(|i| {
            let v = tag * 1000.0 + i as f64;
            [
                [-7.0, -7.0],
                [v, v / 10.0],
                [v + 0.2, 0.02],
                [v + 0.3, 0.03],
                [v + 0.4, 0.04],
            ]
        })
        .collect();
    Series::from_rows(5, data).expect("house fixture is 5 wide")
}

/// 3-channel synthetic series tagged like [`house_series`].
pub fn synthetic_series(rows: usize, tag: f64) -> Series {
    let data: Vec<[Channel; 3]> = (0..rows)
        .map(|i| {
            let v = tag * 1000.0 + i as f64;
            [[0.0, 0.0], [v, 0.5], [v + 0.9, 0.09]]
        })
        .collect();
    Series::from_rows(3, data).expect("synthetic fixture is 3 wide")
}

/// Asserts every consecutive timestamp pair differs by exactly 60 s.
pub fn assert_sixty_second_steps(timestamps: &[f64]) {
    for w in timestamps.windows(2) {
        assert_eq!(w[1] - w[0], 60.0, "non-60s step between {} and {}", w[0], w[1]);
    }
}

/// Writes `series` as CSV under `root/rel`.
pub fn write_fixture(root: &Path, rel: &str, series: &Series) {
    export_series(series, &root.join(rel)).expect("fixture should be written");
}
