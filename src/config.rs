//! TOML-based dataset configuration and eval-set presets.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::pipeline::aggregator::RepeatFactors;
use crate::pipeline::clock::{DEFAULT_BASELINE, parse_baseline};
use crate::pipeline::types::{APPLIANCE_CHANNELS, is_known_appliance};

/// Top-level dataset configuration parsed from TOML.
///
/// Missing tables take their defaults. Load from TOML with
/// [`DatasetConfig::from_toml_file`] or start from a preset with
/// [`DatasetConfig::from_preset`].
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatasetConfig {
    /// Where relative input paths are resolved.
    #[serde(default)]
    pub data: DataConfig,
    /// Houses to aggregate, in processing order.
    #[serde(default)]
    pub houses: Vec<HouseEntry>,
    /// Oversampling factors; houses without an entry repeat once.
    #[serde(default)]
    pub repeat_factors: Vec<FactorEntry>,
    /// Synthetic appliance series, in fusion order.
    #[serde(default)]
    pub synthetic: Vec<SyntheticEntry>,
    /// Output location.
    #[serde(default)]
    pub output: OutputConfig,
    /// Timestamp synthesis.
    #[serde(default)]
    pub clock: ClockConfig,
}

/// Input data location.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DataConfig {
    /// Base directory for relative house and synthetic paths.
    pub root: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("data"),
        }
    }
}

/// One recorded house.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct HouseEntry {
    /// House identifier.
    pub id: String,
    /// CSV file with the 5-channel recording.
    pub path: PathBuf,
}

/// Oversampling factor of one house.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FactorEntry {
    /// House identifier; must name a configured house.
    pub house: String,
    /// Number of full passes (>= 1).
    pub factor: u32,
}

/// Synthetic series of one appliance.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SyntheticEntry {
    /// Appliance name; must be a known appliance channel.
    pub appliance: String,
    /// CSV file with the 3-channel synthetic series.
    pub path: PathBuf,
}

/// Output location.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Directory receiving one file per appliance (created if missing).
    pub dir: PathBuf,
    /// File name prefix; appliance `a` is written to `<dir>/<prefix><a>.csv`.
    pub prefix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("output"),
            prefix: "train_".to_string(),
        }
    }
}

/// Timestamp synthesis parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClockConfig {
    /// Baseline instant (`YYYY-MM-DD HH:MM:SS`, UTC); the first emitted
    /// reading is stamped one step later.
    pub baseline: String,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            baseline: DEFAULT_BASELINE.to_string(),
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"repeat_factors[0].factor"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

fn house(id: &str) -> HouseEntry {
    HouseEntry {
        id: id.to_string(),
        path: PathBuf::from(id).join(format!("{id}_train.csv")),
    }
}

fn factor(house: &str, factor: u32) -> FactorEntry {
    FactorEntry {
        house: house.to_string(),
        factor,
    }
}

fn default_synthetic() -> Vec<SyntheticEntry> {
    APPLIANCE_CHANNELS
        .iter()
        .map(|(appliance, _)| SyntheticEntry {
            appliance: appliance.to_string(),
            path: PathBuf::from("casa_simulada").join(format!("train_{appliance}.csv")),
        })
        .collect()
}

impl DatasetConfig {
    /// Available preset names.
    pub const PRESETS: &[&str] = &["hard", "simple"];

    /// Hard evaluation split: three training houses.
    pub fn hard_eval() -> Self {
        Self {
            data: DataConfig::default(),
            houses: vec![house("casa_igor"), house("casa_anderson"), house("casa_leandro")],
            repeat_factors: vec![
                factor("casa_igor", 40),
                factor("casa_anderson", 35),
                factor("casa_leandro", 22),
            ],
            synthetic: default_synthetic(),
            output: OutputConfig::default(),
            clock: ClockConfig::default(),
        }
    }

    /// Simple evaluation split: five training houses.
    pub fn simple_eval() -> Self {
        Self {
            houses: vec![
                house("casa_andrey"),
                house("casa_igor"),
                house("casa_anderson"),
                house("casa_leandro"),
                house("casa_diego"),
            ],
            repeat_factors: vec![
                factor("casa_andrey", 35),
                factor("casa_diego", 6),
                factor("casa_igor", 25),
                factor("casa_anderson", 20),
                factor("casa_leandro", 18),
            ],
            ..Self::hard_eval()
        }
    }

    /// Loads a configuration from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "hard" => Ok(Self::hard_eval()),
            "simple" => Ok(Self::simple_eval()),
            _ => Err(ConfigError::new(
                "eval_set",
                format!(
                    "unknown eval set \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a configuration from a TOML file.
    ///
    /// Relative `data.root` and `output.dir` values stay relative to the
    /// working directory, not to the file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("config", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Resolves an input path against `data.root` unless it is absolute.
    pub fn resolve_input(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.data.root.join(path)
        }
    }

    /// House identifiers in processing order.
    pub fn house_ids(&self) -> Vec<String> {
        self.houses.iter().map(|h| h.id.clone()).collect()
    }

    /// Configured repeat factors.
    pub fn factors(&self) -> RepeatFactors {
        RepeatFactors::from_pairs(
            self.repeat_factors
                .iter()
                .map(|f| (f.house.clone(), f.factor)),
        )
    }

    /// Appliances with a synthetic series, in fusion order.
    pub fn synthetic_appliances(&self) -> Vec<String> {
        self.synthetic.iter().map(|s| s.appliance.clone()).collect()
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.houses.is_empty() {
            errors.push(ConfigError::new("houses", "must list at least one house"));
        }
        let mut seen = HashSet::new();
        for (i, h) in self.houses.iter().enumerate() {
            if h.id.trim().is_empty() {
                errors.push(ConfigError::new(format!("houses[{i}].id"), "must not be empty"));
            } else if !seen.insert(h.id.as_str()) {
                errors.push(ConfigError::new(
                    format!("houses[{i}].id"),
                    format!("duplicate house \"{}\"", h.id),
                ));
            }
        }

        let mut seen_factors = HashSet::new();
        for (i, f) in self.repeat_factors.iter().enumerate() {
            if f.factor == 0 {
                errors.push(ConfigError::new(
                    format!("repeat_factors[{i}].factor"),
                    "must be >= 1",
                ));
            }
            if !seen.contains(f.house.as_str()) {
                errors.push(ConfigError::new(
                    format!("repeat_factors[{i}].house"),
                    format!("unknown house \"{}\"", f.house),
                ));
            }
            if !seen_factors.insert(f.house.as_str()) {
                errors.push(ConfigError::new(
                    format!("repeat_factors[{i}].house"),
                    format!("duplicate factor for \"{}\"", f.house),
                ));
            }
        }

        let mut seen_synthetic = HashSet::new();
        for (i, s) in self.synthetic.iter().enumerate() {
            if !is_known_appliance(&s.appliance) {
                errors.push(ConfigError::new(
                    format!("synthetic[{i}].appliance"),
                    format!(
                        "unknown appliance \"{}\", available: {}",
                        s.appliance,
                        APPLIANCE_CHANNELS
                            .iter()
                            .map(|(a, _)| *a)
                            .collect::<Vec<_>>()
                            .join(", ")
                    ),
                ));
            }
            if !seen_synthetic.insert(s.appliance.as_str()) {
                errors.push(ConfigError::new(
                    format!("synthetic[{i}].appliance"),
                    format!("duplicate synthetic series for \"{}\"", s.appliance),
                ));
            }
        }

        if self.output.dir.as_os_str().is_empty() {
            errors.push(ConfigError::new("output.dir", "must not be empty"));
        }
        if self.output.prefix.is_empty() {
            errors.push(ConfigError::new("output.prefix", "must not be empty"));
        }

        if let Err(e) = parse_baseline(&self.clock.baseline) {
            errors.push(e);
        }

        errors
    }
}
