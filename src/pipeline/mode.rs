//! Augmentation modes and the pipeline plan each one selects.

use std::fmt;
use std::str::FromStr;

use crate::config::ConfigError;

/// Which augmentation pipeline to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Plain aggregation: every house once.
    #[default]
    Default,
    /// Oversample houses by their repeat factors.
    RandomAssign,
    /// Plain aggregation followed by synthetic fusion.
    SyntheticModelling,
    /// Oversampling followed by synthetic fusion.
    Merged,
}

/// Optional stages enabled for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelinePlan {
    /// Repeat each house by its configured factor instead of once.
    pub apply_repeat_factors: bool,
    /// Append synthetic appliance data after extraction.
    pub fuse_synthetic: bool,
}

impl Mode {
    /// All modes, in CLI listing order.
    pub const ALL: [Mode; 4] = [
        Mode::Default,
        Mode::RandomAssign,
        Mode::SyntheticModelling,
        Mode::Merged,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Mode::Default => "default",
            Mode::RandomAssign => "random_assign",
            Mode::SyntheticModelling => "synthetic_modelling",
            Mode::Merged => "merged",
        }
    }

    pub fn plan(self) -> PipelinePlan {
        let (apply_repeat_factors, fuse_synthetic) = match self {
            Mode::Default => (false, false),
            Mode::RandomAssign => (true, false),
            Mode::SyntheticModelling => (false, true),
            Mode::Merged => (true, true),
        };
        PipelinePlan {
            apply_repeat_factors,
            fuse_synthetic,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.replace('-', "_");
        Mode::ALL
            .into_iter()
            .find(|m| m.name() == normalized)
            .ok_or_else(|| ConfigError {
                field: "mode".to_string(),
                message: format!(
                    "unknown mode \"{s}\", available: {}",
                    Mode::ALL.map(Mode::name).join(", ")
                ),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plans_match_mode_table() {
        assert_eq!(
            Mode::Default.plan(),
            PipelinePlan {
                apply_repeat_factors: false,
                fuse_synthetic: false
            }
        );
        assert!(Mode::RandomAssign.plan().apply_repeat_factors);
        assert!(!Mode::RandomAssign.plan().fuse_synthetic);
        assert!(!Mode::SyntheticModelling.plan().apply_repeat_factors);
        assert!(Mode::SyntheticModelling.plan().fuse_synthetic);
        assert!(Mode::Merged.plan().apply_repeat_factors && Mode::Merged.plan().fuse_synthetic);
    }

    #[test]
    fn parses_names_and_dashed_forms() {
        for mode in Mode::ALL {
            assert_eq!(mode.name().parse::<Mode>().ok(), Some(mode));
        }
        assert_eq!("random-assign".parse::<Mode>().ok(), Some(Mode::RandomAssign));
    }

    #[test]
    fn unknown_mode_is_config_error() {
        let err = "signal_transform".parse::<Mode>().unwrap_err();
        assert_eq!(err.field, "mode");
        assert!(err.message.contains("unknown mode"));
    }
}
