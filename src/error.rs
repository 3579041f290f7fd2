//! Crate-wide error type.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

/// Fatal conditions raised while building or writing a dataset.
///
/// The first error ends the run; nothing is retried.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// A house or synthetic series could not be read or parsed.
    #[error("load error: {what} ({}): {reason}", .path.display())]
    Load {
        /// What was being loaded, e.g. `house "casa_igor"`.
        what: String,
        /// Location of the artifact.
        path: PathBuf,
        /// Underlying cause.
        reason: String,
    },
    /// A series does not have the channel width its caller declared.
    #[error("shape mismatch in {context}: expected {expected} channels, got {got}")]
    ShapeMismatch {
        context: String,
        expected: usize,
        got: usize,
    },
    /// Invalid or conflicting configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// An output file could not be written.
    #[error("write error: {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DatasetError {
    pub(crate) fn shape(context: impl Into<String>, expected: usize, got: usize) -> Self {
        Self::ShapeMismatch {
            context: context.into(),
            expected,
            got,
        }
    }

    pub(crate) fn config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Config(ConfigError {
            field: field.into(),
            message: message.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_mismatch_message_names_both_widths() {
        let err = DatasetError::shape("house \"a\"", 5, 4);
        let msg = err.to_string();
        assert!(msg.contains("expected 5"), "{msg}");
        assert!(msg.contains("got 4"), "{msg}");
    }

    #[test]
    fn config_error_is_displayed_verbatim() {
        let err = DatasetError::config("houses", "must not be empty");
        assert_eq!(err.to_string(), "config error: houses: must not be empty");
    }
}
