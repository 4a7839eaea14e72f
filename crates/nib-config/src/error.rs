//! Error types for user config loading and normalization.

use std::path::PathBuf;

use thiserror::Error;

use crate::project::ProjectType;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    // Discovery/loading errors
    #[error("couldn't find a config file at {}", .0.display())]
    NotFound(PathBuf),

    #[error("couldn't import the config file at {}", .0.display())]
    Load(PathBuf),

    #[error(
        "invalid project type configured in {}: {value}\n'type' config must be one of: {}",
        .path.display(),
        ProjectType::joined()
    )]
    InvalidProjectType { value: String, path: PathBuf },

    #[error("invalid config value for '{field}'{}", .hint.as_ref().map(|h| format!(": {h}")).unwrap_or_default())]
    InvalidValue { field: String, hint: Option<String> },

    // Config factory evaluation errors
    #[error("config factory failed: {0}")]
    Factory(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    pub(crate) fn invalid_value(field: impl Into<String>, hint: impl ToString) -> Self {
        ConfigError::InvalidValue {
            field: field.into(),
            hint: Some(hint.to_string()),
        }
    }
}
