//! Error handling for the nib CLI.
//!
//! Library errors from `nib-config` and `nib-build` convert into [`CliError`]
//! with `?`. At the top of `main` the error is turned into a `miette` report
//! by [`cli_error_to_miette`].

mod report;

use thiserror::Error;

pub use nib_build::BuildError;
pub use nib_config::ConfigError;
pub use report::cli_error_to_miette;

#[derive(Debug, Error)]
pub enum CliError {
    /// Config file missing, unreadable or invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A build step failed
    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    /// Invalid command-line arguments or options
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CLI settings could not be merged from defaults, environment and flags
    #[error("Invalid settings: {0}")]
    Settings(#[from] Box<figment::Error>),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        CliError::Settings(Box::new(err))
    }
}

pub type Result<T, E = CliError> = std::result::Result<T, E>;
