//! Build error types.

use std::path::PathBuf;

use nib_config::{ConfigError, ProjectType};
use thiserror::Error;

use crate::pipeline::BuildStep;

pub type Result<T, E = BuildError> = std::result::Result<T, E>;

/// Failure of a single build step. The first one aborts the build.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to clean {}: {source}", .path.display())]
    Clean {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to copy public assets into {}: {source}", .path.display())]
    CopyAssets {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Bundler(#[from] BundlerError),

    #[error("failed to inline the manifest ({}): {source}", .path.display())]
    ManifestInline {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("'{0}' projects can't be built as an app")]
    UnsupportedProjectType(ProjectType),
}

impl BuildError {
    /// The step that failed, if the error came from one.
    pub fn step(&self) -> Option<BuildStep> {
        match self {
            BuildError::Clean { .. } => Some(BuildStep::Clean),
            BuildError::CopyAssets { .. } => Some(BuildStep::CopyAssets),
            BuildError::Config(_) | BuildError::Bundler(_) => Some(BuildStep::Bundle),
            BuildError::ManifestInline { .. } => Some(BuildStep::InlineManifest),
            BuildError::UnsupportedProjectType(_) => None,
        }
    }
}

/// Errors reported by a [`crate::Bundler`]. Passed through as-is.
#[derive(Debug, Error)]
pub enum BundlerError {
    #[error("failed to start bundler '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("bundler '{program}' exited with {}{}", .code.map_or("a signal".to_string(), |c| format!("status {c}")), format_stderr(.stderr))]
    Failed {
        program: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("bundler I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Custom(String),
}

fn format_stderr(stderr: &str) -> String {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        String::new()
    } else {
        format!("\n{stderr}")
    }
}
