//! Miette reports for CLI errors.

use crate::error::{BuildError, CliError};
use miette::Report;

/// Convert a [`CliError`] into a report for `main` to print.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Build(e) => build_error_to_miette(e),
        CliError::Config(e) => miette::miette!(
            help = "Check your nib.config.toml, or pass --config <path>",
            "Configuration error: {}",
            e
        ),
        _ => miette::miette!("{}", err),
    }
}

/// Build failures name the step that failed.
pub fn build_error_to_miette(err: BuildError) -> Report {
    match (&err, err.step()) {
        (BuildError::Config(e), _) => miette::miette!(
            help = "Check your nib.config.toml, or pass --config <path>",
            "Configuration error: {}",
            e
        ),
        (BuildError::UnsupportedProjectType(_), _) => miette::miette!(
            help = "Only react-app and web-app projects can be built as apps",
            "{}",
            err
        ),
        (_, Some(step)) => miette::miette!("Build failed during {}: {}", step, err),
        (_, None) => miette::miette!("{}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nib_build::BundlerError;
    use std::path::PathBuf;

    #[test]
    fn bundler_failures_name_the_step() {
        let err = CliError::Build(BuildError::Bundler(BundlerError::Custom(
            "Module not found".to_string(),
        )));
        let report = cli_error_to_miette(err);
        assert_eq!(report.to_string(), "Build failed during bundle: Module not found");
    }

    #[test]
    fn manifest_failures_name_the_step() {
        let err = BuildError::ManifestInline {
            path: PathBuf::from("dist/manifest.js"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        let report = build_error_to_miette(err);
        assert!(report.to_string().starts_with("Build failed during inline manifest:"));
    }

    #[test]
    fn config_errors_have_help() {
        let err = CliError::Config(nib_config::ConfigError::NotFound(PathBuf::from(
            "nib.config.toml",
        )));
        let report = cli_error_to_miette(err);
        assert!(report.to_string().contains("couldn't find a config file"));
        assert!(report.help().is_some());
    }
}
