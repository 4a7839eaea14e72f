//! Shared helpers for command implementations.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use nib_build::{Bundler, ProcessBundler};
use nib_config::ConfigArgs;

use crate::cli::ProjectArgs;
use crate::error::{CliError, Result};
use crate::settings::Settings;

/// Resolve `path` against `cwd` unless it is already absolute.
pub fn resolve_path(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

pub fn get_cwd() -> Result<PathBuf> {
    std::env::current_dir().map_err(|e| {
        CliError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to get current directory: {e}"),
        ))
    })
}

/// The project directory: `--cwd` if given, else the current directory.
pub fn project_root(args: &ProjectArgs) -> Result<PathBuf> {
    let cwd = get_cwd()?;
    let Some(dir) = &args.cwd else {
        return Ok(cwd);
    };

    let root = resolve_path(dir, &cwd);
    if !root.is_dir() {
        return Err(CliError::InvalidArgument(format!(
            "Project directory does not exist: {}",
            root.display()
        )));
    }
    Ok(root)
}

pub fn config_args(args: &ProjectArgs, command: &str) -> ConfigArgs {
    ConfigArgs {
        abs_config: args.abs_config.clone(),
        config: args.config.clone(),
        command: Some(command.to_string()),
    }
}

/// The bundler to run, from `--bundler` or `NIB_BUNDLER`. Runs in `root`.
pub fn bundler(settings: &Settings, root: &Path) -> Result<Arc<dyn Bundler>> {
    let command = settings.bundler.as_deref().unwrap_or_default();
    let bundler = ProcessBundler::parse(command)
        .map_err(|e| CliError::InvalidArgument(e.to_string()))?
        .ok_or_else(|| {
            CliError::InvalidArgument(
                "No bundler configured. Pass --bundler <cmd> or set NIB_BUNDLER".to_string(),
            )
        })?;
    Ok(Arc::new(bundler.current_dir(root)))
}
