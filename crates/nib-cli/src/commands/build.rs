//! App build commands.
//!
//! `build` reads the project type from the config file and picks the preset;
//! `build-react-app` and `build-web-app` name it directly.

use nib_build::{preset_for, react_app_preset, web_app_preset, BuildPipeline, BuildRequest, PresetFactory};
use nib_config::{ConfigLoader, LoadOptions, MigrationWarnings, ProjectType, UserConfig};
use tracing::debug;

use crate::cli::BuildArgs;
use crate::commands::utils;
use crate::error::{CliError, Result};
use crate::settings::{Settings, SettingsOverrides};
use crate::ui;

/// `nib build`
pub async fn execute(
    args: BuildArgs,
    command: &str,
    warnings: &mut MigrationWarnings,
) -> Result<()> {
    let root = utils::project_root(&args.project)?;
    let config_args = utils::config_args(&args.project, command);
    let config = ConfigLoader::new(&root).resolve(
        &config_args,
        LoadOptions { required: true },
        warnings,
    )?;
    let project_type = config.project_type.ok_or_else(|| {
        CliError::InvalidArgument("The config file doesn't name a project type".to_string())
    })?;
    debug!(%project_type, "dispatching build");

    let preset = preset_for(project_type)?;
    let target = AppTarget {
        command,
        project_type,
        preset,
    };
    build_app(args, target, Some(config), warnings).await
}

/// `nib build-react-app`
pub async fn execute_react_app(
    args: BuildArgs,
    command: &str,
    warnings: &mut MigrationWarnings,
) -> Result<()> {
    let target = AppTarget {
        command,
        project_type: ProjectType::ReactApp,
        preset: react_app_preset,
    };
    build_app(args, target, None, warnings).await
}

/// `nib build-web-app`
pub async fn execute_web_app(
    args: BuildArgs,
    command: &str,
    warnings: &mut MigrationWarnings,
) -> Result<()> {
    let target = AppTarget {
        command,
        project_type: ProjectType::WebApp,
        preset: web_app_preset,
    };
    build_app(args, target, None, warnings).await
}

struct AppTarget<'a> {
    command: &'a str,
    project_type: ProjectType,
    preset: PresetFactory,
}

async fn build_app(
    args: BuildArgs,
    target: AppTarget<'_>,
    config: Option<UserConfig>,
    warnings: &mut MigrationWarnings,
) -> Result<()> {
    let AppTarget {
        command,
        project_type,
        preset,
    } = target;
    let root = utils::project_root(&args.project)?;
    let settings = Settings::load(&SettingsOverrides {
        out_dir: args.out_dir.clone(),
        public_dir: args.public_dir.clone(),
        bundler: args.bundler.clone(),
    })?;
    let bundler = utils::bundler(&settings, &root)?;

    let request = BuildRequest {
        config_args: utils::config_args(&args.project, command),
        config,
        node_env: settings.node_env.clone(),
    };

    ui::info(&format!("Building {project_type}..."));
    let report = BuildPipeline::new(&root, bundler)
        .with_paths(settings.paths())
        .run(&request, preset, warnings)
        .await?;

    ui::success(&format!(
        "Built {project_type} into {} ({})",
        report.out_dir.display(),
        report.environment
    ));
    Ok(())
}
