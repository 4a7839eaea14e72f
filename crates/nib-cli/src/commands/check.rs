//! `nib check`: load the config like a build would and print the result.

use nib_config::{ConfigLoader, LoadOptions, MigrationWarnings};

use crate::cli::CheckArgs;
use crate::commands::utils;
use crate::error::Result;
use crate::ui;

pub async fn execute(
    args: CheckArgs,
    command: &str,
    warnings: &mut MigrationWarnings,
) -> Result<()> {
    let root = utils::project_root(&args.project)?;
    let loader = ConfigLoader::new(&root);
    let config_args = utils::config_args(&args.project, command);

    let path = loader.config_path(&config_args);
    if !path.exists() && !args.required {
        ui::warning(&format!("No config file at {}, showing defaults", path.display()));
    }

    let config = loader.resolve(
        &config_args,
        LoadOptions {
            required: args.required,
        },
        warnings,
    )?;

    println!("{}", serde_json::to_string_pretty(&config.to_value()?)?);
    match warnings.emitted() {
        0 => ui::success("Configuration is valid"),
        n => ui::success(&format!(
            "Configuration is valid ({n} deprecated setting(s) migrated, see warnings above)"
        )),
    }
    Ok(())
}
