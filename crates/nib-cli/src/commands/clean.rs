//! `nib clean-app`

use crate::cli::CleanArgs;
use crate::commands::utils;
use crate::error::Result;
use crate::settings::{Settings, SettingsOverrides};
use crate::ui;

pub async fn execute(args: CleanArgs) -> Result<()> {
    let root = utils::project_root(&args.project)?;
    let settings = Settings::load(&SettingsOverrides {
        out_dir: args.out_dir.clone(),
        ..Default::default()
    })?;

    let out_dir = utils::resolve_path(&settings.out_dir, &root);
    nib_build::clean_app(&out_dir)?;
    ui::success(&format!("Cleaned {}", out_dir.display()));
    Ok(())
}
