//! App builds for nib.
//!
//! [`BuildPipeline`] runs the four build steps against a project root. The
//! actual bundling is delegated to a [`Bundler`]; [`ProcessBundler`] runs an
//! external command.
//!
//! ```no_run
//! # async fn example() -> nib_build::Result<()> {
//! use std::sync::Arc;
//! use nib_build::{react_app_preset, BuildPipeline, BuildRequest, ProcessBundler};
//! use nib_config::MigrationWarnings;
//!
//! let bundler = Arc::new(ProcessBundler::new("node").arg("scripts/bundle.js"));
//! let report = BuildPipeline::new(".", bundler)
//!     .run(&BuildRequest::default(), react_app_preset, &mut MigrationWarnings::new())
//!     .await?;
//! println!("built into {}", report.out_dir.display());
//! # Ok(())
//! # }
//! ```

pub mod assets;
pub mod bundler;
pub mod env;
pub mod error;
pub mod manifest;
pub mod pipeline;
pub mod preset;

pub use bundler::{Bundler, ProcessBundler};
pub use env::Environment;
pub use error::{BuildError, BundlerError, Result};
pub use pipeline::{
    clean_app, BuildPaths, BuildPipeline, BuildReport, BuildRequest, BuildStep, DEFAULT_OUT_DIR,
    DEFAULT_PUBLIC_DIR,
};
pub use preset::{
    app_preset, preset_for, react_app_preset, web_app_preset, BundlerPreset,
    ChunkSortMode, PresetFactory,
};
