//! The app build: clean, copy public assets, bundle, inline the manifest.
//!
//! Steps run strictly in order and the first failure ends the build. Nothing
//! is rolled back; the next build's clean step removes stale output.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use nib_config::{ConfigArgs, ConfigLoader, LoadOptions, MigrationWarnings, UserConfig};
use tracing::{debug, info};

use crate::assets::{clean_output_dir, copy_public_dir};
use crate::bundler::Bundler;
use crate::env::Environment;
use crate::error::{BuildError, Result};
use crate::manifest::inline_manifest;
use crate::preset::PresetFactory;

pub const DEFAULT_OUT_DIR: &str = "dist";
pub const DEFAULT_PUBLIC_DIR: &str = "public";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildStep {
    Clean,
    CopyAssets,
    Bundle,
    InlineManifest,
}

impl BuildStep {
    pub const ALL: [BuildStep; 4] = [
        BuildStep::Clean,
        BuildStep::CopyAssets,
        BuildStep::Bundle,
        BuildStep::InlineManifest,
    ];
}

impl fmt::Display for BuildStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BuildStep::Clean => "clean",
            BuildStep::CopyAssets => "copy assets",
            BuildStep::Bundle => "bundle",
            BuildStep::InlineManifest => "inline manifest",
        })
    }
}

/// Where a build reads from and writes to, relative to the project root
/// unless absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildPaths {
    pub out_dir: PathBuf,
    pub public_dir: PathBuf,
}

impl Default for BuildPaths {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            public_dir: PathBuf::from(DEFAULT_PUBLIC_DIR),
        }
    }
}

/// Inputs for one build.
#[derive(Debug, Clone, Default)]
pub struct BuildRequest {
    pub config_args: ConfigArgs,
    /// A config the caller already resolved. The bundle step loads one from
    /// `config_args` when this is `None`.
    pub config: Option<UserConfig>,
    /// The `NODE_ENV` the build was started with, if any.
    pub node_env: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub completed: Vec<BuildStep>,
    pub environment: Environment,
    pub out_dir: PathBuf,
    pub assets_copied: usize,
}

/// Delete the contents of an app's output directory.
pub fn clean_app(out_dir: &Path) -> Result<()> {
    info!(path = %out_dir.display(), "cleaning build output");
    clean_output_dir(out_dir).map_err(|source| BuildError::Clean {
        path: out_dir.to_path_buf(),
        source,
    })
}

pub struct BuildPipeline {
    root: PathBuf,
    paths: BuildPaths,
    bundler: Arc<dyn Bundler>,
}

impl BuildPipeline {
    pub fn new(root: impl Into<PathBuf>, bundler: Arc<dyn Bundler>) -> Self {
        Self {
            root: root.into(),
            paths: BuildPaths::default(),
            bundler,
        }
    }

    pub fn with_paths(mut self, paths: BuildPaths) -> Self {
        self.paths = paths;
        self
    }

    pub fn out_dir(&self) -> PathBuf {
        self.resolve(&self.paths.out_dir)
    }

    pub fn public_dir(&self) -> PathBuf {
        self.resolve(&self.paths.public_dir)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Delete the previous build output.
    pub fn clean_app(&self) -> Result<()> {
        clean_app(&self.out_dir())
    }

    /// Run a full app build with the given preset.
    pub async fn run(
        &self,
        request: &BuildRequest,
        preset: PresetFactory,
        warnings: &mut MigrationWarnings,
    ) -> Result<BuildReport> {
        let out_dir = self.out_dir();
        let mut completed = Vec::with_capacity(BuildStep::ALL.len());

        self.clean_app()?;
        completed.push(BuildStep::Clean);

        let public_dir = self.public_dir();
        info!(from = %public_dir.display(), "copying public assets");
        let assets_copied =
            copy_public_dir(&public_dir, &out_dir).map_err(|source| BuildError::CopyAssets {
                path: out_dir.clone(),
                source,
            })?;
        completed.push(BuildStep::CopyAssets);

        let environment = Environment::for_build(request.node_env.as_deref());
        info!(%environment, "bundling");
        let loaded;
        let config = match &request.config {
            Some(config) => config,
            None => {
                loaded = ConfigLoader::new(&self.root).resolve(
                    &request.config_args,
                    LoadOptions::default(),
                    warnings,
                )?;
                &loaded
            }
        };
        let mut preset = preset(&self.root, environment);
        preset.output.path = out_dir.clone();
        let bundler_config = preset.resolve(config, environment)?;
        debug!(config = %bundler_config, "resolved bundler config");
        self.bundler.bundle(&bundler_config, environment).await?;
        completed.push(BuildStep::Bundle);

        info!("inlining manifest");
        inline_manifest(&out_dir)?;
        completed.push(BuildStep::InlineManifest);

        Ok(BuildReport {
            completed,
            environment,
            out_dir,
            assets_copied,
        })
    }
}
