//! CLI settings layered from defaults, environment and flags.
//!
//! Priority: CLI flags > `NIB_*` environment variables > defaults.
//! `NODE_ENV` is read here too so the build itself never touches the process
//! environment.

use std::path::PathBuf;

use figment::{
    providers::{Env, Serialized},
    Figment,
};
use nib_build::{BuildPaths, DEFAULT_OUT_DIR, DEFAULT_PUBLIC_DIR};
use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub out_dir: PathBuf,
    pub public_dir: PathBuf,
    /// Bundler command line, e.g. `node scripts/bundle.js`.
    pub bundler: Option<String>,
    pub node_env: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            public_dir: PathBuf::from(DEFAULT_PUBLIC_DIR),
            bundler: None,
            node_env: None,
        }
    }
}

/// Settings given on the command line. Unset flags don't override anything.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SettingsOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundler: Option<String>,
}

impl Settings {
    pub fn figment(overrides: &SettingsOverrides) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Env::raw().only(&["NODE_ENV"]))
            .merge(Env::prefixed("NIB_"))
            .merge(Serialized::defaults(overrides))
    }

    pub fn load(overrides: &SettingsOverrides) -> Result<Self> {
        Ok(Self::figment(overrides).extract()?)
    }

    pub fn paths(&self) -> BuildPaths {
        BuildPaths {
            out_dir: self.out_dir.clone(),
            public_dir: self.public_dir.clone(),
        }
    }
}
