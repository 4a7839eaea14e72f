//! Bundler presets for app builds and their merge with user config.
//!
//! A preset is produced by a [`PresetFactory`] only once the build's
//! [`Environment`] is known, so production-only options can be layered in.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use nib_config::{merge_values, ProjectType, UserConfig};
use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing::warn;

use crate::env::Environment;
use crate::error::{BuildError, Result};

/// Builds the preset for a project root once the environment is final.
pub type PresetFactory = fn(&Path, Environment) -> BundlerPreset;

/// Static bundler options for an app kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BundlerPreset {
    pub devtool: String,
    pub entry: BTreeMap<String, PathBuf>,
    pub output: OutputOptions,
    pub plugins: PresetPlugins,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub loaders: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputOptions {
    pub filename: String,
    pub chunk_filename: String,
    pub path: PathBuf,
    pub public_path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetPlugins {
    pub html: HtmlPluginOptions,
    pub vendor_chunk_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HtmlPluginOptions {
    pub chunks_sort_mode: ChunkSortMode,
    pub exclude_chunks: Vec<String>,
    pub template: PathBuf,
}

/// How the HTML plugin orders injected chunks.
///
/// The HTML plugin's own dependency sort puts the app chunk before the
/// vendor chunk. Supplying any custom sort, even one that keeps the emitted
/// order, avoids that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkSortMode {
    /// Keep chunks in emitted order.
    Identity,
}

/// Preset shared by all app builds.
pub fn app_preset(root: &Path, _environment: Environment) -> BundlerPreset {
    BundlerPreset {
        devtool: "source-map".to_string(),
        entry: BTreeMap::from([("app".to_string(), root.join("src/index.js"))]),
        output: OutputOptions {
            filename: "[name].[chunkhash:8].js".to_string(),
            chunk_filename: "[name].[chunkhash:8].js".to_string(),
            path: root.join("dist"),
            public_path: "/".to_string(),
        },
        plugins: PresetPlugins {
            html: HtmlPluginOptions {
                chunks_sort_mode: ChunkSortMode::Identity,
                exclude_chunks: vec!["manifest".to_string()],
                template: root.join("src/index.html"),
            },
            vendor_chunk_name: "vendor".to_string(),
        },
        loaders: Map::new(),
    }
}

/// React apps additionally get babel's React optimisations in production.
pub fn react_app_preset(root: &Path, environment: Environment) -> BundlerPreset {
    let mut preset = app_preset(root, environment);
    if environment.is_production() {
        preset.loaders.insert(
            "babel".to_string(),
            json!({
                "query": {
                    "optional": [
                        "optimisation.react.inlineElements",
                        "optimisation.react.constantElements"
                    ]
                }
            }),
        );
    }
    preset
}

pub fn web_app_preset(root: &Path, environment: Environment) -> BundlerPreset {
    app_preset(root, environment)
}

/// The preset factory for an app project type.
pub fn preset_for(project_type: ProjectType) -> Result<PresetFactory> {
    if !project_type.is_app() {
        return Err(BuildError::UnsupportedProjectType(project_type));
    }
    Ok(match project_type {
        ProjectType::ReactApp => react_app_preset,
        _ => web_app_preset,
    })
}

impl BundlerPreset {
    /// Merge the user's `bundler` config over this preset and produce the
    /// document handed to the bundler.
    ///
    /// User loaders and plugins are deep-merged over the preset's, and
    /// `bundler.extra` is merged into the document root. The environment is
    /// exposed as `mode` (test builds use development) and as a
    /// `process.env.NODE_ENV` define, which user defines may override.
    pub fn resolve(&self, user: &UserConfig, environment: Environment) -> Result<Value> {
        let mut config = serde_json::to_value(self).map_err(|e| {
            BuildError::Config(nib_config::ConfigError::InvalidValue {
                field: "preset".to_string(),
                hint: Some(e.to_string()),
            })
        })?;

        let define = json!({ "process.env.NODE_ENV": json!(environment.as_str()).to_string() });
        merge_values(
            &mut config,
            &json!({ "mode": environment.mode(), "plugins": { "define": define } }),
        );

        let Some(bundler) = &user.bundler else {
            return Ok(config);
        };
        if let Some(loaders) = &bundler.loaders {
            merge_values(&mut config, &json!({ "loaders": loaders }));
        }
        if let Some(plugins) = &bundler.plugins {
            merge_values(&mut config, &json!({ "plugins": plugins }));
        }
        for (key, value) in &bundler.extra {
            if key == "extra" {
                merge_values(&mut config, value);
            } else {
                warn!("ignoring unrecognized bundler config key '{key}'");
            }
        }
        Ok(config)
    }
}
