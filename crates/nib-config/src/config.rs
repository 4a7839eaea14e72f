//! Typed user configuration.
//!
//! `build` and `bundler` are fixed-field structures whose recognized keys are
//! `Option`s: `None` means "unset" and is filled by [`UserConfig::normalize`].
//! Unrecognized keys at every level are kept in a flattened pass-through map.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ConfigError, Result};
use crate::project::ProjectType;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub project_type: Option<ProjectType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build: Option<BuildConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundler: Option<BundlerConfig>,

    /// Transpiler options shorthand, copied into the babel loader's `query`.
    #[serde(
        default,
        alias = "transpilerOptions",
        skip_serializing_if = "Option::is_none"
    )]
    pub babel: Option<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// npm module build settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildConfig {
    /// Package name -> global variable name, for UMD builds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub externals: Option<Map<String, Value>>,

    /// Global variable name exported by the UMD build.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global: Option<String>,

    /// Also emit an ES module build.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub js_next: Option<bool>,

    /// Also emit a UMD build.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub umd: Option<bool>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Settings forwarded to the bundler's config builder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BundlerConfig {
    /// Per-loader configuration, keyed by loader id (`babel`, `css`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loaders: Option<Map<String, Value>>,

    /// Per-plugin configuration, keyed by plugin id (`define`, `html`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugins: Option<Map<String, Value>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BuildConfig {
    pub fn defaults() -> Self {
        Self {
            externals: Some(Map::new()),
            global: Some(String::new()),
            js_next: Some(false),
            umd: Some(false),
            extra: Map::new(),
        }
    }
}

impl BundlerConfig {
    pub fn defaults() -> Self {
        Self {
            loaders: Some(Map::new()),
            plugins: Some(Map::new()),
            extra: Map::new(),
        }
    }
}

impl UserConfig {
    /// Build from a JSON value. The value must be an object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Self::from_map(map),
            other => Err(ConfigError::invalid_value(
                "config",
                format!("expected an object, got {}", json_kind(&other)),
            )),
        }
    }

    pub fn from_map(map: Map<String, Value>) -> Result<Self> {
        if map.contains_key("babel") && map.contains_key("transpilerOptions") {
            return Err(ConfigError::invalid_value(
                "babel",
                "`babel` and `transpilerOptions` name the same setting, use only one of them",
            ));
        }
        serde_json::from_value(Value::Object(map))
            .map_err(|e| ConfigError::invalid_value("config", e))
    }

    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::invalid_value("config", e))
    }
}

/// Deep-merge `update` into `target`. Objects merge key by key, anything else
/// replaces the target slot.
pub fn merge_values(target: &mut Value, update: &Value) {
    match (target, update) {
        (Value::Object(target_map), Value::Object(update_map)) => {
            for (key, value) in update_map {
                merge_values(target_map.entry(key.clone()).or_insert(Value::Null), value);
            }
        }
        (target_slot, _) => {
            *target_slot = update.clone();
        }
    }
}

/// Serialize `value` and return it as a JSON object map.
pub(crate) fn object_of<T: Serialize>(value: &T) -> Map<String, Value> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

/// JavaScript truthiness, which the config format inherits.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
