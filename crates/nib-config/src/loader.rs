//! File-based config loading.
//!
//! Locates the user's config file (an explicit path or the conventional
//! `nib.config.toml` at the project root), parses it, evaluates it when it is
//! a factory, and validates its project type. [`ConfigLoader::resolve`] then
//! runs the result through migration and normalization.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::debug;

use crate::bundler_api::BundlerApi;
use crate::config::{merge_values, UserConfig};
use crate::error::{ConfigError, Result};
use crate::migrate::{migrate, MigrationWarnings};
use crate::project::ProjectType;

/// Conventional config file name, looked up in the project root.
pub const DEFAULT_CONFIG_FILE: &str = "nib.config.toml";

/// Top-level table holding per-command overrides.
const COMMANDS_KEY: &str = "commands";

/// Config location and invocation details taken from the command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Fully resolved config path; wins over `config`.
    pub abs_config: Option<PathBuf>,
    /// Config path relative to the project root.
    pub config: Option<PathBuf>,
    /// The sub-command being run, e.g. `build-react-app`.
    pub command: Option<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    /// Fail when no config file exists, and require a valid `type`.
    pub required: bool,
}

/// What a config factory gets to see.
pub struct ConfigContext<'a> {
    pub command: Option<&'a str>,
    pub bundler: &'a BundlerApi,
}

/// Produces a config document once the invocation context is known.
pub trait ConfigFactory {
    fn create(self: Box<Self>, context: &ConfigContext<'_>) -> Result<Value>;
}

impl<F> ConfigFactory for F
where
    F: FnOnce(&ConfigContext<'_>) -> Result<Value>,
{
    fn create(self: Box<Self>, context: &ConfigContext<'_>) -> Result<Value> {
        (*self)(context)
    }
}

/// A loaded config, either a plain document or a factory to invoke.
pub enum ConfigSource {
    Static(Value),
    Factory(Box<dyn ConfigFactory>),
}

impl ConfigSource {
    pub fn evaluate(self, context: &ConfigContext<'_>) -> Result<Value> {
        match self {
            ConfigSource::Static(value) => Ok(value),
            ConfigSource::Factory(factory) => factory.create(context),
        }
    }

    /// A document with a `commands` table becomes a factory that layers the
    /// running command's overrides over the base document.
    fn from_document(mut value: Value) -> Self {
        let commands = match value.as_object_mut().map(|root| root.remove(COMMANDS_KEY)) {
            Some(Some(Value::Object(commands))) => commands,
            Some(Some(other)) => {
                // Not a table: leave it in place as an ordinary key.
                if let Some(root) = value.as_object_mut() {
                    root.insert(COMMANDS_KEY.to_string(), other);
                }
                return ConfigSource::Static(value);
            }
            _ => return ConfigSource::Static(value),
        };
        ConfigSource::Factory(Box::new(CommandOverrides {
            base: value,
            commands,
        }))
    }
}

impl fmt::Debug for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Static(value) => f.debug_tuple("Static").field(value).finish(),
            ConfigSource::Factory(_) => f.write_str("Factory(..)"),
        }
    }
}

struct CommandOverrides {
    base: Value,
    commands: Map<String, Value>,
}

impl ConfigFactory for CommandOverrides {
    fn create(self: Box<Self>, context: &ConfigContext<'_>) -> Result<Value> {
        let CommandOverrides { mut base, commands } = *self;
        if let Some(overrides) = context.command.and_then(|command| commands.get(command)) {
            if !overrides.is_object() {
                return Err(ConfigError::Factory(format!(
                    "overrides for command '{}' must be a table",
                    context.command.unwrap_or_default()
                )));
            }
            debug!(command = ?context.command, "applying command overrides");
            merge_values(&mut base, overrides);
        }
        Ok(base)
    }
}

/// Loads the user config for one invocation.
///
/// # Example
///
/// ```no_run
/// use nib_config::{ConfigArgs, ConfigLoader, LoadOptions, MigrationWarnings};
///
/// let mut warnings = MigrationWarnings::new();
/// let config = ConfigLoader::new(".")
///     .resolve(&ConfigArgs::default(), LoadOptions::default(), &mut warnings)
///     .unwrap();
/// assert!(config.build.is_some());
/// ```
pub struct ConfigLoader {
    root: PathBuf,
    factory: Option<Box<dyn ConfigFactory>>,
    bundler: BundlerApi,
}

impl ConfigLoader {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            factory: None,
            bundler: BundlerApi,
        }
    }

    /// Use a programmatic config factory instead of reading a file.
    pub fn with_factory(mut self, factory: impl ConfigFactory + 'static) -> Self {
        self.factory = Some(Box::new(factory));
        self
    }

    /// The path a config file is expected at.
    ///
    /// Searches in this order:
    /// 1. `abs_config` as given
    /// 2. `config` resolved against the project root
    /// 3. `nib.config.toml` in the project root
    pub fn config_path(&self, args: &ConfigArgs) -> PathBuf {
        if let Some(path) = &args.abs_config {
            return path.clone();
        }
        let relative = args
            .config
            .as_deref()
            .unwrap_or(Path::new(DEFAULT_CONFIG_FILE));
        self.root.join(relative)
    }

    /// Locate and parse the config without evaluating it.
    pub fn load_source(&mut self, args: &ConfigArgs, options: LoadOptions) -> Result<ConfigSource> {
        if let Some(factory) = self.factory.take() {
            return Ok(ConfigSource::Factory(factory));
        }

        let path = self.config_path(args);
        if !path.exists() {
            if options.required {
                return Err(ConfigError::NotFound(path));
            }
            return Ok(ConfigSource::Static(Value::Object(Map::new())));
        }

        let value = read_document(&path).map_err(|err| {
            debug!(path = %path.display(), error = %err, "config import failed");
            ConfigError::Load(path.clone())
        })?;
        debug!("imported config from {}", path.display());
        Ok(ConfigSource::from_document(value))
    }

    /// Load, evaluate and validate the raw config document.
    pub fn load(mut self, args: &ConfigArgs, options: LoadOptions) -> Result<Map<String, Value>> {
        let path = self.config_path(args);
        let source = self.load_source(args, options)?;
        let context = ConfigContext {
            command: args.command.as_deref(),
            bundler: &self.bundler,
        };
        let config = match source.evaluate(&context)? {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                return Err(ConfigError::invalid_value(
                    "config",
                    format!(
                        "{} must contain a table, got {}",
                        path.display(),
                        crate::config::json_kind(&other)
                    ),
                ));
            }
        };

        validate_project_type(&config, options.required, &path)?;
        Ok(config)
    }

    /// Load the config and bring it to its current, fully defaulted shape.
    pub fn resolve(
        self,
        args: &ConfigArgs,
        options: LoadOptions,
        warnings: &mut MigrationWarnings,
    ) -> Result<UserConfig> {
        let mut raw = self.load(args, options)?;
        migrate(&mut raw, warnings);

        let mut config = UserConfig::from_map(raw)?;
        config.normalize();
        debug!(?config, "final user config");
        Ok(config)
    }
}

fn read_document(path: &Path) -> std::result::Result<Value, String> {
    let content = fs::read_to_string(path).map_err(|e| e.to_string())?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        return serde_json::from_str(&content).map_err(|e| format!("Invalid JSON: {e}"));
    }

    let toml_val: toml::Value =
        toml::from_str(&content).map_err(|e| format!("Invalid TOML syntax: {e}"))?;
    serde_json::to_value(toml_val).map_err(|e| format!("TOML to JSON conversion failed: {e}"))
}

fn validate_project_type(config: &Map<String, Value>, required: bool, path: &Path) -> Result<()> {
    let value = config.get("type");
    if !required && value.is_none() {
        return Ok(());
    }

    let valid = value
        .and_then(Value::as_str)
        .is_some_and(|kind| kind.parse::<ProjectType>().is_ok());
    if valid {
        return Ok(());
    }

    let value = match value {
        None => "<missing>".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };
    Err(ConfigError::InvalidProjectType {
        value,
        path: path.to_path_buf(),
    })
}
