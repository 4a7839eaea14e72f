//! User configuration for nib.
//!
//! Loading runs in three stages, each usable on its own:
//!
//! - [`ConfigLoader`] finds and parses the config file and evaluates config
//!   factories
//! - [`migrate`] moves deprecated top-level keys into `build` / `bundler`
//! - [`UserConfig::normalize`] installs defaults and wires the transpiler
//!   options into the babel loader
//!
//! [`ConfigLoader::resolve`] runs all three.

pub mod bundler_api;
pub mod config;
pub mod error;
pub mod loader;
pub mod migrate;
pub mod normalize;
pub mod project;

pub use bundler_api::{BundlerApi, PackageInfo};
pub use config::{merge_values, BuildConfig, BundlerConfig, UserConfig};
pub use error::{ConfigError, Result};
pub use loader::{
    ConfigArgs, ConfigContext, ConfigFactory, ConfigLoader, ConfigSource, LoadOptions,
    DEFAULT_CONFIG_FILE,
};
pub use migrate::{migrate, Deprecation, DeprecationKind, MigrationWarnings};
pub use project::ProjectType;
