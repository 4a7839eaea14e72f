//! Upgrades deprecated config shapes to the current layout.
//!
//! Older configs put npm build settings (`externals`, `global`, `jsNext`,
//! `umd`) and bundler settings (`define`, `loaders`) at the top level. These
//! are moved into `build` and `bundler` objects. Each kind of deprecation is
//! reported once per [`MigrationWarnings`] instance, while the data itself is
//! migrated on every call.

use std::fmt;

use serde_json::{Map, Value};
use tracing::warn;

use crate::config::{is_truthy, object_of, BuildConfig, BundlerConfig};

pub const BUILD_KEYS: [&str; 4] = ["externals", "global", "jsNext", "umd"];
pub const BUNDLER_KEYS: [&str; 2] = ["define", "loaders"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeprecationKind {
    BuildAtRoot,
    BundlerAtRoot,
    DefineAtRoot,
    ExtraLoaders,
}

/// A deprecation detected while migrating a config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deprecation {
    BuildAtRoot { keys: Vec<String> },
    BundlerAtRoot { keys: Vec<String> },
    DefineAtRoot,
    ExtraLoaders,
}

impl Deprecation {
    pub fn kind(&self) -> DeprecationKind {
        match self {
            Deprecation::BuildAtRoot { .. } => DeprecationKind::BuildAtRoot,
            Deprecation::BundlerAtRoot { .. } => DeprecationKind::BundlerAtRoot,
            Deprecation::DefineAtRoot => DeprecationKind::DefineAtRoot,
            Deprecation::ExtraLoaders => DeprecationKind::ExtraLoaders,
        }
    }
}

impl fmt::Display for Deprecation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Deprecation::BuildAtRoot { keys } => write!(
                f,
                "the top level of your config contains npm module build configuration: {}\n\
                 this must be moved into a \"build\" object",
                keys.join(", ")
            ),
            Deprecation::BundlerAtRoot { keys } => write!(
                f,
                "the top level of your config contains bundler configuration: {}\n\
                 this must be moved into a \"bundler\" object",
                keys.join(", ")
            ),
            Deprecation::DefineAtRoot => {
                f.write_str("bundler \"define\" config must be inside a \"plugins\" object")
            }
            Deprecation::ExtraLoaders => f.write_str(
                "extra bundler loaders must be defined in bundler.extra.module.loaders",
            ),
        }
    }
}

/// Tracks which deprecation warnings have already been shown.
///
/// Create one per process and reuse it for every config load.
#[derive(Debug, Clone, Default)]
pub struct MigrationWarnings {
    build_at_root: bool,
    bundler_at_root: bool,
    define_at_root: bool,
    extra_loaders: bool,
    emitted: usize,
}

impl MigrationWarnings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_warned(&self, kind: DeprecationKind) -> bool {
        *self.flag(kind)
    }

    /// Number of deprecation warnings shown so far.
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    /// Queue `deprecation` for reporting unless its kind was already shown.
    fn report(&mut self, deprecation: Deprecation, reported: &mut Vec<Deprecation>) {
        let flag = self.flag_mut(deprecation.kind());
        if !std::mem::replace(flag, true) {
            self.emitted += 1;
            reported.push(deprecation);
        }
    }

    fn flag(&self, kind: DeprecationKind) -> &bool {
        match kind {
            DeprecationKind::BuildAtRoot => &self.build_at_root,
            DeprecationKind::BundlerAtRoot => &self.bundler_at_root,
            DeprecationKind::DefineAtRoot => &self.define_at_root,
            DeprecationKind::ExtraLoaders => &self.extra_loaders,
        }
    }

    fn flag_mut(&mut self, kind: DeprecationKind) -> &mut bool {
        match kind {
            DeprecationKind::BuildAtRoot => &mut self.build_at_root,
            DeprecationKind::BundlerAtRoot => &mut self.bundler_at_root,
            DeprecationKind::DefineAtRoot => &mut self.define_at_root,
            DeprecationKind::ExtraLoaders => &mut self.extra_loaders,
        }
    }
}

/// Move deprecated top-level keys into their current location.
///
/// Returns the deprecations reported by this call (already-reported kinds
/// are omitted) after logging each of them.
pub fn migrate(config: &mut Map<String, Value>, warnings: &mut MigrationWarnings) -> Vec<Deprecation> {
    let mut reported = Vec::new();

    let build_keys = present_keys(config, &BUILD_KEYS);
    if !build_keys.is_empty() {
        warnings.report(Deprecation::BuildAtRoot { keys: build_keys }, &mut reported);
        let mut build = object_of(&BuildConfig::defaults());
        for key in BUILD_KEYS {
            if let Some(value) = config.remove(key) {
                build.insert(key.to_string(), value);
            }
        }
        config.insert("build".to_string(), Value::Object(build));
    }

    let bundler_keys = present_keys(config, &BUNDLER_KEYS);
    if !bundler_keys.is_empty() {
        warnings.report(Deprecation::BundlerAtRoot { keys: bundler_keys }, &mut reported);
        let mut bundler = object_of(&BundlerConfig::defaults());

        // The old `define` key lives one level deeper than `loaders` now.
        if let Some(define) = config.remove("define") {
            warnings.report(Deprecation::DefineAtRoot, &mut reported);
            if let Some(Value::Object(plugins)) = bundler.get_mut("plugins") {
                plugins.insert("define".to_string(), define);
            }
        }
        if let Some(loaders) = config.remove("loaders") {
            bundler.insert("loaders".to_string(), loaders);
        }

        let has_extra_loaders = bundler
            .get("loaders")
            .and_then(|loaders| loaders.get("extra"))
            .is_some_and(is_truthy);
        if has_extra_loaders {
            warnings.report(Deprecation::ExtraLoaders, &mut reported);
        }

        config.insert("bundler".to_string(), Value::Object(bundler));
    }

    for deprecation in &reported {
        warn!("{deprecation}");
    }
    reported
}

fn present_keys(config: &Map<String, Value>, keys: &[&str]) -> Vec<String> {
    keys.iter()
        .filter(|key| config.contains_key(**key))
        .map(|key| key.to_string())
        .collect()
}
