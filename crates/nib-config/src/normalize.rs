//! Default filling and cross-wiring of related options.

use serde_json::{Map, Value};
use tracing::debug;

use crate::config::{is_truthy, BuildConfig, BundlerConfig, UserConfig};

const BABEL_LOADER: &str = "babel";
const LOADER_QUERY: &str = "query";

impl UserConfig {
    /// Install defaults for `build` and `bundler`, then propagate the
    /// transpiler options shorthand into the babel loader.
    ///
    /// Values the user set are never overwritten, so running this again over
    /// a normalized config changes nothing.
    pub fn normalize(&mut self) {
        self.build.get_or_insert_with(BuildConfig::defaults).fill_defaults();
        self.bundler
            .get_or_insert_with(BundlerConfig::defaults)
            .fill_defaults();
        self.apply_babel_to_loader();
    }

    fn apply_babel_to_loader(&mut self) {
        let Some(babel) = self.babel.as_ref().filter(|v| is_truthy(v)) else {
            return;
        };
        let Some(loaders) = self
            .bundler
            .as_mut()
            .and_then(|bundler| bundler.loaders.as_mut())
        else {
            return;
        };

        if !loaders.get(BABEL_LOADER).is_some_and(is_truthy) {
            let mut loader = Map::new();
            loader.insert(LOADER_QUERY.to_string(), babel.clone());
            loaders.insert(BABEL_LOADER.to_string(), Value::Object(loader));
            debug!("added babel loader with user babel config");
            return;
        }

        // A non-object loader entry has nowhere to put a query.
        if let Some(Value::Object(loader)) = loaders.get_mut(BABEL_LOADER) {
            if !loader.get(LOADER_QUERY).is_some_and(is_truthy) {
                loader.insert(LOADER_QUERY.to_string(), babel.clone());
                debug!("added query to babel loader with user babel config");
            }
        }
    }
}

impl BuildConfig {
    pub fn fill_defaults(&mut self) {
        let defaults = Self::defaults();
        self.externals = self.externals.take().or(defaults.externals);
        self.global = self.global.take().or(defaults.global);
        self.js_next = self.js_next.or(defaults.js_next);
        self.umd = self.umd.or(defaults.umd);
    }
}

impl BundlerConfig {
    pub fn fill_defaults(&mut self) {
        let defaults = Self::defaults();
        self.loaders = self.loaders.take().or(defaults.loaders);
        self.plugins = self.plugins.take().or(defaults.plugins);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn normalized(value: Value) -> UserConfig {
        let mut config = UserConfig::from_value(value).unwrap();
        config.normalize();
        config
    }

    #[test]
    fn installs_full_defaults_when_sections_missing() {
        let config = normalized(json!({}));
        assert_eq!(config.build, Some(BuildConfig::defaults()));
        assert_eq!(config.bundler, Some(BundlerConfig::defaults()));
    }

    #[test]
    fn fills_only_missing_build_keys() {
        let config = normalized(json!({
            "build": { "global": "Foo", "umd": true, "banner": "x" }
        }));
        let build = config.build.unwrap();
        assert_eq!(build.global.as_deref(), Some("Foo"));
        assert_eq!(build.umd, Some(true));
        assert_eq!(build.js_next, Some(false));
        assert_eq!(build.externals, Some(Map::new()));
        assert_eq!(build.extra["banner"], json!("x"));
    }

    #[test]
    fn babel_becomes_loader_query() {
        let config = normalized(json!({ "babel": { "stage": 0 } }));
        let loaders = config.bundler.unwrap().loaders.unwrap();
        assert_eq!(loaders["babel"], json!({ "query": { "stage": 0 } }));
    }

    #[test]
    fn babel_fills_missing_query_on_existing_loader() {
        let config = normalized(json!({
            "babel": { "stage": 0 },
            "bundler": { "loaders": { "babel": { "exclude": "vendor" } } }
        }));
        let loaders = config.bundler.unwrap().loaders.unwrap();
        assert_eq!(
            loaders["babel"],
            json!({ "exclude": "vendor", "query": { "stage": 0 } })
        );
    }

    #[test]
    fn existing_loader_query_wins() {
        let config = normalized(json!({
            "babel": { "stage": 0 },
            "bundler": { "loaders": { "babel": { "query": { "stage": 2 } } } }
        }));
        let loaders = config.bundler.unwrap().loaders.unwrap();
        assert_eq!(loaders["babel"], json!({ "query": { "stage": 2 } }));
    }

    #[test]
    fn falsy_babel_is_ignored() {
        let config = normalized(json!({ "babel": false }));
        assert!(config.bundler.unwrap().loaders.unwrap().is_empty());
    }

    #[test]
    fn normalize_twice_is_a_no_op() {
        let mut config = normalized(json!({
            "babel": { "stage": 1 },
            "build": { "jsNext": true }
        }));
        let once = config.clone();
        config.normalize();
        assert_eq!(config, once);
    }
}
