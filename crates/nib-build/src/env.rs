//! The `NODE_ENV` build environment.

use std::fmt;

use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
    Test,
}

impl Environment {
    /// Resolve the environment for a build. Builds default to production when
    /// no `NODE_ENV` was given.
    pub fn for_build(node_env: Option<&str>) -> Self {
        match node_env.map(str::trim).filter(|v| !v.is_empty()) {
            None => Environment::Production,
            Some("production") => Environment::Production,
            Some("test") => Environment::Test,
            Some("development") => Environment::Development,
            Some(other) => {
                debug!(node_env = other, "treating unrecognized NODE_ENV as development");
                Environment::Development
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
            Environment::Test => "test",
        }
    }

    /// The bundler `mode`. Bundlers only know production and development.
    pub fn mode(&self) -> &'static str {
        match self {
            Environment::Production => "production",
            Environment::Development | Environment::Test => "development",
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
