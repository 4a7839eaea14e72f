//! Supported project kinds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The closed set of project kinds a config's `type` may name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectType {
    ReactApp,
    ReactComponent,
    WebApp,
    WebModule,
}

impl ProjectType {
    pub const ALL: [ProjectType; 4] = [
        ProjectType::ReactApp,
        ProjectType::ReactComponent,
        ProjectType::WebApp,
        ProjectType::WebModule,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::ReactApp => "react-app",
            ProjectType::ReactComponent => "react-component",
            ProjectType::WebApp => "web-app",
            ProjectType::WebModule => "web-module",
        }
    }

    /// Whether this kind produces an app (HTML entry point) rather than a module.
    pub fn is_app(&self) -> bool {
        matches!(self, ProjectType::ReactApp | ProjectType::WebApp)
    }

    pub(crate) fn joined() -> String {
        Self::ALL
            .iter()
            .map(ProjectType::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_supported_kind() {
        for kind in ProjectType::ALL {
            assert_eq!(kind.as_str().parse::<ProjectType>(), Ok(kind));
        }
    }

    #[test]
    fn rejects_unknown_kind() {
        assert_eq!(
            "vue-app".parse::<ProjectType>(),
            Err("vue-app".to_string())
        );
    }

    #[test]
    fn serde_uses_kebab_case() {
        let value = serde_json::to_value(ProjectType::ReactComponent).unwrap();
        assert_eq!(value, serde_json::json!("react-component"));
    }
}
