//! Config-building helpers handed to config factories.

use serde::Deserialize;
use serde_json::{json, Map, Value};

/// The subset of `package.json` used to build a banner comment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageInfo {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub license: Option<String>,
}

/// Bundler configuration helpers exposed through [`crate::ConfigContext`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BundlerApi;

impl BundlerApi {
    /// Expand a `package -> global` map into the bundler's UMD externals form.
    pub fn externals(&self, externals: &Map<String, Value>) -> Map<String, Value> {
        externals
            .iter()
            .map(|(package, global)| {
                let entry = json!({
                    "root": global,
                    "commonjs2": package,
                    "commonjs": package,
                    "amd": package,
                });
                (package.clone(), entry)
            })
            .collect()
    }

    /// Banner comment text for a package build.
    pub fn banner(&self, package: &PackageInfo) -> String {
        let mut banner = format!("{} {}", package.name, package.version);
        if let Some(homepage) = &package.homepage {
            banner.push_str(&format!(" - {homepage}"));
        }
        if let Some(license) = &package.license {
            banner.push_str(&format!("\n{license} Licensed"));
        }
        banner
    }
}
