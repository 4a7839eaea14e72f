//! Inlining the runtime manifest chunk into the generated HTML.
//!
//! The bundler emits the chunk manifest as its own small file. After a
//! successful bundle it is moved into a `<script>` in `index.html` so the
//! page needs one request less, and the separate files are removed.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{BuildError, Result};

pub const HTML_FILE: &str = "index.html";
pub const MANIFEST_FILE: &str = "manifest.js";
pub const MANIFEST_MAP_FILE: &str = "manifest.js.map";

/// Drop the trailing source map pragma and any leading `//` banner lines.
///
/// `//` lines inside the code are kept, they may be part of a string.
pub fn strip_comments(source: &str) -> String {
    let mut lines: Vec<&str> = source.lines().collect();
    while lines.last().is_some_and(|line| line.trim().is_empty()) {
        lines.pop();
    }
    if lines.last().is_some_and(|line| is_source_map_pragma(line)) {
        lines.pop();
    }

    let start = lines
        .iter()
        .position(|line| !line.trim_start().starts_with("//"))
        .unwrap_or(lines.len());
    lines[start..].join("\n")
}

fn is_source_map_pragma(line: &str) -> bool {
    let line = line.trim();
    line.starts_with("//# sourceMappingURL=") || line.starts_with("//@ sourceMappingURL=")
}

/// Insert `<script>{manifest}</script>` right before the first `</head>`.
///
/// Returns the HTML unchanged when there is no `</head>`.
pub fn inject_manifest(html: &str, manifest: &str) -> String {
    if !html.contains("</head>") {
        warn!("no </head> in {HTML_FILE}, manifest was not inlined");
        return html.to_string();
    }
    html.replacen("</head>", &format!("<script>{manifest}</script></head>"), 1)
}

/// Inline `manifest.js` into `index.html` under `out_dir` and delete the
/// manifest and its source map.
pub fn inline_manifest(out_dir: &Path) -> Result<()> {
    let html_path = out_dir.join(HTML_FILE);
    let manifest_path = out_dir.join(MANIFEST_FILE);
    let map_path = out_dir.join(MANIFEST_MAP_FILE);

    let html = fs::read_to_string(&html_path).map_err(inline_error(&html_path))?;
    let manifest = fs::read_to_string(&manifest_path).map_err(inline_error(&manifest_path))?;

    let manifest = strip_comments(&manifest);
    fs::write(&html_path, inject_manifest(&html, &manifest)).map_err(inline_error(&html_path))?;

    fs::remove_file(&manifest_path).map_err(inline_error(&manifest_path))?;
    fs::remove_file(&map_path).map_err(inline_error(&map_path))?;

    debug!(html = %html_path.display(), "inlined manifest");
    Ok(())
}

fn inline_error(path: &Path) -> impl FnOnce(std::io::Error) -> BuildError {
    let path: PathBuf = path.to_path_buf();
    move |source| BuildError::ManifestInline { path, source }
}
