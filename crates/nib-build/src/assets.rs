//! Output directory cleaning and public asset copying.

use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;
use walkdir::WalkDir;

/// Placeholder files kept in `public/` only so the directory exists in git.
const PLACEHOLDER_SUFFIXES: &[&str] = &[".gitkeep"];

/// Remove everything inside `out_dir`, keeping the directory itself.
///
/// A missing directory is fine. A path that exists but is not a directory is
/// an error rather than something to delete.
pub fn clean_output_dir(out_dir: &Path) -> io::Result<()> {
    if !out_dir.exists() {
        return Ok(());
    }
    if !out_dir.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("output path exists but is not a directory: {}", out_dir.display()),
        ));
    }

    for entry in fs::read_dir(out_dir)? {
        let path = entry?.path();
        if path.is_dir() {
            fs::remove_dir_all(&path)?;
        } else {
            fs::remove_file(&path)?;
        }
    }
    Ok(())
}

/// Copy the contents of `from` into `to`, skipping placeholder files.
///
/// `to` is always created. Returns the number of files copied, which is zero
/// when `from` doesn't exist.
pub fn copy_public_dir(from: &Path, to: &Path) -> io::Result<usize> {
    fs::create_dir_all(to)?;
    if !from.is_dir() {
        debug!(path = %from.display(), "no public directory, nothing to copy");
        return Ok(0);
    }

    let mut copied = 0;
    for entry in WalkDir::new(from).min_depth(1) {
        let entry = entry.map_err(io::Error::other)?;
        let relative = entry
            .path()
            .strip_prefix(from)
            .map_err(io::Error::other)?;
        let target = to.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
            continue;
        }
        if is_placeholder(entry.file_name().to_string_lossy().as_ref()) {
            continue;
        }
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(entry.path(), &target)?;
        copied += 1;
    }

    debug!(copied, from = %from.display(), to = %to.display(), "copied public assets");
    Ok(copied)
}

fn is_placeholder(file_name: &str) -> bool {
    PLACEHOLDER_SUFFIXES
        .iter()
        .any(|suffix| file_name.ends_with(suffix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn clean_keeps_the_directory() {
        let dir = TempDir::new().unwrap();
        let dist = dir.path().join("dist");
        fs::create_dir_all(dist.join("nested")).unwrap();
        fs::write(dist.join("app.js"), "old").unwrap();
        fs::write(dist.join("nested/vendor.js"), "old").unwrap();

        clean_output_dir(&dist).unwrap();

        assert!(dist.is_dir());
        assert_eq!(fs::read_dir(&dist).unwrap().count(), 0);
    }

    #[test]
    fn clean_missing_dir_is_ok() {
        let dir = TempDir::new().unwrap();
        clean_output_dir(&dir.path().join("dist")).unwrap();
    }

    #[test]
    fn clean_refuses_a_file() {
        let dir = TempDir::new().unwrap();
        let dist = dir.path().join("dist");
        fs::write(&dist, "not a dir").unwrap();

        let err = clean_output_dir(&dist).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(dist.is_file());
    }

    #[test]
    fn copies_nested_assets_without_placeholders() {
        let dir = TempDir::new().unwrap();
        let public = dir.path().join("public");
        fs::create_dir_all(public.join("img/empty")).unwrap();
        fs::write(public.join("favicon.ico"), "ico").unwrap();
        fs::write(public.join("img/logo.png"), "png").unwrap();
        fs::write(public.join("img/empty/.gitkeep"), "").unwrap();
        fs::write(public.join(".gitkeep"), "").unwrap();

        let dist = dir.path().join("dist");
        let copied = copy_public_dir(&public, &dist).unwrap();

        assert_eq!(copied, 2);
        assert_eq!(fs::read_to_string(dist.join("favicon.ico")).unwrap(), "ico");
        assert_eq!(fs::read_to_string(dist.join("img/logo.png")).unwrap(), "png");
        assert!(dist.join("img/empty").is_dir());
        assert!(!dist.join(".gitkeep").exists());
        assert!(!dist.join("img/empty/.gitkeep").exists());
    }

    #[test]
    fn missing_public_dir_still_creates_output() {
        let dir = TempDir::new().unwrap();
        let dist = dir.path().join("dist");

        let copied = copy_public_dir(&dir.path().join("public"), &dist).unwrap();

        assert_eq!(copied, 0);
        assert!(dist.is_dir());
    }
}
