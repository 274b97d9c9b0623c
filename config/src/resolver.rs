//! # Config Path Resolution
//!
//! Finds a relative config path by walking up from the working directory,
//! so `ksail` run from `project/apps/` still finds `project/ksail.yaml`.

use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Resolve `path` against the working directory and its ancestors.
///
/// - Absolute paths are returned unchanged, without an existence check.
/// - Relative paths are joined onto the working directory, then onto each
///   parent in turn; the first candidate that exists wins.
/// - When nothing matches, the original relative path is returned as-is.
///   Callers treat a later "not found" as "use defaults".
///
/// Fails only when the working directory cannot be determined.
pub fn resolve_path(path: impl AsRef<Path>) -> io::Result<PathBuf> {
    let path = path.as_ref();
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir()?;
    Ok(resolve_path_from(&cwd, path))
}

/// Same search as [`resolve_path`], starting from `start` instead of the
/// working directory.
pub fn resolve_path_from(start: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }

    for dir in start.ancestors() {
        let candidate = dir.join(path);
        if candidate.exists() {
            debug!(requested = %path.display(), resolved = %candidate.display(), "resolved config path");
            return candidate;
        }
    }

    debug!(requested = %path.display(), "config path not found in any parent directory");
    path.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_absolute_path_is_returned_unchanged() {
        let path = Path::new("/definitely/not/here/ksail.yaml");
        assert_eq!(resolve_path(path).unwrap(), path);
    }

    #[test]
    fn test_finds_file_in_start_dir() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("kind.yaml"), "").unwrap();

        let resolved = resolve_path_from(temp.path(), Path::new("kind.yaml"));
        assert_eq!(resolved, temp.path().join("kind.yaml"));
    }

    #[test]
    fn test_finds_file_in_ancestor() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(temp.path().join("ksail.yaml"), "").unwrap();

        let resolved = resolve_path_from(&nested, Path::new("ksail.yaml"));
        assert_eq!(resolved, temp.path().join("ksail.yaml"));
    }

    #[test]
    fn test_nearest_match_wins() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("child");
        fs::create_dir_all(&nested).unwrap();
        fs::write(temp.path().join("ksail.yaml"), "").unwrap();
        fs::write(nested.join("ksail.yaml"), "").unwrap();

        let resolved = resolve_path_from(&nested, Path::new("ksail.yaml"));
        assert_eq!(resolved, nested.join("ksail.yaml"));
    }

    #[test]
    fn test_nested_relative_path() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("apps");
        fs::create_dir_all(temp.path().join("clusters")).unwrap();
        fs::create_dir_all(&nested).unwrap();
        fs::write(temp.path().join("clusters").join("kind.yaml"), "").unwrap();

        let resolved = resolve_path_from(&nested, Path::new("clusters/kind.yaml"));
        assert_eq!(resolved, temp.path().join("clusters").join("kind.yaml"));
    }

    #[test]
    fn test_missing_file_returns_original_relative_path() {
        let temp = TempDir::new().unwrap();
        let requested = Path::new("no-such-config-7f3a.yaml");

        let resolved = resolve_path_from(temp.path(), requested);
        assert_eq!(resolved, requested);
    }
}
