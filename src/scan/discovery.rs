//! Candidate discovery.
//!
//! Pure selection step: produces the ordered list of convertible scripts
//! without performing any conversion, so the per-file pipeline can be tested
//! against a plain list of paths.

use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

use crate::convert::PathMapper;

/// Recursively enumerate every file under `source_dir` whose name carries
/// the mapper's input suffix.
///
/// Entries are sorted by file name within each directory, so the traversal
/// order is deterministic across runs. Unreadable entries inside the tree
/// are skipped with a warning; only a missing or non-directory `source_dir`
/// refuses the walk.
pub fn discover(source_dir: &Path, mapper: &PathMapper) -> crate::Result<Vec<PathBuf>> {
    if !source_dir.is_dir() {
        return Err(crate::Error::InvalidInput(format!(
            "{} does not exist or is not a directory",
            source_dir.display()
        )));
    }

    let mut candidates = Vec::new();
    for entry in WalkDir::new(source_dir)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("skipping unreadable entry: {e}");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        if mapper.matches(&entry.file_name().to_string_lossy()) {
            candidates.push(entry.into_path());
        }
    }

    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn mapper() -> PathMapper {
        PathMapper::new(".cy.ts", "_gherkin.txt")
    }

    fn touch(dir: &Path, relative: &str) {
        let path = dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "describe('x')").unwrap();
    }

    #[test]
    fn test_discover_rejects_missing_directory() {
        let result = discover(Path::new("/nonexistent/suite"), &mapper());
        assert!(matches!(result, Err(crate::Error::InvalidInput(_))));
    }

    #[test]
    fn test_discover_rejects_plain_file_as_source() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "lone.cy.ts");
        let result = discover(&dir.path().join("lone.cy.ts"), &mapper());
        assert!(matches!(result, Err(crate::Error::InvalidInput(_))));
    }

    #[test]
    fn test_discover_filters_by_suffix() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "login.cy.ts");
        touch(dir.path(), "helper.ts");
        touch(dir.path(), "notes.md");

        let found = discover(dir.path(), &mapper()).unwrap();
        assert_eq!(found.len(), 1);
        assert!(found[0].ends_with("login.cy.ts"));
    }

    #[test]
    fn test_discover_recurses_into_subdirectories() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "top.cy.ts");
        touch(dir.path(), "auth/login.cy.ts");
        touch(dir.path(), "auth/sso/saml.cy.ts");

        let found = discover(dir.path(), &mapper()).unwrap();
        assert_eq!(found.len(), 3);
    }

    #[test]
    fn test_discover_orders_siblings_lexically() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "c.cy.ts");
        touch(dir.path(), "a.cy.ts");
        touch(dir.path(), "b.cy.ts");

        let found = discover(dir.path(), &mapper()).unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, ["a.cy.ts", "b.cy.ts", "c.cy.ts"]);
    }

    #[test]
    fn test_discover_is_deterministic_across_runs() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "b/two.cy.ts");
        touch(dir.path(), "a/one.cy.ts");
        touch(dir.path(), "zero.cy.ts");

        let first = discover(dir.path(), &mapper()).unwrap();
        let second = discover(dir.path(), &mapper()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_discover_empty_tree_yields_nothing() {
        let dir = TempDir::new().unwrap();
        let found = discover(dir.path(), &mapper()).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_discover_ignores_directories_named_like_scripts() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("odd.cy.ts")).unwrap();
        touch(dir.path(), "odd.cy.ts/inner.cy.ts");

        let found = discover(dir.path(), &mapper()).unwrap();
        assert_eq!(found.len(), 1);
        assert!(found[0].ends_with("inner.cy.ts"));
    }
}
