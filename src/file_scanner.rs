use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use glob::{Pattern, glob};
use tracing::{debug, warn};
use walkdir::WalkDir;

pub const COMPONENT_EXTENSION: &str = "svelte";

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal directory paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Result of scanning files.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Component files, sorted and deduplicated.
    pub files: Vec<PathBuf>,
    pub skipped_count: usize,
}

/// Expand configured includes into existing roots under `base_dir`.
pub fn resolve_includes(base_dir: &Path, includes: &[String]) -> Vec<PathBuf> {
    let mut roots = Vec::new();
    for inc in includes {
        let full = base_dir.join(inc);
        if is_glob_pattern(inc) {
            match glob(&full.to_string_lossy()) {
                Ok(entries) => roots.extend(entries.flatten()),
                Err(e) => warn!(pattern = %inc, error = %e, "invalid include pattern"),
            }
        } else if full.exists() {
            roots.push(full);
        } else {
            debug!(path = %full.display(), "include path does not exist");
        }
    }
    roots
}

/// Collect component files under `roots`.
///
/// A root that is a file is taken as-is. Directories are walked for
/// `.svelte` files; paths matching an ignore pattern are skipped.
pub fn scan_files(roots: &[PathBuf], ignore_patterns: &[String]) -> ScanResult {
    let mut files: BTreeSet<PathBuf> = BTreeSet::new();
    let mut skipped_count = 0;

    let patterns: Vec<Pattern> = ignore_patterns
        .iter()
        .filter_map(|p| match Pattern::new(p) {
            Ok(pattern) => Some(pattern),
            Err(e) => {
                warn!(pattern = %p, error = %e, "invalid ignore pattern");
                None
            }
        })
        .collect();
    let is_ignored = |path: &Path| {
        let path_str = path.to_string_lossy();
        patterns.iter().any(|p| p.matches(&path_str))
    };

    for root in roots {
        if root.is_file() {
            files.insert(root.clone());
            continue;
        }
        if !root.exists() {
            skipped_count += 1;
            warn!(path = %root.display(), "path does not exist");
            continue;
        }

        for entry in WalkDir::new(root) {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    skipped_count += 1;
                    warn!(error = %e, "cannot access path");
                    continue;
                }
            };
            let path = entry.path();
            if is_ignored(path) {
                continue;
            }
            if entry.file_type().is_file() && is_component_file(path) {
                files.insert(path.to_path_buf());
            }
        }
    }

    ScanResult {
        files: files.into_iter().collect(),
        skipped_count,
    }
}

pub fn is_component_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(COMPONENT_EXTENSION))
}

#[cfg(test)]
mod tests {
    use crate::file_scanner::*;
    use std::fs;
    use tempfile::tempdir;

    fn touch(root: &Path, path: &str) -> PathBuf {
        let full = root.join(path);
        fs::create_dir_all(full.parent().unwrap()).unwrap();
        fs::write(&full, "").unwrap();
        full
    }

    #[test]
    fn test_scan_finds_components_sorted() {
        let dir = tempdir().unwrap();
        let b = touch(dir.path(), "src/b/Button.svelte");
        let a = touch(dir.path(), "src/a/Alert.svelte");
        touch(dir.path(), "src/a/helpers.js");

        let result = scan_files(&[dir.path().join("src")], &[]);
        assert_eq!(result.files, vec![a, b]);
        assert_eq!(result.skipped_count, 0);
    }

    #[test]
    fn test_scan_skips_ignored_paths() {
        let dir = tempdir().unwrap();
        let kept = touch(dir.path(), "src/App.svelte");
        touch(dir.path(), "src/node_modules/lib/Dep.svelte");

        let result = scan_files(
            &[dir.path().join("src")],
            &["**/node_modules/**".to_string()],
        );
        assert_eq!(result.files, vec![kept]);
    }

    #[test]
    fn test_explicit_file_is_kept() {
        let dir = tempdir().unwrap();
        let file = touch(dir.path(), "Widget.html");
        let result = scan_files(&[file.clone(), file.clone()], &[]);
        assert_eq!(result.files, vec![file]);
    }

    #[test]
    fn test_missing_root_is_skipped() {
        let dir = tempdir().unwrap();
        let result = scan_files(&[dir.path().join("missing")], &[]);
        assert!(result.files.is_empty());
        assert_eq!(result.skipped_count, 1);
    }

    #[test]
    fn test_resolve_includes_literal_and_glob() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::create_dir_all(dir.path().join("packages/ui/src")).unwrap();

        let mut roots = resolve_includes(
            dir.path(),
            &[
                "src".to_string(),
                "packages/*/src".to_string(),
                "missing".to_string(),
            ],
        );
        roots.sort();
        assert_eq!(
            roots,
            vec![
                dir.path().join("packages/ui/src"),
                dir.path().join("src"),
            ]
        );
    }
}
