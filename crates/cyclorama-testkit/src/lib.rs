//! Test utilities for cyclorama
//!
//! Shared by the unit tests of `cyclorama-core` and the CLI integration
//! tests: temporary directories under the workspace `.tmp/` and canned
//! stories written as template files.

pub mod fixtures;

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Extension stories are written with
pub const TEMPLATE_EXTENSION: &str = "j2";

/// Creates a temporary directory within `.tmp/` at the current directory
///
/// The directory is removed when the returned `TempDir` is dropped.
///
/// # Panics
///
/// Panics if `.tmp/` or the temporary subdirectory cannot be created.
///
/// # Examples
///
/// ```rust
/// use cyclorama_testkit::temp_dir_in_workspace;
///
/// let temp = temp_dir_in_workspace();
/// std::fs::write(temp.path().join("index.md.j2"), "Hello").unwrap();
/// ```
pub fn temp_dir_in_workspace() -> TempDir {
    try_temp_dir_in_workspace().expect("Failed to create temporary directory in .tmp/")
}

/// Alternative with Result for non-test code
pub fn try_temp_dir_in_workspace() -> std::io::Result<TempDir> {
    let tmp_base = std::env::current_dir()?.join(".tmp");
    std::fs::create_dir_all(&tmp_base)?;
    TempDir::new_in(&tmp_base)
}

/// Write `(page id, template body)` pairs as `<dir>/<page>.j2`
///
/// Returns the path of the first page's template, which is what the CLI
/// takes as its start page.
pub fn write_pages(dir: &Path, pages: &[(&str, &str)]) -> PathBuf {
    let mut first = None;
    for (page, body) in pages {
        let path = dir.join(format!("{}.{}", page, TEMPLATE_EXTENSION));
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create page directory");
        }
        std::fs::write(&path, body).expect("Failed to write page template");
        first.get_or_insert(path);
    }
    first.expect("write_pages needs at least one page")
}

/// Write a `cyclorama.toml` into `dir`
pub fn write_config(dir: &Path, content: &str) {
    std::fs::write(dir.join("cyclorama.toml"), content).expect("Failed to write cyclorama.toml");
}

/// Sorted file paths under `dir`, relative and `/`-separated
pub fn list_files(dir: &Path) -> Vec<String> {
    fn walk(root: &Path, dir: &Path, out: &mut Vec<String>) {
        let entries = std::fs::read_dir(dir).expect("Failed to read directory");
        for entry in entries {
            let path = entry.expect("Failed to read directory entry").path();
            if path.is_dir() {
                walk(root, &path, out);
            } else if let Ok(relative) = path.strip_prefix(root) {
                let parts: Vec<_> = relative
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect();
                out.push(parts.join("/"));
            }
        }
    }

    let mut files = Vec::new();
    walk(dir, dir, &mut files);
    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_dir_is_under_dot_tmp() {
        let temp = temp_dir_in_workspace();
        assert!(temp.path().exists());
        assert_eq!(
            temp.path().parent().and_then(|p| p.file_name()),
            Some(std::ffi::OsStr::new(".tmp"))
        );
    }

    #[test]
    fn test_write_pages_and_list_files() {
        let temp = temp_dir_in_workspace();
        let start = write_pages(
            temp.path(),
            &[("index.md", "Hi"), ("rooms/cave.md", "Dark")],
        );

        assert_eq!(start, temp.path().join("index.md.j2"));
        assert_eq!(
            list_files(temp.path()),
            vec!["index.md.j2", "rooms/cave.md.j2"]
        );
    }
}
