//! Writing variant files

use crate::error::{CycloramaError, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Create the output directory
pub fn prepare_out_dir(out_dir: &Path) -> Result<()> {
    fs::create_dir_all(out_dir).map_err(|source| CycloramaError::OutputWriteFailed {
        path: out_dir.to_path_buf(),
        source,
    })
}

/// Write `content` to `out_dir/key`, replacing any existing file
///
/// The text goes to a temporary file next to the destination which is then
/// renamed over it, so readers never see a half-written page.
pub fn write_variant(out_dir: &Path, key: &str, content: &str) -> Result<PathBuf> {
    let path = out_dir.join(key);
    let parent = path.parent().unwrap_or(out_dir).to_path_buf();
    let failed = |source| CycloramaError::OutputWriteFailed {
        path: path.clone(),
        source,
    };

    fs::create_dir_all(&parent).map_err(failed)?;
    let mut file = NamedTempFile::new_in(&parent).map_err(failed)?;
    file.write_all(content.as_bytes()).map_err(failed)?;
    file.persist(&path).map_err(|e| failed(e.error))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cyclorama_testkit::temp_dir_in_workspace;

    #[test]
    fn test_write_variant_creates_nested_dirs() {
        let temp = temp_dir_in_workspace();
        let path = write_variant(temp.path(), "rooms/cave_colorred.md", "Dark").unwrap();

        assert_eq!(path, temp.path().join("rooms/cave_colorred.md"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "Dark");
    }

    #[test]
    fn test_write_variant_overwrites() {
        let temp = temp_dir_in_workspace();
        write_variant(temp.path(), "a.md", "old").unwrap();
        let path = write_variant(temp.path(), "a.md", "new").unwrap();

        assert_eq!(fs::read_to_string(path).unwrap(), "new");
        let entries = fs::read_dir(temp.path()).unwrap().count();
        assert_eq!(entries, 1, "no temporary files left behind");
    }

    #[test]
    fn test_prepare_out_dir_fails_on_file() {
        let temp = temp_dir_in_workspace();
        let blocker = temp.path().join("site");
        fs::write(&blocker, "not a dir").unwrap();

        let err = prepare_out_dir(&blocker).unwrap_err();
        assert!(matches!(err, CycloramaError::OutputWriteFailed { .. }));
        assert!(!err.is_content_defect());
    }
}
