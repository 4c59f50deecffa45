//! Start page resolution shared by the commands

use anyhow::{Result, anyhow, bail};
use cyclorama_core::config::Config;
use cyclorama_core::page::DirSource;
use std::path::{Path, PathBuf};

/// Source directory, start page id and config of one invocation
pub struct Context {
    pub source_dir: PathBuf,
    pub start_page: String,
    pub config: Config,
    pub verbose: bool,
}

impl Context {
    /// Resolve a start page template path
    ///
    /// `story/index.md.j2` gives source directory `story/` and page id
    /// `index.md`. The config is read from the source directory.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `cyclorama.toml` exists but is invalid
    /// - The path does not end with the template extension
    /// - The template file does not exist
    pub fn new(start: &Path, verbose: bool) -> Result<Self> {
        let source_dir = match start.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let config = Config::load_or_default(&source_dir)?;

        let suffix = format!(".{}", config.template_extension());
        let file_name = start
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| anyhow!("Invalid start page path: {}", start.display()))?;
        let start_page = match file_name.strip_suffix(&suffix) {
            Some(page) if !page.is_empty() => page.to_string(),
            _ => bail!(
                "Start page '{}' must be a template ending in '{}'",
                start.display(),
                suffix
            ),
        };

        if !start.is_file() {
            bail!("Start page not found: {}", start.display());
        }

        Ok(Self {
            source_dir,
            start_page,
            config,
            verbose,
        })
    }

    pub fn source(&self) -> DirSource {
        DirSource::new(&self.source_dir, self.config.template_extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cyclorama_testkit::{temp_dir_in_workspace, write_config, write_pages};

    #[test]
    fn test_resolves_page_id_and_source_dir() {
        let temp = temp_dir_in_workspace();
        let start = write_pages(temp.path(), &[("index.md", "Hi")]);

        let ctx = Context::new(&start, false).unwrap();
        assert_eq!(ctx.start_page, "index.md");
        assert_eq!(ctx.source_dir, temp.path());
    }

    #[test]
    fn test_uses_configured_extension() {
        let temp = temp_dir_in_workspace();
        write_config(temp.path(), "[render]\ntemplate_extension = \".tmpl\"\n");
        let start = temp.path().join("index.html.tmpl");
        std::fs::write(&start, "Hi").unwrap();

        let ctx = Context::new(&start, false).unwrap();
        assert_eq!(ctx.start_page, "index.html");
    }

    #[test]
    fn test_rejects_wrong_extension() {
        let temp = temp_dir_in_workspace();
        let start = temp.path().join("index.md");
        std::fs::write(&start, "Hi").unwrap();

        let err = Context::new(&start, false).err().unwrap();
        assert!(err.to_string().contains("must be a template ending in '.j2'"));
    }

    #[test]
    fn test_rejects_missing_start() {
        let temp = temp_dir_in_workspace();
        let err = Context::new(&temp.path().join("ghost.md.j2"), false)
            .err()
            .unwrap();
        assert!(err.to_string().contains("Start page not found"));
    }
}
