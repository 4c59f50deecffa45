//! Template lookup by page id

use crate::error::{CycloramaError, Result};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

/// Resolves a page id to its template body
pub trait PageSource {
    fn load(&self, page: &str) -> Result<String>;
}

/// Reject empty ids and ids that leave the source directory
///
/// Only plain relative components are accepted; `..`, `.`, roots and
/// drive prefixes are all refused.
pub fn validate_page_id(page: &str) -> Result<()> {
    let path = Path::new(page);
    let plain = !page.is_empty()
        && !path.is_absolute()
        && path.components().all(|c| matches!(c, Component::Normal(_)));
    if !plain {
        return Err(CycloramaError::PagePathEscape(page.to_string()));
    }
    Ok(())
}

/// Templates stored as `<root>/<page>.<extension>`
#[derive(Debug)]
pub struct DirSource {
    root: PathBuf,
    extension: String,
    cache: RefCell<HashMap<String, String>>,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            extension: extension.into(),
            cache: RefCell::new(HashMap::new()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Template file backing `page`
    pub fn template_path(&self, page: &str) -> Result<PathBuf> {
        validate_page_id(page)?;
        Ok(self.root.join(format!("{}.{}", page, self.extension)))
    }
}

impl PageSource for DirSource {
    fn load(&self, page: &str) -> Result<String> {
        if let Some(body) = self.cache.borrow().get(page) {
            return Ok(body.clone());
        }

        let path = self.template_path(page)?;
        let body = match std::fs::read_to_string(&path) {
            Ok(body) => body,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(CycloramaError::PageNotFound {
                    page: page.to_string(),
                    path,
                })
            }
            Err(e) => return Err(CycloramaError::IoError(e)),
        };

        self.cache
            .borrow_mut()
            .insert(page.to_string(), body.clone());
        Ok(body)
    }
}

/// Templates held in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    pages: HashMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, page: impl Into<String>, body: impl Into<String>) -> Self {
        self.insert(page, body);
        self
    }

    pub fn insert(&mut self, page: impl Into<String>, body: impl Into<String>) {
        self.pages.insert(page.into(), body.into());
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MemorySource {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut source = Self::new();
        for (page, body) in iter {
            source.insert(page, body);
        }
        source
    }
}

impl PageSource for MemorySource {
    fn load(&self, page: &str) -> Result<String> {
        validate_page_id(page)?;
        self.pages
            .get(page)
            .cloned()
            .ok_or_else(|| CycloramaError::PageNotFound {
                page: page.to_string(),
                path: PathBuf::from(page),
            })
    }
}
