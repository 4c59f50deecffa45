use serde::{Deserialize, Serialize};
use std::path::Path;

use super::consts::{CONFIG_FILE, DEFAULT_BREADCRUMB_HEADING, DEFAULT_TEMPLATE_EXTENSION};
use crate::error::{CycloramaError, Result};

/// cyclorama.toml schema
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub render: RenderConfig,
    /// Static values visible to every template
    #[serde(default)]
    pub data: toml::Table,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_template_extension")]
    pub template_extension: String,
    #[serde(default = "default_breadcrumb_heading")]
    pub breadcrumb_heading: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            template_extension: default_template_extension(),
            breadcrumb_heading: default_breadcrumb_heading(),
        }
    }
}

fn default_template_extension() -> String {
    DEFAULT_TEMPLATE_EXTENSION.to_string()
}

fn default_breadcrumb_heading() -> String {
    DEFAULT_BREADCRUMB_HEADING.to_string()
}

impl Config {
    /// Read and validate a cyclorama.toml
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| CycloramaError::ConfigParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// cyclorama.toml in `dir`, or defaults when there is none
    pub fn load_or_default(dir: impl AsRef<Path>) -> Result<Self> {
        let path = dir.as_ref().join(CONFIG_FILE);
        if path.is_file() {
            Self::from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.template_extension().is_empty() {
            return Err(CycloramaError::ConfigInvalidValue {
                field: "render.template_extension".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if self.render.breadcrumb_heading.trim().is_empty() {
            return Err(CycloramaError::ConfigInvalidValue {
                field: "render.breadcrumb_heading".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Template extension without a leading dot
    pub fn template_extension(&self) -> &str {
        let ext = self.render.template_extension.trim();
        ext.strip_prefix('.').unwrap_or(ext)
    }

    /// `[data]` as the root value of a template context
    pub fn data_value(&self) -> toml::Value {
        toml::Value::Table(self.data.clone())
    }
}
