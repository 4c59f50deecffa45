use std::path::PathBuf;
use thiserror::Error;

use crate::template::TemplateError;

#[derive(Error, Debug)]
pub enum CycloramaError {
    // Content errors
    #[error("CONTENT_QUESTION_REDECLARED: question '{var}' is already declared on this path (page '{page}')")]
    QuestionRedeclared { page: String, var: String },

    #[error("CONTENT_OPTION_UNDECLARED: option for '{var}' before its question was asked (page '{page}')")]
    OptionUndeclared { page: String, var: String },

    #[error("CONTENT_OPTION_RESOLVED: option for '{var}' but '{var}' is already picked on this path (page '{page}')")]
    OptionResolved { page: String, var: String },

    #[error("CONTENT_INVALID_VARIABLE: '{var}' is not a valid question identifier (page '{page}')")]
    InvalidVariable { page: String, var: String },

    // Page errors
    #[error("PAGE_NOT_FOUND: no template for page '{page}' at {}", path.display())]
    PageNotFound { page: String, path: PathBuf },

    #[error("PAGE_PATH_ESCAPE: page id '{0}' resolves outside the source directory")]
    PagePathEscape(String),

    #[error("TEMPLATE_ERROR: page '{page}': {source}")]
    Template {
        page: String,
        #[source]
        source: TemplateError,
    },

    // Config errors
    #[error("CONFIG_PARSE_ERROR: {0}")]
    ConfigParseError(String),

    #[error("CONFIG_INVALID_VALUE: {field}: {reason}")]
    ConfigInvalidValue { field: String, reason: String },

    // Output errors
    #[error("OUTPUT_WRITE_FAILED: {}: {source}", path.display())]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO_ERROR: {0}")]
    IoError(#[from] std::io::Error),
}

impl CycloramaError {
    /// Errors confined to one (page, picks) instance; the run skips the page
    /// and continues. Everything else aborts the run.
    pub fn is_content_defect(&self) -> bool {
        matches!(
            self,
            Self::QuestionRedeclared { .. }
                | Self::OptionUndeclared { .. }
                | Self::OptionResolved { .. }
                | Self::InvalidVariable { .. }
                | Self::PageNotFound { .. }
                | Self::PagePathEscape(_)
                | Self::Template { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, CycloramaError>;
