use std::time::Duration;
use thiserror::Error;

/// Why a page template could not be rendered
///
/// Line numbers are 1-based and point at the line where the offending
/// `{{ ... }}` token ends.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// Neither a pick, a loop binding nor a data key
    #[error("Undefined key '{key}' at line {line}")]
    UndefinedKey { key: String, line: usize },

    #[error("Malformed syntax at line {line}: {message}")]
    MalformedSyntax { message: String, line: usize },

    /// A data array interpolated directly
    #[error("'{key}' is a list; iterate it with {{{{each {key} |item|}}}} ... {{{{/each}}}}")]
    ArrayOutsideEach { key: String },

    /// A data table interpolated directly
    #[error("'{key}' is a table; interpolate one of its fields such as {key}.name")]
    TableInterpolated { key: String },

    #[error("Unknown function '{name}' at line {line}")]
    UnknownFunction { name: String, line: usize },

    #[error("{name}() failed at line {line}: {message}")]
    FunctionFailed {
        name: String,
        message: String,
        line: usize,
    },

    #[error(
        "rendering gave up after {:.2}s (limit {:.2}s); look for an unclosed block",
        elapsed.as_secs_f64(),
        limit.as_secs_f64()
    )]
    Timeout { limit: Duration, elapsed: Duration },
}
