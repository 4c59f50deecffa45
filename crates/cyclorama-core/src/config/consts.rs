//! Defaults shared by the library and the command line

/// Config file looked up in the source directory
pub const CONFIG_FILE: &str = "cyclorama.toml";

/// Extension of page templates on disk
pub const DEFAULT_TEMPLATE_EXTENSION: &str = "j2";

/// Heading line of the breadcrumb block
pub const DEFAULT_BREADCRUMB_HEADING: &str = "Choices that lead here:";
