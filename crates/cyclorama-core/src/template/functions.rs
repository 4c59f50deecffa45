//! Functions callable from templates as `{{ name("arg", key) }}`

/// Failure reported by a template function
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FunctionError {
    /// No function with this name is registered
    Unknown,
    /// The function ran and rejected its input
    Failed(String),
}

/// Host for template function calls
///
/// Calls happen in template order and the returned text is spliced inline.
/// Implementors may keep state across calls of one render.
pub trait TemplateFunctions {
    fn call(&mut self, name: &str, args: &[String]) -> Result<String, FunctionError>;
}

/// Host with no functions; every call is [`FunctionError::Unknown`]
#[derive(Debug, Default, Clone, Copy)]
pub struct NoFunctions;

impl TemplateFunctions for NoFunctions {
    fn call(&mut self, _name: &str, _args: &[String]) -> Result<String, FunctionError> {
        Err(FunctionError::Unknown)
    }
}
