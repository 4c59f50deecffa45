// Core modules
pub mod choice;
pub mod config;
pub mod error;
pub mod generate;
pub mod graph;
pub mod page;
pub mod template;

// Re-export commonly used types
pub use config::Config;
pub use error::{CycloramaError, Result};
pub use generate::{GenerateReport, Generator};
