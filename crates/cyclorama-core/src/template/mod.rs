//! Template module - pure text substitution template engine
//!
//! Pages are written as `.j2` text files rendered against the picks made so
//! far and the static `[data]` table of `cyclorama.toml`. The output is plain
//! text; the engine never interprets the markup around its tags.
//!
//! ## Syntax
//!
//! - Placeholders: `{{key}}` or `{{ key }}`, nested `{{a.b}}`, pick labels `{{color.label}}`
//! - Conditionals: `{{if color == "red"}} ... {{else}} ... {{/if}}` (also `!=`, `{{if key}}`)
//! - List iteration: `{{each items |item|}} ... {{/each}}`
//! - Function calls: `{{link("Onward", "next.md")}}`
//! - Escape sequences: `\{{literal}}`
//!
//! Picks are [`TrackedValue`]s: reading one records its variable in the
//! render's [`TouchSet`].

pub mod engine;
pub mod error;
pub mod functions;
pub mod tracked;

pub use engine::{render, TemplateContext, TemplateEngine};
pub use error::TemplateError;
pub use functions::{FunctionError, NoFunctions, TemplateFunctions};
pub use tracked::{touch_set, TouchSet, TrackedValue};
