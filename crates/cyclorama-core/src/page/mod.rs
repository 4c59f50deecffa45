//! Pages: template lookup, rendering one instance, and naming its output

pub mod breadcrumb;
pub mod source;
pub mod variant;
pub mod visitor;

pub use breadcrumb::breadcrumbs;
pub use source::{validate_page_id, DirSource, MemorySource, PageSource};
pub use variant::{variant_href, variant_key};
pub use visitor::{visit_page, Visit, VisitContext, VisitMode};
