//! Shared contexts for template engine tests

use crate::template::engine::TemplateContext;
use crate::template::tracked::{touch_set, TouchSet, TrackedValue};
use toml::{toml, Value};

/// Scalar values only
pub(super) fn simple_context() -> TemplateContext {
    let data = toml! {
        title = "The Cave"
        count = 42
        price = 9.99
        enabled = true
        date = 2026-01-15
    };
    TemplateContext::new(Value::Table(data))
}

/// Nested tables and arrays
pub(super) fn nested_context() -> TemplateContext {
    let data = toml! {
        [story]
        title = "The Cave"
        author = "Anonymous"

        [[story.rooms]]
        name = "Entrance"
        page = "entrance.md"

        [[story.rooms]]
        name = "Grotto"
        page = "grotto.md"
    };
    TemplateContext::new(Value::Table(data))
}

/// Static data plus picks; `color` resolved, `door` declared but unresolved
pub(super) fn picks_context() -> (TemplateContext, TouchSet) {
    let touched = touch_set();
    let picks = vec![
        TrackedValue::new(
            "color",
            Some("red".to_string()),
            Some("Red".to_string()),
            touched.clone(),
        ),
        TrackedValue::new("door", None, None, touched.clone()),
        TrackedValue::new(
            "weapon",
            Some("sword".to_string()),
            None,
            touched.clone(),
        ),
    ];
    let context = simple_context().with_picks(picks);
    (context, touched)
}

pub(super) fn touched_vars(touched: &TouchSet) -> Vec<String> {
    touched.borrow().iter().cloned().collect()
}
