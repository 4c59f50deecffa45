//! Instrumented pick values
//!
//! A resolved pick is handed to the template as a [`TrackedValue`]. Every
//! read through it (comparison, interpolation, truthiness) records the
//! variable in a touch set shared with whoever rendered the page, which is
//! how the generator learns which picks a page actually depends on.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

/// Variables read during one render
pub type TouchSet = Rc<RefCell<BTreeSet<String>>>;

/// Create an empty touch set
pub fn touch_set() -> TouchSet {
    Rc::new(RefCell::new(BTreeSet::new()))
}

/// A pick exposed to templates; reads are recorded in the shared [`TouchSet`]
#[derive(Debug, Clone)]
pub struct TrackedValue {
    var: String,
    value: Option<String>,
    label: Option<String>,
    touched: TouchSet,
}

impl TrackedValue {
    /// `value == None` is a declared but unresolved pick
    pub fn new(
        var: impl Into<String>,
        value: Option<String>,
        label: Option<String>,
        touched: TouchSet,
    ) -> Self {
        Self {
            var: var.into(),
            value,
            label,
            touched,
        }
    }

    /// Variable identifier (not a read)
    pub fn var(&self) -> &str {
        &self.var
    }

    /// Raw option value
    pub fn value(&self) -> Option<&str> {
        self.touch();
        self.value.as_deref()
    }

    /// Display text of the chosen option, falling back to the raw value
    pub fn label(&self) -> Option<&str> {
        self.touch();
        self.label.as_deref().or(self.value.as_deref())
    }

    /// Compare the raw value; unresolved picks equal nothing
    pub fn equals(&self, other: &str) -> bool {
        self.value() == Some(other)
    }

    fn touch(&self) {
        let mut touched = self.touched.borrow_mut();
        if !touched.contains(&self.var) {
            touched.insert(self.var.clone());
        }
    }
}
