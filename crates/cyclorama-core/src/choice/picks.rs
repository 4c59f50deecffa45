use std::collections::BTreeMap;
use std::fmt;

use crate::graph::VarSet;

/// Choices accumulated along one path: var → picked value, or `None` while
/// the question is asked but not yet answered
///
/// Picks are values; branching copies them ([`Picks::with_pick`]) so sibling
/// paths never see each other's choices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Picks(BTreeMap<String, Option<String>>);

impl Picks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `var` has an entry, answered or not
    pub fn contains(&self, var: &str) -> bool {
        self.0.contains_key(var)
    }

    /// Picked value of `var`; `None` if absent or unresolved
    pub fn value(&self, var: &str) -> Option<&str> {
        self.0.get(var).and_then(|v| v.as_deref())
    }

    pub fn is_unresolved(&self, var: &str) -> bool {
        matches!(self.0.get(var), Some(None))
    }

    /// Mark `var` as asked; returns false if it already had an entry
    pub fn declare(&mut self, var: &str) -> bool {
        if self.contains(var) {
            return false;
        }
        self.0.insert(var.to_string(), None);
        true
    }

    /// Copy with `var` set to `value`
    pub fn with_pick(&self, var: &str, value: &str) -> Self {
        let mut next = self.clone();
        next.0.insert(var.to_string(), Some(value.to_string()));
        next
    }

    /// Resolved picks whose var is in `vars`, sorted by var
    pub fn restricted_to<'a>(
        &'a self,
        vars: &'a VarSet,
    ) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.resolved().filter(move |(var, _)| vars.contains(*var))
    }

    /// Resolved picks, sorted by var
    pub fn resolved(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .filter_map(|(var, value)| Some((var.as_str(), value.as_deref()?)))
    }

    /// All entries, sorted by var
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.0.iter().map(|(var, value)| (var.as_str(), value.as_deref()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Picks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (var, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match value {
                Some(value) => write!(f, "{}={}", var, value)?,
                None => write!(f, "{}=?", var)?,
            }
        }
        f.write_str("}")
    }
}
