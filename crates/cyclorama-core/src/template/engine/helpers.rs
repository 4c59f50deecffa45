//! Key resolution and value conversion

use crate::template::error::TemplateError;
use crate::template::tracked::TrackedValue;
use std::borrow::Cow;
use toml::Value;

use super::TemplateContext;

/// Which part of a pick a key refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PickField {
    /// `{{color}}` / `{{color.value}}`
    Value,
    /// `{{color.label}}`
    Label,
}

/// A key or literal resolved against a context
#[derive(Debug, Clone)]
pub(crate) enum Resolved<'a> {
    Literal(Cow<'a, str>),
    Data(&'a Value),
    Pick(&'a TrackedValue, PickField),
}

impl<'a> Resolved<'a> {
    /// Text of a scalar; reading a pick records it
    pub(crate) fn text(&self) -> Option<Cow<'a, str>> {
        match *self {
            Resolved::Literal(ref s) => Some(s.clone()),
            Resolved::Data(value) => scalar_text(value).map(Cow::Owned),
            Resolved::Pick(pick, PickField::Value) => pick.value().map(Cow::Borrowed),
            Resolved::Pick(pick, PickField::Label) => pick.label().map(Cow::Borrowed),
        }
    }

    /// Truthiness for `{{if key}}`
    pub(crate) fn is_truthy(&self) -> bool {
        match self {
            Resolved::Literal(s) => !s.is_empty(),
            Resolved::Data(value) => match value {
                Value::String(s) => !s.is_empty(),
                Value::Integer(i) => *i != 0,
                Value::Float(f) => *f != 0.0,
                Value::Boolean(b) => *b,
                Value::Datetime(_) => true,
                Value::Array(a) => !a.is_empty(),
                Value::Table(t) => !t.is_empty(),
            },
            Resolved::Pick(..) => self.text().is_some_and(|s| !s.is_empty()),
        }
    }
}

/// Resolve a key, picks first, then static data
pub(crate) fn resolve<'a>(context: &'a TemplateContext, key: &str) -> Option<Resolved<'a>> {
    let (head, rest) = match key.split_once('.') {
        Some((head, rest)) => (head, Some(rest)),
        None => (key, None),
    };

    if let Some(pick) = context.pick(head) {
        return match rest {
            None | Some("value") => Some(Resolved::Pick(pick, PickField::Value)),
            Some("label") => Some(Resolved::Pick(pick, PickField::Label)),
            Some(_) => None,
        };
    }

    resolve_key(context.data(), key).map(Resolved::Data)
}

/// Resolve a dotted key in TOML data
pub(crate) fn resolve_key<'a>(data: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.').try_fold(data, |current, part| match current {
        Value::Table(table) => table.get(part),
        _ => None,
    })
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Integer(i) => Some(i.to_string()),
        Value::Float(f) => Some(f.to_string()),
        Value::Boolean(b) => Some(b.to_string()),
        Value::Datetime(dt) => Some(dt.to_string()),
        Value::Array(_) | Value::Table(_) => None,
    }
}

/// Stringify a resolved key for placeholder output
pub(crate) fn stringify(resolved: &Resolved<'_>, key: &str) -> Result<String, TemplateError> {
    match resolved {
        Resolved::Data(Value::Array(_)) => Err(TemplateError::ArrayOutsideEach {
            key: key.to_string(),
        }),
        Resolved::Data(Value::Table(_)) => Err(TemplateError::TableInterpolated {
            key: key.to_string(),
        }),
        // An unresolved pick renders as nothing
        other => Ok(other.text().map(Cow::into_owned).unwrap_or_default()),
    }
}

/// Create a loop context with a variable binding
pub(crate) fn create_loop_context(
    base: &TemplateContext,
    var_name: &str,
    item: Value,
) -> TemplateContext {
    let mut table = match base.data() {
        Value::Table(t) => t.clone(),
        _ => toml::map::Map::new(),
    };

    table.insert(var_name.to_string(), item);
    base.with_data(Value::Table(table))
}
