//! `{{ ... }}` rendering over static data, picks and hook functions

mod blocks;
mod expr;
mod helpers;
mod tokenize;

use crate::template::error::TemplateError;
use crate::template::functions::{FunctionError, NoFunctions, TemplateFunctions};
use crate::template::tracked::TrackedValue;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use toml::Value;

use blocks::{find_each_end, find_else, find_if_end};
use expr::{parse_args, parse_condition, split_call, Condition, Operand};
use helpers::{create_loop_context, resolve, stringify, Resolved};

/// Wall-clock limit for one render
const RENDER_TIMEOUT: Duration = Duration::from_secs(10);

fn check_timeout(start: Instant) -> Result<(), TemplateError> {
    let elapsed = start.elapsed();
    if elapsed >= RENDER_TIMEOUT {
        return Err(TemplateError::Timeout {
            limit: RENDER_TIMEOUT,
            elapsed,
        });
    }
    Ok(())
}

fn count_backslashes_before(text: &str, pos: usize) -> usize {
    text.as_bytes()[..pos]
        .iter()
        .rev()
        .take_while(|&&b| b == b'\\')
        .count()
}

fn count_newlines(text: &str) -> usize {
    text.bytes().filter(|&b| b == b'\n').count()
}

fn malformed(message: impl Into<String>, line: usize) -> TemplateError {
    TemplateError::MalformedSyntax {
        message: message.into(),
        line,
    }
}

/// Position of the placeholder being processed
struct RenderState<'a> {
    template: &'a str,
    /// Byte offset of `{{` in `template`
    open: usize,
    /// Byte length of the `{{ ... }}` token
    token_len: usize,
    /// Trimmed text between the braces
    expr: &'a str,
    line: usize,
}

impl RenderState<'_> {
    /// Text following the opening token
    fn after_token(&self) -> &str {
        &self.template[self.open + self.token_len..]
    }
}

/// Data visible to a template: static TOML values plus tracked picks
#[derive(Debug, Clone)]
pub struct TemplateContext {
    data: Value,
    picks: BTreeMap<String, TrackedValue>,
}

impl TemplateContext {
    /// Static data only; see [`TemplateContext::with_picks`]
    pub fn new(data: Value) -> Self {
        Self {
            data,
            picks: BTreeMap::new(),
        }
    }

    /// Expose picks; they shadow static data of the same name
    pub fn with_picks(mut self, picks: impl IntoIterator<Item = TrackedValue>) -> Self {
        self.picks
            .extend(picks.into_iter().map(|p| (p.var().to_string(), p)));
        self
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    pub fn pick(&self, var: &str) -> Option<&TrackedValue> {
        self.picks.get(var)
    }

    fn with_data(&self, data: Value) -> Self {
        Self {
            data,
            picks: self.picks.clone(),
        }
    }
}

impl Default for TemplateContext {
    fn default() -> Self {
        Self::new(Value::Table(toml::map::Map::new()))
    }
}

/// Template engine for rendering `{{ ... }}` templates
#[derive(Debug, Default, Clone, Copy)]
pub struct TemplateEngine;

impl TemplateEngine {
    pub fn new() -> Self {
        Self
    }

    /// Render a template without any callable functions
    pub fn render(
        &self,
        template: &str,
        context: &TemplateContext,
    ) -> Result<String, TemplateError> {
        self.render_with(template, context, &mut NoFunctions)
    }

    /// Render a template, dispatching `{{name(...)}}` calls to `functions`
    pub fn render_with(
        &self,
        template: &str,
        context: &TemplateContext,
        functions: &mut dyn TemplateFunctions,
    ) -> Result<String, TemplateError> {
        self.render_from(template, context, functions, Instant::now())
    }

    fn render_from(
        &self,
        template: &str,
        context: &TemplateContext,
        functions: &mut dyn TemplateFunctions,
        start: Instant,
    ) -> Result<String, TemplateError> {
        let mut output = String::new();
        let mut line = 1;
        let mut pos = 0;

        while pos < template.len() {
            check_timeout(start)?;

            let Some(found) = template[pos..].find("{{") else {
                output.push_str(&template[pos..]);
                break;
            };
            let open = pos + found;

            // Text up to the backslashes, then half of the backslashes
            let backslashes = count_backslashes_before(&template[pos..], found);
            let text = &template[pos..open - backslashes];
            output.push_str(text);
            line += count_newlines(text);
            for _ in 0..(backslashes / 2) {
                output.push('\\');
            }

            let close = template[open + 2..]
                .find("}}")
                .ok_or_else(|| malformed("Unclosed placeholder or block", line))?;
            let token_len = 2 + close + 2;

            if backslashes % 2 == 1 {
                output.push_str(&template[open..open + token_len]);
                pos = open + token_len;
                continue;
            }

            let state = RenderState {
                template,
                open,
                token_len,
                expr: template[open + 2..open + 2 + close].trim(),
                line,
            };
            let consumed = self.process_token(&state, context, functions, start, &mut output)?;
            line += count_newlines(&template[open..open + consumed]);
            pos = open + consumed;
        }

        Ok(output)
    }

    /// Process one unescaped token; returns the number of bytes consumed
    fn process_token(
        &self,
        state: &RenderState,
        context: &TemplateContext,
        functions: &mut dyn TemplateFunctions,
        start: Instant,
        output: &mut String,
    ) -> Result<usize, TemplateError> {
        let expr = state.expr;

        if let Some(rest) = expr.strip_prefix("each ") {
            self.process_each(state, rest.trim(), context, functions, start, output)
        } else if let Some(rest) = expr.strip_prefix("if ") {
            self.process_if(state, rest.trim(), context, functions, start, output)
        } else if expr == "else" || expr.starts_with('/') {
            Err(malformed(
                format!("Unexpected {{{{{}}}}} without matching opening block", expr),
                state.line,
            ))
        } else if let Some((name, inner)) = split_call(expr) {
            self.process_call(name, inner, state.line, context, functions, output)?;
            Ok(state.token_len)
        } else {
            let resolved = resolve(context, expr).ok_or_else(|| TemplateError::UndefinedKey {
                key: expr.to_string(),
                line: state.line,
            })?;
            output.push_str(&stringify(&resolved, expr)?);
            Ok(state.token_len)
        }
    }

    /// `{{each items |item|}} body {{/each}}`
    fn process_each(
        &self,
        state: &RenderState,
        rest: &str,
        context: &TemplateContext,
        functions: &mut dyn TemplateFunctions,
        start: Instant,
        output: &mut String,
    ) -> Result<usize, TemplateError> {
        let (key, var_name) = parse_each_syntax(rest, state.line)?;

        let search_text = state.after_token();
        let (body_len, end_len) = find_each_end(search_text)
            .ok_or_else(|| malformed(format!("Unclosed each loop for key '{}'", key), state.line))?;
        let body = &search_text[..body_len];

        let items = match helpers::resolve_key(context.data(), key) {
            Some(Value::Array(items)) => items,
            Some(_) => return Err(malformed(format!("Key '{}' is not an array", key), state.line)),
            None => {
                return Err(TemplateError::UndefinedKey {
                    key: key.to_string(),
                    line: state.line,
                })
            }
        };

        for item in items {
            let loop_context = create_loop_context(context, var_name, item.clone());
            let rendered = self.render_from(body, &loop_context, functions, start)?;
            output.push_str(&rendered);
        }

        Ok(state.token_len + body_len + end_len)
    }

    /// `{{if cond}} then {{else}} otherwise {{/if}}`
    fn process_if(
        &self,
        state: &RenderState,
        rest: &str,
        context: &TemplateContext,
        functions: &mut dyn TemplateFunctions,
        start: Instant,
        output: &mut String,
    ) -> Result<usize, TemplateError> {
        let condition = parse_condition(rest, state.line)?;

        let search_text = state.after_token();
        let (body_len, end_len) = find_if_end(search_text)
            .ok_or_else(|| malformed(format!("Unclosed if block '{}'", rest), state.line))?;
        let body = &search_text[..body_len];

        let (then_branch, else_branch) = match find_else(body) {
            Some((at, len)) => (&body[..at], &body[at + len..]),
            None => (body, ""),
        };

        let branch = if evaluate(&condition, context) {
            then_branch
        } else {
            else_branch
        };
        let rendered = self.render_from(branch, context, functions, start)?;
        output.push_str(&rendered);

        Ok(state.token_len + body_len + end_len)
    }

    /// `{{name("literal", key)}}`
    fn process_call(
        &self,
        name: &str,
        inner: &str,
        line: usize,
        context: &TemplateContext,
        functions: &mut dyn TemplateFunctions,
        output: &mut String,
    ) -> Result<(), TemplateError> {
        let args = parse_args(inner, line)?
            .into_iter()
            .map(|arg| match arg {
                Operand::Literal(text) => Ok(text),
                Operand::Key(key) => resolve(context, &key)
                    .ok_or(TemplateError::UndefinedKey { key: key.clone(), line })
                    .and_then(|r| stringify(&r, &key)),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let text = functions.call(name, &args).map_err(|e| match e {
            FunctionError::Unknown => TemplateError::UnknownFunction {
                name: name.to_string(),
                line,
            },
            FunctionError::Failed(message) => TemplateError::FunctionFailed {
                name: name.to_string(),
                message,
                line,
            },
        })?;
        output.push_str(&text);
        Ok(())
    }
}

/// Split `items |item|` into the list key and the binding name
fn parse_each_syntax(rest: &str, line: usize) -> Result<(&str, &str), TemplateError> {
    let Some((key, binding)) = rest.split_once('|') else {
        return Err(malformed(format!("'each {}' needs a |name| binding", rest), line));
    };
    let Some((name, _)) = binding.split_once('|') else {
        return Err(malformed(format!("'each {}' has an unclosed |name| binding", rest), line));
    };
    Ok((key.trim(), name.trim()))
}

fn operand<'a>(op: &'a Operand, context: &'a TemplateContext) -> Option<Resolved<'a>> {
    match op {
        Operand::Literal(text) => Some(Resolved::Literal(text.as_str().into())),
        Operand::Key(key) => resolve(context, key),
    }
}

/// Evaluate a condition; both sides are always read so compared picks are recorded
fn evaluate(condition: &Condition, context: &TemplateContext) -> bool {
    match condition {
        Condition::Truthy(op) => operand(op, context).is_some_and(|r| r.is_truthy()),
        Condition::Eq(lhs, rhs) => compare(operand(lhs, context), operand(rhs, context)),
        Condition::Ne(lhs, rhs) => !compare(operand(lhs, context), operand(rhs, context)),
    }
}

fn compare<'a>(lhs: Option<Resolved<'a>>, rhs: Option<Resolved<'a>>) -> bool {
    match (lhs, rhs) {
        (Some(Resolved::Pick(pick, helpers::PickField::Value)), Some(other))
        | (Some(other), Some(Resolved::Pick(pick, helpers::PickField::Value))) => {
            match other.text() {
                Some(text) => pick.equals(&text),
                None => {
                    pick.value();
                    false
                }
            }
        }
        (lhs, rhs) => {
            let lhs = lhs.and_then(|r| r.text());
            let rhs = rhs.and_then(|r| r.text());
            lhs.is_some() && lhs == rhs
        }
    }
}

/// Render with no callable functions
pub fn render(template: &str, context: &TemplateContext) -> Result<String, TemplateError> {
    TemplateEngine::new().render(template, context)
}

#[cfg(test)]
mod tests;
