//! Expressions inside `{{ ... }}`: conditions and function calls

use crate::template::error::TemplateError;

/// One side of a comparison, or a function argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Operand {
    Literal(String),
    Key(String),
}

/// Condition of an `{{if ...}}` block
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Condition {
    Truthy(Operand),
    Eq(Operand, Operand),
    Ne(Operand, Operand),
}

/// Parse `lhs == rhs`, `lhs != rhs` or a bare operand
pub(crate) fn parse_condition(args: &str, line: usize) -> Result<Condition, TemplateError> {
    match find_operator(args) {
        Some((pos, op)) => {
            let lhs = parse_operand(&args[..pos], line)?;
            let rhs = parse_operand(&args[pos + 2..], line)?;
            Ok(if op == "==" {
                Condition::Eq(lhs, rhs)
            } else {
                Condition::Ne(lhs, rhs)
            })
        }
        None => Ok(Condition::Truthy(parse_operand(args, line)?)),
    }
}

/// Split `name(args)` into name and raw argument text
pub(crate) fn split_call(expr: &str) -> Option<(&str, &str)> {
    let open = expr.find('(')?;
    let name = expr[..open].trim();
    let inner = expr[open + 1..].strip_suffix(')')?;

    let valid_name = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    valid_name.then_some((name, inner))
}

/// Parse comma-separated call arguments
pub(crate) fn parse_args(inner: &str, line: usize) -> Result<Vec<Operand>, TemplateError> {
    let mut args = Vec::new();
    let mut rest = inner.trim();

    while !rest.is_empty() {
        let (arg, consumed) = if rest.starts_with('"') {
            let (literal, len) = parse_string_literal(rest, line)?;
            (Operand::Literal(literal), len)
        } else {
            let len = rest.find(',').unwrap_or(rest.len());
            (parse_key(&rest[..len], line)?, len)
        };
        args.push(arg);

        rest = rest[consumed..].trim_start();
        match rest.strip_prefix(',') {
            Some(after) => {
                rest = after.trim_start();
                if rest.is_empty() {
                    return Err(malformed("trailing comma in argument list", line));
                }
            }
            None if rest.is_empty() => {}
            None => return Err(malformed("expected ',' between arguments", line)),
        }
    }

    Ok(args)
}

/// Locate `==`/`!=` outside string literals
fn find_operator(args: &str) -> Option<(usize, &'static str)> {
    let bytes = args.as_bytes();
    let mut in_string = false;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\\' if in_string => i += 1,
            b'"' => in_string = !in_string,
            b'=' if !in_string && bytes.get(i + 1) == Some(&b'=') => return Some((i, "==")),
            b'!' if !in_string && bytes.get(i + 1) == Some(&b'=') => return Some((i, "!=")),
            _ => {}
        }
        i += 1;
    }

    None
}

fn parse_operand(text: &str, line: usize) -> Result<Operand, TemplateError> {
    let text = text.trim();
    if text.starts_with('"') {
        let (literal, len) = parse_string_literal(text, line)?;
        if len != text.len() {
            return Err(malformed(
                &format!("unexpected text after string literal in '{}'", text),
                line,
            ));
        }
        Ok(Operand::Literal(literal))
    } else {
        parse_key(text, line)
    }
}

fn parse_key(text: &str, line: usize) -> Result<Operand, TemplateError> {
    let key = text.trim();
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if !valid {
        return Err(malformed(&format!("invalid key '{}'", key), line));
    }
    Ok(Operand::Key(key.to_string()))
}

/// Parse a double-quoted literal at the start of `text`
///
/// Returns the unescaped content and the number of bytes consumed.
fn parse_string_literal(text: &str, line: usize) -> Result<(String, usize), TemplateError> {
    let mut out = String::new();
    let mut chars = text.char_indices().skip(1);

    while let Some((i, c)) = chars.next() {
        match c {
            '"' => return Ok((out, i + 1)),
            '\\' => match chars.next() {
                Some((_, '"')) => out.push('"'),
                Some((_, '\\')) => out.push('\\'),
                Some((_, 'n')) => out.push('\n'),
                Some((_, other)) => {
                    out.push('\\');
                    out.push(other);
                }
                None => break,
            },
            other => out.push(other),
        }
    }

    Err(malformed("unterminated string literal", line))
}

fn malformed(message: &str, line: usize) -> TemplateError {
    TemplateError::MalformedSyntax {
        message: message.to_string(),
        line,
    }
}
