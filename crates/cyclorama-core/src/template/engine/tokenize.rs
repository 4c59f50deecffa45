//! Token scanning for the template engine
//!
//! Block matching (`{{each}}`/`{{if}}` to their closing tag, a top-level
//! `{{else}}`) walks the template once through [`TokenStream`], so the
//! cost stays linear no matter how deeply blocks nest.

/// What a single `{{ ... }}` token is
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind {
    /// `{{key}}`, `{{pick.label}}` or `{{name(args)}}`
    Placeholder,

    /// `{{each items |var|}}` or `{{if cond}}`
    BlockStart { keyword: String },

    Else,

    /// `{{/each}}` or `{{/if}}`
    BlockEnd { keyword: String },
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    /// Byte offset of `{{`
    pub start: usize,
    /// Byte length including both brace pairs
    pub length: usize,
    /// Backslashes directly before `{{`
    pub backslash_count: usize,
}

impl Token {
    /// An odd run of backslashes escapes the token
    pub fn is_escaped(&self) -> bool {
        self.backslash_count % 2 == 1
    }
}

fn classify(content: &str) -> TokenKind {
    let trimmed = content.trim();
    if trimmed == "else" {
        return TokenKind::Else;
    }
    if let Some(keyword) = trimmed.strip_prefix('/') {
        return TokenKind::BlockEnd {
            keyword: keyword.trim().to_string(),
        };
    }
    match trimmed.split_once(char::is_whitespace) {
        Some((keyword @ ("each" | "if"), _)) => TokenKind::BlockStart {
            keyword: keyword.to_string(),
        },
        _ => TokenKind::Placeholder,
    }
}

/// Tokens of a template in source order
///
/// The first `}}` after a `{{` closes it. An unterminated `{{` ends the
/// stream.
pub(crate) struct TokenStream<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> TokenStream<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }
}

impl Iterator for TokenStream<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let open = self.pos + self.text[self.pos..].find("{{")?;
        let content_start = open + 2;
        let close = content_start + self.text[content_start..].find("}}")?;
        let end = close + 2;

        #[cfg(test)]
        test_counter::add(end - self.pos);

        let backslash_count = self.text.as_bytes()[..open]
            .iter()
            .rev()
            .take_while(|&&b| b == b'\\')
            .count();

        self.pos = end;
        Some(Token {
            kind: classify(&self.text[content_start..close]),
            start: open,
            length: end - open,
            backslash_count,
        })
    }
}
