//! Block matching: closing tags for `{{each}}`/`{{if}}` and `{{else}}` splits

use super::tokenize::{TokenKind, TokenStream};

/// Find the closing tag matching an already-consumed opening `keyword`
///
/// Returns (position, length) of the closing token, skipping nested blocks of
/// the same keyword and escaped tokens.
pub(crate) fn find_block_end(text: &str, keyword: &str) -> Option<(usize, usize)> {
    let mut depth = 0usize;

    for token in TokenStream::new(text).filter(|t| !t.is_escaped()) {
        match &token.kind {
            TokenKind::BlockStart { keyword: k, .. } if k == keyword => depth += 1,
            TokenKind::BlockEnd { keyword: k } if k == keyword => {
                if depth == 0 {
                    return Some((token.start, token.length));
                }
                depth -= 1;
            }
            _ => {}
        }
    }

    None
}

/// Find `{{/each}}` for an opened `{{each}}`
pub(crate) fn find_each_end(text: &str) -> Option<(usize, usize)> {
    find_block_end(text, "each")
}

/// Find `{{/if}}` for an opened `{{if}}`
pub(crate) fn find_if_end(text: &str) -> Option<(usize, usize)> {
    find_block_end(text, "if")
}

/// Find the `{{else}}` belonging to the outermost `{{if}}` of an if-body
///
/// `{{else}}` tokens of nested conditionals are skipped.
pub(crate) fn find_else(body: &str) -> Option<(usize, usize)> {
    let mut depth = 0usize;

    for token in TokenStream::new(body).filter(|t| !t.is_escaped()) {
        match &token.kind {
            TokenKind::BlockStart { keyword, .. } if keyword == "if" => depth += 1,
            TokenKind::BlockEnd { keyword } if keyword == "if" => {
                depth = depth.saturating_sub(1)
            }
            TokenKind::Else if depth == 0 => return Some((token.start, token.length)),
            _ => {}
        }
    }

    None
}
