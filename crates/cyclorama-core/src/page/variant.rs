//! Output file names for page variants
//!
//! A variant key is the page id with one `_{var}{value}` token per relevant
//! pick spliced in before the extension of the last path component:
//!
//! ```text
//! hall.md  + {color=red, weapon=sword}  →  hall_colorred_weaponsword.md
//! ```
//!
//! Tokens are sorted by var and written literally. Markdown links to a key go
//! through [`variant_href`], which URL-encodes it.

use std::fmt::Write as _;

use crate::choice::Picks;
use crate::graph::VarSet;

/// File name for `page` under `picks`, keeping only the picks in `vars`
///
/// Unresolved picks never contribute a token. With nothing relevant the key
/// is the page id itself.
pub fn variant_key(page: &str, picks: &Picks, vars: &VarSet) -> String {
    let mut suffix = String::new();
    for (var, value) in picks.restricted_to(vars) {
        suffix.push('_');
        suffix.push_str(var);
        suffix.push_str(value);
    }
    if suffix.is_empty() {
        return page.to_string();
    }

    let file_start = page.rfind('/').map_or(0, |i| i + 1);
    match page[file_start..].rfind('.') {
        // A leading dot is a hidden file, not an extension
        Some(dot) if dot > 0 => {
            let at = file_start + dot;
            format!("{}{}{}", &page[..at], suffix, &page[at..])
        }
        _ => format!("{}{}", page, suffix),
    }
}

/// Link target for a variant key
///
/// Bytes other than unreserved URL characters and `/` are percent-encoded,
/// so a browser decodes the link back to the file name on disk.
pub fn variant_href(key: &str) -> String {
    let mut href = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~' | b'/') {
            href.push(byte as char);
        } else {
            let _ = write!(href, "%{:02X}", byte);
        }
    }
    href
}
