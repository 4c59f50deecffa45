//! Questions, their options, and the picks made along one path

pub mod picks;
pub mod question;

pub use picks::Picks;
pub use question::{ChoiceRegistry, OptionAdded, Question, QuestionOption};

/// A question variable must be usable as a template key and in file names
pub fn is_valid_var(var: &str) -> bool {
    let mut chars = var.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_vars() {
        assert!(is_valid_var("color"));
        assert!(is_valid_var("_hidden2"));
        assert!(!is_valid_var(""));
        assert!(!is_valid_var("2nd"));
        assert!(!is_valid_var("door.side"));
        assert!(!is_valid_var("a b"));
    }
}
