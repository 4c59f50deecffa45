use serde::Serialize;
use std::collections::HashMap;

/// One selectable answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionOption {
    pub value: String,
    pub label: String,
}

impl QuestionOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub var: String,
    pub prompt: String,
    /// In discovery order
    pub options: Vec<QuestionOption>,
}

impl Question {
    pub fn option(&self, value: &str) -> Option<&QuestionOption> {
        self.options.iter().find(|o| o.value == value)
    }
}

/// Outcome of [`ChoiceRegistry::add_option`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionAdded {
    Added,
    /// Same value and label already known
    Present,
    /// Value known under another label; the first label is kept
    LabelConflict { existing: String },
    /// No question for the variable
    UnknownQuestion,
}

/// Every question discovered so far, in discovery order
///
/// Grows monotonically during analysis: questions are never removed and
/// options are only appended.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct ChoiceRegistry {
    questions: Vec<Question>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl ChoiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `var`; returns false if it was already known (the first
    /// prompt is kept)
    pub fn declare(&mut self, var: &str, prompt: &str) -> bool {
        if self.index.contains_key(var) {
            return false;
        }
        self.index.insert(var.to_string(), self.questions.len());
        self.questions.push(Question {
            var: var.to_string(),
            prompt: prompt.to_string(),
            options: Vec::new(),
        });
        true
    }

    /// Append an option; idempotent per value
    pub fn add_option(&mut self, var: &str, option: QuestionOption) -> OptionAdded {
        let Some(&at) = self.index.get(var) else {
            return OptionAdded::UnknownQuestion;
        };
        let question = &mut self.questions[at];

        match question.option(&option.value) {
            Some(existing) if existing.label == option.label => OptionAdded::Present,
            Some(existing) => OptionAdded::LabelConflict {
                existing: existing.label.clone(),
            },
            None => {
                question.options.push(option);
                OptionAdded::Added
            }
        }
    }

    pub fn get(&self, var: &str) -> Option<&Question> {
        self.index.get(var).map(|&at| &self.questions[at])
    }

    /// Display label of `value`, if that option is known
    pub fn label(&self, var: &str, value: &str) -> Option<&str> {
        self.get(var)?.option(value).map(|o| o.label.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declare_keeps_first_prompt() {
        let mut registry = ChoiceRegistry::new();
        assert!(registry.declare("color", "Pick a color"));
        assert!(!registry.declare("color", "Another prompt"));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("color").unwrap().prompt, "Pick a color");
    }

    #[test]
    fn test_add_option_is_idempotent() {
        let mut registry = ChoiceRegistry::new();
        registry.declare("color", "Pick a color");

        assert_eq!(
            registry.add_option("color", QuestionOption::new("red", "Red")),
            OptionAdded::Added
        );
        assert_eq!(
            registry.add_option("color", QuestionOption::new("red", "Red")),
            OptionAdded::Present
        );
        assert_eq!(
            registry.add_option("color", QuestionOption::new("blue", "Blue")),
            OptionAdded::Added
        );

        let values: Vec<_> = registry
            .get("color")
            .unwrap()
            .options
            .iter()
            .map(|o| o.value.as_str())
            .collect();
        assert_eq!(values, vec!["red", "blue"]);
    }

    #[test]
    fn test_label_conflict_keeps_first_label() {
        let mut registry = ChoiceRegistry::new();
        registry.declare("color", "Pick a color");
        registry.add_option("color", QuestionOption::new("red", "Red"));

        assert_eq!(
            registry.add_option("color", QuestionOption::new("red", "Crimson")),
            OptionAdded::LabelConflict {
                existing: "Red".to_string()
            }
        );
        assert_eq!(registry.label("color", "red"), Some("Red"));
    }

    #[test]
    fn test_option_for_unknown_question() {
        let mut registry = ChoiceRegistry::new();
        assert_eq!(
            registry.add_option("size", QuestionOption::new("big", "Big")),
            OptionAdded::UnknownQuestion
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn test_iter_in_discovery_order() {
        let mut registry = ChoiceRegistry::new();
        registry.declare("weapon", "Choose a weapon");
        registry.declare("armor", "Choose armor");
        registry.declare("color", "Pick a color");

        let vars: Vec<_> = registry.iter().map(|q| q.var.as_str()).collect();
        assert_eq!(vars, vec!["weapon", "armor", "color"]);
    }
}
