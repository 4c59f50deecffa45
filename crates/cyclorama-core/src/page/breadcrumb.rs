//! Footer listing the choices a variant depends on
//!
//! Each line names a question, bolds the current pick and links every other
//! option to the sibling variant that differs only in that pick.

use crate::choice::{ChoiceRegistry, Picks};
use crate::graph::VarSet;

use super::variant::{variant_href, variant_key};

/// Breadcrumb block for one variant, or an empty string if no question
/// in `vars` has been registered
///
/// A question not yet answered in `picks` gets a line with every option
/// linked and none bolded.
pub fn breadcrumbs(
    page: &str,
    picks: &Picks,
    vars: &VarSet,
    registry: &ChoiceRegistry,
    heading: &str,
) -> String {
    let mut lines = String::new();

    for question in registry.iter().filter(|q| vars.contains(&q.var)) {
        let current = picks.value(&question.var);

        lines.push_str("- ");
        lines.push_str(&question.prompt);
        lines.push(':');
        for option in &question.options {
            if current == Some(option.value.as_str()) {
                lines.push_str(&format!(" **{}**", option.label));
            } else {
                let sibling = picks.with_pick(&question.var, &option.value);
                lines.push_str(&format!(
                    " [{}]({})",
                    option.label,
                    variant_href(&variant_key(page, &sibling, vars))
                ));
            }
        }
        lines.push('\n');
    }

    if lines.is_empty() {
        return lines;
    }
    format!("\n\n\n<br><br><br>\n------\n{}\n{}", heading, lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choice::QuestionOption;
    use crate::config::consts::DEFAULT_BREADCRUMB_HEADING;

    fn registry() -> ChoiceRegistry {
        let mut registry = ChoiceRegistry::new();
        registry.declare("color", "Pick a color");
        registry.add_option("color", QuestionOption::new("red", "Red"));
        registry.add_option("color", QuestionOption::new("blue", "Blue"));
        registry.declare("weapon", "Choose a weapon");
        registry.add_option("weapon", QuestionOption::new("sword", "Sword"));
        registry.add_option("weapon", QuestionOption::new("bow", "Bow"));
        registry.add_option("weapon", QuestionOption::new("axe", "Axe"));
        registry
    }

    fn vars(names: &[&str]) -> VarSet {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_single_question_block() {
        let picks = Picks::new().with_pick("color", "red");
        let block = breadcrumbs(
            "hall.md",
            &picks,
            &vars(&["color"]),
            &registry(),
            DEFAULT_BREADCRUMB_HEADING,
        );

        assert_eq!(
            block,
            "\n\n\n<br><br><br>\n------\nChoices that lead here:\n\
             - Pick a color: **Red** [Blue](hall_colorblue.md)\n"
        );
    }

    #[test]
    fn test_siblings_differ_only_in_flipped_var() {
        let picks = Picks::new()
            .with_pick("color", "blue")
            .with_pick("weapon", "bow");
        let block = breadcrumbs(
            "end.md",
            &picks,
            &vars(&["color", "weapon"]),
            &registry(),
            "Path:",
        );

        assert!(block.contains("\nPath:\n"));
        assert!(block.contains(
            "- Pick a color: [Red](end_colorred_weaponbow.md) **Blue**\n"
        ));
        assert!(block.contains(
            "- Choose a weapon: [Sword](end_colorblue_weaponsword.md) **Bow** [Axe](end_colorblue_weaponaxe.md)\n"
        ));
        assert_eq!(block.matches("**").count(), 4);
    }

    #[test]
    fn test_only_relevant_questions() {
        let picks = Picks::new().with_pick("weapon", "axe");
        let block = breadcrumbs(
            "hall.md",
            &picks,
            &VarSet::new(),
            &registry(),
            DEFAULT_BREADCRUMB_HEADING,
        );
        assert_eq!(block, "");

        let block = breadcrumbs(
            "hall.md",
            &picks,
            &vars(&["weapon"]),
            &registry(),
            DEFAULT_BREADCRUMB_HEADING,
        );
        assert!(block.contains("Choose a weapon"));
        assert!(!block.contains("Pick a color"));
    }

    #[test]
    fn test_unanswered_question_links_every_option() {
        let mut picks = Picks::new().with_pick("color", "red");
        picks.declare("weapon");

        let block = breadcrumbs(
            "hall.md",
            &picks,
            &vars(&["color", "weapon"]),
            &registry(),
            DEFAULT_BREADCRUMB_HEADING,
        );
        assert!(block.contains(
            "- Choose a weapon: [Sword](hall_colorred_weaponsword.md) \
             [Bow](hall_colorred_weaponbow.md) [Axe](hall_colorred_weaponaxe.md)\n"
        ));
        assert!(block.contains("- Pick a color: **Red** [Blue](hall_colorblue.md)\n"));

        let block = breadcrumbs(
            "hall.md",
            &Picks::new(),
            &vars(&["color"]),
            &registry(),
            DEFAULT_BREADCRUMB_HEADING,
        );
        assert!(block.contains("- Pick a color: [Red](hall_colorred.md) [Blue](hall_colorblue.md)\n"));
        assert!(!block.contains("**"));
    }

    #[test]
    fn test_sibling_links_are_url_encoded() {
        let mut registry = ChoiceRegistry::new();
        registry.declare("way", "Which way?");
        registry.add_option("way", QuestionOption::new("Go left", "Go left"));
        registry.add_option("way", QuestionOption::new("Go right", "Go right"));

        let picks = Picks::new().with_pick("way", "Go left");
        let block = breadcrumbs("room.md", &picks, &vars(&["way"]), &registry, "Path:");
        assert!(block.contains("- Which way?: **Go left** [Go right](room_wayGo%20right.md)\n"));
    }

    #[test]
    fn test_lines_follow_registry_order() {
        let picks = Picks::new()
            .with_pick("weapon", "sword")
            .with_pick("color", "red");
        let block = breadcrumbs(
            "x.md",
            &picks,
            &vars(&["weapon", "color"]),
            &registry(),
            DEFAULT_BREADCRUMB_HEADING,
        );

        let color = block.find("Pick a color").unwrap();
        let weapon = block.find("Choose a weapon").unwrap();
        assert!(color < weapon);
    }
}
