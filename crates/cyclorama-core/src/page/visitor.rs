//! Rendering one (page, picks) instance
//!
//! The visitor is the [`TemplateFunctions`] host for a single render. Its
//! hooks declare questions and options and follow links; everything they
//! discover is collected into a [`Visit`] that the caller commits only if
//! the whole page rendered.
//!
//! Template functions:
//!
//! - `question(prompt, var)`: ask `var` on this path; renders nothing
//! - `option(var, label, target[, value])`: answer `var` with `value`
//!   (defaults to `label`) and link to `target`
//! - `link(label, target)`: link to `target` with the current picks

use std::collections::{BTreeMap, BTreeSet};

use crate::choice::{is_valid_var, ChoiceRegistry, Picks, QuestionOption};
use crate::error::{CycloramaError, Result};
use crate::graph::VarSet;
use crate::template::{
    touch_set, FunctionError, TemplateContext, TemplateEngine, TemplateFunctions, TrackedValue,
};

use super::source::PageSource;
use super::variant::{variant_href, variant_key};

/// How links render
#[derive(Debug, Clone, Copy)]
pub enum VisitMode<'a> {
    /// Links render as their label; nothing is named yet
    Analyze,
    /// Links render as `[label](variant key)` under the converged sets
    Write {
        page_vars: &'a BTreeMap<String, VarSet>,
    },
}

/// Everything one successful render produced
#[derive(Debug, Clone, Default)]
pub struct Visit {
    pub text: String,
    /// Picks after this page's own questions were declared
    pub picks: Picks,
    /// Pick variables read while rendering
    pub touched: VarSet,
    /// `(var, prompt)` in call order
    pub questions: Vec<(String, String)>,
    /// `(var, option)` in call order
    pub options: Vec<(String, QuestionOption)>,
    /// Link targets
    pub links: BTreeSet<String>,
    /// Instances to visit next, in call order
    pub next: Vec<(String, Picks)>,
}

/// Inputs shared by every visit of a run
pub struct VisitContext<'a> {
    pub source: &'a dyn PageSource,
    pub engine: TemplateEngine,
    pub data: &'a toml::Value,
    pub registry: &'a ChoiceRegistry,
}

/// Render `page` under `picks`
///
/// Content defects (bad hook calls, template errors, missing pages) come
/// back as errors; no partial [`Visit`] is returned for them.
pub fn visit_page(
    ctx: &VisitContext<'_>,
    page: &str,
    picks: &Picks,
    mode: VisitMode<'_>,
) -> Result<Visit> {
    let body = ctx.source.load(page)?;

    let touched = touch_set();
    let tracked = picks.iter().map(|(var, value)| {
        let label = value
            .and_then(|v| ctx.registry.label(var, v))
            .map(str::to_string);
        TrackedValue::new(var, value.map(str::to_string), label, touched.clone())
    });
    let context = TemplateContext::new(ctx.data.clone()).with_picks(tracked);

    let mut visitor = PageVisitor {
        page,
        mode,
        picks: picks.clone(),
        visit: Visit::default(),
        failure: None,
    };

    match ctx.engine.render_with(&body, &context, &mut visitor) {
        Ok(text) => {
            let mut visit = visitor.visit;
            visit.text = text;
            visit.picks = visitor.picks;
            visit.touched = touched.borrow().clone();
            Ok(visit)
        }
        Err(source) => Err(visitor
            .failure
            .take()
            .unwrap_or_else(|| CycloramaError::Template {
                page: page.to_string(),
                source,
            })),
    }
}

/// Hook host bound to one (page, picks, mode)
struct PageVisitor<'a> {
    page: &'a str,
    mode: VisitMode<'a>,
    picks: Picks,
    visit: Visit,
    /// Typed error behind the last failed hook
    failure: Option<CycloramaError>,
}

impl PageVisitor<'_> {
    fn question(&mut self, prompt: &str, var: &str) -> Result<String> {
        if !is_valid_var(var) {
            return Err(CycloramaError::InvalidVariable {
                page: self.page.to_string(),
                var: var.to_string(),
            });
        }
        if !self.picks.declare(var) {
            return Err(CycloramaError::QuestionRedeclared {
                page: self.page.to_string(),
                var: var.to_string(),
            });
        }
        self.visit
            .questions
            .push((var.to_string(), prompt.to_string()));
        Ok(String::new())
    }

    fn option(&mut self, var: &str, label: &str, target: &str, value: &str) -> Result<String> {
        if !self.picks.contains(var) {
            return Err(CycloramaError::OptionUndeclared {
                page: self.page.to_string(),
                var: var.to_string(),
            });
        }
        if !self.picks.is_unresolved(var) {
            return Err(CycloramaError::OptionResolved {
                page: self.page.to_string(),
                var: var.to_string(),
            });
        }

        self.visit
            .options
            .push((var.to_string(), QuestionOption::new(value, label)));
        let next = self.picks.with_pick(var, value);
        Ok(self.follow(label, target, next))
    }

    fn link(&mut self, label: &str, target: &str) -> String {
        let next = self.picks.clone();
        self.follow(label, target, next)
    }

    fn follow(&mut self, label: &str, target: &str, next: Picks) -> String {
        let rendered = match self.mode {
            VisitMode::Analyze => label.to_string(),
            VisitMode::Write { page_vars } => {
                let empty = VarSet::new();
                let vars = page_vars.get(target).unwrap_or(&empty);
                format!("[{}]({})", label, variant_href(&variant_key(target, &next, vars)))
            }
        };
        self.visit.links.insert(target.to_string());
        self.visit.next.push((target.to_string(), next));
        rendered
    }
}

impl TemplateFunctions for PageVisitor<'_> {
    fn call(&mut self, name: &str, args: &[String]) -> std::result::Result<String, FunctionError> {
        let result = match (name, args) {
            ("question", [prompt, var]) => self.question(prompt, var),
            ("option", [var, label, target]) => self.option(var, label, target, label),
            ("option", [var, label, target, value]) => self.option(var, label, target, value),
            ("link", [label, target]) => Ok(self.link(label, target)),
            ("question" | "option" | "link", _) => {
                return Err(FunctionError::Failed(format!(
                    "wrong number of arguments ({})",
                    args.len()
                )))
            }
            _ => return Err(FunctionError::Unknown),
        };

        result.map_err(|e| {
            let message = e.to_string();
            self.failure = Some(e);
            FunctionError::Failed(message)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::source::MemorySource;
    use crate::template::TemplateError;

    fn data() -> toml::Value {
        toml::Value::Table(toml::map::Map::new())
    }

    fn analyze(source: &MemorySource, page: &str, picks: &Picks) -> Result<Visit> {
        analyze_with(source, &ChoiceRegistry::new(), page, picks)
    }

    fn analyze_with(
        source: &MemorySource,
        registry: &ChoiceRegistry,
        page: &str,
        picks: &Picks,
    ) -> Result<Visit> {
        let data = data();
        let ctx = VisitContext {
            source,
            engine: TemplateEngine::new(),
            data: &data,
            registry,
        };
        visit_page(&ctx, page, picks, VisitMode::Analyze)
    }

    #[test]
    fn test_question_and_options_are_collected() {
        let source = MemorySource::new().with_page(
            "start.md",
            r#"{{question("Pick a color", "color")}}Go {{option("color", "Red", "hall.md", "red")}} or {{option("color", "Blue", "hall.md")}}"#,
        );

        let visit = analyze(&source, "start.md", &Picks::new()).unwrap();

        assert_eq!(visit.text, "Go Red or Blue");
        assert_eq!(
            visit.questions,
            vec![("color".to_string(), "Pick a color".to_string())]
        );
        assert_eq!(
            visit.options,
            vec![
                ("color".to_string(), QuestionOption::new("red", "Red")),
                ("color".to_string(), QuestionOption::new("Blue", "Blue")),
            ]
        );
        assert!(visit.picks.is_unresolved("color"));
        assert_eq!(visit.links.len(), 1);
        assert_eq!(
            visit.next,
            vec![
                ("hall.md".to_string(), Picks::new().with_pick("color", "red")),
                ("hall.md".to_string(), Picks::new().with_pick("color", "Blue")),
            ]
        );
    }

    #[test]
    fn test_link_keeps_current_picks() {
        let source = MemorySource::new().with_page("hall.md", r#"{{link("Onward", "vault.md")}}"#);
        let picks = Picks::new().with_pick("color", "red");

        let visit = analyze(&source, "hall.md", &picks).unwrap();

        assert_eq!(visit.text, "Onward");
        assert_eq!(visit.next, vec![("vault.md".to_string(), picks)]);
        assert!(visit.touched.is_empty());
    }

    #[test]
    fn test_comparisons_are_touched() {
        let source = MemorySource::new().with_page(
            "vault.md",
            r#"{{if color == "red"}}Crimson{{else}}Azure{{/if}} {{if mood}}{{mood}}{{/if}}"#,
        );
        let picks = Picks::new()
            .with_pick("color", "red")
            .with_pick("weapon", "sword");

        let visit = analyze(&source, "vault.md", &picks).unwrap();

        assert_eq!(visit.text, "Crimson ");
        let touched: Vec<_> = visit.touched.iter().map(String::as_str).collect();
        assert_eq!(touched, vec!["color"]);
    }

    #[test]
    fn test_labels_come_from_registry() {
        let mut registry = ChoiceRegistry::new();
        registry.declare("color", "Pick a color");
        registry.add_option("color", QuestionOption::new("red", "Crimson"));
        let source = MemorySource::new().with_page("hall.md", "{{color.label}}/{{color}}");
        let picks = Picks::new().with_pick("color", "red");

        let visit = analyze_with(&source, &registry, "hall.md", &picks).unwrap();
        assert_eq!(visit.text, "Crimson/red");
    }

    #[test]
    fn test_question_redeclared_on_path() {
        let source = MemorySource::new().with_page("again.md", r#"{{question("Color?", "color")}}"#);
        let picks = Picks::new().with_pick("color", "red");

        let err = analyze(&source, "again.md", &picks).unwrap_err();
        assert!(matches!(err, CycloramaError::QuestionRedeclared { ref var, .. } if var == "color"));
    }

    #[test]
    fn test_question_twice_on_same_page() {
        let source = MemorySource::new().with_page(
            "twice.md",
            r#"{{question("Color?", "color")}}{{question("Colour?", "color")}}"#,
        );
        let err = analyze(&source, "twice.md", &Picks::new()).unwrap_err();
        assert!(matches!(err, CycloramaError::QuestionRedeclared { .. }));
    }

    #[test]
    fn test_option_errors() {
        let source = MemorySource::new()
            .with_page("undeclared.md", r#"{{option("color", "Red", "x.md")}}"#)
            .with_page("resolved.md", r#"{{option("color", "Red", "x.md")}}"#);

        let err = analyze(&source, "undeclared.md", &Picks::new()).unwrap_err();
        assert!(matches!(err, CycloramaError::OptionUndeclared { .. }));

        let picks = Picks::new().with_pick("color", "blue");
        let err = analyze(&source, "resolved.md", &picks).unwrap_err();
        assert!(matches!(err, CycloramaError::OptionResolved { .. }));
    }

    #[test]
    fn test_invalid_variable_name() {
        let source = MemorySource::new().with_page("bad.md", r#"{{question("Side?", "door.side")}}"#);
        let err = analyze(&source, "bad.md", &Picks::new()).unwrap_err();
        assert!(matches!(err, CycloramaError::InvalidVariable { .. }));
    }

    #[test]
    fn test_wrong_arity_is_a_template_error() {
        let source = MemorySource::new().with_page("arity.md", r#"{{link("only label")}}"#);
        let err = analyze(&source, "arity.md", &Picks::new()).unwrap_err();
        assert!(matches!(
            err,
            CycloramaError::Template {
                source: TemplateError::FunctionFailed { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_function_is_a_template_error() {
        let source = MemorySource::new().with_page("x.md", r#"{{teleport("a")}}"#);
        let err = analyze(&source, "x.md", &Picks::new()).unwrap_err();
        assert!(err.is_content_defect());
        assert!(err.to_string().contains("Unknown function 'teleport'"));
    }

    #[test]
    fn test_write_mode_renders_variant_links() {
        let source = MemorySource::new().with_page(
            "start.md",
            r#"{{question("Pick a color", "color")}}{{option("color", "Red", "hall.md", "red")}} {{link("About", "about.md")}}"#,
        );
        let mut page_vars = BTreeMap::new();
        page_vars.insert("hall.md".to_string(), VarSet::from(["color".to_string()]));

        let data = data();
        let registry = ChoiceRegistry::new();
        let ctx = VisitContext {
            source: &source,
            engine: TemplateEngine::new(),
            data: &data,
            registry: &registry,
        };
        let visit = visit_page(
            &ctx,
            "start.md",
            &Picks::new(),
            VisitMode::Write {
                page_vars: &page_vars,
            },
        )
        .unwrap();

        assert_eq!(visit.text, "[Red](hall_colorred.md) [About](about.md)");
    }
}
