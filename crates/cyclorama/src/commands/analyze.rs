//! Analyze command - show the page graph and variable sets

use crate::context::Context;
use crate::output::{print_json, print_lines};
use anyhow::Result;
use colored::Colorize;
use cyclorama_core::Generator;
use cyclorama_core::generate::{AnalysisReport, PageFailure, SiteState, distinct_failures};
use serde_json::json;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Run analysis and propagation without writing files
///
/// # Arguments
///
/// * `start` - Start page template path
/// * `json` - Output as JSON if true
/// * `verbose` - Enable verbose output if true
pub fn run(start: PathBuf, json: bool, verbose: bool) -> Result<()> {
    let ctx = Context::new(&start, verbose)?;
    let source = ctx.source();

    let mut generator = Generator::new(&source, &ctx.config);
    let report = generator.analyze(&ctx.start_page)?;
    let passes = generator.propagate();
    let failures = distinct_failures(&report.failures);

    if json {
        render_json(&ctx, generator.state(), &report, passes, &failures)
    } else {
        render_human(&ctx, generator.state(), &report, passes, &failures)
    }
}

fn render_json(
    ctx: &Context,
    state: &SiteState,
    report: &AnalysisReport,
    passes: usize,
    failures: &[&PageFailure],
) -> Result<()> {
    let failures: Vec<_> = failures
        .iter()
        .map(|f| {
            json!({
                "page": f.page,
                "picks": f.picks.to_string(),
                "error": f.error.to_string(),
            })
        })
        .collect();

    let output = json!({
        "schema_version": "1.0",
        "source_dir": ctx.source_dir.display().to_string(),
        "start_page": ctx.start_page,
        "visited": report.visited,
        "passes": passes,
        "pages": state.summaries(),
        "questions": state.registry(),
        "failures": failures,
    });

    print_json(&serde_json::to_string_pretty(&output)?)?;
    Ok(())
}

fn render_human(
    ctx: &Context,
    state: &SiteState,
    report: &AnalysisReport,
    passes: usize,
    failures: &[&PageFailure],
) -> Result<()> {
    let mut lines = vec![format!(
        "{} Analyzed '{}': {} instance(s), {} page(s), {} question(s), fixed point after {} pass(es)",
        "→".cyan(),
        ctx.start_page,
        report.visited,
        state.pages().count(),
        state.registry().len(),
        passes
    )];

    lines.push(String::new());
    lines.push("Pages:".bold().to_string());
    for summary in state.summaries() {
        lines.push(format!("  {}", summary.page.bold()));
        lines.push(format!("    reads:      {}", join(&summary.local_vars)));
        lines.push(format!("    depends on: {}", join(&summary.vars)));
        if !summary.owned_questions.is_empty() {
            lines.push(format!("    asks:       {}", join(&summary.owned_questions)));
        }
        if !summary.links.is_empty() {
            lines.push(format!("    links:      {}", join(&summary.links)));
        }
    }

    if !state.registry().is_empty() {
        lines.push(String::new());
        lines.push("Questions:".bold().to_string());
        for question in state.registry().iter() {
            lines.push(format!("  {}: {}", question.var.bold(), question.prompt));
            for option in &question.options {
                lines.push(format!("    {} = {}", option.value, option.label));
            }
        }
    }

    print_lines(&lines)?;

    for failure in failures {
        eprintln!("{} {}: {}", "✗".red().bold(), failure.page, failure.error);
    }

    Ok(())
}

fn join(items: &BTreeSet<String>) -> String {
    if items.is_empty() {
        return "-".to_string();
    }
    items.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}
