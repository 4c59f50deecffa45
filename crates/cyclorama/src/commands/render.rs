//! Render command - write every reachable page variant

use crate::context::Context;
use anyhow::Result;
use colored::Colorize;
use cyclorama_core::Generator;
use std::path::PathBuf;

/// Run analysis, propagation and the write phase
///
/// # Arguments
///
/// * `start` - Start page template path
/// * `out_dir` - Output directory, created if missing
/// * `verbose` - Enable verbose output if true
///
/// # Exit Code
///
/// Pages that fail to render are reported and skipped; only errors that
/// stop the whole run (config, output directory, I/O) return `Err`.
pub fn run(start: PathBuf, out_dir: PathBuf, verbose: bool) -> Result<()> {
    let ctx = Context::new(&start, verbose)?;
    let source = ctx.source();

    if ctx.verbose {
        println!(
            "{} Rendering '{}' from {} into {}",
            "→".cyan(),
            ctx.start_page,
            ctx.source_dir.display(),
            out_dir.display()
        );
    }

    let mut generator = Generator::new(&source, &ctx.config);
    let report = generator.run(&ctx.start_page, &out_dir)?;

    for written in &report.write.written {
        println!("{} Wrote {}", "✓".green().bold(), written.path.display());
    }

    let failures = report.distinct_failures();
    for failure in &failures {
        eprintln!("{} {}: {}", "✗".red().bold(), failure.page, failure.error);
    }

    println!(
        "\n{} Wrote {} file(s) from {} page instance(s)",
        "✓".green().bold(),
        report.write.written.len(),
        report.write.visited
    );
    if !failures.is_empty() {
        println!("{} {} page(s) failed", "!".yellow(), failures.len());
    }

    Ok(())
}
