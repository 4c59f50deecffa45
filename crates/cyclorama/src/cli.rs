//! CLI command structure using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cyclorama")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render every reachable page variant into OUT_DIR
    Render {
        /// Start page template, e.g. story/index.md.j2
        start: PathBuf,

        /// Directory to write the pages to
        out_dir: PathBuf,
    },

    /// Show what each page depends on without writing anything
    Analyze {
        /// Start page template, e.g. story/index.md.j2
        start: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
