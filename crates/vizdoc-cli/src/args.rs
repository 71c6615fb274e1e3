//! Command-line argument definitions for the vizdoc CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, grammar and asset overrides, and logging verbosity.

use clap::Parser;

use vizdoc::grammar::GrammarHint;

/// Command-line arguments for the vizdoc diagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input file, or `-` for standard input
    #[arg(help = "Path to the input file (markdown or a bare diagram), `-` for stdin")]
    pub input: String,

    /// Path to the output HTML file, or `-` for standard output
    #[arg(short, long, default_value = "out.html")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Grammar for every block (auto, mermaid, plantuml, graphviz)
    #[arg(short, long)]
    pub grammar: Option<GrammarHint>,

    /// Directory holding the runtime assets, overriding the configuration
    #[arg(long)]
    pub asset_dir: Option<String>,

    /// Print each block's tag, detected grammar and first line instead of rendering
    #[arg(long)]
    pub detect: bool,

    /// Report runtime assets missing from the asset directory and exit
    #[arg(long)]
    pub check_assets: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
