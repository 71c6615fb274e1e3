//! CLI logic for the vizdoc diagram tool.
//!
//! This module contains the core CLI logic: loading configuration, reading
//! the input, and either reporting detection results or writing the rendered
//! documents.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{
    fs,
    io::{self, Read, Write},
};

use log::{info, warn};

use vizdoc::{
    DocumentBuilder, VizdocError,
    config::{AppConfig, AssetConfig, ExtractConfig},
};

/// Path standing for standard input or standard output.
const STDIO: &str = "-";

/// Run the vizdoc CLI application
///
/// Reads the input, splits it into diagram blocks, and writes one document
/// per block to the output. Blocks that fail still produce an error document;
/// each one is logged as a warning.
///
/// # Errors
///
/// Returns `VizdocError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Input without any diagram block
/// - Runtime assets missing when `--check-assets` is given
pub fn run(args: &Args) -> Result<(), VizdocError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing input"
    );

    let app_config = apply_overrides(config::load_config(args.config.as_ref())?, args);
    let builder = DocumentBuilder::new(app_config);

    if args.check_assets {
        return check_assets(&builder);
    }

    let raw = read_input(&args.input)?;

    if args.detect {
        let lines = detect_lines(&builder, &raw);
        if lines.is_empty() {
            return Err(VizdocError::NothingToRender);
        }
        let mut stdout = io::stdout().lock();
        for line in lines {
            writeln!(stdout, "{line}")?;
        }
        return Ok(());
    }

    let documents = builder.render_documents(&raw);
    if documents.is_empty() {
        return Err(VizdocError::NothingToRender);
    }

    for (index, document) in documents.iter().enumerate() {
        if !document.is_success() {
            warn!(block = index + 1, status = document.status().as_str(); "Block rendered as an error document");
        }
    }

    let html: Vec<&str> = documents.iter().map(|document| document.html()).collect();
    write_output(&args.output, &html.join("\n"))?;

    info!(output_file = args.output, documents = documents.len(); "Documents written successfully");

    Ok(())
}

/// Applies command-line overrides on top of the loaded configuration.
fn apply_overrides(config: AppConfig, args: &Args) -> AppConfig {
    if args.asset_dir.is_none() && args.grammar.is_none() {
        return config;
    }

    let assets = match &args.asset_dir {
        Some(dir) => AssetConfig::new(dir, config.assets().template_dir().map(Into::into)),
        None => config.assets().clone(),
    };
    let extract = match args.grammar {
        Some(grammar) => ExtractConfig::new(config.extract().tags().to_vec(), grammar),
        None => config.extract().clone(),
    };
    AppConfig::new(assets, extract, config.style().clone())
}

fn check_assets(builder: &DocumentBuilder) -> Result<(), VizdocError> {
    let asset_dir = builder.config().assets().asset_dir().display().to_string();
    let missing = builder.missing_assets()?;
    if missing.is_empty() {
        info!(asset_dir; "All runtime assets present");
        return Ok(());
    }

    Err(VizdocError::Config(format!(
        "runtime assets missing from `{asset_dir}`: {}",
        missing.join(", ")
    )))
}

/// One line per block: fence tag, detected grammar, first line of the block.
fn detect_lines(builder: &DocumentBuilder, raw: &str) -> Vec<String> {
    builder
        .extract(raw)
        .iter()
        .map(|block| {
            let grammar = builder
                .detect(block.text())
                .map_or("none", |kind| kind.name());
            let first_line = block.text().lines().next().unwrap_or_default();
            format!(
                "{}\t{grammar}\t{first_line}",
                block.tag().unwrap_or("-")
            )
        })
        .collect()
}

fn read_input(path: &str) -> Result<String, VizdocError> {
    if path == STDIO {
        let mut raw = String::new();
        io::stdin().read_to_string(&mut raw)?;
        return Ok(raw);
    }
    Ok(fs::read_to_string(path)?)
}

fn write_output(path: &str, html: &str) -> Result<(), VizdocError> {
    if path == STDIO {
        let mut stdout = io::stdout().lock();
        stdout.write_all(html.as_bytes())?;
        stdout.write_all(b"\n")?;
        return Ok(());
    }
    fs::write(path, html)?;
    Ok(())
}
