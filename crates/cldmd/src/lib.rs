//! # cldmd
//!
//! **CLI Binary**
//!
//! Entry point for the `cldmd` command-line application. It orchestrates the
//! other crates: parse notation, build the diagram, analyze, print the
//! receipt, render through Graphviz.
//!
//! ## Responsibilities
//! * Parse command line arguments
//! * Dispatch to the analysis and rendering crates
//! * Handle errors, hints, and exit codes
//!
//! This crate should contain minimal business logic.

use anyhow::{Context, Result};
use clap::Parser;

use cldmd_config::Cli;
use cldmd_model::Diagram;
use cldmd_render::RenderError;

mod error_hints;

/// Entry point used by the `cldmd` binary.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let text = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to read input file `{}`", cli.input.display()))?;
    let relations = cldmd_notation::parse_str(&text)
        .with_context(|| format!("invalid notation in `{}`", cli.input.display()))?;

    let diagram = Diagram::from_relations(&relations);
    let report = cldmd_analysis::analyze(&diagram);

    if !cli.quiet {
        cldmd_format::print_report(&report, cli.format, &cli.input.display().to_string())?;
    }

    if !cli.no_render {
        let layout = cli.layout();
        let output = cli.output_path();
        let dot = cldmd_render::dot_source(&diagram, &report, layout, !cli.no_crossings);
        cldmd_render::render_to_file(&dot, &output, layout)
            .with_context(|| format!("failed to render `{}`", output.display()))?;
        if !cli.quiet {
            eprintln!("Diagram written to {}", output.display());
        }
    }

    Ok(())
}

/// Render an error (with hints) for the terminal.
pub fn format_error(err: &anyhow::Error) -> String {
    error_hints::format(err)
}

/// Rendering-boundary failures exit with a distinct code so scripts can tell
/// a missing backend from a bad input file.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    if err.downcast_ref::<RenderError>().is_some() {
        2
    } else {
        1
    }
}
