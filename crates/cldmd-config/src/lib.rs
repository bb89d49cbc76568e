//! # cldmd-config
//!
//! **Tier 4 (Configuration)**
//!
//! Clap argument definitions for the `cldmd` binary. Shared enums live in
//! `cldmd-types` (with its `clap` feature) and are re-exported here so the
//! binary has one import surface.
//!
//! ## What belongs here
//! * Clap `Parser` structs and defaults
//!
//! ## What does NOT belong here
//! * Business logic
//! * I/O

#![forbid(unsafe_code)]

use std::path::PathBuf;

use clap::Parser;

pub use cldmd_types::{Layout, TableFormat};

/// Default output path when none is given.
pub const DEFAULT_OUTPUT: &str = "cld.svg";

/// `cldmd` — analyze causal-loop-diagram notation and render it with Graphviz.
///
/// Reads a notation file (`source sign target` per line, `#` comments),
/// prints an analysis receipt (feedback loops, node tiers, metrics), and
/// renders the diagram unless `--no-render` is given.
#[derive(Parser, Debug)]
#[command(name = "cldmd", version, about, long_about = None)]
pub struct Cli {
    /// Input notation file.
    pub input: PathBuf,

    /// Output diagram file; the extension picks the format
    /// (.svg/.png/.pdf/.dot). [default: cld.svg]
    pub output: Option<PathBuf>,

    /// Graphviz layout engine.
    #[arg(value_enum)]
    pub layout: Option<Layout>,

    /// Disable crossing-minimization styling hints.
    #[arg(long)]
    pub no_crossings: bool,

    /// Receipt format for the analysis summary.
    #[arg(long, value_enum, default_value_t = TableFormat::Md)]
    pub format: TableFormat,

    /// Analyze only; skip Graphviz rendering.
    #[arg(long)]
    pub no_render: bool,

    /// Suppress the analysis receipt (render only).
    #[arg(short = 'q', long)]
    pub quiet: bool,
}

impl Cli {
    /// The effective output path.
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT))
    }

    /// The effective layout engine.
    #[must_use]
    pub fn layout(&self) -> Layout {
        self.layout.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_invocation_uses_defaults() {
        let cli = Cli::parse_from(["cldmd", "cld.txt"]);
        assert_eq!(cli.input, PathBuf::from("cld.txt"));
        assert_eq!(cli.output_path(), PathBuf::from(DEFAULT_OUTPUT));
        assert_eq!(cli.layout(), Layout::Circo);
        assert!(!cli.no_crossings);
        assert_eq!(cli.format, TableFormat::Md);
    }

    #[test]
    fn positional_output_and_layout_are_accepted() {
        let cli = Cli::parse_from(["cldmd", "cld.txt", "out.png", "sfdp", "--no-crossings"]);
        assert_eq!(cli.output_path(), PathBuf::from("out.png"));
        assert_eq!(cli.layout(), Layout::Sfdp);
        assert!(cli.no_crossings);
    }

    #[test]
    fn missing_input_is_a_parse_error() {
        assert!(Cli::try_parse_from(["cldmd"]).is_err());
    }

    #[test]
    fn unknown_layout_is_rejected() {
        assert!(Cli::try_parse_from(["cldmd", "cld.txt", "out.svg", "spiral"]).is_err());
    }
}
