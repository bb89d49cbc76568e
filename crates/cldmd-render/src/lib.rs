//! # cldmd-render
//!
//! **Tier 3 (Rendering adapter)**
//!
//! Turns an analyzed diagram into a Graphviz DOT document and drives the
//! external `dot` backend (`-K` selects the layout engine). The analysis
//! core never depends on this crate; any rendering technology could consume
//! the same report.
//!
//! ## What belongs here
//! * DOT text generation (tier/polarity styling, layout attributes)
//! * Backend process invocation and availability probing
//!
//! ## What does NOT belong here
//! * Graph analysis
//! * CLI argument parsing

#![forbid(unsafe_code)]

use std::collections::HashMap;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use cldmd_model::Diagram;
use cldmd_types::{DiagramReport, Layout, NodeTier, Polarity};
use thiserror::Error;

const BACKEND_PROGRAM: &str = "dot";

/// Errors from the rendering boundary. Kept separate from analysis errors so
/// the CLI can exit differently when only the backend is missing.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("graphviz backend `{program}` is not available on PATH")]
    BackendUnavailable {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("graphviz backend `{program}` failed ({status}): {stderr}")]
    BackendFailed {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("i/o failure while rendering: {0}")]
    Io(#[from] std::io::Error),
}

/// Output format, chosen by the output file's extension. Unrecognized
/// extensions fall back to SVG.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
    Pdf,
    /// Raw DOT text; written directly, no backend needed.
    Dot,
}

impl OutputFormat {
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("png") => OutputFormat::Png,
            Some("pdf") => OutputFormat::Pdf,
            Some("dot") => OutputFormat::Dot,
            _ => OutputFormat::Svg,
        }
    }

    fn backend_flag(self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg",
            OutputFormat::Png => "png",
            OutputFormat::Pdf => "pdf",
            OutputFormat::Dot => "dot",
        }
    }
}

/// True if the Graphviz backend can be invoked.
#[must_use]
pub fn backend_available() -> bool {
    Command::new(BACKEND_PROGRAM)
        .arg("-V")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Break long variable names at underscores so node labels stay compact.
fn node_label(name: &str) -> String {
    if name.len() > 10 {
        name.replace('_', "\\n")
    } else {
        name.to_string()
    }
}

fn push_attrs(out: &mut String, attrs: &[(&str, &str)]) {
    for (key, value) in attrs {
        out.push_str(&format!("  {key}=\"{value}\";\n"));
    }
}

/// Per-layout attribute sets that reduce edge crossings.
fn crossing_attrs(layout: Layout) -> &'static [(&'static str, &'static str)] {
    match layout {
        Layout::Circo | Layout::Twopi => &[
            ("overlap", "false"),
            ("splines", "curved"),
            ("concentrate", "true"),
            ("mindist", "1.5"),
            ("sep", "+25,25"),
            ("esep", "+10,10"),
            ("pack", "true"),
            ("packmode", "graph"),
        ],
        Layout::Fdp | Layout::Sfdp => &[
            ("overlap", "prism"),
            ("splines", "spline"),
            ("concentrate", "true"),
            ("K", "0.9"),
            ("maxiter", "1000"),
            ("sep", "+15,15"),
            ("esep", "+8,8"),
            ("repulsiveforce", "2.0"),
            ("smoothing", "spring"),
        ],
        Layout::Neato => &[
            ("overlap", "scale"),
            ("splines", "spline"),
            ("concentrate", "true"),
            ("epsilon", "0.01"),
            ("maxiter", "500"),
            ("sep", "+20,20"),
            ("model", "circuit"),
        ],
        Layout::Dot => &[
            ("overlap", "false"),
            ("splines", "ortho"),
            ("concentrate", "true"),
            ("nodesep", "0.8"),
            ("ranksep", "1.2"),
            ("ordering", "out"),
            ("compound", "true"),
        ],
    }
}

fn tier_style(tier: NodeTier) -> &'static [(&'static str, &'static str)] {
    match tier {
        NodeTier::Central => &[
            ("shape", "ellipse"),
            ("style", "filled"),
            ("fillcolor", "#FFE4B5"),
            ("color", "#8B4513"),
            ("fontsize", "12"),
            ("fontcolor", "#8B4513"),
            ("penwidth", "2"),
        ],
        NodeTier::Intermediate => &[
            ("shape", "ellipse"),
            ("style", "filled"),
            ("fillcolor", "#E6F3FF"),
            ("color", "#4682B4"),
            ("fontsize", "10"),
            ("fontcolor", "#4682B4"),
            ("penwidth", "1.5"),
        ],
        NodeTier::Peripheral => &[
            ("shape", "ellipse"),
            ("style", "filled"),
            ("fillcolor", "#F0F8FF"),
            ("color", "#6495ED"),
            ("fontsize", "9"),
            ("fontcolor", "#6495ED"),
            ("penwidth", "1"),
        ],
    }
}

fn format_attr_list(attrs: &[(&str, &str)]) -> String {
    attrs
        .iter()
        .map(|(k, v)| format!("{k}=\"{v}\""))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Generate the DOT document for an analyzed diagram.
///
/// Node styling follows the tier assignment in `report`; edge styling follows
/// polarity. With `minimize_crossings`, layout-specific anti-crossing
/// attributes are added and radial layouts are rooted at the top-ranked
/// central variable.
#[must_use]
pub fn dot_source(
    diagram: &Diagram,
    report: &DiagramReport,
    layout: Layout,
    minimize_crossings: bool,
) -> String {
    let tiers: HashMap<&str, NodeTier> = report
        .nodes
        .iter()
        .map(|role| (role.name.as_str(), role.tier))
        .collect();

    let mut out = String::from("digraph cld {\n");
    push_attrs(
        &mut out,
        &[
            ("bgcolor", "white"),
            ("fontname", "Arial"),
            ("fontsize", "14"),
        ],
    );

    if minimize_crossings {
        push_attrs(&mut out, crossing_attrs(layout));
        if layout.is_radial() {
            // Pin the most central variable as the layout root.
            if let Some(root) = report
                .nodes
                .iter()
                .find(|role| role.tier == NodeTier::Central)
            {
                push_attrs(&mut out, &[("root", root.name.as_str())]);
            }
        }
    } else {
        push_attrs(&mut out, &[("overlap", "false"), ("splines", "curved")]);
    }

    out.push('\n');
    for name in diagram.names() {
        let tier = tiers.get(name.as_str()).copied().unwrap_or(NodeTier::Peripheral);
        let label = node_label(name);
        out.push_str(&format!(
            "  \"{name}\" [label=\"{label}\", {}];\n",
            format_attr_list(tier_style(tier))
        ));
    }

    out.push('\n');
    for edge in diagram.edges() {
        let from = diagram.node_name(edge.from);
        let to = diagram.node_name(edge.to);
        let (color, sign) = match edge.polarity {
            Polarity::SameDirection => ("#228B22", "+"),
            Polarity::OppositeDirection => ("#DC143C", "-"),
        };
        let mut attrs = vec![
            ("penwidth", "2"),
            ("arrowhead", "normal"),
            ("arrowsize", "1.2"),
            ("color", color),
            ("label", sign),
            ("fontcolor", color),
            ("fontsize", "14"),
        ];
        if minimize_crossings {
            attrs.push(("constraint", "true"));
            attrs.push(("weight", "2"));
            attrs.push(("minlen", "1"));
        }
        out.push_str(&format!(
            "  \"{from}\" -> \"{to}\" [{}];\n",
            format_attr_list(&attrs)
        ));
    }

    out.push_str("}\n");
    out
}

/// Write the rendered diagram to `path`. The `.dot` extension writes the DOT
/// text directly; everything else is piped through the Graphviz backend.
pub fn render_to_file(dot: &str, path: &Path, layout: Layout) -> Result<(), RenderError> {
    let format = OutputFormat::from_path(path);
    if format == OutputFormat::Dot {
        std::fs::write(path, dot)?;
        return Ok(());
    }

    let mut child = Command::new(BACKEND_PROGRAM)
        .arg(format!("-K{}", layout.engine()))
        .arg(format!("-T{}", format.backend_flag()))
        .arg("-o")
        .arg(path)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                RenderError::BackendUnavailable {
                    program: BACKEND_PROGRAM.to_string(),
                    source,
                }
            } else {
                RenderError::Io(source)
            }
        })?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(dot.as_bytes())?;
    }

    let output = child.wait_with_output()?;
    if !output.status.success() {
        return Err(RenderError::BackendFailed {
            program: BACKEND_PROGRAM.to_string(),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(())
}
