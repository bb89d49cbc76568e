//! # cldmd-types
//!
//! **Tier 0 (Core Types)**
//!
//! This crate defines the core data structures and contracts for `cldmd`.
//! It contains only data types, Serde definitions, and `schema_version`.
//!
//! ## What belongs here
//! * Pure data structs (relations, loops, tiers, metrics, receipts)
//! * Serialization/Deserialization logic
//! * Stability markers (SCHEMA_VERSION)
//!
//! ## What does NOT belong here
//! * File I/O
//! * CLI argument parsing
//! * Graph traversal or classification logic

#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

/// The current schema version for all receipt types.
pub const SCHEMA_VERSION: u32 = 1;

/// Direction of influence carried by a single relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    /// `+`: the target moves in the same direction as the source.
    SameDirection,
    /// `-`: the target moves opposite to the source.
    OppositeDirection,
}

impl Polarity {
    /// The single-character sign token used by the notation format.
    #[must_use]
    pub fn sign_token(self) -> char {
        match self {
            Polarity::SameDirection => '+',
            Polarity::OppositeDirection => '-',
        }
    }
}

/// One signed influence declaration: `source sign target`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    pub source: String,
    pub polarity: Polarity,
    pub target: String,
}

impl Relation {
    pub fn new(
        source: impl Into<String>,
        polarity: Polarity,
        target: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            polarity,
            target: target.into(),
        }
    }
}

/// Behavior class of a feedback loop, derived from sign parity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopPolarity {
    /// Even count of opposite-direction links: disturbances compound.
    Reinforcing,
    /// Odd count of opposite-direction links: disturbances self-correct.
    Balancing,
}

impl LoopPolarity {
    /// Classify a loop from the number of opposite-direction links it
    /// traverses.
    #[must_use]
    pub fn from_negative_count(count: usize) -> Self {
        if count % 2 == 0 {
            LoopPolarity::Reinforcing
        } else {
            LoopPolarity::Balancing
        }
    }
}

/// One elementary feedback loop in canonical rotation.
///
/// `nodes[i]` is connected to `nodes[(i + 1) % len]` by the diagram edge at
/// index `edges[i]`. The canonical rotation starts at the lexicographically
/// smallest variable name in the cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoopRecord {
    pub nodes: Vec<String>,
    pub edges: Vec<usize>,
    pub negative_edges: usize,
    pub polarity: LoopPolarity,
}

/// Structural role of a variable, derived from relative degree centrality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeTier {
    Central,
    Intermediate,
    Peripheral,
}

/// A variable with its centrality score and assigned tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRole {
    pub name: String,
    /// In-degree plus out-degree, counting parallel edges and self-loops.
    pub score: usize,
    pub tier: NodeTier,
}

/// Aggregate counts over one diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagramMetrics {
    pub variables: usize,
    pub relations: usize,
    pub positive: usize,
    pub negative: usize,
}

/// The full analysis payload: metrics, ranked node roles, classified loops.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagramReport {
    pub metrics: DiagramMetrics,
    /// Ranked by score descending, then name ascending.
    pub nodes: Vec<NodeRole>,
    /// Sorted by length, then canonical node sequence, then edge indices.
    pub loops: Vec<LoopRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

impl ToolInfo {
    pub fn current() -> Self {
        Self {
            name: "cldmd".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// JSON envelope emitted by `--format json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReceipt {
    pub schema_version: u32,
    pub generated_at_ms: u128,
    pub tool: ToolInfo,
    pub input: String,
    pub report: DiagramReport,
}

// -----------------------------------------------------------------------------
// Enums shared with the CLI
// -----------------------------------------------------------------------------

/// Graphviz layout engine used for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum Layout {
    /// Circular layout (the usual choice for causal-loop diagrams).
    #[default]
    Circo,
    /// Force-directed placement.
    Fdp,
    /// Scalable force-directed placement (better for large graphs).
    Sfdp,
    /// Spring model.
    Neato,
    /// Hierarchical layout.
    Dot,
    /// Radial layout.
    Twopi,
}

impl Layout {
    /// The engine name passed to Graphviz via `-K`.
    #[must_use]
    pub fn engine(self) -> &'static str {
        match self {
            Layout::Circo => "circo",
            Layout::Fdp => "fdp",
            Layout::Sfdp => "sfdp",
            Layout::Neato => "neato",
            Layout::Dot => "dot",
            Layout::Twopi => "twopi",
        }
    }

    /// Circular-family engines accept a `root` pin for the most central node.
    #[must_use]
    pub fn is_radial(self) -> bool {
        matches!(self, Layout::Circo | Layout::Twopi)
    }
}

/// Receipt table format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum TableFormat {
    /// Markdown tables (great for pasting into chat).
    #[default]
    Md,
    /// Tab-separated values (good for piping to other tools).
    Tsv,
    /// JSON receipt (compact, with schema_version).
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loop_polarity_follows_parity() {
        assert_eq!(
            LoopPolarity::from_negative_count(0),
            LoopPolarity::Reinforcing
        );
        assert_eq!(
            LoopPolarity::from_negative_count(1),
            LoopPolarity::Balancing
        );
        assert_eq!(
            LoopPolarity::from_negative_count(2),
            LoopPolarity::Reinforcing
        );
        assert_eq!(
            LoopPolarity::from_negative_count(7),
            LoopPolarity::Balancing
        );
    }

    #[test]
    fn polarity_serializes_snake_case() {
        let json = serde_json::to_string(&Polarity::OppositeDirection).expect("serialize");
        assert_eq!(json, r#""opposite_direction""#);
    }

    #[test]
    fn layout_engine_names_are_graphviz_binaries() {
        assert_eq!(Layout::Circo.engine(), "circo");
        assert_eq!(Layout::Dot.engine(), "dot");
        assert!(Layout::Twopi.is_radial());
        assert!(!Layout::Fdp.is_radial());
    }

    #[test]
    fn receipt_round_trips_through_json() {
        let receipt = AnalysisReceipt {
            schema_version: SCHEMA_VERSION,
            generated_at_ms: 0,
            tool: ToolInfo::current(),
            input: "cld.txt".to_string(),
            report: DiagramReport {
                metrics: DiagramMetrics {
                    variables: 2,
                    relations: 1,
                    positive: 1,
                    negative: 0,
                },
                nodes: vec![NodeRole {
                    name: "A".to_string(),
                    score: 1,
                    tier: NodeTier::Central,
                }],
                loops: vec![],
            },
        };
        let json = serde_json::to_string(&receipt).expect("serialize");
        let back: AnalysisReceipt = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.report, receipt.report);
    }
}
