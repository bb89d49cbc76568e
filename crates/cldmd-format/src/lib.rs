//! # cldmd-format
//!
//! **Tier 3 (Formatting)**
//!
//! Renders the analysis payload as chat-friendly Markdown tables, TSV for
//! piping, or a JSON receipt with `schema_version` and tool metadata.
//!
//! ## What belongs here
//! * Markdown/TSV string builders
//! * The JSON receipt envelope
//!
//! ## What does NOT belong here
//! * Analysis computation
//! * DOT generation (see cldmd-render)

#![forbid(unsafe_code)]

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use cldmd_types::{
    AnalysisReceipt, DiagramReport, LoopPolarity, LoopRecord, NodeTier, TableFormat, ToolInfo,
    SCHEMA_VERSION,
};

fn now_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
}

fn tier_label(tier: NodeTier) -> &'static str {
    match tier {
        NodeTier::Central => "central",
        NodeTier::Intermediate => "intermediate",
        NodeTier::Peripheral => "peripheral",
    }
}

fn polarity_label(polarity: LoopPolarity) -> &'static str {
    match polarity {
        LoopPolarity::Reinforcing => "reinforcing",
        LoopPolarity::Balancing => "balancing",
    }
}

/// Render a loop path as `A -> B -> C -> A`.
fn loop_path(record: &LoopRecord) -> String {
    let mut path = record.nodes.join(" -> ");
    if let Some(first) = record.nodes.first() {
        path.push_str(" -> ");
        path.push_str(first);
    }
    path
}

/// Print the analysis receipt to stdout in the requested format.
pub fn print_report(report: &DiagramReport, format: TableFormat, input: &str) -> Result<()> {
    match format {
        TableFormat::Md => print!("{}", render_md(report)),
        TableFormat::Tsv => print!("{}", render_tsv(report)),
        TableFormat::Json => {
            let receipt = AnalysisReceipt {
                schema_version: SCHEMA_VERSION,
                generated_at_ms: now_ms(),
                tool: ToolInfo::current(),
                input: input.to_string(),
                report: report.clone(),
            };
            println!("{}", serde_json::to_string(&receipt)?);
        }
    }
    Ok(())
}

#[must_use]
pub fn render_md(report: &DiagramReport) -> String {
    let mut s = String::new();

    s.push_str("## Variables\n\n");
    s.push_str("|Variable|Score|Tier|\n");
    s.push_str("|---|---:|---|\n");
    for role in &report.nodes {
        s.push_str(&format!(
            "|{}|{}|{}|\n",
            role.name,
            role.score,
            tier_label(role.tier)
        ));
    }

    s.push_str("\n## Feedback loops\n\n");
    if report.loops.is_empty() {
        s.push_str("No feedback loops detected.\n");
    } else {
        s.push_str("|#|Path|Polarity|Negative links|\n");
        s.push_str("|---:|---|---|---:|\n");
        for (i, record) in report.loops.iter().enumerate() {
            s.push_str(&format!(
                "|{}|{}|{}|{}|\n",
                i + 1,
                loop_path(record),
                polarity_label(record.polarity),
                record.negative_edges
            ));
        }
    }

    s.push_str("\n## Metrics\n\n");
    s.push_str("|Variables|Relations|Positive|Negative|\n");
    s.push_str("|---:|---:|---:|---:|\n");
    s.push_str(&format!(
        "|{}|{}|{}|{}|\n",
        report.metrics.variables,
        report.metrics.relations,
        report.metrics.positive,
        report.metrics.negative
    ));

    s
}

#[must_use]
pub fn render_tsv(report: &DiagramReport) -> String {
    let mut s = String::new();

    s.push_str("Variable\tScore\tTier\n");
    for role in &report.nodes {
        s.push_str(&format!(
            "{}\t{}\t{}\n",
            role.name,
            role.score,
            tier_label(role.tier)
        ));
    }

    s.push_str("Loop\tPath\tPolarity\tNegative\n");
    for (i, record) in report.loops.iter().enumerate() {
        s.push_str(&format!(
            "{}\t{}\t{}\t{}\n",
            i + 1,
            loop_path(record),
            polarity_label(record.polarity),
            record.negative_edges
        ));
    }

    s.push_str(&format!(
        "Totals\tvariables={} relations={}\tpositive={}\tnegative={}\n",
        report.metrics.variables,
        report.metrics.relations,
        report.metrics.positive,
        report.metrics.negative
    ));

    s
}
