//! # cldmd-analysis
//!
//! Analysis facade for cldmd receipts: runs every derived view (aggregate
//! metrics, feedback loops, node tiers) over one immutable diagram. Nothing
//! here mutates the graph; the views are independent and could run in
//! parallel, but input diagrams are small enough that sequential is fine.

#![forbid(unsafe_code)]

use cldmd_model::Diagram;
use cldmd_types::DiagramReport;

pub use cldmd_analysis_loops::find_loops;
pub use cldmd_analysis_tiers::classify_nodes;

/// Produce the full analysis payload for one diagram.
#[must_use]
pub fn analyze(diagram: &Diagram) -> DiagramReport {
    DiagramReport {
        metrics: diagram.metrics(),
        nodes: classify_nodes(diagram),
        loops: find_loops(diagram),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cldmd_types::{LoopPolarity, NodeTier, Polarity, Relation};

    #[test]
    fn report_combines_all_views() {
        let relations = vec![
            Relation::new("X", Polarity::SameDirection, "Y"),
            Relation::new("Y", Polarity::OppositeDirection, "Z"),
            Relation::new("Z", Polarity::SameDirection, "X"),
        ];
        let diagram = Diagram::from_relations(&relations);
        let report = analyze(&diagram);

        assert_eq!(report.metrics.variables, 3);
        assert_eq!(report.metrics.relations, 3);
        assert_eq!(report.metrics.positive, 2);
        assert_eq!(report.metrics.negative, 1);

        assert_eq!(report.loops.len(), 1);
        assert_eq!(report.loops[0].polarity, LoopPolarity::Balancing);

        assert_eq!(report.nodes.len(), 3);
        // Symmetric ring: everyone ties, so everyone is central.
        assert!(report.nodes.iter().all(|r| r.tier == NodeTier::Central));
    }

    #[test]
    fn acyclic_diagram_reports_empty_loop_list() {
        let relations = vec![
            Relation::new("A", Polarity::SameDirection, "B"),
            Relation::new("B", Polarity::SameDirection, "C"),
        ];
        let report = analyze(&Diagram::from_relations(&relations));
        assert!(report.loops.is_empty());
        assert_eq!(report.metrics.variables, 3);
    }
}
