//! # cldmd-analysis-tiers
//!
//! **Tier 2 (Analysis)**
//!
//! Buckets variables into Central / Intermediate / Peripheral from relative
//! degree centrality (in-degree + out-degree, parallel edges and self-loops
//! included).
//!
//! Split rule: rank nodes by score descending (name ascending on ties), cut
//! provisionally at the top quarter (`max(1, n/4)`) and bottom quarter
//! (`3n/4` onward), then widen each boundary tier over any tie group the cut
//! would bisect — Central grows downward, Peripheral grows upward. Equal
//! scores therefore always share a tier, and degenerate score distributions
//! collapse to fewer non-empty tiers instead of failing.

#![forbid(unsafe_code)]

use cldmd_model::Diagram;
use cldmd_types::{NodeRole, NodeTier};

/// Rank and classify every node. The returned list is in rank order:
/// score descending, then name ascending.
#[must_use]
pub fn classify_nodes(diagram: &Diagram) -> Vec<NodeRole> {
    let node_count = diagram.node_count();
    if node_count == 0 {
        return Vec::new();
    }

    let mut ranked: Vec<(usize, usize)> = (0..node_count)
        .map(|id| (id, diagram.degree(id)))
        .collect();
    ranked.sort_by(|a, b| {
        b.1.cmp(&a.1)
            .then_with(|| diagram.node_name(a.0).cmp(diagram.node_name(b.0)))
    });

    let mut central_end = (node_count / 4).max(1);
    while central_end < node_count && ranked[central_end].1 == ranked[central_end - 1].1 {
        central_end += 1;
    }

    let mut peripheral_start = (3 * node_count / 4).max(central_end);
    while peripheral_start > central_end
        && peripheral_start < node_count
        && ranked[peripheral_start - 1].1 == ranked[peripheral_start].1
    {
        peripheral_start -= 1;
    }

    ranked
        .iter()
        .enumerate()
        .map(|(rank, &(id, score))| {
            let tier = if rank < central_end {
                NodeTier::Central
            } else if rank < peripheral_start {
                NodeTier::Intermediate
            } else {
                NodeTier::Peripheral
            };
            NodeRole {
                name: diagram.node_name(id).to_string(),
                score,
                tier,
            }
        })
        .collect()
}
