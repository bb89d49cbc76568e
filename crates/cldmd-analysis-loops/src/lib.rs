//! # cldmd-analysis-loops
//!
//! **Tier 2 (Analysis)**
//!
//! Enumerates every elementary directed cycle in a diagram and classifies its
//! polarity from the parity of opposite-direction links.
//!
//! The search is a depth-first walk with an explicit frame stack (no
//! recursion) and an on-path membership vector. Searches started from node
//! `s` only extend through nodes with id > `s`, so each cycle is discovered
//! exactly once, anchored at its smallest interned node id. The reported
//! rotation starts at the lexicographically smallest variable name instead,
//! which keeps output stable under re-orderings of the input file.
//!
//! The walk follows edge records, not neighbor nodes, so parallel edges along
//! the same node sequence yield distinct loops — one per edge combination.
//!
//! Enumeration is exponential in dense graphs. Inputs are human-authored
//! diagrams of tens of nodes, so no pruning beyond path-membership is done.

#![forbid(unsafe_code)]

use cldmd_model::Diagram;
use cldmd_types::{LoopPolarity, LoopRecord, Polarity};

struct Frame {
    node: usize,
    /// Index of the next out-edge of `node` to try.
    next: usize,
}

/// Enumerate all elementary feedback loops, classified and in canonical
/// order: by length, then node sequence, then edge indices.
///
/// An acyclic diagram yields an empty list.
#[must_use]
pub fn find_loops(diagram: &Diagram) -> Vec<LoopRecord> {
    let node_count = diagram.node_count();
    let mut found: Vec<LoopRecord> = Vec::new();

    for start in 0..node_count {
        let mut stack = vec![Frame {
            node: start,
            next: 0,
        }];
        let mut on_path = vec![false; node_count];
        on_path[start] = true;
        let mut path_edges: Vec<usize> = Vec::new();

        while let Some(frame) = stack.last_mut() {
            let node = frame.node;
            let out = diagram.out_edges(node);

            if frame.next >= out.len() {
                on_path[node] = false;
                stack.pop();
                if !stack.is_empty() {
                    path_edges.pop();
                }
                continue;
            }

            let edge_id = out[frame.next];
            frame.next += 1;
            let to = diagram.edge(edge_id).to;

            if to == start {
                let mut edges = path_edges.clone();
                edges.push(edge_id);
                let nodes: Vec<usize> = stack.iter().map(|f| f.node).collect();
                found.push(canonical_loop(diagram, &nodes, &edges));
            } else if to > start && !on_path[to] {
                on_path[to] = true;
                path_edges.push(edge_id);
                stack.push(Frame { node: to, next: 0 });
            }
        }
    }

    found.sort_by(|a, b| {
        a.nodes
            .len()
            .cmp(&b.nodes.len())
            .then_with(|| a.nodes.cmp(&b.nodes))
            .then_with(|| a.edges.cmp(&b.edges))
    });
    found
}

/// Rotate a discovered cycle so it starts at the lexicographically smallest
/// variable name, then classify it.
fn canonical_loop(diagram: &Diagram, nodes: &[usize], edges: &[usize]) -> LoopRecord {
    let len = nodes.len();
    let pivot = (0..len)
        .min_by_key(|&i| diagram.node_name(nodes[i]))
        .unwrap_or(0);

    let rotated_nodes: Vec<String> = (0..len)
        .map(|i| diagram.node_name(nodes[(pivot + i) % len]).to_string())
        .collect();
    let rotated_edges: Vec<usize> = (0..len).map(|i| edges[(pivot + i) % len]).collect();

    let negative_edges = rotated_edges
        .iter()
        .filter(|&&e| diagram.edge(e).polarity == Polarity::OppositeDirection)
        .count();

    LoopRecord {
        nodes: rotated_nodes,
        edges: rotated_edges,
        negative_edges,
        polarity: LoopPolarity::from_negative_count(negative_edges),
    }
}
