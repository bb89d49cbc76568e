//! # cldmd-model
//!
//! **Tier 2 (Model)**
//!
//! The in-memory diagram model: an immutable directed multigraph built once
//! from parsed relations. Parallel edges between the same ordered pair are
//! distinct records and self-loops are permitted; nothing is removed after
//! construction, so every downstream analysis is a read-only view.
//!
//! Edges are stored as a flat record list rather than a pair-keyed map — a
//! map would collapse parallel relations, and loop enumeration must walk
//! every outgoing edge record, not just distinct neighbor nodes.
//!
//! ## What belongs here
//! * Node interning and adjacency indexes
//! * Degree and polarity lookups
//! * The aggregate metrics tally
//!
//! ## What does NOT belong here
//! * Notation parsing
//! * Cycle enumeration or tier classification

#![forbid(unsafe_code)]

use std::collections::HashMap;

use cldmd_types::{DiagramMetrics, Polarity, Relation};

/// One directed signed edge between interned node ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeRecord {
    pub from: usize,
    pub to: usize,
    pub polarity: Polarity,
}

/// An immutable causal-loop diagram graph.
///
/// Node ids are assigned in first-appearance order; the edge list preserves
/// declaration order. Both orders are stable so reports are reproducible
/// across runs.
#[derive(Debug, Clone)]
pub struct Diagram {
    names: Vec<String>,
    index: HashMap<String, usize>,
    edges: Vec<EdgeRecord>,
    out_edges: Vec<Vec<usize>>,
    in_edges: Vec<Vec<usize>>,
}

impl Diagram {
    /// Build the graph from parsed relations. Never fails: unseen
    /// identifiers are interned on first reference.
    #[must_use]
    pub fn from_relations(relations: &[Relation]) -> Self {
        let mut diagram = Diagram {
            names: Vec::new(),
            index: HashMap::new(),
            edges: Vec::with_capacity(relations.len()),
            out_edges: Vec::new(),
            in_edges: Vec::new(),
        };

        for relation in relations {
            let from = diagram.intern(&relation.source);
            let to = diagram.intern(&relation.target);
            let edge_id = diagram.edges.len();
            diagram.edges.push(EdgeRecord {
                from,
                to,
                polarity: relation.polarity,
            });
            diagram.out_edges[from].push(edge_id);
            diagram.in_edges[to].push(edge_id);
        }

        diagram
    }

    fn intern(&mut self, name: &str) -> usize {
        if let Some(&id) = self.index.get(name) {
            return id;
        }
        let id = self.names.len();
        self.names.push(name.to_string());
        self.index.insert(name.to_string(), id);
        self.out_edges.push(Vec::new());
        self.in_edges.push(Vec::new());
        id
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Node names in first-appearance order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[must_use]
    pub fn node_name(&self, id: usize) -> &str {
        &self.names[id]
    }

    #[must_use]
    pub fn node_id(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Edge records in declaration order.
    #[must_use]
    pub fn edges(&self) -> &[EdgeRecord] {
        &self.edges
    }

    #[must_use]
    pub fn edge(&self, id: usize) -> EdgeRecord {
        self.edges[id]
    }

    /// Ids of edges leaving `node`, in declaration order.
    #[must_use]
    pub fn out_edges(&self, node: usize) -> &[usize] {
        &self.out_edges[node]
    }

    /// Ids of edges entering `node`, in declaration order.
    #[must_use]
    pub fn in_edges(&self, node: usize) -> &[usize] {
        &self.in_edges[node]
    }

    #[must_use]
    pub fn out_degree(&self, node: usize) -> usize {
        self.out_edges[node].len()
    }

    #[must_use]
    pub fn in_degree(&self, node: usize) -> usize {
        self.in_edges[node].len()
    }

    /// Centrality score: in-degree plus out-degree. A self-loop counts
    /// toward both.
    #[must_use]
    pub fn degree(&self, node: usize) -> usize {
        self.in_degree(node) + self.out_degree(node)
    }

    /// Aggregate counts; `positive + negative == relations` always.
    #[must_use]
    pub fn metrics(&self) -> DiagramMetrics {
        let positive = self
            .edges
            .iter()
            .filter(|e| e.polarity == Polarity::SameDirection)
            .count();
        DiagramMetrics {
            variables: self.node_count(),
            relations: self.edge_count(),
            positive,
            negative: self.edge_count() - positive,
        }
    }
}
