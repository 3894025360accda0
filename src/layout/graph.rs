// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Chatflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Chatflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashMap;

use log::warn;
use smallvec::SmallVec;

use crate::model::{FlowEdge, FlowNode, NodeId};

pub(crate) type Adjacency = SmallVec<[usize; 4]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum VertexKind {
    /// Index into the input node slice.
    Real(usize),
    /// Stand-in for layout edge `edge` on an intermediate rank.
    Dummy { edge: usize, terminal: usize },
}

#[derive(Debug, Clone)]
pub(crate) struct Vertex {
    pub(crate) kind: VertexKind,
    pub(crate) rank: usize,
}

#[derive(Debug, Clone)]
pub(crate) struct LayoutEdge<'a> {
    pub(crate) edge: &'a FlowEdge,
    pub(crate) source: usize,
    pub(crate) target: usize,
    /// Points against the DFS direction; ranked as `target -> source`.
    pub(crate) reversed: bool,
    /// Dummy vertices in ranking direction.
    pub(crate) chain: Vec<usize>,
}

impl LayoutEdge<'_> {
    pub(crate) fn is_self_loop(&self) -> bool {
        self.source == self.target
    }

    /// Endpoints in ranking direction.
    pub(crate) fn ranked_ends(&self) -> (usize, usize) {
        if self.reversed {
            (self.target, self.source)
        } else {
            (self.source, self.target)
        }
    }
}

/// Working graph of one layout call. Real vertices come first, in input order; dummies are
/// appended by `normalize`.
#[derive(Debug)]
pub(crate) struct LayoutGraph<'a> {
    pub(crate) nodes: &'a [FlowNode],
    pub(crate) vertices: Vec<Vertex>,
    pub(crate) edges: Vec<LayoutEdge<'a>>,
    pub(crate) successors: Vec<Adjacency>,
    pub(crate) predecessors: Vec<Adjacency>,
}

impl<'a> LayoutGraph<'a> {
    pub(crate) fn build(nodes: &'a [FlowNode], edges: &'a [FlowEdge]) -> Self {
        let mut index = HashMap::<&NodeId, usize>::with_capacity(nodes.len());
        for (idx, node) in nodes.iter().enumerate() {
            if index.insert(node.id(), idx).is_some() {
                warn!(node_id:% = node.id(); "duplicate node id in layout input, last one wins");
            }
        }

        let vertices = (0..nodes.len())
            .map(|idx| Vertex { kind: VertexKind::Real(idx), rank: 0 })
            .collect();

        let mut layout_edges = Vec::with_capacity(edges.len());
        for edge in edges {
            let (Some(&source), Some(&target)) =
                (index.get(edge.source()), index.get(edge.target()))
            else {
                warn!(edge_id:% = edge.id(); "skipping edge with unknown endpoint");
                continue;
            };
            layout_edges.push(LayoutEdge {
                edge,
                source,
                target,
                reversed: false,
                chain: Vec::new(),
            });
        }

        Self {
            nodes,
            vertices,
            edges: layout_edges,
            successors: Vec::new(),
            predecessors: Vec::new(),
        }
    }

    pub(crate) fn real_count(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn node(&self, vertex: usize) -> Option<&'a FlowNode> {
        match self.vertices.get(vertex)?.kind {
            VertexKind::Real(idx) => self.nodes.get(idx),
            VertexKind::Dummy { .. } => None,
        }
    }

    /// Splits every edge spanning several ranks into a chain of dummies and fills the
    /// unit-span adjacency lists. Self-loops are left out of the adjacency.
    pub(crate) fn normalize(&mut self) {
        for edge_idx in 0..self.edges.len() {
            let edge = &self.edges[edge_idx];
            if edge.is_self_loop() {
                continue;
            }
            let (from, to) = edge.ranked_ends();
            let (from_rank, to_rank) = (self.vertices[from].rank, self.vertices[to].rank);
            let mut chain = Vec::new();
            for rank in from_rank + 1..to_rank {
                chain.push(self.vertices.len());
                self.vertices.push(Vertex {
                    kind: VertexKind::Dummy { edge: edge_idx, terminal: to },
                    rank,
                });
            }
            self.edges[edge_idx].chain = chain;
        }

        let count = self.vertices.len();
        self.successors = vec![Adjacency::new(); count];
        self.predecessors = vec![Adjacency::new(); count];
        for edge_idx in 0..self.edges.len() {
            let edge = &self.edges[edge_idx];
            if edge.is_self_loop() {
                continue;
            }
            let (from, to) = edge.ranked_ends();
            let mut path = Vec::with_capacity(edge.chain.len() + 2);
            path.push(from);
            path.extend(edge.chain.iter().copied());
            path.push(to);
            for pair in path.windows(2) {
                let (upper, lower) = (pair[0], pair[1]);
                if !self.successors[upper].contains(&lower) {
                    self.successors[upper].push(lower);
                }
                if !self.predecessors[lower].contains(&upper) {
                    self.predecessors[lower].push(upper);
                }
            }
        }
    }

    pub(crate) fn max_rank(&self) -> usize {
        self.vertices.iter().map(|vertex| vertex.rank).max().unwrap_or(0)
    }
}
