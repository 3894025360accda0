// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Chatflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Chatflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, BTreeSet, HashSet, VecDeque};

use crate::model::{EdgeId, FlowDocument, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlowNodeDegree {
    pub in_degree: u64,
    pub out_degree: u64,
}

/// In/out degree per node. Parallel edges count once each; self-loops count on both sides.
pub fn degrees(document: &FlowDocument) -> BTreeMap<NodeId, FlowNodeDegree> {
    let mut degrees: BTreeMap<NodeId, FlowNodeDegree> = document
        .nodes
        .iter()
        .map(|node| (node.id().clone(), FlowNodeDegree::default()))
        .collect();

    for edge in &document.connections {
        if let Some(degree) = degrees.get_mut(edge.source()) {
            degree.out_degree = degree.out_degree.saturating_add(1);
        }
        if let Some(degree) = degrees.get_mut(edge.target()) {
            degree.in_degree = degree.in_degree.saturating_add(1);
        }
    }

    degrees
}

/// Distinct direct successors of `node_id`, in edge order.
pub fn successors(document: &FlowDocument, node_id: &NodeId) -> Vec<NodeId> {
    let mut seen = HashSet::new();
    document
        .connections
        .iter()
        .filter(|edge| edge.source() == node_id)
        .map(|edge| edge.target())
        .filter(|target| seen.insert(*target))
        .cloned()
        .collect()
}

fn outgoing_adjacency(document: &FlowDocument) -> BTreeMap<&NodeId, BTreeSet<&NodeId>> {
    let mut outgoing: BTreeMap<&NodeId, BTreeSet<&NodeId>> = document
        .nodes
        .iter()
        .map(|node| (node.id(), BTreeSet::new()))
        .collect();
    for edge in &document.connections {
        if let Some(targets) = outgoing.get_mut(edge.source()) {
            targets.insert(edge.target());
        }
    }
    outgoing
}

/// Every node reachable from `from_node_id` (including itself), sorted by id.
pub fn reachable(document: &FlowDocument, from_node_id: &NodeId) -> Vec<NodeId> {
    let outgoing = outgoing_adjacency(document);
    if !outgoing.contains_key(from_node_id) {
        return Vec::new();
    }

    let mut visited: BTreeSet<&NodeId> = BTreeSet::new();
    let mut queue: VecDeque<&NodeId> = VecDeque::new();
    visited.insert(from_node_id);
    queue.push_back(from_node_id);

    while let Some(node_id) = queue.pop_front() {
        for next_id in outgoing.get(node_id).into_iter().flatten() {
            if outgoing.contains_key(*next_id) && visited.insert(*next_id) {
                queue.push_back(*next_id);
            }
        }
    }

    visited.into_iter().cloned().collect()
}

pub fn is_reachable(document: &FlowDocument, from_node_id: &NodeId, to_node_id: &NodeId) -> bool {
    reachable(document, from_node_id).binary_search(to_node_id).is_ok()
}

/// Nodes without outgoing edges, sorted by id.
pub fn dead_ends(document: &FlowDocument) -> Vec<NodeId> {
    outgoing_adjacency(document)
        .into_iter()
        .filter_map(|(node_id, targets)| targets.is_empty().then(|| node_id.clone()))
        .collect()
}

/// Edges whose source or target is not a node of the document.
pub fn dangling_edges(document: &FlowDocument) -> Vec<EdgeId> {
    let known: HashSet<&NodeId> = document.nodes.iter().map(|node| node.id()).collect();
    document
        .connections
        .iter()
        .filter(|edge| !known.contains(edge.source()) || !known.contains(edge.target()))
        .map(|edge| edge.id().clone())
        .collect()
}
