// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Chatflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Chatflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use indexmap::{IndexMap, IndexSet};
use log::debug;
use serde::{Deserialize, Serialize};

use super::alloc::IdAllocator;
use crate::layout::LayoutResult;
use crate::model::{
    Combo, ComboId, EdgeId, FlowDocument, FlowEdge, FlowNode, NodeId, NodeKind, TextRun,
};
use crate::ops::{DeltaBuilder, ObjectRef};

/// Where a newly inserted node hangs in the graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceSpec {
    /// No upstream connection.
    #[default]
    Root,
    /// Insert between `anchor` and everything `anchor` currently points at.
    Splice { anchor: NodeId },
    /// Connect each listed node to the new node.
    Sources { ids: Vec<NodeId> },
}

impl SourceSpec {
    fn anchors(&self) -> &[NodeId] {
        match self {
            Self::Root => &[],
            Self::Splice { anchor } => std::slice::from_ref(anchor),
            Self::Sources { ids } => ids,
        }
    }
}

/// Request for `FlowStore::insert_node`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeInsert {
    /// Pre-generated id; when absent the store allocates one.
    #[serde(default)]
    pub id: Option<NodeId>,
    #[serde(default)]
    pub text: Vec<TextRun>,
    #[serde(default, rename = "type")]
    pub kind: NodeKind,
    #[serde(default)]
    pub combo_id: Option<ComboId>,
    #[serde(default)]
    pub order: Option<i64>,
    #[serde(default)]
    pub source: SourceSpec,
    /// Insert as the next sibling after the node(s) of this order within the combo.
    #[serde(default)]
    pub insert_after_order: Option<i64>,
}

impl NodeInsert {
    pub fn message(text: Vec<TextRun>) -> Self {
        Self { text, ..Self::default() }
    }

    pub fn button(text: Vec<TextRun>, combo_id: ComboId) -> Self {
        Self { text, kind: NodeKind::Button, combo_id: Some(combo_id), ..Self::default() }
    }

    pub fn with_id(mut self, id: NodeId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_order(mut self, order: i64) -> Self {
        self.order = Some(order);
        self
    }

    pub fn from_source(mut self, source: SourceSpec) -> Self {
        self.source = source;
        self
    }

    pub fn after_order(mut self, order: i64) -> Self {
        self.insert_after_order = Some(order);
        self
    }
}

/// A node copy with optional related data attached.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeView {
    pub node: FlowNode,
    /// Edges pointing at the node, when requested.
    pub incoming: Option<Vec<FlowEdge>>,
    /// The node's combo, when requested and the node has one.
    pub combo: Option<Combo>,
}

/// The canonical owner of a flow graph.
///
/// All entity collections are private; readers receive copies, and every structural edit
/// goes through an operation that keeps the graph free of dangling edges and empty combos.
/// `rev` increases whenever an operation changed something.
#[derive(Debug, Clone, Default)]
pub struct FlowStore {
    nodes: IndexMap<NodeId, FlowNode>,
    edges: IndexMap<EdgeId, FlowEdge>,
    combos: IndexMap<ComboId, Combo>,
    ids: IdAllocator,
    rev: u64,
}

impl FlowStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rev(&self) -> u64 {
        self.rev
    }

    pub(crate) fn bump_rev(&mut self) {
        self.rev = self.rev.saturating_add(1);
    }

    pub(crate) fn from_parts(
        nodes: IndexMap<NodeId, FlowNode>,
        edges: IndexMap<EdgeId, FlowEdge>,
        combos: IndexMap<ComboId, Combo>,
    ) -> Self {
        Self { nodes, edges, combos, ids: IdAllocator::default(), rev: 0 }
    }

    pub fn contains_node(&self, node_id: &NodeId) -> bool {
        self.nodes.contains_key(node_id)
    }

    pub fn list_nodes(&self) -> Vec<FlowNode> {
        self.nodes.values().cloned().collect()
    }

    pub fn list_edges(&self) -> Vec<FlowEdge> {
        self.edges.values().cloned().collect()
    }

    pub fn list_combos(&self) -> Vec<Combo> {
        self.combos.values().cloned().collect()
    }

    pub fn node_by_id(
        &self,
        node_id: &NodeId,
        include_incoming: bool,
        include_combo: bool,
    ) -> Option<NodeView> {
        let node = self.nodes.get(node_id)?.clone();
        let incoming = include_incoming.then(|| {
            self.edges.values().filter(|edge| edge.target() == node_id).cloned().collect()
        });
        let combo = if include_combo {
            node.combo_id().and_then(|combo_id| self.combos.get(combo_id)).cloned()
        } else {
            None
        };
        Some(NodeView { node, incoming, combo })
    }

    pub fn snapshot(&self) -> FlowDocument {
        FlowDocument {
            nodes: self.list_nodes(),
            connections: self.list_edges(),
            combos: self.list_combos(),
        }
    }

    /// Inserts a node and wires it to its sources. Returns `None` without touching the
    /// graph when the requested id is taken or a source node does not exist.
    pub fn insert_node(&mut self, request: NodeInsert) -> Option<NodeId> {
        let inserted = self.insert_node_recorded(request, &mut DeltaBuilder::default());
        if inserted.is_some() {
            self.bump_rev();
        }
        inserted
    }

    /// Deletes a node, reconnecting its upstream nodes to its downstream nodes.
    pub fn delete_node(&mut self, node_id: &NodeId) -> Option<NodeId> {
        let deleted = self.delete_node_recorded(node_id, &mut DeltaBuilder::default());
        if deleted.is_some() {
            self.bump_rev();
        }
        deleted
    }

    pub fn update_node_text(&mut self, node_id: &NodeId, text: Vec<TextRun>) -> Option<NodeId> {
        let updated =
            self.update_node_text_recorded(node_id, text, &mut DeltaBuilder::default());
        if updated.is_some() {
            self.bump_rev();
        }
        updated
    }

    /// Writes layout coordinates back onto the nodes. Returns whether anything moved.
    pub fn apply_layout(&mut self, layout: &LayoutResult) -> bool {
        let mut changed = false;
        for placed in &layout.nodes {
            let Some(node) = self.nodes.get_mut(&placed.id) else {
                continue;
            };
            if node.x() != Some(placed.x) || node.y() != Some(placed.y) {
                node.set_position(placed.x, placed.y);
                changed = true;
            }
        }
        if changed {
            self.bump_rev();
        }
        changed
    }

    pub(crate) fn insert_node_recorded(
        &mut self,
        request: NodeInsert,
        delta: &mut DeltaBuilder,
    ) -> Option<NodeId> {
        let NodeInsert { id, text, kind, combo_id, order, source, insert_after_order } = request;

        if let Some(id) = &id {
            if self.nodes.contains_key(id) {
                debug!(node_id:% = id; "insert skipped: node id already exists");
                return None;
            }
        }
        if let Some(missing) = source
            .anchors()
            .iter()
            .find(|anchor| !self.nodes.contains_key(*anchor))
        {
            debug!(source_id:% = missing; "insert skipped: source node does not exist");
            return None;
        }

        let node_id = match id {
            Some(id) => id,
            None => {
                let nodes = &self.nodes;
                self.ids.next_node_id(|candidate| nodes.contains_key(candidate))
            }
        };

        // Rewire before adding the anchor edge, otherwise it would be rewired as well.
        if let SourceSpec::Splice { anchor } = &source {
            for edge in self.edges.values_mut() {
                if edge.source() == anchor {
                    edge.set_source(node_id.clone());
                    delta.record_updated(ObjectRef::Edge(edge.id().clone()));
                }
            }
        }
        for anchor in source.anchors() {
            let edge_id = self.allocate_edge_id();
            self.edges.insert(
                edge_id.clone(),
                FlowEdge::new(edge_id.clone(), anchor.clone(), node_id.clone()),
            );
            delta.record_added(ObjectRef::Edge(edge_id));
        }

        let mut order = order;
        if let Some(after) = insert_after_order {
            for sibling in self.nodes.values_mut() {
                if sibling.combo_id() != combo_id.as_ref() {
                    continue;
                }
                if let Some(current) = sibling.order().filter(|current| *current > after) {
                    sibling.set_order(Some(current + 1));
                    delta.record_updated(ObjectRef::Node(sibling.id().clone()));
                }
            }
            order = Some(after + 1);
        }

        if let Some(combo_id) = &combo_id {
            if !self.combos.contains_key(combo_id) {
                self.combos.insert(combo_id.clone(), Combo::new(combo_id.clone()));
                delta.record_added(ObjectRef::Combo(combo_id.clone()));
            }
        }

        let mut node = FlowNode::new(node_id.clone(), kind);
        node.set_text(text);
        node.set_combo_id(combo_id);
        node.set_order(order);
        self.nodes.insert(node_id.clone(), node);
        delta.record_added(ObjectRef::Node(node_id.clone()));

        debug!(node_id:% = node_id, kind:? = kind; "node inserted");
        Some(node_id)
    }

    pub(crate) fn delete_node_recorded(
        &mut self,
        node_id: &NodeId,
        delta: &mut DeltaBuilder,
    ) -> Option<NodeId> {
        let Some(node) = self.nodes.get(node_id) else {
            debug!(node_id:% = node_id; "delete skipped: node does not exist");
            return None;
        };
        let is_choice = node.kind().is_choice();
        let combo_id = node.combo_id().cloned();

        let mut unrelated = Vec::new();
        let mut outgoing = Vec::new();
        let mut incoming = Vec::new();
        let mut touching = Vec::new();
        for edge in self.edges.values() {
            let from = edge.source() == node_id;
            let to = edge.target() == node_id;
            match (from, to) {
                (false, false) => unrelated.push(edge),
                (true, false) => outgoing.push(edge),
                (false, true) => incoming.push(edge),
                (true, true) => {}
            }
            if from || to {
                touching.push(edge.id().clone());
            }
        }

        // A choice whose target is still reached from elsewhere was one branch among
        // several; reconnecting it would only duplicate an existing path.
        let targets = outgoing
            .iter()
            .filter(|edge| {
                !(is_choice
                    && unrelated
                        .iter()
                        .any(|other| other.target() == edge.target()))
            })
            .map(|edge| edge.target().clone())
            .collect::<Vec<_>>();

        let mut reconnect = IndexSet::<(NodeId, NodeId)>::new();
        for upstream in &incoming {
            for target in &targets {
                reconnect.insert((upstream.source().clone(), target.clone()));
            }
        }

        for edge_id in touching {
            self.edges.shift_remove(&edge_id);
            delta.record_removed(ObjectRef::Edge(edge_id));
        }
        self.nodes.shift_remove(node_id);
        delta.record_removed(ObjectRef::Node(node_id.clone()));

        let reconnected = reconnect.len();
        for (source, target) in reconnect {
            let edge_id = self.allocate_edge_id();
            self.edges.insert(edge_id.clone(), FlowEdge::new(edge_id.clone(), source, target));
            delta.record_added(ObjectRef::Edge(edge_id));
        }

        if let Some(combo_id) = combo_id {
            self.prune_combo(combo_id, delta);
        }

        debug!(node_id:% = node_id, reconnected = reconnected; "node deleted");
        Some(node_id.clone())
    }

    pub(crate) fn update_node_text_recorded(
        &mut self,
        node_id: &NodeId,
        text: Vec<TextRun>,
        delta: &mut DeltaBuilder,
    ) -> Option<NodeId> {
        let Some(node) = self.nodes.get_mut(node_id) else {
            debug!(node_id:% = node_id; "text update skipped: node does not exist");
            return None;
        };
        node.set_text(text);
        delta.record_updated(ObjectRef::Node(node_id.clone()));
        Some(node_id.clone())
    }

    /// Removes `combo_id` if nothing uses it any more, then walks up its parents.
    pub(crate) fn prune_combo(&mut self, combo_id: ComboId, delta: &mut DeltaBuilder) {
        let mut current = Some(combo_id);
        while let Some(combo_id) = current.take() {
            let has_member = self.nodes.values().any(|node| node.combo_id() == Some(&combo_id));
            let has_child = self.combos.values().any(|combo| combo.parent_id() == Some(&combo_id));
            if has_member || has_child {
                break;
            }
            let Some(removed) = self.combos.shift_remove(&combo_id) else {
                break;
            };
            debug!(combo_id:% = combo_id; "combo removed");
            delta.record_removed(ObjectRef::Combo(combo_id));
            current = removed.parent_id().cloned();
        }
    }

    fn allocate_edge_id(&mut self) -> EdgeId {
        let edges = &self.edges;
        self.ids.next_edge_id(|candidate| edges.contains_key(candidate))
    }
}
