// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Chatflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Chatflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeSet;

use log::trace;

use crate::model::{EdgeId, FlowDocument, NodeId};

/// Whether a shape should play its entry animation when drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryState {
    /// First time this id is drawn in the session.
    Animate,
    /// Already shown; draw at full opacity.
    Settled,
}

/// Ids that already played their entry animation in one editor session.
///
/// Each open editor owns its own session, so reopening a document animates it again.
#[derive(Debug, Clone, Default)]
pub struct RenderSession {
    nodes: BTreeSet<NodeId>,
    edges: BTreeSet<EdgeId>,
}

impl RenderSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter_node(&mut self, node_id: &NodeId) -> EntryState {
        if self.nodes.insert(node_id.clone()) {
            trace!(node_id:% = node_id; "node enters");
            EntryState::Animate
        } else {
            EntryState::Settled
        }
    }

    pub fn enter_edge(&mut self, edge_id: &EdgeId) -> EntryState {
        if self.edges.insert(edge_id.clone()) {
            trace!(edge_id:% = edge_id; "edge enters");
            EntryState::Animate
        } else {
            EntryState::Settled
        }
    }

    pub fn has_entered_node(&self, node_id: &NodeId) -> bool {
        self.nodes.contains(node_id)
    }

    pub fn has_entered_edge(&self, edge_id: &EdgeId) -> bool {
        self.edges.contains(edge_id)
    }

    /// Drops ids that are no longer in `document`, so a recreated id animates again.
    pub fn forget_missing(&mut self, document: &FlowDocument) {
        let live_nodes = document.nodes.iter().map(|node| node.id()).collect::<BTreeSet<_>>();
        let live_edges = document.connections.iter().map(|edge| edge.id()).collect::<BTreeSet<_>>();
        self.nodes.retain(|node_id| live_nodes.contains(node_id));
        self.edges.retain(|edge_id| live_edges.contains(edge_id));
    }
}
