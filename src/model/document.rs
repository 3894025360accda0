// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Chatflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Chatflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};

use super::graph::{Combo, FlowEdge, FlowNode};
use super::ids::NodeId;

/// A plain snapshot of a flow graph.
///
/// This is the shape persisted to disk and handed to the layout engine. It carries no
/// invariants of its own; `FlowStore::from_document` is where a snapshot is validated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowDocument {
    #[serde(default)]
    pub nodes: Vec<FlowNode>,
    #[serde(default)]
    pub connections: Vec<FlowEdge>,
    #[serde(default)]
    pub combos: Vec<Combo>,
}

impl FlowDocument {
    pub fn node(&self, node_id: &NodeId) -> Option<&FlowNode> {
        self.nodes.iter().find(|node| node.id() == node_id)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
