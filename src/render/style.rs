// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Chatflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Chatflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{ComboId, FlowDocument, FlowEdge, NodeId, NodeKind};

pub const EDGE_LINE_WIDTH: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeStyle {
    pub stroke: &'static str,
    pub line_width: f64,
}

/// Stroke for an edge leaving a node of `source_kind`. `faded` is the dimmed variant used
/// while another branch is focused.
pub fn edge_style(source_kind: NodeKind, faded: bool) -> EdgeStyle {
    EdgeStyle { stroke: source_kind.capabilities().edge_stroke(faded), line_width: EDGE_LINE_WIDTH }
}

/// What an edge is drawn to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgeAnchor {
    Node(NodeId),
    /// The target sits in a combo; the edge ends at the combo's box instead.
    Combo(ComboId),
}

pub fn edge_anchor(document: &FlowDocument, edge: &FlowEdge) -> EdgeAnchor {
    let combo_id = document
        .node(edge.target())
        .and_then(|node| node.combo_id())
        .filter(|combo_id| document.combos.iter().any(|combo| combo.id() == *combo_id));
    match combo_id {
        Some(combo_id) => EdgeAnchor::Combo(combo_id.clone()),
        None => EdgeAnchor::Node(edge.target().clone()),
    }
}
