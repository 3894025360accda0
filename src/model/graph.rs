// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Chatflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Chatflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};

use super::ids::{ComboId, EdgeId, NodeId};
use super::kind::NodeKind;
use super::text::TextRun;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowNode {
    id: NodeId,
    #[serde(default)]
    text: Vec<TextRun>,
    #[serde(default, rename = "type")]
    kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    combo_id: Option<ComboId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    order: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    y: Option<f64>,
}

impl FlowNode {
    pub fn new(id: NodeId, kind: NodeKind) -> Self {
        Self { id, text: Vec::new(), kind, combo_id: None, order: None, x: None, y: None }
    }

    pub fn message(id: NodeId, text: Vec<TextRun>) -> Self {
        let mut node = Self::new(id, NodeKind::Message);
        node.text = text;
        node
    }

    pub fn button(id: NodeId, text: Vec<TextRun>, combo_id: ComboId, order: i64) -> Self {
        let mut node = Self::new(id, NodeKind::Button);
        node.text = text;
        node.combo_id = Some(combo_id);
        node.order = Some(order);
        node
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn text(&self) -> &[TextRun] {
        &self.text
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn combo_id(&self) -> Option<&ComboId> {
        self.combo_id.as_ref()
    }

    pub fn order(&self) -> Option<i64> {
        self.order
    }

    pub fn x(&self) -> Option<f64> {
        self.x
    }

    pub fn y(&self) -> Option<f64> {
        self.y
    }

    pub fn set_text(&mut self, text: Vec<TextRun>) {
        self.text = text;
    }

    pub fn set_kind(&mut self, kind: NodeKind) {
        self.kind = kind;
    }

    pub fn set_combo_id(&mut self, combo_id: Option<ComboId>) {
        self.combo_id = combo_id;
    }

    pub fn set_order(&mut self, order: Option<i64>) {
        self.order = order;
    }

    pub fn set_position(&mut self, x: f64, y: f64) {
        self.x = Some(x);
        self.y = Some(y);
    }

    pub(crate) fn set_id(&mut self, id: NodeId) {
        self.id = id;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowEdge {
    id: EdgeId,
    source: NodeId,
    target: NodeId,
}

impl FlowEdge {
    pub fn new(id: EdgeId, source: NodeId, target: NodeId) -> Self {
        Self { id, source, target }
    }

    pub fn id(&self) -> &EdgeId {
        &self.id
    }

    pub fn source(&self) -> &NodeId {
        &self.source
    }

    pub fn target(&self) -> &NodeId {
        &self.target
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }

    pub(crate) fn set_source(&mut self, source: NodeId) {
        self.source = source;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Combo {
    id: ComboId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    parent_id: Option<ComboId>,
    #[serde(default = "default_combo_shape", rename = "type")]
    shape: String,
}

fn default_combo_shape() -> String {
    "rect".to_owned()
}

impl Combo {
    pub fn new(id: ComboId) -> Self {
        Self { id, parent_id: None, shape: default_combo_shape() }
    }

    pub fn with_parent(id: ComboId, parent_id: ComboId) -> Self {
        Self { parent_id: Some(parent_id), ..Self::new(id) }
    }

    pub fn id(&self) -> &ComboId {
        &self.id
    }

    pub fn parent_id(&self) -> Option<&ComboId> {
        self.parent_id.as_ref()
    }

    pub fn shape(&self) -> &str {
        &self.shape
    }

    pub fn set_shape(&mut self, shape: impl Into<String>) {
        self.shape = shape.into();
    }
}
