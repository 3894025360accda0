// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Chatflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Chatflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Batched edit operations.
//!
//! Ops are applied with optimistic concurrency (revision checks) and produce a minimal
//! delta that the editor can use to refresh only the items that changed.

use std::collections::HashSet;
use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::model::{ComboId, EdgeId, NodeId, TextRun};
use crate::store::{FlowStore, NodeInsert};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum FlowOp {
    InsertNode(NodeInsert),
    DeleteNode { node_id: NodeId },
    UpdateNodeText { node_id: NodeId, text: Vec<TextRun> },
}

/// A reference to one entity of the graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum ObjectRef {
    Node(NodeId),
    Edge(EdgeId),
    Combo(ComboId),
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node(id) => write!(f, "node:{id}"),
            Self::Edge(id) => write!(f, "edge:{id}"),
            Self::Combo(id) => write!(f, "combo:{id}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyResult {
    pub new_rev: u64,
    pub applied: usize,
    pub delta: Delta,
}

/// Which objects a batch changed. Field-level changes are not tracked.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Delta {
    pub added: Vec<ObjectRef>,
    pub removed: Vec<ObjectRef>,
    pub updated: Vec<ObjectRef>,
}

impl Delta {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.updated.is_empty()
    }
}

#[derive(Debug, Default)]
pub(crate) struct DeltaBuilder {
    added: HashSet<ObjectRef>,
    removed: HashSet<ObjectRef>,
    updated: HashSet<ObjectRef>,
}

impl DeltaBuilder {
    /// An id removed and handed out again in the same batch counts as updated.
    pub(crate) fn record_added(&mut self, object_ref: ObjectRef) {
        if self.removed.remove(&object_ref) {
            self.updated.insert(object_ref);
            return;
        }
        self.added.insert(object_ref);
    }

    /// Objects added earlier in the same batch vanish from the delta entirely.
    pub(crate) fn record_removed(&mut self, object_ref: ObjectRef) {
        self.updated.remove(&object_ref);
        if self.added.remove(&object_ref) {
            return;
        }
        self.removed.insert(object_ref);
    }

    pub(crate) fn record_updated(&mut self, object_ref: ObjectRef) {
        if self.added.contains(&object_ref) || self.removed.contains(&object_ref) {
            return;
        }
        self.updated.insert(object_ref);
    }

    pub(crate) fn finish(self) -> Delta {
        let mut added = self.added.into_iter().collect::<Vec<_>>();
        let mut removed = self.removed.into_iter().collect::<Vec<_>>();
        let mut updated = self.updated.into_iter().collect::<Vec<_>>();

        added.sort();
        removed.sort();
        updated.sort();

        Delta { added, removed, updated }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApplyError {
    #[error("stale base_rev (base_rev={base_rev}, current_rev={current_rev})")]
    Conflict { base_rev: u64, current_rev: u64 },
}

/// Applies `ops` in order against `store`.
///
/// Ops referencing missing nodes are skipped without error, matching the store's
/// single-operation semantics; `applied` counts only ops that changed something. The
/// revision advances once per batch that changed anything.
pub fn apply_ops(
    store: &mut FlowStore,
    base_rev: u64,
    ops: &[FlowOp],
) -> Result<ApplyResult, ApplyError> {
    let current_rev = store.rev();
    if base_rev != current_rev {
        return Err(ApplyError::Conflict { base_rev, current_rev });
    }

    let mut delta = DeltaBuilder::default();
    let mut applied = 0usize;
    for op in ops {
        let changed = match op {
            FlowOp::InsertNode(request) => {
                store.insert_node_recorded(request.clone(), &mut delta).is_some()
            }
            FlowOp::DeleteNode { node_id } => {
                store.delete_node_recorded(node_id, &mut delta).is_some()
            }
            FlowOp::UpdateNodeText { node_id, text } => {
                store.update_node_text_recorded(node_id, text.clone(), &mut delta).is_some()
            }
        };
        if changed {
            applied += 1;
        }
    }

    if applied > 0 {
        store.bump_rev();
    }
    debug!(ops = ops.len(), applied = applied, rev = store.rev(); "applied flow ops");

    Ok(ApplyResult { new_rev: store.rev(), applied, delta: delta.finish() })
}
