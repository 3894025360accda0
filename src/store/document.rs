// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Chatflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Chatflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use log::{debug, warn};

use super::flow_store::FlowStore;
use crate::model::{ComboId, EdgeId, FlowDocument, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeEndpoint {
    Source,
    Target,
}

impl fmt::Display for EdgeEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => f.write_str("source"),
            Self::Target => f.write_str("target"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("io error at {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("invalid flow document json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate node id: {0}")]
    DuplicateNode(NodeId),
    #[error("duplicate edge id: {0}")]
    DuplicateEdge(EdgeId),
    #[error("duplicate combo id: {0}")]
    DuplicateCombo(ComboId),
    #[error("edge {edge_id} has unknown {endpoint} node {node_id}")]
    DanglingEdge { edge_id: EdgeId, endpoint: EdgeEndpoint, node_id: NodeId },
    #[error("node {node_id} references unknown combo {combo_id}")]
    UnknownCombo { node_id: NodeId, combo_id: ComboId },
    #[error("combo {combo_id} references unknown parent combo {parent_id}")]
    UnknownParentCombo { combo_id: ComboId, parent_id: ComboId },
}

impl FlowStore {
    /// Builds a store from a document, rejecting anything that would break the graph
    /// invariants. Combos nothing refers to are dropped.
    pub fn from_document(document: FlowDocument) -> Result<Self, StoreError> {
        let FlowDocument { nodes: doc_nodes, connections, combos: doc_combos } = document;

        let mut nodes = IndexMap::with_capacity(doc_nodes.len());
        for node in doc_nodes {
            let node_id = node.id().clone();
            if nodes.insert(node_id.clone(), node).is_some() {
                return Err(StoreError::DuplicateNode(node_id));
            }
        }

        let mut combos = IndexMap::with_capacity(doc_combos.len());
        for combo in doc_combos {
            let combo_id = combo.id().clone();
            if combos.insert(combo_id.clone(), combo).is_some() {
                return Err(StoreError::DuplicateCombo(combo_id));
            }
        }
        for combo in combos.values() {
            if let Some(parent_id) = combo.parent_id() {
                if !combos.contains_key(parent_id) {
                    return Err(StoreError::UnknownParentCombo {
                        combo_id: combo.id().clone(),
                        parent_id: parent_id.clone(),
                    });
                }
            }
        }
        for node in nodes.values() {
            if let Some(combo_id) = node.combo_id() {
                if !combos.contains_key(combo_id) {
                    return Err(StoreError::UnknownCombo {
                        node_id: node.id().clone(),
                        combo_id: combo_id.clone(),
                    });
                }
            }
        }

        let mut edges = IndexMap::with_capacity(connections.len());
        for edge in connections {
            for (endpoint, node_id) in [
                (EdgeEndpoint::Source, edge.source()),
                (EdgeEndpoint::Target, edge.target()),
            ] {
                if !nodes.contains_key(node_id) {
                    return Err(StoreError::DanglingEdge {
                        edge_id: edge.id().clone(),
                        endpoint,
                        node_id: node_id.clone(),
                    });
                }
            }
            let edge_id = edge.id().clone();
            if edges.insert(edge_id.clone(), edge).is_some() {
                return Err(StoreError::DuplicateEdge(edge_id));
            }
        }

        // A combo is live when a node sits in it or in one of its descendants.
        let mut live = HashSet::<ComboId>::new();
        for node in nodes.values() {
            let mut current = node.combo_id();
            while let Some(combo_id) = current {
                if !live.insert(combo_id.clone()) {
                    break;
                }
                current = combos.get(combo_id).and_then(|combo| combo.parent_id());
            }
        }
        combos.retain(|combo_id, _| {
            let keep = live.contains(combo_id);
            if !keep {
                warn!(combo_id:% = combo_id; "dropping combo without members");
            }
            keep
        });

        debug!(
            nodes = nodes.len(),
            edges = edges.len(),
            combos = combos.len();
            "flow document loaded"
        );
        Ok(Self::from_parts(nodes, edges, combos))
    }

    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let document: FlowDocument = serde_json::from_str(json)?;
        Self::from_document(document)
    }

    pub fn to_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string_pretty(&self.snapshot())?)
    }

    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let json = fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Writes the document next to `path` first and renames it into place.
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let json = self.to_json()?;
        let Some(file_name) = path.file_name() else {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"),
            });
        };
        let tmp_path = path.with_file_name(format!(
            ".chatflow.tmp.{}.{}",
            file_name.to_string_lossy(),
            std::process::id()
        ));

        fs::write(&tmp_path, format!("{json}\n")).map_err(|source| StoreError::Io {
            path: tmp_path.clone(),
            source,
        })?;
        if let Err(source) = fs::rename(&tmp_path, path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(StoreError::Io { path: path.to_path_buf(), source });
        }
        Ok(())
    }
}
