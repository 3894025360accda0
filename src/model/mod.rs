// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Chatflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Chatflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! A flow graph holds message and button nodes, directed edges between them, and combos
//! grouping sibling choices.

pub mod document;
pub mod fixtures;
pub mod graph;
pub mod ids;
pub mod kind;
pub mod text;

pub use document::FlowDocument;
pub use graph::{Combo, FlowEdge, FlowNode};
pub use ids::{ComboId, EdgeId, Id, IdError, NodeId};
pub use kind::{Decoration, NodeCapabilities, NodeKind, Size};
pub use text::{plain_text, ListKind, TextAttributes, TextRun};
