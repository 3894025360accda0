// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Chatflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Chatflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The flow graph store.
//!
//! `FlowStore` owns the graph, enforces its structural invariants on every edit and reads
//! and writes the JSON document format shared with the editor.

mod alloc;
mod document;
mod flow_store;

pub use document::{EdgeEndpoint, StoreError};
pub use flow_store::{FlowStore, NodeInsert, NodeView, SourceSpec};
