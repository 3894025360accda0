// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Chatflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Chatflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Chatflow: conversation-flow graphs of messages and button choices.
//!
//! [`store::FlowStore`] owns the graph and its structural edits, [`ops`] applies edit
//! batches against a revision, and [`layout`] computes a layered drawing with a stable
//! left-to-right order for sibling choices.

pub mod layout;
pub mod model;
pub mod ops;
pub mod query;
pub mod render;
pub mod store;
