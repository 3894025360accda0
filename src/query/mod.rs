// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Chatflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Chatflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Read-only queries over flow documents.

pub mod flow;

pub use flow::{
    dangling_edges, dead_ends, degrees, is_reachable, reachable, successors, FlowNodeDegree,
};
