// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Chatflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Chatflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Inputs for the drawing layer.
//!
//! Shapes are drawn elsewhere; this module decides which shapes still owe their entry
//! animation and how edges are stroked and anchored.

mod session;
mod style;

pub use session::{EntryState, RenderSession};
pub use style::{edge_anchor, edge_style, EdgeAnchor, EdgeStyle, EDGE_LINE_WIDTH};
