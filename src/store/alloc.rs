// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Chatflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Chatflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{EdgeId, Id, NodeId};

/// Hands out fresh `<prefix>_<BASE36>` ids.
///
/// Counters only move forward, so an id is never handed out twice by the same store even
/// after the entity carrying it was deleted. Candidates already present (e.g. loaded from a
/// document) are skipped.
#[derive(Debug, Clone, Default)]
pub(crate) struct IdAllocator {
    next_node: u64,
    next_edge: u64,
}

impl IdAllocator {
    pub(crate) fn next_node_id(&mut self, taken: impl Fn(&NodeId) -> bool) -> NodeId {
        next_free("node", &mut self.next_node, taken)
    }

    pub(crate) fn next_edge_id(&mut self, taken: impl Fn(&EdgeId) -> bool) -> EdgeId {
        next_free("edge", &mut self.next_edge, taken)
    }
}

fn next_free<T>(prefix: &str, counter: &mut u64, taken: impl Fn(&Id<T>) -> bool) -> Id<T> {
    loop {
        *counter = counter.saturating_add(1);
        let candidate = format!("{prefix}_{}", base36(*counter));
        let Ok(id) = Id::new(candidate) else {
            continue;
        };
        if !taken(&id) {
            return id;
        }
    }
}

fn base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    if value == 0 {
        return "0".to_owned();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    out.into_iter().map(char::from).collect()
}
