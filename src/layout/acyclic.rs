// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Chatflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Chatflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use log::debug;

use super::graph::{Adjacency, LayoutGraph};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    New,
    OnStack,
    Done,
}

/// Marks every edge that closes a cycle as reversed.
///
/// Depth-first from each unvisited real vertex in input order, following edges in input
/// order; an edge into a vertex that is still on the DFS stack is a back edge.
pub(crate) fn reverse_back_edges(graph: &mut LayoutGraph<'_>) {
    let count = graph.real_count();
    let mut outgoing = vec![Adjacency::new(); count];
    for (edge_idx, edge) in graph.edges.iter().enumerate() {
        if !edge.is_self_loop() {
            outgoing[edge.source].push(edge_idx);
        }
    }

    let mut state = vec![Visit::New; count];
    let mut reversed = 0usize;
    for root in 0..count {
        if state[root] != Visit::New {
            continue;
        }
        state[root] = Visit::OnStack;
        let mut stack = vec![(root, 0usize)];
        while let Some(&(vertex, next)) = stack.last() {
            let Some(&edge_idx) = outgoing[vertex].get(next) else {
                state[vertex] = Visit::Done;
                stack.pop();
                continue;
            };
            if let Some(top) = stack.last_mut() {
                top.1 += 1;
            }
            let target = graph.edges[edge_idx].target;
            match state[target] {
                Visit::New => {
                    state[target] = Visit::OnStack;
                    stack.push((target, 0));
                }
                Visit::OnStack => {
                    graph.edges[edge_idx].reversed = true;
                    reversed += 1;
                }
                Visit::Done => {}
            }
        }
    }

    if reversed > 0 {
        debug!(reversed = reversed; "reversed back edges for ranking");
    }
}
