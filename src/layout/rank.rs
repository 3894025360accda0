// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Chatflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Chatflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::VecDeque;

use super::graph::{Adjacency, LayoutGraph};
use super::options::Ranker;

/// Assigns ranks to the real vertices so that every non-loop edge points from a lower to a
/// strictly higher rank (in ranking direction). Requires `reverse_back_edges` first.
pub(crate) fn assign_ranks(graph: &mut LayoutGraph<'_>, ranker: Ranker) {
    let count = graph.real_count();
    let mut outgoing = vec![Adjacency::new(); count];
    let mut indegree = vec![0usize; count];
    for edge in &graph.edges {
        if edge.is_self_loop() {
            continue;
        }
        let (from, to) = edge.ranked_ends();
        outgoing[from].push(to);
        indegree[to] += 1;
    }

    let mut ranks = vec![0usize; count];
    let mut remaining = indegree.clone();
    let mut ready = (0..count).filter(|vertex| remaining[*vertex] == 0).collect::<VecDeque<_>>();
    while let Some(vertex) = ready.pop_front() {
        for &next in &outgoing[vertex] {
            ranks[next] = ranks[next].max(ranks[vertex] + 1);
            remaining[next] -= 1;
            if remaining[next] == 0 {
                ready.push_back(next);
            }
        }
    }

    if ranker == Ranker::PullSources {
        for vertex in 0..count {
            if indegree[vertex] != 0 {
                continue;
            }
            if let Some(nearest) = outgoing[vertex].iter().map(|next| ranks[*next]).min() {
                ranks[vertex] = nearest - 1;
            }
        }
        let lowest = ranks.iter().copied().min().unwrap_or(0);
        for rank in &mut ranks {
            *rank -= lowest;
        }
    }

    for (vertex, rank) in ranks.into_iter().enumerate() {
        graph.vertices[vertex].rank = rank;
    }
}
