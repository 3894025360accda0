// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Chatflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Chatflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::cmp::Ordering;
use std::collections::HashMap;

use super::graph::{LayoutGraph, VertexKind};
use crate::model::{Combo, ComboId};

/// Declared sibling order each dummy stands for: the `order` of the real node its chain
/// ends at. Real vertices carry none and keep their edge order.
fn declared_orders(graph: &LayoutGraph<'_>) -> Vec<Option<i64>> {
    graph
        .vertices
        .iter()
        .map(|vertex| match vertex.kind {
            VertexKind::Real(_) => None,
            VertexKind::Dummy { terminal, .. } => {
                graph.nodes.get(terminal).and_then(|node| node.order())
            }
        })
        .collect()
}

fn compare_declared(left: Option<i64>, right: Option<i64>) -> Ordering {
    match (left, right) {
        (Some(left), Some(right)) => left.cmp(&right),
        _ => Ordering::Equal,
    }
}

/// Stable insertion sort. `compare` is not transitive once an unordered sibling sits
/// between two ordered ones, and the std sorts require a total order.
fn stable_sort_by<T>(items: &mut [T], mut compare: impl FnMut(&T, &T) -> Ordering) {
    for idx in 1..items.len() {
        let mut current = idx;
        while current > 0 && compare(&items[current - 1], &items[current]) == Ordering::Greater {
            items.swap(current - 1, current);
            current -= 1;
        }
    }
}

/// Orders every rank by a depth-first walk. Dummy successors are visited in the declared
/// order of the nodes their chains end at; every other successor keeps its edge order.
///
/// Returns one vertex list per rank, left to right.
pub(crate) fn order_ranks(graph: &LayoutGraph<'_>) -> Vec<Vec<usize>> {
    if graph.vertices.is_empty() {
        return Vec::new();
    }
    let orders = declared_orders(graph);
    let mut layers = vec![Vec::new(); graph.max_rank() + 1];

    let mut seeds = (0..graph.vertices.len()).collect::<Vec<_>>();
    seeds.sort_by_key(|vertex| graph.vertices[*vertex].rank);

    let mut visited = vec![false; graph.vertices.len()];
    let mut pending = Vec::new();
    for seed in seeds {
        pending.push(seed);
        while let Some(vertex) = pending.pop() {
            if visited[vertex] {
                continue;
            }
            visited[vertex] = true;
            layers[graph.vertices[vertex].rank].push(vertex);

            let mut successors = graph.successors[vertex].clone();
            stable_sort_by(successors.as_mut_slice(), |left, right| {
                compare_declared(orders[*left], orders[*right])
            });
            pending.extend(successors.into_iter().rev());
        }
    }

    layers
}

/// Regroups each rank so members of one combo, and of each nested combo, sit next to each
/// other. Groups keep the position of their first member; everything else keeps its order.
pub(crate) fn group_by_combo(graph: &LayoutGraph<'_>, combos: &[Combo], layers: &mut [Vec<usize>]) {
    let parents = combos
        .iter()
        .map(|combo| (combo.id(), combo.parent_id()))
        .collect::<HashMap<_, _>>();

    let chains = (0..graph.vertices.len())
        .map(|vertex| {
            graph
                .node(vertex)
                .and_then(|node| node.combo_id())
                .map(|combo_id| ancestry(combo_id, &parents))
                .unwrap_or_default()
        })
        .collect::<Vec<_>>();

    for layer in layers.iter_mut() {
        let members = std::mem::take(layer);
        *layer = regroup(members, &chains, 0);
    }
}

/// Outermost combo first, ending with `combo_id` itself.
fn ancestry<'a>(
    combo_id: &'a ComboId,
    parents: &HashMap<&'a ComboId, Option<&'a ComboId>>,
) -> Vec<&'a ComboId> {
    let mut chain = vec![combo_id];
    let mut current = combo_id;
    while let Some(Some(parent)) = parents.get(current).copied() {
        if chain.contains(&parent) {
            break;
        }
        chain.push(parent);
        current = parent;
    }
    chain.reverse();
    chain
}

enum Slot<'a> {
    Single(usize),
    Group(&'a ComboId, Vec<usize>),
}

fn regroup(members: Vec<usize>, chains: &[Vec<&ComboId>], depth: usize) -> Vec<usize> {
    let mut slots: Vec<Slot<'_>> = Vec::new();
    for vertex in members {
        let Some(combo_id) = chains[vertex].get(depth).copied() else {
            slots.push(Slot::Single(vertex));
            continue;
        };
        let existing = slots.iter_mut().find_map(|slot| match slot {
            Slot::Group(id, group) if *id == combo_id => Some(group),
            _ => None,
        });
        match existing {
            Some(group) => group.push(vertex),
            None => slots.push(Slot::Group(combo_id, vec![vertex])),
        }
    }

    let mut ordered = Vec::new();
    for slot in slots {
        match slot {
            Slot::Single(vertex) => ordered.push(vertex),
            Slot::Group(_, group) => ordered.extend(regroup(group, chains, depth + 1)),
        }
    }
    ordered
}
