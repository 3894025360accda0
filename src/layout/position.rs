// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Chatflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Chatflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::graph::{Adjacency, LayoutGraph, VertexKind};
use super::options::LayoutOptions;
use crate::model::Size;

const SWEEPS: usize = 4;

/// Vertex centres in layout space: ranks stacked along `y`, order along `x`, both starting
/// at zero.
#[derive(Debug, Clone)]
pub(crate) struct Placement {
    pub(crate) x: Vec<f64>,
    pub(crate) y: Vec<f64>,
    /// Unpadded node size in output orientation; zero for dummies.
    pub(crate) sizes: Vec<Size>,
    /// Extent of the whole drawing along the rank axis.
    pub(crate) depth: f64,
}

pub(crate) fn place(
    graph: &LayoutGraph<'_>,
    layers: &[Vec<usize>],
    options: &LayoutOptions,
) -> Placement {
    let count = graph.vertices.len();
    let horizontal = options.rankdir.is_horizontal();

    let mut sizes = vec![Size::new(0.0, 0.0); count];
    // (across, along): box extent on the order axis and on the rank axis.
    let mut extents = vec![(options.edgesep(), 0.0); count];
    for (vertex, entry) in graph.vertices.iter().enumerate() {
        let VertexKind::Real(idx) = entry.kind else {
            continue;
        };
        let node = &graph.nodes[idx];
        let size = options.node_size.resolve(node);
        let nodesep = options.nodesep.resolve(node);
        let ranksep = options.ranksep.resolve(node);
        let (hori, verti) = if horizontal {
            (ranksep, nodesep)
        } else {
            (nodesep, ranksep)
        };
        let width = size.width + 2.0 * hori;
        let height = size.height + 2.0 * verti;
        sizes[vertex] = size;
        extents[vertex] = if horizontal {
            (height, width)
        } else {
            (width, height)
        };
    }

    let mut y = vec![0.0; count];
    let mut top = 0.0;
    for layer in layers {
        let thickness = layer.iter().map(|vertex| extents[*vertex].1).fold(0.0, f64::max);
        for &vertex in layer {
            y[vertex] = top + thickness / 2.0;
        }
        top += thickness;
    }

    let mut x = vec![0.0; count];
    for layer in layers {
        let mut left = 0.0;
        for &vertex in layer {
            x[vertex] = left + extents[vertex].0 / 2.0;
            left += extents[vertex].0;
        }
    }

    for sweep in 0..SWEEPS {
        if sweep % 2 == 0 {
            for layer in layers.iter().skip(1) {
                align_layer(layer, &graph.predecessors, &extents, &mut x);
            }
        } else {
            for layer in layers.iter().rev().skip(1) {
                align_layer(layer, &graph.successors, &extents, &mut x);
            }
        }
    }

    let left_edge = layers
        .iter()
        .flatten()
        .map(|vertex| x[*vertex] - extents[*vertex].0 / 2.0)
        .fold(f64::INFINITY, f64::min);
    if left_edge.is_finite() {
        for value in &mut x {
            *value -= left_edge;
        }
    }

    Placement { x, y, sizes, depth: top }
}

/// Pulls each vertex of `layer` toward the mean position of its neighbours while keeping
/// the layer's order and its boxes apart.
fn align_layer(layer: &[usize], neighbours: &[Adjacency], extents: &[(f64, f64)], x: &mut [f64]) {
    if layer.is_empty() {
        return;
    }
    let desired = layer
        .iter()
        .map(|vertex| {
            let adjacent = &neighbours[*vertex];
            if adjacent.is_empty() {
                x[*vertex]
            } else {
                adjacent.iter().map(|next| x[*next]).sum::<f64>() / adjacent.len() as f64
            }
        })
        .collect::<Vec<_>>();
    let gaps = layer
        .windows(2)
        .map(|pair| (extents[pair[0]].0 + extents[pair[1]].0) / 2.0)
        .collect::<Vec<_>>();

    for (vertex, placed) in layer.iter().zip(place_in_order(&desired, &gaps)) {
        x[*vertex] = placed;
    }
}

/// Least-squares fit of `desired` under `x[i + 1] - x[i] >= gaps[i]`.
///
/// Subtracting the cumulative gaps turns the constraints into plain monotonicity, which
/// pool-adjacent-violators solves exactly.
pub(crate) fn place_in_order(desired: &[f64], gaps: &[f64]) -> Vec<f64> {
    let mut offsets = Vec::with_capacity(desired.len());
    let mut offset = 0.0;
    for idx in 0..desired.len() {
        offsets.push(offset);
        offset += gaps.get(idx).copied().unwrap_or(0.0);
    }

    // (sum, len) of pooled targets.
    let mut blocks: Vec<(f64, usize)> = Vec::new();
    for (target, offset) in desired.iter().zip(&offsets) {
        blocks.push((target - offset, 1));
        while blocks.len() >= 2 {
            let (sum, len) = blocks[blocks.len() - 1];
            let (prev_sum, prev_len) = blocks[blocks.len() - 2];
            if prev_sum / prev_len as f64 <= sum / len as f64 {
                break;
            }
            blocks.pop();
            if let Some(last) = blocks.last_mut() {
                *last = (prev_sum + sum, prev_len + len);
            }
        }
    }

    let mut placed = Vec::with_capacity(desired.len());
    for (sum, len) in blocks {
        let mean = sum / len as f64;
        placed.extend(std::iter::repeat(mean).take(len));
    }
    placed.iter_mut().zip(&offsets).for_each(|(value, offset)| *value += offset);
    placed
}
