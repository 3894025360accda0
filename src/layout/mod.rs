// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Chatflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Chatflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Layered layout for flow graphs.
//!
//! The pipeline is: break cycles, rank, split long edges into dummy chains, order each
//! rank depth-first, then assign coordinates. Dummy chains leaving one vertex follow the
//! declared `order` of the nodes they reach. Every call works on its own scratch data and
//! never touches the store.

mod acyclic;
mod graph;
mod options;
mod order;
mod position;
mod rank;

use std::collections::HashMap;

use log::debug;
use serde::Serialize;

use crate::model::{Combo, ComboId, EdgeId, FlowDocument, FlowEdge, FlowNode, NodeId};

use graph::LayoutGraph;
use position::Placement;

pub use options::{
    ConfigError, LayoutConfig, LayoutOptions, NodeSize, RankDir, Ranker, Separation,
    DEFAULT_COMBO_PADDING, DEFAULT_EDGESEP, DEFAULT_SEPARATION,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Placement of one node; `x`/`y` are the centre of its card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeLayout {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rank: usize,
    pub order: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeLayout {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_points: Option<Vec<Point>>,
}

/// Bounding box of a combo; `x`/`y` are its centre.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComboLayout {
    pub id: ComboId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LayoutResult {
    pub nodes: Vec<NodeLayout>,
    pub edges: Vec<EdgeLayout>,
    pub combos: Vec<ComboLayout>,
}

impl LayoutResult {
    pub fn node(&self, node_id: &NodeId) -> Option<&NodeLayout> {
        self.nodes.iter().find(|node| &node.id == node_id)
    }

    pub fn edge(&self, edge_id: &EdgeId) -> Option<&EdgeLayout> {
        self.edges.iter().find(|edge| &edge.id == edge_id)
    }

    pub fn combo(&self, combo_id: &ComboId) -> Option<&ComboLayout> {
        self.combos.iter().find(|combo| &combo.id == combo_id)
    }
}

pub fn layout_document(document: &FlowDocument, options: &LayoutOptions) -> LayoutResult {
    layout(&document.nodes, &document.connections, &document.combos, options)
}

/// Lays out a flow graph. The same input and options always give the same result.
pub fn layout(
    nodes: &[FlowNode],
    edges: &[FlowEdge],
    combos: &[Combo],
    options: &LayoutOptions,
) -> LayoutResult {
    if nodes.is_empty() {
        return LayoutResult::default();
    }

    let mut graph = LayoutGraph::build(nodes, edges);
    acyclic::reverse_back_edges(&mut graph);
    rank::assign_ranks(&mut graph, options.ranker());
    graph.normalize();

    let mut layers = order::order_ranks(&graph);
    if options.sort_by_combo {
        order::group_by_combo(&graph, combos, &mut layers);
    }

    let placement = position::place(&graph, &layers, options);
    let project = Projection::new(options, &placement);

    let mut slots = vec![0usize; graph.vertices.len()];
    for layer in &layers {
        for (slot, vertex) in layer.iter().enumerate() {
            slots[*vertex] = slot;
        }
    }

    let node_layouts = (0..graph.real_count())
        .map(|vertex| {
            let center = project.point(&placement, vertex);
            let size = placement.sizes[vertex];
            NodeLayout {
                id: nodes[vertex].id().clone(),
                x: center.x,
                y: center.y,
                width: size.width,
                height: size.height,
                rank: graph.vertices[vertex].rank,
                order: slots[vertex],
            }
        })
        .collect::<Vec<_>>();

    let edge_layouts = graph
        .edges
        .iter()
        .map(|edge| {
            let control_points = (options.control_points && !edge.chain.is_empty()).then(|| {
                let mut points = edge
                    .chain
                    .iter()
                    .map(|dummy| project.point(&placement, *dummy))
                    .collect::<Vec<_>>();
                if edge.reversed {
                    points.reverse();
                }
                points
            });
            EdgeLayout {
                id: edge.edge.id().clone(),
                source: edge.edge.source().clone(),
                target: edge.edge.target().clone(),
                control_points,
            }
        })
        .collect::<Vec<_>>();

    let combo_layouts = combo_bounds(combos, &node_layouts, nodes, options.combo_padding);

    debug!(
        nodes = node_layouts.len(),
        edges = edge_layouts.len(),
        combos = combo_layouts.len(),
        ranks = layers.len(),
        dummies = graph.vertices.len() - graph.real_count();
        "flow layout computed"
    );

    LayoutResult { nodes: node_layouts, edges: edge_layouts, combos: combo_layouts }
}

/// Maps layout space (ranks down `y`) to the requested direction plus margins.
struct Projection {
    rankdir: RankDir,
    depth: f64,
    marginx: f64,
    marginy: f64,
}

impl Projection {
    fn new(options: &LayoutOptions, placement: &Placement) -> Self {
        Self {
            rankdir: options.rankdir,
            depth: placement.depth,
            marginx: options.marginx(),
            marginy: options.marginy(),
        }
    }

    fn point(&self, placement: &Placement, vertex: usize) -> Point {
        let (across, along) = (placement.x[vertex], placement.y[vertex]);
        let (x, y) = match self.rankdir {
            RankDir::TB => (across, along),
            RankDir::BT => (across, self.depth - along),
            RankDir::LR => (along, across),
            RankDir::RL => (self.depth - along, across),
        };
        Point::new(x + self.marginx, y + self.marginy)
    }
}

#[derive(Debug, Clone, Copy)]
struct Bounds {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl Bounds {
    fn union(self, other: Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    fn pad(self, padding: f64) -> Self {
        Self {
            min_x: self.min_x - padding,
            min_y: self.min_y - padding,
            max_x: self.max_x + padding,
            max_y: self.max_y + padding,
        }
    }
}

/// Padded boxes around each combo's member nodes and nested combos, in input order.
/// Combos without any laid-out member are left out.
fn combo_bounds(
    combos: &[Combo],
    node_layouts: &[NodeLayout],
    nodes: &[FlowNode],
    padding: f64,
) -> Vec<ComboLayout> {
    let mut direct = HashMap::<&ComboId, Bounds>::new();
    for (placed, node) in node_layouts.iter().zip(nodes) {
        let Some(combo_id) = node.combo_id() else {
            continue;
        };
        let bounds = Bounds {
            min_x: placed.x - placed.width / 2.0,
            min_y: placed.y - placed.height / 2.0,
            max_x: placed.x + placed.width / 2.0,
            max_y: placed.y + placed.height / 2.0,
        };
        direct
            .entry(combo_id)
            .and_modify(|current| *current = current.union(bounds))
            .or_insert(bounds);
    }

    let mut children = HashMap::<&ComboId, Vec<&ComboId>>::new();
    for combo in combos {
        if let Some(parent_id) = combo.parent_id() {
            children.entry(parent_id).or_default().push(combo.id());
        }
    }

    let mut resolved = HashMap::<&ComboId, Option<Bounds>>::new();
    combos
        .iter()
        .filter_map(|combo| {
            let bounds = resolve_combo(
                combo.id(),
                &direct,
                &children,
                padding,
                &mut resolved,
                combos.len(),
            )?;
            Some(ComboLayout {
                id: combo.id().clone(),
                x: (bounds.min_x + bounds.max_x) / 2.0,
                y: (bounds.min_y + bounds.max_y) / 2.0,
                width: bounds.max_x - bounds.min_x,
                height: bounds.max_y - bounds.min_y,
            })
        })
        .collect()
}

fn resolve_combo<'a>(
    combo_id: &'a ComboId,
    direct: &HashMap<&'a ComboId, Bounds>,
    children: &HashMap<&'a ComboId, Vec<&'a ComboId>>,
    padding: f64,
    resolved: &mut HashMap<&'a ComboId, Option<Bounds>>,
    depth_left: usize,
) -> Option<Bounds> {
    if let Some(bounds) = resolved.get(combo_id) {
        return *bounds;
    }
    // Placeholder guards against parent cycles.
    resolved.insert(combo_id, None);

    let mut bounds = direct.get(combo_id).copied();
    if depth_left > 0 {
        for child in children.get(combo_id).into_iter().flatten() {
            if let Some(child_bounds) =
                resolve_combo(*child, direct, children, padding, resolved, depth_left - 1)
            {
                bounds = Some(match bounds {
                    Some(current) => current.union(child_bounds),
                    None => child_bounds,
                });
            }
        }
    }

    let padded = bounds.map(|bounds| bounds.pad(padding));
    resolved.insert(combo_id, padded);
    padded
}

#[cfg(test)]
mod tests;
