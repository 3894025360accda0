// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Chatflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Chatflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use rstest::rstest;
use serde_json::json;

use super::{
    layout, layout_document, LayoutOptions, LayoutResult, NodeLayout, NodeSize, RankDir, Separation,
};
use crate::model::fixtures::{demo_conversation, message_chain};
use crate::model::{
    Combo, ComboId, EdgeId, FlowDocument, FlowEdge, FlowNode, NodeId, NodeKind, Size,
};

fn nid(value: &str) -> NodeId {
    NodeId::new(value).expect("node id")
}

fn eid(value: &str) -> EdgeId {
    EdgeId::new(value).expect("edge id")
}

fn cid(value: &str) -> ComboId {
    ComboId::new(value).expect("combo id")
}

fn edge(id: &str, source: &str, target: &str) -> FlowEdge {
    FlowEdge::new(eid(id), nid(source), nid(target))
}

fn message(id: &str) -> FlowNode {
    FlowNode::new(nid(id), NodeKind::Message)
}

fn in_combo(id: &str, combo: &str, order: Option<i64>) -> FlowNode {
    let mut node = FlowNode::new(nid(id), NodeKind::Button);
    node.set_combo_id(Some(cid(combo)));
    node.set_order(order);
    node
}

fn tight(width: f64, height: f64) -> LayoutOptions {
    LayoutOptions::default()
        .with_node_size(NodeSize::Fixed(Size::new(width, height)))
        .with_nodesep(Separation::Fixed(0.0))
        .with_ranksep(Separation::Fixed(0.0))
}

fn placed<'a>(result: &'a LayoutResult, id: &str) -> &'a NodeLayout {
    result.node(&nid(id)).expect("node layout")
}

fn center(result: &LayoutResult, id: &str) -> (f64, f64) {
    let node = placed(result, id);
    (node.x, node.y)
}

fn fan_out(children: Vec<FlowNode>, combos: Vec<Combo>) -> FlowDocument {
    let mut connections = Vec::new();
    for (idx, child) in children.iter().enumerate() {
        connections.push(FlowEdge::new(eid(&format!("e{idx}")), nid("root"), child.id().clone()));
    }
    let mut nodes = vec![message("root")];
    nodes.extend(children);
    FlowDocument { nodes, connections, combos }
}

#[test]
fn empty_graph_gives_empty_result() {
    let result = layout(&[], &[], &[], &LayoutOptions::default());
    assert_eq!(result, LayoutResult::default());
}

#[test]
fn layout_is_deterministic() {
    let document = demo_conversation();
    let options = LayoutOptions::default().with_sort_by_combo(true).with_control_points(true);

    let first = layout_document(&document, &options);
    let second = layout_document(&document, &options);

    assert_eq!(first, second);
    assert_eq!(first.nodes.len(), document.nodes.len());
    assert_eq!(first.edges.len(), document.connections.len());
}

#[test]
fn every_edge_points_to_a_deeper_rank() {
    let document = demo_conversation();
    let result = layout_document(&document, &LayoutOptions::default());

    for edge in &document.connections {
        let source = placed(&result, edge.source().as_str());
        let target = placed(&result, edge.target().as_str());
        assert!(
            target.rank > source.rank,
            "{} -> {} keeps rank order",
            edge.source(),
            edge.target()
        );
        assert!(target.y > source.y);
    }
}

#[test]
fn real_siblings_keep_edge_order_in_demo() {
    let result = layout_document(&demo_conversation(), &LayoutOptions::default());

    let first_group = ["btn_1", "btn_2", "btn_3", "btn_4"];
    for (order, id) in first_group.iter().enumerate() {
        assert_eq!(placed(&result, id).rank, 1);
        assert_eq!(placed(&result, id).order, order, "{id}");
    }

    let second_group = ["btn_11", "btn_12", "btn_13"];
    for (order, id) in second_group.iter().enumerate() {
        assert_eq!(placed(&result, id).rank, 4);
        assert_eq!(placed(&result, id).order, order, "{id}");
    }
    assert!(placed(&result, "btn_11").x < placed(&result, "btn_12").x);
    assert!(placed(&result, "btn_12").x < placed(&result, "btn_13").x);
}

#[test]
fn declared_order_does_not_reorder_real_siblings() {
    let document = fan_out(
        vec![in_combo("a", "g", Some(2)), in_combo("b", "g", Some(1))],
        vec![Combo::new(cid("g"))],
    );
    let result = layout_document(&document, &tight(100.0, 20.0));

    assert_eq!(placed(&result, "a").order, 0);
    assert_eq!(placed(&result, "b").order, 1);
}

#[test]
fn long_edges_from_one_source_follow_their_targets_declared_order() {
    let document = FlowDocument {
        nodes: vec![
            message("r"),
            message("m"),
            in_combo("a", "g", Some(2)),
            in_combo("b", "g", Some(1)),
        ],
        connections: vec![
            edge("e_rm", "r", "m"),
            edge("e_ma", "m", "a"),
            edge("e_mb", "m", "b"),
            edge("e_ra", "r", "a"),
            edge("e_rb", "r", "b"),
        ],
        combos: vec![Combo::new(cid("g"))],
    };
    let result = layout_document(&document, &tight(100.0, 20.0).with_control_points(true));

    let bend = |id: &str| {
        let points = result.edge(&eid(id)).and_then(|edge| edge.control_points.clone());
        let points = points.expect("control points");
        assert_eq!(points.len(), 1);
        points[0]
    };
    let to_a = bend("e_ra");
    let to_b = bend("e_rb");
    assert_eq!(to_a.y, placed(&result, "m").y);
    assert!(to_b.x < to_a.x);
    assert!(placed(&result, "m").x < to_b.x);

    // Both targets are real successors of `m`, so they stay in edge order.
    assert_eq!(placed(&result, "a").order, 0);
    assert_eq!(placed(&result, "b").order, 1);
}

#[test]
fn real_and_dummy_siblings_keep_edge_order() {
    let mut x = message("x");
    x.set_order(Some(5));
    let mut c = message("c");
    c.set_order(Some(1));
    let document = FlowDocument {
        nodes: vec![message("r"), x, c],
        connections: vec![edge("e_rx", "r", "x"), edge("e_xc", "x", "c"), edge("e_rc", "r", "c")],
        combos: Vec::new(),
    };
    let result = layout_document(&document, &tight(100.0, 20.0).with_control_points(true));

    let points = result.edge(&eid("e_rc")).and_then(|edge| edge.control_points.clone());
    let points = points.expect("control points");
    assert_eq!(points[0].y, placed(&result, "x").y);
    assert!(placed(&result, "x").x < points[0].x);
}

#[test]
fn unordered_siblings_keep_edge_order() {
    let document = fan_out(vec![message("c"), message("a"), message("b")], Vec::new());
    let result = layout_document(&document, &tight(100.0, 20.0));

    assert_eq!(placed(&result, "c").order, 0);
    assert_eq!(placed(&result, "a").order, 1);
    assert_eq!(placed(&result, "b").order, 2);
}

#[test]
fn boxes_in_a_rank_never_overlap() {
    let options = LayoutOptions::default().with_sort_by_combo(true);
    let result = layout_document(&demo_conversation(), &options);

    let mut by_rank = std::collections::BTreeMap::<usize, Vec<&NodeLayout>>::new();
    for node in &result.nodes {
        by_rank.entry(node.rank).or_default().push(node);
    }
    for nodes in by_rank.values_mut() {
        nodes.sort_by_key(|node| node.order);
        for pair in nodes.windows(2) {
            let gap = pair[1].x - pair[0].x;
            // Default separation pads each card by 50 on both sides.
            assert!(gap + 1e-9 >= (pair[0].width + pair[1].width) / 2.0 + 100.0);
        }
    }
}

#[rstest]
#[case::top_bottom(RankDir::TB, [(60.0, 40.0), (60.0, 120.0), (60.0, 200.0)])]
#[case::bottom_top(RankDir::BT, [(60.0, 200.0), (60.0, 120.0), (60.0, 40.0)])]
#[case::left_right(RankDir::LR, [(70.0, 30.0), (210.0, 30.0), (350.0, 30.0)])]
#[case::right_left(RankDir::RL, [(350.0, 30.0), (210.0, 30.0), (70.0, 30.0)])]
fn rank_direction_maps_axes(#[case] rankdir: RankDir, #[case] expected: [(f64, f64); 3]) {
    let options = LayoutOptions::default()
        .with_rankdir(rankdir)
        .with_node_size(NodeSize::Fixed(Size::new(100.0, 40.0)))
        .with_nodesep(Separation::Fixed(10.0))
        .with_ranksep(Separation::Fixed(20.0));
    let result = layout_document(&message_chain(), &options);

    assert_eq!(center(&result, "a"), expected[0]);
    assert_eq!(center(&result, "b"), expected[1]);
    assert_eq!(center(&result, "c"), expected[2]);
    assert_eq!((placed(&result, "a").width, placed(&result, "a").height), (100.0, 40.0));
}

#[test]
fn margins_shift_the_drawing() {
    let options = tight(100.0, 20.0)
        .with_passthrough("marginx", json!(5))
        .with_passthrough("marginy", json!(7));
    let result = layout_document(&message_chain(), &options);

    assert_eq!(center(&result, "a"), (55.0, 17.0));
}

#[test]
fn separation_can_vary_per_node() {
    let document = FlowDocument {
        nodes: vec![message("p"), message("q")],
        ..FlowDocument::default()
    };
    let narrow = tight(100.0, 20.0).with_nodesep(Separation::per_node(|node| {
        if node.id().as_str() == "q" {
            25.0
        } else {
            0.0
        }
    }));
    let result = layout_document(&document, &narrow);
    assert_eq!(center(&result, "p").0, 50.0);
    assert_eq!(center(&result, "q").0, 175.0);

    let wide = tight(100.0, 20.0).with_nodesep(Separation::Fixed(50.0));
    let result = layout_document(&document, &wide);
    assert_eq!(center(&result, "q").0 - center(&result, "p").0, 200.0);
}

#[test]
fn long_edges_get_control_points_on_skipped_ranks() {
    let document = FlowDocument {
        nodes: vec![message("a"), message("b"), message("c")],
        connections: vec![edge("e_ab", "a", "b"), edge("e_bc", "b", "c"), edge("e_ac", "a", "c")],
        combos: Vec::new(),
    };
    let options = tight(100.0, 20.0).with_control_points(true);
    let result = layout_document(&document, &options);

    let long = result.edge(&eid("e_ac")).expect("edge");
    let points = long.control_points.as_ref().expect("control points");
    assert_eq!(points.len(), 1);
    assert_eq!(points[0].y, placed(&result, "b").y);
    assert_eq!(result.edge(&eid("e_ab")).expect("edge").control_points, None);

    let plain = layout_document(&document, &tight(100.0, 20.0));
    assert_eq!(plain.edge(&eid("e_ac")).expect("edge").control_points, None);
}

#[test]
fn cycles_are_laid_out_with_restored_direction() {
    let document = FlowDocument {
        nodes: vec![message("a"), message("b"), message("c")],
        connections: vec![edge("e_ab", "a", "b"), edge("e_bc", "b", "c"), edge("e_ca", "c", "a")],
        combos: Vec::new(),
    };
    let options = tight(100.0, 20.0).with_control_points(true);
    let result = layout_document(&document, &options);

    let ranks = ["a", "b", "c"].map(|id| placed(&result, id).rank);
    assert_eq!(ranks, [0, 1, 2]);

    let back = result.edge(&eid("e_ca")).expect("edge");
    assert_eq!(back.source, nid("c"));
    assert_eq!(back.target, nid("a"));
    assert_eq!(back.control_points.as_ref().map(Vec::len), Some(1));
}

#[test]
fn self_loops_and_unknown_endpoints_do_not_disturb_ranking() {
    let document = FlowDocument {
        nodes: vec![message("a"), message("b")],
        connections: vec![
            edge("e_aa", "a", "a"),
            edge("e_ab", "a", "b"),
            edge("e_ghost", "a", "ghost"),
        ],
        combos: Vec::new(),
    };
    let result = layout_document(&document, &tight(100.0, 20.0).with_control_points(true));

    assert_eq!(placed(&result, "a").rank, 0);
    assert_eq!(placed(&result, "b").rank, 1);
    assert_eq!(result.edges.len(), 2);
    assert_eq!(result.edge(&eid("e_aa")).expect("loop").control_points, None);
    assert!(result.edge(&eid("e_ghost")).is_none());
}

#[test]
fn pull_sources_moves_late_roots_down() {
    let document = FlowDocument {
        nodes: ["a", "b", "c", "d", "x"].into_iter().map(message).collect(),
        connections: vec![
            edge("e_ab", "a", "b"),
            edge("e_bc", "b", "c"),
            edge("e_cd", "c", "d"),
            edge("e_xd", "x", "d"),
        ],
        combos: Vec::new(),
    };

    let longest = layout_document(&document, &tight(100.0, 20.0));
    assert_eq!(placed(&longest, "x").rank, 0);

    let pulled = layout_document(
        &document,
        &tight(100.0, 20.0).with_passthrough("ranker", json!("pull-sources")),
    );
    assert_eq!(placed(&pulled, "x").rank, 2);
    assert_eq!(placed(&pulled, "a").rank, 0);
}

#[test]
fn sort_by_combo_keeps_members_together() {
    let document = fan_out(
        vec![in_combo("a", "g1", Some(1)), message("b"), in_combo("c", "g1", Some(2))],
        vec![Combo::new(cid("g1"))],
    );

    let loose = layout_document(&document, &tight(100.0, 20.0));
    let orders = ["a", "b", "c"].map(|id| placed(&loose, id).order);
    assert_eq!(orders, [0, 1, 2]);

    let grouped = layout_document(&document, &tight(100.0, 20.0).with_sort_by_combo(true));
    let orders = ["a", "c", "b"].map(|id| placed(&grouped, id).order);
    assert_eq!(orders, [0, 1, 2]);

    let combo = grouped.combo(&cid("g1")).expect("combo bounds");
    assert_eq!((combo.x, combo.y, combo.width, combo.height), (100.0, 30.0, 220.0, 40.0));
    assert_eq!(center(&grouped, "root"), (150.0, 10.0));
}

#[test]
fn nested_combos_group_and_enclose_children() {
    let document = fan_out(
        vec![
            in_combo("a", "inner", None),
            message("b"),
            in_combo("c", "outer", None),
            in_combo("d", "inner", None),
        ],
        vec![Combo::new(cid("outer")), Combo::with_parent(cid("inner"), cid("outer"))],
    );
    let result = layout_document(&document, &tight(100.0, 20.0).with_sort_by_combo(true));

    let orders = ["a", "d", "c", "b"].map(|id| placed(&result, id).order);
    assert_eq!(orders, [0, 1, 2, 3]);

    let inner = result.combo(&cid("inner")).expect("inner");
    let outer = result.combo(&cid("outer")).expect("outer");
    assert!(outer.x - outer.width / 2.0 <= inner.x - inner.width / 2.0 - 10.0);
    assert!(outer.x + outer.width / 2.0 >= inner.x + inner.width / 2.0);
    assert!(outer.height >= inner.height + 20.0);
}

#[test]
fn combos_without_members_are_not_laid_out() {
    let document = FlowDocument {
        nodes: vec![message("a")],
        connections: Vec::new(),
        combos: vec![Combo::new(cid("empty"))],
    };
    let result = layout_document(&document, &LayoutOptions::default());
    assert!(result.combos.is_empty());
}

#[test]
fn result_serializes_for_the_editor() {
    let document = FlowDocument {
        nodes: vec![message("a"), message("b"), message("c")],
        connections: vec![edge("e_ab", "a", "b"), edge("e_bc", "b", "c"), edge("e_ac", "a", "c")],
        combos: Vec::new(),
    };
    let result = layout_document(&document, &tight(100.0, 20.0).with_control_points(true));
    let value = serde_json::to_value(&result).expect("json");

    assert_eq!(value["nodes"][0]["id"], "a");
    assert_eq!(value["edges"][2]["controlPoints"][0]["y"], json!(30.0));
    assert!(value["edges"][0].get("controlPoints").is_none());
}
