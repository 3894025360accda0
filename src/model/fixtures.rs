// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Chatflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Chatflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Built-in conversations used by the CLI demo, tests and benches.

use super::document::FlowDocument;
use super::graph::{Combo, FlowEdge, FlowNode};
use super::ids::{ComboId, EdgeId, NodeId};
use super::text::{ListKind, TextAttributes, TextRun};

fn nid(value: &str) -> NodeId {
    NodeId::new(value).expect("static node id")
}

fn eid(value: &str) -> EdgeId {
    EdgeId::new(value).expect("static edge id")
}

fn cid(value: &str) -> ComboId {
    ComboId::new(value).expect("static combo id")
}

fn edge(id: &str, source: &str, target: &str) -> FlowEdge {
    FlowEdge::new(eid(id), nid(source), nid(target))
}

fn message(id: &str, text: &str) -> FlowNode {
    FlowNode::message(nid(id), vec![TextRun::new(text)])
}

fn button(id: &str, text: &str, combo: &str, order: i64) -> FlowNode {
    FlowNode::button(nid(id), vec![TextRun::new(text)], cid(combo), order)
}

/// The onboarding conversation the editor opens with.
///
/// A greeting fans out into four choices, two of which converge; a second choice group
/// hangs below an information message. The second group's declared order differs from
/// its insertion order.
pub fn demo_conversation() -> FlowDocument {
    let greeting = FlowNode::message(
        nid("node_1"),
        vec![
            TextRun::new("Hello James\nI'm the "),
            TextRun::styled("Amplify Bot", TextAttributes::bold()),
            TextRun::new(". I can "),
            TextRun::styled("help", TextAttributes::link("https://google.com/")),
            TextRun::new(" you with "),
            TextRun::styled("questions", TextAttributes::underline()),
            TextRun::new(" about "),
            TextRun::styled("diabetes", TextAttributes::italic()),
            TextRun::new(" and its treatment.\nTesting a longer bullet item, that goes onto two lines."),
            TextRun::styled("\n", TextAttributes::list(ListKind::Bullet)),
            TextRun::new("Numbered List"),
            TextRun::styled("\n", TextAttributes::list(ListKind::Ordered)),
        ],
    );

    FlowDocument {
        nodes: vec![
            greeting,
            button("btn_1", "I need an introduction", "btn_group_1", 1),
            button("btn_2", "Considering treatment", "btn_group_1", 2),
            button("btn_4", "More information", "btn_group_1", 3),
            button("btn_3", "Skip question", "btn_group_1", 4),
            message("node_2", "Let's start let me know if this would be helpful"),
            message("node_3", "Psst, if you don't find this relevant"),
            message("node_4", "Goodbye..."),
            message("node_5-1", "Alright, let me find some information for you."),
            message("node_5", "Here's some more relevant information for you to look at:"),
            button("btn_11", "Efficacy", "btn_group_2", 2),
            button("btn_12", "Patients", "btn_group_2", 1),
            button("btn_13", "Other options", "btn_group_2", 3),
        ],
        connections: vec![
            edge("edge_1", "node_1", "btn_1"),
            edge("edge_2", "node_1", "btn_2"),
            edge("edge_3", "node_1", "btn_3"),
            edge("edge_31", "node_1", "btn_4"),
            edge("edge_4", "btn_1", "node_2"),
            edge("edge_5", "btn_2", "node_3"),
            edge("edge_6", "btn_3", "node_3"),
            edge("edge_7", "node_2", "node_4"),
            edge("edge_8", "node_3", "node_4"),
            edge("edge_9", "btn_4", "node_5-1"),
            edge("edge_10-1", "node_5-1", "node_5"),
            edge("edge_10", "node_5", "btn_11"),
            edge("edge_11", "node_5", "btn_12"),
            edge("edge_12", "node_5", "btn_13"),
        ],
        combos: vec![Combo::new(cid("btn_group_1")), Combo::new(cid("btn_group_2"))],
    }
}

/// `node_1` fans into two choices that both lead to `node_2`.
pub fn converging_choices() -> FlowDocument {
    FlowDocument {
        nodes: vec![
            message("node_1", "Pick one"),
            button("btn_1", "Left", "btn_group_1", 1),
            button("btn_2", "Right", "btn_group_1", 2),
            message("node_2", "Done"),
        ],
        connections: vec![
            edge("edge_1", "node_1", "btn_1"),
            edge("edge_2", "node_1", "btn_2"),
            edge("edge_3", "btn_1", "node_2"),
            edge("edge_4", "btn_2", "node_2"),
        ],
        combos: vec![Combo::new(cid("btn_group_1"))],
    }
}

/// A straight message chain `a -> b -> c`.
pub fn message_chain() -> FlowDocument {
    FlowDocument {
        nodes: vec![message("a", "A"), message("b", "B"), message("c", "C")],
        connections: vec![edge("e_ab", "a", "b"), edge("e_bc", "b", "c")],
        combos: Vec::new(),
    }
}
