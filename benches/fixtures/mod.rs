// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Chatflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Chatflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Deterministic conversation fixtures (no RNG).

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use chatflow::layout::LayoutResult;
use chatflow::model::{Combo, ComboId, EdgeId, FlowDocument, FlowEdge, FlowNode, NodeId, TextRun};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

pub struct TempDir {
    path: PathBuf,
}

impl TempDir {
    pub fn new(prefix: &str) -> Self {
        let pid = std::process::id();
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos();
        let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);

        let mut path = std::env::temp_dir();
        path.push(format!("chatflow_bench_{prefix}_{pid}_{nanos}_{counter}"));
        std::fs::create_dir_all(&path).expect("create temp dir");

        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    Small,
    Medium,
    Large,
}

#[derive(Debug, Clone, Copy)]
pub struct ConversationParams {
    pub messages: usize,
    pub choices: usize,
    /// Every n-th choice leads back into the previous answer instead of a new message.
    pub merge_every: usize,
    /// Every n-th choice also jumps back to the opening message, closing a cycle.
    pub restart_every: usize,
}

pub fn params(case: Case) -> ConversationParams {
    match case {
        Case::Small => ConversationParams {
            messages: 40,
            choices: 2,
            merge_every: 5,
            restart_every: 0,
        },
        Case::Medium => ConversationParams {
            messages: 400,
            choices: 3,
            merge_every: 4,
            restart_every: 97,
        },
        Case::Large => ConversationParams {
            messages: 2_000,
            choices: 3,
            merge_every: 4,
            restart_every: 211,
        },
    }
}

pub fn fixture(case: Case) -> FlowDocument {
    conversation(params(case))
}

fn nid(value: String) -> NodeId {
    NodeId::new(value).expect("generated node id")
}

fn text(value: String) -> Vec<TextRun> {
    vec![TextRun::new(value)]
}

/// Breadth-first conversation: each message offers `choices` buttons in its own combo,
/// each button answers with a new message until `messages` exist.
pub fn conversation(params: ConversationParams) -> FlowDocument {
    let mut document = FlowDocument::default();
    let mut edge_count = 0usize;
    let mut push_edge = |document: &mut FlowDocument, source: &NodeId, target: &NodeId| {
        let id = EdgeId::new(format!("edge_{edge_count}")).expect("generated edge id");
        edge_count += 1;
        document.connections.push(FlowEdge::new(id, source.clone(), target.clone()));
    };

    let root = nid("msg_0".to_owned());
    document.nodes.push(FlowNode::message(
        root.clone(),
        text("Welcome, how can we help?".to_owned()),
    ));
    let mut created = 1usize;
    let mut buttons = 0usize;
    let mut last_answer: Option<NodeId> = None;
    let mut frontier = VecDeque::from([root.clone()]);

    while let Some(message) = frontier.pop_front() {
        if created >= params.messages {
            break;
        }
        let combo_id = ComboId::new(format!("combo_{message}")).expect("generated combo id");
        document.combos.push(Combo::new(combo_id.clone()));

        for choice in 0..params.choices {
            let button = nid(format!("btn_{buttons}"));
            buttons += 1;
            document.nodes.push(FlowNode::button(
                button.clone(),
                text(format!("Option {} for {message}", choice + 1)),
                combo_id.clone(),
                choice as i64 + 1,
            ));
            push_edge(&mut document, &message, &button);

            let merge = params.merge_every > 0 && buttons % params.merge_every == 0;
            let merge_into = if merge { last_answer.clone() } else { None };
            match merge_into {
                Some(answer) => push_edge(&mut document, &button, &answer),
                None => {
                    let answer = nid(format!("msg_{created}"));
                    created += 1;
                    document.nodes.push(FlowNode::message(
                        answer.clone(),
                        text(format!("Answer {created}: thanks for choosing, here is more.")),
                    ));
                    push_edge(&mut document, &button, &answer);
                    frontier.push_back(answer.clone());
                    last_answer = Some(answer);
                }
            }

            if params.restart_every > 0 && buttons % params.restart_every == 0 {
                push_edge(&mut document, &button, &root);
            }
        }
    }

    document
}

pub fn checksum_layout(result: &LayoutResult) -> u64 {
    let mut acc = 0u64;
    for node in &result.nodes {
        acc = acc.wrapping_mul(131).wrapping_add(node.x.to_bits());
        acc = acc.wrapping_mul(131).wrapping_add(node.y.to_bits());
        acc = acc.wrapping_mul(131).wrapping_add(node.order as u64);
    }
    for edge in &result.edges {
        let points = edge.control_points.as_ref().map_or(0, Vec::len);
        acc = acc.wrapping_mul(131).wrapping_add(points as u64);
    }
    for combo in &result.combos {
        acc = acc.wrapping_mul(131).wrapping_add(combo.width.to_bits());
    }
    acc
}
