// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Chatflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Chatflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Node kinds and the capabilities each kind contributes to rendering and sizing.

use serde::{Deserialize, Serialize};

use super::text::{plain_text, TextRun};

pub const CARD_WIDTH: f64 = 264.0;
pub const CARD_PADDING: f64 = 16.0;
pub const CARD_HEADER_HEIGHT: f64 = 16.0 + 8.0;
pub const CARD_LINE_HEIGHT: f64 = 15.0;
pub const CARD_TEXT_WIDTH: f64 = 232.0;

// Average advance of the 13px card font; good enough for wrapping estimates.
const AVERAGE_GLYPH_WIDTH: f64 = 6.5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    #[default]
    #[serde(rename = "amplify-message")]
    Message,
    #[serde(rename = "amplify-button")]
    Button,
}

impl NodeKind {
    pub fn is_choice(self) -> bool {
        matches!(self, Self::Button)
    }

    pub fn capabilities(self) -> &'static dyn NodeCapabilities {
        match self {
            Self::Message => &MessageCard,
            Self::Button => &ButtonCard,
        }
    }
}

/// Extra handles drawn around a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decoration {
    /// Round "+" below the card that appends a follow-up message.
    AddMessage,
    /// "+" on the card's right edge that appends a sibling choice to the combo.
    AddSiblingChoice,
    /// Trash icon in the top-right corner that deletes the card.
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Behavior shared by every card kind. Button cards extend message cards, so the
/// defaults here describe a message and `ButtonCard` overrides what differs.
pub trait NodeCapabilities: Sync {
    fn headline(&self) -> &'static str {
        "Message"
    }

    fn placeholder(&self) -> &'static str {
        "Write the message here"
    }

    fn decorations(&self) -> &'static [Decoration] {
        &[Decoration::AddMessage, Decoration::Delete]
    }

    /// Stroke of edges leaving a card of this kind.
    fn edge_stroke(&self, faded: bool) -> &'static str {
        if faded {
            "#D1D0CE"
        } else {
            "#6A6765"
        }
    }

    /// Estimated card size for the given text, placeholder included when empty.
    fn card_size(&self, text: &[TextRun]) -> Size {
        let content = plain_text(text);
        let content = if content.trim().is_empty() {
            self.placeholder().to_owned()
        } else {
            content
        };
        let lines = wrapped_line_count(&content, CARD_TEXT_WIDTH);
        Size::new(
            CARD_WIDTH,
            lines as f64 * CARD_LINE_HEIGHT + CARD_PADDING * 2.0 + CARD_HEADER_HEIGHT,
        )
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MessageCard;

impl NodeCapabilities for MessageCard {}

#[derive(Debug, Clone, Copy)]
pub struct ButtonCard;

impl NodeCapabilities for ButtonCard {
    fn headline(&self) -> &'static str {
        "Button"
    }

    fn placeholder(&self) -> &'static str {
        "Write the button label here"
    }

    fn decorations(&self) -> &'static [Decoration] {
        &[Decoration::AddMessage, Decoration::AddSiblingChoice, Decoration::Delete]
    }

    fn edge_stroke(&self, faded: bool) -> &'static str {
        if faded {
            "#EDB9CD"
        } else {
            "#CE1261"
        }
    }
}

/// Greedy word wrap; words wider than a line are broken by glyph.
fn wrapped_line_count(text: &str, max_width: f64) -> usize {
    let max_chars = ((max_width / AVERAGE_GLYPH_WIDTH).floor() as usize).max(1);
    let trimmed = text.strip_suffix('\n').unwrap_or(text);

    let mut total = 0usize;
    for line in trimmed.split('\n') {
        let mut lines = 1usize;
        let mut current = 0usize;
        for word in line.split(' ') {
            let len = word.chars().count();
            let needed = if current == 0 { len } else { current + 1 + len };
            if needed <= max_chars {
                current = needed;
                continue;
            }
            if current > 0 {
                lines += 1;
            }
            if len > max_chars {
                lines += (len - 1) / max_chars;
                current = len - (len - 1) / max_chars * max_chars;
            } else {
                current = len;
            }
        }
        total += lines;
    }
    total
}
