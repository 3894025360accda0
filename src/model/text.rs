// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Chatflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Chatflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Rich text as exchanged with the text-editing widget.
//!
//! A node's text is a run-list: an ordered sequence of inserts, each optionally carrying
//! inline attributes. The store keeps runs verbatim; only sizing looks at the plain text.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRun {
    insert: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    attributes: Option<TextAttributes>,
}

impl TextRun {
    pub fn new(insert: impl Into<String>) -> Self {
        Self { insert: insert.into(), attributes: None }
    }

    pub fn styled(insert: impl Into<String>, attributes: TextAttributes) -> Self {
        Self { insert: insert.into(), attributes: Some(attributes) }
    }

    pub fn insert(&self) -> &str {
        &self.insert
    }

    pub fn attributes(&self) -> Option<&TextAttributes> {
        self.attributes.as_ref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list: Option<ListKind>,
}

impl TextAttributes {
    pub fn bold() -> Self {
        Self { bold: Some(true), ..Self::default() }
    }

    pub fn italic() -> Self {
        Self { italic: Some(true), ..Self::default() }
    }

    pub fn underline() -> Self {
        Self { underline: Some(true), ..Self::default() }
    }

    pub fn link(href: impl Into<String>) -> Self {
        Self { link: Some(href.into()), ..Self::default() }
    }

    pub fn list(kind: ListKind) -> Self {
        Self { list: Some(kind), ..Self::default() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    Ordered,
    Bullet,
}

/// Concatenates the inserts of a run-list.
pub fn plain_text(runs: &[TextRun]) -> String {
    let mut out = String::with_capacity(runs.iter().map(|run| run.insert.len()).sum());
    for run in runs {
        out.push_str(&run.insert);
    }
    out
}
