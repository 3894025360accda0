// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Chatflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Chatflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{FlowNode, Size};

pub const DEFAULT_SEPARATION: f64 = 50.0;
pub const DEFAULT_EDGESEP: f64 = 10.0;
pub const DEFAULT_COMBO_PADDING: f64 = 10.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RankDir {
    #[default]
    TB,
    BT,
    LR,
    RL,
}

impl RankDir {
    /// Whether ranks run along the x axis.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::LR | Self::RL)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Ranker {
    #[default]
    LongestPath,
    /// Longest path, then each source moves next to its nearest successor.
    PullSources,
}

/// Spacing around a node, either uniform or computed per node.
#[derive(Clone)]
pub enum Separation {
    Fixed(f64),
    PerNode(Arc<dyn Fn(&FlowNode) -> f64 + Send + Sync>),
}

impl Separation {
    pub fn per_node(func: impl Fn(&FlowNode) -> f64 + Send + Sync + 'static) -> Self {
        Self::PerNode(Arc::new(func))
    }

    pub fn resolve(&self, node: &FlowNode) -> f64 {
        match self {
            Self::Fixed(value) => *value,
            Self::PerNode(func) => func(node),
        }
    }
}

impl Default for Separation {
    fn default() -> Self {
        Self::Fixed(DEFAULT_SEPARATION)
    }
}

impl fmt::Debug for Separation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(value) => f.debug_tuple("Fixed").field(value).finish(),
            Self::PerNode(_) => f.write_str("PerNode(..)"),
        }
    }
}

/// How big a node is before separation padding.
#[derive(Clone, Default)]
pub enum NodeSize {
    /// The card size the node kind reports for its text.
    #[default]
    Card,
    Fixed(Size),
    PerNode(Arc<dyn Fn(&FlowNode) -> Size + Send + Sync>),
}

impl NodeSize {
    pub fn per_node(func: impl Fn(&FlowNode) -> Size + Send + Sync + 'static) -> Self {
        Self::PerNode(Arc::new(func))
    }

    pub fn resolve(&self, node: &FlowNode) -> Size {
        match self {
            Self::Card => node.kind().capabilities().card_size(node.text()),
            Self::Fixed(size) => *size,
            Self::PerNode(func) => func(node),
        }
    }
}

impl fmt::Debug for NodeSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Card => f.write_str("Card"),
            Self::Fixed(size) => f.debug_tuple("Fixed").field(size).finish(),
            Self::PerNode(_) => f.write_str("PerNode(..)"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid layout config json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("layout option `{key}` {reason}")]
    InvalidValue { key: String, reason: &'static str },
}

/// Layout settings as they arrive from the editor (JSON, camelCase).
///
/// Keys without a dedicated field are kept verbatim in `passthrough`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rankdir: Option<RankDir>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nodesep: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ranksep: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_size: Option<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by_combo: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_points: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub combo_padding: Option<f64>,
    #[serde(flatten)]
    pub passthrough: BTreeMap<String, Value>,
}

impl LayoutConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Debug, Clone)]
pub struct LayoutOptions {
    pub rankdir: RankDir,
    pub nodesep: Separation,
    pub ranksep: Separation,
    pub node_size: NodeSize,
    /// Keep members of a combo next to each other within a rank.
    pub sort_by_combo: bool,
    /// Report bend points for edges that span more than one rank.
    pub control_points: bool,
    pub combo_padding: f64,
    pub passthrough: BTreeMap<String, Value>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            rankdir: RankDir::default(),
            nodesep: Separation::default(),
            ranksep: Separation::default(),
            node_size: NodeSize::default(),
            sort_by_combo: false,
            control_points: false,
            combo_padding: DEFAULT_COMBO_PADDING,
            passthrough: BTreeMap::new(),
        }
    }
}

const PASSTHROUGH_KEYS: &[&str] = &["ranker", "edgesep", "marginx", "marginy"];

impl LayoutOptions {
    pub fn from_config(config: LayoutConfig) -> Result<Self, ConfigError> {
        let LayoutConfig {
            rankdir,
            nodesep,
            ranksep,
            node_size,
            sort_by_combo,
            control_points,
            combo_padding,
            passthrough,
        } = config;

        let mut options = Self::default();
        if let Some(rankdir) = rankdir {
            options.rankdir = rankdir;
        }
        if let Some(nodesep) = nodesep {
            options.nodesep = Separation::Fixed(non_negative("nodesep", nodesep)?);
        }
        if let Some(ranksep) = ranksep {
            options.ranksep = Separation::Fixed(non_negative("ranksep", ranksep)?);
        }
        if let Some([width, height]) = node_size {
            options.node_size = NodeSize::Fixed(Size::new(
                non_negative("nodeSize", width)?,
                non_negative("nodeSize", height)?,
            ));
        }
        if let Some(sort_by_combo) = sort_by_combo {
            options.sort_by_combo = sort_by_combo;
        }
        if let Some(control_points) = control_points {
            options.control_points = control_points;
        }
        if let Some(padding) = combo_padding {
            options.combo_padding = non_negative("comboPadding", padding)?;
        }

        for key in passthrough.keys() {
            if !PASSTHROUGH_KEYS.contains(&key.as_str()) {
                debug!(key = key.as_str(); "ignoring unknown layout option");
            }
        }
        options.passthrough = passthrough;
        options.validate_passthrough()?;
        Ok(options)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Self::from_config(LayoutConfig::from_json(json)?)
    }

    pub fn with_rankdir(mut self, rankdir: RankDir) -> Self {
        self.rankdir = rankdir;
        self
    }

    pub fn with_nodesep(mut self, nodesep: Separation) -> Self {
        self.nodesep = nodesep;
        self
    }

    pub fn with_ranksep(mut self, ranksep: Separation) -> Self {
        self.ranksep = ranksep;
        self
    }

    pub fn with_node_size(mut self, node_size: NodeSize) -> Self {
        self.node_size = node_size;
        self
    }

    pub fn with_sort_by_combo(mut self, sort_by_combo: bool) -> Self {
        self.sort_by_combo = sort_by_combo;
        self
    }

    pub fn with_control_points(mut self, control_points: bool) -> Self {
        self.control_points = control_points;
        self
    }

    pub fn with_passthrough(mut self, key: impl Into<String>, value: Value) -> Self {
        self.passthrough.insert(key.into(), value);
        self
    }

    pub fn ranker(&self) -> Ranker {
        match self.passthrough.get("ranker").and_then(Value::as_str) {
            Some("pull-sources") => Ranker::PullSources,
            _ => Ranker::LongestPath,
        }
    }

    pub fn edgesep(&self) -> f64 {
        self.passthrough_number("edgesep").unwrap_or(DEFAULT_EDGESEP)
    }

    pub fn marginx(&self) -> f64 {
        self.passthrough_number("marginx").unwrap_or(0.0)
    }

    pub fn marginy(&self) -> f64 {
        self.passthrough_number("marginy").unwrap_or(0.0)
    }

    fn passthrough_number(&self, key: &str) -> Option<f64> {
        self.passthrough
            .get(key)
            .and_then(Value::as_f64)
            .filter(|value| value.is_finite() && *value >= 0.0)
    }

    fn validate_passthrough(&self) -> Result<(), ConfigError> {
        if let Some(ranker) = self.passthrough.get("ranker") {
            match ranker.as_str() {
                Some("longest-path") | Some("pull-sources") => {}
                // Ranker names of other layered engines fall back to longest path.
                Some(other) => debug!(ranker = other; "unsupported ranker, using longest-path"),
                None => {
                    return Err(ConfigError::InvalidValue {
                        key: "ranker".to_owned(),
                        reason: "must be a string",
                    })
                }
            }
        }
        for key in ["edgesep", "marginx", "marginy"] {
            if let Some(value) = self.passthrough.get(key) {
                let Some(number) = value.as_f64() else {
                    return Err(ConfigError::InvalidValue {
                        key: key.to_owned(),
                        reason: "must be a number",
                    });
                };
                non_negative(key, number)?;
            }
        }
        Ok(())
    }
}

fn non_negative(key: &str, value: f64) -> Result<f64, ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::InvalidValue {
            key: key.to_owned(),
            reason: "must be a finite, non-negative number",
        });
    }
    Ok(value)
}
