//! Editor-side graph shapes: `{id, type, data, position}` nodes and
//! `{id, source, target}` edges.

use serde::{Deserialize, Serialize};

use crate::{KisanflowError, Result, model::WorkflowStep};

/// Node id inside the editor graph.
pub type NodeId = String;
/// Edge id inside the editor graph.
pub type EdgeId = String;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, strum::AsRefStr, strum::EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NodeType {
    /// The start node; a graph needs exactly one to produce steps.
    Input,
    #[default]
    Action,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(
        x: f64,
        y: f64,
    ) -> Self {
        Self {
            x,
            y,
        }
    }
}

/// Node payload: a label plus, for action nodes, the flattened step fields.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeData {
    pub label: String,
    #[serde(flatten)]
    pub step: Option<WorkflowStep>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NodeModel {
    pub id: NodeId,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub data: NodeData,
    #[serde(default)]
    pub position: Position,
}

impl NodeModel {
    pub fn is_start(&self) -> bool {
        self.node_type == NodeType::Input
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeModel {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
}

impl EdgeModel {
    pub fn between(
        source: &str,
        target: &str,
    ) -> Self {
        Self {
            id: format!("e{}-{}", source, target),
            source: source.to_string(),
            target: target.to_string(),
        }
    }
}

/// Snapshot of the editor canvas.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct GraphModel {
    pub nodes: Vec<NodeModel>,
    pub edges: Vec<EdgeModel>,
}

impl GraphModel {
    pub fn from_json(s: &str) -> Result<Self> {
        serde_json::from_str::<GraphModel>(s).map_err(|e| KisanflowError::Convert(format!("{}", e)))
    }
}
