//! Graph-to-steps translation.
//!
//! The editor canvas is loaded into a directed graph (petgraph) and walked
//! from the unique start node. Only straight chains are accepted: a node
//! with two successors or a walk that revisits a node is rejected.

use std::collections::{HashMap, HashSet};

use petgraph::{
    Direction,
    graph::{DiGraph, NodeIndex},
    visit::EdgeRef,
};
use tracing::debug;

use crate::{
    KisanflowError, Result,
    model::{EdgeModel, GraphModel, NodeModel, WorkflowStep},
};

/// Directed view of an editor canvas.
pub struct WorkflowGraph {
    graph: DiGraph<NodeModel, EdgeModel>,
}

impl WorkflowGraph {
    /// Output a human-readable representation of the graph
    pub fn describe(&self) -> String {
        let mut lines = Vec::new();
        lines.push(format!("Nodes: {}, Edges: {}", self.graph.node_count(), self.graph.edge_count()));

        for idx in self.graph.node_indices() {
            let node = &self.graph[idx];
            let outgoing: Vec<&str> = self.graph.edges_directed(idx, Direction::Outgoing).map(|e| self.graph[e.target()].id.as_str()).collect();
            let kind = node.data.step.as_ref().map(|s| s.kind().to_string()).unwrap_or_else(|| node.node_type.as_ref().to_string());

            if outgoing.is_empty() {
                lines.push(format!("{}({}) -> (end)", node.id, kind));
            } else {
                lines.push(format!("{}({}) -> {}", node.id, kind, outgoing.join(", ")));
            }
        }

        lines.join("\n")
    }

    /// The unique start node.
    pub fn start_node(&self) -> Result<NodeIndex> {
        let mut starts = self.graph.node_indices().filter(|idx| self.graph[*idx].is_start());

        let start = starts.next().ok_or(KisanflowError::NotFound("No start node found".to_string()))?;
        if let Some(extra) = starts.next() {
            return Err(KisanflowError::Validation(format!(
                "workflow has more than one start node ({} and {})",
                self.graph[start].id, self.graph[extra].id
            )));
        }
        Ok(start)
    }

    /// Walks the chain from the start node and collects its steps in order.
    pub fn linearize(&self) -> Result<Vec<WorkflowStep>> {
        let start = self.start_node()?;
        debug!("linearize graph\n{}", self.describe());

        let mut steps = Vec::new();
        let mut visited = HashSet::from([start]);
        let mut current = start;

        loop {
            let mut outgoing = self.graph.edges_directed(current, Direction::Outgoing);
            let Some(edge) = outgoing.next() else {
                break;
            };
            if outgoing.next().is_some() {
                return Err(KisanflowError::Validation(format!(
                    "node {} branches, workflows must be a single chain",
                    self.graph[current].id
                )));
            }

            let next = edge.target();
            if !visited.insert(next) {
                return Err(KisanflowError::Validation(format!("workflow loops back to node {}", self.graph[next].id)));
            }

            let node = &self.graph[next];
            let step = node.data.step.clone().ok_or(KisanflowError::Validation(format!("node {} has no action", node.id)))?;
            steps.push(step);
            current = next;
        }

        let unreachable = self.graph.node_count() - visited.len();
        if unreachable > 0 {
            debug!("{} node(s) not connected to the start node were ignored", unreachable);
        }

        Ok(steps)
    }
}

impl TryFrom<&GraphModel> for WorkflowGraph {
    type Error = KisanflowError;

    fn try_from(model: &GraphModel) -> Result<Self> {
        let mut graph: DiGraph<NodeModel, EdgeModel> = DiGraph::new();

        let mut nodes = HashMap::new();

        for node in model.nodes.iter() {
            let nid = node.id.clone();
            let node_idx = graph.add_node(node.clone());
            if nodes.insert(nid, node_idx).is_some() {
                return Err(KisanflowError::Validation(format!("duplicate node id {}", node.id)));
            }
        }
        for edge in model.edges.iter() {
            let source = nodes.get(&edge.source).ok_or(KisanflowError::Validation(format!("source node {} not found", edge.source)))?;
            let target = nodes.get(&edge.target).ok_or(KisanflowError::Validation(format!("target node {} not found", edge.target)))?;
            graph.add_edge(*source, *target, edge.clone());
        }
        Ok(Self {
            graph,
        })
    }
}
