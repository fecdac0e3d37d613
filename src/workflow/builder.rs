//! Editor state of the workflow builder.
//!
//! [`WorkflowBuilder`] owns the canvas (nodes, edges) and the counter that
//! hands out node ids. Edits keep the canvas a single chain hanging off the
//! start node, so every saved workflow is a plain ordered step list.

use strum::IntoEnumIterator;
use tracing::debug;

use crate::{
    KisanflowError, Result,
    model::{ActionKind, EdgeId, EdgeModel, GraphModel, NodeData, NodeId, NodeModel, NodeType, Position, WorkflowModel, WorkflowStep},
    schema::PageSchema,
    workflow::{
        form::NodeForm,
        graph::WorkflowGraph,
        validate::{NodeIssue, validate_step},
    },
};

/// Id of the start node on every canvas.
pub const START_NODE_ID: &str = "1";
const START_LABEL: &str = "Start";
const START_POSITION: Position = Position {
    x: 250.0,
    y: 5.0,
};
/// Vertical gap between nodes added from the palette.
const NODE_SPACING: f64 = 100.0;

#[derive(Debug, Clone)]
pub struct WorkflowBuilder {
    nodes: Vec<NodeModel>,
    edges: Vec<EdgeModel>,
    next_id: u64,
}

impl Default for WorkflowBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkflowBuilder {
    /// An empty canvas holding only the start node.
    pub fn new() -> Self {
        Self {
            nodes: vec![Self::start_node()],
            edges: Vec::new(),
            next_id: 2,
        }
    }

    fn start_node() -> NodeModel {
        NodeModel {
            id: START_NODE_ID.to_string(),
            node_type: NodeType::Input,
            data: NodeData {
                label: START_LABEL.to_string(),
                step: None,
            },
            position: START_POSITION,
        }
    }

    /// Projects a saved workflow back onto a canvas.
    ///
    /// Step `i` becomes node `i + 2` chained after node `i + 1`, so the
    /// first step hangs off the start node.
    pub fn load(workflow: &WorkflowModel) -> Self {
        let mut nodes = vec![Self::start_node()];
        let mut edges = Vec::new();

        for (index, step) in workflow.steps.iter().enumerate() {
            let id = (index + 2).to_string();
            let offset = NODE_SPACING * index as f64;
            nodes.push(NodeModel {
                id: id.clone(),
                node_type: NodeType::Action,
                data: NodeData {
                    label: format!("{} Node", step.kind()),
                    step: Some(step.clone()),
                },
                position: Position::new(offset, offset),
            });
            edges.push(EdgeModel::between(&(index + 1).to_string(), &id));
        }

        Self {
            next_id: workflow.steps.len() as u64 + 2,
            nodes,
            edges,
        }
    }

    /// Restores a canvas snapshot; ids keep counting after the largest numeric id.
    pub fn from_graph(graph: GraphModel) -> Self {
        let next_id = graph.nodes.iter().filter_map(|n| n.id.parse::<u64>().ok()).max().map_or(2, |max| max + 1);
        Self {
            nodes: graph.nodes,
            edges: graph.edges,
            next_id,
        }
    }

    /// Palette entries in display order.
    pub fn palette() -> Vec<(ActionKind, &'static str)> {
        ActionKind::iter().map(|kind| (kind, kind.label())).collect()
    }

    pub fn nodes(&self) -> &[NodeModel] {
        &self.nodes
    }

    pub fn edges(&self) -> &[EdgeModel] {
        &self.edges
    }

    pub fn node(
        &self,
        id: &str,
    ) -> Option<&NodeModel> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Snapshot of the canvas.
    pub fn graph(&self) -> GraphModel {
        GraphModel {
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
        }
    }

    fn allocate_id(&mut self) -> NodeId {
        let id = self.next_id;
        self.next_id += 1;
        id.to_string()
    }

    /// Drops an empty action node of `kind` onto the canvas.
    pub fn add_node(
        &mut self,
        kind: ActionKind,
    ) -> NodeId {
        let position = Position::new(START_POSITION.x, START_POSITION.y + NODE_SPACING * self.nodes.len() as f64);
        self.add_node_at(kind, position)
    }

    pub fn add_node_at(
        &mut self,
        kind: ActionKind,
        position: Position,
    ) -> NodeId {
        let id = self.allocate_id();
        self.nodes.push(NodeModel {
            id: id.clone(),
            node_type: NodeType::Action,
            data: NodeData {
                label: format!("{} Node", kind.label()),
                step: Some(kind.empty_step()),
            },
            position,
        });
        debug!("builder: added {} node {}", kind, id);
        id
    }

    /// Removes an action node and every edge touching it.
    pub fn remove_node(
        &mut self,
        id: &str,
    ) -> Result<()> {
        let node = self.node(id).ok_or_else(|| not_found(id))?;
        if node.is_start() {
            return Err(KisanflowError::Validation("the start node cannot be removed".to_string()));
        }

        self.nodes.retain(|n| n.id != id);
        self.edges.retain(|e| e.source != id && e.target != id);
        Ok(())
    }

    /// Connects `source` → `target`, keeping the canvas a single chain.
    pub fn connect(
        &mut self,
        source: &str,
        target: &str,
    ) -> Result<EdgeId> {
        self.node(source).ok_or_else(|| not_found(source))?;
        let target_node = self.node(target).ok_or_else(|| not_found(target))?;

        if source == target {
            return Err(KisanflowError::Validation(format!("node {} cannot connect to itself", source)));
        }
        if target_node.is_start() {
            return Err(KisanflowError::Validation("nothing can connect into the start node".to_string()));
        }
        if self.edges.iter().any(|e| e.source == source) {
            return Err(KisanflowError::Validation(format!("node {} already has a next step", source)));
        }
        if self.edges.iter().any(|e| e.target == target) {
            return Err(KisanflowError::Validation(format!("node {} already has a previous step", target)));
        }
        if self.chain_from(target).any(|id| id == source) {
            return Err(KisanflowError::Validation(format!("connecting {} to {} would form a loop", source, target)));
        }

        let edge = EdgeModel::between(source, target);
        let id = edge.id.clone();
        self.edges.push(edge);
        Ok(id)
    }

    pub fn disconnect(
        &mut self,
        edge_id: &str,
    ) -> Result<()> {
        let before = self.edges.len();
        self.edges.retain(|e| e.id != edge_id);
        if self.edges.len() == before {
            return Err(KisanflowError::NotFound(format!("edge {} not found", edge_id)));
        }
        Ok(())
    }

    /// Node ids reached by following out-edges from `id` (exclusive).
    fn chain_from<'a>(
        &'a self,
        id: &'a str,
    ) -> impl Iterator<Item = &'a str> + 'a {
        let mut current = id;
        let mut steps = 0;
        std::iter::from_fn(move || {
            // bounded by the edge count so a hand-built cycle cannot spin forever
            if steps > self.edges.len() {
                return None;
            }
            steps += 1;
            let next = self.edges.iter().find(|e| e.source == current)?;
            current = next.target.as_str();
            Some(current)
        })
    }

    fn action_step_mut(
        &mut self,
        id: &str,
    ) -> Result<&mut WorkflowStep> {
        let node = self.nodes.iter_mut().find(|n| n.id == id).ok_or_else(|| not_found(id))?;
        node.data.step.as_mut().ok_or_else(|| KisanflowError::Validation(format!("node {} is not an action node", id)))
    }

    /// Replaces the step carried by an action node.
    pub fn update_step(
        &mut self,
        id: &str,
        step: WorkflowStep,
    ) -> Result<()> {
        *self.action_step_mut(id)? = step;
        Ok(())
    }

    /// Applies one form edit to an action node.
    pub fn set_field(
        &mut self,
        id: &str,
        name: &str,
        value: &str,
    ) -> Result<()> {
        self.action_step_mut(id)?.set_field(name, value)
    }

    /// Form description of an action node for the page the editor is on.
    pub fn form(
        &self,
        id: &str,
        schema: &PageSchema,
        page: &str,
    ) -> Result<NodeForm> {
        let node = self.node(id).ok_or_else(|| not_found(id))?;
        let step = node.data.step.as_ref().ok_or_else(|| KisanflowError::Validation(format!("node {} is not an action node", id)))?;
        Ok(NodeForm::render(node, step, schema, page))
    }

    /// Inline issues for every action node; never blocks saving.
    pub fn issues(&self) -> Vec<NodeIssue> {
        self.nodes
            .iter()
            .filter_map(|node| {
                let message = validate_step(node.data.step.as_ref()?)?;
                Some(NodeIssue {
                    node_id: node.id.clone(),
                    message: message.to_string(),
                })
            })
            .collect()
    }

    /// Ordered steps along the chain from the start node.
    pub fn to_steps(&self) -> Result<Vec<WorkflowStep>> {
        WorkflowGraph::try_from(&self.graph())?.linearize()
    }

    /// Builds the workflow record saved under `intent`.
    ///
    /// An empty `translated_input` falls back to the intent itself.
    pub fn build(
        &self,
        intent: &str,
        language: &str,
        translated_input: &str,
    ) -> Result<WorkflowModel> {
        let intent = intent.trim();
        if intent.is_empty() {
            return Err(KisanflowError::Validation("Please enter a workflow name".to_string()));
        }

        let mut workflow = WorkflowModel::new(intent, self.to_steps()?);
        if !language.is_empty() {
            workflow.language = language.to_string();
        }
        if !translated_input.trim().is_empty() {
            workflow.translated_input = translated_input.to_string();
        }
        Ok(workflow)
    }
}

fn not_found(id: &str) -> KisanflowError {
    KisanflowError::NotFound(format!("node {} not found", id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_workflow() -> WorkflowModel {
        WorkflowModel::new(
            "register farm",
            vec![
                WorkflowStep::Navigate {
                    target: "/dashboard".to_string(),
                    speak: None,
                },
                WorkflowStep::Fill {
                    field: "farmSize".to_string(),
                    value: "5".to_string(),
                },
            ],
        )
    }

    #[test]
    fn test_new_has_only_start_node() {
        let builder = WorkflowBuilder::new();
        assert_eq!(builder.nodes().len(), 1);
        assert!(builder.nodes()[0].is_start());
        assert_eq!(builder.nodes()[0].id, START_NODE_ID);
        assert!(builder.edges().is_empty());
        assert!(builder.to_steps().unwrap().is_empty());
    }

    #[test]
    fn test_load_reconstructs_chain() {
        let workflow = sample_workflow();
        let builder = WorkflowBuilder::load(&workflow);

        assert_eq!(builder.nodes().len(), 3);
        assert!(builder.nodes()[0].is_start());
        let action_nodes: Vec<&NodeModel> = builder.nodes().iter().filter(|n| !n.is_start()).collect();
        assert_eq!(action_nodes.len(), 2);
        assert_eq!(action_nodes[0].data.step.as_ref(), Some(&workflow.steps[0]));
        assert_eq!(action_nodes[1].data.step.as_ref(), Some(&workflow.steps[1]));
        assert_eq!(action_nodes[0].data.label, "navigate Node");

        assert_eq!(builder.edges(), &[EdgeModel::between("1", "2"), EdgeModel::between("2", "3")]);
        assert_eq!(builder.to_steps().unwrap(), workflow.steps);
    }

    #[test]
    fn test_load_node_data_carries_step_fields() {
        let builder = WorkflowBuilder::load(&sample_workflow());
        let data = serde_json::to_value(&builder.node("3").unwrap().data).unwrap();
        assert_eq!(data, serde_json::json!({"label": "fill Node", "action": "fill", "field": "farmSize", "value": "5"}));
    }

    #[test]
    fn test_ids_continue_after_load() {
        let mut builder = WorkflowBuilder::load(&sample_workflow());
        assert_eq!(builder.add_node(ActionKind::Click), "4");
        assert_eq!(builder.add_node(ActionKind::Loop), "5");
    }

    #[test]
    fn test_build_chain_from_palette() {
        let mut builder = WorkflowBuilder::new();
        let nav = builder.add_node(ActionKind::Navigate);
        let click = builder.add_node(ActionKind::Click);
        builder.set_field(&nav, "target", "/cold-storage").unwrap();
        builder.set_field(&click, "target", "submitButton").unwrap();
        builder.connect(START_NODE_ID, &nav).unwrap();
        builder.connect(&nav, &click).unwrap();

        let workflow = builder.build("book storage", "English", "").unwrap();
        assert_eq!(workflow.intent, "book storage");
        assert_eq!(workflow.translated_input, "book storage");
        assert_eq!(workflow.language, "English");
        assert_eq!(
            workflow.steps,
            vec![
                WorkflowStep::Navigate {
                    target: "/cold-storage".to_string(),
                    speak: None
                },
                WorkflowStep::Click {
                    target: "submitButton".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_connect_keeps_single_chain() {
        let mut builder = WorkflowBuilder::new();
        let a = builder.add_node(ActionKind::Navigate);
        let b = builder.add_node(ActionKind::Click);
        let c = builder.add_node(ActionKind::If);
        builder.connect(START_NODE_ID, &a).unwrap();
        builder.connect(&a, &b).unwrap();

        // second successor
        assert!(builder.connect(&a, &c).is_err());
        // second predecessor
        assert!(builder.connect(&c, &b).is_err());
        // into start
        assert!(builder.connect(&b, START_NODE_ID).is_err());
        // self loop
        assert!(builder.connect(&c, &c).is_err());
        // unknown node
        assert!(matches!(builder.connect(&c, "99"), Err(KisanflowError::NotFound(_))));

        builder.connect(&b, &c).unwrap();
        assert_eq!(builder.to_steps().unwrap().len(), 3);
    }

    #[test]
    fn test_connect_rejects_loop() {
        let mut builder = WorkflowBuilder::new();
        let a = builder.add_node(ActionKind::Navigate);
        let b = builder.add_node(ActionKind::Click);
        builder.connect(&a, &b).unwrap();
        assert!(matches!(builder.connect(&b, &a), Err(KisanflowError::Validation(_))));
    }

    #[test]
    fn test_remove_node_drops_edges() {
        let mut builder = WorkflowBuilder::load(&sample_workflow());
        builder.remove_node("2").unwrap();
        assert_eq!(builder.nodes().len(), 2);
        assert!(builder.edges().is_empty());
        assert!(builder.to_steps().unwrap().is_empty());

        assert!(builder.remove_node(START_NODE_ID).is_err());
        assert!(matches!(builder.remove_node("2"), Err(KisanflowError::NotFound(_))));
    }

    #[test]
    fn test_disconnect() {
        let mut builder = WorkflowBuilder::load(&sample_workflow());
        builder.disconnect("e2-3").unwrap();
        assert_eq!(builder.to_steps().unwrap().len(), 1);
        assert!(builder.disconnect("e2-3").is_err());
    }

    #[test]
    fn test_missing_start_fails_build() {
        let builder = WorkflowBuilder::from_graph(GraphModel::default());
        assert!(matches!(builder.build("anything", "English", ""), Err(KisanflowError::NotFound(_))));
    }

    #[test]
    fn test_empty_intent_rejected() {
        let builder = WorkflowBuilder::new();
        assert!(matches!(builder.build("   ", "English", ""), Err(KisanflowError::Validation(_))));
    }

    #[test]
    fn test_issues_flag_without_blocking() {
        let mut builder = WorkflowBuilder::new();
        let fill = builder.add_node(ActionKind::Fill);
        let click = builder.add_node(ActionKind::Click);
        builder.connect(START_NODE_ID, &fill).unwrap();
        builder.connect(&fill, &click).unwrap();

        let issues = builder.issues();
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].node_id, fill);
        assert_eq!(issues[0].message, "Please select a field");
        assert_eq!(issues[1].message, "Please select a target");

        // still saves
        let draft = builder.build("draft", "Hindi", "मसौदा").unwrap();
        assert_eq!(draft.steps.len(), 2);
        assert_eq!(draft.language, "Hindi");
        assert_eq!(draft.translated_input, "मसौदा");

        builder.set_field(&fill, "field", "farmSize").unwrap();
        assert_eq!(builder.issues().len(), 1);
    }

    #[test]
    fn test_update_step_on_start_rejected() {
        let mut builder = WorkflowBuilder::new();
        assert!(builder.update_step(START_NODE_ID, ActionKind::Loop.empty_step()).is_err());
        assert!(builder.set_field(START_NODE_ID, "target", "/x").is_err());
    }

    #[test]
    fn test_from_graph_roundtrip() {
        let original = WorkflowBuilder::load(&sample_workflow());
        let json = serde_json::to_string(&original.graph()).unwrap();
        let mut restored = WorkflowBuilder::from_graph(GraphModel::from_json(&json).unwrap());
        assert_eq!(restored.to_steps().unwrap(), sample_workflow().steps);
        assert_eq!(restored.add_node(ActionKind::If), "4");
    }

    #[test]
    fn test_palette_order() {
        let labels: Vec<&str> = WorkflowBuilder::palette().into_iter().map(|(_, label)| label).collect();
        assert_eq!(labels, vec!["Navigate", "Fill Field", "Click Element", "Prompt User", "If Condition", "Loop"]);
    }
}
