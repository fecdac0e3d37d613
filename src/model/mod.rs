mod graph;
mod step;
mod workflow;

pub use graph::{EdgeId, EdgeModel, GraphModel, NodeData, NodeId, NodeModel, NodeType, Position};
pub use step::{ActionKind, WorkflowStep};
pub use workflow::WorkflowModel;
