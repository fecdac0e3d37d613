//! Editor state, validation and the graph-to-steps walk.

mod builder;
mod form;
mod graph;
mod validate;

pub use builder::{START_NODE_ID, WorkflowBuilder};
pub use form::{FormInput, InputKind, NodeForm};
pub use graph::WorkflowGraph;
pub use validate::{NodeIssue, validate_step};
