//! Inline step validation.
//!
//! Issues are reported per node and never block a save.

use serde::Serialize;

use crate::model::{NodeId, WorkflowStep};

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct NodeIssue {
    pub node_id: NodeId,
    pub message: String,
}

/// Only `fill.field` and `click.target` are checked; navigate URLs, loop
/// counts and if conditions are accepted as typed.
pub fn validate_step(step: &WorkflowStep) -> Option<&'static str> {
    match step {
        WorkflowStep::Fill {
            field,
            ..
        } if field.is_empty() => Some("Please select a field"),
        WorkflowStep::Click {
            target,
        } if target.is_empty() => Some("Please select a target"),
        _ => None,
    }
}
