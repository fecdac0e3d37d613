//! Input description of an action node, as the editor renders it.

use serde::Serialize;

use crate::{
    model::{NodeId, NodeModel, WorkflowStep},
    schema::PageSchema,
    workflow::validate::validate_step,
};

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputKind {
    Text,
    Number,
    /// Options come from the page-element schema; `placeholder` is the empty choice.
    Select {
        options: Vec<String>,
    },
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FormInput {
    /// Step field the input edits, see [`WorkflowStep::set_field`].
    pub name: &'static str,
    pub placeholder: &'static str,
    #[serde(flatten)]
    pub kind: InputKind,
    pub value: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct NodeForm {
    pub node_id: NodeId,
    pub label: String,
    pub inputs: Vec<FormInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl NodeForm {
    pub fn render(
        node: &NodeModel,
        step: &WorkflowStep,
        schema: &PageSchema,
        page: &str,
    ) -> Self {
        let inputs = match step {
            WorkflowStep::Navigate {
                target,
                ..
            } => vec![text("target", "URL", target)],
            WorkflowStep::Fill {
                field,
                value,
            } => vec![select("field", "Select Field", schema.options(page), field), text("value", "Value", value)],
            WorkflowStep::Click {
                target,
            } => vec![select("target", "Select Target", schema.options(page), target)],
            WorkflowStep::PromptUser {
                message,
                ..
            } => vec![text("message", "Message", message)],
            WorkflowStep::If {
                condition,
            } => vec![text("condition", "Condition", condition)],
            WorkflowStep::Loop {
                count,
            } => vec![FormInput {
                name: "count",
                placeholder: "Count",
                kind: InputKind::Number,
                value: count.to_string(),
            }],
        };

        Self {
            node_id: node.id.clone(),
            label: node.data.label.clone(),
            inputs,
            error: validate_step(step).map(str::to_string),
        }
    }
}

fn text(
    name: &'static str,
    placeholder: &'static str,
    value: &str,
) -> FormInput {
    FormInput {
        name,
        placeholder,
        kind: InputKind::Text,
        value: value.to_string(),
    }
}

fn select(
    name: &'static str,
    placeholder: &'static str,
    options: Vec<String>,
    value: &str,
) -> FormInput {
    FormInput {
        name,
        placeholder,
        kind: InputKind::Select {
            options,
        },
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::ActionKind,
        workflow::builder::{START_NODE_ID, WorkflowBuilder},
    };

    #[test]
    fn test_fill_form_offers_page_elements() {
        let mut builder = WorkflowBuilder::new();
        let id = builder.add_node(ActionKind::Fill);
        let form = builder.form(&id, &PageSchema::embedded(), "/login").unwrap();

        assert_eq!(form.label, "Fill Field Node");
        assert_eq!(form.inputs.len(), 2);
        assert_eq!(
            form.inputs[0].kind,
            InputKind::Select {
                options: vec!["email".to_string(), "loginButton".to_string(), "password".to_string()]
            }
        );
        assert_eq!(form.inputs[1].kind, InputKind::Text);
        assert_eq!(form.error.as_deref(), Some("Please select a field"));
    }

    #[test]
    fn test_unknown_page_gives_empty_select() {
        let mut builder = WorkflowBuilder::new();
        let id = builder.add_node(ActionKind::Click);
        builder.set_field(&id, "target", "submitButton").unwrap();
        let form = builder.form(&id, &PageSchema::embedded(), "/nowhere").unwrap();

        assert_eq!(
            form.inputs[0].kind,
            InputKind::Select {
                options: vec![]
            }
        );
        assert_eq!(form.inputs[0].value, "submitButton");
        assert_eq!(form.error, None);
    }

    #[test]
    fn test_loop_form_is_numeric() {
        let mut builder = WorkflowBuilder::new();
        let id = builder.add_node(ActionKind::Loop);
        builder.set_field(&id, "count", "3").unwrap();
        let form = builder.form(&id, &PageSchema::empty(), "/dashboard").unwrap();

        assert_eq!(form.inputs[0].kind, InputKind::Number);
        assert_eq!(form.inputs[0].value, "3");
        assert_eq!(serde_json::to_value(&form.inputs[0]).unwrap()["type"], "number");
    }

    #[test]
    fn test_start_node_has_no_form() {
        let builder = WorkflowBuilder::new();
        assert!(builder.form(START_NODE_ID, &PageSchema::embedded(), "/login").is_err());
    }
}
