use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::{KisanflowError, Result};

/// One unit of automation.
///
/// Serialized with an `action` tag, e.g.
/// `{"action":"fill","field":"farmSize","value":"5"}`. Every field defaults
/// to empty so that a node freshly dropped into the editor is representable.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum WorkflowStep {
    Navigate {
        #[serde(default)]
        target: String,
        /// spoken after navigating
        #[serde(default, skip_serializing_if = "Option::is_none")]
        speak: Option<String>,
    },
    Fill {
        #[serde(default)]
        field: String,
        #[serde(default, deserialize_with = "lenient_string")]
        value: String,
    },
    Click {
        #[serde(default)]
        target: String,
    },
    PromptUser {
        #[serde(default)]
        message: String,
        /// key under which the executor stores the answer
        #[serde(default, skip_serializing_if = "Option::is_none")]
        response_key: Option<String>,
    },
    If {
        #[serde(default)]
        condition: String,
    },
    Loop {
        #[serde(default, deserialize_with = "lenient_count")]
        count: i64,
    },
}

/// Tag of a [`WorkflowStep`], used by the palette and the editor.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, strum::AsRefStr, strum::EnumString, strum::EnumIter)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ActionKind {
    Navigate,
    Fill,
    Click,
    PromptUser,
    If,
    Loop,
}

impl ActionKind {
    /// Palette label.
    pub fn label(&self) -> &'static str {
        match self {
            ActionKind::Navigate => "Navigate",
            ActionKind::Fill => "Fill Field",
            ActionKind::Click => "Click Element",
            ActionKind::PromptUser => "Prompt User",
            ActionKind::If => "If Condition",
            ActionKind::Loop => "Loop",
        }
    }

    /// Whether the editor offers page elements as options for this kind.
    pub fn uses_page_elements(&self) -> bool {
        matches!(self, ActionKind::Fill | ActionKind::Click)
    }

    /// An empty step of this kind.
    pub fn empty_step(&self) -> WorkflowStep {
        match self {
            ActionKind::Navigate => WorkflowStep::Navigate {
                target: String::new(),
                speak: None,
            },
            ActionKind::Fill => WorkflowStep::Fill {
                field: String::new(),
                value: String::new(),
            },
            ActionKind::Click => WorkflowStep::Click {
                target: String::new(),
            },
            ActionKind::PromptUser => WorkflowStep::PromptUser {
                message: String::new(),
                response_key: None,
            },
            ActionKind::If => WorkflowStep::If {
                condition: String::new(),
            },
            ActionKind::Loop => WorkflowStep::Loop {
                count: 0,
            },
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl WorkflowStep {
    pub fn kind(&self) -> ActionKind {
        match self {
            WorkflowStep::Navigate {
                ..
            } => ActionKind::Navigate,
            WorkflowStep::Fill {
                ..
            } => ActionKind::Fill,
            WorkflowStep::Click {
                ..
            } => ActionKind::Click,
            WorkflowStep::PromptUser {
                ..
            } => ActionKind::PromptUser,
            WorkflowStep::If {
                ..
            } => ActionKind::If,
            WorkflowStep::Loop {
                ..
            } => ActionKind::Loop,
        }
    }

    /// Edit one field from a text input.
    ///
    /// Names follow the serialized field names. `count` must parse as an
    /// integer; names the kind does not carry are rejected.
    pub fn set_field(
        &mut self,
        name: &str,
        input: &str,
    ) -> Result<()> {
        let kind = self.kind();
        let unknown = || KisanflowError::Validation(format!("'{}' step has no field '{}'", kind, name));

        match (self, name) {
            (
                WorkflowStep::Navigate {
                    target,
                    ..
                }
                | WorkflowStep::Click {
                    target,
                },
                "target",
            ) => *target = input.to_string(),
            (
                WorkflowStep::Navigate {
                    speak,
                    ..
                },
                "speak",
            ) => *speak = optional(input),
            (
                WorkflowStep::Fill {
                    field,
                    ..
                },
                "field",
            ) => *field = input.to_string(),
            (
                WorkflowStep::Fill {
                    value,
                    ..
                },
                "value",
            ) => *value = input.to_string(),
            (
                WorkflowStep::PromptUser {
                    message,
                    ..
                },
                "message",
            ) => *message = input.to_string(),
            (
                WorkflowStep::PromptUser {
                    response_key,
                    ..
                },
                "response_key",
            ) => *response_key = optional(input),
            (
                WorkflowStep::If {
                    condition,
                },
                "condition",
            ) => *condition = input.to_string(),
            (
                WorkflowStep::Loop {
                    count,
                },
                "count",
            ) => *count = parse_count(input)?,
            _ => return Err(unknown()),
        }
        Ok(())
    }
}

fn optional(input: &str) -> Option<String> {
    if input.is_empty() {
        None
    } else {
        Some(input.to_string())
    }
}

fn parse_count(input: &str) -> Result<i64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed.parse::<i64>().map_err(|_| KisanflowError::Validation(format!("loop count '{}' is not an integer", input)))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    Null(()),
}

/// Accepts any JSON scalar; editor inputs are free text.
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Scalar::deserialize(deserializer)? {
        Scalar::Int(n) => n.to_string(),
        Scalar::Float(n) => n.to_string(),
        Scalar::Bool(b) => b.to_string(),
        Scalar::Str(s) => s,
        Scalar::Null(()) => String::new(),
    })
}

/// Accepts an integer or a numeric string such as `"3"`.
fn lenient_count<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match Scalar::deserialize(deserializer)? {
        Scalar::Int(n) => Ok(n),
        Scalar::Float(n) if n.fract() == 0.0 => Ok(n as i64),
        Scalar::Str(s) => parse_count(&s).map_err(serde::de::Error::custom),
        Scalar::Null(()) => Ok(0),
        _ => Err(serde::de::Error::custom("loop count must be an integer")),
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use serde_json::json;

    use super::*;

    #[test]
    fn test_step_wire_shape() {
        let step = WorkflowStep::Fill {
            field: "farmSize".to_string(),
            value: "5".to_string(),
        };
        assert_eq!(serde_json::to_value(&step).unwrap(), json!({"action": "fill", "field": "farmSize", "value": "5"}));

        let step = WorkflowStep::PromptUser {
            message: "Which crop?".to_string(),
            response_key: None,
        };
        assert_eq!(serde_json::to_value(&step).unwrap(), json!({"action": "prompt-user", "message": "Which crop?"}));
    }

    #[test]
    fn test_step_parse_all_kinds() {
        let steps: Vec<WorkflowStep> = serde_json::from_value(json!([
            {"action": "navigate", "target": "/dashboard", "speak": "Opening dashboard"},
            {"action": "fill", "field": "farmSize", "value": 5},
            {"action": "click", "target": "submitButton"},
            {"action": "prompt-user", "message": "Crop?", "response_key": "crop"},
            {"action": "if", "condition": "data.crop == 'rice'"},
            {"action": "loop", "count": "3"}
        ]))
        .unwrap();

        let kinds: Vec<ActionKind> = steps.iter().map(|s| s.kind()).collect();
        assert_eq!(
            kinds,
            vec![ActionKind::Navigate, ActionKind::Fill, ActionKind::Click, ActionKind::PromptUser, ActionKind::If, ActionKind::Loop]
        );
        assert_eq!(
            steps[1],
            WorkflowStep::Fill {
                field: "farmSize".to_string(),
                value: "5".to_string()
            }
        );
        assert_eq!(
            steps[5],
            WorkflowStep::Loop {
                count: 3
            }
        );
    }

    #[test]
    fn test_step_missing_fields_default() {
        let step: WorkflowStep = serde_json::from_value(json!({"action": "click"})).unwrap();
        assert_eq!(
            step,
            WorkflowStep::Click {
                target: String::new()
            }
        );
    }

    #[test]
    fn test_step_unknown_action_rejected() {
        assert!(serde_json::from_value::<WorkflowStep>(json!({"action": "teleport"})).is_err());
        assert!(serde_json::from_value::<WorkflowStep>(json!({"action": "loop", "count": "many"})).is_err());
    }

    #[test]
    fn test_set_field() {
        let mut step = ActionKind::Loop.empty_step();
        step.set_field("count", " 4 ").unwrap();
        assert_eq!(
            step,
            WorkflowStep::Loop {
                count: 4
            }
        );
        assert!(step.set_field("count", "four").is_err());
        assert!(step.set_field("target", "/x").is_err());

        let mut step = ActionKind::Navigate.empty_step();
        step.set_field("target", "/weather").unwrap();
        step.set_field("speak", "").unwrap();
        assert_eq!(
            step,
            WorkflowStep::Navigate {
                target: "/weather".to_string(),
                speak: None
            }
        );
    }

    #[test]
    fn test_action_kind() {
        assert_eq!(ActionKind::from_str("prompt-user").unwrap(), ActionKind::PromptUser);
        assert_eq!(ActionKind::Fill.label(), "Fill Field");
        assert!(ActionKind::Click.uses_page_elements());
        assert!(!ActionKind::Navigate.uses_page_elements());
        assert_eq!(ActionKind::If.empty_step().kind(), ActionKind::If);
    }
}
