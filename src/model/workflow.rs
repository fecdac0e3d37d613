use serde::{Deserialize, Serialize};

use crate::{KisanflowError, Result, model::WorkflowStep};

/// A named, ordered list of automation steps plus the intent that produced it.
///
/// `intent` is the identity: saving a workflow whose intent already exists
/// replaces the stored one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowModel {
    pub intent: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub translated_input: String,
    #[serde(default)]
    pub steps: Vec<WorkflowStep>,
}

impl WorkflowModel {
    pub fn new(
        intent: impl Into<String>,
        steps: Vec<WorkflowStep>,
    ) -> Self {
        let intent = intent.into();
        Self {
            translated_input: intent.clone(),
            intent,
            language: "English".to_string(),
            steps,
        }
    }

    pub fn from_json(s: &str) -> Result<Self> {
        let workflow = serde_json::from_str::<WorkflowModel>(s);
        match workflow {
            Ok(v) => Ok(v),
            Err(e) => Err(KisanflowError::Convert(format!("{}", e))),
        }
    }
}
