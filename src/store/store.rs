use std::sync::Arc;

use serde_json::Value;
use tracing::{trace, warn};

use crate::{KisanflowError, Result, model::WorkflowModel};

use super::{KvStore, StoreKey};

/// Saved workflows, kept as one flat JSON array under [`StoreKey::Workflows`].
///
/// Every mutation rewrites the whole array. Nothing guards against two
/// writers interleaving: the last `save`/`save_all` wins.
#[derive(Clone)]
pub struct WorkflowStore {
    kv: Arc<dyn KvStore>,
}

impl WorkflowStore {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self {
            kv,
        }
    }

    /// All saved workflows in stored order.
    ///
    /// Unparsable content reads as an empty list. A record that does not
    /// decode is skipped here but kept in storage by later writes.
    pub fn list(&self) -> Result<Vec<WorkflowModel>> {
        trace!("store::list()");
        let workflows = self
            .records()?
            .into_iter()
            .filter_map(|record| match serde_json::from_value::<WorkflowModel>(record) {
                Ok(workflow) => Some(workflow),
                Err(e) => {
                    warn!("store: skipping malformed workflow record: {}", e);
                    None
                }
            })
            .collect();
        Ok(workflows)
    }

    /// Raw stored records, one JSON value per workflow.
    fn records(&self) -> Result<Vec<Value>> {
        let Some(text) = self.kv.get_item(StoreKey::Workflows.as_ref())? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<Value>>(&text) {
            Ok(records) => Ok(records),
            Err(e) => {
                warn!("store: stored workflows are malformed, treating as empty: {}", e);
                Ok(Vec::new())
            }
        }
    }

    fn write_records(
        &self,
        records: &[Value],
    ) -> Result<()> {
        let text = serde_json::to_string(records)?;
        self.kv.set_item(StoreKey::Workflows.as_ref(), &text)
    }

    pub fn get(
        &self,
        intent: &str,
    ) -> Result<Option<WorkflowModel>> {
        trace!("store::get({})", intent);
        Ok(self.list()?.into_iter().find(|w| w.intent == intent))
    }

    /// Like [`WorkflowStore::get`] but a missing intent is an error.
    pub fn find(
        &self,
        intent: &str,
    ) -> Result<WorkflowModel> {
        self.get(intent)?.ok_or_else(|| KisanflowError::NotFound(format!("no saved workflow for intent '{}'", intent)))
    }

    /// Replaces the workflow with the same intent in place, or appends it.
    pub fn save(
        &self,
        workflow: &WorkflowModel,
    ) -> Result<()> {
        trace!("store::save({})", workflow.intent);
        let mut records = self.records()?;
        let record = serde_json::to_value(workflow)?;

        match records.iter_mut().find(|r| has_intent(r, &workflow.intent)) {
            Some(existing) => *existing = record,
            None => records.push(record),
        }

        self.write_records(&records)
    }

    /// Replaces the entire persisted collection.
    pub fn save_all(
        &self,
        workflows: &[WorkflowModel],
    ) -> Result<()> {
        trace!("store::save_all({})", workflows.len());
        let text = serde_json::to_string(workflows)?;
        self.kv.set_item(StoreKey::Workflows.as_ref(), &text)
    }

    /// Removes the workflow with `intent`; returns whether one was removed.
    pub fn delete(
        &self,
        intent: &str,
    ) -> Result<bool> {
        trace!("store::delete({})", intent);
        let records = self.records()?;
        let before = records.len();
        let remaining: Vec<Value> = records.into_iter().filter(|r| !has_intent(r, intent)).collect();

        if remaining.len() == before {
            return Ok(false);
        }
        self.write_records(&remaining)?;
        Ok(true)
    }
}

fn has_intent(
    record: &Value,
    intent: &str,
) -> bool {
    record.get("intent").and_then(Value::as_str) == Some(intent)
}
