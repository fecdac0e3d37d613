//! Portal context - the main entry point for Kisanflow.
//!
//! The portal wires storage, the page schema and the remote services
//! together and is the one place where failures become notifications:
//! - Saving, loading and deleting workflows
//! - Active language and its translation cache
//! - Subscription plan and feature gating
//! - Weather and sensor polling

mod poller;

use std::{
    sync::{Arc, PoisonError, RwLock},
    time::Duration,
};

use tokio::runtime::Handle;
use tracing::{info, warn};

use crate::{
    Config, Plan, Result, ShareLock,
    model::WorkflowModel,
    notify::{Notification, Notifier},
    schema::PageSchema,
    services::{
        agent::AgentClient,
        sensor::SensorService,
        translation::{Language, Translator},
        weather::WeatherService,
    },
    store::{KvStore, StoreKey, WorkflowStore},
    workflow::WorkflowBuilder,
};

pub use poller::{Poller, Snapshot, Source};

/// The assembled portal.
///
/// # Example
///
/// ```rust,ignore
/// let portal = PortalBuilder::new().config(config).build()?;
///
/// let mut builder = portal.new_builder();
/// let nav = builder.add_node(ActionKind::Navigate);
/// builder.set_field(&nav, "target", "/cold-storage")?;
/// builder.connect(START_NODE_ID, &nav)?;
/// portal.save_builder(&builder, "book cold storage")?;
///
/// for notice in portal.notifications() {
///     println!("{:?}: {}", notice.level, notice.message);
/// }
/// ```
pub struct Portal {
    config: Config,
    kv: Arc<dyn KvStore>,
    workflows: WorkflowStore,
    schema: Arc<PageSchema>,
    translator: Arc<Translator>,
    plan: ShareLock<Plan>,
    agent: AgentClient,
    weather: Arc<WeatherService>,
    sensor: Arc<SensorService>,
    notifier: Notifier,
    runtime: Option<Handle>,
}

impl Portal {
    pub(crate) fn new(
        config: Config,
        kv: Arc<dyn KvStore>,
        schema: PageSchema,
        runtime: Option<Handle>,
    ) -> Result<Self> {
        let translator = Translator::new(&config.translation)?;
        let agent = AgentClient::new(&config.agent)?;

        let portal = Self {
            workflows: WorkflowStore::new(kv.clone()),
            schema: Arc::new(schema),
            translator: Arc::new(translator),
            plan: Arc::new(RwLock::new(config.plan)),
            agent,
            weather: Arc::new(WeatherService::new(&config.weather)),
            sensor: Arc::new(SensorService::new(&config.sensor)),
            notifier: Notifier::new(),
            kv,
            config,
            runtime,
        };
        portal.restore_language();
        Ok(portal)
    }

    fn restore_language(&self) {
        let saved = match self.kv.get_item(StoreKey::PreferredLanguage.as_ref()) {
            Ok(saved) => saved,
            Err(e) => {
                warn!("portal: could not read preferred language: {}", e);
                return;
            }
        };
        if let Some(code) = saved
            && let Err(e) = self.translator.set_language(code.trim())
        {
            warn!("portal: ignoring stored language: {}", e);
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn workflows(&self) -> &WorkflowStore {
        &self.workflows
    }

    pub fn schema(&self) -> &PageSchema {
        &self.schema
    }

    /// Blank editor canvas.
    pub fn new_builder(&self) -> WorkflowBuilder {
        WorkflowBuilder::new()
    }

    /// Editor canvas rebuilt from the saved workflow for `intent`.
    pub fn edit_workflow(
        &self,
        intent: &str,
    ) -> Result<WorkflowBuilder> {
        self.report(self.workflows.find(intent).map(|workflow| WorkflowBuilder::load(&workflow)))
    }

    /// Linearizes the canvas and stores it under `intent`.
    ///
    /// Nothing is written when the canvas has no start node or is not a single chain.
    pub fn save_builder(
        &self,
        builder: &WorkflowBuilder,
        intent: &str,
    ) -> Result<WorkflowModel> {
        let language = self.translator.language();
        let saved = builder.build(intent, language.name, intent).and_then(|workflow| {
            self.workflows.save(&workflow)?;
            Ok(workflow)
        });

        let workflow = self.report(saved)?;
        info!("portal: saved workflow '{}' with {} steps", workflow.intent, workflow.steps.len());
        self.notifier.success("Workflow saved!");
        Ok(workflow)
    }

    pub fn delete_workflow(
        &self,
        intent: &str,
    ) -> Result<bool> {
        let removed = self.report(self.workflows.delete(intent))?;
        if removed {
            self.notifier.success(format!("Workflow '{}' deleted", intent));
        }
        Ok(removed)
    }

    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    /// Switches the UI language, persists the choice and drops cached translations.
    pub fn set_language(
        &self,
        code: &str,
    ) -> Result<Language> {
        let language = self.report(self.translator.set_language(code))?;
        self.report(self.kv.set_item(StoreKey::PreferredLanguage.as_ref(), language.code))?;
        Ok(language)
    }

    pub fn plan(&self) -> Plan {
        *self.plan.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_plan(
        &self,
        plan: Plan,
    ) {
        *self.plan.write().unwrap_or_else(PoisonError::into_inner) = plan;
    }

    pub fn has_feature_access(
        &self,
        feature: &str,
    ) -> bool {
        self.plan().has_feature_access(feature)
    }

    pub fn agent(&self) -> &AgentClient {
        &self.agent
    }

    pub fn weather(&self) -> &WeatherService {
        &self.weather
    }

    pub fn sensor(&self) -> &SensorService {
        &self.sensor
    }

    /// Weather refreshed every `[weather] poll_interval_secs`.
    pub fn poll_weather(&self) -> Result<Poller<WeatherService>> {
        let interval = Duration::from_secs(self.config.weather.poll_interval_secs);
        self.report(Poller::spawn(self.weather.clone(), interval, Some(self.notifier.clone()), self.runtime.clone()))
    }

    /// Sensor readings refreshed every `[sensor] poll_interval_secs`.
    pub fn poll_sensors(&self) -> Result<Poller<SensorService>> {
        let interval = Duration::from_secs(self.config.sensor.poll_interval_secs);
        self.report(Poller::spawn(self.sensor.clone(), interval, Some(self.notifier.clone()), self.runtime.clone()))
    }

    /// Pending notices, oldest first.
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifier.drain()
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// Turns a failure into a notification and hands the result back.
    fn report<T>(
        &self,
        result: Result<T>,
    ) -> Result<T> {
        if let Err(e) = &result {
            self.notifier.error(e);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        KisanflowError, PortalBuilder,
        model::{ActionKind, GraphModel},
        notify::Level,
        store::MemKv,
        workflow::START_NODE_ID,
    };

    fn portal_with(kv: Arc<MemKv>) -> Portal {
        PortalBuilder::new().kv(kv).build().unwrap()
    }

    fn portal() -> Portal {
        portal_with(Arc::new(MemKv::new()))
    }

    fn two_step_builder(portal: &Portal) -> WorkflowBuilder {
        let mut builder = portal.new_builder();
        let nav = builder.add_node(ActionKind::Navigate);
        let fill = builder.add_node(ActionKind::Fill);
        builder.set_field(&nav, "target", "/cold-storage").unwrap();
        builder.set_field(&fill, "field", "farmSize").unwrap();
        builder.set_field(&fill, "value", "5").unwrap();
        builder.connect(START_NODE_ID, &nav).unwrap();
        builder.connect(&nav, &fill).unwrap();
        builder
    }

    #[test]
    fn test_save_and_edit() {
        let portal = portal();
        let saved = portal.save_builder(&two_step_builder(&portal), "book storage").unwrap();
        assert_eq!(saved.steps.len(), 2);
        assert_eq!(saved.language, "English");

        let notices = portal.notifications();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, Level::Success);
        assert_eq!(notices[0].message, "Workflow saved!");

        let reopened = portal.edit_workflow("book storage").unwrap();
        assert_eq!(reopened.to_steps().unwrap(), saved.steps);
    }

    #[test]
    fn test_save_without_start_leaves_storage_untouched() {
        let portal = portal();
        portal.save_builder(&two_step_builder(&portal), "existing").unwrap();
        let before = portal.workflows().list().unwrap();
        portal.notifications();

        let headless = WorkflowBuilder::from_graph(GraphModel::default());
        let err = portal.save_builder(&headless, "broken").unwrap_err();
        assert!(matches!(err, KisanflowError::NotFound(_)));
        assert_eq!(portal.workflows().list().unwrap(), before);

        let notices = portal.notifications();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].message, "No start node found");
    }

    #[test]
    fn test_edit_missing_workflow_notifies() {
        let portal = portal();
        assert!(portal.edit_workflow("nothing").is_err());
        assert_eq!(portal.notifications()[0].level, Level::Warning);
    }

    #[test]
    fn test_delete_workflow() {
        let portal = portal();
        portal.save_builder(&two_step_builder(&portal), "a").unwrap();
        portal.save_builder(&two_step_builder(&portal), "b").unwrap();
        assert!(portal.delete_workflow("a").unwrap());
        assert!(!portal.delete_workflow("a").unwrap());
        let intents: Vec<String> = portal.workflows().list().unwrap().into_iter().map(|w| w.intent).collect();
        assert_eq!(intents, vec!["b"]);
    }

    #[test]
    fn test_language_persisted_and_restored() {
        let kv = Arc::new(MemKv::new());
        let portal = portal_with(kv.clone());
        assert_eq!(portal.set_language("hi").unwrap().name, "Hindi");
        assert_eq!(kv.get_item("preferred-language").unwrap().as_deref(), Some("hi"));

        let saved = portal.save_builder(&two_step_builder(&portal), "hindi flow").unwrap();
        assert_eq!(saved.language, "Hindi");

        let reopened = portal_with(kv);
        assert_eq!(reopened.translator().language().code, "hi");
    }

    #[test]
    fn test_unknown_language_rejected() {
        let portal = portal();
        assert!(portal.set_language("xx").is_err());
        assert!(portal.translator().language().is_english());
        assert_eq!(portal.notifications().len(), 1);
    }

    #[test]
    fn test_plan_gating() {
        let portal = portal();
        assert_eq!(portal.plan(), Plan::Premium);
        assert!(portal.has_feature_access("crop-monitor"));
        portal.set_plan(Plan::Free);
        assert!(!portal.has_feature_access("crop-monitor"));
        assert!(portal.has_feature_access("weather"));
    }

    #[tokio::test]
    async fn test_sensor_polling_without_key_notifies_info() {
        let portal = portal();
        let poller = portal.poll_sensors().unwrap();
        let mut updates = poller.subscribe();
        updates.wait_for(|s| s.updated_at > 0).await.unwrap();

        let snapshot = poller.latest();
        assert!(snapshot.data.is_none());
        assert!(matches!(snapshot.error, Some(KisanflowError::ConfigurationMissing(_))));
        assert_eq!(portal.notifications()[0].level, Level::Info);
    }

    #[tokio::test]
    async fn test_weather_polling_serves_mock() {
        let portal = portal();
        let poller = portal.poll_weather().unwrap();
        let mut updates = poller.subscribe();
        updates.wait_for(|s| s.updated_at > 0).await.unwrap();
        assert_eq!(poller.latest().data.map(|d| d.current.temp), Some(28));
        poller.stop();
    }
}
