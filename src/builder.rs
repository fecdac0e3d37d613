use std::sync::Arc;

use tokio::runtime::Handle;
use tracing::debug;

use crate::{
    Config, KisanflowError, Portal, Result, StoreType,
    schema::PageSchema,
    store::{FileKv, KvStore, MemKv},
};

#[derive(Default)]
pub struct PortalBuilder {
    config: Config,
    kv: Option<Arc<dyn KvStore>>,
    runtime: Option<Handle>,
}

impl PortalBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(
        mut self,
        config: Config,
    ) -> Self {
        self.config = config;
        self
    }

    /// Uses `kv` instead of the medium named in `[store]`.
    pub fn kv(
        mut self,
        kv: Arc<dyn KvStore>,
    ) -> Self {
        self.kv = Some(kv);
        self
    }

    /// Runtime the pollers are spawned on; defaults to the caller's runtime.
    pub fn runtime(
        mut self,
        runtime: Handle,
    ) -> Self {
        self.runtime = Some(runtime);
        self
    }

    pub fn build(self) -> Result<Portal> {
        let kv = match self.kv {
            Some(kv) => kv,
            None => Self::open_store(&self.config)?,
        };

        let schema = match &self.config.schema.path {
            Some(path) => {
                debug!("portal: loading ui schema from {:?}", path);
                PageSchema::load(path)?
            }
            None => PageSchema::embedded(),
        };

        Portal::new(self.config, kv, schema, self.runtime)
    }

    fn open_store(config: &Config) -> Result<Arc<dyn KvStore>> {
        let kv: Arc<dyn KvStore> = match config.store.store_type {
            StoreType::Mem => Arc::new(MemKv::new()),
            StoreType::File => {
                let path = config.store.path.as_ref().ok_or_else(|| KisanflowError::Config("[store] path is required when store_type is file".to_string()))?;
                Arc::new(FileKv::new(path)?)
            }
        };
        Ok(kv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_needs_path() {
        let config = Config::load_from_str("[store]\nstore_type = \"file\"").unwrap();
        assert!(matches!(PortalBuilder::new().config(config).build(), Err(KisanflowError::Config(_))));
    }

    #[test]
    fn test_file_store_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from_str(&format!("[store]\nstore_type = \"file\"\npath = {:?}", dir.path().to_string_lossy())).unwrap();
        let portal = PortalBuilder::new().config(config).build().unwrap();
        portal.set_language("ta").unwrap();
        assert!(dir.path().join("preferred-language.json").exists());
    }

    #[test]
    fn test_custom_schema_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.json");
        std::fs::write(&path, r#"{"pages": {"/orders": {"elements": {"orderId": "" }}}}"#).unwrap();

        let mut config = Config::default();
        config.schema.path = Some(path);
        let portal = PortalBuilder::new().config(config).build().unwrap();
        assert_eq!(portal.schema().options("/orders"), vec!["orderId"]);
        assert!(portal.schema().options("/login").is_empty());
    }
}
