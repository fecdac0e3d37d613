use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use crate::{
    Result, ShareLock,
    store::{KvStore, map_db_err},
};

#[derive(Debug, Clone, Default)]
pub struct MemKv {
    items: ShareLock<HashMap<String, String>>,
}

impl MemKv {
    pub fn new() -> Self {
        Self {
            items: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl KvStore for MemKv {
    fn get_item(
        &self,
        key: &str,
    ) -> Result<Option<String>> {
        let items = self.items.read().map_err(map_db_err)?;
        Ok(items.get(key).cloned())
    }

    fn set_item(
        &self,
        key: &str,
        value: &str,
    ) -> Result<()> {
        let mut items = self.items.write().map_err(map_db_err)?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(
        &self,
        key: &str,
    ) -> Result<()> {
        let mut items = self.items.write().map_err(map_db_err)?;
        items.remove(key);
        Ok(())
    }
}
