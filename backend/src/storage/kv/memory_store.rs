use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::sync::RwLock;

use crate::storage::traits::KeyValueStore;

/// Process-local stand-in for the external key-value store
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self
            .values
            .read()
            .map_err(|_| anyhow!("key-value store lock poisoned"))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> Result<()> {
        let mut values = self
            .values
            .write()
            .map_err(|_| anyhow!("key-value store lock poisoned"))?;
        values.insert(key.to_string(), value);
        Ok(())
    }
}
