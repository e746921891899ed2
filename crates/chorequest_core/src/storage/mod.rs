use crate::error::EngineError;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

mod file_store;
pub use file_store::FileStore;

/// Storage keys shared with the original mobile app's store.
pub mod keys {
    pub const TASKS: &str = "tasks";
    pub const REWARDS: &str = "rewards";
    pub const CHILD_STATS: &str = "childStats";
    pub const GOALS: &str = "goals";
    pub const SELECTED_AVATAR: &str = "selectedAvatar";
    pub const PARENT_PIN: &str = "parentPassword";
}

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, EngineError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), EngineError>;
}

#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, EngineError> {
        let entries = self.entries.lock().await;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), EngineError> {
        let mut entries = self.entries.lock().await;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
