use crate::error::EngineError;
use crate::storage::KeyValueStore;
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::debug;

/// One file per key under the data directory, named `<key>.json`.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn from_env() -> Result<Self, EngineError> {
        Ok(Self { dir: data_dir()? })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

pub fn data_dir() -> Result<PathBuf, EngineError> {
    if let Ok(dir) = std::env::var("CHOREQUEST_DATA_DIR")
        && !dir.trim().is_empty()
    {
        return Ok(PathBuf::from(dir));
    }

    if cfg!(windows) {
        let appdata =
            std::env::var("APPDATA").map_err(|_| EngineError::storage("APPDATA is not set"))?;
        Ok(PathBuf::from(appdata).join("chorequest"))
    } else {
        let home = std::env::var("HOME").map_err(|_| EngineError::storage("HOME is not set"))?;
        Ok(PathBuf::from(home).join(".config").join("chorequest"))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, EngineError> {
        let path = self.key_path(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(key, "no stored value");
                Ok(None)
            }
            Err(err) => Err(EngineError::storage(err.to_string())),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), EngineError> {
        let path = self.key_path(key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|err| EngineError::storage(err.to_string()))?;
        }

        tokio::fs::write(&path, value)
            .await
            .map_err(|err| EngineError::storage(err.to_string()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            tokio::fs::set_permissions(&path, permissions)
                .await
                .map_err(|err| EngineError::storage(err.to_string()))?;
        }

        debug!(key, bytes = value.len(), "stored value");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::FileStore;
    use crate::storage::KeyValueStore;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_dir(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("chorequest-{nanos}-{name}"))
    }

    #[tokio::test]
    async fn get_returns_none_for_absent_key() {
        let dir = temp_dir("absent");
        let store = FileStore::new(&dir);

        assert_eq!(store.get("tasks").await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_then_get_round_trips() {
        let dir = temp_dir("round-trip");
        let store = FileStore::new(&dir);

        store.set("tasks", "[{\"id\":\"task-1\"}]").await.unwrap();
        let loaded = store.get("tasks").await.unwrap();
        std::fs::remove_dir_all(&dir).ok();

        assert_eq!(loaded.as_deref(), Some("[{\"id\":\"task-1\"}]"));
    }

    #[tokio::test]
    async fn set_creates_one_file_per_key() {
        let dir = temp_dir("per-key");
        let store = FileStore::new(&dir);

        store.set("tasks", "[]").await.unwrap();
        store.set("childStats", "{}").await.unwrap();

        let tasks_file = dir.join("tasks.json");
        let stats_file = dir.join("childStats.json");
        let tasks_exists = tasks_file.exists();
        let stats_exists = stats_file.exists();
        std::fs::remove_dir_all(&dir).ok();

        assert!(tasks_exists);
        assert!(stats_exists);
    }

    #[tokio::test]
    async fn set_overwrites_existing_value() {
        let dir = temp_dir("overwrite");
        let store = FileStore::new(&dir);

        store.set("goals", "{\"daily\":[]}").await.unwrap();
        store.set("goals", "{\"weekly\":[]}").await.unwrap();
        let loaded = store.get("goals").await.unwrap();
        std::fs::remove_dir_all(&dir).ok();

        assert_eq!(loaded.as_deref(), Some("{\"weekly\":[]}"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn set_restricts_file_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = temp_dir("permissions");
        let store = FileStore::new(&dir);

        store.set("parentPassword", "1234").await.unwrap();
        let mode = std::fs::metadata(dir.join("parentPassword.json"))
            .unwrap()
            .permissions()
            .mode();
        std::fs::remove_dir_all(&dir).ok();

        assert_eq!(mode & 0o777, 0o600);
    }
}
