use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;
use thiserror::Error;

pub(crate) mod paths;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("missing HOME environment variable")]
    MissingHomeDirectory,
    #[error("failed to read preference file: {path}")]
    ReadFile { path: PathBuf, source: io::Error },
    #[error("failed to write preference file: {path}")]
    WriteFile { path: PathBuf, source: io::Error },
    #[error("failed to parse preference file")]
    ParseFile(#[from] serde_json::Error),
}

/// Asynchronous key-value preference storage. Reads and writes are both
/// fallible; callers decide whether a failure is fatal (for theme
/// preferences it never is).
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    async fn get_item(&self, key: &str) -> StoreResult<Option<String>>;
    async fn set_item(&self, key: &str, value: &str) -> StoreResult<()>;
}

/// Process-local store. The default for headless use and the workhorse of
/// the service tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PreferenceStore for MemoryStore {
    async fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One JSON object per file under the user's config directory. Writes
/// preserve keys other callers put in the same file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Resolves `$XDG_CONFIG_HOME/duotone/prefs.json`, falling back to
    /// `$HOME/.config`.
    pub fn open_default() -> StoreResult<Self> {
        let (xdg_config_home, home) = paths::prefs_env_dirs();
        let path = paths::prefs_file_path(xdg_config_home.as_deref(), home.as_deref()).map_err(
            |paths::PrefPathError::MissingHomeDirectory| StoreError::MissingHomeDirectory,
        )?;
        Ok(Self::with_path(path))
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    async fn read_entries(&self) -> StoreResult<HashMap<String, String>> {
        let serialized = match tokio::fs::read_to_string(&self.path).await {
            Ok(serialized) => serialized,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(source) => {
                return Err(StoreError::ReadFile {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        Ok(serde_json::from_str(&serialized)?)
    }
}

#[async_trait]
impl PreferenceStore for JsonFileStore {
    async fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.read_entries().await?.remove(key))
    }

    async fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        // An unreadable or corrupt file must not block the write; start over
        // from an empty object, keeping whatever parsed.
        let mut entries = match self.read_entries().await {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!(?err, path = %self.path.display(), "rewriting unreadable preference file");
                HashMap::new()
            }
        };
        entries.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| StoreError::WriteFile {
                    path: self.path.clone(),
                    source,
                })?;
        }

        let serialized = serde_json::to_string_pretty(&entries)?;
        tokio::fs::write(&self.path, serialized)
            .await
            .map_err(|source| StoreError::WriteFile {
                path: self.path.clone(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    struct TempRoot(PathBuf);

    impl TempRoot {
        fn new() -> Self {
            let mut path = std::env::temp_dir();
            let nanos = std::time::SystemTime::now()
                .duration_since(std::time::SystemTime::UNIX_EPOCH)
                .map_or(0, |d| d.as_nanos());
            let pid = std::process::id();
            path.push(format!("duotone-store-{pid}-{nanos}"));
            std::fs::create_dir_all(&path).unwrap();
            Self(path)
        }

        fn store(&self) -> JsonFileStore {
            JsonFileStore::with_path(self.0.join("prefs.json"))
        }

        fn path(&self) -> &Path {
            &self.0
        }
    }

    impl Drop for TempRoot {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.0);
        }
    }

    #[tokio::test]
    async fn get_item_on_a_missing_file_is_absent() {
        let root = TempRoot::new();
        let store = root.store();
        assert_eq!(store.get_item("theme_mode").await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_then_get_round_trips() {
        let root = TempRoot::new();
        let store = root.store();

        store.set_item("theme_mode", "dark").await.unwrap();
        assert_eq!(
            store.get_item("theme_mode").await.unwrap().as_deref(),
            Some("dark")
        );

        store.set_item("theme_mode", "light").await.unwrap();
        assert_eq!(
            store.get_item("theme_mode").await.unwrap().as_deref(),
            Some("light")
        );
    }

    #[tokio::test]
    async fn set_item_preserves_unrelated_keys() {
        let root = TempRoot::new();
        let store = root.store();
        std::fs::write(
            store.path(),
            r#"{ "locale": "ko-KR", "theme_mode": "light" }"#,
        )
        .unwrap();

        store.set_item("theme_mode", "dark").await.unwrap();

        assert_eq!(
            store.get_item("theme_mode").await.unwrap().as_deref(),
            Some("dark")
        );
        assert_eq!(
            store.get_item("locale").await.unwrap().as_deref(),
            Some("ko-KR")
        );
    }

    #[tokio::test]
    async fn get_item_rejects_a_corrupt_file() {
        let root = TempRoot::new();
        let store = root.store();
        std::fs::write(store.path(), "{ invalid ").unwrap();

        let err = store.get_item("theme_mode").await.unwrap_err();
        assert!(matches!(err, StoreError::ParseFile(_)));
    }

    #[tokio::test]
    async fn set_item_recovers_from_a_corrupt_file() {
        let root = TempRoot::new();
        let store = root.store();
        std::fs::write(store.path(), "{ invalid ").unwrap();

        store.set_item("theme_mode", "dark").await.unwrap();
        assert_eq!(
            store.get_item("theme_mode").await.unwrap().as_deref(),
            Some("dark")
        );
    }

    #[tokio::test]
    async fn set_item_creates_missing_parent_directories() {
        let root = TempRoot::new();
        let store = JsonFileStore::with_path(root.path().join("nested/dir/prefs.json"));

        store.set_item("theme_mode", "system").await.unwrap();
        assert_eq!(
            store.get_item("theme_mode").await.unwrap().as_deref(),
            Some("system")
        );
    }

    #[tokio::test]
    async fn memory_store_round_trips_and_overwrites() {
        let store = MemoryStore::new();
        assert_eq!(store.get_item("theme_mode").await.unwrap(), None);

        store.set_item("theme_mode", "dark").await.unwrap();
        assert_eq!(
            store.get_item("theme_mode").await.unwrap().as_deref(),
            Some("dark")
        );

        store.set_item("theme_mode", "system").await.unwrap();
        assert_eq!(
            store.get_item("theme_mode").await.unwrap().as_deref(),
            Some("system")
        );
    }
}
