//! Saved-item store backed by a single JSON array file.
//!
//! The store owns its file path and is the only writer of that file. Every
//! mutation is a load-modify-write cycle done under one async mutex, so
//! concurrent callers sharing a store cannot lose each other's updates.
//!
//! Items are addressed by their position in the current file. A position is
//! only meaningful until the next mutation.

use crate::error::PersistenceError;
use crate::models::SavedItem;
use crate::utils::ensure_parent_dir;
use serde::Serialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

pub const DEFAULT_SAVE_PATH: &str = "saved_news.json";

#[derive(Debug)]
pub struct SavedStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl SavedStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All saved items in file order. A missing file is an empty store.
    pub async fn load(&self) -> Result<Vec<SavedItem>, PersistenceError> {
        let _guard = self.lock.lock().await;
        self.read().await
    }

    /// Append `item` unless an identical item is already saved. Returns
    /// whether the file changed.
    #[instrument(level = "info", skip_all, fields(path = %self.path.display(), link = %item.link))]
    pub async fn save(&self, item: SavedItem) -> Result<bool, PersistenceError> {
        let _guard = self.lock.lock().await;
        let mut items = self.read().await?;
        if items.contains(&item) {
            debug!("Already saved");
            return Ok(false);
        }
        items.push(item);
        self.write(&items).await?;
        info!(count = items.len(), "Saved item");
        Ok(true)
    }

    /// Remove and return the item at `index`, or `None` when the index is
    /// out of range (typically a stale position from an earlier listing).
    #[instrument(level = "info", skip(self), fields(path = %self.path.display()))]
    pub async fn remove(&self, index: usize) -> Result<Option<SavedItem>, PersistenceError> {
        let _guard = self.lock.lock().await;
        let mut items = self.read().await?;
        if index >= items.len() {
            debug!(len = items.len(), "Index out of range; nothing removed");
            return Ok(None);
        }
        let removed = items.remove(index);
        self.write(&items).await?;
        info!(count = items.len(), "Removed item");
        Ok(Some(removed))
    }

    async fn read(&self) -> Result<Vec<SavedItem>, PersistenceError> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(PersistenceError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        serde_json::from_str(&raw).map_err(|source| PersistenceError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    async fn write(&self, items: &[SavedItem]) -> Result<(), PersistenceError> {
        write_json_pretty(&self.path, items).await
    }
}

/// Serialize `value` with four-space indentation and replace `path` with it.
///
/// The JSON goes to a sibling temporary file first and is renamed over the
/// target, so readers see either the old or the new content.
pub(crate) async fn write_json_pretty<T: Serialize + ?Sized>(
    path: &Path,
    value: &T,
) -> Result<(), PersistenceError> {
    let io_error = |source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut ser)
        .map_err(PersistenceError::Serialize)?;

    ensure_parent_dir(path).await.map_err(io_error)?;
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    fs::write(&tmp, &buf).await.map_err(io_error)?;
    fs::rename(&tmp, path).await.map_err(io_error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn item(n: u32) -> SavedItem {
        SavedItem {
            title: format!("Story {n}"),
            source: "The Wire".to_string(),
            date: "2024-01-05".to_string(),
            summary: "Summary".to_string(),
            link: format!("https://thewire.in/{n}"),
        }
    }

    fn store_in(dir: &tempfile::TempDir) -> SavedStore {
        SavedStore::new(dir.path().join("saved_news.json"))
    }

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(store_in(&dir).load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.save(item(1)).await.unwrap());
        assert!(!store.save(item(1)).await.unwrap());
        let items = store.load().await.unwrap();
        assert_eq!(items, vec![item(1)]);
    }

    #[tokio::test]
    async fn test_items_differing_in_one_field_are_distinct() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let mut other = item(1);
        other.date = String::new();
        store.save(item(1)).await.unwrap();
        store.save(other).await.unwrap();
        assert_eq!(store.load().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_remove_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        for n in 0..3 {
            store.save(item(n)).await.unwrap();
        }
        let index = store
            .load()
            .await
            .unwrap()
            .iter()
            .position(|i| *i == item(1))
            .unwrap();
        assert_eq!(store.remove(index).await.unwrap(), Some(item(1)));
        let left = store.load().await.unwrap();
        assert_eq!(left, vec![item(0), item(2)]);
    }

    #[tokio::test]
    async fn test_remove_out_of_range_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save(item(0)).await.unwrap();
        let before = fs::read_to_string(store.path()).await.unwrap();
        assert_eq!(store.remove(1).await.unwrap(), None);
        assert_eq!(store.remove(usize::MAX).await.unwrap(), None);
        let after = fs::read_to_string(store.path()).await.unwrap();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_a_persistence_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "[{\"title\": ").await.unwrap();
        assert!(matches!(
            store.load().await,
            Err(PersistenceError::Corrupt { .. })
        ));
        assert!(store.save(item(0)).await.is_err());
        assert!(store.remove(0).await.is_err());
    }

    #[tokio::test]
    async fn test_file_format() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let mut hindi = item(0);
        hindi.title = "दलित अधिकार".to_string();
        store.save(hindi).await.unwrap();
        let raw = fs::read_to_string(store.path()).await.unwrap();
        assert!(raw.starts_with("[\n    {\n        \"title\": \"दलित अधिकार\""));
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let keys: Vec<&String> = value[0].as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 5);
    }

    #[tokio::test]
    async fn test_concurrent_saves_are_not_lost() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(store_in(&dir));
        let handles: Vec<_> = (0..16)
            .map(|n| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.save(item(n)).await.unwrap() })
            })
            .collect();
        for handle in handles {
            assert!(handle.await.unwrap());
        }
        assert_eq!(store.load().await.unwrap().len(), 16);
    }
}
