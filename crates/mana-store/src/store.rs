//! Per-champion JSON files with a write-back memory layer
//!
//! Reads go to memory first, then to `<dir>/<championId>.json`. Writes only
//! touch memory until [`ChampionStore::save`] flushes them.

use crate::error::StoreError;
use dashmap::DashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Directory-backed store of one value per champion
#[derive(Debug)]
pub struct ChampionStore<T> {
    dir: PathBuf,
    memory: DashMap<u32, T>,
}

impl<T> ChampionStore<T>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync,
{
    /// Create store rooted at `dir`; nothing touches disk until [`Self::load`]
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            memory: DashMap::new(),
        }
    }

    /// Store directory
    #[inline]
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding a champion's data
    #[inline]
    #[must_use]
    pub fn path_for(&self, champion_id: u32) -> PathBuf {
        self.dir.join(format!("{champion_id}.json"))
    }

    /// Create the store directory if needed
    ///
    /// # Errors
    /// - `StoreError::Io` if the directory cannot be created
    pub async fn load(&self) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| StoreError::io(&self.dir, e))?;
        debug!("Champion store ready at {}", self.dir.display());
        Ok(())
    }

    /// Value for a champion, from memory or disk
    ///
    /// # Errors
    /// - `StoreError::Io` if the file exists but cannot be read
    /// - `StoreError::Corrupt` if the file is not valid JSON for `T`
    pub async fn get(&self, champion_id: u32) -> Result<Option<T>, StoreError> {
        if let Some(value) = self.memory.get(&champion_id) {
            return Ok(Some(value.clone()));
        }

        let path = self.path_for(champion_id);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::io(&path, e)),
        };
        let value: T =
            serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt { path, source })?;

        self.memory.insert(champion_id, value.clone());
        Ok(Some(value))
    }

    /// Replace a champion's value in memory
    pub fn set(&self, champion_id: u32, value: T) {
        self.memory.insert(champion_id, value);
    }

    /// Replace a champion's value with `f(current)`
    ///
    /// # Errors
    /// Same as [`Self::get`]
    pub async fn update<F>(&self, champion_id: u32, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(Option<T>) -> T,
    {
        let current = self.get(champion_id).await?;
        let next = f(current);
        self.memory.insert(champion_id, next.clone());
        Ok(next)
    }

    /// Write every in-memory value to disk; returns the number written
    ///
    /// # Errors
    /// - `StoreError::Serialize` if a value cannot be encoded
    /// - `StoreError::Io` if a file cannot be written
    pub async fn save(&self) -> Result<usize, StoreError> {
        let snapshot: Vec<(u32, T)> = self
            .memory
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect();

        for (champion_id, value) in &snapshot {
            let json = serde_json::to_vec(value).map_err(|source| StoreError::Serialize {
                champion_id: *champion_id,
                source,
            })?;
            let path = self.path_for(*champion_id);
            tokio::fs::write(&path, json)
                .await
                .map_err(|e| StoreError::io(&path, e))?;
        }

        debug!("Saved {} champion entries", snapshot.len());
        Ok(snapshot.len())
    }

    /// Delete every stored file and forget in-memory values
    ///
    /// Returns the number of files removed. A missing directory counts as
    /// already empty.
    ///
    /// # Errors
    /// - `StoreError::Io` if the directory cannot be listed or a file removed
    pub async fn clear(&self) -> Result<usize, StoreError> {
        self.memory.clear();

        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(StoreError::io(&self.dir, e)),
        };

        let mut removed = 0;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StoreError::io(&self.dir, e))?
        {
            let path = entry.path();
            let is_file = entry
                .file_type()
                .await
                .map_err(|e| StoreError::io(&path, e))?
                .is_file();
            if is_file {
                tokio::fs::remove_file(&path)
                    .await
                    .map_err(|e| StoreError::io(&path, e))?;
                removed += 1;
            }
        }

        info!("Cleared {} champion files from {}", removed, self.dir.display());
        Ok(removed)
    }

    /// Number of values held in memory
    #[inline]
    #[must_use]
    pub fn cached_len(&self) -> usize {
        self.memory.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        text: String,
    }

    fn note(text: &str) -> Note {
        Note {
            text: text.to_string(),
        }
    }

    #[tokio::test]
    async fn missing_champion_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store: ChampionStore<Note> = ChampionStore::new(dir.path());
        store.load().await.unwrap();
        assert_eq!(store.get(103).await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_stays_in_memory_until_save() {
        let dir = tempfile::tempdir().unwrap();
        let store = ChampionStore::new(dir.path());
        store.load().await.unwrap();

        store.set(103, note("mid"));
        assert!(!store.path_for(103).exists());
        assert_eq!(store.get(103).await.unwrap(), Some(note("mid")));

        assert_eq!(store.save().await.unwrap(), 1);
        assert!(store.path_for(103).exists());
    }

    #[tokio::test]
    async fn update_sees_current_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = ChampionStore::new(dir.path());
        store.load().await.unwrap();

        let first = store
            .update(22, |current| {
                assert!(current.is_none());
                note("first")
            })
            .await
            .unwrap();
        assert_eq!(first, note("first"));

        let second = store
            .update(22, |current| note(&format!("{}+", current.unwrap().text)))
            .await
            .unwrap();
        assert_eq!(second, note("first+"));
    }

    #[tokio::test]
    async fn corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let store: ChampionStore<Note> = ChampionStore::new(dir.path());
        store.load().await.unwrap();
        std::fs::write(store.path_for(7), b"{not json").unwrap();

        let err = store.get(7).await.unwrap_err();
        assert!(err.is_corrupt());
    }

    #[tokio::test]
    async fn clear_missing_directory_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let store: ChampionStore<Note> = ChampionStore::new(dir.path().join("never-created"));
        assert_eq!(store.clear().await.unwrap(), 0);
    }
}
