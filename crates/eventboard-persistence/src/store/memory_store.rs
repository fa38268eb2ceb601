use crate::traits::{PersistenceMetadata, PersistenceStore, StoreSnapshot};
use async_trait::async_trait;
use eventboard_core::{BoardError, BoardResult};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// In-memory store for sessions without a data file and for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    snapshot: Mutex<Option<StoreSnapshot>>,
    fail_saves: AtomicBool,
    save_count: AtomicUsize,
    backups: Mutex<Vec<StoreSnapshot>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: StoreSnapshot) -> Self {
        Self {
            snapshot: Mutex::new(Some(snapshot)),
            ..Self::default()
        }
    }

    /// Make every following save fail until switched off again.
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Successful saves so far.
    pub fn save_count(&self) -> usize {
        self.save_count.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> Option<StoreSnapshot> {
        self.snapshot.lock().ok().and_then(|guard| guard.clone())
    }

    /// Copies taken through [`PersistenceStore::backup`], oldest first.
    pub fn backups(&self) -> Vec<StoreSnapshot> {
        self.backups
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl PersistenceStore for MemoryStore {
    async fn save(&self, snapshot: StoreSnapshot) -> BoardResult<PersistenceMetadata> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(BoardError::Persistence("memory store rejects saves".to_string()));
        }
        let metadata = snapshot.metadata.clone();
        let mut guard = self
            .snapshot
            .lock()
            .map_err(|e| BoardError::Persistence(e.to_string()))?;
        *guard = Some(snapshot);
        self.save_count.fetch_add(1, Ordering::SeqCst);
        Ok(metadata)
    }

    async fn load(&self) -> BoardResult<Option<StoreSnapshot>> {
        Ok(self.snapshot())
    }

    async fn exists(&self) -> bool {
        self.snapshot().is_some()
    }

    async fn backup(&self, reason: &str) -> BoardResult<()> {
        let Some(snapshot) = self.snapshot() else {
            return Ok(());
        };
        tracing::warn!("Keeping a copy of the stored boards: {}", reason);
        self.backups
            .lock()
            .map_err(|e| BoardError::Persistence(e.to_string()))?
            .push(snapshot);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventboard_domain::Board;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_save_then_load() {
        let store = MemoryStore::new();
        assert!(!store.exists().await);

        let snapshot = StoreSnapshot::from_boards(&[Board::new("Trip")], Uuid::new_v4()).unwrap();
        store.save(snapshot.clone()).await.unwrap();

        assert!(store.exists().await);
        assert_eq!(store.load().await.unwrap(), Some(snapshot));
        assert_eq!(store.save_count(), 1);
    }

    #[tokio::test]
    async fn test_injected_failure() {
        let store = MemoryStore::new();
        store.set_fail_saves(true);

        let snapshot = StoreSnapshot::from_boards(&[], Uuid::new_v4()).unwrap();
        let err = store.save(snapshot).await.unwrap_err();
        assert!(matches!(err, BoardError::Persistence(_)));
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_backup_keeps_current_snapshot() {
        let store = MemoryStore::new();
        store.backup("nothing stored").await.unwrap();
        assert!(store.backups().is_empty());

        let snapshot = StoreSnapshot::from_boards(&[Board::new("Trip")], Uuid::new_v4()).unwrap();
        store.save(snapshot.clone()).await.unwrap();
        store.backup("board #0 unreadable").await.unwrap();
        assert_eq!(store.backups(), vec![snapshot]);
    }
}
