//! Board session with fire-and-forget saving.
//!
//! Commands run synchronously against the in-memory workspace, which stays
//! authoritative. Each state change queues a snapshot for the save worker;
//! save failures are logged and dropped, never retried.

use std::sync::Arc;

use eventboard_core::BoardResult;
use eventboard_domain::commands::Command;
use eventboard_domain::Workspace;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::traits::{PersistenceStore, StoreSnapshot};

pub struct BoardSession {
    workspace: Workspace,
    instance_id: Uuid,
    save_tx: Option<mpsc::UnboundedSender<StoreSnapshot>>,
}

impl BoardSession {
    /// Create a session and the receiver its snapshots are queued on.
    pub fn new(workspace: Workspace) -> (Self, mpsc::UnboundedReceiver<StoreSnapshot>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let session = Self {
            workspace,
            instance_id: Uuid::new_v4(),
            save_tx: Some(tx),
        };
        (session, rx)
    }

    /// Create a session and spawn its save worker on the current runtime.
    pub fn spawn(workspace: Workspace, store: Arc<dyn PersistenceStore>) -> (Self, JoinHandle<()>) {
        let (session, rx) = Self::new(workspace);
        let handle = tokio::spawn(SaveWorker::new(store, rx).run());
        (session, handle)
    }

    /// A session that never saves.
    pub fn detached(workspace: Workspace) -> Self {
        Self {
            workspace,
            instance_id: Uuid::new_v4(),
            save_tx: None,
        }
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn instance_id(&self) -> Uuid {
        self.instance_id
    }

    /// Run a command. On success the new state replaces the old one and, if
    /// anything changed, a snapshot is queued. On error nothing changes and
    /// the error is handed back for display.
    pub fn execute(&mut self, command: &dyn Command) -> BoardResult<()> {
        let description = command.description();
        tracing::debug!("Executing: {}", description);

        let next = command.execute(&self.workspace)?;
        if next == self.workspace {
            tracing::trace!("No change from: {}", description);
            return Ok(());
        }
        self.workspace = next;
        self.queue_snapshot();
        Ok(())
    }

    /// Run commands in order, stopping at the first error.
    pub fn execute_batch(&mut self, commands: &[&dyn Command]) -> BoardResult<()> {
        for command in commands {
            self.execute(*command)?;
        }
        Ok(())
    }

    fn queue_snapshot(&self) {
        let Some(ref tx) = self.save_tx else {
            tracing::debug!("No save channel available - skipping save");
            return;
        };
        let snapshot = match StoreSnapshot::from_boards(self.workspace.boards(), self.instance_id) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::error!("Failed to build snapshot: {}", e);
                return;
            }
        };
        if let Err(e) = tx.send(snapshot) {
            tracing::error!("Failed to queue save: channel closed: {:?}", e);
        }
    }

    /// Close the save channel so the worker drains what is queued and exits.
    pub fn close_save_channel(&mut self) {
        self.save_tx = None;
    }

    pub fn has_save_channel(&self) -> bool {
        self.save_tx.is_some()
    }
}

/// Drains queued snapshots into a store.
pub struct SaveWorker {
    store: Arc<dyn PersistenceStore>,
    rx: mpsc::UnboundedReceiver<StoreSnapshot>,
}

impl SaveWorker {
    pub fn new(store: Arc<dyn PersistenceStore>, rx: mpsc::UnboundedReceiver<StoreSnapshot>) -> Self {
        Self { store, rx }
    }

    /// Runs until every sender is dropped. When several snapshots are
    /// waiting only the newest is written.
    pub async fn run(mut self) {
        while let Some(mut snapshot) = self.rx.recv().await {
            let mut skipped = 0usize;
            while let Ok(newer) = self.rx.try_recv() {
                snapshot = newer;
                skipped += 1;
            }
            if skipped > 0 {
                tracing::debug!("Coalesced {} queued snapshots", skipped);
            }

            match self.store.save(snapshot).await {
                Ok(metadata) => tracing::debug!("Saved snapshot at {}", metadata.saved_at),
                Err(e) => tracing::error!("Save failed, keeping in-memory state: {}", e),
            }
        }
        tracing::debug!("Save channel closed, worker exiting");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::MockPersistenceStore;
    use eventboard_core::BoardError;
    use eventboard_domain::commands::{AddColumn, CreateBoard, SelectBoard};

    #[test]
    fn test_execute_queues_snapshot_on_change() {
        let (mut session, mut rx) = BoardSession::new(Workspace::default());

        session
            .execute(&CreateBoard {
                title: "Trip".to_string(),
            })
            .unwrap();

        let snapshot = rx.try_recv().unwrap();
        let boards: serde_json::Value = serde_json::from_slice(&snapshot.data).unwrap();
        assert_eq!(boards[1]["title"], "Trip");
        assert_eq!(snapshot.metadata.instance_id, session.instance_id());
    }

    #[test]
    fn test_failed_command_queues_nothing() {
        let (mut session, mut rx) = BoardSession::new(Workspace::default());

        let err = session
            .execute(&AddColumn {
                title: "To do".to_string(),
            })
            .unwrap_err();
        assert!(matches!(err, BoardError::DuplicateColumn(_)));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_noop_command_queues_nothing() {
        let (mut session, mut rx) = BoardSession::new(Workspace::default());
        session
            .execute(&SelectBoard {
                title: "Missing".to_string(),
            })
            .unwrap();
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_detached_session_still_applies_commands() {
        let mut session = BoardSession::detached(Workspace::default());
        session
            .execute(&CreateBoard {
                title: "Trip".to_string(),
            })
            .unwrap();
        assert!(!session.has_save_channel());
        assert_eq!(session.workspace().boards().len(), 2);
    }

    #[tokio::test]
    async fn test_worker_swallows_save_failures() {
        let mut store = MockPersistenceStore::new();
        store
            .expect_save()
            .returning(|_| Err(BoardError::Persistence("disk full".to_string())));

        let (mut session, handle) = BoardSession::spawn(Workspace::default(), Arc::new(store));
        session
            .execute(&CreateBoard {
                title: "Trip".to_string(),
            })
            .unwrap();
        session.close_save_channel();

        handle.await.unwrap();
        assert_eq!(session.workspace().boards().len(), 2);
    }

    #[tokio::test]
    async fn test_worker_writes_newest_snapshot_last() {
        let store = Arc::new(crate::MemoryStore::new());
        let (mut session, rx) = BoardSession::new(Workspace::default());

        for title in ["Trip", "Party", "Move"] {
            session
                .execute(&CreateBoard {
                    title: title.to_string(),
                })
                .unwrap();
        }
        session.close_save_channel();

        SaveWorker::new(store.clone(), rx).run().await;

        let saved = store.snapshot().unwrap();
        let boards: serde_json::Value = serde_json::from_slice(&saved.data).unwrap();
        assert_eq!(boards.as_array().unwrap().len(), 4);
        assert_eq!(store.save_count(), 1);
    }
}
