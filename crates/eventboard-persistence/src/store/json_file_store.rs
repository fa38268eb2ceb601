use crate::migration::Migrator;
use crate::store::atomic_writer::AtomicWriter;
use crate::traits::{FormatVersion, PersistenceMetadata, PersistenceStore, StoreSnapshot};
use async_trait::async_trait;
use eventboard_core::{BoardError, BoardResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Suffix of the copy kept when a file cannot be read as boards.
pub const CORRUPT_BACKUP_SUFFIX: &str = ".corrupt";
/// Suffix of the copy kept before a V1 file is rewritten.
pub const V1_BACKUP_SUFFIX: &str = ".v1.backup";

/// JSON file-based persistence store
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

/// Wrapper structure for the JSON file format v2
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonEnvelope {
    pub version: u32,
    pub metadata: PersistenceMetadata,
    pub data: Value,
}

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Keep a copy of an unreadable file so the next save cannot destroy it.
    async fn quarantine(&self, reason: &str) {
        tracing::warn!("{} is not a board file: {}", self.path.display(), reason);
        if let Err(e) = AtomicWriter::backup(&self.path, CORRUPT_BACKUP_SUFFIX).await {
            tracing::error!("Failed to back up {}: {}", self.path.display(), e);
        }
    }

    async fn write_envelope(&self, envelope: &JsonEnvelope) -> BoardResult<usize> {
        let json_bytes = serde_json::to_vec_pretty(envelope)
            .map_err(|e| BoardError::Serialization(e.to_string()))?;
        AtomicWriter::write_atomic(&self.path, &json_bytes).await?;
        Ok(json_bytes.len())
    }

    /// Rewrite a V1 file as V2, keeping the original alongside.
    async fn upgrade_file(&self, boards: &Value) -> BoardResult<PersistenceMetadata> {
        AtomicWriter::backup(&self.path, V1_BACKUP_SUFFIX).await?;
        let metadata = upgrade_metadata();
        self.write_envelope(&JsonEnvelope {
            version: FormatVersion::CURRENT.as_u32(),
            metadata: metadata.clone(),
            data: boards.clone(),
        })
        .await?;
        tracing::info!("Rewrote {} in V2 format", self.path.display());
        Ok(metadata)
    }
}

#[async_trait]
impl PersistenceStore for JsonFileStore {
    async fn save(&self, mut snapshot: StoreSnapshot) -> BoardResult<PersistenceMetadata> {
        snapshot.metadata.saved_at = chrono::Utc::now();

        let data: Value = serde_json::from_slice(&snapshot.data)
            .map_err(|e| BoardError::Serialization(e.to_string()))?;
        let envelope = JsonEnvelope {
            version: FormatVersion::CURRENT.as_u32(),
            metadata: snapshot.metadata.clone(),
            data,
        };

        let written = self
            .write_envelope(&envelope)
            .await
            .map_err(|e| BoardError::Persistence(e.to_string()))?;

        tracing::info!("Saved {} bytes to {}", written, self.path.display());
        Ok(snapshot.metadata)
    }

    async fn load(&self) -> BoardResult<Option<StoreSnapshot>> {
        if !self.exists().await {
            tracing::debug!("No data at {}", self.path.display());
            return Ok(None);
        }

        let file_bytes = AtomicWriter::read_all(&self.path).await?;
        let value: Value = match serde_json::from_slice(&file_bytes) {
            Ok(value) => value,
            Err(e) => {
                self.quarantine(&e.to_string()).await;
                return Err(BoardError::MalformedData(e.to_string()));
            }
        };

        let version = match Migrator::detect_version(&value) {
            Ok(version) => version,
            Err(e) => {
                self.quarantine(&e.to_string()).await;
                return Err(e);
            }
        };

        let (boards, metadata) = match version {
            FormatVersion::V1 => {
                tracing::info!(
                    "Detected V1 format at {}. Starting migration to V2...",
                    self.path.display()
                );
                let boards = Migrator::migrate(FormatVersion::V1, FormatVersion::V2, value)?;
                let metadata = match self.upgrade_file(&boards).await {
                    Ok(metadata) => metadata,
                    Err(e) => {
                        // Data is usable in memory; the next save writes V2 anyway.
                        tracing::warn!("Could not rewrite {}: {}", self.path.display(), e);
                        upgrade_metadata()
                    }
                };
                (boards, metadata)
            }
            FormatVersion::V2 => {
                let envelope: JsonEnvelope = match serde_json::from_value(value) {
                    Ok(envelope) => envelope,
                    Err(e) => {
                        self.quarantine(&e.to_string()).await;
                        return Err(BoardError::MalformedData(e.to_string()));
                    }
                };
                (envelope.data, envelope.metadata)
            }
        };

        let data =
            serde_json::to_vec(&boards).map_err(|e| BoardError::Serialization(e.to_string()))?;

        tracing::info!(
            "Loaded {} bytes from {}",
            file_bytes.len(),
            self.path.display()
        );
        Ok(Some(StoreSnapshot { data, metadata }))
    }

    async fn exists(&self) -> bool {
        tokio::fs::try_exists(&self.path).await.unwrap_or(false)
    }

    async fn backup(&self, reason: &str) -> BoardResult<()> {
        tracing::warn!("Keeping a copy of {}: {}", self.path.display(), reason);
        AtomicWriter::backup(&self.path, CORRUPT_BACKUP_SUFFIX).await?;
        Ok(())
    }
}

/// A V1 rewrite is not performed by any session.
fn upgrade_metadata() -> PersistenceMetadata {
    PersistenceMetadata::new(FormatVersion::CURRENT.as_u32(), Uuid::nil())
}
