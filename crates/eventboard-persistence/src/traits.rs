use async_trait::async_trait;
use chrono::{DateTime, Utc};
use eventboard_core::BoardResult;
use eventboard_domain::Board;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::serialization::JsonSerializer;

/// Metadata for persistence operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistenceMetadata {
    /// Version of the persistence format
    pub format_version: u32,
    /// ID of the session that performed the save
    pub instance_id: Uuid,
    /// When this data was saved
    pub saved_at: DateTime<Utc>,
}

impl PersistenceMetadata {
    pub fn new(format_version: u32, instance_id: Uuid) -> Self {
        Self {
            format_version,
            instance_id,
            saved_at: Utc::now(),
        }
    }
}

/// Point-in-time snapshot of the board collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    /// Raw JSON bytes of the board array
    pub data: Vec<u8>,
    /// Metadata about this snapshot
    pub metadata: PersistenceMetadata,
}

impl StoreSnapshot {
    pub fn from_boards(boards: &[Board], instance_id: Uuid) -> BoardResult<Self> {
        let data = JsonSerializer::to_bytes(boards)?;
        Ok(Self {
            data,
            metadata: PersistenceMetadata::new(FormatVersion::CURRENT.as_u32(), instance_id),
        })
    }
}

/// Trait for abstract storage operations
/// Implementations handle different backends (file, memory, ...)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PersistenceStore: Send + Sync {
    /// Save a snapshot to the store
    async fn save(&self, snapshot: StoreSnapshot) -> BoardResult<PersistenceMetadata>;

    /// Load the current snapshot. `Ok(None)` means nothing was stored yet.
    async fn load(&self) -> BoardResult<Option<StoreSnapshot>>;

    /// Check if anything has been stored
    async fn exists(&self) -> bool;

    /// Keep a copy of the stored data before hydration discards part of it.
    async fn backup(&self, reason: &str) -> BoardResult<()>;
}

/// Format versions for migration tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FormatVersion {
    /// Bare array of boards whose columns are top-level keys.
    V1,
    /// Versioned envelope around an array of boards with explicit columns.
    V2,
}

impl FormatVersion {
    pub const CURRENT: FormatVersion = FormatVersion::V2;

    pub fn as_u32(self) -> u32 {
        match self {
            Self::V1 => 1,
            Self::V2 => 2,
        }
    }

    pub fn from_u32(v: u32) -> Option<Self> {
        match v {
            1 => Some(Self::V1),
            2 => Some(Self::V2),
            _ => None,
        }
    }
}
