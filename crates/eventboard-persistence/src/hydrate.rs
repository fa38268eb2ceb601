//! Startup load of the board collection.
//!
//! Hydration never fails: missing or unreadable data falls back to a single
//! default board, and boards written by older versions are back-filled.
//! Whenever stored data is discarded the store is asked for a backup first,
//! so the next save cannot silently destroy it.

use eventboard_core::AppConfig;
use eventboard_domain::{Board, BoardCollection};
use serde_json::Value;

use crate::serialization::JsonSerializer;
use crate::traits::PersistenceStore;

/// Where the hydrated collection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HydrationSource {
    /// Stored boards were loaded.
    Stored,
    /// Nothing was stored yet.
    Fresh,
    /// Stored data could not be used.
    Recovered,
}

#[derive(Debug, Clone)]
pub struct Hydrated {
    pub collection: BoardCollection,
    pub source: HydrationSource,
    /// At least one stored board needed back-filling.
    pub backfilled: bool,
    /// Stored boards that could not be read and were left out.
    pub discarded: usize,
    /// Unreadable history entries dropped from boards that were kept.
    pub dropped_entries: usize,
}

pub async fn hydrate(store: &dyn PersistenceStore, config: &AppConfig) -> Hydrated {
    let default_title = config.effective_default_board_title();

    let snapshot = match store.load().await {
        Ok(Some(snapshot)) => snapshot,
        Ok(None) => {
            tracing::info!("No stored boards, starting with '{}'", default_title);
            return Hydrated {
                collection: BoardCollection::new(default_title),
                source: HydrationSource::Fresh,
                backfilled: false,
                discarded: 0,
                dropped_entries: 0,
            };
        }
        Err(e) => {
            tracing::warn!("Failed to load boards, starting fresh: {}", e);
            return recovered(default_title);
        }
    };

    let entries: Vec<Value> = match JsonSerializer::from_bytes(&snapshot.data) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!("Stored boards are not an array, starting fresh: {}", e);
            keep_copy(store, "stored boards are not an array").await;
            return recovered(default_title);
        }
    };

    let mut backfilled = false;
    let mut discarded = 0;
    let mut dropped_entries = 0;
    let boards: Vec<Board> = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            let stored_entries = stored_history_len(&entry);
            match serde_json::from_value::<Board>(entry) {
                Ok(mut board) => {
                    dropped_entries += stored_entries.saturating_sub(board.history.len());
                    backfilled |= board.backfill();
                    Some(board)
                }
                Err(e) => {
                    tracing::warn!("Skipping unreadable board #{}: {}", index, e);
                    discarded += 1;
                    None
                }
            }
        })
        .collect();

    if discarded > 0 || dropped_entries > 0 {
        let reason = format!(
            "{} unreadable boards, {} unreadable history entries",
            discarded, dropped_entries
        );
        keep_copy(store, &reason).await;
    }

    tracing::info!("Hydrated {} boards", boards.len());
    Hydrated {
        collection: BoardCollection::from_boards(boards, default_title),
        source: HydrationSource::Stored,
        backfilled,
        discarded,
        dropped_entries,
    }
}

/// Entries in the stored `history` value; anything but a list counts as one.
fn stored_history_len(board: &Value) -> usize {
    match board.get("history") {
        Some(Value::Array(entries)) => entries.len(),
        Some(Value::Null) | None => 0,
        Some(_) => 1,
    }
}

async fn keep_copy(store: &dyn PersistenceStore, reason: &str) {
    if let Err(e) = store.backup(reason).await {
        tracing::error!("Failed to back up stored boards: {}", e);
    }
}

fn recovered(default_title: &str) -> Hydrated {
    Hydrated {
        collection: BoardCollection::new(default_title),
        source: HydrationSource::Recovered,
        backfilled: false,
        discarded: 0,
        dropped_entries: 0,
    }
}
