//! Append-only audit log attached to every board.
//!
//! Entries are never edited or removed. The `desc` label has the form
//! `"<headline>-<subject>"`, which the timeline splits for display.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::Board;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HistoryKind {
    CreateEvent,
    EditEvent,
    DeleteEvent,
    CreateColumn,
    EditColumn,
    DeleteColumn,
    CreateTask,
    EditTask,
    DeleteTask,
    MoveTask,
    MoveColumn,
}

/// Coarse classification used by the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryAction {
    Create,
    Edit,
    Delete,
    Move,
}

impl HistoryKind {
    pub fn action(self) -> HistoryAction {
        match self {
            Self::CreateEvent | Self::CreateColumn | Self::CreateTask => HistoryAction::Create,
            Self::EditEvent | Self::EditColumn | Self::EditTask => HistoryAction::Edit,
            Self::DeleteEvent | Self::DeleteColumn | Self::DeleteTask => HistoryAction::Delete,
            Self::MoveTask | Self::MoveColumn => HistoryAction::Move,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(rename = "type")]
    pub kind: HistoryKind,
    /// Epoch when the stored entry carries no readable date.
    #[serde(
        rename = "date",
        alias = "timestamp",
        default,
        serialize_with = "chrono::serde::ts_milliseconds::serialize",
        deserialize_with = "lenient_timestamp"
    )]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub details: String,
    /// Always `None` until boards gain authenticated users.
    #[serde(default)]
    pub user: Option<String>,
}

impl HistoryEntry {
    pub fn new(kind: HistoryKind, desc: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            kind,
            // Stored as epoch milliseconds; keep memory and disk identical.
            timestamp: Utc::now().trunc_subsecs(3),
            desc: desc.into(),
            details: details.into(),
            user: None,
        }
    }

    pub fn create_event(title: &str) -> Self {
        let label = format!("Create event-{}", title);
        Self::new(HistoryKind::CreateEvent, label.clone(), label)
    }

    pub fn edit_event(old_title: &str, new_title: &str) -> Self {
        Self::new(
            HistoryKind::EditEvent,
            format!("Edit event-{}", new_title),
            format!("Rename event-from \"{}\" to \"{}\"", old_title, new_title),
        )
    }

    pub fn delete_event(title: &str, carried_entries: usize) -> Self {
        Self::new(
            HistoryKind::DeleteEvent,
            format!("Delete event-{}", title),
            format!(
                "Delete event-{} with {} history entries",
                title, carried_entries
            ),
        )
    }

    pub fn create_column(title: &str) -> Self {
        let label = format!("Create column-{}", title);
        Self::new(HistoryKind::CreateColumn, label.clone(), label)
    }

    pub fn edit_column(old_title: &str, new_title: &str) -> Self {
        Self::new(
            HistoryKind::EditColumn,
            format!("Edit column-{}", old_title),
            format!("Rename column-from \"{}\" to \"{}\"", old_title, new_title),
        )
    }

    pub fn delete_column(title: &str, removed_tasks: usize) -> Self {
        Self::new(
            HistoryKind::DeleteColumn,
            format!("Delete column-{}", title),
            format!("Delete column-{} and its {} tasks", title, removed_tasks),
        )
    }

    pub fn create_task(name: &str, column: &str) -> Self {
        Self::new(
            HistoryKind::CreateTask,
            format!("Create task-{}", name),
            format!("Create task-{} in column {}", name, column),
        )
    }

    pub fn edit_task(old_name: &str, new_name: &str, column: &str) -> Self {
        Self::new(
            HistoryKind::EditTask,
            format!("Edit task-{}", old_name),
            format!(
                "Edit task in column {}-from \"{}\" to \"{}\"",
                column, old_name, new_name
            ),
        )
    }

    pub fn delete_task(name: &str, column: &str) -> Self {
        Self::new(
            HistoryKind::DeleteTask,
            format!("Delete task-{}", name),
            format!("Delete task-{} from column {}", name, column),
        )
    }

    pub fn move_task(name: &str, from: &str, to: &str) -> Self {
        Self::new(
            HistoryKind::MoveTask,
            format!("Move task-{}", name),
            format!("Move task-{} from {} to {}", name, from, to),
        )
    }

    pub fn move_column(title: &str, from: usize, to: usize) -> Self {
        Self::new(
            HistoryKind::MoveColumn,
            format!("Move column-{}", title),
            format!(
                "Move column-{} from position {} to {}",
                title,
                from + 1,
                to + 1
            ),
        )
    }

    /// Part of `desc` before the first `-`.
    pub fn headline(&self) -> &str {
        self.desc
            .split_once('-')
            .map_or(self.desc.as_str(), |(head, _)| head)
    }

    /// Part of `desc` after the first `-`, empty when there is none.
    pub fn subject(&self) -> &str {
        self.desc.split_once('-').map_or("", |(_, rest)| rest)
    }

    pub fn action(&self) -> HistoryAction {
        self.kind.action()
    }
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let parsed = match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .and_then(DateTime::from_timestamp_millis),
        Value::String(s) => DateTime::parse_from_rfc3339(&s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
            .or_else(|| s.parse::<i64>().ok().and_then(DateTime::from_timestamp_millis)),
        _ => None,
    };
    Ok(parsed.unwrap_or_default())
}

/// Reads a stored history log one entry at a time. Entries that still
/// cannot be read (unknown `type`, not an object) are dropped on their own
/// so the rest of the board survives.
pub(crate) fn entries_skipping_unreadable<'de, D>(
    deserializer: D,
) -> Result<Vec<HistoryEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Array(raw) = Value::deserialize(deserializer)? else {
        tracing::warn!("History is not a list, starting an empty log");
        return Ok(Vec::new());
    };
    Ok(raw
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("Dropping unreadable history entry #{}: {}", index, e);
                None
            }
        })
        .collect())
}

/// Entities carrying an append-only history log.
pub trait Loggable {
    fn record(&mut self, entry: HistoryEntry);
    fn history(&self) -> &[HistoryEntry];
}

/// History of a board, newest first.
pub fn timeline(board: &Board) -> Vec<&HistoryEntry> {
    board.history().iter().rev().collect()
}
