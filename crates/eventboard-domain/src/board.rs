//! Board aggregate and the column/task store operations.
//!
//! Every operation borrows the current board and returns the next one;
//! the previous value is never touched. Stale references (unknown column,
//! task id or index) are absorbed as no-ops, duplicate column titles are
//! reported as errors.

use eventboard_core::{BoardError, BoardResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::column::{default_color_for, Column, DEFAULT_COLUMNS, USER_COLUMN_COLOR};
use crate::history::{HistoryEntry, Loggable};
use crate::task::{Task, TaskFields, TaskId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub title: String,
    #[serde(default)]
    pub column_colors: BTreeMap<String, String>,
    #[serde(
        default,
        deserialize_with = "crate::history::entries_skipping_unreadable"
    )]
    pub history: Vec<HistoryEntry>,
    #[serde(default)]
    pub columns: Vec<Column>,
}

impl Board {
    /// A fresh board with the three default columns and a creation entry.
    pub fn new(title: impl Into<String>) -> Self {
        let title = title.into();
        let columns: Vec<Column> = DEFAULT_COLUMNS.iter().map(|t| Column::new(*t)).collect();
        let column_colors = DEFAULT_COLUMNS
            .iter()
            .map(|t| (t.to_string(), default_color_for(t).to_string()))
            .collect();
        let history = vec![HistoryEntry::create_event(&title)];
        Self {
            title,
            column_colors,
            history,
            columns,
        }
    }

    pub fn column_titles(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.title.as_str()).collect()
    }

    pub fn column(&self, title: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.title == title)
    }

    pub fn column_index(&self, title: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.title == title)
    }

    fn column_mut(&mut self, title: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.title == title)
    }

    pub fn color_of(&self, title: &str) -> &str {
        self.column_colors
            .get(title)
            .map(String::as_str)
            .unwrap_or_else(|| default_color_for(title))
    }

    /// Locate a valid task anywhere on the board.
    pub fn find_task(&self, task_id: &str) -> Option<(&Column, &Task)> {
        self.columns
            .iter()
            .find_map(|column| column.task(task_id).map(|task| (column, task)))
    }

    pub fn valid_task_count(&self) -> usize {
        self.columns.iter().map(Column::valid_task_count).sum()
    }

    /// Bring data written by older versions up to the current invariants:
    /// every column has a color, no color outlives its column, and the
    /// history log is never empty. Returns whether anything changed.
    pub fn backfill(&mut self) -> bool {
        let mut changed = false;

        for column in &self.columns {
            if !self.column_colors.contains_key(&column.title) {
                self.column_colors.insert(
                    column.title.clone(),
                    default_color_for(&column.title).to_string(),
                );
                changed = true;
            }
        }

        let before = self.column_colors.len();
        let titles: Vec<String> = self.columns.iter().map(|c| c.title.clone()).collect();
        self.column_colors.retain(|title, _| titles.contains(title));
        changed |= self.column_colors.len() != before;

        if self.history.is_empty() {
            self.history.push(HistoryEntry::create_event(&self.title));
            changed = true;
        }

        changed
    }

    /// Copy of this board under a new title, logged as an edit.
    pub fn renamed(&self, new_title: &str) -> Board {
        let mut next = self.clone();
        next.title = new_title.to_string();
        next.record(HistoryEntry::edit_event(&self.title, new_title));
        next
    }

    pub fn add_column(&self, title: &str) -> BoardResult<Board> {
        if self.column(title).is_some() {
            return Err(BoardError::DuplicateColumn(title.to_string()));
        }

        let mut next = self.clone();
        next.columns.push(Column::new(title));
        next.column_colors
            .insert(title.to_string(), USER_COLUMN_COLOR.to_string());
        next.record(HistoryEntry::create_column(title));

        tracing::debug!("Added column '{}' to board '{}'", title, self.title);
        Ok(next)
    }

    /// Removes the column, its tasks and its color. Default columns are not
    /// protected here.
    pub fn delete_column(&self, title: &str) -> Board {
        let Some(index) = self.column_index(title) else {
            tracing::debug!("Delete of unknown column '{}' ignored", title);
            return self.clone();
        };

        let mut next = self.clone();
        let removed = next.columns.remove(index);
        next.column_colors.remove(title);
        next.record(HistoryEntry::delete_column(
            title,
            removed.valid_task_count(),
        ));
        next
    }

    pub fn rename_column(&self, old_title: &str, new_title: &str) -> BoardResult<Board> {
        if old_title == new_title {
            return Ok(self.clone());
        }
        if self.column(old_title).is_none() {
            tracing::debug!("Rename of unknown column '{}' ignored", old_title);
            return Ok(self.clone());
        }
        if self.column(new_title).is_some() {
            return Err(BoardError::DuplicateColumn(new_title.to_string()));
        }

        let mut next = self.clone();
        if let Some(column) = next.column_mut(old_title) {
            column.title = new_title.to_string();
        }
        let color = next
            .column_colors
            .remove(old_title)
            .unwrap_or_else(|| default_color_for(old_title).to_string());
        next.column_colors.insert(new_title.to_string(), color);
        next.record(HistoryEntry::edit_column(old_title, new_title));
        Ok(next)
    }

    /// Cosmetic change; deliberately leaves no history entry.
    pub fn set_column_color(&self, title: &str, color: &str) -> Board {
        if self.column(title).is_none() {
            return self.clone();
        }
        let mut next = self.clone();
        next.column_colors
            .insert(title.to_string(), color.to_string());
        next
    }

    pub fn add_task(&self, column_title: &str, fields: TaskFields) -> Board {
        self.add_task_with_id(column_title, fields).0
    }

    /// Like [`Board::add_task`] but also hands back the generated id.
    pub fn add_task_with_id(&self, column_title: &str, fields: TaskFields) -> (Board, Option<TaskId>) {
        if self.column(column_title).is_none() {
            tracing::debug!("Add task to unknown column '{}' ignored", column_title);
            return (self.clone(), None);
        }

        let task = Task::new(fields);
        let id = task.id.clone();
        let entry = HistoryEntry::create_task(&task.name, column_title);

        let mut next = self.clone();
        if let Some(column) = next.column_mut(column_title) {
            column.tasks.push(task);
        }
        next.record(entry);
        (next, Some(id))
    }

    /// Removes by identity, never by displayed index.
    pub fn remove_task(&self, column_title: &str, task_id: &str) -> Board {
        let Some(index) = self
            .column(column_title)
            .and_then(|c| c.position_of(task_id))
        else {
            tracing::debug!("Remove of unknown task {} ignored", task_id);
            return self.clone();
        };

        let mut next = self.clone();
        if let Some(column) = next.column_mut(column_title) {
            let removed = column.tasks.remove(index);
            next.record(HistoryEntry::delete_task(&removed.name, column_title));
        }
        next
    }

    /// Replaces the mutable fields in place; id and position are kept.
    pub fn update_task(&self, column_title: &str, task_id: &str, fields: TaskFields) -> Board {
        let Some(index) = self
            .column(column_title)
            .and_then(|c| c.position_of(task_id))
        else {
            tracing::debug!("Update of unknown task {} ignored", task_id);
            return self.clone();
        };

        let mut next = self.clone();
        if let Some(column) = next.column_mut(column_title) {
            let task = &mut column.tasks[index];
            let old_name = std::mem::take(&mut task.name);
            task.apply(fields);
            let entry = HistoryEntry::edit_task(&old_name, &task.name, column_title);
            next.record(entry);
        }
        next
    }

    /// Move the column at `from` to `to` in the column order. Contents and
    /// colors are untouched.
    pub fn reorder_column(&self, from: usize, to: usize) -> Board {
        if from >= self.columns.len() {
            return self.clone();
        }
        let to = to.min(self.columns.len() - 1);
        if from == to {
            return self.clone();
        }

        let mut next = self.clone();
        let column = next.columns.remove(from);
        let entry = HistoryEntry::move_column(&column.title, from, to);
        next.columns.insert(to, column);
        next.record(entry);
        next
    }

    /// Move a task by storage indices. Same-column moves are silent,
    /// cross-column moves are logged.
    pub fn move_task(
        &self,
        source_column: &str,
        source_index: usize,
        dest_column: &str,
        dest_index: usize,
    ) -> Board {
        let movable = self
            .column(source_column)
            .and_then(|c| c.tasks.get(source_index))
            .is_some_and(Task::is_valid);
        if !movable || self.column(dest_column).is_none() {
            tracing::debug!(
                "Move from {}[{}] to {} ignored",
                source_column,
                source_index,
                dest_column
            );
            return self.clone();
        }

        let mut next = self.clone();

        if source_column == dest_column {
            if source_index == dest_index {
                return next;
            }
            if let Some(column) = next.column_mut(source_column) {
                let task = column.tasks.remove(source_index);
                let to = dest_index.min(column.tasks.len());
                column.tasks.insert(to, task);
            }
            return next;
        }

        let task = match next.column_mut(source_column) {
            Some(column) => column.tasks.remove(source_index),
            None => return self.clone(),
        };
        let entry = HistoryEntry::move_task(&task.name, source_column, dest_column);
        if let Some(column) = next.column_mut(dest_column) {
            let to = dest_index.min(column.tasks.len());
            column.tasks.insert(to, task);
        }
        next.record(entry);
        next
    }
}

impl Loggable for Board {
    fn record(&mut self, entry: HistoryEntry) {
        self.history.push(entry);
    }

    fn history(&self) -> &[HistoryEntry] {
        &self.history
    }
}
