//! Board statistics.
//!
//! Counts only valid tasks. Rates are whole percentages of the total,
//! rounded half-up, and 0 on an empty board.

use serde::Serialize;

use crate::column::{is_default_column, COMPLETED_COLUMN, IN_PROGRESS_COLUMN, TODO_COLUMN};
use crate::Board;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnStatistics {
    pub title: String,
    pub count: usize,
    pub rate: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardStatistics {
    /// One entry per column, in board order.
    pub columns: Vec<ColumnStatistics>,
    pub total: usize,
    pub todo_count: usize,
    pub in_progress_count: usize,
    pub completed_count: usize,
    /// Tasks in user-defined columns combined.
    pub custom_count: usize,
    pub todo_rate: u32,
    pub in_progress_rate: u32,
    pub completion_rate: u32,
    pub custom_rate: u32,
    pub custom_columns: Vec<String>,
}

impl BoardStatistics {
    pub fn column(&self, title: &str) -> Option<&ColumnStatistics> {
        self.columns.iter().find(|c| c.title == title)
    }
}

pub fn compute_statistics(board: &Board) -> BoardStatistics {
    let counts: Vec<(&str, usize)> = board
        .columns
        .iter()
        .map(|column| (column.title.as_str(), column.valid_task_count()))
        .collect();
    let total: usize = counts.iter().map(|(_, count)| count).sum();

    let count_of = |title: &str| {
        counts
            .iter()
            .find(|(t, _)| *t == title)
            .map_or(0, |(_, count)| *count)
    };
    let todo_count = count_of(TODO_COLUMN);
    let in_progress_count = count_of(IN_PROGRESS_COLUMN);
    let completed_count = count_of(COMPLETED_COLUMN);

    let custom: Vec<(&str, usize)> = counts
        .iter()
        .copied()
        .filter(|(title, _)| !is_default_column(title))
        .collect();
    let custom_count = custom.iter().map(|(_, count)| count).sum();

    BoardStatistics {
        columns: counts
            .iter()
            .map(|(title, count)| ColumnStatistics {
                title: title.to_string(),
                count: *count,
                rate: percentage(*count, total),
            })
            .collect(),
        total,
        todo_count,
        in_progress_count,
        completed_count,
        custom_count,
        todo_rate: percentage(todo_count, total),
        in_progress_rate: percentage(in_progress_count, total),
        completion_rate: percentage(completed_count, total),
        custom_rate: percentage(custom_count, total),
        custom_columns: custom.iter().map(|(title, _)| title.to_string()).collect(),
    }
}

/// `round(100 * count / total)` in integer arithmetic, halves rounding up.
fn percentage(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let rounded = (200 * count + total) / (2 * total);
    u32::try_from(rounded).unwrap_or(u32::MAX)
}
