//! Validation predicates used at the form boundary.
//!
//! The store itself only rejects duplicate titles; length and required-ness
//! are checked here before a command reaches the store.

use eventboard_core::{BoardError, BoardResult};

use crate::Task;

pub const MAX_TASK_NAME_LEN: usize = 50;
pub const MAX_TASK_DETAILS_LEN: usize = 200;
pub const MAX_COLUMN_TITLE_LEN: usize = 10;

pub fn is_valid_task(task: &Task) -> bool {
    task.is_valid()
}

/// Column titles are required, at most ten characters, and unique
/// (case-sensitive) within their board.
pub fn is_valid_column_title<'a>(
    existing: impl IntoIterator<Item = &'a str>,
    candidate: &str,
) -> bool {
    validate_column_title(existing, candidate).is_ok()
}

/// Board titles are required and unique ignoring case.
pub fn is_valid_board_title<'a>(
    existing: impl IntoIterator<Item = &'a str>,
    candidate: &str,
) -> bool {
    validate_board_title(existing, candidate).is_ok()
}

pub fn validate_column_title<'a>(
    existing: impl IntoIterator<Item = &'a str>,
    candidate: &str,
) -> BoardResult<()> {
    if candidate.trim().is_empty() {
        return Err(BoardError::Validation(
            "column title is required".to_string(),
        ));
    }
    if candidate.chars().count() > MAX_COLUMN_TITLE_LEN {
        return Err(BoardError::Validation(format!(
            "column title must be at most {} characters",
            MAX_COLUMN_TITLE_LEN
        )));
    }
    if existing.into_iter().any(|title| title == candidate) {
        return Err(BoardError::DuplicateColumn(candidate.to_string()));
    }
    Ok(())
}

pub fn validate_board_title<'a>(
    existing: impl IntoIterator<Item = &'a str>,
    candidate: &str,
) -> BoardResult<()> {
    if candidate.trim().is_empty() {
        return Err(BoardError::Validation("board title is required".to_string()));
    }
    if existing.into_iter().any(|title| titles_match(title, candidate)) {
        return Err(BoardError::DuplicateTitle(candidate.to_string()));
    }
    Ok(())
}

pub(crate) fn validate_task_text(field: &str, value: &str, max_len: usize) -> BoardResult<()> {
    if value.trim().is_empty() {
        return Err(BoardError::Validation(format!("task {} is required", field)));
    }
    if value.chars().count() > max_len {
        return Err(BoardError::Validation(format!(
            "task {} must be at most {} characters",
            field, max_len
        )));
    }
    Ok(())
}

/// Case-insensitive board title comparison.
pub fn titles_match(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}
