//! The ordered, never-empty collection of boards.

use eventboard_core::config::DEFAULT_BOARD_TITLE;
use eventboard_core::{BoardError, BoardResult};

use crate::history::{HistoryEntry, Loggable};
use crate::validation::titles_match;
use crate::Board;

#[derive(Debug, Clone, PartialEq)]
pub struct BoardCollection {
    boards: Vec<Board>,
    default_title: String,
}

impl BoardCollection {
    /// A collection holding a single default board.
    pub fn new(default_title: impl Into<String>) -> Self {
        let default_title = default_title.into();
        Self {
            boards: vec![Board::new(default_title.clone())],
            default_title,
        }
    }

    /// Wrap loaded boards; an empty list becomes the default board.
    /// Titles that collide case-insensitively with an earlier board are
    /// renamed to the first free `"<title> (n)"`.
    pub fn from_boards(boards: Vec<Board>, default_title: impl Into<String>) -> Self {
        let default_title = default_title.into();
        if boards.is_empty() {
            return Self::new(default_title);
        }

        let stored: Vec<String> = boards.iter().map(|b| b.title.clone()).collect();
        let mut unique: Vec<Board> = Vec::with_capacity(boards.len());
        for board in boards {
            if unique.iter().any(|b| titles_match(&b.title, &board.title)) {
                let title = free_title(&unique, &stored, &board.title);
                tracing::warn!("Duplicate board title '{}' renamed to '{}'", board.title, title);
                unique.push(board.renamed(&title));
            } else {
                unique.push(board);
            }
        }

        Self {
            boards: unique,
            default_title,
        }
    }

    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    pub fn len(&self) -> usize {
        self.boards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }

    pub fn titles(&self) -> Vec<&str> {
        self.boards.iter().map(|b| b.title.as_str()).collect()
    }

    pub fn first(&self) -> &Board {
        &self.boards[0]
    }

    pub fn get(&self, title: &str) -> Option<&Board> {
        self.boards.iter().find(|b| b.title == title)
    }

    /// Like [`BoardCollection::get`] but reports a missing board.
    pub fn require(&self, title: &str) -> BoardResult<&Board> {
        self.get(title)
            .ok_or_else(|| BoardError::NotFound(format!("board '{}'", title)))
    }

    fn contains_ignore_case(&self, title: &str, except: Option<&str>) -> bool {
        self.boards
            .iter()
            .filter(|b| except.map_or(true, |skip| b.title != skip))
            .any(|b| titles_match(&b.title, title))
    }

    pub fn create_board(&self, title: &str) -> BoardResult<(BoardCollection, Board)> {
        if self.contains_ignore_case(title, None) {
            return Err(BoardError::DuplicateTitle(title.to_string()));
        }

        let board = Board::new(title);
        let mut next = self.clone();
        next.boards.push(board.clone());

        tracing::debug!("Created board '{}'", title);
        Ok((next, board))
    }

    /// Removes the board. The surviving first board receives a single
    /// `deleteEvent` entry; when nothing survives a default board is
    /// synthesized.
    pub fn delete_board(&self, title: &str) -> BoardCollection {
        let Some(index) = self.boards.iter().position(|b| b.title == title) else {
            tracing::debug!("Delete of unknown board '{}' ignored", title);
            return self.clone();
        };

        let mut next = self.clone();
        let removed = next.boards.remove(index);

        if next.boards.is_empty() {
            tracing::info!(
                "Deleted last board '{}', creating '{}'",
                title,
                self.default_title
            );
            next.boards.push(Board::new(self.default_title.clone()));
            return next;
        }

        next.boards[0].record(HistoryEntry::delete_event(title, removed.history.len()));
        tracing::debug!("Deleted board '{}'", title);
        next
    }

    /// Fails when a different board already uses `new_title` (ignoring case).
    pub fn rename_board(&self, old_title: &str, new_title: &str) -> BoardResult<BoardCollection> {
        let Some(index) = self.boards.iter().position(|b| b.title == old_title) else {
            tracing::debug!("Rename of unknown board '{}' ignored", old_title);
            return Ok(self.clone());
        };
        if old_title == new_title {
            return Ok(self.clone());
        }
        if self.contains_ignore_case(new_title, Some(old_title)) {
            return Err(BoardError::DuplicateTitle(new_title.to_string()));
        }

        let mut next = self.clone();
        next.boards[index] = self.boards[index].renamed(new_title);
        Ok(next)
    }

    /// Swap in the result of `update` for the board titled `title`.
    pub fn update_board<F>(&self, title: &str, update: F) -> BoardResult<BoardCollection>
    where
        F: FnOnce(&Board) -> BoardResult<Board>,
    {
        let Some(index) = self.boards.iter().position(|b| b.title == title) else {
            tracing::debug!("Update of unknown board '{}' ignored", title);
            return Ok(self.clone());
        };

        let updated = update(&self.boards[index])?;
        let mut next = self.clone();
        next.boards[index] = updated;
        Ok(next)
    }
}

impl Default for BoardCollection {
    fn default() -> Self {
        Self::new(DEFAULT_BOARD_TITLE)
    }
}

/// First `"<base> (n)"` matching neither a kept board nor any stored title.
fn free_title(kept: &[Board], stored: &[String], base: &str) -> String {
    let mut n = 2;
    loop {
        let candidate = format!("{} ({})", base, n);
        let taken = kept.iter().any(|b| titles_match(&b.title, &candidate))
            || stored.iter().any(|t| titles_match(t, &candidate));
        if !taken {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::HistoryKind;
    use crate::{DEFAULT_COLUMNS, TODO_COLUMN};

    #[test]
    fn test_default_collection() {
        let collection = BoardCollection::default();
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.first().title, "New Event");
    }

    #[test]
    fn test_from_empty_boards_synthesizes_default() {
        let collection = BoardCollection::from_boards(vec![], "Inbox");
        assert_eq!(collection.titles(), vec!["Inbox"]);
    }

    #[test]
    fn test_from_boards_renames_colliding_titles() {
        let collection = BoardCollection::from_boards(
            vec![
                Board::new("Trip"),
                Board::new("trip"),
                Board::new("Trip (2)"),
                Board::new("TRIP"),
            ],
            "Inbox",
        );

        assert_eq!(
            collection.titles(),
            vec!["Trip", "trip (3)", "Trip (2)", "TRIP (4)"]
        );
        let renamed = collection.get("trip (3)").unwrap();
        assert_eq!(renamed.history.last().unwrap().kind, HistoryKind::EditEvent);
    }

    #[test]
    fn test_require_missing_board() {
        let collection = BoardCollection::default();
        assert!(collection.require("New Event").is_ok());
        let err = collection.require("Nope").unwrap_err();
        assert!(matches!(err, BoardError::NotFound(_)));
        assert!(!err.is_user_facing());
    }

    #[test]
    fn test_create_board() {
        let collection = BoardCollection::default();
        let (next, board) = collection.create_board("Trip").unwrap();

        assert_eq!(board.title, "Trip");
        assert_eq!(next.titles(), vec!["New Event", "Trip"]);
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn test_create_board_duplicate_ignores_case() {
        let (collection, _) = BoardCollection::default().create_board("Trip").unwrap();
        let err = collection.create_board("trip").unwrap_err();
        assert!(matches!(err, BoardError::DuplicateTitle(ref t) if t == "trip"));
    }

    #[test]
    fn test_delete_board_logs_on_first_survivor() {
        let (collection, _) = BoardCollection::default().create_board("Trip").unwrap();
        let next = collection.delete_board("New Event");

        assert_eq!(next.titles(), vec!["Trip"]);
        let last = next.first().history.last().unwrap();
        assert_eq!(last.kind, HistoryKind::DeleteEvent);
        assert_eq!(last.subject(), "New Event");
    }

    #[test]
    fn test_delete_only_board_synthesizes_default() {
        let collection = BoardCollection::new("Only")
            .update_board("Only", |b| {
                Ok(b.add_task(TODO_COLUMN, crate::TaskFields::new("a", "b")))
            })
            .unwrap();

        let next = collection.delete_board("Only");
        assert_eq!(next.len(), 1);
        let board = next.first();
        assert_eq!(board.column_titles(), DEFAULT_COLUMNS.to_vec());
        assert!(board.columns.iter().all(|c| c.tasks.is_empty()));
        assert_eq!(board.history.len(), 1);
        assert_eq!(board.history[0].kind, HistoryKind::CreateEvent);
    }

    #[test]
    fn test_delete_unknown_board_is_noop() {
        let collection = BoardCollection::default();
        assert_eq!(collection.delete_board("Nope"), collection);
    }

    #[test]
    fn test_rename_board() {
        let (collection, _) = BoardCollection::default().create_board("Trip").unwrap();
        let next = collection.rename_board("Trip", "Holiday").unwrap();

        assert_eq!(next.titles(), vec!["New Event", "Holiday"]);
        let last = next.get("Holiday").unwrap().history.last().unwrap();
        assert_eq!(last.kind, HistoryKind::EditEvent);
    }

    #[test]
    fn test_rename_board_collision() {
        let (collection, _) = BoardCollection::default().create_board("Trip").unwrap();
        let err = collection.rename_board("Trip", "new event").unwrap_err();
        assert!(matches!(err, BoardError::DuplicateTitle(_)));
    }

    #[test]
    fn test_rename_board_case_change_of_itself() {
        let (collection, _) = BoardCollection::default().create_board("Trip").unwrap();
        let next = collection.rename_board("Trip", "TRIP").unwrap();
        assert!(next.get("TRIP").is_some());
    }

    #[test]
    fn test_update_board_propagates_errors() {
        let collection = BoardCollection::default();
        let result = collection.update_board("New Event", |b| b.add_column(TODO_COLUMN));
        assert!(matches!(result, Err(BoardError::DuplicateColumn(_))));
    }
}
