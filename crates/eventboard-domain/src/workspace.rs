//! Single source of truth for the board collection and the selected board.
//!
//! The selection is only a title; the selected board itself is always looked
//! up in the collection, so there is never a second copy to keep in sync.

use eventboard_core::BoardResult;

use crate::{Board, BoardCollection};

#[derive(Debug, Clone, PartialEq)]
pub struct Workspace {
    collection: BoardCollection,
    selected: String,
}

impl Workspace {
    /// Wrap a collection, selecting its first board.
    pub fn new(collection: BoardCollection) -> Self {
        let selected = collection.first().title.clone();
        Self {
            collection,
            selected,
        }
    }

    pub fn collection(&self) -> &BoardCollection {
        &self.collection
    }

    pub fn boards(&self) -> &[Board] {
        self.collection.boards()
    }

    pub fn selected_title(&self) -> &str {
        &self.selected
    }

    /// The selected board, falling back to the first one should the title
    /// ever go stale.
    pub fn current(&self) -> &Board {
        self.collection
            .get(&self.selected)
            .unwrap_or_else(|| self.collection.first())
    }

    pub fn select(&self, title: &str) -> Workspace {
        if self.collection.get(title).is_none() {
            tracing::debug!("Select of unknown board '{}' ignored", title);
            return self.clone();
        }
        Workspace {
            collection: self.collection.clone(),
            selected: title.to_string(),
        }
    }

    /// New boards are appended; the selection stays where it was.
    pub fn create_board(&self, title: &str) -> BoardResult<Workspace> {
        let (collection, _) = self.collection.create_board(title)?;
        Ok(Workspace {
            collection,
            selected: self.selected.clone(),
        })
    }

    /// After a delete the first remaining (or synthesized) board is selected.
    pub fn delete_board(&self, title: &str) -> Workspace {
        if self.collection.get(title).is_none() {
            return self.clone();
        }
        Workspace::new(self.collection.delete_board(title))
    }

    pub fn rename_board(&self, old_title: &str, new_title: &str) -> BoardResult<Workspace> {
        let collection = self.collection.rename_board(old_title, new_title)?;
        let selected = if self.selected == old_title && collection.get(new_title).is_some() {
            new_title.to_string()
        } else {
            self.selected.clone()
        };
        Ok(Workspace {
            collection,
            selected,
        })
    }

    /// Apply a board-level operation to the selected board.
    pub fn update_current<F>(&self, update: F) -> BoardResult<Workspace>
    where
        F: FnOnce(&Board) -> BoardResult<Board>,
    {
        let title = self.current().title.clone();
        let collection = self.collection.update_board(&title, update)?;
        Ok(Workspace {
            collection,
            selected: title,
        })
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new(BoardCollection::default())
    }
}
