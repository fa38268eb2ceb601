use super::Command;
use crate::validation::validate_board_title;
use crate::Workspace;
use eventboard_core::BoardResult;

/// Create a board with the default columns
pub struct CreateBoard {
    pub title: String,
}

impl Command for CreateBoard {
    fn execute(&self, workspace: &Workspace) -> BoardResult<Workspace> {
        validate_board_title(workspace.collection().titles(), &self.title)?;
        workspace.create_board(&self.title)
    }

    fn description(&self) -> String {
        format!("Create board '{}'", self.title)
    }
}

/// Delete a board. The last board is replaced by a fresh default one.
pub struct DeleteBoard {
    pub title: String,
}

impl Command for DeleteBoard {
    fn execute(&self, workspace: &Workspace) -> BoardResult<Workspace> {
        Ok(workspace.delete_board(&self.title))
    }

    fn description(&self) -> String {
        format!("Delete board '{}'", self.title)
    }
}

pub struct RenameBoard {
    pub old_title: String,
    pub new_title: String,
}

impl Command for RenameBoard {
    fn execute(&self, workspace: &Workspace) -> BoardResult<Workspace> {
        let others = workspace
            .collection()
            .titles()
            .into_iter()
            .filter(|title| *title != self.old_title);
        validate_board_title(others, &self.new_title)?;
        workspace.rename_board(&self.old_title, &self.new_title)
    }

    fn description(&self) -> String {
        format!("Rename board '{}' to '{}'", self.old_title, self.new_title)
    }
}

pub struct SelectBoard {
    pub title: String,
}

impl Command for SelectBoard {
    fn execute(&self, workspace: &Workspace) -> BoardResult<Workspace> {
        Ok(workspace.select(&self.title))
    }

    fn description(&self) -> String {
        format!("Select board '{}'", self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventboard_core::BoardError;

    #[test]
    fn test_create_board_requires_title() {
        let err = CreateBoard {
            title: "  ".to_string(),
        }
        .execute(&Workspace::default())
        .unwrap_err();
        assert!(matches!(err, BoardError::Validation(_)));
    }

    #[test]
    fn test_create_board_duplicate_title() {
        let err = CreateBoard {
            title: "NEW EVENT".to_string(),
        }
        .execute(&Workspace::default())
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "A board named 'NEW EVENT' already exists"
        );
    }

    #[test]
    fn test_rename_board_may_change_case_of_itself() {
        let workspace = RenameBoard {
            old_title: "New Event".to_string(),
            new_title: "NEW EVENT".to_string(),
        }
        .execute(&Workspace::default())
        .unwrap();
        assert_eq!(workspace.selected_title(), "NEW EVENT");
    }

    #[test]
    fn test_delete_and_select() {
        let workspace = CreateBoard {
            title: "Trip".to_string(),
        }
        .execute(&Workspace::default())
        .unwrap();
        let workspace = SelectBoard {
            title: "Trip".to_string(),
        }
        .execute(&workspace)
        .unwrap();
        assert_eq!(workspace.current().title, "Trip");

        let workspace = DeleteBoard {
            title: "Trip".to_string(),
        }
        .execute(&workspace)
        .unwrap();
        assert_eq!(workspace.current().title, "New Event");
    }
}
