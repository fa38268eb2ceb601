use super::Command;
use crate::validation::validate_column_title;
use crate::Workspace;
use eventboard_core::BoardResult;

/// Append a user column to the selected board
pub struct AddColumn {
    pub title: String,
}

impl Command for AddColumn {
    fn execute(&self, workspace: &Workspace) -> BoardResult<Workspace> {
        validate_column_title(workspace.current().column_titles(), &self.title)?;
        workspace.update_current(|board| board.add_column(&self.title))
    }

    fn description(&self) -> String {
        format!("Add column '{}'", self.title)
    }
}

/// Delete a column and every task in it
pub struct DeleteColumn {
    pub title: String,
}

impl Command for DeleteColumn {
    fn execute(&self, workspace: &Workspace) -> BoardResult<Workspace> {
        workspace.update_current(|board| Ok(board.delete_column(&self.title)))
    }

    fn description(&self) -> String {
        format!("Delete column '{}'", self.title)
    }
}

pub struct RenameColumn {
    pub old_title: String,
    pub new_title: String,
}

impl Command for RenameColumn {
    fn execute(&self, workspace: &Workspace) -> BoardResult<Workspace> {
        if self.old_title == self.new_title {
            return Ok(workspace.clone());
        }
        validate_column_title(workspace.current().column_titles(), &self.new_title)?;
        workspace.update_current(|board| board.rename_column(&self.old_title, &self.new_title))
    }

    fn description(&self) -> String {
        format!("Rename column '{}' to '{}'", self.old_title, self.new_title)
    }
}

pub struct SetColumnColor {
    pub title: String,
    pub color: String,
}

impl Command for SetColumnColor {
    fn execute(&self, workspace: &Workspace) -> BoardResult<Workspace> {
        workspace.update_current(|board| Ok(board.set_column_color(&self.title, &self.color)))
    }

    fn description(&self) -> String {
        format!("Set color of column '{}' to {}", self.title, self.color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TODO_COLUMN;
    use eventboard_core::BoardError;

    #[test]
    fn test_add_column_title_length() {
        let err = AddColumn {
            title: "Much too long".to_string(),
        }
        .execute(&Workspace::default())
        .unwrap_err();
        assert!(matches!(err, BoardError::Validation(_)));

        let workspace = AddColumn {
            title: "Review".to_string(),
        }
        .execute(&Workspace::default())
        .unwrap();
        assert_eq!(workspace.current().color_of("Review"), "#1890ff");
    }

    #[test]
    fn test_rename_column_duplicate() {
        let err = RenameColumn {
            old_title: TODO_COLUMN.to_string(),
            new_title: "Completed".to_string(),
        }
        .execute(&Workspace::default())
        .unwrap_err();
        assert!(matches!(err, BoardError::DuplicateColumn(_)));
    }

    #[test]
    fn test_delete_column_and_set_color() {
        let workspace = SetColumnColor {
            title: TODO_COLUMN.to_string(),
            color: "#000000".to_string(),
        }
        .execute(&Workspace::default())
        .unwrap();
        assert_eq!(workspace.current().color_of(TODO_COLUMN), "#000000");

        let workspace = DeleteColumn {
            title: TODO_COLUMN.to_string(),
        }
        .execute(&workspace)
        .unwrap();
        assert!(workspace.current().column(TODO_COLUMN).is_none());
    }
}
