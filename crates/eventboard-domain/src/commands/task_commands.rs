use super::Command;
use crate::{TaskFields, TaskId, Workspace};
use eventboard_core::BoardResult;

/// Append a task to a column of the selected board
pub struct AddTask {
    pub column: String,
    pub fields: TaskFields,
}

impl Command for AddTask {
    fn execute(&self, workspace: &Workspace) -> BoardResult<Workspace> {
        self.fields.validate()?;
        workspace.update_current(|board| Ok(board.add_task(&self.column, self.fields.clone())))
    }

    fn description(&self) -> String {
        format!("Add task '{}' to '{}'", self.fields.name, self.column)
    }
}

/// Remove a task by id, wherever the filtered view displayed it
pub struct RemoveTask {
    pub column: String,
    pub task_id: TaskId,
}

impl Command for RemoveTask {
    fn execute(&self, workspace: &Workspace) -> BoardResult<Workspace> {
        workspace.update_current(|board| Ok(board.remove_task(&self.column, &self.task_id)))
    }

    fn description(&self) -> String {
        format!("Remove task {} from '{}'", self.task_id, self.column)
    }
}

pub struct UpdateTask {
    pub column: String,
    pub task_id: TaskId,
    pub fields: TaskFields,
}

impl Command for UpdateTask {
    fn execute(&self, workspace: &Workspace) -> BoardResult<Workspace> {
        self.fields.validate()?;
        workspace.update_current(|board| {
            Ok(board.update_task(&self.column, &self.task_id, self.fields.clone()))
        })
    }

    fn description(&self) -> String {
        format!("Update task {}", self.task_id)
    }
}
