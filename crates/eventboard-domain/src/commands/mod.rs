use eventboard_core::BoardResult;

use crate::Workspace;

pub mod board_commands;
pub mod column_commands;
pub mod gesture_commands;
pub mod task_commands;

pub use board_commands::*;
pub use column_commands::*;
pub use gesture_commands::*;
pub use task_commands::*;

/// Trait for domain commands that change the workspace.
/// Commands represent intent: they validate form input, then hand the
/// current workspace to the store and return the next one.
pub trait Command: Send + Sync {
    /// Execute this command against `workspace`, producing the next state.
    /// On error the caller keeps `workspace` unchanged.
    fn execute(&self, workspace: &Workspace) -> BoardResult<Workspace>;

    /// Human-readable description of what this command does
    fn description(&self) -> String;
}
