pub mod board;
pub mod collection;
pub mod column;
pub mod commands;
pub mod filter;
pub mod history;
pub mod query;
pub mod reorder;
pub mod search;
pub mod stats;
pub mod task;
pub mod validation;
pub mod workspace;

pub use board::Board;
pub use collection::BoardCollection;
pub use column::{
    default_color_for, is_default_column, Column, COMPLETED_COLUMN, DEFAULT_COLUMNS,
    IN_PROGRESS_COLUMN, TODO_COLUMN, USER_COLUMN_COLOR,
};
pub use filter::{DueDateOption, TaskCriteria};
pub use history::{timeline, HistoryAction, HistoryEntry, HistoryKind, Loggable};
pub use query::{filter_tasks, filter_tasks_at, filter_tasks_indexed, IndexedTask};
pub use reorder::{apply_gesture, translate_gesture, DragGesture, DragKind, DragLocation};
pub use stats::{compute_statistics, BoardStatistics, ColumnStatistics};
pub use task::{Task, TaskFields, TaskId, TaskPriority};
pub use workspace::Workspace;
