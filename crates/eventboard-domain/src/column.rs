use serde::{Deserialize, Deserializer, Serialize};

use crate::task::{Task, TaskId};

pub const TODO_COLUMN: &str = "To do";
pub const IN_PROGRESS_COLUMN: &str = "In progress";
pub const COMPLETED_COLUMN: &str = "Completed";
pub const DEFAULT_COLUMNS: [&str; 3] = [TODO_COLUMN, IN_PROGRESS_COLUMN, COMPLETED_COLUMN];

pub const TODO_COLOR: &str = "#faad14";
pub const IN_PROGRESS_COLOR: &str = "#1677ff";
pub const COMPLETED_COLOR: &str = "#52c41a";
pub const USER_COLUMN_COLOR: &str = "#1890ff";

/// The three default columns are protected from deletion by the presentation
/// layer; the store itself never refuses.
pub fn is_default_column(title: &str) -> bool {
    DEFAULT_COLUMNS.contains(&title)
}

pub fn default_color_for(title: &str) -> &'static str {
    match title {
        TODO_COLUMN => TODO_COLOR,
        IN_PROGRESS_COLUMN => IN_PROGRESS_COLOR,
        COMPLETED_COLUMN => COMPLETED_COLOR,
        _ => USER_COLUMN_COLOR,
    }
}

/// A named lane of tasks. Vector order is display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub title: String,
    #[serde(default, deserialize_with = "tasks_skipping_nulls")]
    pub tasks: Vec<Task>,
}

impl Column {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            tasks: Vec::new(),
        }
    }

    pub fn with_tasks(title: impl Into<String>, tasks: Vec<Task>) -> Self {
        Self {
            title: title.into(),
            tasks,
        }
    }

    /// Tasks that pass the id-validity check, in storage order.
    pub fn valid_tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|t| t.is_valid())
    }

    pub fn valid_task_count(&self) -> usize {
        self.valid_tasks().count()
    }

    /// Storage index of a task, matched by identity.
    pub fn position_of(&self, task_id: &str) -> Option<usize> {
        if task_id.trim().is_empty() {
            return None;
        }
        self.tasks.iter().position(|t| t.id == task_id)
    }

    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.position_of(task_id).map(|idx| &self.tasks[idx])
    }

    pub fn task_ids(&self) -> Vec<TaskId> {
        self.valid_tasks().map(|t| t.id.clone()).collect()
    }

    pub fn is_default(&self) -> bool {
        is_default_column(&self.title)
    }
}

fn tasks_skipping_nulls<'de, D>(deserializer: D) -> Result<Vec<Task>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<Option<Task>>> = Option::deserialize(deserializer)?;
    Ok(raw.unwrap_or_default().into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TaskFields;
    use serde_json::json;

    #[test]
    fn test_default_palette() {
        assert_eq!(default_color_for("To do"), "#faad14");
        assert_eq!(default_color_for("In progress"), "#1677ff");
        assert_eq!(default_color_for("Completed"), "#52c41a");
        assert_eq!(default_color_for("Review"), "#1890ff");
    }

    #[test]
    fn test_is_default_column() {
        assert!(is_default_column("To do"));
        assert!(is_default_column("Completed"));
        assert!(!is_default_column("to do"));
        assert!(!Column::new("Review").is_default());
    }

    #[test]
    fn test_position_of_matches_identity() {
        let a = Task::new(TaskFields::new("a", "a"));
        let b = Task::new(TaskFields::new("b", "b"));
        let column = Column::with_tasks("To do", vec![a.clone(), b.clone()]);

        assert_eq!(column.position_of(&b.id), Some(1));
        assert_eq!(column.position_of("missing"), None);
        assert_eq!(column.position_of(""), None);
        assert_eq!(column.task(&a.id).map(|t| t.name.as_str()), Some("a"));
    }

    #[test]
    fn test_invalid_tasks_are_not_counted() {
        let good = Task::new(TaskFields::new("a", "a"));
        let mut corrupt = Task::new(TaskFields::new("b", "b"));
        corrupt.id.clear();
        let column = Column::with_tasks("To do", vec![corrupt, good.clone()]);

        assert_eq!(column.tasks.len(), 2);
        assert_eq!(column.valid_task_count(), 1);
        assert_eq!(column.task_ids(), vec![good.id]);
    }

    #[test]
    fn test_deserialize_skips_null_entries() {
        let column: Column = serde_json::from_value(json!({
            "title": "To do",
            "tasks": [null, {"id": "1", "name": "n", "details": "d"}, null]
        }))
        .unwrap();
        assert_eq!(column.tasks.len(), 1);

        let empty: Column = serde_json::from_value(json!({ "title": "Done", "tasks": null })).unwrap();
        assert!(empty.tasks.is_empty());
    }
}
