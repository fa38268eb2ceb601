use chrono::{DateTime, Utc};
use eventboard_core::BoardResult;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::validation;

pub type TaskId = String;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    High,
    #[default]
    Medium,
    Low,
}

impl TaskPriority {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// A task card. Owned by exactly one column; `id` never changes across
/// moves and edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(default, deserialize_with = "string_or_empty")]
    pub id: TaskId,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub details: String,
    #[serde(default, deserialize_with = "lenient_priority")]
    pub priority: TaskPriority,
    #[serde(
        default,
        serialize_with = "chrono::serde::ts_milliseconds_option::serialize",
        deserialize_with = "lenient_due_date"
    )]
    pub due_date: Option<DateTime<Utc>>,
}

impl Task {
    /// Create a task with a freshly generated id.
    pub fn new(fields: TaskFields) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: fields.name,
            details: fields.details,
            priority: fields.priority.unwrap_or_default(),
            due_date: fields.due_date,
        }
    }

    /// Tasks without a resolvable id are corrupt and hidden from every view.
    pub fn is_valid(&self) -> bool {
        !self.id.trim().is_empty()
    }

    /// Replace every mutable field, keeping the id.
    pub fn apply(&mut self, fields: TaskFields) {
        self.name = fields.name;
        self.details = fields.details;
        self.priority = fields.priority.unwrap_or_default();
        self.due_date = fields.due_date;
    }
}

/// Field set produced by the task form, consumed by add and update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskFields {
    pub name: String,
    pub details: String,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<DateTime<Utc>>,
}

impl TaskFields {
    pub fn new(name: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            details: details.into(),
            priority: None,
            due_date: None,
        }
    }

    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Form-boundary checks: both texts required and within their length limits.
    pub fn validate(&self) -> BoardResult<()> {
        validation::validate_task_text("name", &self.name, validation::MAX_TASK_NAME_LEN)?;
        validation::validate_task_text(
            "details",
            &self.details,
            validation::MAX_TASK_DETAILS_LEN,
        )
    }
}

fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

fn lenient_priority<'de, D>(deserializer: D) -> Result<TaskPriority, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(raw
        .as_str()
        .and_then(TaskPriority::parse)
        .unwrap_or_default())
}

fn lenient_due_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let millis = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => {
            return Ok(DateTime::parse_from_rfc3339(&s)
                .ok()
                .map(|dt| dt.with_timezone(&Utc))
                .or_else(|| s.parse::<i64>().ok().and_then(DateTime::from_timestamp_millis)))
        }
        _ => None,
    };
    Ok(millis.and_then(DateTime::from_timestamp_millis))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_new_task_defaults() {
        let task = Task::new(TaskFields::new("Buy milk", "Semi-skimmed"));
        assert!(task.is_valid());
        assert_eq!(task.priority, TaskPriority::Medium);
        assert_eq!(task.due_date, None);
    }

    #[test]
    fn test_new_tasks_get_distinct_ids() {
        let a = Task::new(TaskFields::new("a", "a"));
        let b = Task::new(TaskFields::new("b", "b"));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_apply_keeps_id() {
        let mut task = Task::new(TaskFields::new("Old", "old details"));
        let id = task.id.clone();
        let due = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();

        task.apply(
            TaskFields::new("New", "new details")
                .with_priority(TaskPriority::High)
                .with_due_date(due),
        );

        assert_eq!(task.id, id);
        assert_eq!(task.name, "New");
        assert_eq!(task.priority, TaskPriority::High);
        assert_eq!(task.due_date, Some(due));
    }

    #[test]
    fn test_blank_id_is_invalid() {
        let mut task = Task::new(TaskFields::new("x", "y"));
        task.id = "  ".to_string();
        assert!(!task.is_valid());
    }

    #[test]
    fn test_serialized_shape() {
        let mut task = Task::new(TaskFields::new("Call bank", "About the card"));
        task.id = "1".to_string();
        task.priority = TaskPriority::Low;
        task.due_date = Utc.timestamp_millis_opt(1_700_000_000_000).single();

        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "1",
                "name": "Call bank",
                "details": "About the card",
                "priority": "low",
                "dueDate": 1_700_000_000_000i64
            })
        );
    }

    #[test]
    fn test_lenient_deserialization() {
        let task: Task = serde_json::from_value(json!({
            "name": "Legacy",
            "details": null,
            "priority": "urgent",
            "dueDate": null
        }))
        .unwrap();

        assert!(!task.is_valid());
        assert_eq!(task.details, "");
        assert_eq!(task.priority, TaskPriority::Medium);
        assert_eq!(task.due_date, None);

        let numeric: Task = serde_json::from_value(json!({
            "id": 42,
            "name": "n",
            "details": "d",
            "dueDate": 1_700_000_000_000.0
        }))
        .unwrap();
        assert_eq!(numeric.id, "42");
        assert_eq!(
            numeric.due_date,
            Utc.timestamp_millis_opt(1_700_000_000_000).single()
        );
    }

    #[test]
    fn test_fields_validation() {
        assert!(TaskFields::new("Name", "Details").validate().is_ok());
        assert!(TaskFields::new("", "Details").validate().is_err());
        assert!(TaskFields::new("Name", "   ").validate().is_err());
        assert!(TaskFields::new("x".repeat(51), "Details").validate().is_err());
        assert!(TaskFields::new("Name", "y".repeat(201)).validate().is_err());
        assert!(TaskFields::new("x".repeat(50), "y".repeat(200))
            .validate()
            .is_ok());
    }

    #[test]
    fn test_priority_parse() {
        assert_eq!(TaskPriority::parse("HIGH"), Some(TaskPriority::High));
        assert_eq!(TaskPriority::parse(" low "), Some(TaskPriority::Low));
        assert_eq!(TaskPriority::parse("critical"), None);
        assert_eq!(TaskPriority::Medium.as_str(), "medium");
    }
}
