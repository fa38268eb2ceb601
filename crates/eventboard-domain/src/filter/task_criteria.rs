//! Filter menu settings.
//!
//! `TaskCriteria` holds what to filter by; `to_filter` turns it into the
//! ordered predicate chain.

use chrono::{DateTime, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::filter::task_filter::{
    CompositeFilter, DateRangeFilter, DueDateFilter, PriorityFilter, SearchFilter,
    ValidTaskFilter,
};
use crate::TaskPriority;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DueDateOption {
    #[default]
    All,
    Today,
    Week,
    Overdue,
    /// Only tasks without a due date.
    #[serde(rename = "none")]
    NoDueDate,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCriteria {
    #[serde(default)]
    pub search_text: String,
    /// Empty means no priority filtering.
    #[serde(default)]
    pub priorities: HashSet<TaskPriority>,
    #[serde(default)]
    pub due_date_option: DueDateOption,
    /// Inclusive calendar days.
    #[serde(default)]
    pub custom_range: Option<(NaiveDate, NaiveDate)>,
}

impl TaskCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search_text(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priorities.insert(priority);
        self
    }

    pub fn with_due_date_option(mut self, option: DueDateOption) -> Self {
        self.due_date_option = option;
        self
    }

    pub fn with_custom_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.custom_range = Some((start, end));
        self
    }

    pub fn has_active_filters(&self) -> bool {
        !self.search_text.trim().is_empty()
            || !self.priorities.is_empty()
            || self.due_date_option != DueDateOption::All
            || self.custom_range.is_some()
    }

    pub fn clear(&mut self) {
        self.search_text.clear();
        self.priorities.clear();
        self.due_date_option = DueDateOption::All;
        self.custom_range = None;
    }

    /// Build the predicate chain: validity, text, priority, due-date option,
    /// custom range. Date predicates are evaluated in the timezone of `now`.
    pub fn to_filter<Tz>(&self, now: DateTime<Tz>) -> CompositeFilter
    where
        Tz: TimeZone + 'static,
    {
        let mut filter = CompositeFilter::new()
            .with_filter(Box::new(ValidTaskFilter))
            .with_filter(Box::new(SearchFilter::new(self.search_text.clone())))
            .with_filter(Box::new(PriorityFilter::new(
                self.priorities.iter().copied(),
            )));

        let timezone = now.timezone();
        filter = filter.with_filter(Box::new(DueDateFilter::new(self.due_date_option, now)));

        if let Some((start, end)) = self.custom_range {
            filter = filter.with_filter(Box::new(DateRangeFilter::new(start, end, timezone)));
        }
        filter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_has_no_active_filters() {
        assert!(!TaskCriteria::default().has_active_filters());
        assert!(!TaskCriteria::new().with_search_text("   ").has_active_filters());
    }

    #[test]
    fn test_each_setting_activates() {
        assert!(TaskCriteria::new().with_search_text("milk").has_active_filters());
        assert!(TaskCriteria::new()
            .with_priority(TaskPriority::High)
            .has_active_filters());
        assert!(TaskCriteria::new()
            .with_due_date_option(DueDateOption::Overdue)
            .has_active_filters());
        let day = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert!(TaskCriteria::new()
            .with_custom_range(day, day)
            .has_active_filters());
    }

    #[test]
    fn test_clear() {
        let day = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let mut criteria = TaskCriteria::new()
            .with_search_text("milk")
            .with_priority(TaskPriority::Low)
            .with_due_date_option(DueDateOption::Week)
            .with_custom_range(day, day);

        criteria.clear();
        assert_eq!(criteria, TaskCriteria::default());
    }

    #[test]
    fn test_due_date_option_names() {
        assert_eq!(
            serde_json::to_value(DueDateOption::NoDueDate).unwrap(),
            json!("none")
        );
        let parsed: DueDateOption = serde_json::from_value(json!("overdue")).unwrap();
        assert_eq!(parsed, DueDateOption::Overdue);
    }
}
