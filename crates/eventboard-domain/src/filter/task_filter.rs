//! Task filter implementations.
//!
//! Each filter is a single predicate; `CompositeFilter` combines them with
//! AND logic in the order they were added.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use std::collections::HashSet;

use crate::filter::DueDateOption;
use crate::search::{CompositeSearcher, TaskSearcher};
use crate::{Task, TaskPriority};

/// Trait for filtering tasks by various criteria.
pub trait TaskFilter {
    /// Returns true if the task matches the filter criteria.
    fn matches(&self, task: &Task) -> bool;
}

/// Drops corrupt tasks that carry no usable id.
pub struct ValidTaskFilter;

impl TaskFilter for ValidTaskFilter {
    fn matches(&self, task: &Task) -> bool {
        task.is_valid()
    }
}

/// Case-insensitive text match on name or details.
pub struct SearchFilter {
    searcher: CompositeSearcher,
}

impl SearchFilter {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            searcher: CompositeSearcher::all(query),
        }
    }
}

impl TaskFilter for SearchFilter {
    fn matches(&self, task: &Task) -> bool {
        self.searcher.matches(task)
    }
}

/// Priority set membership. An empty set matches every task.
pub struct PriorityFilter {
    priorities: HashSet<TaskPriority>,
}

impl PriorityFilter {
    pub fn new(priorities: impl IntoIterator<Item = TaskPriority>) -> Self {
        Self {
            priorities: priorities.into_iter().collect(),
        }
    }
}

impl TaskFilter for PriorityFilter {
    fn matches(&self, task: &Task) -> bool {
        self.priorities.is_empty() || self.priorities.contains(&task.priority)
    }
}

/// Due-date option evaluated against a fixed "now" in its timezone.
pub struct DueDateFilter<Tz: TimeZone> {
    option: DueDateOption,
    now: DateTime<Tz>,
}

impl<Tz: TimeZone> DueDateFilter<Tz> {
    pub fn new(option: DueDateOption, now: DateTime<Tz>) -> Self {
        Self { option, now }
    }
}

impl<Tz: TimeZone> TaskFilter for DueDateFilter<Tz> {
    fn matches(&self, task: &Task) -> bool {
        let due = match (self.option, task.due_date) {
            (DueDateOption::All, _) => return true,
            (DueDateOption::NoDueDate, due) => return due.is_none(),
            (_, None) => return false,
            (_, Some(due)) => due,
        };

        let local_due = due.with_timezone(&self.now.timezone());
        match self.option {
            DueDateOption::Today => local_due.date_naive() == self.now.date_naive(),
            DueDateOption::Week => local_due.iso_week() == self.now.iso_week(),
            DueDateOption::Overdue => due < self.now.with_timezone(&Utc),
            DueDateOption::All | DueDateOption::NoDueDate => true,
        }
    }
}

/// Inclusive calendar-day range; tasks without a due date never match.
pub struct DateRangeFilter<Tz: TimeZone> {
    start: NaiveDate,
    end: NaiveDate,
    timezone: Tz,
}

impl<Tz: TimeZone> DateRangeFilter<Tz> {
    /// Bounds given in either order are normalized.
    pub fn new(start: NaiveDate, end: NaiveDate, timezone: Tz) -> Self {
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        Self {
            start,
            end,
            timezone,
        }
    }
}

impl<Tz: TimeZone> TaskFilter for DateRangeFilter<Tz> {
    fn matches(&self, task: &Task) -> bool {
        task.due_date
            .map(|due| due.with_timezone(&self.timezone).date_naive())
            .is_some_and(|day| self.start <= day && day <= self.end)
    }
}

/// Combine multiple filters with AND logic.
pub struct CompositeFilter {
    filters: Vec<Box<dyn TaskFilter>>,
}

impl CompositeFilter {
    /// Create an empty composite filter (matches all tasks).
    pub fn new() -> Self {
        Self { filters: vec![] }
    }

    pub fn with_filter(mut self, filter: Box<dyn TaskFilter>) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl Default for CompositeFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskFilter for CompositeFilter {
    fn matches(&self, task: &Task) -> bool {
        self.filters.iter().all(|f| f.matches(task))
    }
}
