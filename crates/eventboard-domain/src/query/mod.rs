//! Task query functionality.
//!
//! Derives the visible task list of a column from `TaskCriteria` without
//! touching the board. Results are fresh vectors, never views into the input.

use chrono::{DateTime, Local, TimeZone};

use crate::filter::{TaskCriteria, TaskFilter};
use crate::Task;

/// A visible task together with its position in the unfiltered column.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedTask {
    pub index: usize,
    pub task: Task,
}

/// Filter tasks against the local clock.
pub fn filter_tasks(tasks: &[Task], criteria: &TaskCriteria) -> Vec<Task> {
    filter_tasks_at(tasks, criteria, Local::now())
}

/// Filter tasks with an explicit "now" for the due-date predicates.
///
/// Predicates apply in order: id validity, text, priority set, due-date
/// option, custom range. All must hold.
pub fn filter_tasks_at<Tz>(tasks: &[Task], criteria: &TaskCriteria, now: DateTime<Tz>) -> Vec<Task>
where
    Tz: TimeZone + 'static,
{
    let filter = criteria.to_filter(now);
    tasks
        .iter()
        .filter(|task| filter.matches(task))
        .cloned()
        .collect()
}

/// Like [`filter_tasks_at`] but keeps each task's storage index, so a
/// position in the displayed list can be mapped back onto the column.
pub fn filter_tasks_indexed<Tz>(
    tasks: &[Task],
    criteria: &TaskCriteria,
    now: DateTime<Tz>,
) -> Vec<IndexedTask>
where
    Tz: TimeZone + 'static,
{
    let filter = criteria.to_filter(now);
    tasks
        .iter()
        .enumerate()
        .filter(|(_, task)| filter.matches(task))
        .map(|(index, task)| IndexedTask {
            index,
            task: task.clone(),
        })
        .collect()
}
