//! Task filtering functionality.
//!
//! Provides the filter trait, its implementations, and the criteria the
//! filter menu edits.

pub mod task_criteria;
pub mod task_filter;

pub use task_criteria::{DueDateOption, TaskCriteria};
pub use task_filter::{
    CompositeFilter, DateRangeFilter, DueDateFilter, PriorityFilter, SearchFilter, TaskFilter,
    ValidTaskFilter,
};
