//! Task text search.
//!
//! Case-insensitive substring matching on a task's name or details.

use crate::Task;

/// Trait for searching tasks by text.
pub trait TaskSearcher {
    /// Returns true if the task matches the search criteria.
    fn matches(&self, task: &Task) -> bool;
}

/// Search tasks by name (case-insensitive).
pub struct NameSearcher {
    query: String,
}

impl NameSearcher {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into().trim().to_lowercase(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }
}

impl TaskSearcher for NameSearcher {
    fn matches(&self, task: &Task) -> bool {
        if self.query.is_empty() {
            return true;
        }
        task.name.to_lowercase().contains(&self.query)
    }
}

/// Search tasks by details text (case-insensitive).
pub struct DetailsSearcher {
    query: String,
}

impl DetailsSearcher {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into().trim().to_lowercase(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }
}

impl TaskSearcher for DetailsSearcher {
    fn matches(&self, task: &Task) -> bool {
        if self.query.is_empty() {
            return true;
        }
        task.details.to_lowercase().contains(&self.query)
    }
}

/// Enum dispatch for searching tasks by a specific field.
pub enum SearchBy {
    Name(NameSearcher),
    Details(DetailsSearcher),
}

impl SearchBy {
    fn matches(&self, task: &Task) -> bool {
        match self {
            Self::Name(s) => s.matches(task),
            Self::Details(s) => s.matches(task),
        }
    }
}

/// Matches if any sub-searcher matches.
pub struct CompositeSearcher {
    searchers: Vec<SearchBy>,
}

impl CompositeSearcher {
    /// Create an empty composite searcher (matches all tasks).
    pub fn new() -> Self {
        Self {
            searchers: Vec::new(),
        }
    }

    /// Search both name and details.
    pub fn all(query: impl Into<String>) -> Self {
        let query = query.into();
        Self {
            searchers: vec![
                SearchBy::Name(NameSearcher::new(query.clone())),
                SearchBy::Details(DetailsSearcher::new(query)),
            ],
        }
    }

    pub fn with_search(mut self, searcher: SearchBy) -> Self {
        self.searchers.push(searcher);
        self
    }
}

impl Default for CompositeSearcher {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskSearcher for CompositeSearcher {
    fn matches(&self, task: &Task) -> bool {
        if self.searchers.is_empty() {
            return true;
        }
        self.searchers.iter().any(|searcher| searcher.matches(task))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TaskFields;

    fn task(name: &str, details: &str) -> Task {
        Task::new(TaskFields::new(name, details))
    }

    #[test]
    fn test_name_searcher_matches() {
        let task = task("Fix authentication bug", "login page");

        assert!(NameSearcher::new("auth").matches(&task));
        assert!(NameSearcher::new("AUTH").matches(&task));
        assert!(!NameSearcher::new("login").matches(&task));
    }

    #[test]
    fn test_details_searcher_matches() {
        let task = task("Buy milk", "From the Corner Shop");

        assert!(DetailsSearcher::new("corner").matches(&task));
        assert!(!DetailsSearcher::new("milk").matches(&task));
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let task = task("Any", "task");
        assert!(NameSearcher::new("").matches(&task));
        assert!(NameSearcher::new("   ").matches(&task));
        assert!(CompositeSearcher::new().matches(&task));
    }

    #[test]
    fn test_composite_searcher_any_match() {
        let task = task("Call bank", "About the mortgage");

        assert!(CompositeSearcher::all("bank").matches(&task));
        assert!(CompositeSearcher::all("MORTGAGE").matches(&task));
        assert!(!CompositeSearcher::all("milk").matches(&task));
    }

    #[test]
    fn test_with_search_builder() {
        let task = task("Call bank", "About the mortgage");
        let searcher = CompositeSearcher::new().with_search(SearchBy::Details(DetailsSearcher::new("bank")));
        assert!(!searcher.matches(&task));
    }
}
