//! Task search functionality.
//!
//! Provides traits and implementations for matching tasks against a free-text
//! query. Used by the repository's filtered views so every front-end gets the
//! same search behavior.

use crate::task::Task;

/// Trait for matching tasks against a search query.
pub trait TaskSearcher {
    /// Returns true if the task matches the search criteria.
    fn matches(&self, task: &Task) -> bool;
}

/// Search tasks by title (case-insensitive substring).
pub struct TitleSearcher {
    query: String,
}

impl TitleSearcher {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into().to_lowercase(),
        }
    }
}

impl TaskSearcher for TitleSearcher {
    fn matches(&self, task: &Task) -> bool {
        if self.query.is_empty() {
            return true;
        }
        task.title.to_lowercase().contains(&self.query)
    }
}

/// Search tasks by description (case-insensitive substring).
pub struct DescriptionSearcher {
    query: String,
}

impl DescriptionSearcher {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into().to_lowercase(),
        }
    }
}

impl TaskSearcher for DescriptionSearcher {
    fn matches(&self, task: &Task) -> bool {
        if self.query.is_empty() {
            return true;
        }
        task.description.to_lowercase().contains(&self.query)
    }
}

/// Search tasks by tag. Matches when any tag contains the query.
pub struct TagSearcher {
    query: String,
}

impl TagSearcher {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into().to_lowercase(),
        }
    }
}

impl TaskSearcher for TagSearcher {
    fn matches(&self, task: &Task) -> bool {
        if self.query.is_empty() {
            return true;
        }
        task.tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(&self.query))
    }
}

/// Search tasks by assignee name (case-insensitive substring).
pub struct AssigneeSearcher {
    query: String,
}

impl AssigneeSearcher {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into().to_lowercase(),
        }
    }
}

impl TaskSearcher for AssigneeSearcher {
    fn matches(&self, task: &Task) -> bool {
        if self.query.is_empty() {
            return true;
        }
        task.assignee.name.to_lowercase().contains(&self.query)
    }
}

/// Enum dispatch for searching tasks by a specific field.
pub enum SearchBy {
    Title(TitleSearcher),
    Description(DescriptionSearcher),
    Tag(TagSearcher),
    Assignee(AssigneeSearcher),
}

impl SearchBy {
    fn matches(&self, task: &Task) -> bool {
        match self {
            Self::Title(s) => s.matches(task),
            Self::Description(s) => s.matches(task),
            Self::Tag(s) => s.matches(task),
            Self::Assignee(s) => s.matches(task),
        }
    }
}

/// Composite searcher that matches if any sub-searcher matches.
///
/// By default, covers title, description, tags, and assignee name.
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

    /// Create a composite searcher with all built-in searchers.
    pub fn all(query: impl Into<String>) -> Self {
        let query = query.into();
        Self {
            searchers: vec![
                SearchBy::Title(TitleSearcher::new(query.clone())),
                SearchBy::Description(DescriptionSearcher::new(query.clone())),
                SearchBy::Tag(TagSearcher::new(query.clone())),
                SearchBy::Assignee(AssigneeSearcher::new(query)),
            ],
        }
    }

    /// Add a searcher to the composite (builder pattern).
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
