//! Book lookup data model and the fetch collaborator contract.

pub mod google_books;

use serde::Serialize;
use std::fmt;

/// A search string as the user typed it (title, author or ISBN). Passed to
/// the fetcher verbatim; hosts reject blank input before starting a lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query(String);

impl Query {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Query {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// The first usable book in a response. Title and author are never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookResult {
    title: String,
    author: String,
    cover_url: Option<String>,
}

impl BookResult {
    /// Returns `None` when either the title or the author is empty.
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        cover_url: Option<String>,
    ) -> Option<Self> {
        let title = title.into();
        let author = author.into();
        if title.is_empty() || author.is_empty() {
            return None;
        }
        Some(Self {
            title,
            author,
            cover_url,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn cover_url(&self) -> Option<&str> {
        self.cover_url.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SelectionOutcome {
    Found(BookResult),
    NotFound,
}

impl SelectionOutcome {
    pub fn book(&self) -> Option<&BookResult> {
        match self {
            SelectionOutcome::Found(b) => Some(b),
            SelectionOutcome::NotFound => None,
        }
    }
}

/// Fetch collaborator. Blocking; the orchestrator only ever calls it from a
/// worker thread. Any network or transport failure is reported as `None`.
pub trait BookFetcher: Send + Sync {
    fn fetch(&self, query: &Query) -> Option<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_is_kept_verbatim() {
        let q = Query::new("  dune \n");
        assert_eq!(q.as_str(), "  dune \n");
        assert!(!q.is_empty());
        assert!(Query::new("").is_empty());
    }

    #[test]
    fn book_result_rejects_empty_fields() {
        assert!(BookResult::new("", "Frank Herbert", None).is_none());
        assert!(BookResult::new("Dune", "", None).is_none());
        let b = BookResult::new("Dune", "Frank Herbert", Some("http://img".into())).unwrap();
        assert_eq!(b.title(), "Dune");
        assert_eq!(b.author(), "Frank Herbert");
        assert_eq!(b.cover_url(), Some("http://img"));
    }

    #[test]
    fn outcome_serializes_with_status_tag() {
        let found = SelectionOutcome::Found(BookResult::new("Dune", "Frank Herbert", None).unwrap());
        let v = serde_json::to_value(&found).unwrap();
        assert_eq!(v["status"], "found");
        assert_eq!(v["title"], "Dune");
        let v = serde_json::to_value(SelectionOutcome::NotFound).unwrap();
        assert_eq!(v["status"], "not_found");
    }
}
