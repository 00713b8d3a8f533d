//! Derived list views: category filter plus case-insensitive free-text search.

use crate::entities::{Article, Report, Scent};

/// Fields a collection exposes to search and category filtering.
pub trait Searchable {
    /// Text fields matched by a free-text query.
    fn search_fields(&self) -> [&str; 2];

    fn category(&self) -> &str;

    /// True when any search field contains `term` (case-insensitive).
    /// A blank term matches everything.
    fn matches_term(&self, term: &str) -> bool {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

impl Searchable for Report {
    fn search_fields(&self) -> [&str; 2] {
        [&self.title, &self.description]
    }

    fn category(&self) -> &str {
        self.category.as_str()
    }
}

impl Searchable for Article {
    fn search_fields(&self) -> [&str; 2] {
        [&self.title, &self.content]
    }

    fn category(&self) -> &str {
        &self.category
    }
}

impl Searchable for Scent {
    fn search_fields(&self) -> [&str; 2] {
        [&self.name, &self.description]
    }

    fn category(&self) -> &str {
        &self.category
    }
}

/// The active search query and category filter of a list view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewFilter {
    pub query: String,
    /// `None` shows every category.
    pub category: Option<String>,
}

impl ViewFilter {
    #[must_use]
    pub fn accepts<T: Searchable>(&self, item: &T) -> bool {
        let category_ok = self
            .category
            .as_deref()
            .is_none_or(|wanted| item.category().eq_ignore_ascii_case(wanted));
        category_ok && item.matches_term(&self.query)
    }

    /// Items passing both the category filter and the query, in collection order.
    #[must_use]
    pub fn apply<T: Searchable + Clone>(&self, items: &[T]) -> Vec<T> {
        items
            .iter()
            .filter(|item| self.accepts(*item))
            .cloned()
            .collect()
    }
}

/// Distinct categories present in a collection, sorted.
#[must_use]
pub fn categories_of<T: Searchable>(items: &[T]) -> Vec<String> {
    let mut categories: Vec<String> = items.iter().map(|item| item.category().to_string()).collect();
    categories.sort();
    categories.dedup();
    categories
}
