//! # Client-side Filtering
//!
//! Admin list views fetch the full collection once and filter it locally: a
//! free-text search across a handful of text fields plus a tab that
//! partitions the list on a boolean flag. No query is pushed to the server.

use std::fmt::Debug;

/// Implemented by entities shown in a filterable admin list.
pub trait Searchable {
    /// The tab set of the list view (e.g. All / Unread / Read).
    type Tab: Copy + Debug + Default + PartialEq;

    /// Text fields matched by the search box.
    fn search_fields(&self) -> Vec<&str>;

    fn in_tab(&self, tab: Self::Tab) -> bool;
}

/// Search term plus selected tab.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListFilter<Tab> {
    pub search: String,
    pub tab: Tab,
}

impl<Tab: Copy + Debug + Default + PartialEq> ListFilter<Tab> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_tab(mut self, tab: Tab) -> Self {
        self.tab = tab;
        self
    }

    /// Case-insensitive substring match on any search field, and tab membership.
    pub fn matches<T: Searchable<Tab = Tab>>(&self, item: &T) -> bool {
        if !item.in_tab(self.tab) {
            return false;
        }
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        item.search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    pub fn apply<'a, T: Searchable<Tab = Tab>>(&self, items: &'a [T]) -> Vec<&'a T> {
        items.iter().filter(|item| self.matches(*item)).collect()
    }
}
