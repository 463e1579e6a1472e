//! Featured-products carousel: a fixed-size window over the featured list
//! that wraps around in both directions.

use crate::clients::ProductClient;
use crate::model::Product;
use crate::products::ProductError;

#[derive(Debug, Clone, PartialEq)]
pub struct FeaturedCarousel {
    items: Vec<Product>,
    per_page: usize,
    page: usize,
}

impl FeaturedCarousel {
    /// `per_page` is clamped to at least one.
    pub fn new(items: Vec<Product>, per_page: usize) -> Self {
        Self {
            items,
            per_page: per_page.max(1),
            page: 0,
        }
    }

    pub async fn load(client: &ProductClient, per_page: usize) -> Result<Self, ProductError> {
        Ok(Self::new(client.featured().await?, per_page))
    }

    pub fn page_count(&self) -> usize {
        self.items.len().div_ceil(self.per_page).max(1)
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Products on the current page.
    pub fn visible(&self) -> &[Product] {
        let start = (self.page * self.per_page).min(self.items.len());
        let end = (start + self.per_page).min(self.items.len());
        &self.items[start..end]
    }

    pub fn next(&mut self) {
        self.page = (self.page + 1) % self.page_count();
    }

    pub fn previous(&mut self) {
        let count = self.page_count();
        self.page = (self.page + count - 1) % count;
    }
}
