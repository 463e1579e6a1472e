//! # Products
//!
//! Products are managed like every other admin resource, with three
//! differences:
//!
//! - updates are partial (`PATCH`) and rewrite the details blob wholesale
//! - the main image is uploaded separately as multipart form data
//! - a single product is looked up through a fallback chain
//!   (`/api/products/{id}`, then `/api/direct-product/{id}`) with retries
//!
//! ## Structure
//!
//! - [`entity`]: [`Resource`](atelier_framework::Resource) and
//!   [`Searchable`](atelier_framework::Searchable) for [`Product`]
//! - [`error`]: [`ProductError`]
//! - [`new()`]: builds the generic client
//!
//! The typed client is [`ProductClient`](crate::clients::ProductClient).

pub mod entity;
pub mod error;

pub use entity::*;
pub use error::*;

use crate::model::Product;
use atelier_framework::{CacheClient, ResourceClient, Transport};
use std::sync::Arc;

/// Creates the generic client for `/api/products`.
pub fn new(transport: Arc<dyn Transport>, cache: CacheClient) -> ResourceClient<Product> {
    ResourceClient::new(transport, cache)
}
