//! # Product Types
//!
//! Categories shown in the storefront navigation. Plain CRUD over
//! `/api/product-types` with a validated form: the name must be 2 to 50
//! characters, checked before anything is sent.

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::ProductType;
use atelier_framework::{CacheClient, ResourceClient, Transport};
use std::sync::Arc;

/// Creates the generic client for `/api/product-types`.
pub fn new(transport: Arc<dyn Transport>, cache: CacheClient) -> ResourceClient<ProductType> {
    ResourceClient::new(transport, cache)
}
