//! # Contact Messages
//!
//! Messages arrive from the public contact form. The back office only reads
//! them, marks them read, and deletes them after confirmation.

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::ContactMessage;
use atelier_framework::{CacheClient, ResourceClient, Transport};
use std::sync::Arc;

/// Creates the generic client for `/api/admin/contact`.
pub fn new(transport: Arc<dyn Transport>, cache: CacheClient) -> ResourceClient<ContactMessage> {
    ResourceClient::new(transport, cache)
}
