//! Error types for contact message operations.

use atelier_framework::ApiError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContactError {
    #[error("Contact message not found: {0}")]
    NotFound(u32),

    #[error("Contact request failed: {0}")]
    Api(#[from] ApiError),
}

impl ContactError {
    pub fn requires_login(&self) -> bool {
        matches!(self, ContactError::Api(e) if e.requires_login())
    }
}
