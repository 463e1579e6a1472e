//! Error types for product type operations.

use atelier_framework::ApiError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProductTypeError {
    /// The form failed validation, locally or on the server.
    #[error("Invalid product type: {0}")]
    Invalid(String),

    #[error("Product type not found: {0}")]
    NotFound(String),

    #[error("Product type request failed: {0}")]
    Api(ApiError),
}

impl ProductTypeError {
    pub fn requires_login(&self) -> bool {
        matches!(self, ProductTypeError::Api(e) if e.requires_login())
    }
}

impl From<ApiError> for ProductTypeError {
    fn from(e: ApiError) -> Self {
        match e {
            ApiError::Validation(message) => ProductTypeError::Invalid(message),
            ApiError::NotFound(message) => ProductTypeError::NotFound(message),
            other => ProductTypeError::Api(other),
        }
    }
}
