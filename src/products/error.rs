//! Error types for product operations.

use crate::model::ProductId;
use atelier_framework::ApiError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProductError {
    /// Neither lookup path knows the product.
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    /// Rejected by local validation or by the server.
    #[error("Invalid product: {0}")]
    Invalid(String),

    #[error("Product request failed: {0}")]
    Api(ApiError),
}

impl ProductError {
    pub fn requires_login(&self) -> bool {
        matches!(self, ProductError::Api(e) if e.requires_login())
    }
}

impl From<ApiError> for ProductError {
    fn from(e: ApiError) -> Self {
        match e {
            ApiError::Validation(message) => ProductError::Invalid(message),
            other => ProductError::Api(other),
        }
    }
}
