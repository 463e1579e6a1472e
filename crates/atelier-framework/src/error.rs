//! # Framework Errors
//!
//! This module defines the error type shared by every transport, cache and
//! resource client in the framework. Resource modules in the application wrap
//! it in their own error enums.

/// Errors that can occur while talking to the storefront API or the query cache.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced an HTTP response (DNS, TLS, timeout, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server rejected the session token.
    #[error("Authentication required")]
    Unauthorized,

    #[error("Permission denied: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Rejected locally before sending, or a 400/422 from the server.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Any other non-2xx status.
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// The response body did not match the expected shape.
    #[error("Invalid response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Cache actor closed")]
    CacheClosed,

    #[error("Cache actor dropped response channel")]
    CacheDropped,
}

impl ApiError {
    /// Whether the caller should send the user to the login flow instead of
    /// showing an inline error.
    pub fn requires_login(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    /// Whether retrying the same request could plausibly succeed.
    ///
    /// Auth and not-found failures count as transient: the product lookup
    /// fallback chain sees both from a flaky session layer.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ApiError::Http(_)
                | ApiError::Unauthorized
                | ApiError::NotFound(_)
                | ApiError::Server { .. }
        )
    }
}
