//! # Cache Messages
//!
//! Requests sent from a [`CacheClient`](crate::cache::CacheClient) to the
//! [`CacheActor`](crate::cache::CacheActor). Each carries a oneshot responder.

use serde_json::Value;
use std::sync::Weak;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the cache actor.
pub type Response<T> = oneshot::Sender<T>;

/// What happened to a `Put`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutOutcome {
    Stored,
    /// An edit session holds the key; the write was dropped.
    Suppressed,
}

/// Internal message type sent to the cache actor.
///
/// Entries are keyed by the endpoint path they were fetched from
/// (`/api/products/7`, `/api/product-types`), so invalidation works on path
/// prefixes.
#[derive(Debug)]
pub enum CacheRequest {
    Get {
        key: String,
        respond_to: Response<Option<Value>>,
    },
    Put {
        key: String,
        value: Value,
        respond_to: Response<PutOutcome>,
    },
    Invalidate {
        prefix: String,
        respond_to: Response<usize>,
    },
    Suppress {
        key: String,
        token: Weak<()>,
        respond_to: Response<()>,
    },
    IsSuppressed {
        key: String,
        respond_to: Response<bool>,
    },
}
