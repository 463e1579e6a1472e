//! # Query Cache Actor
//!
//! The query cache is the only shared mutable resource in the storefront. It
//! stores decoded API responses keyed by endpoint path and lets an edit
//! session temporarily freeze one key while its save is in flight.
//!
//! Like every stateful component here it is an actor: one task owns the
//! `entries` map and processes [`CacheRequest`]s sequentially, so no locks are
//! needed around the map. [`CacheClient`] is the cheap, cloneable handle.
//!
//! ## Suppression
//!
//! [`CacheClient::suppress`] returns a [`SuppressionGuard`]. While any guard
//! for a key is alive, `put` on that key is refused with
//! [`PutOutcome::Suppressed`]. The actor only keeps a `Weak` reference to the
//! guard's token, so dropping the guard releases the key on every exit path
//! (success, error, panic) without sending a message.

use crate::error::ApiError;
use crate::message::{CacheRequest, PutOutcome};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Weak};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

/// The server half of the query cache.
pub struct CacheActor {
    receiver: mpsc::Receiver<CacheRequest>,
    entries: HashMap<String, Value>,
    suppressions: HashMap<String, Vec<Weak<()>>>,
}

impl CacheActor {
    /// Creates the actor and its client. `buffer_size` bounds the request queue.
    pub fn new(buffer_size: usize) -> (Self, CacheClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            entries: HashMap::new(),
            suppressions: HashMap::new(),
        };
        (actor, CacheClient::new(sender))
    }

    fn is_suppressed(&mut self, key: &str) -> bool {
        match self.suppressions.get_mut(key) {
            Some(tokens) => {
                tokens.retain(|token| token.strong_count() > 0);
                if tokens.is_empty() {
                    self.suppressions.remove(key);
                    false
                } else {
                    true
                }
            }
            None => false,
        }
    }

    /// Runs the event loop until every client is dropped.
    pub async fn run(mut self) {
        info!("Query cache started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CacheRequest::Get { key, respond_to } => {
                    let value = self.entries.get(&key).cloned();
                    debug!(%key, hit = value.is_some(), "Get");
                    let _ = respond_to.send(value);
                }
                CacheRequest::Put {
                    key,
                    value,
                    respond_to,
                } => {
                    if self.is_suppressed(&key) {
                        debug!(%key, "Put suppressed");
                        let _ = respond_to.send(PutOutcome::Suppressed);
                        continue;
                    }
                    self.entries.insert(key.clone(), value);
                    debug!(%key, size = self.entries.len(), "Put");
                    let _ = respond_to.send(PutOutcome::Stored);
                }
                CacheRequest::Invalidate { prefix, respond_to } => {
                    let before = self.entries.len();
                    self.entries.retain(|key, _| !matches_prefix(key, &prefix));
                    let removed = before - self.entries.len();
                    debug!(%prefix, removed, "Invalidate");
                    let _ = respond_to.send(removed);
                }
                CacheRequest::Suppress {
                    key,
                    token,
                    respond_to,
                } => {
                    debug!(%key, "Suppress");
                    self.suppressions.entry(key).or_default().push(token);
                    let _ = respond_to.send(());
                }
                CacheRequest::IsSuppressed { key, respond_to } => {
                    let suppressed = self.is_suppressed(&key);
                    let _ = respond_to.send(suppressed);
                }
            }
        }

        info!(size = self.entries.len(), "Query cache shutdown");
    }
}

/// `/api/products` covers `/api/products`, `/api/products/7` and
/// `/api/products?featured=1`, but not `/api/products-archive`.
fn matches_prefix(key: &str, prefix: &str) -> bool {
    match key.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/') || rest.starts_with('?'),
        None => false,
    }
}

/// Handle to a running [`CacheActor`].
#[derive(Clone, Debug)]
pub struct CacheClient {
    sender: mpsc::Sender<CacheRequest>,
}

impl CacheClient {
    pub fn new(sender: mpsc::Sender<CacheRequest>) -> Self {
        Self { sender }
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> CacheRequest,
    ) -> Result<T, ApiError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| ApiError::CacheClosed)?;
        response.await.map_err(|_| ApiError::CacheDropped)
    }

    pub async fn get(&self, key: &str) -> Result<Option<Value>, ApiError> {
        let key = key.to_string();
        self.request(|respond_to| CacheRequest::Get { key, respond_to })
            .await
    }

    pub async fn put(&self, key: &str, value: Value) -> Result<PutOutcome, ApiError> {
        let key = key.to_string();
        self.request(|respond_to| CacheRequest::Put {
            key,
            value,
            respond_to,
        })
        .await
    }

    /// Drops every entry under `prefix`. Returns how many were removed.
    pub async fn invalidate(&self, prefix: &str) -> Result<usize, ApiError> {
        let prefix = prefix.to_string();
        self.request(|respond_to| CacheRequest::Invalidate { prefix, respond_to })
            .await
    }

    /// Freezes `key` until the returned guard is dropped.
    pub async fn suppress(&self, key: &str) -> Result<SuppressionGuard, ApiError> {
        let token = Arc::new(());
        let weak = Arc::downgrade(&token);
        let owned = key.to_string();
        self.request(|respond_to| CacheRequest::Suppress {
            key: owned,
            token: weak,
            respond_to,
        })
        .await?;
        Ok(SuppressionGuard {
            key: key.to_string(),
            _token: token,
        })
    }

    pub async fn is_suppressed(&self, key: &str) -> Result<bool, ApiError> {
        let key = key.to_string();
        self.request(|respond_to| CacheRequest::IsSuppressed { key, respond_to })
            .await
    }
}

/// Scoped suppression of background writes to one cache key.
#[derive(Debug)]
#[must_use = "suppression is released as soon as the guard is dropped"]
pub struct SuppressionGuard {
    key: String,
    _token: Arc<()>,
}

impl SuppressionGuard {
    pub fn key(&self) -> &str {
        &self.key
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn spawn_cache() -> CacheClient {
        let (actor, client) = CacheActor::new(16);
        tokio::spawn(actor.run());
        client
    }

    #[test]
    fn test_prefix_matching_respects_segments() {
        assert!(matches_prefix("/api/products", "/api/products"));
        assert!(matches_prefix("/api/products/7", "/api/products"));
        assert!(matches_prefix("/api/products?tab=new", "/api/products"));
        assert!(!matches_prefix("/api/products-archive", "/api/products"));
        assert!(!matches_prefix("/api/product-types", "/api/products"));
    }

    #[tokio::test]
    async fn test_put_get_invalidate() {
        let cache = spawn_cache();
        cache.put("/api/product-types", json!([])).await.unwrap();
        cache.put("/api/product-types/3", json!({ "id": 3 })).await.unwrap();
        cache.put("/api/products/3", json!({ "id": 3 })).await.unwrap();

        assert_eq!(
            cache.get("/api/product-types/3").await.unwrap(),
            Some(json!({ "id": 3 }))
        );

        let removed = cache.invalidate("/api/product-types").await.unwrap();
        assert_eq!(removed, 2);
        assert!(cache.get("/api/product-types").await.unwrap().is_none());
        assert!(cache.get("/api/products/3").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_suppression_released_on_drop() {
        let cache = spawn_cache();
        cache.put("/api/products/1", json!({ "name": "old" })).await.unwrap();

        let guard = cache.suppress("/api/products/1").await.unwrap();
        assert!(cache.is_suppressed("/api/products/1").await.unwrap());

        let outcome = cache
            .put("/api/products/1", json!({ "name": "background" }))
            .await
            .unwrap();
        assert_eq!(outcome, PutOutcome::Suppressed);
        assert_eq!(
            cache.get("/api/products/1").await.unwrap(),
            Some(json!({ "name": "old" }))
        );

        drop(guard);
        assert!(!cache.is_suppressed("/api/products/1").await.unwrap());
        let outcome = cache
            .put("/api/products/1", json!({ "name": "fresh" }))
            .await
            .unwrap();
        assert_eq!(outcome, PutOutcome::Stored);
    }

    #[tokio::test]
    async fn test_closed_cache_reports_error() {
        let (actor, client) = CacheActor::new(1);
        drop(actor);
        let result = client.get("/api/products").await;
        assert!(matches!(result, Err(ApiError::CacheClosed)));
    }
}
