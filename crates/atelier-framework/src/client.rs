//! # Generic Resource Client
//!
//! [`ResourceClient<T>`] performs the list / get / create / update / delete
//! cycle for any [`Resource`] over a [`Transport`], reading through the
//! [`CacheClient`] and invalidating the collection after every mutation.

use crate::cache::CacheClient;
use crate::entity::Resource;
use crate::error::ApiError;
use crate::message::PutOutcome;
use crate::transport::{ApiRequest, Body, Transport};
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, info};

/// ## ResourceClient
///
/// A type-safe, async API for one REST collection. It is cheap to clone: it
/// holds the shared transport and a cache handle.
///
/// * **Reads** go through the query cache, keyed by endpoint path.
/// * **Mutations** always hit the server and then invalidate the whole
///   collection prefix, so the next list fetch reflects the change.
/// * **Deletes** are two-step: [`request_delete`](Self::request_delete)
///   returns a [`PendingDelete`] that must be confirmed.
pub struct ResourceClient<T: Resource> {
    transport: Arc<dyn Transport>,
    cache: CacheClient,
    _resource: PhantomData<fn() -> T>,
}

impl<T: Resource> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            cache: self.cache.clone(),
            _resource: PhantomData,
        }
    }
}

impl<T: Resource> ResourceClient<T> {
    pub fn new(transport: Arc<dyn Transport>, cache: CacheClient) -> Self {
        Self {
            transport,
            cache,
            _resource: PhantomData,
        }
    }

    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    pub fn cache(&self) -> &CacheClient {
        &self.cache
    }

    /// Fetches the full collection, from cache when possible.
    pub async fn list(&self) -> Result<Vec<T>, ApiError> {
        self.fetch_cached(T::COLLECTION).await
    }

    /// Fetches the full collection from the server and refreshes the cache.
    pub async fn refresh_list(&self) -> Result<Vec<T>, ApiError> {
        self.fetch_fresh(T::COLLECTION).await
    }

    pub async fn get(&self, id: &T::Id) -> Result<T, ApiError> {
        self.fetch_cached(&T::item_path(id)).await
    }

    /// Reads `path` through the cache and decodes it as `R`.
    ///
    /// A cached value that no longer decodes is treated as a miss.
    pub async fn fetch_cached<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        if let Some(value) = self.cache.get(path).await? {
            match serde_json::from_value(value) {
                Ok(decoded) => return Ok(decoded),
                Err(e) => debug!(%path, error = %e, "Cached value no longer decodes"),
            }
        }
        self.fetch_fresh(path).await
    }

    /// Reads `path` from the server and stores the raw response in the cache.
    pub async fn fetch_fresh<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        let value = self.transport.send(ApiRequest::get(path)).await?;
        let decoded = serde_json::from_value(value.clone())?;
        if self.cache.put(path, value).await? == PutOutcome::Suppressed {
            debug!(%path, "Fresh response not cached, key is suppressed");
        }
        Ok(decoded)
    }

    pub async fn create(&self, params: T::Create) -> Result<T, ApiError> {
        T::validate_create(&params)?;
        let body = serde_json::to_value(&params)?;
        let value = self
            .transport
            .send(ApiRequest::post(T::COLLECTION, body))
            .await?;
        self.cache.invalidate(T::COLLECTION).await?;
        let created: T = serde_json::from_value(value)?;
        info!(collection = T::COLLECTION, id = %created.id(), "Created");
        Ok(created)
    }

    pub async fn update(&self, id: &T::Id, params: T::Update) -> Result<T, ApiError> {
        T::validate_update(&params)?;
        let body = serde_json::to_value(&params)?;
        let request = ApiRequest::new(T::UPDATE_METHOD, T::item_path(id), Body::Json(body));
        let value = self.transport.send(request).await?;
        self.cache.invalidate(T::COLLECTION).await?;
        info!(collection = T::COLLECTION, %id, "Updated");
        Ok(serde_json::from_value(value)?)
    }

    /// Sends an arbitrary request against this collection's endpoints and
    /// invalidates the collection afterwards when it was a mutation.
    pub async fn send(&self, request: ApiRequest) -> Result<serde_json::Value, ApiError> {
        let mutates = request.method != crate::transport::Method::Get;
        let value = self.transport.send(request).await?;
        if mutates {
            self.cache.invalidate(T::COLLECTION).await?;
        }
        Ok(value)
    }

    /// Starts a delete. Nothing is sent until [`PendingDelete::confirm`].
    pub fn request_delete(&self, id: T::Id) -> PendingDelete<T> {
        debug!(collection = T::COLLECTION, %id, "Delete requested");
        PendingDelete {
            client: self.clone(),
            id,
        }
    }

    async fn delete_confirmed(&self, id: &T::Id) -> Result<(), ApiError> {
        self.transport
            .send(ApiRequest::delete(T::item_path(id)))
            .await?;
        self.cache.invalidate(T::COLLECTION).await?;
        info!(collection = T::COLLECTION, %id, "Deleted");
        Ok(())
    }
}

/// A destructive request waiting for the user's confirmation.
#[must_use = "a pending delete does nothing until confirmed"]
pub struct PendingDelete<T: Resource> {
    client: ResourceClient<T>,
    id: T::Id,
}

impl<T: Resource> PendingDelete<T> {
    pub fn id(&self) -> &T::Id {
        &self.id
    }

    /// Issues the DELETE and invalidates the collection.
    pub async fn confirm(self) -> Result<(), ApiError> {
        self.client.delete_confirmed(&self.id).await
    }

    /// Abandons the delete. No request is sent.
    pub fn cancel(self) {
        debug!(collection = T::COLLECTION, id = %self.id, "Delete cancelled");
    }
}
