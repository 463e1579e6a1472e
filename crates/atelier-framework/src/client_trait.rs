//! # ResourceApi Trait
//!
//! Provides a common interface for resource-specific clients, adding default
//! `list`, `get` and `request_delete` methods built on top of a generic
//! [`ResourceClient`].
use crate::{ApiError, PendingDelete, Resource, ResourceClient};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit the standard admin operations.
///
/// # Example
///
/// ```rust
/// use atelier_framework::{ApiError, Resource, ResourceApi, ResourceClient};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Debug, Deserialize)]
/// struct Tag { id: u32, label: String }
///
/// #[derive(Debug, Serialize)]
/// struct TagForm { label: String }
///
/// impl Resource for Tag {
///     type Id = u32;
///     type Create = TagForm;
///     type Update = TagForm;
///     const COLLECTION: &'static str = "/api/tags";
///     fn id(&self) -> &u32 { &self.id }
/// }
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("tag error: {0}")]
/// struct TagError(String);
///
/// struct TagClient { inner: ResourceClient<Tag> }
///
/// impl ResourceApi<Tag> for TagClient {
///     type Error = TagError;
///     fn inner(&self) -> &ResourceClient<Tag> { &self.inner }
///     fn map_error(e: ApiError) -> TagError { TagError(e.to_string()) }
/// }
///
/// async fn usage(client: TagClient) {
///     // list(), get() and request_delete() are provided automatically
///     let _ = client.list().await;
///     client.request_delete(1).cancel();
/// }
/// ```
#[async_trait]
pub trait ResourceApi<T: Resource>: Send + Sync {
    /// The resource-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific resource error type.
    fn map_error(e: ApiError) -> Self::Error;

    /// Fetch the whole collection.
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list().await.map_err(Self::map_error)
    }

    /// Fetch one entity by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<T, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(&id).await.map_err(Self::map_error)
    }

    /// Begin a confirmed delete.
    fn request_delete(&self, id: T::Id) -> PendingDelete<T> {
        self.inner().request_delete(id)
    }
}
