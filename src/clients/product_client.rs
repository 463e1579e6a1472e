//! # Product Client
//!
//! Wraps a `ResourceClient<Product>` and adds the product-specific endpoints:
//! the featured list, the fallback lookup chain and the image upload.
use crate::model::{ImageUpload, Product, ProductCreate, ProductId, ProductTab, ProductUpdate};
use crate::products::{direct_path, image_path, ProductError, FEATURED_PATH};
use async_trait::async_trait;
use atelier_framework::{
    retry, ApiError, ApiRequest, Body, FilePart, ListFilter, Method, Resource, ResourceApi,
    ResourceClient, RetryPolicy,
};
use serde_json::Value;
use tracing::{debug, instrument, warn};

/// Multipart field name of the main product image.
pub const MAIN_IMAGE_FIELD: &str = "mainImage";

/// Client for the product endpoints.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
    retry: RetryPolicy,
}

#[async_trait]
impl ResourceApi<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }

    fn map_error(e: ApiError) -> Self::Error {
        ProductError::from(e)
    }
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>, retry: RetryPolicy) -> Self {
        Self { inner, retry }
    }

    #[instrument(skip(self))]
    pub async fn featured(&self) -> Result<Vec<Product>, ProductError> {
        debug!("Sending request");
        Ok(self.inner.fetch_cached(FEATURED_PATH).await?)
    }

    /// The full list, filtered locally.
    #[instrument(skip(self))]
    pub async fn list_filtered(
        &self,
        filter: &ListFilter<ProductTab>,
    ) -> Result<Vec<Product>, ProductError> {
        let all = self.inner.list().await?;
        Ok(filter.apply(&all).into_iter().cloned().collect())
    }

    /// Looks a product up through `/api/products/{id}`, falling back to
    /// `/api/direct-product/{id}` when the regular path is refused, and
    /// retrying the chain with increasing delay.
    #[instrument(skip(self))]
    pub async fn get_with_fallback(&self, id: ProductId) -> Result<Product, ProductError> {
        let inner = &self.inner;
        let result = retry(self.retry, "product lookup", |attempt| async move {
            match inner.get(&id).await {
                Ok(product) => Ok(product),
                Err(e @ (ApiError::Unauthorized | ApiError::Forbidden(_) | ApiError::NotFound(_))) => {
                    debug!(attempt, error = %e, "Primary lookup refused, trying direct path");
                    inner.fetch_cached(&direct_path(id)).await
                }
                Err(e) => Err(e),
            }
        })
        .await;

        match result {
            Ok(product) => Ok(product),
            Err(ApiError::NotFound(_)) => Err(ProductError::NotFound(id)),
            Err(e) => {
                warn!(error = %e, "Product lookup failed");
                Err(e.into())
            }
        }
    }

    /// Reads the product from the server, bypassing the cache. The response
    /// is cached unless an edit session has frozen the key.
    #[instrument(skip(self))]
    pub async fn refresh(&self, id: ProductId) -> Result<Product, ProductError> {
        Ok(self.inner.fetch_fresh(&Product::item_path(&id)).await?)
    }

    #[instrument(skip(self))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<Product, ProductError> {
        debug!("Sending request");
        Ok(self.inner.create(params).await?)
    }

    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductError> {
        debug!("Sending request");
        Ok(self.inner.update(&id, update).await?)
    }

    /// Replaces the main image (`PATCH /api/products/{id}/image`, multipart).
    #[instrument(skip(self, image), fields(file_name = %image.file_name, bytes = image.bytes.len()))]
    pub async fn upload_image(
        &self,
        id: ProductId,
        image: ImageUpload,
    ) -> Result<Value, ProductError> {
        Ok(self.inner.send(image_request(id, image)).await?)
    }

    /// Sends a prepared product mutation and returns the raw response.
    pub async fn send(&self, request: ApiRequest) -> Result<Value, ApiError> {
        self.inner.send(request).await
    }
}

pub fn image_request(id: ProductId, image: ImageUpload) -> ApiRequest {
    ApiRequest::new(
        Method::Patch,
        image_path(id),
        Body::Multipart(FilePart {
            field: MAIN_IMAGE_FIELD.to_string(),
            file_name: image.file_name,
            content_type: image.content_type,
            bytes: image.bytes,
        }),
    )
}
