//! # Product Type Client
use crate::model::{ProductType, ProductTypeForm, ProductTypeTab};
use crate::product_types::ProductTypeError;
use async_trait::async_trait;
use atelier_framework::{ApiError, ListFilter, ResourceApi, ResourceClient};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct ProductTypeClient {
    inner: ResourceClient<ProductType>,
}

#[async_trait]
impl ResourceApi<ProductType> for ProductTypeClient {
    type Error = ProductTypeError;

    fn inner(&self) -> &ResourceClient<ProductType> {
        &self.inner
    }

    fn map_error(e: ApiError) -> Self::Error {
        ProductTypeError::from(e)
    }
}

impl ProductTypeClient {
    pub fn new(inner: ResourceClient<ProductType>) -> Self {
        Self { inner }
    }

    /// Creates a product type. Names outside 2 to 50 characters are
    /// rejected without contacting the server.
    #[instrument(skip(self))]
    pub async fn create_type(
        &self,
        mut form: ProductTypeForm,
    ) -> Result<ProductType, ProductTypeError> {
        debug!("Sending request");
        form.name = form.name.trim().to_string();
        Ok(self.inner.create(form).await?)
    }

    #[instrument(skip(self))]
    pub async fn update_type(
        &self,
        id: u32,
        mut form: ProductTypeForm,
    ) -> Result<ProductType, ProductTypeError> {
        debug!("Sending request");
        form.name = form.name.trim().to_string();
        Ok(self.inner.update(&id, form).await?)
    }

    /// Flips the active flag, keeping every other field.
    #[instrument(skip(self, existing), fields(id = existing.id))]
    pub async fn set_active(
        &self,
        existing: &ProductType,
        is_active: bool,
    ) -> Result<ProductType, ProductTypeError> {
        let mut form = ProductTypeForm::from(existing);
        form.is_active = is_active;
        self.update_type(existing.id, form).await
    }

    /// Active types sorted by display order, as shown in navigation.
    pub async fn navigation(&self) -> Result<Vec<ProductType>, ProductTypeError> {
        let mut active = self
            .list_filtered(&ListFilter::new().with_tab(ProductTypeTab::Active))
            .await?;
        active.sort_by_key(|t| t.display_order);
        Ok(active)
    }

    pub async fn list_filtered(
        &self,
        filter: &ListFilter<ProductTypeTab>,
    ) -> Result<Vec<ProductType>, ProductTypeError> {
        let all = self.inner.list().await?;
        Ok(filter.apply(&all).into_iter().cloned().collect())
    }
}
