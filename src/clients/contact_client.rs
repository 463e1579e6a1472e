//! # Contact Client
use crate::contacts::ContactError;
use crate::model::{ContactMessage, ContactTab, ContactUpdate};
use async_trait::async_trait;
use atelier_framework::{ApiError, ListFilter, ResourceApi, ResourceClient};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct ContactClient {
    inner: ResourceClient<ContactMessage>,
}

#[async_trait]
impl ResourceApi<ContactMessage> for ContactClient {
    type Error = ContactError;

    fn inner(&self) -> &ResourceClient<ContactMessage> {
        &self.inner
    }

    fn map_error(e: ApiError) -> Self::Error {
        ContactError::from(e)
    }
}

impl ContactClient {
    pub fn new(inner: ResourceClient<ContactMessage>) -> Self {
        Self { inner }
    }

    /// `PUT /api/admin/contact/{id}` with `{"isRead": true}`.
    #[instrument(skip(self))]
    pub async fn mark_read(&self, id: u32) -> Result<ContactMessage, ContactError> {
        debug!("Sending request");
        match self.inner.update(&id, ContactUpdate { is_read: true }).await {
            Ok(message) => Ok(message),
            Err(ApiError::NotFound(_)) => Err(ContactError::NotFound(id)),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn list_filtered(
        &self,
        filter: &ListFilter<ContactTab>,
    ) -> Result<Vec<ContactMessage>, ContactError> {
        let all = self.inner.list().await?;
        Ok(filter.apply(&all).into_iter().cloned().collect())
    }

    pub async fn unread_count(&self) -> Result<usize, ContactError> {
        let all = self.inner.list().await?;
        Ok(all.iter().filter(|m| !m.is_read).count())
    }
}
