use super::{Draft, Section, SessionCommand, SessionError, SessionSnapshot};
use crate::model::{Product, ProductId};
use tokio::sync::{mpsc, oneshot};
use tracing::instrument;

/// Cloneable handle to a running [`SessionActor`](super::SessionActor).
/// The session ends when every handle is dropped.
#[derive(Clone, Debug)]
pub struct SessionHandle {
    sender: mpsc::Sender<SessionCommand>,
    product_id: ProductId,
}

impl SessionHandle {
    pub(crate) fn new(sender: mpsc::Sender<SessionCommand>, product_id: ProductId) -> Self {
        Self { sender, product_id }
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> SessionCommand,
    ) -> Result<T, SessionError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| SessionError::Closed)?;
        response.await.map_err(|_| SessionError::Dropped)
    }

    /// Opens a section's form and returns its pre-filled draft.
    #[instrument(skip(self), fields(product_id = %self.product_id))]
    pub async fn open(&self, section: Section) -> Result<Draft, SessionError> {
        self.request(|respond_to| SessionCommand::Open {
            section,
            respond_to,
        })
        .await?
    }

    pub async fn update_draft(&self, draft: Draft) -> Result<(), SessionError> {
        self.request(|respond_to| SessionCommand::UpdateDraft { draft, respond_to })
            .await?
    }

    #[instrument(skip(self), fields(product_id = %self.product_id))]
    pub async fn cancel(&self) -> Result<(), SessionError> {
        self.request(|respond_to| SessionCommand::Cancel { respond_to })
            .await?
    }

    /// Saves the open draft. Resolves once the save, the price recompute
    /// (materials only) and the refetch are done, or with the save error.
    #[instrument(skip(self), fields(product_id = %self.product_id))]
    pub async fn submit(&self) -> Result<Product, SessionError> {
        self.request(|respond_to| SessionCommand::Submit { respond_to })
            .await?
    }

    /// Offers a background fetch of the product. Returns whether it was
    /// applied; it is not while a save is in flight.
    pub async fn refresh(&self, product: Product) -> Result<bool, SessionError> {
        self.request(|respond_to| SessionCommand::Refresh {
            product,
            respond_to,
        })
        .await
    }

    pub async fn snapshot(&self) -> Result<SessionSnapshot, SessionError> {
        self.request(|respond_to| SessionCommand::Snapshot { respond_to })
            .await
    }
}
