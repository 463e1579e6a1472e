//! # Custom Design Client
use crate::model::{CustomDesignReceipt, CustomDesignRequest};
use atelier_framework::{ApiError, ApiRequest, Transport};
use std::sync::Arc;
use tracing::{info, instrument};
use validator::Validate;

pub const CUSTOM_DESIGNS_PATH: &str = "/api/custom-designs";

/// Submits bespoke design requests from the storefront.
#[derive(Clone)]
pub struct DesignClient {
    transport: Arc<dyn Transport>,
}

impl DesignClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Validates the form, then posts it.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn submit(&self, request: CustomDesignRequest) -> Result<CustomDesignReceipt, ApiError> {
        request
            .validate()
            .map_err(|e| ApiError::Validation(e.to_string()))?;
        let body = serde_json::to_value(&request)?;
        let value = self
            .transport
            .send(ApiRequest::post(CUSTOM_DESIGNS_PATH, body))
            .await?;
        let receipt: CustomDesignReceipt = serde_json::from_value(value)?;
        info!(id = receipt.id, "Custom design request submitted");
        Ok(receipt)
    }
}
