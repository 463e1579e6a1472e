//! # Catalog Client
//!
//! Reads the metal and stone catalogs and serves them to the pricing worker
//! as its [`RateSource`]. Responses go through the query cache, so repeated
//! price calculations reuse one fetch until an admin edits a rate.
use crate::model::{MetalType, MetalTypeForm, StoneType, StoneTypeForm};
use crate::pricing::{load_rates, RateSource, RateTable};
use async_trait::async_trait;
use atelier_framework::{ApiError, CacheClient, Resource, ResourceClient, Transport};
use std::sync::Arc;
use tracing::instrument;

impl Resource for MetalType {
    type Id = u32;
    type Create = MetalTypeForm;
    type Update = MetalTypeForm;
    const COLLECTION: &'static str = "/api/metal-types";

    fn id(&self) -> &u32 {
        &self.id
    }
}

impl Resource for StoneType {
    type Id = u32;
    type Create = StoneTypeForm;
    type Update = StoneTypeForm;
    const COLLECTION: &'static str = "/api/stone-types";

    fn id(&self) -> &u32 {
        &self.id
    }
}

#[derive(Clone)]
pub struct CatalogClient {
    metals: ResourceClient<MetalType>,
    stones: ResourceClient<StoneType>,
}

impl CatalogClient {
    pub fn new(transport: Arc<dyn Transport>, cache: CacheClient) -> Self {
        Self {
            metals: ResourceClient::new(transport.clone(), cache.clone()),
            stones: ResourceClient::new(transport, cache),
        }
    }

    pub fn metals(&self) -> &ResourceClient<MetalType> {
        &self.metals
    }

    pub fn stones(&self) -> &ResourceClient<StoneType> {
        &self.stones
    }

    /// Both catalogs, fetched concurrently.
    pub async fn rate_table(&self) -> Result<RateTable, ApiError> {
        load_rates(self).await
    }
}

#[async_trait]
impl RateSource for CatalogClient {
    #[instrument(skip(self))]
    async fn metal_types(&self) -> Result<Vec<MetalType>, ApiError> {
        self.metals.list().await
    }

    #[instrument(skip(self))]
    async fn stone_types(&self) -> Result<Vec<StoneType>, ApiError> {
        self.stones.list().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_framework::mock::MockTransport;
    use atelier_framework::{CacheActor, Method};
    use serde_json::json;
    use std::time::Duration;
    use tokio::sync::Notify;

    #[tokio::test]
    async fn test_catalogs_fetched_concurrently_and_cached() {
        let mock = MockTransport::new();
        let gate = Arc::new(Notify::new());
        // Metals wait for a release that only comes once stones were requested.
        mock.expect(Method::Get, "/api/metal-types")
            .gated(gate.clone())
            .return_json(json!([{ "id": 1, "name": "Gold", "pricePerGram": 5000 }]));
        mock.expect(Method::Get, "/api/stone-types")
            .return_json(json!([{ "id": 1, "name": "Diamond", "pricePerCarat": 60000 }]));

        let (actor, cache) = CacheActor::new(16);
        tokio::spawn(actor.run());
        let catalog = CatalogClient::new(mock.transport(), cache);

        let releaser = {
            let mock = mock.clone();
            tokio::spawn(async move {
                while mock.count(Method::Get, "/api/stone-types") == 0 {
                    tokio::time::sleep(Duration::from_millis(1)).await;
                }
                gate.notify_one();
            })
        };

        let table = catalog.rate_table().await.unwrap();
        releaser.await.unwrap();
        assert_eq!(table.metal_rate("gold"), Some(5000.0));
        assert_eq!(table.stone_rate("Diamond"), Some(60000.0));

        // Second table comes from the cache, no new expectations needed.
        assert_eq!(catalog.rate_table().await.unwrap(), table);
        mock.verify();
    }
}
