use crate::clients::{CatalogClient, ContactClient, DesignClient, ProductClient, ProductTypeClient};
use crate::config::{ConfigError, StorefrontConfig};
use crate::model::ProductId;
use crate::notify::Notifier;
use crate::pricing::{PriceHandle, PriceWorker};
use crate::products::ProductError;
use crate::session::{SessionActor, SessionHandle};
use crate::{contacts, product_types, products};
use atelier_framework::{ApiError, CacheActor, CacheClient, HttpTransport, Transport};
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info, instrument};

const CACHE_BUFFER: usize = 64;
const PRICE_BUFFER: usize = 16;

#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Could not build the HTTP client: {0}")]
    Transport(#[from] ApiError),
}

/// The running client: background tasks plus one typed client per endpoint
/// family.
///
/// `Storefront` is responsible for:
/// - **Lifecycle**: starting the query cache actor and the price worker and
///   stopping them in dependency order
/// - **Wiring**: every client shares one transport and one cache, so a
///   mutation through any of them invalidates what the others read
///
/// # Example
///
/// ```ignore
/// let storefront = Storefront::new(StorefrontConfig::from_env()?)?;
/// let featured = storefront.products.featured().await?;
/// storefront.shutdown().await?;
/// ```
pub struct Storefront {
    pub products: ProductClient,
    pub product_types: ProductTypeClient,
    pub contacts: ContactClient,
    pub catalog: CatalogClient,
    pub designs: DesignClient,
    pub price: PriceHandle,
    pub notifications: Notifier,
    pub config: StorefrontConfig,
    cache: CacheClient,
    handles: Vec<JoinHandle<()>>,
}

impl Storefront {
    /// Connects to `config.api_url` over HTTP.
    pub fn new(config: StorefrontConfig) -> Result<Self, StorefrontError> {
        let mut transport = HttpTransport::new(config.api_url.clone(), config.timeout)?;
        if let Some(token) = &config.api_token {
            transport = transport.with_token(token.clone());
        }
        Ok(Self::with_transport(Arc::new(transport), config))
    }

    /// Wires everything over the given transport. Must be called inside a
    /// Tokio runtime.
    pub fn with_transport(transport: Arc<dyn Transport>, config: StorefrontConfig) -> Self {
        let (cache_actor, cache) = CacheActor::new(CACHE_BUFFER);
        let cache_handle = tokio::spawn(cache_actor.run());

        let catalog = CatalogClient::new(transport.clone(), cache.clone());
        let (price_worker, price) =
            PriceWorker::new(Arc::new(catalog.clone()), config.pricing, PRICE_BUFFER);
        let price_handle = tokio::spawn(price_worker.run());

        info!(api_url = %config.api_url, "Storefront started");
        Self {
            products: ProductClient::new(
                products::new(transport.clone(), cache.clone()),
                config.retry,
            ),
            product_types: ProductTypeClient::new(product_types::new(
                transport.clone(),
                cache.clone(),
            )),
            contacts: ContactClient::new(contacts::new(transport.clone(), cache.clone())),
            catalog,
            designs: DesignClient::new(transport),
            price,
            notifications: Notifier::default(),
            config,
            cache,
            // The price worker holds catalog clients, so it stops before the cache.
            handles: vec![price_handle, cache_handle],
        }
    }

    pub fn cache(&self) -> &CacheClient {
        &self.cache
    }

    /// Loads the product and starts an edit session for it.
    ///
    /// Each session prices through its own [`PriceWorker`], so only a newer
    /// input from the same session supersedes its recompute. Rates still
    /// come through the shared cache.
    #[instrument(skip(self))]
    pub async fn open_session(&self, id: ProductId) -> Result<SessionHandle, ProductError> {
        let product = self.products.get_with_fallback(id).await?;
        let (price_worker, price) = PriceWorker::new(
            Arc::new(self.catalog.clone()),
            self.config.pricing,
            PRICE_BUFFER,
        );
        tokio::spawn(price_worker.run());

        let (actor, handle) = SessionActor::new(
            product,
            self.products.clone(),
            price,
            self.notifications.clone(),
        );
        tokio::spawn(actor.run());
        Ok(handle)
    }

    /// Stops the background tasks. Drop every [`SessionHandle`] first: a
    /// live session keeps the cache and the price worker running.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down storefront...");

        let Self {
            products,
            product_types,
            contacts,
            catalog,
            designs,
            price,
            cache,
            handles,
            ..
        } = self;
        drop(products);
        drop(product_types);
        drop(contacts);
        drop(catalog);
        drop(designs);
        drop(price);
        drop(cache);

        for handle in handles {
            if let Err(e) = handle.await {
                error!("Background task failed: {:?}", e);
                return Err(format!("Background task failed: {:?}", e));
            }
        }

        info!("Storefront shutdown complete.");
        Ok(())
    }
}
