//! Demo: lists the featured products with the price a customer would see.
//!
//! Reads its settings from `ATELIER_*` variables, see [`atelier::config`].

use atelier::card::{CardCapabilities, ProductCard};
use atelier::carousel::FeaturedCarousel;
use atelier::config::StorefrontConfig;
use atelier::lifecycle::{setup_tracing, Storefront};
use tracing::{error, info, Instrument};

const CAROUSEL_PAGE: usize = 4;

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = StorefrontConfig::from_env().map_err(|e| e.to_string())?;
    info!(api_url = %config.api_url, "Starting storefront demo");
    let storefront = Storefront::new(config).map_err(|e| e.to_string())?;

    let span = tracing::info_span!("featured");
    let loaded = async {
        info!("Loading featured products");
        FeaturedCarousel::load(&storefront.products, CAROUSEL_PAGE).await
    }
    .instrument(span)
    .await;

    match loaded {
        Ok(mut carousel) => {
            for _ in 0..carousel.page_count() {
                for product in carousel.visible() {
                    let card = ProductCard::build(
                        product,
                        CardCapabilities::listing(),
                        None,
                        &storefront.config.pricing,
                    );
                    info!(
                        id = %card.id,
                        title = %card.title,
                        inr = %card.price_inr,
                        usd = %card.price_usd,
                        source = ?card.price.source,
                        "Featured"
                    );
                }
                carousel.next();
            }
        }
        Err(e) => error!(error = %e, "Could not load featured products"),
    }

    storefront.shutdown().await?;

    info!("Demo completed");
    Ok(())
}
