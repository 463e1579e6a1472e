use super::PriceConfig;
use crate::model::{DisplayPrice, PriceBreakdown, PriceSource, Product};

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

/// Picks the price shown for a product.
///
/// Preference order: the server snapshot (product fields, then the details
/// blob), then `recomputed`, then the base price. A snapshot holding only one
/// currency has the other derived through `config`.
pub fn authoritative_price(
    product: &Product,
    recomputed: Option<&PriceBreakdown>,
    config: &PriceConfig,
) -> DisplayPrice {
    let details = product.parsed_details();
    let inr = positive(product.calculated_price_inr).or(details.snapshot.inr);
    let usd = positive(product.calculated_price_usd).or(details.snapshot.usd);

    match (inr, usd) {
        (Some(inr), Some(usd)) => DisplayPrice {
            inr,
            usd,
            source: PriceSource::ServerSnapshot,
        },
        (Some(inr), None) => DisplayPrice {
            inr,
            usd: config.to_usd(inr),
            source: PriceSource::ServerSnapshot,
        },
        (None, Some(usd)) => DisplayPrice {
            inr: (usd * config.inr_per_usd).round(),
            usd,
            source: PriceSource::ServerSnapshot,
        },
        (None, None) => match recomputed.filter(|b| b.total_inr > 0.0) {
            Some(breakdown) => DisplayPrice {
                inr: breakdown.total_inr,
                usd: breakdown.total_usd,
                source: PriceSource::Recomputed,
            },
            None => DisplayPrice {
                inr: product.base_price,
                usd: config.to_usd(product.base_price),
                source: PriceSource::BasePrice,
            },
        },
    }
}
