use serde::{Deserialize, Serialize};

/// Cost breakdown for one material specification, in INR.
///
/// Derived locally; the server only stores the totals as a snapshot.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub metal_cost: f64,
    pub primary_stone_cost: f64,
    pub secondary_stone_cost: f64,
    pub other_stone_cost: f64,
    pub subtotal: f64,
    pub overhead: f64,
    pub total_inr: f64,
    pub total_usd: f64,
    /// Metal or stone names that had no rate and were priced at zero.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_rates: Vec<String>,
}

impl PriceBreakdown {
    pub fn stone_costs(&self) -> [f64; 3] {
        [
            self.primary_stone_cost,
            self.secondary_stone_cost,
            self.other_stone_cost,
        ]
    }

    pub fn is_partial(&self) -> bool {
        !self.missing_rates.is_empty()
    }
}

/// Where a displayed price came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceSource {
    /// Totals cached by the server on the product or in its details blob.
    ServerSnapshot,
    /// Freshly computed from the material specification.
    Recomputed,
    /// The product's base price, nothing better available.
    BasePrice,
}

/// The price shown to customers, with its provenance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayPrice {
    pub inr: f64,
    pub usd: f64,
    pub source: PriceSource,
}
