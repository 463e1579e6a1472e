use super::RateTable;
use crate::model::{MaterialSpec, PriceBreakdown, StoneRole};
use tracing::warn;

/// Overhead and exchange rate applied on top of material costs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceConfig {
    /// Percentage of the materials subtotal added as overhead.
    pub overhead_percent: f64,
    /// INR per USD.
    pub inr_per_usd: f64,
}

impl Default for PriceConfig {
    fn default() -> Self {
        Self {
            overhead_percent: 25.0,
            inr_per_usd: 83.0,
        }
    }
}

impl PriceConfig {
    /// Rounded to two decimals. Zero when no exchange rate is configured.
    pub fn to_usd(&self, inr: f64) -> f64 {
        if self.inr_per_usd > 0.0 {
            round2(inr / self.inr_per_usd)
        } else {
            0.0
        }
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Prices a material specification.
///
/// Each line costs weight × rate. Unused stone slots cost exactly zero
/// whatever their carats. A metal or stone without a rate costs zero and is
/// listed in `missing_rates`.
pub fn calculate(spec: &MaterialSpec, rates: &RateTable, config: &PriceConfig) -> PriceBreakdown {
    let mut missing = Vec::new();

    let metal_cost = if spec.metal_weight > 0.0 {
        match rates.metal_rate(&spec.metal_type) {
            Some(rate) => spec.metal_weight * rate,
            None => {
                missing.push(spec.metal_type.clone());
                0.0
            }
        }
    } else {
        0.0
    };

    let mut stone_cost = |role: StoneRole| -> f64 {
        let slot = spec.slot(role);
        let Some(stone) = slot.stone.as_deref() else {
            return 0.0;
        };
        match rates.stone_rate(stone) {
            Some(rate) => slot.carats.max(0.0) * rate,
            None => {
                missing.push(stone.to_string());
                0.0
            }
        }
    };
    let primary_stone_cost = stone_cost(StoneRole::Primary);
    let secondary_stone_cost = stone_cost(StoneRole::Secondary);
    let other_stone_cost = stone_cost(StoneRole::Other);

    if !missing.is_empty() {
        warn!(missing = ?missing, "No rate for some materials, priced at zero");
    }

    let subtotal = metal_cost + primary_stone_cost + secondary_stone_cost + other_stone_cost;
    let overhead = (subtotal * (config.overhead_percent / 100.0)).round();
    let total_inr = subtotal + overhead;

    PriceBreakdown {
        metal_cost,
        primary_stone_cost,
        secondary_stone_cost,
        other_stone_cost,
        subtotal,
        overhead,
        total_inr,
        total_usd: config.to_usd(total_inr),
        missing_rates: missing,
    }
}
