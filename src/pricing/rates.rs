use crate::model::{MetalType, StoneType};
use async_trait::async_trait;
use atelier_framework::ApiError;
use std::collections::HashMap;
use tracing::debug;

/// Per-gram metal rates and per-carat stone rates, in INR.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateTable {
    metals: HashMap<String, f64>,
    stones: HashMap<String, f64>,
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

impl RateTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_catalog(metals: &[MetalType], stones: &[StoneType]) -> Self {
        let mut table = Self::new();
        for metal in metals {
            table.set_metal(&metal.name, metal.price_per_gram);
        }
        for stone in stones {
            table.set_stone(&stone.name, stone.price_per_carat);
        }
        table
    }

    pub fn with_metal(mut self, name: &str, per_gram: f64) -> Self {
        self.set_metal(name, per_gram);
        self
    }

    pub fn with_stone(mut self, name: &str, per_carat: f64) -> Self {
        self.set_stone(name, per_carat);
        self
    }

    pub fn set_metal(&mut self, name: &str, per_gram: f64) {
        self.metals.insert(normalize(name), per_gram);
    }

    pub fn set_stone(&mut self, name: &str, per_carat: f64) {
        self.stones.insert(normalize(name), per_carat);
    }

    /// Case-insensitive lookup.
    pub fn metal_rate(&self, name: &str) -> Option<f64> {
        self.metals.get(&normalize(name)).copied()
    }

    /// Case-insensitive lookup.
    pub fn stone_rate(&self, name: &str) -> Option<f64> {
        self.stones.get(&normalize(name)).copied()
    }
}

/// Where rates come from: the admin-configured metal and stone catalogs.
#[async_trait]
pub trait RateSource: Send + Sync + 'static {
    async fn metal_types(&self) -> Result<Vec<MetalType>, ApiError>;
    async fn stone_types(&self) -> Result<Vec<StoneType>, ApiError>;
}

/// Fetches both catalogs concurrently and builds the rate table.
pub async fn load_rates(source: &dyn RateSource) -> Result<RateTable, ApiError> {
    let (metals, stones) = tokio::try_join!(source.metal_types(), source.stone_types())?;
    debug!(metals = metals.len(), stones = stones.len(), "Loaded rate catalogs");
    Ok(RateTable::from_catalog(&metals, &stones))
}
