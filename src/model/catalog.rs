//! Admin-configurable metal and stone catalogs. They are the rate tables the
//! pricing calculator reads.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetalType {
    pub id: u32,
    pub name: String,
    /// INR per gram.
    pub price_per_gram: f64,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoneType {
    pub id: u32,
    pub name: String,
    /// INR per carat.
    pub price_per_carat: f64,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetalTypeForm {
    pub name: String,
    pub price_per_gram: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoneTypeForm {
    pub name: String,
    pub price_per_carat: f64,
}
