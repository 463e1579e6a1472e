use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Display;

/// Type-safe identifier for Products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u32);

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A catalog product as returned by `/api/products`.
///
/// `details` is the free-form blob carrying the material specification, the
/// AI-authored description and cached price snapshots. The server may send it
/// as an object or as a JSON-encoded string; read it through
/// [`details::extract_details`](crate::details::extract_details), never directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub details: Option<Value>,
    #[serde(default)]
    pub ai_inputs: Option<Value>,
    #[serde(default)]
    pub base_price: f64,
    #[serde(default, rename = "calculatedPriceUSD")]
    pub calculated_price_usd: Option<f64>,
    #[serde(default, rename = "calculatedPriceINR")]
    pub calculated_price_inr: Option<f64>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub additional_images: Vec<String>,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub is_bestseller: bool,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub product_type_id: Option<u32>,
}

impl Product {
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, base_price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            details: None,
            ai_inputs: None,
            base_price,
            calculated_price_usd: None,
            calculated_price_inr: None,
            image_url: None,
            additional_images: Vec::new(),
            is_new: false,
            is_bestseller: false,
            is_featured: false,
            product_type_id: None,
        }
    }

    /// Merchandising flags that are set, in display order.
    pub fn flags(&self) -> Vec<&'static str> {
        [
            (self.is_new, "New"),
            (self.is_bestseller, "Bestseller"),
            (self.is_featured, "Featured"),
        ]
        .into_iter()
        .filter_map(|(set, label)| set.then_some(label))
        .collect()
    }
}

/// Payload for `POST /api/products`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreate {
    pub name: String,
    pub description: String,
    pub base_price: f64,
    /// Serialized details blob, see [`details::merge_material_spec`](crate::details::merge_material_spec).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    pub is_new: bool,
    pub is_bestseller: bool,
    pub is_featured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_type_id: Option<u32>,
}

/// Partial update for `PATCH /api/products/{id}`. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_inputs: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_new: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_bestseller: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_type_id: Option<u32>,
}

/// Admin product list tabs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProductTab {
    #[default]
    All,
    Featured,
    New,
    Bestseller,
}

/// An image selected for upload as the product's main image.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decodes_server_payload() {
        let product: Product = serde_json::from_value(json!({
            "id": 12,
            "name": "Solitaire Ring",
            "description": null,
            "details": "{\"metalType\":\"Gold\"}",
            "basePrice": 45000,
            "calculatedPriceUSD": 753.01,
            "isFeatured": true
        }))
        .unwrap();
        assert_eq!(product.id, ProductId(12));
        assert_eq!(product.calculated_price_usd, Some(753.01));
        assert_eq!(product.calculated_price_inr, None);
        assert!(product.details.as_ref().unwrap().is_string());
        assert_eq!(product.flags(), vec!["Featured"]);
    }

    #[test]
    fn test_update_skips_unset_fields() {
        let update = ProductUpdate {
            name: Some("Halo Pendant".into()),
            is_new: Some(false),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({ "name": "Halo Pendant", "isNew": false })
        );
    }
}
