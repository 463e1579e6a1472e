use serde::{Deserialize, Serialize};
use validator::Validate;

/// A customer's request for a bespoke piece.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CustomDesignRequest {
    #[validate(length(min = 2, max = 100, message = "Please enter your full name"))]
    pub full_name: String,
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 7, max = 20, message = "Please enter a valid phone number"))]
    pub phone: String,
    #[validate(length(min = 1, message = "Please choose a metal"))]
    pub metal_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_stone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1000.0, message = "Budget must be at least ₹1,000"))]
    pub budget_inr: Option<f64>,
    #[validate(length(
        min = 10,
        max = 2000,
        message = "Describe your design in 10 to 2000 characters"
    ))]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(url(message = "Reference image must be a URL"))]
    pub reference_image_url: Option<String>,
}

/// Server acknowledgement of a submitted design request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomDesignReceipt {
    pub id: u32,
    #[serde(default)]
    pub status: Option<String>,
}
