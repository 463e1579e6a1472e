use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

pub const NAME_MIN_CHARS: usize = 2;
pub const NAME_MAX_CHARS: usize = 50;

fn default_active() -> bool {
    true
}

/// A product category managed in the back office.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductType {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

/// Create and edit form for product types, sent as-is to the server.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductTypeForm {
    #[validate(custom(function = "validate_type_name"))]
    pub name: String,
    #[validate(length(max = 500, message = "Description must be less than 500 characters"))]
    pub description: String,
    pub display_order: i32,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl ProductTypeForm {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            display_order: 0,
            is_active: true,
            icon: None,
            color: None,
        }
    }
}

/// Length bounds apply to the trimmed name.
fn validate_type_name(name: &str) -> Result<(), ValidationError> {
    let chars = name.trim().chars().count();
    if (NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&chars) {
        Ok(())
    } else {
        Err(ValidationError::new("length").with_message(Cow::Borrowed(
            "Name must be between 2 and 50 characters",
        )))
    }
}

impl From<&ProductType> for ProductTypeForm {
    fn from(existing: &ProductType) -> Self {
        Self {
            name: existing.name.clone(),
            description: existing.description.clone().unwrap_or_default(),
            display_order: existing.display_order,
            is_active: existing.is_active,
            icon: existing.icon.clone(),
            color: existing.color.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProductTypeTab {
    #[default]
    All,
    Active,
    Inactive,
}
