use crate::model::{ProductType, ProductTypeForm, ProductTypeTab};
use atelier_framework::{ApiError, Resource, Searchable};
use validator::Validate;

impl Resource for ProductType {
    type Id = u32;
    type Create = ProductTypeForm;
    type Update = ProductTypeForm;
    const COLLECTION: &'static str = "/api/product-types";

    fn id(&self) -> &u32 {
        &self.id
    }

    fn validate_create(params: &ProductTypeForm) -> Result<(), ApiError> {
        params
            .validate()
            .map_err(|e| ApiError::Validation(e.to_string()))
    }

    fn validate_update(params: &ProductTypeForm) -> Result<(), ApiError> {
        Self::validate_create(params)
    }
}

impl Searchable for ProductType {
    type Tab = ProductTypeTab;

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        fields.extend(self.description.as_deref());
        fields
    }

    fn in_tab(&self, tab: ProductTypeTab) -> bool {
        match tab {
            ProductTypeTab::All => true,
            ProductTypeTab::Active => self.is_active,
            ProductTypeTab::Inactive => !self.is_active,
        }
    }
}
