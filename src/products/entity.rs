use crate::model::{Product, ProductCreate, ProductId, ProductTab, ProductUpdate};
use atelier_framework::{ApiError, Method, Resource, Searchable};

pub const PRODUCTS_PATH: &str = "/api/products";
pub const FEATURED_PATH: &str = "/api/products/featured";

/// Read path that bypasses the admin session, used when the regular lookup fails.
pub fn direct_path(id: ProductId) -> String {
    format!("/api/direct-product/{id}")
}

pub fn image_path(id: ProductId) -> String {
    format!("{PRODUCTS_PATH}/{id}/image")
}

impl Resource for Product {
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    const COLLECTION: &'static str = PRODUCTS_PATH;
    const UPDATE_METHOD: Method = Method::Patch;

    fn id(&self) -> &ProductId {
        &self.id
    }

    fn validate_create(params: &ProductCreate) -> Result<(), ApiError> {
        if params.name.trim().is_empty() {
            return Err(ApiError::Validation("Product name is required".into()));
        }
        check_price(params.base_price)
    }

    fn validate_update(params: &ProductUpdate) -> Result<(), ApiError> {
        if matches!(&params.name, Some(name) if name.trim().is_empty()) {
            return Err(ApiError::Validation("Product name is required".into()));
        }
        params.base_price.map_or(Ok(()), check_price)
    }
}

fn check_price(price: f64) -> Result<(), ApiError> {
    if price.is_finite() && price >= 0.0 {
        Ok(())
    } else {
        Err(ApiError::Validation(format!("Invalid base price: {price}")))
    }
}

impl Searchable for Product {
    type Tab = ProductTab;

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        if let Some(description) = &self.description {
            fields.push(description);
        }
        fields
    }

    fn in_tab(&self, tab: ProductTab) -> bool {
        match tab {
            ProductTab::All => true,
            ProductTab::Featured => self.is_featured,
            ProductTab::New => self.is_new,
            ProductTab::Bestseller => self.is_bestseller,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_framework::ListFilter;

    #[test]
    fn test_paths() {
        assert_eq!(Product::item_path(&ProductId(4)), "/api/products/4");
        assert_eq!(direct_path(ProductId(4)), "/api/direct-product/4");
        assert_eq!(image_path(ProductId(4)), "/api/products/4/image");
    }

    #[test]
    fn test_tabs_and_search() {
        let mut halo = Product::new(1, "Halo Ring", 1000.0);
        halo.is_featured = true;
        let mut chain = Product::new(2, "Rope Chain", 1000.0);
        chain.description = Some("Heavy gold rope".into());
        chain.is_new = true;
        let items = [halo, chain];

        let featured = ListFilter::new().with_tab(ProductTab::Featured).apply(&items);
        assert_eq!(featured.len(), 1);
        assert_eq!(featured[0].name, "Halo Ring");

        let gold = ListFilter::<ProductTab>::new().with_search("GOLD").apply(&items);
        assert_eq!(gold.len(), 1);
        assert_eq!(gold[0].id, ProductId(2));

        assert!(ListFilter::new()
            .with_tab(ProductTab::Bestseller)
            .apply(&items)
            .is_empty());
    }

    #[test]
    fn test_update_validation() {
        let blank = ProductUpdate {
            name: Some("  ".into()),
            ..Default::default()
        };
        assert!(Product::validate_update(&blank).is_err());
        let negative = ProductUpdate {
            base_price: Some(-1.0),
            ..Default::default()
        };
        assert!(Product::validate_update(&negative).is_err());
        assert!(Product::validate_update(&ProductUpdate::default()).is_ok());
    }
}
