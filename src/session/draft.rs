//! Local form state for one section, and how it turns into a save request.

use super::{Section, SessionError};
use crate::clients::image_request;
use crate::details::{merge_ai_inputs, merge_material_spec};
use crate::model::{ImageUpload, MaterialSpec, Product, ProductId, ProductUpdate};
use atelier_framework::{ApiError, ApiRequest, Resource};
use serde_json::Value;

/// The basic-info form.
#[derive(Debug, Clone, PartialEq)]
pub struct BasicInfo {
    pub name: String,
    pub description: String,
    pub base_price: f64,
    pub is_new: bool,
    pub is_bestseller: bool,
    pub is_featured: bool,
    pub product_type_id: Option<u32>,
}

impl From<&Product> for BasicInfo {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone().unwrap_or_default(),
            base_price: product.base_price,
            is_new: product.is_new,
            is_bestseller: product.is_bestseller,
            is_featured: product.is_featured,
            product_type_id: product.product_type_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Draft {
    Basic(BasicInfo),
    Materials(MaterialSpec),
    /// `None` until the user picks a file.
    Image(Option<ImageUpload>),
}

/// A save ready to send, with the product as it should look once it lands.
#[derive(Debug, Clone)]
pub struct PreparedSave {
    pub request: ApiRequest,
    pub optimistic: Product,
}

impl Draft {
    /// A draft pre-filled from what is currently displayed.
    pub fn from_product(section: Section, product: &Product) -> Self {
        match section {
            Section::Basic => Draft::Basic(BasicInfo::from(product)),
            Section::Materials => Draft::Materials(product.material_spec()),
            Section::Image => Draft::Image(None),
        }
    }

    pub fn section(&self) -> Section {
        match self {
            Draft::Basic(_) => Section::Basic,
            Draft::Materials(_) => Section::Materials,
            Draft::Image(_) => Section::Image,
        }
    }

    /// Builds the request for this draft against `displayed`.
    ///
    /// Materials are merged into the existing details blob, which is then
    /// sent whole.
    pub fn prepare(&self, displayed: &Product) -> Result<PreparedSave, SessionError> {
        let id = displayed.id;
        let mut optimistic = displayed.clone();

        let request = match self {
            Draft::Basic(info) => {
                let update = ProductUpdate {
                    name: Some(info.name.trim().to_string()),
                    description: Some(info.description.clone()),
                    base_price: Some(info.base_price),
                    is_new: Some(info.is_new),
                    is_bestseller: Some(info.is_bestseller),
                    is_featured: Some(info.is_featured),
                    product_type_id: info.product_type_id,
                    ..Default::default()
                };
                Product::validate_update(&update)?;

                optimistic.name = info.name.trim().to_string();
                optimistic.description = Some(info.description.clone());
                optimistic.base_price = info.base_price;
                optimistic.is_new = info.is_new;
                optimistic.is_bestseller = info.is_bestseller;
                optimistic.is_featured = info.is_featured;
                optimistic.product_type_id = info.product_type_id;
                patch(id, &update)?
            }
            Draft::Materials(spec) => {
                let blob = merge_material_spec(displayed.details.as_ref(), spec);
                // The product's own aiInputs outranks additionalData when read back.
                let ai_inputs = displayed
                    .ai_inputs
                    .as_ref()
                    .and_then(|existing| merge_ai_inputs(existing, spec));
                let update = ProductUpdate {
                    details: Some(blob.clone()),
                    ai_inputs: ai_inputs.clone(),
                    ..Default::default()
                };

                optimistic.details = Some(Value::String(blob));
                if ai_inputs.is_some() {
                    optimistic.ai_inputs = ai_inputs;
                }
                // The cached totals priced the old materials.
                optimistic.calculated_price_inr = None;
                optimistic.calculated_price_usd = None;
                patch(id, &update)?
            }
            Draft::Image(Some(image)) => image_request(id, image.clone()),
            Draft::Image(None) => return Err(SessionError::EmptyDraft(Section::Image)),
        };

        Ok(PreparedSave {
            request,
            optimistic,
        })
    }
}

fn patch(id: ProductId, update: &ProductUpdate) -> Result<ApiRequest, SessionError> {
    let body = serde_json::to_value(update).map_err(ApiError::from)?;
    Ok(ApiRequest::patch(Product::item_path(&id), body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::details::extract_material_spec;
    use crate::model::StoneRole;
    use atelier_framework::{Body, Method};
    use serde_json::json;

    fn ring() -> Product {
        let mut product = Product::new(7, "Solitaire", 45000.0);
        product.details = Some(json!({ "metalType": "Gold", "metalWeight": 4, "engraving": "A&R" }));
        product.calculated_price_inr = Some(70000.0);
        product
    }

    #[test]
    fn test_materials_draft_rewrites_details() {
        let spec = MaterialSpec::new("Platinum", 5.0).with_stone(StoneRole::Primary, "Diamond", 1.0);
        let prepared = Draft::Materials(spec.clone()).prepare(&ring()).unwrap();

        assert_eq!(prepared.request.method, Method::Patch);
        assert_eq!(prepared.request.path, "/api/products/7");
        let body = prepared.request.json().unwrap();
        let sent_details = body["details"].clone();
        assert!(sent_details.is_string());
        assert_eq!(extract_material_spec(Some(&sent_details), None), spec);
        assert!(sent_details.as_str().unwrap().contains("engraving"));

        assert_eq!(prepared.optimistic.material_spec(), spec);
        assert_eq!(prepared.optimistic.calculated_price_inr, None);
    }

    #[test]
    fn test_materials_draft_rewrites_product_ai_inputs() {
        let mut product = ring();
        product.ai_inputs = Some(json!(r#"{"primaryStone":"Ruby","primaryStoneWeight":2,"mood":"bold"}"#));
        let spec = MaterialSpec::new("Gold", 4.0).with_stone(StoneRole::Primary, "Ruby", 0.0);

        let prepared = Draft::Materials(spec.clone()).prepare(&product).unwrap();
        let body = prepared.request.json().unwrap();
        assert_eq!(body["aiInputs"]["primaryStoneWeight"], 0.0);
        assert_eq!(body["aiInputs"]["mood"], "bold");

        let sent_details = body["details"].clone();
        assert_eq!(
            extract_material_spec(Some(&sent_details), Some(&body["aiInputs"])),
            spec
        );
        assert_eq!(prepared.optimistic.material_spec(), spec);

        // Without its own aiInputs nothing extra is sent
        let prepared = Draft::Materials(spec).prepare(&ring()).unwrap();
        assert!(prepared.request.json().unwrap().get("aiInputs").is_none());
    }

    #[test]
    fn test_basic_draft_validates() {
        let mut info = BasicInfo::from(&ring());
        info.name = " ".into();
        assert!(matches!(
            Draft::Basic(info).prepare(&ring()),
            Err(SessionError::Api(ApiError::Validation(_)))
        ));
    }

    #[test]
    fn test_image_draft() {
        assert!(matches!(
            Draft::from_product(Section::Image, &ring()).prepare(&ring()),
            Err(SessionError::EmptyDraft(Section::Image))
        ));

        let upload = ImageUpload {
            file_name: "front.jpg".into(),
            content_type: "image/jpeg".into(),
            bytes: vec![0xff, 0xd8],
        };
        let prepared = Draft::Image(Some(upload)).prepare(&ring()).unwrap();
        assert_eq!(prepared.request.path, "/api/products/7/image");
        assert!(matches!(prepared.request.body, Body::Multipart(ref part) if part.field == "mainImage"));
    }
}
