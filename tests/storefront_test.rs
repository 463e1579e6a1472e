use atelier::card::{CardCapabilities, ProductCard};
use atelier::carousel::FeaturedCarousel;
use atelier::config::StorefrontConfig;
use atelier::details::merge_material_spec;
use atelier::lifecycle::Storefront;
use atelier::model::{CustomDesignRequest, MaterialSpec, PriceSource, Product, StoneRole, StoneSlot};
use atelier::pricing::calculate;
use atelier_framework::mock::MockTransport;
use atelier_framework::{ApiError, Method};
use serde_json::{json, Value};

fn storefront(mock: &MockTransport) -> Storefront {
    Storefront::with_transport(mock.transport(), StorefrontConfig::default())
}

fn catalog(mock: &MockTransport) {
    mock.expect(Method::Get, "/api/metal-types").return_json(json!([
        { "id": 1, "name": "Gold", "pricePerGram": 5000 },
        { "id": 2, "name": "Silver", "pricePerGram": 90 }
    ]));
    mock.expect(Method::Get, "/api/stone-types").return_json(json!([
        { "id": 1, "name": "Diamond", "pricePerCarat": 60000 },
        { "id": 2, "name": "Ruby", "pricePerCarat": 20000 }
    ]));
}

/// A record written before materials moved to the root still prices
/// correctly, and placeholder stones cost nothing.
#[tokio::test]
async fn test_legacy_details_price_through_catalog_rates() {
    let mock = MockTransport::new();
    let storefront = storefront(&mock);
    catalog(&mock);

    let mut product = Product::new(11, "Heirloom Band", 30000.0);
    product.details = Some(json!(r#"{
        "additionalData": {
            "metalType": "Gold", "metalWeight": "3.5 g",
            "primaryStone": "Diamond", "primaryStoneWeight": "0.5",
            "secondaryStone": "none_selected", "secondaryStoneWeight": 2
        }
    }"#));

    let spec = product.material_spec();
    assert_eq!(spec.metal_weight, 3.5);
    assert_eq!(spec.slot(StoneRole::Primary), &StoneSlot::new("Diamond", 0.5));
    assert!(!spec.slot(StoneRole::Secondary).is_used());

    let rates = storefront.catalog.rate_table().await.unwrap();
    let breakdown = calculate(&spec, &rates, &storefront.config.pricing);
    assert_eq!(breakdown.metal_cost, 17500.0);
    assert_eq!(breakdown.primary_stone_cost, 30000.0);
    assert_eq!(breakdown.secondary_stone_cost, 0.0);
    assert_eq!(breakdown.subtotal, 47500.0);
    assert_eq!(breakdown.total_inr, 59375.0);
    assert!(breakdown.missing_rates.is_empty());

    // Priced again from the cached catalog, no new requests
    let again = storefront.price.calculate(spec.clone()).await.unwrap();
    assert_eq!(again, breakdown);

    let card = ProductCard::build(
        &product,
        CardCapabilities::detail_page(),
        Some(&breakdown),
        &storefront.config.pricing,
    );
    assert_eq!(card.price.source, PriceSource::Recomputed);
    assert_eq!(card.price_inr, "₹59,375");
    assert_eq!(card.materials[0], "Gold · 3.5g");

    mock.verify();
    assert_eq!(mock.count(Method::Get, "/api/metal-types"), 1);
    storefront.shutdown().await.unwrap();
}

#[test]
fn test_merged_details_keep_unrelated_keys_and_reload() {
    let existing = json!({
        "engraving": "Always",
        "calculatedPriceINR": 12000,
        "additionalData": { "metalType": "Silver", "ringSize": 12 }
    });
    let spec = MaterialSpec::new("Gold", 4.25).with_stone(StoneRole::Other, "Emerald", 0.3);

    let merged = merge_material_spec(Some(&existing), &spec);
    let blob: Value = serde_json::from_str(&merged).unwrap();
    assert_eq!(blob["engraving"], "Always");
    assert_eq!(blob["additionalData"]["ringSize"], 12);
    assert_eq!(blob["additionalData"]["metalType"], "Gold");
    assert!(blob.get("calculatedPriceINR").is_none());

    let mut product = Product::new(2, "Emerald Band", 0.0);
    product.details = Some(Value::String(merged));
    assert_eq!(product.material_spec(), spec);
}

#[tokio::test]
async fn test_featured_carousel_cards() {
    let mock = MockTransport::new();
    let storefront = storefront(&mock);
    mock.expect(Method::Get, "/api/products/featured").return_json(json!([
        { "id": 1, "name": "Lotus Studs", "basePrice": 4150, "isFeatured": true },
        { "id": 2, "name": "Temple Necklace", "basePrice": 0, "isFeatured": true,
          "calculatedPriceINR": 249000, "calculatedPriceUSD": 3000 },
        { "id": 3, "name": "Kundan Ring", "basePrice": 8300, "isFeatured": true, "isNew": true }
    ]));

    let mut carousel = FeaturedCarousel::load(&storefront.products, 2).await.unwrap();
    assert_eq!(carousel.page_count(), 2);

    let cards: Vec<ProductCard> = carousel
        .visible()
        .iter()
        .map(|p| ProductCard::build(p, CardCapabilities::listing(), None, &storefront.config.pricing))
        .collect();
    assert_eq!(cards[0].price_usd, "$50.00");
    assert_eq!(cards[0].price.source, PriceSource::BasePrice);
    assert_eq!(cards[1].price_inr, "₹2,49,000");
    assert_eq!(cards[1].price.source, PriceSource::ServerSnapshot);

    carousel.next();
    assert_eq!(carousel.visible()[0].name, "Kundan Ring");
    assert_eq!(
        ProductCard::build(&carousel.visible()[0], CardCapabilities::listing(), None, &storefront.config.pricing).flags,
        vec!["New", "Featured"]
    );

    // Cached for the next carousel
    FeaturedCarousel::load(&storefront.products, 2).await.unwrap();
    mock.verify();
    storefront.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_custom_design_request_is_validated_before_sending() {
    let mock = MockTransport::new();
    let storefront = storefront(&mock);

    let mut request = CustomDesignRequest {
        full_name: "Kavya Rao".into(),
        email: "kavya@example.com".into(),
        phone: "+91 98450 12345".into(),
        metal_type: "Gold".into(),
        primary_stone: Some("Pearl".into()),
        budget_inr: Some(150000.0),
        description: "A pair of jhumkas with pearl drops".into(),
        reference_image_url: None,
    };

    let bad = CustomDesignRequest {
        email: "not-an-email".into(),
        ..request.clone()
    };
    let err = storefront.designs.submit(bad).await.unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
    assert!(mock.requests().is_empty());

    mock.expect(Method::Post, "/api/custom-designs")
        .return_json(json!({ "id": 31, "status": "received" }));
    request.description.push_str(" for a wedding in March");
    let receipt = storefront.designs.submit(request).await.unwrap();
    assert_eq!(receipt.id, 31);

    mock.verify();
    storefront.shutdown().await.unwrap();
}
