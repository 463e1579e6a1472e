use atelier::config::StorefrontConfig;
use atelier::lifecycle::Storefront;
use atelier::model::{MaterialSpec, PriceSource, Product, ProductId, StoneRole};
use atelier::notify::NotificationLevel;
use atelier::pricing::authoritative_price;
use atelier::session::{Draft, Section, SessionError, SessionHandle, SessionState};
use atelier_framework::mock::MockTransport;
use atelier_framework::{ApiError, Method, RetryPolicy};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::Notify;

const PRODUCT_PATH: &str = "/api/products/7";

fn ring_json(details: Value) -> Value {
    json!({
        "id": 7,
        "name": "Solitaire",
        "basePrice": 45000,
        "details": details,
        "calculatedPriceINR": 40000,
        "calculatedPriceUSD": 481.93
    })
}

fn storefront(mock: &MockTransport) -> Storefront {
    let config = StorefrontConfig::default().with_retry(RetryPolicy::none());
    Storefront::with_transport(mock.transport(), config)
}

async fn open(mock: &MockTransport, storefront: &Storefront) -> SessionHandle {
    mock.expect(Method::Get, PRODUCT_PATH)
        .return_json(ring_json(json!({ "metalType": "Gold", "metalWeight": 4, "engraving": "A&R" })));
    storefront.open_session(ProductId(7)).await.unwrap()
}

async fn wait_for(session: &SessionHandle, state: SessionState) {
    for _ in 0..1000 {
        if session.snapshot().await.unwrap().state == state {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("session never reached {state:?}");
}

fn gold_ten_grams() -> MaterialSpec {
    MaterialSpec::new("Gold", 10.0)
}

/// A background refetch landing mid-save must not replace the optimistic
/// materials; once the save lands the price is recomputed.
#[tokio::test]
async fn test_refresh_is_ignored_while_save_in_flight() {
    let mock = MockTransport::new();
    let storefront = storefront(&mock);
    let session = open(&mock, &storefront).await;

    session.open(Section::Materials).await.unwrap();
    session
        .update_draft(Draft::Materials(gold_ten_grams()))
        .await
        .unwrap();

    let saved = ring_json(json!(r#"{"metalType":"Gold","metalWeight":10,"engraving":"A&R"}"#));
    let gate = Arc::new(Notify::new());
    mock.expect(Method::Patch, PRODUCT_PATH)
        .gated(gate.clone())
        .return_json(saved.clone());
    mock.expect(Method::Get, "/api/metal-types")
        .return_json(json!([{ "id": 1, "name": "Gold", "pricePerGram": 5000 }]));
    mock.expect(Method::Get, "/api/stone-types").return_json(json!([]));
    mock.expect(Method::Get, PRODUCT_PATH).return_json(saved);

    let submitting = session.clone();
    let submit = tokio::spawn(async move { submitting.submit().await });
    wait_for(&session, SessionState::Saving(Section::Materials)).await;

    let optimistic = session.snapshot().await.unwrap();
    assert_eq!(optimistic.product.material_spec().metal_weight, 10.0);
    assert_eq!(optimistic.product.calculated_price_inr, None);

    let stale: Product = serde_json::from_value(ring_json(json!({ "metalType": "Gold", "metalWeight": 4 }))).unwrap();
    assert!(!session.refresh(stale).await.unwrap());
    let still = session.snapshot().await.unwrap();
    assert_eq!(still.product.material_spec().metal_weight, 10.0);

    gate.notify_one();
    let product = submit.await.unwrap().unwrap();
    let spec = product.material_spec();
    assert_eq!(spec.metal_weight, 10.0);
    assert!(!spec.slot(StoneRole::Primary).is_used());

    let done = session.snapshot().await.unwrap();
    assert_eq!(done.state, SessionState::Idle);
    assert_eq!(done.draft, None);
    let price = done.price.unwrap();
    assert_eq!(price.metal_cost, 50000.0);
    assert_eq!(price.total_inr, 62500.0);
    assert_eq!(price.total_usd, 753.01);

    mock.verify();
    drop(session);
    storefront.shutdown().await.unwrap();
}

/// Pricing something else while the session recomputes must not cancel
/// the session's own recompute.
#[tokio::test]
async fn test_other_pricing_does_not_supersede_session_recompute() {
    let mock = MockTransport::new();
    let storefront = storefront(&mock);
    let session = open(&mock, &storefront).await;

    // Stones cached up front so only the metal fetches hit the transport.
    mock.expect(Method::Get, "/api/stone-types").return_json(json!([]));
    storefront.catalog.stones().list().await.unwrap();

    session.open(Section::Materials).await.unwrap();
    session
        .update_draft(Draft::Materials(gold_ten_grams()))
        .await
        .unwrap();

    let saved = ring_json(json!(r#"{"metalType":"Gold","metalWeight":10}"#));
    let rates = json!([{ "id": 1, "name": "Gold", "pricePerGram": 5000 }]);
    let rates_gate = Arc::new(Notify::new());
    mock.expect(Method::Patch, PRODUCT_PATH).return_json(saved.clone());
    mock.expect(Method::Get, "/api/metal-types")
        .gated(rates_gate.clone())
        .return_json(rates.clone());
    mock.expect(Method::Get, "/api/metal-types").return_json(rates);
    mock.expect(Method::Get, PRODUCT_PATH).return_json(saved);

    let submitting = session.clone();
    let submit = tokio::spawn(async move { submitting.submit().await });
    for _ in 0..1000 {
        if mock.count(Method::Get, "/api/metal-types") == 1 {
            break;
        }
        tokio::task::yield_now().await;
    }
    assert_eq!(mock.count(Method::Get, "/api/metal-types"), 1);

    let other = storefront
        .price
        .calculate(MaterialSpec::new("Gold", 1.0))
        .await
        .unwrap();
    assert_eq!(other.total_inr, 6250.0);

    rates_gate.notify_one();
    let product = submit.await.unwrap().unwrap();
    assert_eq!(product.material_spec().metal_weight, 10.0);

    let done = session.snapshot().await.unwrap();
    assert_eq!(done.state, SessionState::Idle);
    assert_eq!(done.price.map(|p| p.total_inr), Some(62500.0));

    mock.verify();
    drop(session);
    storefront.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_failed_save_rolls_back_and_keeps_draft() {
    let mock = MockTransport::new();
    let storefront = storefront(&mock);
    let mut notifications = storefront.notifications.subscribe();
    let session = open(&mock, &storefront).await;

    session.open(Section::Materials).await.unwrap();
    let draft = Draft::Materials(gold_ten_grams());
    session.update_draft(draft.clone()).await.unwrap();

    mock.expect(Method::Patch, PRODUCT_PATH).return_err(ApiError::Server {
        status: 500,
        message: "database unavailable".into(),
    });

    let err = session.submit().await.unwrap_err();
    assert!(matches!(
        err,
        SessionError::Save { section: Section::Materials, .. }
    ));

    let snapshot = session.snapshot().await.unwrap();
    assert_eq!(snapshot.state, SessionState::Editing(Section::Materials));
    assert_eq!(snapshot.draft, Some(draft));
    assert_eq!(snapshot.product.material_spec().metal_weight, 4.0);
    assert_eq!(snapshot.product.calculated_price_inr, Some(40000.0));

    let notification = notifications.recv().await.unwrap();
    assert_eq!(notification.level, NotificationLevel::Error);
    assert!(notification.message.contains("materials"));

    // Refreshes apply again once the save is over
    let fresh: Product = serde_json::from_value(ring_json(json!({ "metalType": "Silver", "metalWeight": 4 }))).unwrap();
    assert!(session.refresh(fresh).await.unwrap());

    mock.verify();
    drop(session);
    storefront.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_expired_login_asks_for_sign_in() {
    let mock = MockTransport::new();
    let storefront = storefront(&mock);
    let mut notifications = storefront.notifications.subscribe();
    let session = open(&mock, &storefront).await;

    session.open(Section::Basic).await.unwrap();
    mock.expect(Method::Patch, PRODUCT_PATH)
        .return_err(ApiError::Unauthorized);

    let err = session.submit().await.unwrap_err();
    assert!(err.requires_login());
    let notification = notifications.recv().await.unwrap();
    assert_eq!(notification.level, NotificationLevel::LoginRequired);

    drop(session);
    storefront.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_submit_outside_editing_is_rejected() {
    let mock = MockTransport::new();
    let storefront = storefront(&mock);
    let session = open(&mock, &storefront).await;

    let err = session.submit().await.unwrap_err();
    assert!(matches!(
        err,
        SessionError::InvalidTransition { state: SessionState::Idle, .. }
    ));

    session.open(Section::Image).await.unwrap();
    let err = session.submit().await.unwrap_err();
    assert!(matches!(err, SessionError::EmptyDraft(Section::Image)));
    assert_eq!(
        session.snapshot().await.unwrap().state,
        SessionState::Editing(Section::Image)
    );

    session.cancel().await.unwrap();
    assert_eq!(session.snapshot().await.unwrap().state, SessionState::Idle);
    assert!(mock.requests().iter().all(|r| r.method == Method::Get));

    drop(session);
    storefront.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_displayed_price_prefers_server_snapshot() {
    let mock = MockTransport::new();
    let storefront = storefront(&mock);
    let session = open(&mock, &storefront).await;

    let product = session.snapshot().await.unwrap().product;
    let shown = authoritative_price(&product, None, &storefront.config.pricing);
    assert_eq!(shown.source, PriceSource::ServerSnapshot);
    assert_eq!(shown.inr, 40000.0);

    drop(session);
    storefront.shutdown().await.unwrap();
}
