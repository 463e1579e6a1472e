use atelier_framework::{
    ApiError, ApiRequest, Body, CacheActor, FilePart, HttpTransport, Method, Resource,
    ResourceClient, Transport,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// --- Test Resource ---

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Badge {
    id: u32,
    label: String,
    is_active: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BadgeForm {
    label: String,
    is_active: bool,
}

impl Resource for Badge {
    type Id = u32;
    type Create = BadgeForm;
    type Update = BadgeForm;
    const COLLECTION: &'static str = "/api/badges";

    fn id(&self) -> &u32 {
        &self.id
    }
}

fn transport(server: &MockServer) -> HttpTransport {
    HttpTransport::new(server.uri(), Duration::from_secs(5))
        .unwrap()
        .with_token("secret")
}

#[tokio::test]
async fn test_http_transport_sends_bearer_and_decodes_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/badges"))
        .and(header("authorization", "Bearer secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "label": "New", "isActive": true }
        ])))
        .mount(&server)
        .await;

    let value = transport(&server)
        .send(ApiRequest::get("/api/badges"))
        .await
        .unwrap();
    assert_eq!(value[0]["label"], "New");
}

#[tokio::test]
async fn test_http_transport_maps_status_codes() {
    let server = MockServer::start().await;
    Mock::given(path("/api/admin/contact/1"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(path("/api/badges/9"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such badge"))
        .mount(&server)
        .await;
    Mock::given(path("/api/badges"))
        .respond_with(ResponseTemplate::new(400).set_body_string("label required"))
        .mount(&server)
        .await;
    Mock::given(path("/api/products/featured"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let transport = transport(&server);

    let err = transport
        .send(ApiRequest::get("/api/admin/contact/1"))
        .await
        .unwrap_err();
    assert!(err.requires_login());

    let err = transport.send(ApiRequest::get("/api/badges/9")).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(ref body) if body == "no such badge"));

    let err = transport
        .send(ApiRequest::post("/api/badges", json!({})))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));

    let err = transport
        .send(ApiRequest::get("/api/products/featured"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Server { status: 503, .. }));
}

#[tokio::test]
async fn test_http_transport_empty_body_is_null() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/badges/3"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let value = transport(&server)
        .send(ApiRequest::delete("/api/badges/3"))
        .await
        .unwrap();
    assert!(value.is_null());
}

#[tokio::test]
async fn test_http_transport_multipart_upload() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/products/5/image"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 5 })))
        .expect(1)
        .mount(&server)
        .await;

    let request = ApiRequest::new(
        Method::Patch,
        "/api/products/5/image",
        Body::Multipart(FilePart {
            field: "mainImage".into(),
            file_name: "ring.png".into(),
            content_type: "image/png".into(),
            bytes: vec![0x89, 0x50, 0x4e, 0x47],
        }),
    );
    let value = transport(&server).send(request).await.unwrap();
    assert_eq!(value["id"], 5);

    let received = server.received_requests().await.unwrap();
    let content_type = received[0]
        .headers
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("multipart/form-data"));
    let body = String::from_utf8_lossy(&received[0].body);
    assert!(body.contains("name=\"mainImage\""));
}

/// Full lifecycle through the generic client against a real HTTP server.
#[tokio::test]
async fn test_resource_client_lifecycle_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/badges"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/badges"))
        .and(body_json(json!({ "label": "Bestseller", "isActive": true })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 7, "label": "Bestseller", "isActive": true
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/badges"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 7, "label": "Bestseller", "isActive": true }
        ])))
        .mount(&server)
        .await;

    let (actor, cache) = CacheActor::new(16);
    tokio::spawn(actor.run());
    let client: ResourceClient<Badge> = ResourceClient::new(Arc::new(transport(&server)), cache);

    assert!(client.list().await.unwrap().is_empty());
    // Served from cache, the first mock only answers once
    assert!(client.list().await.unwrap().is_empty());

    let created = client
        .create(BadgeForm {
            label: "Bestseller".into(),
            is_active: true,
        })
        .await
        .unwrap();
    assert_eq!(created.id, 7);

    // Create invalidated the cached list
    let listed = client.list().await.unwrap();
    assert_eq!(listed, vec![created]);
}
