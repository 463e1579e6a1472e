//! # Mock Transport & Testing Guide
//!
//! `MockTransport` implements [`Transport`] entirely in memory. Tests queue
//! expectations (verb + path + canned response), hand the transport to the
//! code under test, and finally call [`MockTransport::verify`].
//!
//! ## When to use the mock vs a real server
//!
//! | Feature | MockTransport | wiremock + HttpTransport |
//! |---------|---------------|--------------------------|
//! | **Speed** | Instant | Fast, but binds a socket |
//! | **Scope** | Client, cache, session logic | Wire encoding, status mapping |
//! | **Error Injection** | `return_err(ApiError::..)` | Status codes only |
//! | **Timing control** | `gated` / `delayed` responses | Fixed delays |
//!
//! ## Example
//!
//! ```rust
//! use atelier_framework::mock::MockTransport;
//! use atelier_framework::{ApiError, ApiRequest, Method, Transport};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockTransport::new();
//!     mock.expect(Method::Get, "/api/metal-types")
//!         .return_json(json!([{ "id": 1, "name": "Gold", "pricePerGram": 5000 }]));
//!     mock.expect(Method::Get, "/api/stone-types")
//!         .return_err(ApiError::Unauthorized);
//!
//!     let metals = mock.send(ApiRequest::get("/api/metal-types")).await.unwrap();
//!     assert_eq!(metals[0]["name"], "Gold");
//!     assert!(mock.send(ApiRequest::get("/api/stone-types")).await.is_err());
//!
//!     mock.verify();
//! }
//! ```
//!
//! ## Controlling timing
//!
//! Concurrency scenarios (a background refetch landing while a save is in
//! flight) need a response that waits. [`ExpectationBuilder::gated`] holds the
//! response until the test calls `notify_one()` on the given
//! [`Notify`](tokio::sync::Notify).
//!
//! Expectations are matched by verb and path in queue order, so concurrent
//! requests to different endpoints do not need to arrive in a fixed order.

use crate::error::ApiError;
use crate::transport::{ApiRequest, Method, Transport};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// An expected request and the response to give it.
struct Expectation {
    method: Method,
    path: String,
    response: Result<Value, ApiError>,
    delay: Option<Duration>,
    gate: Option<Arc<Notify>>,
}

/// An in-memory transport with expectation tracking.
#[derive(Clone, Default)]
pub struct MockTransport {
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
    requests: Arc<Mutex<Vec<ApiRequest>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A shared handle suitable for the clients under test.
    pub fn transport(&self) -> Arc<dyn Transport> {
        Arc::new(self.clone())
    }

    /// Expects one request with this verb and path.
    pub fn expect(&self, method: Method, path: impl Into<String>) -> ExpectationBuilder {
        ExpectationBuilder {
            method,
            path: path.into(),
            delay: None,
            gate: None,
            expectations: self.expectations.clone(),
        }
    }

    /// Every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of received requests with this verb and path.
    pub fn count(&self, method: Method, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            let remaining: Vec<String> = exps
                .iter()
                .map(|e| format!("{} {}", e.method, e.path))
                .collect();
            panic!(
                "Not all expectations were met. {} remaining: {:?}",
                exps.len(),
                remaining
            );
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError> {
        self.requests.lock().unwrap().push(request.clone());

        let expectation = {
            let mut exps = self.expectations.lock().unwrap();
            let position = exps
                .iter()
                .position(|e| e.method == request.method && e.path == request.path);
            match position {
                Some(index) => exps.remove(index),
                None => None,
            }
        };
        // Release lock before awaiting

        let Some(expectation) = expectation else {
            panic!("Unexpected request: {} {}", request.method, request.path);
        };

        if let Some(gate) = expectation.gate {
            gate.notified().await;
        }
        if let Some(delay) = expectation.delay {
            tokio::time::sleep(delay).await;
        }
        expectation.response
    }
}

/// Builder returned by [`MockTransport::expect`].
pub struct ExpectationBuilder {
    method: Method,
    path: String,
    delay: Option<Duration>,
    gate: Option<Arc<Notify>>,
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
}

impl ExpectationBuilder {
    /// Waits `delay` before responding.
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Holds the response until `gate` is notified.
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Responds with a JSON body.
    pub fn return_json(self, value: Value) {
        self.push(Ok(value));
    }

    /// Responds with an empty 2xx body.
    pub fn return_ok(self) {
        self.push(Ok(Value::Null));
    }

    /// Responds with an error.
    pub fn return_err(self, error: ApiError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<Value, ApiError>) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation {
            method: self.method,
            path: self.path,
            response,
            delay: self.delay,
            gate: self.gate,
        });
    }
}
