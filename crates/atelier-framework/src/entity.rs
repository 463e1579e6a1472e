//! # Resource Trait
//!
//! The `Resource` trait is the contract every admin-managed entity (product
//! types, products, contact messages) implements to be served by the generic
//! [`ResourceClient`](crate::client::ResourceClient).
//!
//! # Architecture Note
//! The back office repeats the same list / create / edit / delete cycle for
//! every entity. Describing the entity once (collection path, payload types,
//! update verb, validation) lets the client logic be written *once*.
//!
//! Associated types keep the payloads apart: a product-type form cannot be
//! sent to the contact-message endpoint, the compiler rejects it.

use crate::error::ApiError;
use crate::transport::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::{Debug, Display};

/// Trait that any REST-managed entity implements.
pub trait Resource: Clone + Debug + Send + Sync + DeserializeOwned + 'static {
    /// Identifier used in item paths (`{COLLECTION}/{id}`).
    type Id: Clone + Debug + Display + PartialEq + Send + Sync + 'static;

    /// Payload for `POST {COLLECTION}`.
    type Create: Serialize + Debug + Send + Sync;

    /// Payload for the update request on an item path.
    type Update: Serialize + Debug + Send + Sync;

    /// Collection endpoint, e.g. `/api/product-types`.
    const COLLECTION: &'static str;

    /// Verb used for updates. Products are patched, everything else is replaced.
    const UPDATE_METHOD: Method = Method::Put;

    fn id(&self) -> &Self::Id;

    fn item_path(id: &Self::Id) -> String {
        format!("{}/{}", Self::COLLECTION, id)
    }

    /// Called before a create request is sent. Errors stop the request.
    fn validate_create(_params: &Self::Create) -> Result<(), ApiError> {
        Ok(())
    }

    /// Called before an update request is sent. Errors stop the request.
    fn validate_update(_params: &Self::Update) -> Result<(), ApiError> {
        Ok(())
    }
}
