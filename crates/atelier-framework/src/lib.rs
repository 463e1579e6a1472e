//! # Atelier Framework
//!
//! The generic plumbing behind the storefront and back-office client: a
//! uniform way to talk to REST collections, a query cache shared by every
//! view, and the small helpers (retry, optimistic updates, local filtering)
//! that each screen would otherwise re-implement.
//!
//! ## Why a Resource-Oriented layer?
//!
//! The admin back office manages product types, products and contact
//! messages. Each is a REST collection with the same lifecycle:
//!
//! - list the collection, filter it locally
//! - create from a validated form
//! - edit (PUT or PATCH)
//! - delete after an explicit confirmation
//!
//! Describing each entity once through the [`Resource`] trait lets
//! [`ResourceClient`] implement that lifecycle *once*, including the rule
//! that every mutation invalidates the collection in the query cache.
//!
//! ## Actors for shared state
//!
//! The query cache is the one piece of mutable state several views touch
//! concurrently. It runs as an actor ([`CacheActor`]): a Tokio task owns the
//! map and handles [`CacheRequest`]s sequentially, callers hold a cloneable
//! [`CacheClient`]. Edit sessions freeze a product key with a
//! [`SuppressionGuard`] while their save is in flight.
//!
//! ## Module Tour
//!
//! - [`entity`]: the [`Resource`] trait
//! - [`transport`]: [`Transport`] seam and the reqwest-backed [`HttpTransport`]
//! - [`cache`] / [`message`]: the query cache actor and its messages
//! - [`client`]: [`ResourceClient`] and [`PendingDelete`]
//! - [`client_trait`]: [`ResourceApi`], default operations for typed clients
//! - [`filter`]: client-side search + tab filtering
//! - [`optimistic`]: apply / rollback / commit helper
//! - [`retry`]: retry with increasing delay
//! - [`mock`]: [`MockTransport`](mock::MockTransport) for tests
//! - [`error`]: [`ApiError`]

pub mod cache;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod filter;
pub mod message;
pub mod mock;
pub mod optimistic;
pub mod retry;
pub mod transport;

pub use cache::{CacheActor, CacheClient, SuppressionGuard};
pub use client::{PendingDelete, ResourceClient};
pub use client_trait::ResourceApi;
pub use entity::Resource;
pub use error::ApiError;
pub use filter::{ListFilter, Searchable};
pub use message::{CacheRequest, PutOutcome, Response};
pub use optimistic::Optimistic;
pub use retry::{retry, RetryPolicy};
pub use transport::{ApiRequest, Body, FilePart, HttpTransport, Method, Transport};
