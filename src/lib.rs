//! # Atelier
//!
//! > **Client library for a jewellery storefront and its back office.**
//!
//! The server exposes products, product types, metal and stone catalogs,
//! contact messages and custom design requests over REST. This crate is
//! everything between those endpoints and a view: typed clients, the
//! material-based price calculation, and edit sessions that keep the admin
//! editor consistent while a save is in flight.
//!
//! ## Design
//!
//! ### Resources over REST
//! Each endpoint family implements
//! [`Resource`](atelier_framework::Resource) once; the generic
//! [`ResourceClient`](atelier_framework::ResourceClient) supplies list, get,
//! create, update and confirm-then-delete, and invalidates the shared query
//! cache on every mutation.
//!
//! ### Actors where state is shared
//! Three pieces of state are touched concurrently, and each lives in a Tokio
//! task that owns it and processes messages one at a time:
//! - the query cache ([`CacheActor`](atelier_framework::CacheActor))
//! - the price calculation ([`PriceWorker`](pricing::PriceWorker)), which
//!   discards results for superseded input
//! - each open product editor ([`SessionActor`](session::SessionActor))
//!
//! ### Product details
//! The server stores material information in a loosely shaped `details`
//! value that older records nest differently. [`details`] reads it into a
//! [`MaterialSpec`](model::MaterialSpec) and writes it back so that old
//! readers still find it.
//!
//! ## Module Tour
//!
//! - [`model`]: data types shared by every layer
//! - [`details`]: reading and merging the product details blob
//! - [`pricing`]: rates, calculation, the price worker, the displayed price
//! - [`products`], [`product_types`], [`contacts`]: resource definitions and errors
//! - [`clients`]: typed clients for each endpoint family
//! - [`session`]: product edit sessions
//! - [`card`]: the product card view model
//! - [`carousel`]: the featured-products carousel
//! - [`notify`]: user-facing notifications
//! - [`config`]: environment configuration
//! - [`lifecycle`]: [`Storefront`](lifecycle::Storefront) and tracing setup
//!
//! ## Running the Demo
//!
//! ```bash
//! ATELIER_API_URL=http://localhost:5000 RUST_LOG=info cargo run
//! ```

pub mod card;
pub mod carousel;
pub mod clients;
pub mod config;
pub mod contacts;
pub mod details;
pub mod lifecycle;
pub mod model;
pub mod notify;
pub mod pricing;
pub mod product_types;
pub mod products;
pub mod session;
