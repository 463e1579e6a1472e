//! # Pricing
//!
//! Turns a [`MaterialSpec`](crate::model::MaterialSpec) into a
//! [`PriceBreakdown`](crate::model::PriceBreakdown).
//!
//! - [`calculator`]: the pure computation, [`calculate`]
//! - [`rates`]: [`RateTable`] and the [`RateSource`] seam over the metal and
//!   stone catalogs
//! - [`worker`]: [`PriceWorker`], an actor that fetches rates and computes in
//!   the background, publishing a [`PriceState`] and discarding results for
//!   superseded input
//! - [`display`]: which price a customer sees
//!
//! ## Worker usage
//!
//! ```rust
//! use atelier::model::{MaterialSpec, MetalType, StoneType};
//! use atelier::pricing::{PriceConfig, PriceWorker, RateSource};
//! use atelier_framework::ApiError;
//! use async_trait::async_trait;
//! use std::sync::Arc;
//!
//! struct FixedRates;
//!
//! #[async_trait]
//! impl RateSource for FixedRates {
//!     async fn metal_types(&self) -> Result<Vec<MetalType>, ApiError> {
//!         Ok(vec![MetalType { id: 1, name: "Gold".into(), price_per_gram: 5000.0, description: None }])
//!     }
//!     async fn stone_types(&self) -> Result<Vec<StoneType>, ApiError> {
//!         Ok(vec![])
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (worker, handle) = PriceWorker::new(Arc::new(FixedRates), PriceConfig::default(), 16);
//!     tokio::spawn(worker.run());
//!
//!     let breakdown = handle.calculate(MaterialSpec::new("Gold", 10.0)).await.unwrap();
//!     assert_eq!(breakdown.total_inr, 62500.0);
//! }
//! ```

pub mod calculator;
pub mod display;
pub mod error;
pub mod rates;
pub mod worker;

pub use calculator::*;
pub use display::*;
pub use error::*;
pub use rates::*;
pub use worker::*;
