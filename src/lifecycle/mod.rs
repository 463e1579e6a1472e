//! Startup, wiring and shutdown of the background tasks, plus tracing setup.
//!
//! - [`Storefront`]: owns the cache actor and the price worker and hands out
//!   the typed clients
//! - [`setup_tracing`]: initializes the `tracing` subscriber

pub mod storefront;
pub mod tracing;

pub use storefront::*;
pub use tracing::*;
