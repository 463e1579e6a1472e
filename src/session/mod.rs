//! # Product Edit Sessions
//!
//! An edit session lets an admin change one section of a product (basic
//! info, materials, image) and see the result immediately, without the view
//! flashing back to stale server data while the save is in flight.
//!
//! - [`state`]: the four-state machine and its single transition function
//! - [`draft`]: per-section form state and the request it produces
//! - [`actor`]: [`SessionActor`], which owns the displayed product
//! - [`handle`]: [`SessionHandle`], the client side
//!
//! ## Usage
//!
//! ```rust,ignore
//! let session = storefront.open_session(ProductId(7)).await?;
//!
//! session.open(Section::Materials).await?;
//! session
//!     .update_draft(Draft::Materials(MaterialSpec::new("Gold", 10.0)))
//!     .await?;
//! let saved = session.submit().await?;
//! let price = session.snapshot().await?.price;
//! ```

pub mod actor;
pub mod draft;
pub mod error;
pub mod handle;
pub mod state;

pub use actor::*;
pub use draft::*;
pub use error::*;
pub use handle::*;
pub use state::*;
