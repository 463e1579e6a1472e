//! # Details Blob
//!
//! A product's `details` field is free-form JSON, stored by the server as a
//! string. It carries the material specification at the root, again inside a
//! nested `additionalData` object, and sometimes inside an `aiInputs` object
//! written by the description generator. This module is the single place that
//! reads ([`extract`]) and writes ([`flatten`]) it.
//!
//! ## Resolution order
//!
//! Every field is resolved through [`SOURCE_PRIORITY`]:
//!
//! 1. `details.<field>`
//! 2. `aiInputs.<field>`, from the product's own `aiInputs` value, or
//!    `details.aiInputs` when the product has none
//! 3. `details.additionalData.<field>`
//! 4. the field default (`"Unknown"` metal, unused stone, `0` weight)
//!
//! A malformed blob never produces an error: it is logged and the
//! all-defaults record is returned.

pub mod extract;
pub mod flatten;

pub use extract::*;
pub use flatten::*;

/// Keys of the nested objects inside the blob.
pub const ADDITIONAL_DATA_KEY: &str = "additionalData";
pub const AI_INPUTS_KEY: &str = "aiInputs";

/// Price snapshot keys cached by the server.
pub const SNAPSHOT_USD_KEY: &str = "calculatedPriceUSD";
pub const SNAPSHOT_INR_KEY: &str = "calculatedPriceINR";

/// Keys holding the long-form AI description, most specific first.
pub const DESCRIPTION_KEYS: [&str; 2] = ["aiDescription", "longDescription"];

/// A location inside the blob that may hold a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Root,
    AiInputs,
    AdditionalData,
}

/// The order in which sources are consulted for every field.
pub const SOURCE_PRIORITY: [Source; 3] = [Source::Root, Source::AiInputs, Source::AdditionalData];
