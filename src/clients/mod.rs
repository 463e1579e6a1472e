//! Type-safe wrappers around [`ResourceClient`](atelier_framework::ResourceClient).

pub mod catalog_client;
pub mod contact_client;
pub mod design_client;
pub mod product_client;
pub mod product_type_client;

pub use catalog_client::*;
pub use contact_client::*;
pub use design_client::*;
pub use product_client::*;
pub use product_type_client::*;
