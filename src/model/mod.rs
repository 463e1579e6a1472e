//! Data transfer types exchanged with the REST server, plus the derived
//! material and price records computed locally.

pub mod catalog;
pub mod contact;
pub mod custom_design;
pub mod material;
pub mod price;
pub mod product;
pub mod product_type;

pub use catalog::*;
pub use contact::*;
pub use custom_design::*;
pub use material::*;
pub use price::*;
pub use product::*;
pub use product_type::*;
