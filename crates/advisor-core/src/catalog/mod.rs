//! Catalog domain module.
//!
//! # Module Structure
//!
//! - `model`: Product types (`Product`, `ProductId`, `CatalogDocument`)
//! - `collection`: Immutable, indexed product collection (`Catalog`)
//! - `source`: Trait for loading a catalog from an external document (`CatalogSource`)

mod collection;
mod model;
mod source;

pub use collection::Catalog;
pub use model::{CatalogDocument, Product, ProductId};
pub use source::CatalogSource;
