//! Data models
//!
//! Canonical records produced by the engine. Upstream payload shapes live in
//! `openfoodfacts::payload`; everything here is already defaulted.

mod macros;
mod product;

pub use macros::{MacroInfo, MacroSet, MacrosByServing, ProductSummary, ServingInfo};
pub use product::{Nutriments, Product, ProductSource, SearchResults, ServingSpec, UNKNOWN_PRODUCT_NAME};
