//! Macro Calculator (macrocalc) Library
//!
//! Looks up packaged foods in Open Food Facts and turns their per-100g
//! nutrition into macro breakdowns for a chosen serving.

pub mod build_info;
pub mod calculator;
pub mod config;
pub mod error;
pub mod mcp;
pub mod models;
pub mod nutrition;
pub mod openfoodfacts;
pub mod tools;

pub use calculator::MacroCalculator;
pub use config::OffConfig;
pub use error::{ErrorKind, MacroError, MacroResult};
