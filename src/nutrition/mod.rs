//! Nutrition calculation module
//!
//! Unit conversion, serving size parsing and macro scaling. Everything here
//! is pure: no I/O and no shared state.

pub mod scaler;
pub mod serving;
pub mod units;

pub use scaler::{baseline, ensure_positive, round_to, scale, scale_grams};
pub use serving::{extract_label_grams, label_serving_grams, parse_serving_size, DEFAULT_UNIT};
pub use units::{convert, grams_per_unit, is_supported_unit, UNIT_TABLE};
