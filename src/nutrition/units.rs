//! Unit conversion table
//!
//! Fixed grams-per-unit factors for the units a serving may be expressed in.
//! Volume units assume a density of 1 g/ml.

use crate::error::{MacroError, MacroResult};

// ============================================================================
// Weight Conversion Constants (to grams)
// ============================================================================

/// Grams per milligram
pub const G_PER_MG: f64 = 0.001;
/// Grams per kilogram
pub const G_PER_KG: f64 = 1000.0;
/// Grams per ounce
pub const G_PER_OZ: f64 = 28.3495;
/// Grams per pound
pub const G_PER_LB: f64 = 453.592;

// ============================================================================
// Volume Conversion Constants (to grams, at 1 g/ml)
// ============================================================================

/// Grams per milliliter
pub const G_PER_ML: f64 = 1.0;
/// Grams per liter
pub const G_PER_L: f64 = 1000.0;

/// Every supported unit token and its grams-per-unit factor
pub const UNIT_TABLE: &[(&str, f64)] = &[
    ("g", 1.0),
    ("kg", G_PER_KG),
    ("mg", G_PER_MG),
    ("oz", G_PER_OZ),
    ("lb", G_PER_LB),
    ("ml", G_PER_ML),
    ("l", G_PER_L),
];

/// Get the conversion factor to grams for a unit (case-insensitive)
pub fn grams_per_unit(unit: &str) -> Option<f64> {
    let lower = unit.to_lowercase();

    UNIT_TABLE
        .iter()
        .find(|(name, _)| *name == lower)
        .map(|(_, factor)| *factor)
}

/// Whether the unit appears in the conversion table
pub fn is_supported_unit(unit: &str) -> bool {
    grams_per_unit(unit).is_some()
}

/// Convert a quantity in the given unit to grams
pub fn convert(amount: f64, unit: &str) -> MacroResult<f64> {
    let factor =
        grams_per_unit(unit).ok_or_else(|| MacroError::UnsupportedUnit(unit.to_string()))?;
    Ok(amount * factor)
}
