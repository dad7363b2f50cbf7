//! Macro scaling
//!
//! Ratio scaling of per-100g nutrients to an arbitrary serving.

use crate::error::{MacroError, MacroResult};
use crate::models::{MacroSet, Nutriments};

use super::units::convert;

/// Decimal places kept on scaled (per-serving) macros
pub const SCALED_PRECISION: u32 = 1;
/// Decimal places kept on baseline (per-100g) macros
pub const BASELINE_PRECISION: u32 = 2;

/// Round half away from zero to a fixed number of decimals
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Scale per-100g nutrients to a serving of `amount` `unit`
///
/// Every macro is rounded to one decimal.
pub fn scale(nutriments: &Nutriments, amount: f64, unit: &str) -> MacroResult<MacroSet> {
    ensure_positive(amount)?;
    let grams = convert(amount, unit)?;
    Ok(scale_grams(nutriments, grams))
}

/// Scale per-100g nutrients to an amount already expressed in grams
pub fn scale_grams(nutriments: &Nutriments, grams: f64) -> MacroSet {
    let ratio = grams / 100.0;
    MacroSet::from(nutriments).map(|v| round_to(v * ratio, SCALED_PRECISION))
}

/// Per-100g values rounded for display, with no scaling applied
pub fn baseline(nutriments: &Nutriments) -> MacroSet {
    MacroSet::from(nutriments).map(|v| round_to(v, BASELINE_PRECISION))
}

/// A serving amount must be a finite, strictly positive number
pub fn ensure_positive(amount: f64) -> MacroResult<()> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(MacroError::InvalidServingAmount(amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn apple() -> Nutriments {
        Nutriments { calories: 52.0, protein: 0.3, carbs: 14.0, fat: 0.2, fiber: 2.4 }
    }

    #[test]
    fn test_scale_150g() {
        let m = scale(&apple(), 150.0, "g").unwrap();
        assert_eq!(
            m,
            MacroSet { calories: 78.0, protein: 0.5, carbs: 21.0, fat: 0.3, fiber: 3.6 }
        );
    }

    #[test]
    fn test_scale_100g_reproduces_baseline() {
        let n = Nutriments { calories: 389.27, protein: 16.89, carbs: 66.27, fat: 6.9, fiber: 10.61 };
        let m = scale(&n, 100.0, "g").unwrap();
        for ((_, scaled), (_, source)) in m.entries().iter().zip(MacroSet::from(&n).entries()) {
            assert!((scaled - source).abs() <= 0.05, "{} vs {}", scaled, source);
        }
    }

    #[test]
    fn test_scale_converts_units() {
        let m = scale(&apple(), 1.0, "kg").unwrap();
        assert_eq!(m.calories, 520.0);
        let m = scale(&apple(), 250.0, "ML").unwrap();
        assert_eq!(m.carbs, 35.0);
    }

    #[test]
    fn test_scale_missing_nutrients_stay_zero() {
        let n = Nutriments { calories: 100.0, ..Default::default() };
        let m = scale(&n, 50.0, "g").unwrap();
        assert_eq!(m.calories, 50.0);
        assert_eq!(m.protein, 0.0);
        assert_eq!(m.fiber, 0.0);
    }

    #[test]
    fn test_scale_unsupported_unit() {
        let err = scale(&apple(), 1.0, "cup").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedUnit);
    }

    #[test]
    fn test_scale_rejects_bad_amounts() {
        for amount in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let err = scale(&apple(), amount, "g").unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidServingAmount);
        }
    }

    #[test]
    fn test_scale_is_monotonic() {
        let n = Nutriments { calories: 389.27, protein: 16.89, carbs: 66.27, fat: 6.9, fiber: 10.61 };
        let mut previous = MacroSet::zero();
        for step in 1..=400 {
            let amount = step as f64 * 0.75;
            let current = scale(&n, amount, "g").unwrap();
            for ((name, now), (_, before)) in current.entries().iter().zip(previous.entries()) {
                assert!(*now >= before, "{} decreased at {}g", name, amount);
            }
            previous = current;
        }
    }

    #[test]
    fn test_scale_is_deterministic() {
        assert_eq!(scale(&apple(), 37.5, "oz").unwrap(), scale(&apple(), 37.5, "oz").unwrap());
    }

    #[test]
    fn test_baseline_rounds_to_two_decimals() {
        let n = Nutriments { calories: 52.456, protein: 0.304, carbs: 14.0, fat: 0.2, fiber: 2.4 };
        let m = baseline(&n);
        assert_eq!(m.calories, 52.46);
        assert_eq!(m.protein, 0.3);
        assert_eq!(m.carbs, 14.0);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.3 * 1.5, 1), 0.5);
        assert_eq!(round_to(3.14159, 2), 3.14);
        assert_eq!(round_to(2.0, 0), 2.0);
    }
}
