//! Serving size parsing
//!
//! Turns label text such as "100 g" or "1 cup (240 ml)" into a [`ServingSpec`].

use crate::error::{MacroError, MacroResult};
use crate::models::ServingSpec;

use super::units::{convert, grams_per_unit};

/// Unit assumed when serving text carries only a number
pub const DEFAULT_UNIT: &str = "g";

/// Parse a serving size string into amount and unit
///
/// Parenthetical annotations are discarded, a leading number is required and
/// the unit defaults to grams. The unit is lowercased but not checked against
/// the conversion table; that happens when the serving is converted.
///
/// Examples:
/// - "100 g" -> ServingSpec { amount: 100.0, unit: "g" }
/// - "1 cup (240 ml)" -> ServingSpec { amount: 1.0, unit: "cup" }
/// - "30" -> ServingSpec { amount: 30.0, unit: "g" }
pub fn parse_serving_size(text: &str) -> MacroResult<ServingSpec> {
    let (amount, unit) = parse_parts(text)?;

    Ok(ServingSpec {
        amount,
        unit: unit.unwrap_or_else(|| DEFAULT_UNIT.to_string()),
    })
}

/// Leading amount and explicit unit, if any, with parentheticals removed
fn parse_parts(text: &str) -> MacroResult<(f64, Option<String>)> {
    let cleaned = strip_parentheticals(text);

    let (amount, unit) = split_amount_unit(cleaned.trim())
        .ok_or_else(|| MacroError::UnparseableServingSize(text.to_string()))?;

    if amount <= 0.0 {
        return Err(MacroError::InvalidServingAmount(amount));
    }

    Ok((amount, unit))
}

/// Read the gram weight of a parenthetical annotation like "(32g)" or "(240 ml)"
///
/// Returns the first annotation whose unit is in the conversion table.
pub fn extract_label_grams(text: &str) -> Option<f64> {
    parentheticals(text).into_iter().find_map(|annotation| {
        let (amount, unit) = split_amount_unit(annotation.trim())?;
        let factor = grams_per_unit(&unit?)?;
        (amount > 0.0).then(|| amount * factor)
    })
}

/// Grams in one label-declared serving
///
/// An explicit leading unit from the conversion table wins. Otherwise a
/// parenthetical weight or volume annotation is used, so "1/2 cup (40 g)"
/// is 40 g. A bare number with no annotation is taken as grams.
pub fn label_serving_grams(text: &str) -> MacroResult<f64> {
    let (amount, unit) = parse_parts(text)?;

    if let Some(factor) = unit.as_deref().and_then(grams_per_unit) {
        return Ok(amount * factor);
    }

    if let Some(grams) = extract_label_grams(text) {
        return Ok(grams);
    }

    match unit {
        Some(unit) => Err(MacroError::UnsupportedUnit(unit)),
        None => convert(amount, DEFAULT_UNIT),
    }
}

/// Split a leading number and an optional alphabetic unit token
///
/// Returns None when the text does not start with a number.
fn split_amount_unit(s: &str) -> Option<(f64, Option<String>)> {
    let number_end = s
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(s.len());

    let amount: f64 = s[..number_end].parse().ok()?;

    let unit: String = s[number_end..]
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_alphabetic())
        .collect();

    let unit = if unit.is_empty() {
        None
    } else {
        Some(unit.to_lowercase())
    };

    Some((amount, unit))
}

/// Remove every "(...)" group; an unclosed "(" is left in place
fn strip_parentheticals(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find('(') {
        match rest[open..].find(')') {
            Some(close) => {
                out.push_str(&rest[..open]);
                rest = &rest[open + close + 1..];
            }
            None => break,
        }
    }

    out.push_str(rest);
    out
}

/// Contents of every closed "(...)" group, in order
fn parentheticals(text: &str) -> Vec<&str> {
    let mut found = Vec::new();
    let mut rest = text;

    while let Some(open) = rest.find('(') {
        match rest[open..].find(')') {
            Some(close) => {
                found.push(&rest[open + 1..open + close]);
                rest = &rest[open + close + 1..];
            }
            None => break,
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_parse_simple() {
        let spec = parse_serving_size("100 g").unwrap();
        assert_eq!(spec, ServingSpec { amount: 100.0, unit: "g".into() });
    }

    #[test]
    fn test_parse_strips_parenthetical() {
        let spec = parse_serving_size("1 cup (240 ml)").unwrap();
        assert_eq!(spec, ServingSpec { amount: 1.0, unit: "cup".into() });
    }

    #[test]
    fn test_parse_parenthetical_first() {
        let spec = parse_serving_size("(about) 2 slices").unwrap();
        assert_eq!(spec, ServingSpec { amount: 2.0, unit: "slices".into() });
    }

    #[test]
    fn test_parse_no_space_and_uppercase() {
        let spec = parse_serving_size("30G").unwrap();
        assert_eq!(spec, ServingSpec { amount: 30.0, unit: "g".into() });
    }

    #[test]
    fn test_parse_decimal() {
        let spec = parse_serving_size("  1.5 oz ").unwrap();
        assert_eq!(spec, ServingSpec { amount: 1.5, unit: "oz".into() });
    }

    #[test]
    fn test_parse_defaults_to_grams() {
        let spec = parse_serving_size("45").unwrap();
        assert_eq!(spec, ServingSpec { amount: 45.0, unit: "g".into() });
    }

    #[test]
    fn test_parse_takes_first_unit_word() {
        let spec = parse_serving_size("1 fl oz").unwrap();
        assert_eq!(spec.unit, "fl");
    }

    #[test]
    fn test_parse_requires_leading_number() {
        for text in ["serving", "", "   ", "(30 g)", "about 30 g", ".", "1.2.3 g"] {
            let err = parse_serving_size(text).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::UnparseableServingSize, "text: {:?}", text);
        }
    }

    #[test]
    fn test_parse_error_keeps_original_text() {
        let err = parse_serving_size("a handful (30g)").unwrap_err();
        assert!(matches!(err, MacroError::UnparseableServingSize(ref t) if t == "a handful (30g)"));
    }

    #[test]
    fn test_parse_rejects_zero() {
        let err = parse_serving_size("0 g").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidServingAmount);
    }

    #[test]
    fn test_strip_unclosed_parenthesis() {
        assert_eq!(strip_parentheticals("1 cup (240 ml"), "1 cup (240 ml");
        assert_eq!(strip_parentheticals("a (b) c (d)"), "a  c ");
    }

    #[test]
    fn test_extract_label_grams() {
        assert_eq!(extract_label_grams("2 tbsp (32g)"), Some(32.0));
        assert_eq!(extract_label_grams("1 cup (240 ml)"), Some(240.0));
        assert_eq!(extract_label_grams("1 bar (1.5 oz)"), Some(1.5 * 28.3495));
        assert_eq!(extract_label_grams("1 cookie (about) (12 g)"), Some(12.0));
        assert_eq!(extract_label_grams("1 cookie"), None);
        assert_eq!(extract_label_grams("1 cookie (2)"), None);
    }

    #[test]
    fn test_label_serving_grams_direct_unit() {
        assert_eq!(label_serving_grams("30 g").unwrap(), 30.0);
        assert_eq!(label_serving_grams("1 kg").unwrap(), 1000.0);
    }

    #[test]
    fn test_label_serving_grams_falls_back_to_annotation() {
        assert_eq!(label_serving_grams("1 cup (240 ml)").unwrap(), 240.0);
    }

    #[test]
    fn test_label_serving_grams_fraction_uses_annotation() {
        assert_eq!(label_serving_grams("1/2 cup (40 g)").unwrap(), 40.0);
        assert_eq!(label_serving_grams("45").unwrap(), 45.0);
    }

    #[test]
    fn test_label_serving_grams_unsupported() {
        let err = label_serving_grams("1 slice").unwrap_err();
        assert!(matches!(err, MacroError::UnsupportedUnit(ref u) if u == "slice"));
    }
}
