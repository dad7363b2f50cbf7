//! Macro tool bodies
//!
//! Small helpers behind the MCP tools that don't need a network lookup,
//! plus the error payload every tool returns on failure.

use serde::Serialize;

use crate::error::{ErrorKind, MacroError, MacroResult};
use crate::nutrition::{convert, grams_per_unit, parse_serving_size};

/// Error payload returned to the assistant
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: ErrorKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// True when the user should be offered manual entry instead of a retry
    pub manual_entry_available: bool,
}

impl From<&MacroError> for ErrorResponse {
    fn from(err: &MacroError) -> Self {
        Self {
            error: err.to_string(),
            kind: err.kind(),
            status: err.status(),
            manual_entry_available: err.kind() == ErrorKind::ProductNotFound,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ParseServingResponse {
    pub amount: f64,
    pub unit: String,
    pub supported_unit: bool,
    /// Gram weight when the unit is convertible
    pub grams: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct ConvertResponse {
    pub amount: f64,
    pub unit: String,
    pub grams: f64,
}

/// Parse serving text and report whether it can be converted to grams
pub fn parse_serving(text: &str) -> MacroResult<ParseServingResponse> {
    let spec = parse_serving_size(text)?;
    let grams = grams_per_unit(&spec.unit).map(|factor| spec.amount * factor);

    Ok(ParseServingResponse {
        amount: spec.amount,
        supported_unit: grams.is_some(),
        unit: spec.unit,
        grams,
    })
}

/// Tool input is trimmed here; the unit table itself matches exactly
pub fn convert_to_grams(amount: f64, unit: &str) -> MacroResult<ConvertResponse> {
    let unit = unit.trim();
    let grams = convert(amount, unit)?;
    Ok(ConvertResponse {
        amount,
        unit: unit.to_lowercase(),
        grams,
    })
}
