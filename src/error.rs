//! Error types
//!
//! Every failure the engine can surface, plus the tagged kind callers branch on.

use serde::Serialize;
use thiserror::Error;

/// Engine error types
#[derive(Debug, Error)]
pub enum MacroError {
    #[error("Unsupported unit: {0}")]
    UnsupportedUnit(String),

    #[error("Unable to parse serving size: {0}")]
    UnparseableServingSize(String),

    #[error("Serving amount must be a positive number, got {0}")]
    InvalidServingAmount(f64),

    #[error("Product not found for UPC: {0}")]
    ProductNotFound(String),

    #[error("{}", lookup_message(.status, .reason))]
    Lookup { status: Option<u16>, reason: String },

    #[error("Failed to search products: {0}")]
    Search(String),
}

fn lookup_message(status: &Option<u16>, reason: &str) -> String {
    match status {
        Some(code) => format!("Product lookup failed with status {}: {}", code, reason),
        None => format!("Product lookup failed: {}", reason),
    }
}

/// Discriminant of a [`MacroError`], stable across releases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    UnsupportedUnit,
    UnparseableServingSize,
    InvalidServingAmount,
    ProductNotFound,
    Lookup,
    Search,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::UnsupportedUnit => "unsupported_unit",
            ErrorKind::UnparseableServingSize => "unparseable_serving_size",
            ErrorKind::InvalidServingAmount => "invalid_serving_amount",
            ErrorKind::ProductNotFound => "product_not_found",
            ErrorKind::Lookup => "lookup",
            ErrorKind::Search => "search",
        }
    }

    /// Whether the failure came from the caller's input rather than the remote database
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ErrorKind::UnsupportedUnit
                | ErrorKind::UnparseableServingSize
                | ErrorKind::InvalidServingAmount
        )
    }
}

impl MacroError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MacroError::UnsupportedUnit(_) => ErrorKind::UnsupportedUnit,
            MacroError::UnparseableServingSize(_) => ErrorKind::UnparseableServingSize,
            MacroError::InvalidServingAmount(_) => ErrorKind::InvalidServingAmount,
            MacroError::ProductNotFound(_) => ErrorKind::ProductNotFound,
            MacroError::Lookup { .. } => ErrorKind::Lookup,
            MacroError::Search(_) => ErrorKind::Search,
        }
    }

    /// Upstream HTTP status, when the failure carries one
    pub fn status(&self) -> Option<u16> {
        match self {
            MacroError::Lookup { status, .. } => *status,
            _ => None,
        }
    }
}

/// Result type for engine operations
pub type MacroResult<T> = Result<T, MacroError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_variant() {
        assert_eq!(
            MacroError::UnsupportedUnit("cup".into()).kind(),
            ErrorKind::UnsupportedUnit
        );
        assert_eq!(
            MacroError::ProductNotFound("123".into()).kind(),
            ErrorKind::ProductNotFound
        );
        assert_eq!(
            MacroError::Lookup { status: Some(503), reason: "Service Unavailable".into() }.kind(),
            ErrorKind::Lookup
        );
    }

    #[test]
    fn test_messages_carry_input() {
        assert_eq!(
            MacroError::ProductNotFound("0123".into()).to_string(),
            "Product not found for UPC: 0123"
        );
        assert_eq!(
            MacroError::Lookup { status: Some(500), reason: "boom".into() }.to_string(),
            "Product lookup failed with status 500: boom"
        );
        assert_eq!(
            MacroError::Lookup { status: None, reason: "connection refused".into() }.to_string(),
            "Product lookup failed: connection refused"
        );
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&ErrorKind::ProductNotFound).unwrap();
        assert_eq!(json, "\"product_not_found\"");
        assert_eq!(ErrorKind::UnparseableServingSize.as_str(), "unparseable_serving_size");
    }

    #[test]
    fn test_input_errors() {
        assert!(ErrorKind::UnsupportedUnit.is_input_error());
        assert!(!ErrorKind::Lookup.is_input_error());
        assert!(!ErrorKind::ProductNotFound.is_input_error());
    }

    #[test]
    fn test_status_only_on_lookup() {
        let err = MacroError::Lookup { status: Some(502), reason: "Bad Gateway".into() };
        assert_eq!(err.status(), Some(502));
        assert_eq!(MacroError::Search("x".into()).status(), None);
    }
}
