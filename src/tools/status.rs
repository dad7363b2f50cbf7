//! macrocalc Status Tool
//!
//! Provides runtime status information about the macrocalc service.

use serde::Serialize;
use std::time::Instant;

use crate::build_info::BuildInfo;
use crate::config::OffConfig;
use crate::nutrition::UNIT_TABLE;

/// Usage guide for AI assistants calling the macro tools
pub const MACRO_INSTRUCTIONS: &str = r#"
# macrocalc Usage Instructions

macrocalc turns Open Food Facts products into macro breakdowns for a diet log.
It never stores anything: save the returned values with your own food log tools.

## Looking up a scanned barcode

1. Call `get_macros_for_upc` with the barcode digits.
   - Returns per-100g macros (2 decimals) plus the label's serving text.
2. If the result has `"kind": "product_not_found"`, the product is not in the
   database. Offer manual entry instead of retrying.
3. A `"kind": "lookup"` error is a network or server problem. It is safe to retry.

## Macros for what was actually eaten

- Known weight or volume: `get_macros_for_serving` with `serving_amount` and
  `serving_unit`. Results are rounded to 1 decimal.
- "One serving" / "two servings" as printed on the label:
  `get_macros_for_label_serving` with `servings`.

## Supported units

| Unit | Grams per unit |
|------|----------------|
| g    | 1              |
| kg   | 1000           |
| mg   | 0.001          |
| oz   | 28.3495        |
| lb   | 453.592        |
| ml   | 1 (density 1)  |
| l    | 1000           |

Any other unit (cup, tbsp, slice...) fails with `"kind": "unsupported_unit"`.
Use `parse_serving_size` to check what a label string will parse to.

## Finding a product without a barcode

`search_products` with a free-text `query`. Results are paged (24 per page by
default); use `total_pages` to decide whether to request more.
"#;

/// Status response structure
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub build: BuildInfo,
    pub uptime_seconds: u64,
    pub started_at: String,
    pub database: DatabaseInfo,
    pub supported_units: Vec<&'static str>,
}

/// Where product data comes from
#[derive(Debug, Serialize)]
pub struct DatabaseInfo {
    pub lookup_host: String,
    pub domain: String,
    pub user_agent: String,
}

/// Tracks service start time for uptime reporting
pub struct StatusTracker {
    start_time: Instant,
    started_at: String,
    config: OffConfig,
}

impl StatusTracker {
    pub fn new(config: OffConfig) -> Self {
        Self {
            start_time: Instant::now(),
            started_at: chrono::Utc::now().to_rfc3339(),
            config,
        }
    }

    pub fn get_status(&self) -> StatusResponse {
        StatusResponse {
            build: BuildInfo::current(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            started_at: self.started_at.clone(),
            database: DatabaseInfo {
                lookup_host: format!("{}.{}", self.config.lookup_subdomain, self.config.domain),
                domain: self.config.domain.clone(),
                user_agent: self.config.user_agent.clone(),
            },
            supported_units: UNIT_TABLE.iter().map(|(unit, _)| *unit).collect(),
        }
    }
}
