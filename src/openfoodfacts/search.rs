//! Full-text product search
//!
//! Normalizes a heterogeneous result page into canonical products.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::OffConfig;
use crate::error::{MacroError, MacroResult};
use crate::models::{Product, SearchResults};

use super::http::HttpClient;
use super::payload::{RawProduct, SearchEnvelope};

pub const DEFAULT_PAGE_SIZE: u32 = 24;
pub const MAX_PAGE_SIZE: u32 = 100;
pub const DEFAULT_LOCALE: &str = "world";

/// Paging and locale for a search request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    pub page: u32,
    pub page_size: u32,
    pub locale: String,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

impl SearchOptions {
    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }
}

/// Number of pages needed to show `count` results, `page_size` at a time
pub fn total_pages(count: u64, page_size: u64) -> u64 {
    if page_size == 0 {
        0
    } else {
        count.div_ceil(page_size)
    }
}

/// Search products by free text
pub async fn search_by_text(
    client: &dyn HttpClient,
    config: &OffConfig,
    query: &str,
    options: &SearchOptions,
) -> MacroResult<SearchResults> {
    let page = options.page.max(1);
    let page_size = options.page_size.clamp(1, MAX_PAGE_SIZE);
    let locale = options.locale.trim().to_lowercase();

    let url = config
        .search_url(query.trim(), &locale, page, page_size)
        .map_err(|e| MacroError::Search(e.to_string()))?;

    debug!("Searching products: {}", url);

    let response = client
        .get(url.as_str())
        .await
        .map_err(|e| MacroError::Search(e.to_string()))?;

    if !response.is_success() {
        warn!("Search for {:?} failed with {}", query, response.status_line());
        return Err(MacroError::Search(format!(
            "API request failed with status: {}",
            response.status_line()
        )));
    }

    let envelope: SearchEnvelope = serde_json::from_str(&response.body)
        .map_err(|e| MacroError::Search(format!("Malformed response: {}", e)))?;

    let count = envelope.count.map(to_count).unwrap_or(0);
    let page = envelope.page.map(to_count).unwrap_or(page as u64);
    let page_size = envelope
        .page_size
        .map(to_count)
        .unwrap_or(page_size as u64);

    let products: Vec<Product> = envelope
        .products
        .unwrap_or_default()
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<RawProduct>(item) {
            Ok(raw) => Some(raw.into_product()),
            Err(e) => {
                warn!("Skipping malformed search result: {}", e);
                None
            }
        })
        .collect();

    info!(
        "Search {:?} page {} returned {} of {} products",
        query,
        page,
        products.len(),
        count
    );

    Ok(SearchResults {
        count,
        page,
        page_size,
        total_pages: total_pages(count, page_size),
        products,
    })
}

fn to_count(n: f64) -> u64 {
    if n > 0.0 {
        n as u64
    } else {
        0
    }
}
