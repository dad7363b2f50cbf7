//! Product lookup by code
//!
//! Maps the database's answer for a single code onto a [`Product`] or a typed
//! failure: not-found is kept apart from transport trouble so callers can
//! offer manual entry instead of a generic error.

use tracing::{debug, info, warn};

use crate::config::OffConfig;
use crate::error::{MacroError, MacroResult};
use crate::models::Product;

use super::http::HttpClient;
use super::payload::ProductEnvelope;

/// Look up a product by its barcode
pub async fn resolve_by_upc(
    client: &dyn HttpClient,
    config: &OffConfig,
    upc: &str,
) -> MacroResult<Product> {
    let upc = upc.trim();
    if upc.is_empty() {
        return Err(MacroError::ProductNotFound(upc.to_string()));
    }

    let url = config.lookup_url(upc).map_err(|e| MacroError::Lookup {
        status: None,
        reason: e.to_string(),
    })?;

    debug!("Looking up product {} at {}", upc, url);

    let response = client
        .get(url.as_str())
        .await
        .map_err(|e| MacroError::Lookup {
            status: None,
            reason: e.to_string(),
        })?;

    let envelope = serde_json::from_str::<ProductEnvelope>(&response.body);

    if !response.is_success() {
        // Unknown codes come back as 404 with a structured status-0 body
        if let Ok(envelope) = envelope {
            if envelope.into_found().is_none() && response.status == 404 {
                info!("Product {} not found", upc);
                return Err(MacroError::ProductNotFound(upc.to_string()));
            }
        }
        warn!("Lookup for {} failed with {}", upc, response.status_line());
        return Err(MacroError::Lookup {
            status: Some(response.status),
            reason: response.status_line(),
        });
    }

    let envelope = envelope.map_err(|e| {
        warn!("Malformed lookup response for {}: {}", upc, e);
        MacroError::Lookup {
            status: Some(response.status),
            reason: format!("Malformed response: {}", e),
        }
    })?;

    match envelope.into_found() {
        Some(raw) => {
            let product = raw.into_product();
            info!("Resolved {} to {:?}", upc, product.name);
            Ok(product)
        }
        None => {
            info!("Product {} not found", upc);
            Err(MacroError::ProductNotFound(upc.to_string()))
        }
    }
}
