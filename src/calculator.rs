//! Macro calculation facade
//!
//! The operations the diet log calls: baseline macros for a code, and macros
//! scaled to a serving. Each call is one remote lookup (at most) followed by
//! a pure transform; nothing is cached between calls.

use std::sync::Arc;

use tracing::info;

use crate::config::OffConfig;
use crate::error::{MacroError, MacroResult};
use crate::models::{
    MacroInfo, MacrosByServing, Product, ProductSource, ProductSummary, SearchResults,
    ServingInfo,
};
use crate::nutrition::{
    baseline, convert, ensure_positive, label_serving_grams, scale, scale_grams,
};
use crate::openfoodfacts::{resolve_by_upc, search_by_text, HttpClient, ReqwestClient, SearchOptions};

/// Baseline macros of a product: its own per-100g values, rounded to 2 decimals
pub fn macro_info(product: &Product) -> MacroInfo {
    MacroInfo {
        product_name: product.name.clone(),
        brand: product.brand.clone(),
        serving_size: product.serving_size.clone(),
        macros: baseline(&product.nutriments),
    }
}

/// Macros of a product scaled to `amount` `unit`
pub fn macros_by_serving(product: &Product, amount: f64, unit: &str) -> MacroResult<MacrosByServing> {
    let macros = scale(&product.nutriments, amount, unit)?;

    Ok(MacrosByServing {
        serving_info: ServingInfo {
            amount,
            unit: unit.to_string(),
            original_serving_size: product.serving_size.clone(),
        },
        product: summary(product),
        macros,
    })
}

/// Macros of a product for `servings` of its label-declared serving
///
/// The result is expressed in grams so it can be re-scaled later.
pub fn macros_by_label_serving(product: &Product, servings: f64) -> MacroResult<MacrosByServing> {
    ensure_positive(servings)?;

    let label = product
        .serving_size
        .as_deref()
        .ok_or_else(|| MacroError::UnparseableServingSize(String::new()))?;
    let grams = label_serving_grams(label)? * servings;

    Ok(MacrosByServing {
        serving_info: ServingInfo {
            amount: grams,
            unit: "g".to_string(),
            original_serving_size: Some(label.to_string()),
        },
        product: summary(product),
        macros: scale_grams(&product.nutriments, grams),
    })
}

fn summary(product: &Product) -> ProductSummary {
    ProductSummary {
        name: product.name.clone(),
        brand: product.brand.clone(),
    }
}

/// Facade over the remote database plus the pure nutrition functions.
///
/// Cheap to clone; clones share the underlying HTTP client.
#[derive(Clone)]
pub struct MacroCalculator {
    client: Arc<dyn HttpClient>,
    config: OffConfig,
}

impl MacroCalculator {
    pub fn new(client: Arc<dyn HttpClient>, config: OffConfig) -> Self {
        Self { client, config }
    }

    /// A calculator talking to the real database over HTTPS
    pub fn from_config(config: OffConfig) -> Result<Self, reqwest::Error> {
        let client = ReqwestClient::new(&config)?;
        Ok(Self::new(Arc::new(client), config))
    }

    pub fn config(&self) -> &OffConfig {
        &self.config
    }

    /// Look up a product by code
    pub async fn resolve(&self, upc: &str) -> MacroResult<Product> {
        resolve_by_upc(self.client.as_ref(), &self.config, upc).await
    }

    /// Search products by free text
    pub async fn search(&self, query: &str, options: &SearchOptions) -> MacroResult<SearchResults> {
        search_by_text(self.client.as_ref(), &self.config, query, options).await
    }

    async fn product(&self, source: ProductSource) -> MacroResult<Product> {
        match source {
            ProductSource::Product(product) => Ok(product),
            ProductSource::Upc(upc) => self.resolve(&upc).await,
        }
    }

    /// Baseline (per-100g) macros for a code
    pub async fn get_macros_for_upc(&self, upc: &str) -> MacroResult<MacroInfo> {
        let product = self.resolve(upc).await?;
        Ok(macro_info(&product))
    }

    /// Macros for a caller-chosen serving of a product or code
    ///
    /// The amount and unit are checked before any lookup is made.
    pub async fn get_macros_for_serving(
        &self,
        source: impl Into<ProductSource>,
        amount: f64,
        unit: &str,
    ) -> MacroResult<MacrosByServing> {
        ensure_positive(amount)?;
        convert(amount, unit)?;

        let product = self.product(source.into()).await?;
        let result = macros_by_serving(&product, amount, unit)?;
        info!(
            "Computed {} kcal for {} {} of {:?}",
            result.macros.calories, amount, unit, product.name
        );
        Ok(result)
    }

    /// Macros for a number of label-declared servings of a product or code
    pub async fn get_macros_for_label_serving(
        &self,
        source: impl Into<ProductSource>,
        servings: f64,
    ) -> MacroResult<MacrosByServing> {
        ensure_positive(servings)?;

        let product = self.product(source.into()).await?;
        macros_by_label_serving(&product, servings)
    }
}
