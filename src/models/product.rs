//! Product model
//!
//! A food product as resolved from the nutrition database.

use serde::{Deserialize, Serialize};

/// Display name used when the database has no `product_name`
pub const UNKNOWN_PRODUCT_NAME: &str = "Unknown Product";

/// Nutrient values per 100 grams, regardless of the product's declared serving
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutriments {
    pub calories: f64,
    pub protein: f64, // grams
    pub carbs: f64,   // grams
    pub fat: f64,     // grams
    pub fiber: f64,   // grams
}

/// A food product with its per-100g nutrients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub code: Option<String>,
    pub name: String,
    pub brand: Option<String>,
    /// Declared serving text as printed on the label, e.g. "1 cup (240 ml)"
    pub serving_size: Option<String>,
    pub image_url: Option<String>,
    pub quantity: Option<String>,
    pub categories: Vec<String>,
    pub nutriments: Nutriments,
}

impl Product {
    /// A product known only by name and nutrients, e.g. one entered by hand
    pub fn new(name: impl Into<String>, nutriments: Nutriments) -> Self {
        Self {
            code: None,
            name: name.into(),
            brand: None,
            serving_size: None,
            image_url: None,
            quantity: None,
            categories: Vec::new(),
            nutriments,
        }
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn with_serving_size(mut self, serving_size: impl Into<String>) -> Self {
        self.serving_size = Some(serving_size.into());
        self
    }
}

/// A serving quantity: positive amount plus lowercase unit token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServingSpec {
    pub amount: f64,
    pub unit: String,
}

/// Either an already-resolved product or a code still to be looked up
#[derive(Debug, Clone)]
pub enum ProductSource {
    Upc(String),
    Product(Product),
}

impl From<&str> for ProductSource {
    fn from(upc: &str) -> Self {
        ProductSource::Upc(upc.to_string())
    }
}

impl From<String> for ProductSource {
    fn from(upc: String) -> Self {
        ProductSource::Upc(upc)
    }
}

impl From<Product> for ProductSource {
    fn from(product: Product) -> Self {
        ProductSource::Product(product)
    }
}

/// One page of text-search results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    pub count: u64,
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
    pub products: Vec<Product>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_builder() {
        let product = Product::new("Apple", Nutriments { calories: 52.0, ..Default::default() })
            .with_brand("Orchard")
            .with_serving_size("1 medium (182 g)");
        assert_eq!(product.brand.as_deref(), Some("Orchard"));
        assert_eq!(product.serving_size.as_deref(), Some("1 medium (182 g)"));
        assert!(product.categories.is_empty());
        assert_eq!(product.nutriments.calories, 52.0);
    }

    #[test]
    fn test_product_serializes_camel_case() {
        let product = Product::new("Apple", Nutriments::default()).with_serving_size("100 g");
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["servingSize"], "100 g");
        assert!(json["imageUrl"].is_null());
        assert_eq!(json["nutriments"]["calories"], 0.0);
    }

    #[test]
    fn test_product_source_from() {
        assert!(matches!(ProductSource::from("0123"), ProductSource::Upc(ref c) if c == "0123"));
        let product = Product::new("Apple", Nutriments::default());
        assert!(matches!(ProductSource::from(product), ProductSource::Product(_)));
    }
}
