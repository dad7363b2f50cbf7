//! Upstream payload records
//!
//! Every field the database may omit is an `Option` here. Defaults are applied
//! exactly once, in [`RawProduct::into_product`]; nothing downstream re-checks.

use serde::{Deserialize, Deserializer};
use tracing::warn;

use crate::models::{Nutriments, Product, UNKNOWN_PRODUCT_NAME};

/// Response of `GET /api/v2/product/{code}`
#[derive(Debug, Default, Deserialize)]
pub struct ProductEnvelope {
    #[serde(default, deserialize_with = "lenient_number")]
    pub status: Option<f64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub status_verbose: Option<String>,
    #[serde(default)]
    pub product: Option<RawProduct>,
}

impl ProductEnvelope {
    /// The product, when the database reports a match (`status: 1`)
    pub fn into_found(self) -> Option<RawProduct> {
        match self.status {
            Some(status) if status == 1.0 => self.product,
            _ => None,
        }
    }
}

/// Response of `GET /cgi/search.pl?...&json=true`
///
/// Products are kept as raw JSON so a single malformed entry can be skipped
/// instead of failing the whole page.
#[derive(Debug, Default, Deserialize)]
pub struct SearchEnvelope {
    #[serde(default, deserialize_with = "lenient_number")]
    pub count: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub page: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub page_size: Option<f64>,
    #[serde(default)]
    pub products: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawProduct {
    #[serde(default, deserialize_with = "lenient_string")]
    pub code: Option<String>,
    #[serde(rename = "_id", default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub product_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub brands: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub serving_size: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub quantity: Option<String>,
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub categories_tags: Option<Vec<String>>,
    #[serde(default)]
    pub nutriments: Option<RawNutriments>,
}

/// The per-100g nutrient fields this engine consumes
#[derive(Debug, Default, Deserialize)]
pub struct RawNutriments {
    #[serde(rename = "energy-kcal_100g", default, deserialize_with = "lenient_number")]
    pub energy_kcal_100g: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub proteins_100g: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub carbohydrates_100g: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub fat_100g: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub fiber_100g: Option<f64>,
}

impl RawProduct {
    /// Map into the canonical [`Product`], applying every default
    pub fn into_product(self) -> Product {
        let code = non_empty(self.code).or_else(|| non_empty(self.id));
        let nutriments = self.nutriments.unwrap_or_default();

        Product {
            nutriments: Nutriments {
                calories: nutrient(nutriments.energy_kcal_100g, "energy-kcal_100g", &code),
                protein: nutrient(nutriments.proteins_100g, "proteins_100g", &code),
                carbs: nutrient(nutriments.carbohydrates_100g, "carbohydrates_100g", &code),
                fat: nutrient(nutriments.fat_100g, "fat_100g", &code),
                fiber: nutrient(nutriments.fiber_100g, "fiber_100g", &code),
            },
            name: non_empty(self.product_name).unwrap_or_else(|| UNKNOWN_PRODUCT_NAME.to_string()),
            brand: non_empty(self.brands),
            serving_size: non_empty(self.serving_size),
            image_url: non_empty(self.image_url),
            quantity: non_empty(self.quantity),
            categories: self.categories_tags.unwrap_or_default(),
            code,
        }
    }
}

/// Absent, negative or non-finite values count as 0
fn nutrient(value: Option<f64>, field: &str, code: &Option<String>) -> f64 {
    match value {
        Some(v) if v.is_finite() && v >= 0.0 => v,
        Some(v) => {
            warn!(
                "Discarding invalid {} value {} for product {}",
                field,
                v,
                code.as_deref().unwrap_or("<unknown>")
            );
            0.0
        }
        None => 0.0,
    }
}

/// Blank strings are treated like missing ones
fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

/// Accept a JSON number or a numeric string; anything else is absent
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Loose>::deserialize(deserializer)?;
    Ok(match value {
        Some(Loose::Number(n)) => Some(n),
        Some(Loose::Text(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite()))
}

/// Accept a JSON string or number; anything else is absent
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Loose>::deserialize(deserializer)?;
    Ok(match value {
        Some(Loose::Text(s)) => Some(s),
        Some(Loose::Number(n)) if n.fract() == 0.0 => Some(format!("{}", n as i64)),
        Some(Loose::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Accept an array of tags, keeping only the string entries
fn lenient_string_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Array(items)) => Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    serde_json::Value::String(tag) => Some(tag),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    })
}
