//! Macro result records
//!
//! The values handed back to the diet log for storage and display.

use serde::{Deserialize, Serialize};

use super::Nutriments;

/// The five tracked macros
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroSet {
    pub calories: f64,
    pub protein: f64, // grams
    pub carbs: f64,   // grams
    pub fat: f64,     // grams
    pub fiber: f64,   // grams
}

impl MacroSet {
    pub fn zero() -> Self {
        Self::default()
    }

    /// Apply `f` to every macro
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            calories: f(self.calories),
            protein: f(self.protein),
            carbs: f(self.carbs),
            fat: f(self.fat),
            fiber: f(self.fiber),
        }
    }

    /// Macros as (name, value) pairs, in display order
    pub fn entries(&self) -> [(&'static str, f64); 5] {
        [
            ("calories", self.calories),
            ("protein", self.protein),
            ("carbs", self.carbs),
            ("fat", self.fat),
            ("fiber", self.fiber),
        ]
    }
}

impl From<&Nutriments> for MacroSet {
    fn from(n: &Nutriments) -> Self {
        Self {
            calories: n.calories,
            protein: n.protein,
            carbs: n.carbs,
            fat: n.fat,
            fiber: n.fiber,
        }
    }
}

/// Baseline (per-100g, unscaled) macros for a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MacroInfo {
    pub product_name: String,
    pub brand: Option<String>,
    pub serving_size: Option<String>,
    pub macros: MacroSet,
}

/// The serving a scaled result was computed for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServingInfo {
    pub amount: f64,
    pub unit: String,
    pub original_serving_size: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub name: String,
    pub brand: Option<String>,
}

/// Macros scaled to a specific serving
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MacrosByServing {
    pub serving_info: ServingInfo,
    pub product: ProductSummary,
    pub macros: MacroSet,
}
