//! macrocalc MCP Server Implementation
//!
//! Exposes the macro calculator as MCP tools over stdio.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::calculator::MacroCalculator;
use crate::error::MacroError;
use crate::nutrition::DEFAULT_UNIT;
use crate::openfoodfacts::SearchOptions;
use crate::tools::macros::{self, ErrorResponse};
use crate::tools::status::{StatusTracker, MACRO_INSTRUCTIONS};

/// macrocalc MCP Service
#[derive(Clone)]
pub struct MacroService {
    calculator: MacroCalculator,
    status_tracker: Arc<StatusTracker>,
    tool_router: ToolRouter<MacroService>,
}

impl MacroService {
    pub fn new(calculator: MacroCalculator) -> Self {
        Self {
            status_tracker: Arc::new(StatusTracker::new(calculator.config().clone())),
            calculator,
            tool_router: Self::tool_router(),
        }
    }
}

// ============================================================================
// Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetMacrosForUpcParams {
    /// Barcode digits (UPC or EAN)
    pub upc: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetMacrosForServingParams {
    pub upc: String,
    pub serving_amount: f64,
    /// One of g, kg, mg, oz, lb, ml, l
    #[serde(default = "default_unit")]
    pub serving_unit: String,
}

fn default_unit() -> String { DEFAULT_UNIT.to_string() }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetMacrosForLabelServingParams {
    pub upc: String,
    /// Number of label servings eaten
    #[serde(default = "default_servings")]
    pub servings: f64,
}

fn default_servings() -> f64 { 1.0 }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchProductsParams {
    pub query: String,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    /// Country subdomain, e.g. "us" or "fr"
    pub locale: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ParseServingSizeParams {
    /// Label text such as "1 cup (240 ml)"
    pub text: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ConvertToGramsParams {
    pub amount: f64,
    pub unit: String,
}

// ============================================================================
// Result Helpers
// ============================================================================

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

/// Engine failures are reported to the assistant as tool errors, not protocol errors
fn error_result(err: &MacroError) -> Result<CallToolResult, McpError> {
    warn!("Tool call failed: {}", err);
    let json = serde_json::to_string_pretty(&ErrorResponse::from(err))
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::error(vec![Content::text(json)]))
}

fn respond<T: Serialize>(result: Result<T, MacroError>) -> Result<CallToolResult, McpError> {
    match result {
        Ok(value) => json_result(&value),
        Err(e) => error_result(&e),
    }
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl MacroService {
    // --- Status ---

    #[tool(description = "Get the current status of the macrocalc service including build info, uptime, and which nutrition database it queries")]
    fn macrocalc_status(&self) -> Result<CallToolResult, McpError> {
        json_result(&self.status_tracker.get_status())
    }

    #[tool(description = "Get instructions for turning a scanned barcode into macros. Call this when starting a food logging session or when unsure which macro tool to use.")]
    fn macro_instructions(&self) -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::success(vec![Content::text(MACRO_INSTRUCTIONS)]))
    }

    // --- Lookups ---

    #[tool(description = "Look up a product by barcode and return its per-100g macros (calories, protein, carbs, fat, fiber) plus the label serving size")]
    async fn get_macros_for_upc(&self, Parameters(p): Parameters<GetMacrosForUpcParams>) -> Result<CallToolResult, McpError> {
        respond(self.calculator.get_macros_for_upc(&p.upc).await)
    }

    #[tool(description = "Look up a product by barcode and scale its macros to a serving in g, kg, mg, oz, lb, ml or l. Values are rounded to 1 decimal.")]
    async fn get_macros_for_serving(&self, Parameters(p): Parameters<GetMacrosForServingParams>) -> Result<CallToolResult, McpError> {
        respond(
            self.calculator
                .get_macros_for_serving(p.upc, p.serving_amount, &p.serving_unit)
                .await,
        )
    }

    #[tool(description = "Look up a product by barcode and compute macros for a number of servings as printed on its label (e.g. \"1/2 cup (40 g)\")")]
    async fn get_macros_for_label_serving(&self, Parameters(p): Parameters<GetMacrosForLabelServingParams>) -> Result<CallToolResult, McpError> {
        respond(
            self.calculator
                .get_macros_for_label_serving(p.upc, p.servings)
                .await,
        )
    }

    #[tool(description = "Search the nutrition database by product name or brand. Results are paged; defaults to page 1 with 24 results.")]
    async fn search_products(&self, Parameters(p): Parameters<SearchProductsParams>) -> Result<CallToolResult, McpError> {
        let mut options = SearchOptions::default();
        if let Some(page) = p.page {
            options = options.page(page);
        }
        if let Some(page_size) = p.page_size {
            options = options.page_size(page_size);
        }
        if let Some(locale) = p.locale {
            options = options.locale(locale);
        }

        respond(self.calculator.search(&p.query, &options).await)
    }

    // --- Units ---

    #[tool(description = "Parse a serving size string into amount and unit, and report its gram weight when the unit is convertible")]
    fn parse_serving_size(&self, Parameters(p): Parameters<ParseServingSizeParams>) -> Result<CallToolResult, McpError> {
        respond(macros::parse_serving(&p.text))
    }

    #[tool(description = "Convert an amount in g, kg, mg, oz, lb, ml or l to grams (volumes assume 1 g/ml)")]
    fn convert_to_grams(&self, Parameters(p): Parameters<ConvertToGramsParams>) -> Result<CallToolResult, McpError> {
        respond(macros::convert_to_grams(p.amount, &p.unit))
    }
}

#[tool_handler]
impl ServerHandler for MacroService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "macrocalc".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Macro Calculator".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "macrocalc - Nutrition macros from Open Food Facts. \
                 Call macro_instructions first when logging food. \
                 Barcodes: get_macros_for_upc (per 100g), get_macros_for_serving (weight or volume), \
                 get_macros_for_label_serving (label servings). \
                 Search: search_products. \
                 Units: parse_serving_size, convert_to_grams. \
                 A product_not_found error means the user should enter the food manually."
                    .into(),
            ),
        }
    }
}
