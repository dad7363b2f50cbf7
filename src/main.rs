//! Macro Calculator (macrocalc)
//!
//! An MCP server that turns barcodes into nutrition macros.

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use macrocalc::build_info;
use macrocalc::mcp::MacroService;
use macrocalc::{MacroCalculator, OffConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (output to stderr to not interfere with MCP stdio)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("macrocalc=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    // Print startup banner to stderr
    build_info::print_startup_banner();
    eprintln!("Starting MCP server on stdio...");

    let config = OffConfig::from_env();
    eprintln!(
        "Nutrition database: {}://{}.{}",
        config.scheme, config.lookup_subdomain, config.domain
    );

    let calculator = MacroCalculator::from_config(config)?;

    // Create the macrocalc service
    let service = MacroService::new(calculator);

    // Create stdio transport
    let transport = (stdin(), stdout());

    // Start the MCP server
    let server = service.serve(transport).await?;

    // Wait for the server to complete
    server.waiting().await?;

    Ok(())
}
