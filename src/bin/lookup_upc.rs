//! Utility to look up a barcode and print its macros
//!
//! Usage: lookup_upc <upc> [amount] [unit]
//!
//! With only a code, prints per-100g macros. With an amount (and optional
//! unit, default g), prints macros scaled to that serving.

use macrocalc::nutrition::DEFAULT_UNIT;
use macrocalc::{MacroCalculator, OffConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("macrocalc=warn".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(upc) = args.first() else {
        eprintln!("Usage: lookup_upc <upc> [amount] [unit]");
        std::process::exit(2);
    };

    let calculator = MacroCalculator::from_config(OffConfig::from_env())?;

    let json = match args.get(1) {
        None => {
            let info = calculator.get_macros_for_upc(upc).await?;
            serde_json::to_string_pretty(&info)?
        }
        Some(amount) => {
            let amount: f64 = amount
                .parse()
                .map_err(|_| format!("Invalid amount: {}", amount))?;
            let unit = args.get(2).map(String::as_str).unwrap_or(DEFAULT_UNIT);
            let result = calculator
                .get_macros_for_serving(upc.as_str(), amount, unit)
                .await?;
            serde_json::to_string_pretty(&result)?
        }
    };

    println!("{}", json);
    Ok(())
}
