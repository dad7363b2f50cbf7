//! Build script for macrocalc
//!
//! Stamps a build number and timestamp into the binary, plus the operator
//! contact that goes into the Open Food Facts User-Agent.

use std::fs;
use std::path::Path;

fn main() {
    // Rerun on source changes, or when the contact changes
    println!("cargo:rerun-if-changed=src");
    println!("cargo:rerun-if-env-changed=MACROCALC_CONTACT");

    let build_number_path = Path::new("build_number.txt");

    // A missing or garbled counter restarts at 1
    let previous: u64 = fs::read_to_string(build_number_path)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0);
    let build_number = previous + 1;

    if let Err(e) = fs::write(build_number_path, build_number.to_string()) {
        println!("cargo:warning=Could not persist build number: {}", e);
    }

    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();

    // Contacts are a single token or email; anything with parentheses would break the UA comment
    let contact = std::env::var("MACROCALC_CONTACT")
        .map(|c| c.trim().to_string())
        .unwrap_or_default();
    let contact = if contact.contains(['(', ')', '\n']) {
        println!("cargo:warning=Ignoring MACROCALC_CONTACT with parentheses or newlines");
        String::new()
    } else {
        contact
    };

    println!("cargo:rustc-env=MACROCALC_BUILD_NUMBER={}", build_number);
    println!("cargo:rustc-env=MACROCALC_BUILD_TIMESTAMP={}", timestamp);
    println!("cargo:rustc-env=MACROCALC_BUILD_CONTACT={}", contact);
}
