//! Build information module
//!
//! Compile-time build metadata embedded by `build.rs`, and the identity
//! macrocalc presents to Open Food Facts.

use serde::Serialize;

/// Build number, incremented on each recompilation
pub const BUILD_NUMBER: u64 = match option_env!("MACROCALC_BUILD_NUMBER") {
    Some(s) => match parse_u64(s) {
        Some(n) => n,
        None => 0,
    },
    None => 0,
};

/// Build timestamp in ISO 8601 format
pub const BUILD_TIMESTAMP: &str = match option_env!("MACROCALC_BUILD_TIMESTAMP") {
    Some(s) => s,
    None => "unknown",
};

/// Contact baked in at build time from `MACROCALC_CONTACT`
///
/// Open Food Facts asks API clients to identify themselves with an app name,
/// version and a way to reach the operator.
pub const CONTACT: Option<&str> = match option_env!("MACROCALC_BUILD_CONTACT") {
    Some(s) if !s.is_empty() => Some(s),
    _ => None,
};

/// Package version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Package name from Cargo.toml
pub const NAME: &str = env!("CARGO_PKG_NAME");

pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

const fn parse_u64(s: &str) -> Option<u64> {
    let bytes = s.as_bytes();
    if bytes.is_empty() {
        return None;
    }
    let mut result: u64 = 0;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b < b'0' || b > b'9' {
            return None;
        }
        result = result * 10 + (b - b'0') as u64;
        i += 1;
    }
    Some(result)
}

/// Build information reported by the status tool
#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<&'static str>,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            name: NAME,
            version: VERSION,
            build_number: BUILD_NUMBER,
            build_timestamp: BUILD_TIMESTAMP,
            description: DESCRIPTION,
            contact: CONTACT,
        }
    }

    /// Default `User-Agent` sent to the nutrition database
    ///
    /// `macrocalc/1.0.0 (build 42; ops@example.org)`, or without the
    /// contact when none was configured at build time.
    pub fn user_agent() -> String {
        Self::current().agent_string()
    }

    fn agent_string(&self) -> String {
        match self.contact {
            Some(contact) => format!(
                "{}/{} (build {}; {})",
                self.name, self.version, self.build_number, contact
            ),
            None => format!("{}/{} (build {})", self.name, self.version, self.build_number),
        }
    }

    /// "1.0.0+42", used in the banner and status output
    pub fn version_label(&self) -> String {
        format!("{}+{}", self.version, self.build_number)
    }
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self::current()
    }
}

/// Print the startup banner to stderr
pub fn print_startup_banner() {
    let info = BuildInfo::current();
    eprintln!("===============================================");
    eprintln!("  Macro Calculator (macrocalc)");
    eprintln!("  Version: {}", info.version_label());
    eprintln!("  Compiled: {}", info.build_timestamp);
    if info.contact.is_none() {
        eprintln!("  No contact set; rebuild with MACROCALC_CONTACT to identify this client");
    }
    eprintln!("===============================================");
}
