//! Remote database configuration
//!
//! Read from the environment once at startup; every URL the engine requests
//! is built here.

use reqwest::Url;
use thiserror::Error;

use crate::build_info::BuildInfo;

pub const DEFAULT_SCHEME: &str = "https";
pub const DEFAULT_DOMAIN: &str = "openfoodfacts.org";
pub const DEFAULT_LOOKUP_SUBDOMAIN: &str = "world";

/// Product fields requested on a code lookup
pub const LOOKUP_FIELDS: &[&str] = &[
    "product_name",
    "brands",
    "categories_tags",
    "code",
    "image_url",
    "quantity",
    "serving_size",
    "nutriments",
];

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Invalid locale: {0:?}")]
    InvalidLocale(String),
}

/// Where and how to reach the nutrition database
#[derive(Debug, Clone, PartialEq)]
pub struct OffConfig {
    pub scheme: String,
    pub domain: String,
    pub lookup_subdomain: String,
    pub user_agent: String,
}

impl Default for OffConfig {
    fn default() -> Self {
        Self {
            scheme: DEFAULT_SCHEME.to_string(),
            domain: DEFAULT_DOMAIN.to_string(),
            lookup_subdomain: DEFAULT_LOOKUP_SUBDOMAIN.to_string(),
            user_agent: BuildInfo::user_agent(),
        }
    }
}

impl OffConfig {
    /// Build the configuration from environment variables
    ///
    /// Environment variables:
    /// - `MACROCALC_OFF_SCHEME`: "https" (default) or "http"
    /// - `MACROCALC_OFF_DOMAIN`: database domain (default "openfoodfacts.org")
    /// - `MACROCALC_LOOKUP_SUBDOMAIN`: subdomain for code lookups (default "world")
    /// - `MACROCALC_USER_AGENT`: User-Agent header value
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            scheme: env_or("MACROCALC_OFF_SCHEME", defaults.scheme),
            domain: env_or("MACROCALC_OFF_DOMAIN", defaults.domain),
            lookup_subdomain: env_or("MACROCALC_LOOKUP_SUBDOMAIN", defaults.lookup_subdomain),
            user_agent: env_or("MACROCALC_USER_AGENT", defaults.user_agent),
        }
    }

    /// `{scheme}://{subdomain}.{domain}/`
    fn host_url(&self, subdomain: &str) -> Result<Url, ConfigError> {
        if !is_valid_subdomain(subdomain) {
            return Err(ConfigError::InvalidLocale(subdomain.to_string()));
        }
        let raw = format!("{}://{}.{}/", self.scheme, subdomain, self.domain);
        Url::parse(&raw).map_err(|e| ConfigError::InvalidBaseUrl {
            url: raw.clone(),
            reason: e.to_string(),
        })
    }

    /// Exact-code lookup: `/api/v2/product/{upc}?fields=...`
    pub fn lookup_url(&self, upc: &str) -> Result<Url, ConfigError> {
        let mut url = self.host_url(&self.lookup_subdomain)?;
        url.path_segments_mut()
            .map_err(|_| ConfigError::InvalidBaseUrl {
                url: self.domain.clone(),
                reason: "cannot be a base".to_string(),
            })?
            .clear()
            .extend(["api", "v2", "product", upc]);
        url.query_pairs_mut()
            .append_pair("fields", &LOOKUP_FIELDS.join(","));
        Ok(url)
    }

    /// Full-text search: `/cgi/search.pl?search_terms=...` on the locale's host
    pub fn search_url(
        &self,
        query: &str,
        locale: &str,
        page: u32,
        page_size: u32,
    ) -> Result<Url, ConfigError> {
        let mut url = self.host_url(locale)?.join("cgi/search.pl").map_err(|e| {
            ConfigError::InvalidBaseUrl {
                url: self.domain.clone(),
                reason: e.to_string(),
            }
        })?;
        url.query_pairs_mut()
            .append_pair("search_terms", query)
            .append_pair("search_simple", "1")
            .append_pair("action", "process")
            .append_pair("json", "true")
            .append_pair("page", &page.to_string())
            .append_pair("page_size", &page_size.to_string());
        Ok(url)
    }
}

fn env_or(key: &str, default: String) -> String {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or(default)
}

/// Locales and subdomains are single DNS labels ("world", "fr", "uk")
fn is_valid_subdomain(s: &str) -> bool {
    !s.is_empty()
        && s.len() <= 63
        && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        && !s.starts_with('-')
        && !s.ends_with('-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_url() {
        let url = OffConfig::default().lookup_url("737628064502").unwrap();
        assert_eq!(url.host_str(), Some("world.openfoodfacts.org"));
        assert_eq!(url.path(), "/api/v2/product/737628064502");
        let fields: Vec<_> = url.query_pairs().collect();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].0, "fields");
        assert!(fields[0].1.contains("serving_size"));
        assert!(fields[0].1.contains("nutriments"));
    }

    #[test]
    fn test_lookup_url_encodes_code() {
        let url = OffConfig::default().lookup_url("12/../34").unwrap();
        assert_eq!(url.path(), "/api/v2/product/12%2F..%2F34");
    }

    #[test]
    fn test_search_url() {
        let url = OffConfig::default()
            .search_url("greek yogurt & honey", "fr", 2, 24)
            .unwrap();
        assert_eq!(url.host_str(), Some("fr.openfoodfacts.org"));
        assert_eq!(url.path(), "/cgi/search.pl");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs[0], ("search_terms".into(), "greek yogurt & honey".into()));
        assert!(pairs.contains(&("search_simple".into(), "1".into())));
        assert!(pairs.contains(&("action".into(), "process".into())));
        assert!(pairs.contains(&("json".into(), "true".into())));
        assert!(pairs.contains(&("page".into(), "2".into())));
        assert!(pairs.contains(&("page_size".into(), "24".into())));
        assert!(!url.as_str().contains(' '));
        assert!(url.as_str().contains("%26"));
    }

    #[test]
    fn test_search_url_rejects_bad_locale() {
        let config = OffConfig::default();
        for locale in ["", "evil.com/x?", "fr.world", "-fr"] {
            assert_eq!(
                config.search_url("x", locale, 1, 24).unwrap_err(),
                ConfigError::InvalidLocale(locale.to_string())
            );
        }
    }

    #[test]
    fn test_custom_domain() {
        let config = OffConfig {
            scheme: "http".into(),
            domain: "openfoodfacts.net".into(),
            ..OffConfig::default()
        };
        let url = config.lookup_url("1").unwrap();
        assert_eq!(url.as_str().split('?').next(), Some("http://world.openfoodfacts.net/api/v2/product/1"));
    }

    // The only test that sets these variables
    #[test]
    fn test_from_env_overrides_and_blank_fallback() {
        std::env::set_var("MACROCALC_OFF_DOMAIN", " openfoodfacts.net ");
        std::env::set_var("MACROCALC_OFF_SCHEME", "http");
        std::env::set_var("MACROCALC_LOOKUP_SUBDOMAIN", "   ");
        std::env::set_var("MACROCALC_USER_AGENT", "");

        let config = OffConfig::from_env();

        std::env::remove_var("MACROCALC_OFF_DOMAIN");
        std::env::remove_var("MACROCALC_OFF_SCHEME");
        std::env::remove_var("MACROCALC_LOOKUP_SUBDOMAIN");
        std::env::remove_var("MACROCALC_USER_AGENT");

        let defaults = OffConfig::default();
        assert_eq!(config.domain, "openfoodfacts.net");
        assert_eq!(config.scheme, "http");
        assert_eq!(config.lookup_subdomain, defaults.lookup_subdomain);
        assert_eq!(config.user_agent, defaults.user_agent);
        assert_eq!(OffConfig::from_env(), defaults);
    }
}
