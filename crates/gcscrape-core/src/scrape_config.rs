//! Static request configuration for the two scrape stages.
//!
//! Everything the target site needs to accept a request (endpoints, query
//! parameters, browser headers, session cookies) lives in a YAML file and is
//! passed explicitly into the client. Nothing here is computed.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::ConfigError;

/// Feature property holding the region name in the planning-area GeoJSON.
pub const DEFAULT_REGION_NAME_PROPERTY: &str = "PLN_AREA_N";

#[derive(Debug, Clone, Deserialize)]
pub struct ScrapeConfig {
    pub search: SearchConfig,
    pub detail: DetailConfig,
    #[serde(default)]
    pub regions: RegionsConfig,
}

/// Search-results endpoint and the fixed query sent to it.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// e.g. `https://www.geocaching.com/api/proxy/web/search/v2`
    pub endpoint: String,
    /// Prefixed onto the relative `detailsUrl` of each result.
    pub site_host: String,
    /// Query parameters, sent verbatim. Values must be quoted in YAML.
    #[serde(default)]
    pub query: BTreeMap<String, String>,
    #[serde(default)]
    pub request: RequestProfile,
}

/// Per-cache detail page location.
#[derive(Debug, Clone, Deserialize)]
pub struct DetailConfig {
    /// The cache code is appended directly, e.g. `https://www.geocaching.com/geocache/`.
    pub base_url: String,
    #[serde(default)]
    pub request: RequestProfile,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegionsConfig {
    #[serde(default = "default_name_property")]
    pub name_property: String,
}

impl Default for RegionsConfig {
    fn default() -> Self {
        Self {
            name_property: default_name_property(),
        }
    }
}

fn default_name_property() -> String {
    DEFAULT_REGION_NAME_PROPERTY.to_string()
}

/// Headers and cookies attached to every request of one stage.
#[derive(Clone, Default, Deserialize)]
pub struct RequestProfile {
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default)]
    pub cookies: BTreeMap<String, String>,
}

impl RequestProfile {
    /// Renders the cookies as a single `Cookie` header value (`a=1; b=2`).
    ///
    /// Returns `None` when no cookies are configured.
    #[must_use]
    pub fn cookie_header(&self) -> Option<String> {
        if self.cookies.is_empty() {
            return None;
        }
        Some(
            self.cookies
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}

impl std::fmt::Debug for RequestProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cookie_names: Vec<&str> = self.cookies.keys().map(String::as_str).collect();
        f.debug_struct("RequestProfile")
            .field("headers", &self.headers)
            .field("cookies", &cookie_names)
            .finish_non_exhaustive()
    }
}

/// Load and validate the scrape configuration from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_scrape_config(path: &Path) -> Result<ScrapeConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ScrapeFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_scrape_config(&content)
}

/// Parse and validate scrape configuration from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_scrape_config(content: &str) -> Result<ScrapeConfig, ConfigError> {
    let config: ScrapeConfig = serde_yaml::from_str(content)?;
    validate_scrape_config(&config)?;
    Ok(config)
}

fn validate_scrape_config(config: &ScrapeConfig) -> Result<(), ConfigError> {
    require_http_url("search.endpoint", &config.search.endpoint)?;
    require_http_url("search.site_host", &config.search.site_host)?;
    require_http_url("detail.base_url", &config.detail.base_url)?;

    if config.regions.name_property.trim().is_empty() {
        return Err(ConfigError::Validation(
            "regions.name_property must be non-empty".to_string(),
        ));
    }

    for (stage, profile) in [
        ("search", &config.search.request),
        ("detail", &config.detail.request),
    ] {
        if profile.headers.keys().any(|k| k.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "{stage}.request.headers contains an empty header name"
            )));
        }
        if profile.cookies.keys().any(|k| k.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "{stage}.request.cookies contains an empty cookie name"
            )));
        }
    }

    Ok(())
}

fn require_http_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} must be non-empty")));
    }
    if !(value.starts_with("https://") || value.starts_with("http://")) {
        return Err(ConfigError::Validation(format!(
            "{field} must be an http(s) URL, got \"{value}\""
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "scrape_config_test.rs"]
mod tests;
