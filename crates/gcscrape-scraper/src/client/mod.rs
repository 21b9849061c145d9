//! HTTP client for the geocaching.com search proxy and cache detail pages.

mod details;
mod listings;

use std::collections::BTreeMap;
use std::time::Duration;

use gcscrape_core::RequestProfile;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, COOKIE};
use reqwest::Client;

use crate::error::ScraperError;

/// Sequential client for both scrape stages.
///
/// Every call issues exactly one GET. There is no retry, backoff or rate
/// limiting; a failed request surfaces as an error to the caller.
pub struct GeocachingClient {
    pub(super) client: Client,
}

impl GeocachingClient {
    /// Creates a `GeocachingClient` with the configured timeout and default `User-Agent`.
    ///
    /// A `User-Agent` set in a request profile overrides the default.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// GETs `url` with the profile's headers and cookies and returns the body.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidHeader`] if a configured header cannot be sent.
    /// - [`ScraperError::Http`] on network or TLS failure.
    /// - [`ScraperError::UnexpectedStatus`] on any non-2xx status.
    pub(super) async fn get_text(
        &self,
        url: &str,
        query: &BTreeMap<String, String>,
        profile: &RequestProfile,
    ) -> Result<String, ScraperError> {
        let headers = build_headers(profile)?;

        let mut request = self.client.get(url).headers(headers);
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        Ok(response.text().await?)
    }
}

/// Converts a request profile into a header map, folding cookies into a
/// single `Cookie` header.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidHeader`] for a header name or value that is
/// not valid HTTP.
fn build_headers(profile: &RequestProfile) -> Result<HeaderMap, ScraperError> {
    let mut headers = HeaderMap::with_capacity(profile.headers.len() + 1);

    for (name, value) in &profile.headers {
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|e| ScraperError::InvalidHeader {
                name: name.clone(),
                reason: e.to_string(),
            })?;
        let header_value = HeaderValue::from_str(value).map_err(|e| ScraperError::InvalidHeader {
            name: name.clone(),
            reason: e.to_string(),
        })?;
        headers.insert(header_name, header_value);
    }

    if let Some(cookie) = profile.cookie_header() {
        let mut value = HeaderValue::from_str(&cookie).map_err(|e| ScraperError::InvalidHeader {
            name: COOKIE.to_string(),
            reason: e.to_string(),
        })?;
        value.set_sensitive(true);
        headers.insert(COOKIE, value);
    }

    Ok(headers)
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
