use std::collections::BTreeMap;

use gcscrape_core::{CacheDetail, CacheRecord, DetailConfig};

use super::GeocachingClient;
use crate::detail::parse_detail_page;
use crate::error::ScraperError;
use crate::url::detail_page_url;

impl GeocachingClient {
    /// Fetches and parses the detail page for `code`.
    ///
    /// # Errors
    ///
    /// Propagates request failures and [`ScraperError::MalformedDetailPage`]
    /// when the page lacks usable log totals.
    pub async fn fetch_detail(
        &self,
        detail: &DetailConfig,
        code: &str,
    ) -> Result<CacheDetail, ScraperError> {
        let url = detail_page_url(&detail.base_url, code);
        tracing::debug!(code, url = %url, "fetching detail page");
        let html = self.get_text(&url, &BTreeMap::new(), &detail.request).await?;
        parse_detail_page(&html, code)
    }

    /// Fetches the detail page for `record` and merges it in place.
    ///
    /// # Errors
    ///
    /// See [`GeocachingClient::fetch_detail`]. `record` is untouched on error.
    pub async fn enrich(
        &self,
        detail: &DetailConfig,
        record: &mut CacheRecord,
    ) -> Result<(), ScraperError> {
        let scraped = self.fetch_detail(detail, &record.cache_code).await?;
        record.apply_detail(scraped);
        tracing::info!(
            code = %record.cache_code,
            found_rate = ?record.found_rate,
            "detail page scraped"
        );
        Ok(())
    }
}
