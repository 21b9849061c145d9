use gcscrape_core::{CacheRecord, SearchConfig};

use super::GeocachingClient;
use crate::error::ScraperError;
use crate::normalize::normalize_search_response;

impl GeocachingClient {
    /// Fetches the search listing and returns normalized, non-premium records.
    ///
    /// One request covers the whole batch; the query's `take` bounds its size.
    ///
    /// # Errors
    ///
    /// Propagates request failures from the search endpoint and any
    /// [`ScraperError::MalformedResponse`], [`ScraperError::Deserialize`] or
    /// [`ScraperError::Normalization`] raised while normalizing the body.
    pub async fn fetch_listings(
        &self,
        search: &SearchConfig,
    ) -> Result<Vec<CacheRecord>, ScraperError> {
        tracing::debug!(endpoint = %search.endpoint, "fetching search listing");
        let body = self
            .get_text(&search.endpoint, &search.query, &search.request)
            .await?;
        let records = normalize_search_response(&body, &search.site_host)?;
        tracing::info!(count = records.len(), "search listing normalized");
        Ok(records)
    }
}
