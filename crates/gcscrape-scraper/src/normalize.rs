//! Normalization from the raw search payload to [`gcscrape_core::CacheRecord`].
//!
//! Envelope validation and premium filtering work on the untyped JSON so a
//! premium entry with nulled fields never has to deserialize.

use std::collections::HashSet;

use chrono::NaiveDate;
use gcscrape_core::{CacheRecord, ContainerType, GeocacheType, NO_REGION};
use serde::Deserialize;

use crate::error::ScraperError;
use crate::types::SearchResult;
use crate::url::absolute_site_url;

/// Parses a search response body into records, in response order.
///
/// Premium-only entries are skipped entirely. A repeated cache code keeps the
/// first occurrence.
///
/// # Errors
///
/// - [`ScraperError::Deserialize`] if the body is not JSON or a public entry
///   does not have the expected shape.
/// - [`ScraperError::MalformedResponse`] if `results` is missing or not a list.
/// - [`ScraperError::Normalization`] if a date field cannot be parsed.
pub fn normalize_search_response(
    body: &str,
    site_host: &str,
) -> Result<Vec<CacheRecord>, ScraperError> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| ScraperError::Deserialize {
            context: "search response".to_owned(),
            source: e,
        })?;

    let results = value
        .get("results")
        .ok_or_else(|| ScraperError::MalformedResponse {
            reason: "missing `results` key".to_owned(),
        })?
        .as_array()
        .ok_or_else(|| ScraperError::MalformedResponse {
            reason: "`results` is not a list".to_owned(),
        })?;

    let mut seen_codes = HashSet::new();
    let mut records = Vec::with_capacity(results.len());
    let mut premium_skipped = 0usize;

    for (idx, entry) in results.iter().enumerate() {
        if is_premium_only(entry) {
            premium_skipped += 1;
            tracing::debug!(
                idx,
                code = entry.get("code").and_then(|c| c.as_str()).unwrap_or("?"),
                "skipping premium-only listing"
            );
            continue;
        }

        let result = SearchResult::deserialize(entry).map_err(|e| ScraperError::Deserialize {
            context: format!("search result #{idx}"),
            source: e,
        })?;

        if !seen_codes.insert(result.code.clone()) {
            tracing::warn!(code = %result.code, "duplicate cache code in search results; keeping first");
            continue;
        }

        records.push(normalize_result(result, site_host)?);
    }

    tracing::debug!(
        total = results.len(),
        kept = records.len(),
        premium_skipped,
        "normalized search results"
    );

    Ok(records)
}

/// Normalizes one public [`SearchResult`] into a [`CacheRecord`].
///
/// `region` starts as [`NO_REGION`] and the detail fields start empty.
///
/// # Errors
///
/// Returns [`ScraperError::Normalization`] if `placedDate` or a non-empty
/// `lastFoundDate` has no parseable `YYYY-MM-DD` date part.
pub fn normalize_result(
    result: SearchResult,
    site_host: &str,
) -> Result<CacheRecord, ScraperError> {
    let placed_date = parse_date_part(&result.code, "placedDate", &result.placed_date)?;

    let (last_found_date, last_found_time) = match result
        .last_found_date
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        Some(raw) => {
            let date = parse_date_part(&result.code, "lastFoundDate", raw)?;
            let time = split_timestamp(raw).1.map(str::to_owned);
            (Some(date), time)
        }
        None => (None, None),
    };

    let details_url = absolute_site_url(site_host, result.details_url.as_deref().unwrap_or(""));

    Ok(CacheRecord {
        cache_id: result.id,
        cache_code: result.code,
        name: result.name,
        geocache_type: GeocacheType::from_code(result.geocache_type),
        container_type: ContainerType::from_code(result.container_type),
        difficulty: result.difficulty,
        terrain: result.terrain,
        favorite_points: result.favorite_points,
        trackable_count: result.trackable_count,
        latitude: result.posted_coordinates.latitude,
        longitude: result.posted_coordinates.longitude,
        region: NO_REGION.to_owned(),
        owner_id: result.owner.code,
        owner_name: result.owner.username,
        placed_date,
        last_found_date,
        last_found_time,
        details_url,
        description: None,
        hint: None,
        total_found: None,
        total_did_not_find: None,
        found_rate: None,
    })
}

fn is_premium_only(entry: &serde_json::Value) -> bool {
    entry
        .get("premiumOnly")
        .and_then(serde_json::Value::as_bool)
        .unwrap_or(false)
}

/// Splits `"2023-05-01T08:13:42"` into `("2023-05-01", Some("08:13:42"))`.
/// A timestamp without a `T` is all date.
fn split_timestamp(raw: &str) -> (&str, Option<&str>) {
    match raw.split_once('T') {
        Some((date, time)) => (date, Some(time).filter(|t| !t.is_empty())),
        None => (raw, None),
    }
}

fn parse_date_part(code: &str, field: &str, raw: &str) -> Result<NaiveDate, ScraperError> {
    let (date, _) = split_timestamp(raw.trim());
    NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|e| ScraperError::Normalization {
        code: code.to_owned(),
        reason: format!("{field} \"{raw}\" is not a date: {e}"),
    })
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
