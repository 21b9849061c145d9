//! Response types for the geocaching.com search proxy (`/api/proxy/web/search/v2`).
//!
//! ## Observed shape
//!
//! The body is an object with a `results` array and a `total` count. Each
//! result is camelCase JSON. Premium-only listings come back in the same array
//! with `premiumOnly: true` and, for anonymous sessions, with several fields
//! nulled out. They are filtered on the raw JSON before deserializing into
//! [`SearchResult`], so the struct only has to describe public listings.
//!
//! ### Timestamps
//! `placedDate` and `lastFoundDate` are local timestamps without an offset,
//! e.g. `"2019-04-27T00:00:00"` or `"2023-05-01T08:13:42.53"`. `lastFoundDate`
//! is `null` for caches that have never been found.
//!
//! ### `detailsUrl`
//! Site-relative, e.g. `"/geocache/GC8ABCD"`.
//!
//! ### Type codes
//! `geocacheType` and `containerType` are integers; see
//! [`gcscrape_core::types`] for the known codes.

use serde::Deserialize;

/// A single public listing from the search results.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub id: i64,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub favorite_points: u32,
    pub difficulty: f64,
    pub terrain: f64,
    pub geocache_type: i64,
    pub container_type: i64,
    pub posted_coordinates: PostedCoordinates,
    #[serde(default)]
    pub details_url: Option<String>,
    pub placed_date: String,
    #[serde(default)]
    pub last_found_date: Option<String>,
    pub owner: Owner,
    #[serde(default)]
    pub trackable_count: u32,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PostedCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Owner {
    /// Public owner code, e.g. `"PR1A2B3"`.
    pub code: String,
    pub username: String,
}
