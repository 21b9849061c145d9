use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{ContainerType, GeocacheType};

/// Region value for a cache outside every loaded polygon.
pub const NO_REGION: &str = "NIL";

/// One geocache, flattened for CSV/JSON export.
///
/// Field order is the export column order. The listing stage fills everything
/// up to `details_url`; `region` is set by the resolver and the trailing
/// `Option` fields by the detail stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheRecord {
    pub cache_id: i64,
    /// Site code, e.g. `"GC8ABCD"`. Unique within a batch.
    pub cache_code: String,
    pub name: String,
    pub geocache_type: GeocacheType,
    pub container_type: ContainerType,
    /// 1.0 to 5.0 in half steps, taken as given.
    pub difficulty: f64,
    pub terrain: f64,
    pub favorite_points: u32,
    pub trackable_count: u32,
    pub latitude: f64,
    pub longitude: f64,
    /// Planning-area name, or [`NO_REGION`].
    pub region: String,
    pub owner_id: String,
    pub owner_name: String,
    pub placed_date: NaiveDate,
    /// `None` when the cache has never been found.
    pub last_found_date: Option<NaiveDate>,
    /// Time-of-day part of the last-found timestamp, as sent by the site.
    pub last_found_time: Option<String>,
    /// Absolute URL of the detail page. May be empty if the listing had none.
    pub details_url: String,
    pub description: Option<String>,
    /// Decoded hint text.
    pub hint: Option<String>,
    pub total_found: Option<u32>,
    pub total_did_not_find: Option<u32>,
    /// Percentage of found logs, rounded up. `None` when there are no logs.
    pub found_rate: Option<u8>,
}

/// Fields scraped from a cache's detail page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CacheDetail {
    pub description: String,
    /// Already decoded.
    pub hint: String,
    pub total_found: u32,
    pub total_did_not_find: u32,
}

impl CacheRecord {
    /// `true` once the resolver has placed the cache inside a region.
    #[must_use]
    pub fn has_region(&self) -> bool {
        self.region != NO_REGION
    }

    /// `true` when `details_url` holds something other than whitespace.
    #[must_use]
    pub fn has_details_url(&self) -> bool {
        !self.details_url.trim().is_empty()
    }

    /// Attaches detail-page data and derives `found_rate`.
    pub fn apply_detail(&mut self, detail: CacheDetail) {
        self.found_rate = found_rate(detail.total_found, detail.total_did_not_find);
        self.description = Some(detail.description);
        self.hint = Some(detail.hint);
        self.total_found = Some(detail.total_found);
        self.total_did_not_find = Some(detail.total_did_not_find);
    }
}

/// `ceil(100 * found / (found + did_not_find))`, or `None` when both are zero.
///
/// Integer arithmetic, so exact ratios never round up by a float error.
#[must_use]
pub fn found_rate(found: u32, did_not_find: u32) -> Option<u8> {
    let total = u64::from(found) + u64::from(did_not_find);
    if total == 0 {
        return None;
    }
    let rate = (u64::from(found) * 100).div_ceil(total);
    u8::try_from(rate).ok()
}
