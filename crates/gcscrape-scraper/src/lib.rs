pub mod client;
pub mod detail;
pub mod error;
pub mod normalize;
pub mod region;
pub mod types;
pub mod url;

pub use client::GeocachingClient;
pub use detail::parse_detail_page;
pub use error::ScraperError;
pub use normalize::normalize_search_response;
pub use region::{resolve_region, RegionPolygon, RegionSet};
pub use types::SearchResult;
