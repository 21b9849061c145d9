use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("malformed search response: {reason}")]
    MalformedResponse { reason: String },

    #[error("malformed detail page for {code}: {reason}")]
    MalformedDetailPage { code: String, reason: String },

    #[error("normalization error for cache {code}: {reason}")]
    Normalization { code: String, reason: String },

    #[error("invalid request header \"{name}\": {reason}")]
    InvalidHeader { name: String, reason: String },

    #[error("failed to read region file {path}: {source}")]
    GeometryIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid region geometry: {reason}")]
    Geometry { reason: String },
}
