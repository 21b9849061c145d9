pub mod app_config;
pub mod cipher;
pub mod config;
pub mod records;
pub mod scrape_config;
pub mod types;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use cipher::decode_hint;
pub use config::{load_app_config, load_app_config_from_env};
pub use records::{found_rate, CacheDetail, CacheRecord, NO_REGION};
pub use scrape_config::{
    load_scrape_config, parse_scrape_config, DetailConfig, RegionsConfig, RequestProfile,
    ScrapeConfig, SearchConfig,
};
pub use types::{ContainerType, GeocacheType};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read scrape config at {path}: {source}")]
    ScrapeFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse scrape config: {0}")]
    ScrapeFileParse(#[from] serde_yaml::Error),

    #[error("scrape config validation failed: {0}")]
    Validation(String),
}
