use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// YAML file holding endpoints, query parameters, headers and cookies.
    pub scrape_config_path: PathBuf,
    /// GeoJSON file with one feature per region polygon.
    pub regions_path: PathBuf,
    /// Output file name without extension; `.csv` / `.json` are appended.
    pub output_stem: PathBuf,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}
