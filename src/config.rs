use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub storage: StorageConfig,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Fixed page size requested from the list endpoint.
    pub page_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory under which asset paths are materialized.
    pub asset_root: String,
    /// Prefix stripped from asset URLs to derive their on-disk path.
    pub url_prefix: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub user_agent: String,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Loads the config file, falling back to defaults when it does not
    /// exist. The CLI only requires the snapshot path, so a config file
    /// is optional.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            debug!("config file {:?} not found, using defaults", path.as_ref());
            Ok(Config::default())
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://yts.am/api/v2/list_movies.json".to_string(),
            page_size: 50,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            asset_root: ".".to_string(),
            url_prefix: "https://yts.am/".to_string(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 300,
            connect_timeout_secs: 10,
            user_agent: "ytsync/0.1 (catalog mirror)".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_point_at_yts() {
        let config = Config::default();
        assert_eq!(config.api.page_size, 50);
        assert!(config.api.base_url.starts_with("https://yts.am/"));
        assert_eq!(config.storage.url_prefix, "https://yts.am/");
    }

    #[test]
    fn load_or_default_with_missing_file() {
        let config = Config::load_or_default("/nonexistent/ytsync.toml").unwrap();
        assert_eq!(config.http.timeout_secs, 300);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api]\nbase_url = \"http://localhost:9999/list\"\npage_size = 5").unwrap();
        let config = Config::load_or_default(file.path()).unwrap();
        assert_eq!(config.api.page_size, 5);
        assert_eq!(config.storage.url_prefix, "https://yts.am/");
    }
}
