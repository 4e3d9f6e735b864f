use std::str::FromStr;

use gloo_storage::errors::StorageError;
use gloo_storage::{LocalStorage, Storage};
use serde::{Deserialize, Serialize};

pub const STORAGE_KEY: &str = "dashboard_config";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Prefix for every endpoint. Empty means same origin.
    pub api_base: String,
    /// 0 lets the service pick the optimal count.
    pub default_cluster_count: u32,
    pub log_level: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self { api_base: String::new(), default_cluster_count: 0, log_level: "info".to_string() }
    }
}

impl DashboardConfig {
    /// Reads overrides from local storage. Runs before the logger exists, so problems are
    /// returned alongside the config for logging once it does.
    pub fn load() -> (Self, Option<String>) {
        match LocalStorage::get::<DashboardConfig>(STORAGE_KEY) {
            Ok(config) => (config, None),
            Err(StorageError::KeyNotFound(_)) => (Self::default(), None),
            Err(err) => (Self::default(), Some(format!("Ignoring stored dashboard config: {}", err))),
        }
    }

    pub fn log_level(&self) -> log::Level {
        log::Level::from_str(&self.log_level).unwrap_or(log::Level::Info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn partial_overrides_keep_defaults() {
        let config: DashboardConfig = serde_json::from_value(json!({"api_base": "http://localhost:5000"})).unwrap();
        assert_eq!(config.api_base, "http://localhost:5000");
        assert_eq!(config.default_cluster_count, 0);
        assert_eq!(config.log_level(), log::Level::Info);
    }

    #[test]
    fn log_level_parsing() {
        let mut config = DashboardConfig { log_level: "DEBUG".into(), ..DashboardConfig::default() };
        assert_eq!(config.log_level(), log::Level::Debug);
        config.log_level = "chatty".into();
        assert_eq!(config.log_level(), log::Level::Info);
    }
}
