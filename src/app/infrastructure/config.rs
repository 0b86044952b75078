use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::error::Result;

pub const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];
pub const MODEL_VAR: &str = "CODESNAP_MODEL";
pub const HOST_BRIDGE_VAR: &str = "CODESNAP_HOST_BRIDGE";

/// Startup configuration. Read once, never written back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    #[serde(default)]
    pub host_bridge_url: Option<String>,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_api_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_request_timeout() -> u64 {
    60
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            api_base_url: default_api_base_url(),
            host_bridge_url: None,
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl AppConfig {
    /// Config file (if any) overlaid with environment variables.
    pub fn load() -> Self {
        let path = Self::get_config_path();
        let mut config = match Self::from_file(&path) {
            Ok(Some(config)) => config,
            Ok(None) => Self::default(),
            Err(e) => {
                log::warn!("Failed to read {}: {e}. Using defaults.", path.display());
                Self::default()
            }
        };
        config.apply_env(|name| std::env::var(name).ok());
        config
    }

    /// `Ok(None)` when the file does not exist.
    pub fn from_file(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&contents)?))
    }

    /// Override fields from variables returned by `lookup`. Blank values are ignored.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = API_KEY_VARS.iter().find_map(|&name| var(name)) {
            self.api_key = Some(key);
        }
        if let Some(model) = var(MODEL_VAR) {
            self.model = model;
        }
        if let Some(url) = var(HOST_BRIDGE_VAR) {
            self.host_bridge_url = Some(url);
        }
    }

    /// Get config file path (cross-platform)
    pub fn get_config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("codesnap");
        path.push("config.json");
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::infrastructure::error::AppError;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.api_key, None);
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.request_timeout_secs, 60);
        assert!(config.host_bridge_url.is_none());
    }

    #[test]
    fn test_partial_config() {
        let json = r#"{"model": "gemini-pro"}"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.model, "gemini-pro");
        assert_eq!(config.api_base_url, default_api_base_url());
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        assert!(AppConfig::from_file(&path).unwrap().is_none());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"api_key": "k1", "host_bridge_url": "http://localhost:9"}"#).unwrap();

        let config = AppConfig::from_file(&path).unwrap().unwrap();
        assert_eq!(config.api_key.as_deref(), Some("k1"));
        assert_eq!(config.host_bridge_url.as_deref(), Some("http://localhost:9"));
    }

    #[test]
    fn test_corrupt_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(AppConfig::from_file(&path), Err(AppError::Json(_))));
    }

    #[test]
    fn test_env_overrides_file_values() {
        let mut config = AppConfig {
            api_key: Some("from-file".to_string()),
            ..Default::default()
        };
        config.apply_env(env(&[
            ("API_KEY", "from-env"),
            ("CODESNAP_MODEL", "gemini-2.0-flash"),
            ("CODESNAP_HOST_BRIDGE", "http://127.0.0.1:7878"),
        ]));
        assert_eq!(config.api_key.as_deref(), Some("from-env"));
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.host_bridge_url.as_deref(), Some("http://127.0.0.1:7878"));
    }

    #[test]
    fn test_gemini_key_wins_over_generic_key() {
        let mut config = AppConfig::default();
        config.apply_env(env(&[("GEMINI_API_KEY", "g"), ("API_KEY", "a")]));
        assert_eq!(config.api_key.as_deref(), Some("g"));
    }

    #[test]
    fn test_blank_env_is_ignored() {
        let mut config = AppConfig::default();
        config.apply_env(env(&[("GEMINI_API_KEY", "  "), ("CODESNAP_MODEL", "")]));
        assert_eq!(config.api_key, None);
        assert_eq!(config.model, "gemini-2.5-flash");
    }

    #[test]
    fn test_config_path() {
        let path = AppConfig::get_config_path();
        assert!(path.ends_with("codesnap/config.json"));
    }
}
