use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::client::{DEFAULT_API_URL, DEFAULT_TIMEOUT_MS};
use crate::git::VersionControl;

pub const DEFAULT_MODEL: &str = "moonshotai/kimi-k2:free";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_model() -> String {
    DEFAULT_MODEL.into()
}
fn default_api_url() -> String {
    DEFAULT_API_URL.into()
}
fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_url: default_api_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

const ENV_KEYS: &[&str] = &["CMG_MODEL", "CMG_API_URL", "CMG_TIMEOUT_MS"];

impl AppConfig {
    /// Load config with layered resolution: defaults → global TOML →
    /// repo-root `.env` → environment variables. Read once per run.
    pub fn load() -> Result<Self> {
        let mut cfg = Self::default();

        if let Some(path) = global_config_path() {
            if path.exists() {
                let content = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                let file_cfg: AppConfig = toml::from_str(&content)
                    .with_context(|| format!("Failed to parse {}", path.display()))?;
                cfg.merge_from(&file_cfg);
            }
        }

        if let Ok(Some(root)) = crate::git::GitCli::new().workspace_root() {
            let env_path = root.join(".env");
            if env_path.exists() {
                cfg.apply_env_map(&read_dotenv(&env_path));
            }
        }

        let mut env_map = HashMap::new();
        for key in ENV_KEYS {
            if let Ok(val) = std::env::var(key) {
                env_map.insert((*key).to_string(), val);
            }
        }
        cfg.apply_env_map(&env_map);

        Ok(cfg)
    }

    fn merge_from(&mut self, other: &AppConfig) {
        if !other.model.is_empty() {
            self.model = other.model.clone();
        }
        if !other.api_url.is_empty() {
            self.api_url = other.api_url.clone();
        }
        self.timeout_ms = other.timeout_ms;
    }

    fn apply_env_map(&mut self, map: &HashMap<String, String>) {
        if let Some(val) = map.get("CMG_MODEL") {
            if !val.is_empty() {
                self.model = val.clone();
            }
        }
        if let Some(val) = map.get("CMG_API_URL") {
            if !val.is_empty() {
                self.api_url = val.clone();
            }
        }
        if let Some(val) = map.get("CMG_TIMEOUT_MS") {
            self.timeout_ms = val.trim().parse().unwrap_or(default_timeout_ms());
        }
    }
}

/// Global config file path, overridable via CMG_CONFIG_HOME.
pub fn global_config_path() -> Option<PathBuf> {
    config_home().map(|d| d.join("config.toml"))
}

pub(crate) fn config_home() -> Option<PathBuf> {
    if let Some(override_dir) = std::env::var_os("CMG_CONFIG_HOME") {
        let override_path = PathBuf::from(override_dir);
        if !override_path.as_os_str().is_empty() {
            return Some(override_path.join("cmg"));
        }
    }
    dirs::config_dir().map(|d| d.join("cmg"))
}

fn read_dotenv(path: &Path) -> HashMap<String, String> {
    let mut map = HashMap::new();
    if let Ok(iter) = dotenvy::from_path_iter(path) {
        for (key, val) in iter.flatten() {
            map.insert(key, val);
        }
    }
    map
}
