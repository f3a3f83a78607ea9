//! Rythm configuration
//!
//! Loaded from TOML, then overridden from the environment. The provider API
//! key only ever comes from the environment and is never serialized.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const CONFIG_FILE: &str = "config.toml";
const APP_DIR: &str = "rythm";

/// Upstream completion provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewaySettings {
    /// OpenAI-compatible chat completions URL. No built-in default.
    #[serde(default)]
    pub endpoint: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,

    /// Upstream request timeout (seconds)
    #[serde(default = "default_gateway_timeout")]
    pub timeout_secs: u64,

    #[serde(skip)]
    pub api_key: Option<String>,
}

fn default_model() -> String {
    "llama-v1".to_string()
}

fn default_gateway_timeout() -> u64 {
    12
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            endpoint: None,
            model: default_model(),
            timeout_secs: default_gateway_timeout(),
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Body of `GET /api/ping`
    #[serde(default = "default_ping_message")]
    pub ping_message: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_ping_message() -> String {
    "ping".to_string()
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            ping_message: default_ping_message(),
        }
    }
}

impl ServerSettings {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageSettings {
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

impl StorageSettings {
    /// Configured directory, else `<data_dir>/rythm`, else `./.rythm`
    pub fn resolved_data_dir(&self) -> PathBuf {
        if let Some(dir) = &self.data_dir {
            return dir.clone();
        }
        dirs::data_dir()
            .map(|d| d.join(APP_DIR))
            .unwrap_or_else(|| PathBuf::from(".rythm"))
    }
}

/// How rythmctl reaches rythmd
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientSettings {
    #[serde(default = "default_daemon_url")]
    pub daemon_url: String,

    #[serde(default = "default_client_timeout")]
    pub timeout_secs: u64,
}

fn default_daemon_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

// Above the daemon's upstream timeout so its 500 arrives first
fn default_client_timeout() -> u64 {
    15
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            daemon_url: default_daemon_url(),
            timeout_secs: default_client_timeout(),
        }
    }
}

impl ClientSettings {
    pub fn gateway_url(&self) -> String {
        format!("{}/api/llama", self.daemon_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RythmConfig {
    #[serde(default)]
    pub gateway: GatewaySettings,

    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub client: ClientSettings,
}

impl RythmConfig {
    /// Load from `$RYTHM_CONFIG` or the user config dir, then apply env
    /// overrides. A missing file means defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var_os("RYTHM_CONFIG")
            .map(PathBuf::from)
            .or_else(default_config_path);

        let mut config = match path {
            Some(path) if path.exists() => Self::from_path(&path)?,
            _ => Self::default(),
        };
        config.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Apply environment-style overrides. `lookup` is `std::env::var` in
    /// production and a map in tests.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        let get = |names: &[&str]| {
            names
                .iter()
                .find_map(|name| lookup(*name))
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(url) = get(&["RYTHM_PROVIDER_URL", "LLAMA_API_URL"]) {
            self.gateway.endpoint = Some(url);
        }
        if let Some(key) = get(&["RYTHM_API_KEY", "LLAMA_API_KEY"]) {
            self.gateway.api_key = Some(key);
        }
        if let Some(model) = get(&["RYTHM_MODEL"]) {
            self.gateway.model = model;
        }
        if let Some(value) = get(&["RYTHM_TIMEOUT_SECS"]) {
            self.gateway.timeout_secs = parse_env("RYTHM_TIMEOUT_SECS", &value)?;
        }
        if let Some(host) = get(&["HOST"]) {
            self.server.host = host;
        }
        if let Some(value) = get(&["PORT"]) {
            self.server.port = parse_env("PORT", &value)?;
        }
        if let Some(message) = get(&["PING_MESSAGE"]) {
            self.server.ping_message = message;
        }
        if let Some(url) = get(&["RYTHM_DAEMON_URL"]) {
            self.client.daemon_url = url;
        }
        if let Some(dir) = get(&["RYTHM_DATA_DIR"]) {
            self.storage.data_dir = Some(PathBuf::from(dir));
        }
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidEnv {
        name,
        value: value.to_string(),
    })
}

/// `<config_dir>/rythm/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join(CONFIG_FILE))
}
