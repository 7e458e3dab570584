//! Configuration for Outreach

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// API configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Draft autosave configuration
    #[serde(default)]
    pub draft: DraftConfig,

    /// AI pitch generation configuration
    #[serde(default)]
    pub pitch: PitchConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Hostname
    #[serde(default = "default_hostname")]
    pub hostname: String,

    /// Bind address
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            hostname: default_hostname(),
            bind_address: default_bind_address(),
        }
    }
}

fn default_hostname() -> String {
    "localhost".to_string()
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL (Postgres)
    pub url: String,

    /// Maximum connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Minimum connections
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

/// API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API port
    #[serde(default = "default_api_port")]
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: default_api_port(),
        }
    }
}

fn default_api_port() -> u16 {
    8080
}

/// Draft autosave configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftConfig {
    /// Quiet period before a local snapshot write, in milliseconds.
    /// A newer edit within this window restarts the timer.
    #[serde(default = "default_autosave_debounce_ms")]
    pub autosave_debounce_ms: u64,
}

impl Default for DraftConfig {
    fn default() -> Self {
        Self {
            autosave_debounce_ms: default_autosave_debounce_ms(),
        }
    }
}

fn default_autosave_debounce_ms() -> u64 {
    400
}

/// AI pitch generation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PitchConfig {
    /// Base URL of the external pitch-generation service
    #[serde(default = "default_pitch_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_pitch_timeout_secs")]
    pub timeout_secs: u64,

    /// How many pitch requests may run at once within a batch.
    /// 1 keeps batches strictly sequential and bounds load on the
    /// external endpoint; per-contact error semantics do not change
    /// at higher values.
    #[serde(default = "default_pitch_concurrency")]
    pub concurrency: usize,
}

impl Default for PitchConfig {
    fn default() -> Self {
        Self {
            base_url: default_pitch_base_url(),
            timeout_secs: default_pitch_timeout_secs(),
            concurrency: default_pitch_concurrency(),
        }
    }
}

fn default_pitch_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_pitch_timeout_secs() -> u64 {
    30
}

fn default_pitch_concurrency() -> usize {
    1
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log filter directive, e.g. "info,outreach=debug"
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_log_filter() -> String {
    "info,outreach=debug".to_string()
}

impl Config {
    /// Load configuration from file
    pub fn from_file(path: &std::path::Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| crate::Error::Config(format!("Failed to read config file: {}", e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| crate::Error::Config(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load() -> crate::Result<Self> {
        let paths = [
            std::path::PathBuf::from("./config.toml"),
            std::path::PathBuf::from("/etc/outreach/config.toml"),
        ];

        for path in paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Err(crate::Error::Config(
            "No configuration file found".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let server = ServerConfig::default();
        assert_eq!(server.hostname, "localhost");
        assert_eq!(server.bind_address, "0.0.0.0");

        let pitch = PitchConfig::default();
        assert_eq!(pitch.concurrency, 1);
        assert_eq!(pitch.timeout_secs, 30);

        let draft = DraftConfig::default();
        assert_eq!(draft.autosave_debounce_ms, 400);
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[server]
hostname = "outreach.example.com"

[database]
url = "postgres://localhost/outreach"

[api]
port = 9090

[pitch]
base_url = "https://pitch.example.com"
concurrency = 4
"#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.hostname, "outreach.example.com");
        assert_eq!(config.database.url, "postgres://localhost/outreach");
        assert_eq!(config.api.port, 9090);
        assert_eq!(config.pitch.base_url, "https://pitch.example.com");
        assert_eq!(config.pitch.concurrency, 4);
        assert_eq!(config.draft.autosave_debounce_ms, 400);
    }
}
