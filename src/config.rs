//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the poll data comes from
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// Raw CSV download URL
    #[serde(default = "default_data_url")]
    pub data_url: String,

    /// Human-readable page for the dataset, linked from the dashboard
    #[serde(default = "default_source_page_url")]
    pub source_page_url: String,

    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_data_url() -> String {
    "https://raw.githubusercontent.com/rojwilco/538-data/refs/heads/master/trump-2-poll-issue-questions/trump-poll-issue-questions.csv".to_string()
}

fn default_source_page_url() -> String {
    "https://github.com/fivethirtyeight/data/tree/master/trump-2-poll-issue-questions".to_string()
}

fn default_title() -> String {
    "Trump Action Approval Trends".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            data_url: default_data_url(),
            source_page_url: default_source_page_url(),
            title: default_title(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Dashboard server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Mount point behind a reverse proxy, e.g. "trends" or "/trends/"
    #[serde(default)]
    pub path_prefix: String,

    /// Verbose logging
    #[serde(default)]
    pub debug: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8050
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            path_prefix: String::new(),
            debug: false,
        }
    }
}

impl ServerConfig {
    /// Prefix in router form: "" or "/segment"
    pub fn normalized_prefix(&self) -> String {
        normalize_path_prefix(&self.path_prefix)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("approval-trends").join("config.toml")),
            Some(PathBuf::from("/etc/approval-trends/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup (the environment in production)
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // Unprefixed names used by existing deployments
        if let Some(debug) = lookup("DEBUG") {
            self.server.debug = parse_flag(&debug);
        }
        if let Some(prefix) = lookup("APP_PATH") {
            self.server.path_prefix = prefix;
        }

        if let Some(url) = lookup("TRENDS_DATA_URL") {
            self.source.data_url = url;
        }
        if let Some(host) = lookup("TRENDS_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("TRENDS_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }

        if let Some(level) = lookup("TRENDS_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("TRENDS_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Anything but empty, "0", "false" or "no" turns a flag on
pub fn parse_flag(value: &str) -> bool {
    let value = value.trim().to_lowercase();
    !matches!(value.as_str(), "" | "0" | "false" | "no")
}

/// Normalize a mount point to "" or "/a/b"
pub fn normalize_path_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    format!(
        r#"# Approval Trends Configuration
#
# Environment variables override these settings:
# - DEBUG            (server.debug)
# - APP_PATH         (server.path_prefix)
# - TRENDS_DATA_URL
# - TRENDS_HOST
# - TRENDS_PORT
# - TRENDS_LOG_LEVEL
# - TRENDS_LOG_FORMAT

[source]
# Raw CSV with category, dates, yes, no, net and question columns
data_url = "{data_url}"

# Dataset page linked from the dashboard
source_page_url = "{source_page_url}"

# Page title
title = "{title}"

# Download timeout in seconds
request_timeout_secs = 30

[server]
# Dashboard host
host = "0.0.0.0"

# Dashboard port
port = 8050

# Mount point when served behind a reverse proxy, e.g. "trends"
path_prefix = ""

# Verbose logging
debug = false

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#,
        data_url = default_data_url(),
        source_page_url = default_source_page_url(),
        title = default_title(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 8050);
        assert!(!config.server.debug);
        assert_eq!(config.server.normalized_prefix(), "");
        assert!(config.source.data_url.ends_with(".csv"));
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_generated_config_parses() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.server.port, 8050);
        assert_eq!(config.source.title, "Trump Action Approval Trends");
        assert_eq!(config.source.data_url, default_data_url());
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[server]\nport = 9000\npath_prefix = \"trends/\"\n\n[logging]\nformat = \"json\""
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.normalized_prefix(), "/trends");
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.source.request_timeout_secs, 30);
    }

    #[test]
    fn test_load_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server\nport = ").unwrap();
        assert!(matches!(
            Config::load(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load(Path::new("/nonexistent/approval-trends.toml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("DEBUG", "True"),
            ("APP_PATH", "polls"),
            ("TRENDS_PORT", "8123"),
            ("TRENDS_DATA_URL", "http://localhost/polls.csv"),
            ("TRENDS_LOG_LEVEL", "debug"),
        ]);

        let mut config = Config::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert!(config.server.debug);
        assert_eq!(config.server.normalized_prefix(), "/polls");
        assert_eq!(config.server.port, 8123);
        assert_eq!(config.source.data_url, "http://localhost/polls.csv");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_bad_port_override_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|key| (key == "TRENDS_PORT").then(|| "lots".to_string()));
        assert_eq!(config.server.port, 8050);
    }

    #[test]
    fn test_parse_flag() {
        for on in ["1", "true", "True", "yes", "on"] {
            assert!(parse_flag(on), "{}", on);
        }
        for off in ["", "0", "false", "FALSE", "no", " "] {
            assert!(!parse_flag(off), "{:?}", off);
        }
    }

    #[test]
    fn test_normalize_path_prefix() {
        assert_eq!(normalize_path_prefix(""), "");
        assert_eq!(normalize_path_prefix("/"), "");
        assert_eq!(normalize_path_prefix("trends"), "/trends");
        assert_eq!(normalize_path_prefix("/trends/"), "/trends");
        assert_eq!(normalize_path_prefix("a/b"), "/a/b");
    }
}
