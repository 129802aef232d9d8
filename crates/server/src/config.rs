//! # Application Configuration
//!
//! This module defines the configuration structure for the `seoforge-server`
//! and the logic for loading it from an optional `config.yml` file plus
//! environment variables. The server runs without any configuration at all:
//! every field has a default, and a missing or placeholder Gemini key simply
//! puts the synthesis pipeline into template mode.

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use regex::Regex;
use serde::Deserialize;
use std::env;
use std::fs;
use tracing::info;

/// The value shipped in sample configs; treated the same as no key at all.
pub const PLACEHOLDER_API_KEY: &str = "your_gemini_api_key_here";

/// A custom error type for configuration issues.
#[derive(Debug)]
pub enum ConfigError {
    /// Indicates an error from the underlying `config` crate.
    General(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::General(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::General(err.to_string())
    }
}

/// The root configuration structure, mapping directly to `config.yml`.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    /// The port for the server to listen on. Loaded from `PORT` env var.
    pub port: u16,
    /// Gemini provider settings.
    pub gemini: GeminiConfig,
    /// Upstream call shaping.
    pub throttle: ThrottleConfig,
    /// Marketplace scraping settings.
    pub scrape: ScrapeConfig,
    /// WhatsApp webhook and outbound messaging settings.
    pub whatsapp: WhatsAppConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 9090,
            gemini: GeminiConfig::default(),
            throttle: ThrottleConfig::default(),
            scrape: ScrapeConfig::default(),
            whatsapp: WhatsAppConfig::default(),
        }
    }
}

/// Settings for the Gemini AI provider.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GeminiConfig {
    /// The API key. The placeholder value selects template mode.
    pub api_key: String,
    /// The full generateContent URL. Derived from `model_name` when unset.
    pub api_url: Option<String>,
    pub model_name: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: PLACEHOLDER_API_KEY.to_string(),
            api_url: None,
            model_name: "gemini-pro".to_string(),
        }
    }
}

impl GeminiConfig {
    /// Whether the configured credentials select template mode.
    pub fn is_placeholder(&self) -> bool {
        self.api_key.is_empty() || self.api_key == PLACEHOLDER_API_KEY
    }

    /// The effective generateContent endpoint.
    pub fn effective_api_url(&self) -> String {
        self.api_url.clone().unwrap_or_else(|| {
            format!(
                "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent",
                self.model_name
            )
        })
    }
}

/// Spacing and retry hints for calls to the AI provider.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ThrottleConfig {
    /// Minimum seconds between consecutive upstream dispatches.
    pub min_request_interval_secs: u64,
    /// Retry hint returned to clients on quota exhaustion.
    pub quota_retry_secs: u64,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            min_request_interval_secs: 35,
            quota_retry_secs: 60,
        }
    }
}

/// Marketplace scraping settings. The URL overrides exist for tests and
/// proxies; production leaves them unset.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct ScrapeConfig {
    pub timeout_ms: Option<u64>,
    pub amazon_url: Option<String>,
    pub flipkart_url: Option<String>,
    pub myntra_url: Option<String>,
    pub meesho_url: Option<String>,
}

/// WhatsApp Business API settings. The webhook routes stay mounted without
/// them, but outbound replies require `access_token` and `phone_number_id`.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct WhatsAppConfig {
    pub verify_token: Option<String>,
    pub access_token: Option<String>,
    pub phone_number_id: Option<String>,
    pub api_url: String,
}

impl Default for WhatsAppConfig {
    fn default() -> Self {
        Self {
            verify_token: None,
            access_token: None,
            phone_number_id: None,
            api_url: "https://graph.facebook.com/v17.0".to_string(),
        }
    }
}

// Helper to read a file, substitute env vars, and return its content.
// Returns Ok(None) if the file does not exist, or an error if it fails to read.
fn read_and_substitute(path: &str) -> Result<Option<String>, ConfigError> {
    if !std::path::Path::new(path).exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::General(format!("Failed to read config file '{path}': {e}")))?;

    let re = Regex::new(r"\$\{(?P<var>[A-Z0-9_]+)\}")
        .map_err(|e| ConfigError::General(e.to_string()))?;
    let expanded_content = re.replace_all(&content, |caps: &regex::Captures| {
        let var_name = &caps["var"];
        env::var(var_name).unwrap_or_else(|_| "".to_string())
    });

    Ok(Some(expanded_content.to_string()))
}

/// Loads the application configuration from a file and environment variables.
///
/// Layering, later sources winning:
/// 1. Built-in defaults.
/// 2. `config.yml` next to the server crate (or the override path), with
///    `${VAR}` placeholders substituted from the environment.
/// 3. Top-level environment variables such as `PORT`.
/// 4. `SEOFORGE_...` variables for nested keys (e.g.
///    `SEOFORGE_GEMINI__API_KEY`).
pub fn get_config(config_path_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    let base_path = env!("CARGO_MANIFEST_DIR");
    let mut builder = ConfigBuilder::builder();

    let config_path = config_path_override
        .map(String::from)
        .unwrap_or_else(|| format!("{base_path}/config.yml"));
    match read_and_substitute(&config_path)? {
        Some(content) => {
            info!("Loading configuration from '{config_path}'.");
            builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
        }
        None => {
            info!("No config file at '{config_path}', using defaults and environment.");
        }
    }

    let settings = builder
        // Top-level keys like PORT.
        .add_source(Environment::default())
        // Prefixed variables for deeper overrides.
        .add_source(
            Environment::with_prefix("SEOFORGE")
                .prefix_separator("_")
                .try_parsing(true)
                .separator("__"),
        )
        .build()?;

    let config: AppConfig = settings.try_deserialize()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_without_config_file() {
        let config = get_config(Some("/nonexistent/config.yml")).unwrap();
        assert_eq!(config.port, 9090);
        assert!(config.gemini.is_placeholder());
        assert_eq!(config.throttle.min_request_interval_secs, 35);
        assert_eq!(config.whatsapp.api_url, "https://graph.facebook.com/v17.0");
    }

    #[test]
    fn test_config_file_with_env_substitution() {
        env::set_var("SEOFORGE_TEST_GEMINI_KEY", "test-key-123");
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(
            file,
            "port: 3000\ngemini:\n  api_key: \"${{SEOFORGE_TEST_GEMINI_KEY}}\"\n  model_name: \"gemini-1.5-flash\"\nthrottle:\n  quota_retry_secs: 90"
        )
        .unwrap();

        let config = get_config(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.gemini.api_key, "test-key-123");
        assert!(!config.gemini.is_placeholder());
        assert_eq!(config.throttle.quota_retry_secs, 90);
        // Untouched sections keep their defaults.
        assert_eq!(config.throttle.min_request_interval_secs, 35);
        env::remove_var("SEOFORGE_TEST_GEMINI_KEY");
    }

    #[test]
    fn test_effective_api_url_derived_from_model() {
        let gemini = GeminiConfig {
            model_name: "gemini-1.5-flash".to_string(),
            ..GeminiConfig::default()
        };
        assert_eq!(
            gemini.effective_api_url(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent"
        );

        let explicit = GeminiConfig {
            api_url: Some("http://localhost:8080/generate".to_string()),
            ..GeminiConfig::default()
        };
        assert_eq!(explicit.effective_api_url(), "http://localhost:8080/generate");
    }
}
