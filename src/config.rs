//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::branding::APP_DATA_DIR;

/// Default endpoint of the transactional email API.
pub const DEFAULT_RELAY_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind (e.g., "127.0.0.1")
    pub host: String,
    /// TCP port
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

/// Email relay configuration.
///
/// The credentials are the public identifiers of the email service account;
/// when any of them is missing, form submissions fail with a relay error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Send endpoint URL
    pub endpoint: String,
    /// Email service identifier
    pub service_id: Option<String>,
    /// Template identifier
    pub template_id: Option<String>,
    /// Account public key (sent as `user_id`)
    pub public_key: Option<String>,
    /// Connect and read timeout in seconds
    pub timeout_secs: u64,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_RELAY_ENDPOINT.to_string(),
            service_id: None,
            template_id: None,
            public_key: None,
            timeout_secs: 10,
        }
    }
}

impl RelayConfig {
    /// True if every credential is present and non-empty.
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        [&self.service_id, &self.template_id, &self.public_key]
            .iter()
            .all(|value| value.as_deref().is_some_and(|v| !v.trim().is_empty()))
    }
}

/// Business details rendered on the pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Business name
    pub business_name: String,
    /// Phone number as displayed (e.g., "+1 (505) 339-0021")
    pub phone: String,
    /// Website URL
    pub website: String,
    /// City and state
    pub location: String,
    /// Working days (e.g., "Monday - Friday")
    pub working_days: String,
    /// Working hours (e.g., "8:00 AM - 4:00 PM")
    pub working_hours: String,
    /// Years of experience shown on the landing page counter
    pub years_of_experience: u32,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            business_name: "Gomez Quality Painting".to_string(),
            phone: "+1 (505) 339-0021".to_string(),
            website: "https://www.gomez-qualitypainting.com".to_string(),
            location: "Albuquerque, New Mexico".to_string(),
            working_days: "Monday - Friday".to_string(),
            working_hours: "8:00 AM - 4:00 PM".to_string(),
            years_of_experience: 28,
        }
    }
}

impl SiteConfig {
    /// `tel:` link for the phone number (digits and a leading `+` only).
    #[must_use]
    pub fn phone_href(&self) -> String {
        let digits: String = self
            .phone
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '+')
            .collect();
        format!("tel:{digits}")
    }

    /// Website without the scheme, for display.
    #[must_use]
    pub fn website_label(&self) -> &str {
        self.website
            .trim_start_matches("https://")
            .trim_start_matches("http://")
            .trim_end_matches('/')
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/HousePaint/config.toml`
/// - macOS: `~/Library/Application Support/HousePaint/config.toml`
/// - Windows: `%APPDATA%\HousePaint\config.toml`
///
/// # Validation
///
/// - server port must be non-zero
/// - relay endpoint must be an http(s) URL
/// - relay timeout must be positive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// HTTP listener
    #[serde(default)]
    pub server: ServerConfig,
    /// Email relay
    #[serde(default)]
    pub relay: RelayConfig,
    /// Business details
    #[serde(default)]
    pub site: SiteConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the platform-specific config directory path.
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(APP_DATA_DIR);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the default config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Loads configuration from a specific file.
    ///
    /// A missing file yields the defaults; a present but invalid file is an error.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let config: Self = toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        config
            .validate()
            .context(format!("Invalid config file: {}", config_path.display()))?;
        Ok(config)
    }

    /// Saves configuration to the default config file.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Saves configuration to a specific file using atomic write.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(config_dir) = config_path.parent() {
            fs::create_dir_all(config_dir).context(format!(
                "Failed to create config directory: {}",
                config_dir.display()
            ))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        let temp_path = config_path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Server port must be non-zero");
        }

        let endpoint = self.relay.endpoint.trim();
        if !(endpoint.starts_with("https://") || endpoint.starts_with("http://")) {
            anyhow::bail!("Relay endpoint must be an http(s) URL: {endpoint}");
        }

        if self.relay.timeout_secs == 0 {
            anyhow::bail!("Relay timeout must be at least one second");
        }

        Ok(())
    }
}
