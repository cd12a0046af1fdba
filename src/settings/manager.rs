use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use crate::museums::cleveland_provider::CLEVELAND_BASE_URL;
use crate::museums::rijks_provider::RIJKS_BASE_URL;
use crate::museums::science_provider::SCIENCE_BASE_URL;
use crate::museums::va_provider::VA_BASE_URL;
use crate::museums::MuseumSource;

/// Main settings structure containing all application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub museums: MuseumSettings,
    #[serde(default)]
    pub proxy: ProxySettings,
}

/// Museum API endpoints and search defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MuseumSettings {
    #[serde(default = "default_cleveland_url")]
    pub cleveland_base_url: String,
    #[serde(default = "default_science_url")]
    pub science_base_url: String,
    #[serde(default = "default_rijks_url")]
    pub rijksmuseum_base_url: String,
    #[serde(default = "default_va_url")]
    pub va_base_url: String,
    /// Rijksmuseum requires a key; `CURATOR_RIJKSMUSEUM_API_KEY` overrides it
    #[serde(default)]
    pub rijksmuseum_api_key: Option<String>,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Sources searched when the caller does not pick any
    #[serde(default = "default_sources")]
    pub default_sources: Vec<MuseumSource>,
}

/// Credential-injecting proxy settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProxySettings {
    pub bind_address: String,
    pub louvre_upstream_url: String,
    pub science_upstream_url: String,
}

fn default_cleveland_url() -> String {
    CLEVELAND_BASE_URL.to_string()
}

fn default_science_url() -> String {
    SCIENCE_BASE_URL.to_string()
}

fn default_rijks_url() -> String {
    RIJKS_BASE_URL.to_string()
}

fn default_va_url() -> String {
    VA_BASE_URL.to_string()
}

fn default_user_agent() -> String {
    "ExhibitionCurationPlatform/1.0".to_string()
}

fn default_sources() -> Vec<MuseumSource> {
    vec![MuseumSource::Cleveland, MuseumSource::ScienceMuseum]
}

impl Default for MuseumSettings {
    fn default() -> Self {
        Self {
            cleveland_base_url: default_cleveland_url(),
            science_base_url: default_science_url(),
            rijksmuseum_base_url: default_rijks_url(),
            va_base_url: default_va_url(),
            rijksmuseum_api_key: None,
            user_agent: default_user_agent(),
            default_sources: default_sources(),
        }
    }
}

impl Default for ProxySettings {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:5001".to_string(),
            louvre_upstream_url: "https://louvre-api-endpoint".to_string(),
            science_upstream_url: "https://science-museum-api-endpoint".to_string(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            museums: MuseumSettings::default(),
            proxy: ProxySettings::default(),
        }
    }
}

/// Errors from loading, validating or saving settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Settings file operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Invalid settings: {0}")]
    Invalid(String),

    #[error("Failed to get home directory")]
    NoHomeDir,
}

/// Manages settings persistence and provides thread-safe access
pub struct SettingsManager {
    settings_path: PathBuf,
    current_settings: Arc<RwLock<Settings>>,
}

impl SettingsManager {
    /// Creates a new SettingsManager backed by `~/.museum-curator/settings.json`
    ///
    /// If the settings file doesn't exist, creates it with default values.
    pub fn new() -> Result<Self, SettingsError> {
        let home_dir = dirs::home_dir().ok_or(SettingsError::NoHomeDir)?;
        let settings_path = home_dir.join(".museum-curator").join("settings.json");

        Self::new_with_path(settings_path)
    }

    /// Creates a new SettingsManager with a custom settings path
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The settings directory cannot be created
    /// - The settings file cannot be read or written
    pub fn new_with_path(settings_path: PathBuf) -> Result<Self, SettingsError> {
        if let Some(parent) = settings_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let settings = if settings_path.exists() {
            Self::load_from_file(&settings_path)?
        } else {
            let defaults = Settings::default();
            Self::save_to_file(&settings_path, &defaults)?;
            defaults
        };

        tracing::info!("Settings: Loaded from {}", settings_path.display());
        Ok(Self {
            settings_path,
            current_settings: Arc::new(RwLock::new(settings)),
        })
    }

    /// Returns a clone of the current settings
    pub fn get(&self) -> Settings {
        self.current_settings
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn path(&self) -> &PathBuf {
        &self.settings_path
    }

    /// Updates settings (validates, persists to disk, then updates in-memory)
    ///
    /// If validation or the disk write fails, in-memory state remains unchanged.
    pub fn update(&self, settings: Settings) -> Result<(), SettingsError> {
        Self::validate(&settings)?;

        Self::save_to_file(&self.settings_path, &settings)?;

        *self
            .current_settings
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = settings;

        Ok(())
    }

    /// Validates settings constraints
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - any base or upstream URL is blank or not http(s)
    /// - default_sources is empty
    /// - bind_address is not a socket address
    pub fn validate(settings: &Settings) -> Result<(), SettingsError> {
        let museums = &settings.museums;
        let urls = [
            ("cleveland_base_url", &museums.cleveland_base_url),
            ("science_base_url", &museums.science_base_url),
            ("rijksmuseum_base_url", &museums.rijksmuseum_base_url),
            ("va_base_url", &museums.va_base_url),
            ("louvre_upstream_url", &settings.proxy.louvre_upstream_url),
            ("science_upstream_url", &settings.proxy.science_upstream_url),
        ];
        for (name, url) in urls {
            let url = url.trim();
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(SettingsError::Invalid(format!(
                    "{} must be an http(s) URL, got '{}'",
                    name, url
                )));
            }
        }

        if museums.default_sources.is_empty() {
            return Err(SettingsError::Invalid(
                "default_sources must name at least one museum".to_string(),
            ));
        }

        if museums.user_agent.trim().is_empty() {
            return Err(SettingsError::Invalid("user_agent cannot be empty".to_string()));
        }

        if settings.proxy.bind_address.parse::<SocketAddr>().is_err() {
            return Err(SettingsError::Invalid(format!(
                "bind_address must be host:port, got '{}'",
                settings.proxy.bind_address
            )));
        }

        Ok(())
    }

    /// Loads settings from disk
    ///
    /// If the file contains invalid JSON, logs an error and returns defaults
    /// to ensure graceful degradation.
    fn load_from_file(path: &PathBuf) -> Result<Settings, SettingsError> {
        let contents = std::fs::read_to_string(path)?;

        match serde_json::from_str(&contents) {
            Ok(settings) => Ok(settings),
            Err(e) => {
                tracing::error!("Settings: Failed to parse settings JSON: {}. Using defaults.", e);
                Ok(Settings::default())
            }
        }
    }

    /// Saves settings to disk atomically (temporary file + rename)
    fn save_to_file(path: &PathBuf, settings: &Settings) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(settings)?;

        let temp_path = path.with_extension("json.tmp");
        std::fs::write(&temp_path, json)?;
        std::fs::rename(&temp_path, path)?;

        Ok(())
    }
}
