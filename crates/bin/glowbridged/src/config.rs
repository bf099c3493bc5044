//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `glowbridge.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use glowbridge_adapter_cloud_reqwest::CloudConfig;
use glowbridge_app::services::sync_service::SyncSettings;
use glowbridge_domain::descriptor::DescriptorProfile;
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Device cloud client settings.
    pub cloud: CloudConfig,
    /// Discovery listing settings.
    pub sync: SyncConfig,
    /// Voice platform settings.
    pub platform: PlatformConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Discovery listing configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Requested page size for device and space listings.
    pub page_size: usize,
    /// Pages followed per listing before giving up.
    pub max_pages: usize,
    /// Cloud device types exposed as lights.
    pub device_types: Vec<String>,
}

/// Voice platform configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    /// Manufacturer stamped on device descriptors.
    pub manufacturer: String,
    /// Whether descriptors advertise state reporting.
    pub will_report_state: bool,
    /// Report-state endpoint; pushes are disabled when unset.
    pub report_state_url: Option<String>,
    /// Bearer token for the report-state endpoint.
    pub report_state_token: Option<String>,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `glowbridge.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("glowbridge.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("GLOWBRIDGE_HOST") {
            self.server.host = val;
        }
        if let Some(port) = var("GLOWBRIDGE_PORT").and_then(|val| val.parse().ok()) {
            self.server.port = port;
        }
        if let Some(val) = var("GLOWBRIDGE_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Some(val) = var("GLOWBRIDGE_API_URL") {
            self.cloud.base_url = val;
        }
        if let Some(page_size) = var("GLOWBRIDGE_PAGE_SIZE").and_then(|val| val.parse().ok()) {
            self.sync.page_size = page_size;
        }
        if let Some(val) = var("GLOWBRIDGE_REPORT_STATE_URL") {
            self.platform.report_state_url = Some(val);
        }
        if let Some(val) = var("GLOWBRIDGE_REPORT_STATE_TOKEN") {
            self.platform.report_state_token = Some(val);
        }
        if let Some(val) = var("GLOWBRIDGE_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.cloud.base_url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "cloud base_url must not be empty".to_string(),
            ));
        }
        if self.sync.page_size == 0 {
            return Err(ConfigError::Validation(
                "sync page_size must be non-zero".to_string(),
            ));
        }
        if self.sync.max_pages == 0 {
            return Err(ConfigError::Validation(
                "sync max_pages must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Discovery settings handed to the sync service.
    #[must_use]
    pub fn sync_settings(&self) -> SyncSettings {
        SyncSettings {
            device_types: self.sync.device_types.clone(),
            page_size: self.sync.page_size,
            max_pages: self.sync.max_pages,
            profile: DescriptorProfile {
                manufacturer: self.platform.manufacturer.clone(),
                will_report_state: self.platform.will_report_state,
            },
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        let settings = SyncSettings::default();
        Self {
            page_size: settings.page_size,
            max_pages: settings.max_pages,
            device_types: settings.device_types,
        }
    }
}

impl Default for PlatformConfig {
    fn default() -> Self {
        let profile = DescriptorProfile::default();
        Self {
            manufacturer: profile.manufacturer,
            will_report_state: profile.will_report_state,
            report_state_url: None,
            report_state_token: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "glowbridged=info,glowbridge=info,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
