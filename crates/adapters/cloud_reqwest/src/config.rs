//! Device cloud client configuration.

use std::time::Duration;

use serde::Deserialize;

/// Configuration for the device cloud client.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CloudConfig {
    /// Base URL of the cloud REST API, scheme included.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl CloudConfig {
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.gooee.io".to_string(),
            request_timeout_secs: 10,
        }
    }
}
