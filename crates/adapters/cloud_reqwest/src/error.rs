//! Cloud adapter error types.

use glowbridge_domain::error::GlowBridgeError;

/// Errors raised while talking HTTP to the device cloud or the platform.
#[derive(Debug, thiserror::Error)]
pub enum CloudError {
    /// Connection, TLS, timeout or body-read failure.
    #[error("HTTP transport error")]
    Http(#[from] reqwest::Error),

    /// The remote answered with a non-2xx status.
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    /// The body was not the JSON shape we expected.
    #[error("failed to decode response body")]
    Decode(#[source] serde_json::Error),

    /// A configured base URL or endpoint is not an absolute http(s) URL.
    #[error("invalid URL {0:?}")]
    InvalidUrl(String),
}

impl CloudError {
    /// Convert into a [`GlowBridgeError::Downstream`] for propagation across
    /// port boundaries.
    pub fn into_domain(self) -> GlowBridgeError {
        GlowBridgeError::downstream(self)
    }
}

impl From<CloudError> for GlowBridgeError {
    fn from(err: CloudError) -> Self {
        err.into_domain()
    }
}
