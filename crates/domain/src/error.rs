//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`GlowBridgeError`] at the port boundary.

/// Top-level error for every fulfillment operation.
#[derive(Debug, thiserror::Error)]
pub enum GlowBridgeError {
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// The platform sent an intent this adapter does not handle.
    #[error("unknown intent {0:?}")]
    UnknownIntent(String),

    /// A call against the device cloud failed (transport, status or decoding).
    #[error("downstream error")]
    Downstream(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A paginated listing kept announcing a next page past the allowed limit.
    #[error("pagination stopped after {limit} pages")]
    PaginationLimit { limit: usize },
}

impl GlowBridgeError {
    /// Wrap any error raised while talking to the device cloud.
    pub fn downstream<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Downstream(Box::new(err))
    }
}

/// Malformed inbound requests.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("request carries no inputs")]
    MissingInputs,

    #[error("{intent} request carries no payload")]
    MissingPayload { intent: &'static str },

    #[error("{intent} payload is malformed")]
    MalformedPayload {
        intent: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("missing bearer token")]
    MissingToken,
}
