//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use glowbridge_domain::error::{GlowBridgeError, ValidationError};

/// JSON error body returned by the fulfillment endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps handler failures to an HTTP response with the appropriate status code.
#[derive(Debug)]
pub enum ApiError {
    Domain(GlowBridgeError),
    /// The response could not be re-encoded for the gateway wrapper.
    Encode(serde_json::Error),
}

impl From<GlowBridgeError> for ApiError {
    fn from(err: GlowBridgeError) -> Self {
        Self::Domain(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::Domain(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Domain(GlowBridgeError::UnknownIntent(_)) => {
                return StatusCode::BAD_REQUEST.into_response();
            }
            Self::Domain(GlowBridgeError::Validation(ValidationError::MissingToken)) => {
                (StatusCode::UNAUTHORIZED, ValidationError::MissingToken.to_string())
            }
            Self::Domain(GlowBridgeError::Validation(err)) => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            Self::Domain(GlowBridgeError::Downstream(source)) => {
                tracing::error!(error = %source, "cloud API call failed");
                (StatusCode::BAD_GATEWAY, "cloud API call failed".to_string())
            }
            Self::Domain(GlowBridgeError::PaginationLimit { limit }) => {
                tracing::error!(limit, "cloud listing did not terminate");
                (
                    StatusCode::BAD_GATEWAY,
                    format!("pagination stopped after {limit} pages"),
                )
            }
            Self::Encode(err) => {
                tracing::error!(error = %err, "failed to encode response");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
