//! `POST /fulfillment/gateway` — API-gateway style invocation.
//!
//! The gateway passes the platform request under `body-json` and the HTTP
//! headers under `params.header`, and expects the answer wrapped as
//! `{statusCode, headers, body}` with the body serialized as a string.

use std::collections::HashMap;

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use glowbridge_app::ports::{CloudApi, StatePublisher};
use glowbridge_domain::envelope::TransportResponse;
use glowbridge_domain::error::ValidationError;
use glowbridge_domain::id::BearerToken;
use glowbridge_domain::intent::FulfillmentRequest;

use crate::error::ApiError;
use crate::state::AppState;

/// Inbound gateway event.
#[derive(Debug, Deserialize)]
pub struct GatewayEvent {
    #[serde(rename = "body-json")]
    pub body: FulfillmentRequest,
    #[serde(default)]
    pub params: GatewayParams,
}

#[derive(Debug, Default, Deserialize)]
pub struct GatewayParams {
    #[serde(default)]
    pub header: HashMap<String, String>,
}

impl GatewayParams {
    /// `Authorization` header value; header names are matched case-insensitively.
    #[must_use]
    pub fn authorization(&self) -> Option<&str> {
        self.header
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case("authorization"))
            .map(|(_, value)| value.as_str())
    }
}

/// Possible responses from the gateway endpoint.
pub enum GatewayReply {
    Ok(Json<TransportResponse>),
}

impl IntoResponse for GatewayReply {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `POST /fulfillment/gateway`
pub async fn handle<C, P>(
    State(state): State<AppState<C, P>>,
    Json(event): Json<GatewayEvent>,
) -> Result<GatewayReply, ApiError>
where
    C: CloudApi + Send + Sync + 'static,
    P: StatePublisher + Send + Sync + 'static,
{
    let token = event
        .params
        .authorization()
        .and_then(BearerToken::from_authorization)
        .ok_or(ValidationError::MissingToken)?;
    let response = state.fulfillment.handle(&token, event.body).await?;
    let wrapped = TransportResponse::ok(&response).map_err(ApiError::Encode)?;
    Ok(GatewayReply::Ok(Json(wrapped)))
}
