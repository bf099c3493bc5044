//! `POST /fulfillment` — platform intents as plain JSON over HTTP.

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::response::{IntoResponse, Response};

use glowbridge_app::ports::{CloudApi, StatePublisher};
use glowbridge_domain::envelope::FulfillmentResponse;
use glowbridge_domain::error::ValidationError;
use glowbridge_domain::id::BearerToken;
use glowbridge_domain::intent::FulfillmentRequest;

use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the fulfillment endpoint.
pub enum FulfillmentReply {
    Ok(Json<FulfillmentResponse>),
}

impl IntoResponse for FulfillmentReply {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `POST /fulfillment`
pub async fn handle<C, P>(
    State(state): State<AppState<C, P>>,
    headers: HeaderMap,
    Json(request): Json<FulfillmentRequest>,
) -> Result<FulfillmentReply, ApiError>
where
    C: CloudApi + Send + Sync + 'static,
    P: StatePublisher + Send + Sync + 'static,
{
    let token = bearer_token(&headers)?;
    let response = state.fulfillment.handle(&token, request).await?;
    Ok(FulfillmentReply::Ok(Json(response)))
}

/// Token from the `Authorization: Bearer <token>` header.
pub(crate) fn bearer_token(headers: &HeaderMap) -> Result<BearerToken, ValidationError> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(BearerToken::from_authorization)
        .ok_or(ValidationError::MissingToken)
}
