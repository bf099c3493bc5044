//! Fulfillment endpoint handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod fulfillment;
#[allow(clippy::missing_errors_doc)]
pub mod gateway;

use axum::Router;
use axum::routing::post;

use glowbridge_app::ports::{CloudApi, StatePublisher};

use crate::state::AppState;

/// Build the fulfillment routes.
pub fn routes<C, P>() -> Router<AppState<C, P>>
where
    C: CloudApi + Send + Sync + 'static,
    P: StatePublisher + Send + Sync + 'static,
{
    Router::new()
        .route("/fulfillment", post(fulfillment::handle::<C, P>))
        .route("/fulfillment/gateway", post(gateway::handle::<C, P>))
}
