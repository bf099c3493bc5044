//! Shared application state for axum handlers.

use std::sync::Arc;

use glowbridge_app::services::fulfillment_service::FulfillmentService;

/// Application state shared across all axum handlers.
///
/// `Clone` is implemented manually so the cloud client and publisher types do
/// not need to be `Clone`; only the `Arc` is cloned.
pub struct AppState<C, P> {
    /// Intent router.
    pub fulfillment: Arc<FulfillmentService<C, P>>,
}

impl<C, P> Clone for AppState<C, P> {
    fn clone(&self) -> Self {
        Self {
            fulfillment: Arc::clone(&self.fulfillment),
        }
    }
}

impl<C, P> AppState<C, P> {
    pub fn new(fulfillment: FulfillmentService<C, P>) -> Self {
        Self {
            fulfillment: Arc::new(fulfillment),
        }
    }
}
