//! State publisher port — pushes state snapshots to the voice platform.

use std::future::Future;

use glowbridge_domain::envelope::ReportStateRequest;
use glowbridge_domain::error::GlowBridgeError;

/// Delivers a report-state push to the platform.
pub trait StatePublisher {
    fn publish(
        &self,
        request: ReportStateRequest,
    ) -> impl Future<Output = Result<(), GlowBridgeError>> + Send;
}

impl<T: StatePublisher + Send + Sync> StatePublisher for std::sync::Arc<T> {
    fn publish(
        &self,
        request: ReportStateRequest,
    ) -> impl Future<Output = Result<(), GlowBridgeError>> + Send {
        (**self).publish(request)
    }
}

/// `None` means pushing is not configured: requests are dropped after a log line.
impl<T: StatePublisher + Sync> StatePublisher for Option<T> {
    async fn publish(&self, request: ReportStateRequest) -> Result<(), GlowBridgeError> {
        match self {
            Some(publisher) => publisher.publish(request).await,
            None => {
                tracing::debug!(
                    request_id = %request.request_id,
                    "report state push disabled, dropping request"
                );
                Ok(())
            }
        }
    }
}
