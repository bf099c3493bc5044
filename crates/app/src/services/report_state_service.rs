//! Report-state service — pushes state snapshots without blocking the caller.

use std::sync::Arc;

use glowbridge_domain::envelope::ReportStateRequest;
use tokio::task::JoinHandle;

use crate::ports::StatePublisher;

/// Hands report-state pushes to detached tasks.
pub struct ReportStateService<P> {
    publisher: Arc<P>,
}

impl<P> ReportStateService<P>
where
    P: StatePublisher + Send + Sync + 'static,
{
    pub fn new(publisher: P) -> Self {
        Self {
            publisher: Arc::new(publisher),
        }
    }

    /// Spawn the push and return immediately.
    ///
    /// A failed push is logged by the task and never reaches the caller. The
    /// handle is only useful to tests; callers normally drop it.
    ///
    /// Must be called from within a tokio runtime.
    pub fn dispatch(&self, request: ReportStateRequest) -> JoinHandle<()> {
        let publisher = Arc::clone(&self.publisher);
        tokio::spawn(async move {
            let request_id = request.request_id.clone();
            match publisher.publish(request).await {
                Ok(()) => tracing::debug!(%request_id, "state reported"),
                Err(err) => tracing::warn!(%request_id, error = %err, "report state push failed"),
            }
        })
    }
}
