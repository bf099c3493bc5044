//! Fulfillment service — routes an inbound intent to its use-case and
//! assembles the response envelope.

use std::sync::Arc;

use glowbridge_domain::descriptor::DeviceDescriptor;
use glowbridge_domain::envelope::{FulfillmentResponse, ReportStateRequest, ResponseEnvelope};
use glowbridge_domain::error::GlowBridgeError;
use glowbridge_domain::id::{AgentUserId, BearerToken, RequestId};
use glowbridge_domain::intent::{
    CommandGroup, FulfillmentRequest, IntentRequest, ReportStatePayload,
};
use glowbridge_domain::origin::Target;

use super::execute_service::ExecuteService;
use super::query_service::QueryService;
use super::report_state_service::ReportStateService;
use super::sync_service::{SyncService, SyncSettings};
use crate::ports::{CloudApi, StatePublisher};

/// Entry point for one fulfillment invocation.
///
/// Holds no per-request state: every accumulator lives inside the call that
/// uses it, so one instance can serve concurrent requests.
pub struct FulfillmentService<C, P> {
    cloud: Arc<C>,
    sync: SyncService<Arc<C>>,
    query: QueryService<Arc<C>>,
    execute: ExecuteService<Arc<C>>,
    report_state: ReportStateService<P>,
}

impl<C, P> FulfillmentService<C, P>
where
    C: CloudApi + Send + Sync,
    P: StatePublisher + Send + Sync + 'static,
{
    pub fn new(cloud: C, publisher: P, settings: SyncSettings) -> Self {
        let cloud = Arc::new(cloud);
        Self {
            sync: SyncService::new(Arc::clone(&cloud), settings),
            query: QueryService::new(Arc::clone(&cloud)),
            execute: ExecuteService::new(Arc::clone(&cloud)),
            report_state: ReportStateService::new(publisher),
            cloud,
        }
    }

    /// Handle one platform request.
    ///
    /// # Errors
    ///
    /// Returns [`GlowBridgeError::UnknownIntent`] or
    /// [`GlowBridgeError::Validation`] for requests that cannot be routed, and
    /// propagates downstream failures of SYNC, QUERY and REPORT_STATE.
    #[tracing::instrument(skip_all, fields(request_id = %request.request_id))]
    pub async fn handle(
        &self,
        token: &BearerToken,
        request: FulfillmentRequest,
    ) -> Result<FulfillmentResponse, GlowBridgeError> {
        let intent_request = request.intent_request().inspect_err(|err| {
            if let GlowBridgeError::UnknownIntent(name) = err {
                tracing::warn!(intent = %name, "unknown intent");
            }
        })?;
        tracing::info!(intent = %intent_request.intent(), "handling intent");

        let request_id = request.request_id;
        let envelope = match intent_request {
            IntentRequest::Sync => self.sync(token, request_id).await?,
            IntentRequest::Query(payload) => self.query(token, request_id, &payload.devices).await?,
            IntentRequest::Execute(payload) => {
                self.execute(token, request_id, &payload.commands).await
            }
            IntentRequest::ReportState(payload) => {
                self.report_state(token, request_id, payload).await?
            }
            IntentRequest::Disconnect => return Ok(FulfillmentResponse::empty()),
        };
        Ok(envelope.into())
    }

    /// SYNC: every describable device and space.
    ///
    /// # Errors
    ///
    /// Fails when either listing fails.
    pub async fn sync(
        &self,
        token: &BearerToken,
        request_id: RequestId,
    ) -> Result<ResponseEnvelope, GlowBridgeError> {
        let agent_user_id = self.agent_user_id(token).await;
        let devices = self.sync.discover(token).await?;
        Ok(ResponseEnvelope::sync(request_id, agent_user_id, devices))
    }

    /// QUERY: state of each requested target.
    ///
    /// # Errors
    ///
    /// Fails when any target cannot be fetched.
    pub async fn query(
        &self,
        token: &BearerToken,
        request_id: RequestId,
        targets: &[Target],
    ) -> Result<ResponseEnvelope, GlowBridgeError> {
        let states = self.query.query(token, targets).await?;
        Ok(ResponseEnvelope::states(request_id, None, states))
    }

    /// EXECUTE: command results of every group.
    pub async fn execute(
        &self,
        token: &BearerToken,
        request_id: RequestId,
        groups: &[CommandGroup],
    ) -> ResponseEnvelope {
        let commands = self.execute.execute(token, groups).await;
        ResponseEnvelope::execute(request_id, None, commands)
    }

    /// REPORT_STATE: aggregate states like QUERY, push them in the background,
    /// and answer with the same states.
    ///
    /// Without an explicit target list every synced target is reported. The
    /// push needs an agent user id; without one it is skipped.
    ///
    /// # Errors
    ///
    /// Fails when discovery or any state fetch fails. Push failures never
    /// surface here.
    pub async fn report_state(
        &self,
        token: &BearerToken,
        request_id: RequestId,
        payload: ReportStatePayload,
    ) -> Result<ResponseEnvelope, GlowBridgeError> {
        let targets = match payload.devices {
            Some(targets) => targets,
            None => self
                .sync
                .discover(token)
                .await?
                .iter()
                .map(DeviceDescriptor::target)
                .collect(),
        };
        let states = self.query.query(token, &targets).await?;
        let agent_user_id = self.agent_user_id(token).await;

        match &agent_user_id {
            Some(agent_user_id) => {
                self.report_state.dispatch(ReportStateRequest::new(
                    request_id.clone(),
                    agent_user_id.clone(),
                    states.clone(),
                ));
            }
            None => tracing::warn!("no agent user id, skipping report state push"),
        }

        Ok(ResponseEnvelope::states(request_id, agent_user_id, states))
    }

    /// Resolve the platform user through `GET /me`; failures only drop the field.
    async fn agent_user_id(&self, token: &BearerToken) -> Option<AgentUserId> {
        match self.cloud.get_me(token).await {
            Ok(user) => Some(user.id),
            Err(err) => {
                tracing::warn!(error = %err, "failed to resolve agent user id");
                None
            }
        }
    }
}
