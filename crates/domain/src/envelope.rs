//! Response envelopes — the final shape handed back to the platform.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::command::CommandResult;
use crate::descriptor::DeviceDescriptor;
use crate::id::{AgentUserId, RequestId};
use crate::state::StateMap;

/// `{requestId, payload}` answer for SYNC, QUERY, EXECUTE and REPORT_STATE.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub request_id: RequestId,
    pub payload: ResponsePayload,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_user_id: Option<AgentUserId>,
    #[serde(flatten)]
    pub body: PayloadBody,
}

/// Intent-specific part of the payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PayloadBody {
    Devices { devices: Vec<DeviceDescriptor> },
    States { devices: StateMap },
    Commands { commands: Vec<CommandResult> },
}

impl ResponseEnvelope {
    fn new(request_id: RequestId, agent_user_id: Option<AgentUserId>, body: PayloadBody) -> Self {
        Self {
            request_id,
            payload: ResponsePayload {
                agent_user_id,
                body,
            },
        }
    }

    #[must_use]
    pub fn sync(
        request_id: RequestId,
        agent_user_id: Option<AgentUserId>,
        devices: Vec<DeviceDescriptor>,
    ) -> Self {
        Self::new(request_id, agent_user_id, PayloadBody::Devices { devices })
    }

    /// Envelope for QUERY and REPORT_STATE, which both answer with a state map.
    #[must_use]
    pub fn states(
        request_id: RequestId,
        agent_user_id: Option<AgentUserId>,
        devices: StateMap,
    ) -> Self {
        Self::new(request_id, agent_user_id, PayloadBody::States { devices })
    }

    #[must_use]
    pub fn execute(
        request_id: RequestId,
        agent_user_id: Option<AgentUserId>,
        commands: Vec<CommandResult>,
    ) -> Self {
        Self::new(request_id, agent_user_id, PayloadBody::Commands { commands })
    }
}

/// Serializes as an empty JSON object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EmptyBody {}

/// Whatever a fulfillment invocation answers with.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FulfillmentResponse {
    Envelope(ResponseEnvelope),
    /// DISCONNECT answers `{}`.
    Empty(EmptyBody),
}

impl FulfillmentResponse {
    #[must_use]
    pub fn empty() -> Self {
        Self::Empty(EmptyBody {})
    }

    #[must_use]
    pub fn envelope(&self) -> Option<&ResponseEnvelope> {
        match self {
            Self::Envelope(envelope) => Some(envelope),
            Self::Empty(_) => None,
        }
    }
}

impl From<ResponseEnvelope> for FulfillmentResponse {
    fn from(envelope: ResponseEnvelope) -> Self {
        Self::Envelope(envelope)
    }
}

/// Gateway-style wrapper: the response serialized as a string body under a
/// fixed success status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl TransportResponse {
    pub const SUCCESS_STATUS: u16 = 200;

    /// Wrap a response.
    ///
    /// # Errors
    ///
    /// Returns the serializer error if the response cannot be encoded.
    pub fn ok(response: &FulfillmentResponse) -> Result<Self, serde_json::Error> {
        let body = serde_json::to_string(response)?;
        let headers = BTreeMap::from([(
            "Content-Type".to_string(),
            "application/json".to_string(),
        )]);
        Ok(Self {
            status_code: Self::SUCCESS_STATUS,
            headers,
            body,
        })
    }
}

/// Body pushed to the platform's report-state endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportStateRequest {
    pub request_id: RequestId,
    pub agent_user_id: AgentUserId,
    pub payload: ReportStatePayloadBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportStatePayloadBody {
    pub devices: ReportedStates,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportedStates {
    pub states: StateMap,
}

impl ReportStateRequest {
    #[must_use]
    pub fn new(request_id: RequestId, agent_user_id: AgentUserId, states: StateMap) -> Self {
        Self {
            request_id,
            agent_user_id,
            payload: ReportStatePayloadBody {
                devices: ReportedStates { states },
            },
        }
    }
}
