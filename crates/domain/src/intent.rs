//! Inbound fulfillment requests and their per-intent payloads.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::command::ExecutionParams;
use crate::error::{GlowBridgeError, ValidationError};
use crate::id::RequestId;
use crate::origin::Target;

/// Intent kinds the platform may send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    Sync,
    Query,
    Execute,
    Disconnect,
    ReportState,
}

impl Intent {
    /// Wire name, e.g. `action.devices.SYNC`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sync => "action.devices.SYNC",
            Self::Query => "action.devices.QUERY",
            Self::Execute => "action.devices.EXECUTE",
            Self::Disconnect => "action.devices.DISCONNECT",
            Self::ReportState => "action.devices.REPORT_STATE",
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Intent {
    type Err = GlowBridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "action.devices.SYNC" => Ok(Self::Sync),
            "action.devices.QUERY" => Ok(Self::Query),
            "action.devices.EXECUTE" => Ok(Self::Execute),
            "action.devices.DISCONNECT" => Ok(Self::Disconnect),
            "action.devices.REPORT_STATE" => Ok(Self::ReportState),
            other => Err(GlowBridgeError::UnknownIntent(other.to_string())),
        }
    }
}

/// Raw request body as posted by the platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FulfillmentRequest {
    pub request_id: RequestId,
    #[serde(default)]
    pub inputs: Vec<RequestInput>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestInput {
    pub intent: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
}

/// `QUERY` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryPayload {
    pub devices: Vec<Target>,
}

/// `EXECUTE` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutePayload {
    pub commands: Vec<CommandGroup>,
}

/// A set of targets and the executions to apply to each of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandGroup {
    pub devices: Vec<Target>,
    pub execution: Vec<Execution>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Execution {
    /// Platform command name, e.g. `action.devices.commands.OnOff`.
    pub command: String,
    #[serde(default)]
    pub params: ExecutionParams,
}

/// `REPORT_STATE` payload. Without `devices`, every synced target is reported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportStatePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub devices: Option<Vec<Target>>,
}

/// A request narrowed to the intent it carries, with its payload parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentRequest {
    Sync,
    Query(QueryPayload),
    Execute(ExecutePayload),
    Disconnect,
    ReportState(ReportStatePayload),
}

impl IntentRequest {
    #[must_use]
    pub fn intent(&self) -> Intent {
        match self {
            Self::Sync => Intent::Sync,
            Self::Query(_) => Intent::Query,
            Self::Execute(_) => Intent::Execute,
            Self::Disconnect => Intent::Disconnect,
            Self::ReportState(_) => Intent::ReportState,
        }
    }
}

impl FulfillmentRequest {
    /// Parse the first input into a typed [`IntentRequest`].
    ///
    /// # Errors
    ///
    /// Returns [`GlowBridgeError::UnknownIntent`] for intents this adapter does
    /// not serve, and [`GlowBridgeError::Validation`] when inputs are missing
    /// or the payload does not match the intent.
    pub fn intent_request(&self) -> Result<IntentRequest, GlowBridgeError> {
        let input = self.inputs.first().ok_or(ValidationError::MissingInputs)?;
        let intent: Intent = input.intent.parse()?;
        let request = match intent {
            Intent::Sync => IntentRequest::Sync,
            Intent::Disconnect => IntentRequest::Disconnect,
            Intent::Query => IntentRequest::Query(required_payload(intent, input)?),
            Intent::Execute => IntentRequest::Execute(required_payload(intent, input)?),
            Intent::ReportState => match &input.payload {
                Some(payload) => IntentRequest::ReportState(parse_payload(intent, payload)?),
                None => IntentRequest::ReportState(ReportStatePayload::default()),
            },
        };
        Ok(request)
    }
}

fn required_payload<T>(intent: Intent, input: &RequestInput) -> Result<T, GlowBridgeError>
where
    T: serde::de::DeserializeOwned,
{
    let payload = input
        .payload
        .as_ref()
        .ok_or(ValidationError::MissingPayload {
            intent: intent.as_str(),
        })?;
    parse_payload(intent, payload)
}

fn parse_payload<T>(intent: Intent, payload: &serde_json::Value) -> Result<T, GlowBridgeError>
where
    T: serde::de::DeserializeOwned,
{
    T::deserialize(payload).map_err(|source| {
        ValidationError::MalformedPayload {
            intent: intent.as_str(),
            source,
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(json: serde_json::Value) -> FulfillmentRequest {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn should_parse_sync_request() {
        let req = request(serde_json::json!({
            "requestId": "000000000",
            "inputs": [{"intent": "action.devices.SYNC"}]
        }));
        assert_eq!(req.request_id.as_str(), "000000000");
        assert_eq!(req.intent_request().unwrap(), IntentRequest::Sync);
    }

    #[test]
    fn should_parse_query_targets_in_order() {
        let req = request(serde_json::json!({
            "requestId": "999999999",
            "inputs": [{
                "intent": "action.devices.QUERY",
                "payload": {"devices": [
                    {"id": "123456789", "customData": {"online": true, "type": "device"}},
                    {"id": "192837465", "customData": {"type": "space"}}
                ]}
            }]
        }));
        let IntentRequest::Query(payload) = req.intent_request().unwrap() else {
            panic!("expected a query");
        };
        assert_eq!(
            payload.devices,
            vec![Target::device("123456789"), Target::space("192837465")]
        );
    }

    #[test]
    fn should_parse_execute_groups() {
        let req = request(serde_json::json!({
            "requestId": "555555555",
            "inputs": [{
                "intent": "action.devices.EXECUTE",
                "payload": {"commands": [{
                    "devices": [{"id": "987654321", "customData": {"type": "device"}}],
                    "execution": [{
                        "command": "action.devices.commands.OnOff",
                        "params": {"on": false}
                    }]
                }]}
            }]
        }));
        let IntentRequest::Execute(payload) = req.intent_request().unwrap() else {
            panic!("expected an execute");
        };
        assert_eq!(payload.commands.len(), 1);
        assert_eq!(payload.commands[0].execution[0].params.on, Some(false));
    }

    #[test]
    fn should_accept_report_state_without_payload() {
        let req = request(serde_json::json!({
            "requestId": "1",
            "inputs": [{"intent": "action.devices.REPORT_STATE"}]
        }));
        assert_eq!(
            req.intent_request().unwrap(),
            IntentRequest::ReportState(ReportStatePayload::default())
        );
    }

    #[test]
    fn should_reject_unknown_intent() {
        let req = request(serde_json::json!({
            "requestId": "1",
            "inputs": [{"intent": "actions.devices.SYNC"}]
        }));
        assert!(matches!(
            req.intent_request(),
            Err(GlowBridgeError::UnknownIntent(name)) if name == "actions.devices.SYNC"
        ));
    }

    #[test]
    fn should_reject_request_without_inputs() {
        let req = request(serde_json::json!({"requestId": "1"}));
        assert!(matches!(
            req.intent_request(),
            Err(GlowBridgeError::Validation(ValidationError::MissingInputs))
        ));
    }

    #[test]
    fn should_reject_query_without_payload() {
        let req = request(serde_json::json!({
            "requestId": "1",
            "inputs": [{"intent": "action.devices.QUERY"}]
        }));
        assert!(matches!(
            req.intent_request(),
            Err(GlowBridgeError::Validation(ValidationError::MissingPayload { .. }))
        ));
    }

    #[test]
    fn should_reject_malformed_execute_payload() {
        let req = request(serde_json::json!({
            "requestId": "1",
            "inputs": [{"intent": "action.devices.EXECUTE", "payload": {"commands": "nope"}}]
        }));
        assert!(matches!(
            req.intent_request(),
            Err(GlowBridgeError::Validation(ValidationError::MalformedPayload { .. }))
        ));
    }

    #[test]
    fn should_roundtrip_intent_names() {
        for intent in [
            Intent::Sync,
            Intent::Query,
            Intent::Execute,
            Intent::Disconnect,
            Intent::ReportState,
        ] {
            assert_eq!(intent.as_str().parse::<Intent>().unwrap(), intent);
        }
    }
}
