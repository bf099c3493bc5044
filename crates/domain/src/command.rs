//! Commands — translating EXECUTE params into cloud actions and folding
//! per-target outcomes back into platform command results.

use serde::{Deserialize, Serialize};

use crate::cloud::{ActionKind, ActionRequest, ActionTarget, ActionValue};
use crate::id::TargetId;
use crate::origin::{Origin, Target};

/// Transition time (seconds) sent with every cloud action.
pub const TRANSITION_TIME: u32 = 1;

/// Error code attached to results of executions this adapter cannot map.
pub const FUNCTION_NOT_SUPPORTED: &str = "functionNotSupported";

/// Raw `params` object of one EXECUTE execution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brightness: Option<u8>,
}

/// A single action with its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    OnOff(bool),
    Brightness(u8),
}

impl Action {
    /// Pick the action out of an execution's params. `on` takes precedence
    /// when both keys are present.
    #[must_use]
    pub fn from_params(params: &ExecutionParams) -> Option<Self> {
        params
            .on
            .map(Self::OnOff)
            .or_else(|| params.brightness.map(Self::Brightness))
    }

    /// Build the `POST /actions` body for one target.
    #[must_use]
    pub fn request_for(&self, target: &Target) -> ActionRequest {
        let (kind, level) = match *self {
            Self::OnOff(true) => (ActionKind::On, None),
            Self::OnOff(false) => (ActionKind::Off, None),
            Self::Brightness(level) => (ActionKind::Dim, Some(level)),
        };
        let target = match target.origin {
            Origin::Device => ActionTarget::Device(target.id.clone()),
            Origin::Space => ActionTarget::Space(target.id.clone()),
        };
        ActionRequest {
            kind,
            target,
            value: ActionValue {
                transition_time: TRANSITION_TIME,
                level,
            },
        }
    }

    /// States reported back for targets that accepted this action.
    #[must_use]
    pub fn resulting_states(&self) -> CommandStates {
        match *self {
            Self::OnOff(on) => CommandStates {
                on: Some(on),
                online: Some(true),
                brightness: None,
            },
            Self::Brightness(level) => CommandStates {
                on: None,
                online: None,
                brightness: Some(level),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CommandStatus {
    Success,
    Error,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandStates {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub online: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brightness: Option<u8>,
}

/// One entry of the EXECUTE `commands` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandResult {
    pub ids: Vec<TargetId>,
    pub status: CommandStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub states: Option<CommandStates>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl CommandResult {
    /// Result for targets whose execution params could not be mapped to an action.
    #[must_use]
    pub fn not_supported(ids: Vec<TargetId>) -> Self {
        Self {
            ids,
            status: CommandStatus::Error,
            states: None,
            error_code: Some(FUNCTION_NOT_SUPPORTED.to_string()),
        }
    }
}

/// Succeeded / failed target ids collected while one action is dispatched.
///
/// Owned by a single dispatch and consumed by [`into_results`](Self::into_results),
/// so bookkeeping never leaks between actions or requests.
#[derive(Debug, Default)]
pub struct ActionOutcomes {
    succeeded: Vec<TargetId>,
    failed: Vec<TargetId>,
}

impl ActionOutcomes {
    pub fn succeed(&mut self, id: TargetId) {
        self.succeeded.push(id);
    }

    pub fn fail(&mut self, id: TargetId) {
        self.failed.push(id);
    }

    #[must_use]
    pub fn succeeded(&self) -> &[TargetId] {
        &self.succeeded
    }

    #[must_use]
    pub fn failed(&self) -> &[TargetId] {
        &self.failed
    }

    /// A SUCCESS entry when anything succeeded, then an ERROR entry when
    /// anything failed.
    #[must_use]
    pub fn into_results(self, action: &Action) -> Vec<CommandResult> {
        let mut results = Vec::with_capacity(2);
        if !self.succeeded.is_empty() {
            results.push(CommandResult {
                ids: self.succeeded,
                status: CommandStatus::Success,
                states: Some(action.resulting_states()),
                error_code: None,
            });
        }
        if !self.failed.is_empty() {
            results.push(CommandResult {
                ids: self.failed,
                status: CommandStatus::Error,
                states: None,
                error_code: None,
            });
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_translate_on_true_to_on_action() {
        let request = Action::OnOff(true).request_for(&Target::device("d1"));
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({"type": "on", "device": "d1", "value": {"transition_time": 1}})
        );
    }

    #[test]
    fn should_translate_on_false_to_off_action_for_space() {
        let request = Action::OnOff(false).request_for(&Target::space("s1"));
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({"type": "off", "space": "s1", "value": {"transition_time": 1}})
        );
    }

    #[test]
    fn should_translate_brightness_to_dim_with_level() {
        let request = Action::Brightness(65).request_for(&Target::device("d1"));
        assert_eq!(request.kind, ActionKind::Dim);
        assert_eq!(request.value.level, Some(65));
        assert_eq!(request.value.transition_time, 1);
    }

    #[test]
    fn should_pick_action_from_params() {
        let on = ExecutionParams {
            on: Some(false),
            brightness: None,
        };
        let dim = ExecutionParams {
            on: None,
            brightness: Some(30),
        };
        assert_eq!(Action::from_params(&on), Some(Action::OnOff(false)));
        assert_eq!(Action::from_params(&dim), Some(Action::Brightness(30)));
        assert_eq!(Action::from_params(&ExecutionParams::default()), None);
    }

    #[test]
    fn should_emit_success_then_error_entries() {
        let mut outcomes = ActionOutcomes::default();
        outcomes.succeed(TargetId::new("t1"));
        outcomes.fail(TargetId::new("t2"));

        let results = outcomes.into_results(&Action::OnOff(false));
        assert_eq!(
            serde_json::to_value(&results).unwrap(),
            serde_json::json!([
                {"ids": ["t1"], "status": "SUCCESS", "states": {"on": false, "online": true}},
                {"ids": ["t2"], "status": "ERROR"}
            ])
        );
    }

    #[test]
    fn should_report_brightness_state_on_success() {
        let mut outcomes = ActionOutcomes::default();
        outcomes.succeed(TargetId::new("t1"));
        outcomes.succeed(TargetId::new("t2"));

        let results = outcomes.into_results(&Action::Brightness(80));
        assert_eq!(
            serde_json::to_value(&results).unwrap(),
            serde_json::json!([
                {"ids": ["t1", "t2"], "status": "SUCCESS", "states": {"brightness": 80}}
            ])
        );
    }

    #[test]
    fn should_emit_only_error_entry_when_everything_failed() {
        let mut outcomes = ActionOutcomes::default();
        outcomes.fail(TargetId::new("t1"));
        let results = outcomes.into_results(&Action::OnOff(true));
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].status, CommandStatus::Error);
    }

    #[test]
    fn should_emit_nothing_without_outcomes() {
        let results = ActionOutcomes::default().into_results(&Action::OnOff(true));
        assert!(results.is_empty());
    }

    #[test]
    fn should_tag_unsupported_results_with_error_code() {
        let result = CommandResult::not_supported(vec![TargetId::new("t1")]);
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            serde_json::json!({"ids": ["t1"], "status": "ERROR", "errorCode": "functionNotSupported"})
        );
    }
}
