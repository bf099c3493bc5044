//! Execute service — dispatches commands to each target and reports outcomes.

use glowbridge_domain::command::{Action, ActionOutcomes, CommandResult};
use glowbridge_domain::id::BearerToken;
use glowbridge_domain::intent::CommandGroup;
use glowbridge_domain::origin::Target;

use crate::ports::CloudApi;

/// Application service answering EXECUTE.
pub struct ExecuteService<C> {
    cloud: C,
}

impl<C: CloudApi> ExecuteService<C> {
    pub fn new(cloud: C) -> Self {
        Self { cloud }
    }

    /// Run every execution of every group and concatenate their results.
    ///
    /// Per-target failures are reported as `ERROR` entries, so this never
    /// fails as a whole.
    #[tracing::instrument(skip_all, fields(groups = groups.len()))]
    pub async fn execute(&self, token: &BearerToken, groups: &[CommandGroup]) -> Vec<CommandResult> {
        let mut results = Vec::new();
        for group in groups {
            for execution in &group.execution {
                if let Some(action) = Action::from_params(&execution.params) {
                    results.extend(self.dispatch(token, action, &group.devices).await);
                } else {
                    tracing::warn!(command = %execution.command, "unsupported execution params");
                    if !group.devices.is_empty() {
                        let ids = group.devices.iter().map(|t| t.id.clone()).collect();
                        results.push(CommandResult::not_supported(ids));
                    }
                }
            }
        }
        results
    }

    /// Send `action` to each target in turn, waiting for each call before the next.
    async fn dispatch(
        &self,
        token: &BearerToken,
        action: Action,
        targets: &[Target],
    ) -> Vec<CommandResult> {
        let mut outcomes = ActionOutcomes::default();
        for target in targets {
            let request = action.request_for(target);
            match self.cloud.post_action(token, &request).await {
                Ok(()) => outcomes.succeed(target.id.clone()),
                Err(err) => {
                    tracing::warn!(
                        target_id = %target.id,
                        origin = %target.origin,
                        error = %err,
                        "action failed"
                    );
                    outcomes.fail(target.id.clone());
                }
            }
        }
        tracing::debug!(
            succeeded = outcomes.succeeded().len(),
            failed = outcomes.failed().len(),
            ?action,
            "action dispatched"
        );
        outcomes.into_results(&action)
    }
}
