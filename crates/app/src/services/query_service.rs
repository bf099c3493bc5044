//! Query service — aggregates the current state of the queried targets.

use glowbridge_domain::error::GlowBridgeError;
use glowbridge_domain::id::BearerToken;
use glowbridge_domain::origin::{Origin, Target};
use glowbridge_domain::state::{StateMap, StateRecord};

use crate::ports::CloudApi;

/// Application service answering QUERY.
pub struct QueryService<C> {
    cloud: C,
}

impl<C: CloudApi> QueryService<C> {
    pub fn new(cloud: C) -> Self {
        Self { cloud }
    }

    /// Fetch every target's state, one after the other in input order.
    ///
    /// # Errors
    ///
    /// The first target that cannot be fetched fails the whole query; no
    /// partial map is returned.
    #[tracing::instrument(skip_all, fields(targets = targets.len()))]
    pub async fn query(
        &self,
        token: &BearerToken,
        targets: &[Target],
    ) -> Result<StateMap, GlowBridgeError> {
        let mut states = StateMap::new();
        for target in targets {
            let state = self.fetch_state(token, target).await.inspect_err(|err| {
                tracing::warn!(
                    target_id = %target.id,
                    origin = %target.origin,
                    error = %err,
                    "failed to fetch state"
                );
            })?;
            states.insert(target.id.clone(), state);
        }
        Ok(states)
    }

    async fn fetch_state(
        &self,
        token: &BearerToken,
        target: &Target,
    ) -> Result<StateRecord, GlowBridgeError> {
        match target.origin {
            Origin::Device => {
                let device = self.cloud.get_device(token, &target.id).await?;
                Ok(StateRecord::from_device(&device))
            }
            Origin::Space => {
                let members = self.cloud.get_space_device_states(token, &target.id).await?;
                Ok(StateRecord::from_space(&members))
            }
        }
    }
}
