//! In-memory fakes of the ports, shared by the service tests.

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::Mutex;

use glowbridge_domain::cloud::{
    ActionRequest, CloudDevice, CloudUser, MetaEntry, SpaceDeviceStates,
};
use glowbridge_domain::envelope::ReportStateRequest;
use glowbridge_domain::error::GlowBridgeError;
use glowbridge_domain::id::{AgentUserId, BearerToken, TargetId};
use tokio::sync::mpsc;

use crate::ports::{CloudApi, Page, StatePublisher};

#[derive(Debug, thiserror::Error)]
#[error("unreachable: {0}")]
pub struct Unreachable(pub String);

fn unreachable(what: impl Into<String>) -> GlowBridgeError {
    GlowBridgeError::downstream(Unreachable(what.into()))
}

pub fn token() -> BearerToken {
    BearerToken::new("test-token")
}

pub fn device(id: &str, meta: Vec<MetaEntry>) -> CloudDevice {
    CloudDevice {
        id: TargetId::new(id),
        name: format!("{id} name"),
        meta,
    }
}

/// Scripted cloud: anything not scripted fails like an unreachable host.
#[derive(Default)]
pub struct FakeCloud {
    pages: HashMap<String, Page>,
    devices: HashMap<TargetId, CloudDevice>,
    spaces: HashMap<TargetId, SpaceDeviceStates>,
    failing_actions: HashSet<TargetId>,
    me: Option<AgentUserId>,
    calls: Mutex<Vec<String>>,
    actions: Mutex<Vec<ActionRequest>>,
}

impl FakeCloud {
    #[must_use]
    pub fn with_page(
        mut self,
        location: &str,
        items: Vec<serde_json::Value>,
        next: Option<&str>,
    ) -> Self {
        self.pages.insert(
            location.to_string(),
            Page {
                items,
                next: next.map(str::to_string),
            },
        );
        self
    }

    #[must_use]
    pub fn with_device(mut self, device: CloudDevice) -> Self {
        self.devices.insert(device.id.clone(), device);
        self
    }

    #[must_use]
    pub fn with_space_states(mut self, id: &str, states: SpaceDeviceStates) -> Self {
        self.spaces.insert(TargetId::new(id), states);
        self
    }

    #[must_use]
    pub fn failing_action(mut self, id: &str) -> Self {
        self.failing_actions.insert(TargetId::new(id));
        self
    }

    #[must_use]
    pub fn with_me(mut self, id: &str) -> Self {
        self.me = Some(AgentUserId::new(id));
        self
    }

    /// Every call made so far, in order (`GET /devices/1`, `POST device=1`, …).
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn actions(&self) -> Vec<ActionRequest> {
        self.actions.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl CloudApi for FakeCloud {
    fn get_page(
        &self,
        _token: &BearerToken,
        location: &str,
    ) -> impl Future<Output = Result<Page, GlowBridgeError>> + Send {
        self.record(format!("GET {location}"));
        let result = self
            .pages
            .get(location)
            .cloned()
            .ok_or_else(|| unreachable(location));
        async move { result }
    }

    fn get_device(
        &self,
        _token: &BearerToken,
        id: &TargetId,
    ) -> impl Future<Output = Result<CloudDevice, GlowBridgeError>> + Send {
        self.record(format!("GET /devices/{id}"));
        let result = self
            .devices
            .get(id)
            .cloned()
            .ok_or_else(|| unreachable(format!("/devices/{id}")));
        async move { result }
    }

    fn get_space_device_states(
        &self,
        _token: &BearerToken,
        id: &TargetId,
    ) -> impl Future<Output = Result<SpaceDeviceStates, GlowBridgeError>> + Send {
        self.record(format!("GET /spaces/{id}/device_states"));
        let result = self
            .spaces
            .get(id)
            .cloned()
            .ok_or_else(|| unreachable(format!("/spaces/{id}/device_states")));
        async move { result }
    }

    fn post_action(
        &self,
        _token: &BearerToken,
        action: &ActionRequest,
    ) -> impl Future<Output = Result<(), GlowBridgeError>> + Send {
        let id = action.target.id().clone();
        self.record(format!("POST /actions {id}"));
        self.actions.lock().unwrap().push(action.clone());
        let result = if self.failing_actions.contains(&id) {
            Err(unreachable(format!("/actions {id}")))
        } else {
            Ok(())
        };
        async move { result }
    }

    fn get_me(
        &self,
        _token: &BearerToken,
    ) -> impl Future<Output = Result<CloudUser, GlowBridgeError>> + Send {
        self.record("GET /me".to_string());
        let result = self
            .me
            .clone()
            .map(|id| CloudUser { id })
            .ok_or_else(|| unreachable("/me"));
        async move { result }
    }
}

/// Forwards every push to a channel, then answers `Ok` or a failure.
pub struct ChannelPublisher {
    sender: mpsc::UnboundedSender<ReportStateRequest>,
    fail: bool,
}

impl ChannelPublisher {
    pub fn new(fail: bool) -> (Self, mpsc::UnboundedReceiver<ReportStateRequest>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender, fail }, receiver)
    }
}

impl StatePublisher for ChannelPublisher {
    fn publish(
        &self,
        request: ReportStateRequest,
    ) -> impl Future<Output = Result<(), GlowBridgeError>> + Send {
        let _ = self.sender.send(request);
        let result = if self.fail {
            Err(unreachable("report state endpoint"))
        } else {
            Ok(())
        };
        async move { result }
    }
}

#[test]
fn should_name_the_unreachable_resource() {
    let GlowBridgeError::Downstream(source) = unreachable("GET /me") else {
        panic!("expected a downstream error");
    };
    assert_eq!(source.to_string(), "unreachable: GET /me");
}
