//! Records exchanged with the device cloud API.
//!
//! These mirror the cloud's JSON shapes closely; unknown fields are ignored so
//! that the cloud can grow its payloads without breaking the adapter.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::id::{AgentUserId, TargetId};

/// Metadata key carrying a device's on/off state.
pub const META_ONOFF: &str = "onoff";
/// Metadata key carrying a device's reachability.
pub const META_IS_ONLINE: &str = "is_online";
/// Metadata key carrying a device's dim level (0–100).
pub const META_DIM: &str = "dim";

/// One `{name, value}` pair of a device's metadata list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaEntry {
    pub name: String,
    #[serde(default)]
    pub value: serde_json::Value,
}

impl MetaEntry {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A device as listed by `GET /devices` or fetched by `GET /devices/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloudDevice {
    pub id: TargetId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub meta: Vec<MetaEntry>,
}

impl CloudDevice {
    /// First metadata value stored under `name`.
    #[must_use]
    pub fn first_meta(&self, name: &str) -> Option<&serde_json::Value> {
        self.meta
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| &entry.value)
    }
}

/// A space as listed by `GET /spaces`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloudSpace {
    pub id: TargetId,
    #[serde(default)]
    pub name: String,
}

/// Body of `GET /spaces/{id}/device_states`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpaceDeviceStates {
    #[serde(default)]
    pub space: Option<TargetId>,
    /// Member device id → last known state.
    #[serde(default)]
    pub states: BTreeMap<String, MemberState>,
}

/// State of one member device inside a space.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemberState {
    #[serde(default)]
    pub onoff: Option<bool>,
}

/// Body of `GET /me`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloudUser {
    pub id: AgentUserId,
}

/// Command verb understood by `POST /actions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    On,
    Off,
    Dim,
}

/// Which resource an action applies to. Serialized as `{"device": id}` or
/// `{"space": id}` next to the other action fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionTarget {
    Device(TargetId),
    Space(TargetId),
}

impl ActionTarget {
    #[must_use]
    pub fn id(&self) -> &TargetId {
        match self {
            Self::Device(id) | Self::Space(id) => id,
        }
    }
}

/// Parameters of an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionValue {
    pub transition_time: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
}

/// Body of `POST /actions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRequest {
    #[serde(rename = "type")]
    pub kind: ActionKind,
    #[serde(flatten)]
    pub target: ActionTarget,
    pub value: ActionValue,
}
