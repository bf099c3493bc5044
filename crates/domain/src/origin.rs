//! Origin of a target — whether an id names a cloud device or a cloud space.

use serde::{Deserialize, Serialize};

use crate::id::TargetId;

/// Which cloud sub-resource an id lives under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Device,
    Space,
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Device => f.write_str("device"),
            Self::Space => f.write_str("space"),
        }
    }
}

/// A device or space addressed by a QUERY or EXECUTE request.
///
/// On the wire the origin travels inside the `customData` the adapter handed
/// out during SYNC: `{"id": "...", "customData": {"type": "device"}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "TargetWire", into = "TargetWire")]
pub struct Target {
    pub id: TargetId,
    pub origin: Origin,
}

impl Target {
    #[must_use]
    pub fn device(id: impl Into<TargetId>) -> Self {
        Self {
            id: id.into(),
            origin: Origin::Device,
        }
    }

    #[must_use]
    pub fn space(id: impl Into<TargetId>) -> Self {
        Self {
            id: id.into(),
            origin: Origin::Space,
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TargetWire {
    id: TargetId,
    custom_data: TargetCustomData,
}

#[derive(Clone, Serialize, Deserialize)]
struct TargetCustomData {
    #[serde(rename = "type")]
    origin: Origin,
}

impl From<TargetWire> for Target {
    fn from(wire: TargetWire) -> Self {
        Self {
            id: wire.id,
            origin: wire.custom_data.origin,
        }
    }
}

impl From<Target> for TargetWire {
    fn from(target: Target) -> Self {
        Self {
            id: target.id,
            custom_data: TargetCustomData {
                origin: target.origin,
            },
        }
    }
}
