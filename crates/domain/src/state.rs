//! State records — the per-target shape of a QUERY answer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cloud::{CloudDevice, META_DIM, META_IS_ONLINE, META_ONOFF, SpaceDeviceStates};
use crate::id::TargetId;

/// Current state of one device or space as reported to the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateRecord {
    pub on: bool,
    pub online: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brightness: Option<u8>,
}

/// Target id → state, as returned under `payload.devices` by QUERY.
pub type StateMap = BTreeMap<TargetId, StateRecord>;

impl StateRecord {
    /// Read a device's state from its metadata list.
    ///
    /// Entries are scanned in order and each matching entry overwrites the
    /// value read so far, so the last duplicate wins. Missing `onoff` or
    /// `is_online` read as `false`; a missing or non-numeric `dim` leaves
    /// `brightness` unset.
    #[must_use]
    pub fn from_device(device: &CloudDevice) -> Self {
        let mut on = None;
        let mut online = None;
        let mut brightness = None;
        for entry in &device.meta {
            match entry.name.as_str() {
                META_ONOFF => on = entry.value.as_bool(),
                META_IS_ONLINE => online = entry.value.as_bool(),
                META_DIM => brightness = read_brightness(&entry.value),
                _ => {}
            }
        }
        Self {
            on: on.unwrap_or(false),
            online: online.unwrap_or(false),
            brightness,
        }
    }

    /// Derive a space's state from its members: on when any member is on.
    ///
    /// Spaces have no reachability of their own and always report online.
    #[must_use]
    pub fn from_space(states: &SpaceDeviceStates) -> Self {
        let lit: usize = states
            .states
            .values()
            .map(|member| usize::from(member.onoff.unwrap_or(false)))
            .sum();
        Self {
            on: lit > 0,
            online: true,
            brightness: None,
        }
    }
}

/// Dim level as a platform brightness percentage, rounded and clamped to
/// `0..=100`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn read_brightness(value: &serde_json::Value) -> Option<u8> {
    let level = value.as_f64().filter(|level| level.is_finite())?;
    Some(level.round().clamp(0.0, 100.0) as u8)
}
