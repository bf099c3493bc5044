//! Device descriptors — what SYNC tells the voice platform about each
//! controllable device or space.
//!
//! Descriptors are built fresh from a cloud record by pure builder functions;
//! there is no shared template being patched in place.

use serde::{Deserialize, Serialize};

use crate::cloud::{CloudDevice, CloudSpace, META_IS_ONLINE};
use crate::id::TargetId;
use crate::origin::{Origin, Target};

/// Platform device type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceType {
    #[serde(rename = "action.devices.types.LIGHT")]
    Light,
    #[serde(rename = "action.devices.types.SWITCH")]
    Switch,
}

/// Platform capability tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceTrait {
    #[serde(rename = "action.devices.traits.OnOff")]
    OnOff,
    #[serde(rename = "action.devices.traits.Brightness")]
    Brightness,
}

/// Traits advertised for both devices and spaces.
pub const LIGHTING_TRAITS: [DeviceTrait; 2] = [DeviceTrait::OnOff, DeviceTrait::Brightness];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceName {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    pub manufacturer: String,
}

/// Opaque data the platform echoes back on every QUERY / EXECUTE.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomData {
    #[serde(rename = "type")]
    pub origin: Origin,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub online: Option<bool>,
}

/// One entry of the SYNC `devices` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceDescriptor {
    pub id: TargetId,
    #[serde(rename = "type")]
    pub device_type: DeviceType,
    pub traits: Vec<DeviceTrait>,
    pub name: DeviceName,
    pub will_report_state: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_info: Option<DeviceInfo>,
    pub custom_data: CustomData,
}

impl DeviceDescriptor {
    #[must_use]
    pub fn origin(&self) -> Origin {
        self.custom_data.origin
    }

    /// The target later QUERY / EXECUTE requests will address.
    #[must_use]
    pub fn target(&self) -> Target {
        Target {
            id: self.id.clone(),
            origin: self.origin(),
        }
    }
}

/// Fixed values stamped on every descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptorProfile {
    pub manufacturer: String,
    pub will_report_state: bool,
}

impl Default for DescriptorProfile {
    fn default() -> Self {
        Self {
            manufacturer: "Gooee".to_string(),
            will_report_state: false,
        }
    }
}

/// Describe a cloud device as a platform light.
///
/// Returns `None` when the record has no boolean `is_online` metadata entry:
/// the platform needs an online hint, so such devices are left out of SYNC.
#[must_use]
pub fn describe_device(record: &CloudDevice, profile: &DescriptorProfile) -> Option<DeviceDescriptor> {
    let online = record.first_meta(META_IS_ONLINE)?.as_bool()?;
    Some(DeviceDescriptor {
        id: record.id.clone(),
        device_type: DeviceType::Light,
        traits: LIGHTING_TRAITS.to_vec(),
        name: DeviceName {
            name: record.name.clone(),
        },
        will_report_state: profile.will_report_state,
        device_info: Some(DeviceInfo {
            manufacturer: profile.manufacturer.clone(),
        }),
        custom_data: CustomData {
            origin: Origin::Device,
            online: Some(online),
        },
    })
}

/// Describe a cloud space as a platform switch.
#[must_use]
pub fn describe_space(record: &CloudSpace, profile: &DescriptorProfile) -> DeviceDescriptor {
    DeviceDescriptor {
        id: record.id.clone(),
        device_type: DeviceType::Switch,
        traits: LIGHTING_TRAITS.to_vec(),
        name: DeviceName {
            name: record.name.clone(),
        },
        will_report_state: profile.will_report_state,
        device_info: None,
        custom_data: CustomData {
            origin: Origin::Space,
            online: None,
        },
    }
}

/// Full SYNC listing: described devices first, then spaces, each group in
/// source order.
///
/// `on_dropped` is called once for every device left out by
/// [`describe_device`].
pub fn describe_all(
    devices: &[CloudDevice],
    spaces: &[CloudSpace],
    profile: &DescriptorProfile,
    mut on_dropped: impl FnMut(&CloudDevice),
) -> Vec<DeviceDescriptor> {
    devices
        .iter()
        .filter_map(|device| {
            let descriptor = describe_device(device, profile);
            if descriptor.is_none() {
                on_dropped(device);
            }
            descriptor
        })
        .chain(spaces.iter().map(|space| describe_space(space, profile)))
        .collect()
}
