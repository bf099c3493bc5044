//! Sync service — discovers the user's devices and spaces.

use glowbridge_domain::cloud::{CloudDevice, CloudSpace, META_IS_ONLINE};
use glowbridge_domain::descriptor::{DescriptorProfile, DeviceDescriptor, describe_all};
use glowbridge_domain::error::GlowBridgeError;
use glowbridge_domain::id::BearerToken;

use super::pagination::fetch_all;
use crate::ports::CloudApi;

/// Tunables for discovery listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncSettings {
    /// Cloud device types exposed to the platform (`type__in` filter).
    pub device_types: Vec<String>,
    /// Requested page size (`limit`).
    pub page_size: usize,
    /// Upper bound on pages followed per listing.
    pub max_pages: usize,
    pub profile: DescriptorProfile,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            device_types: vec!["wim".to_string(), "bulb".to_string()],
            page_size: 100,
            max_pages: 100,
            profile: DescriptorProfile::default(),
        }
    }
}

/// Application service answering SYNC.
pub struct SyncService<C> {
    cloud: C,
    settings: SyncSettings,
}

impl<C: CloudApi> SyncService<C> {
    pub fn new(cloud: C, settings: SyncSettings) -> Self {
        Self { cloud, settings }
    }

    /// First page of the device listing.
    #[must_use]
    pub fn devices_location(&self) -> String {
        format!(
            "/devices?_include=id,name,meta&type__in={}&limit={}",
            self.settings.device_types.join(","),
            self.settings.page_size
        )
    }

    /// First page of the space listing.
    #[must_use]
    pub fn spaces_location(&self) -> String {
        format!("/spaces?_include=id,name&limit={}", self.settings.page_size)
    }

    /// List every device then every space and describe them for the platform.
    ///
    /// Devices without a boolean online status are logged and left out.
    ///
    /// # Errors
    ///
    /// Any failed page aborts discovery with the downstream error.
    #[tracing::instrument(skip_all)]
    pub async fn discover(&self, token: &BearerToken) -> Result<Vec<DeviceDescriptor>, GlowBridgeError> {
        let max_pages = self.settings.max_pages;
        let devices: Vec<CloudDevice> =
            fetch_all(&self.cloud, token, &self.devices_location(), max_pages).await?;
        let spaces: Vec<CloudSpace> =
            fetch_all(&self.cloud, token, &self.spaces_location(), max_pages).await?;

        let descriptors = describe_all(&devices, &spaces, &self.settings.profile, warn_dropped);
        tracing::debug!(
            devices = devices.len(),
            spaces = spaces.len(),
            described = descriptors.len(),
            "discovery finished"
        );
        Ok(descriptors)
    }
}

fn warn_dropped(device: &CloudDevice) {
    match device.first_meta(META_IS_ONLINE) {
        None => tracing::warn!(device_id = %device.id, "device has no online status, leaving it out"),
        Some(value) => tracing::warn!(
            device_id = %device.id,
            %value,
            "device online status is not a boolean, leaving it out"
        ),
    }
}
