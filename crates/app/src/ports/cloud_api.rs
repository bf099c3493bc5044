//! Cloud API port — the device cloud's REST surface as the core needs it.

use std::future::Future;

use glowbridge_domain::cloud::{ActionRequest, CloudDevice, CloudUser, SpaceDeviceStates};
use glowbridge_domain::error::GlowBridgeError;
use glowbridge_domain::id::{BearerToken, TargetId};

/// One page of a paginated listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    /// Raw elements of this page, in the order the cloud returned them.
    pub items: Vec<serde_json::Value>,
    /// Location of the following page, if the cloud announced one.
    pub next: Option<String>,
}

/// Calls against the device cloud, authenticated with the caller's token.
///
/// Every method is one network round-trip. Implementations must not retry;
/// failures surface as [`GlowBridgeError::Downstream`].
pub trait CloudApi {
    /// `GET` one page of a listing. `location` is either a path relative to
    /// the API base (`/devices?...`) or a next-page URL returned earlier.
    fn get_page(
        &self,
        token: &BearerToken,
        location: &str,
    ) -> impl Future<Output = Result<Page, GlowBridgeError>> + Send;

    /// `GET /devices/{id}`.
    fn get_device(
        &self,
        token: &BearerToken,
        id: &TargetId,
    ) -> impl Future<Output = Result<CloudDevice, GlowBridgeError>> + Send;

    /// `GET /spaces/{id}/device_states`.
    fn get_space_device_states(
        &self,
        token: &BearerToken,
        id: &TargetId,
    ) -> impl Future<Output = Result<SpaceDeviceStates, GlowBridgeError>> + Send;

    /// `POST /actions`.
    fn post_action(
        &self,
        token: &BearerToken,
        action: &ActionRequest,
    ) -> impl Future<Output = Result<(), GlowBridgeError>> + Send;

    /// `GET /me` — the user owning `token`.
    fn get_me(
        &self,
        token: &BearerToken,
    ) -> impl Future<Output = Result<CloudUser, GlowBridgeError>> + Send;
}

impl<T: CloudApi + Send + Sync> CloudApi for std::sync::Arc<T> {
    fn get_page(
        &self,
        token: &BearerToken,
        location: &str,
    ) -> impl Future<Output = Result<Page, GlowBridgeError>> + Send {
        (**self).get_page(token, location)
    }

    fn get_device(
        &self,
        token: &BearerToken,
        id: &TargetId,
    ) -> impl Future<Output = Result<CloudDevice, GlowBridgeError>> + Send {
        (**self).get_device(token, id)
    }

    fn get_space_device_states(
        &self,
        token: &BearerToken,
        id: &TargetId,
    ) -> impl Future<Output = Result<SpaceDeviceStates, GlowBridgeError>> + Send {
        (**self).get_space_device_states(token, id)
    }

    fn post_action(
        &self,
        token: &BearerToken,
        action: &ActionRequest,
    ) -> impl Future<Output = Result<(), GlowBridgeError>> + Send {
        (**self).post_action(token, action)
    }

    fn get_me(
        &self,
        token: &BearerToken,
    ) -> impl Future<Output = Result<CloudUser, GlowBridgeError>> + Send {
        (**self).get_me(token)
    }
}
