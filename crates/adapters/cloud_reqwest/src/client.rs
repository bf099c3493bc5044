//! `CloudApi` implementation over HTTPS.

use glowbridge_app::ports::{CloudApi, Page};
use glowbridge_domain::cloud::{ActionRequest, CloudDevice, CloudUser, SpaceDeviceStates};
use glowbridge_domain::error::GlowBridgeError;
use glowbridge_domain::id::{BearerToken, TargetId};
use reqwest::header::LINK;
use reqwest::{RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;

use crate::config::CloudConfig;
use crate::error::CloudError;
use crate::link::parse_next_link;

/// REST client for the device cloud.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct CloudClient {
    http: reqwest::Client,
    /// Always ends with `/` so relative locations resolve below its path.
    base_url: Url,
}

impl CloudClient {
    /// Build a client for `config.base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`CloudError::InvalidUrl`] when the base URL is not an absolute
    /// http(s) URL, or [`CloudError::Http`] if the TLS backend fails to start.
    pub fn new(config: &CloudConfig) -> Result<Self, CloudError> {
        let base_url = parse_base_url(&config.base_url)?;
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self { http, base_url })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a listing location. Absolute URLs (next-page links) are used
    /// as-is, anything else is taken relative to the base URL's path.
    fn url(&self, location: &str) -> Result<Url, CloudError> {
        let resolved = if is_absolute(location) {
            Url::parse(location)
        } else {
            self.base_url.join(location.trim_start_matches('/'))
        };
        resolved.map_err(|_| CloudError::InvalidUrl(location.to_string()))
    }

    /// Base URL with `segments` appended, each one percent-encoded.
    fn resource(&self, segments: &[&str]) -> Result<Url, CloudError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| CloudError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder, token: &BearerToken) -> Result<Response, CloudError> {
        let response = request.bearer_auth(token.expose()).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(CloudError::Status {
                status: status.as_u16(),
                body,
            })
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, token: &BearerToken, url: Url) -> Result<T, CloudError> {
        tracing::debug!(%url, "GET");
        let response = self.send(self.http.get(url), token).await?;
        parse_json(response).await
    }
}

impl CloudApi for CloudClient {
    async fn get_page(&self, token: &BearerToken, location: &str) -> Result<Page, GlowBridgeError> {
        let url = self.url(location)?;
        tracing::debug!(%url, "GET page");
        let response = self.send(self.http.get(url), token).await?;
        let next = response
            .headers()
            .get_all(LINK)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find_map(parse_next_link)
            .map(|href| resolve_link(response.url(), &href))
            .transpose()?;
        let items = parse_json(response).await?;
        Ok(Page { items, next })
    }

    async fn get_device(&self, token: &BearerToken, id: &TargetId) -> Result<CloudDevice, GlowBridgeError> {
        let url = self.resource(&["devices", id.as_str()])?;
        Ok(self.get_json(token, url).await?)
    }

    async fn get_space_device_states(
        &self,
        token: &BearerToken,
        id: &TargetId,
    ) -> Result<SpaceDeviceStates, GlowBridgeError> {
        let url = self.resource(&["spaces", id.as_str(), "device_states"])?;
        Ok(self.get_json(token, url).await?)
    }

    async fn post_action(&self, token: &BearerToken, action: &ActionRequest) -> Result<(), GlowBridgeError> {
        let url = self.resource(&["actions"])?;
        tracing::debug!(%url, target_id = %action.target.id(), "POST action");
        self.send(self.http.post(url).json(action), token).await?;
        Ok(())
    }

    async fn get_me(&self, token: &BearerToken) -> Result<CloudUser, GlowBridgeError> {
        let url = self.resource(&["me"])?;
        Ok(self.get_json(token, url).await?)
    }
}

fn is_absolute(location: &str) -> bool {
    location.starts_with("https://") || location.starts_with("http://")
}

fn parse_base_url(raw: &str) -> Result<Url, CloudError> {
    let invalid = || CloudError::InvalidUrl(raw.to_string());
    if !is_absolute(raw) {
        return Err(invalid());
    }
    let mut url = Url::parse(raw).map_err(|_| invalid())?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Resolve a `Link` target against the URL of the response that carried it.
fn resolve_link(base: &Url, href: &str) -> Result<String, CloudError> {
    base.join(href)
        .map(String::from)
        .map_err(|_| CloudError::InvalidUrl(href.to_string()))
}

async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, CloudError> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(CloudError::Decode)
}
