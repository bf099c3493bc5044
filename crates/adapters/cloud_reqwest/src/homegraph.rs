//! `StatePublisher` implementation pushing report-state bodies to the platform.

use std::time::Duration;

use glowbridge_app::ports::StatePublisher;
use glowbridge_domain::envelope::ReportStateRequest;
use glowbridge_domain::error::GlowBridgeError;
use glowbridge_domain::id::BearerToken;

use crate::error::CloudError;

/// Posts [`ReportStateRequest`] bodies as JSON to a fixed endpoint.
#[derive(Debug, Clone)]
pub struct HomeGraphPublisher {
    http: reqwest::Client,
    endpoint: String,
    token: Option<BearerToken>,
}

impl HomeGraphPublisher {
    /// Build a publisher for `endpoint`, authenticating with `token` if given.
    ///
    /// # Errors
    ///
    /// Returns [`CloudError::InvalidUrl`] when `endpoint` is not an absolute
    /// http(s) URL.
    pub fn new(
        endpoint: impl Into<String>,
        token: Option<BearerToken>,
        timeout: Duration,
    ) -> Result<Self, CloudError> {
        let endpoint = endpoint.into();
        if !(endpoint.starts_with("https://") || endpoint.starts_with("http://")) {
            return Err(CloudError::InvalidUrl(endpoint));
        }
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint,
            token,
        })
    }

    async fn push(&self, request: &ReportStateRequest) -> Result<(), CloudError> {
        let mut builder = self.http.post(&self.endpoint).json(request);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token.expose());
        }
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(CloudError::Status {
                status: status.as_u16(),
                body,
            })
        }
    }
}

impl StatePublisher for HomeGraphPublisher {
    async fn publish(&self, request: ReportStateRequest) -> Result<(), GlowBridgeError> {
        tracing::debug!(
            endpoint = %self.endpoint,
            request_id = %request.request_id,
            states = request.payload.devices.states.len(),
            "pushing report state"
        );
        Ok(self.push(&request).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glowbridge_domain::id::{AgentUserId, RequestId, TargetId};
    use glowbridge_domain::state::{StateMap, StateRecord};
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request() -> ReportStateRequest {
        ReportStateRequest::new(
            RequestId::new("r1"),
            AgentUserId::new("user-1"),
            StateMap::from([(
                TargetId::new("d1"),
                StateRecord {
                    on: true,
                    online: true,
                    brightness: Some(40),
                },
            )]),
        )
    }

    #[test]
    fn should_reject_relative_endpoint() {
        let result = HomeGraphPublisher::new("/report", None, Duration::from_secs(1));
        assert!(matches!(result, Err(CloudError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn should_post_report_state_body_with_bearer() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/devices:reportStateAndNotification"))
            .and(header("authorization", "Bearer platform-token"))
            .and(body_json(json!({
                "requestId": "r1",
                "agentUserId": "user-1",
                "payload": {"devices": {"states": {
                    "d1": {"on": true, "online": true, "brightness": 40}
                }}}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let publisher = HomeGraphPublisher::new(
            format!("{}/v1/devices:reportStateAndNotification", server.uri()),
            Some(BearerToken::new("platform-token")),
            Duration::from_secs(5),
        )
        .unwrap();

        publisher.publish(request()).await.unwrap();
    }

    #[tokio::test]
    async fn should_fail_on_rejected_push() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let publisher =
            HomeGraphPublisher::new(server.uri(), None, Duration::from_secs(5)).unwrap();

        let result = publisher.publish(request()).await;
        assert!(matches!(result, Err(GlowBridgeError::Downstream(_))));
    }
}
