//! Credential validation.

use reqwest::StatusCode;
use tracing::{debug, info, warn};

use crate::dispatcher::{GatewayReply, transport_detail};
use crate::outcome::excerpt;
use crate::{
    GatewayConfig, GatewayPayload, NotificationDispatcher, NotifyTarget, Result, ValidationResult,
};

/// Text of the probe notification sent while validating.
pub const PROBE_TEXT: &str = "✅ Notify Alerts integration successfully configured!";

/// Title of the probe notification.
pub const PROBE_TITLE: &str = "Integration Test";

/// Checks a device id and token against the gateway.
///
/// The gateway has no dedicated auth endpoint, so the check posts a test
/// notification through the regular dispatch path. Nothing is persisted; a
/// caller should only store the pair after [`ValidationResult::Valid`].
#[derive(Debug, Clone)]
pub struct CredentialValidator {
    dispatcher: NotificationDispatcher,
}

impl CredentialValidator {
    /// Create a validator with its own dispatcher.
    pub fn new(config: GatewayConfig) -> Result<Self> {
        Ok(Self::from_dispatcher(NotificationDispatcher::new(config)?))
    }

    /// Create a validator sharing an existing dispatcher.
    pub fn from_dispatcher(dispatcher: NotificationDispatcher) -> Self {
        Self { dispatcher }
    }

    /// Validate a device id and token pair.
    ///
    /// Empty values fail with a precondition error before any request.
    pub async fn validate(&self, device_id: &str, token: &str) -> Result<ValidationResult> {
        let target = NotifyTarget::new(device_id, token)?;
        self.validate_target(&target).await
    }

    /// Validate a full target. `Valid` carries the target's display title.
    pub async fn validate_target(&self, target: &NotifyTarget) -> Result<ValidationResult> {
        let payload = GatewayPayload {
            text: PROBE_TEXT,
            title: Some(PROBE_TITLE),
            icon_url: None,
            group_type: None,
        };

        debug!(device_id = %target.device_id(), "Validating credentials");

        let reply = self
            .dispatcher
            .post(target.device_id(), target.token(), &payload)
            .await?;
        let result = classify(reply, target);

        match &result {
            ValidationResult::Valid { title } => {
                info!(device_id = %target.device_id(), title = %title, "Credentials validated")
            }
            other => warn!(device_id = %target.device_id(), result = %other, "Credential check failed"),
        }

        Ok(result)
    }
}

fn classify(reply: GatewayReply, target: &NotifyTarget) -> ValidationResult {
    match reply {
        GatewayReply::Response { status, .. } if status.is_success() => ValidationResult::Valid {
            title: target.display_title(),
        },
        GatewayReply::Response { status, body }
            if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN =>
        {
            let detail = if body.trim().is_empty() {
                format!("Gateway refused the token ({})", status.as_u16())
            } else {
                excerpt(&body)
            };
            ValidationResult::InvalidCredentials { detail }
        }
        GatewayReply::Response { status, .. } if status == StatusCode::NOT_FOUND => {
            ValidationResult::InvalidCredentials {
                detail: "Device or group ID not found".to_string(),
            }
        }
        GatewayReply::Response { status, .. } => ValidationResult::Unreachable {
            detail: format!("API returned status {}", status.as_u16()),
        },
        GatewayReply::Transport(err) => ValidationResult::Unreachable {
            detail: transport_detail(&err),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NotifyError;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn validator_for(server: &MockServer) -> CredentialValidator {
        CredentialValidator::new(
            GatewayConfig::builder()
                .base_url(format!("{}/notify-json", server.uri()))
                .timeout(Duration::from_millis(500))
                .build(),
        )
        .unwrap()
    }

    async fn server_returning(status: u16) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(status))
            .expect(1)
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn test_valid_pair_sends_probe() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/notify-json/abc123"))
            .and(query_param("token", "tok"))
            .and(body_json(json!({"text": PROBE_TEXT, "title": PROBE_TITLE})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let result = validator_for(&server).validate("abc123", "tok").await.unwrap();
        assert_eq!(
            result,
            ValidationResult::Valid {
                title: "Notify! Alert (ABC123)".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_valid_target_uses_display_name() {
        let server = server_returning(200).await;
        let target = NotifyTarget::new("abc123", "tok")
            .unwrap()
            .with_display_name("Kitchen Tablet");

        let result = validator_for(&server).validate_target(&target).await.unwrap();
        assert_eq!(
            result,
            ValidationResult::Valid {
                title: "Kitchen Tablet".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_auth_failures_are_invalid_credentials() {
        for status in [401, 403, 404] {
            let server = server_returning(status).await;
            let result = validator_for(&server).validate("abc123", "bad").await.unwrap();
            assert!(
                matches!(result, ValidationResult::InvalidCredentials { .. }),
                "status {} gave {:?}",
                status,
                result
            );
        }
    }

    #[tokio::test]
    async fn test_unknown_device_detail() {
        let server = server_returning(404).await;
        let result = validator_for(&server).validate("nope", "tok").await.unwrap();
        assert_eq!(
            result,
            ValidationResult::InvalidCredentials {
                detail: "Device or group ID not found".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_other_status_is_unreachable() {
        let server = server_returning(500).await;
        let result = validator_for(&server).validate("abc123", "tok").await.unwrap();
        assert_eq!(
            result,
            ValidationResult::Unreachable {
                detail: "API returned status 500".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_timeout_is_unreachable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&server)
            .await;

        let result = validator_for(&server).validate("abc123", "tok").await.unwrap();
        match result {
            ValidationResult::Unreachable { detail } => assert!(detail.contains("timed out")),
            other => panic!("expected Unreachable, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_redirect_is_unreachable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(302)
                    .insert_header("location", format!("{}/elsewhere", server.uri())),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(path("/elsewhere"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let result = validator_for(&server).validate("abc123", "tok").await.unwrap();
        assert_eq!(
            result,
            ValidationResult::Unreachable {
                detail: "API returned status 302".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_connection_refused_is_unreachable() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let validator = CredentialValidator::new(
            GatewayConfig::builder()
                .base_url(format!("http://127.0.0.1:{}/notify-json", port))
                .build(),
        )
        .unwrap();

        let result = validator.validate("abc123", "tok").await.unwrap();
        match result {
            ValidationResult::Unreachable { detail } => {
                assert!(detail.starts_with("Could not connect to Notify API"));
                assert!(!detail.contains("tok"));
            }
            other => panic!("expected Unreachable, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_values_fail_without_network() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let validator = validator_for(&server);

        let err = validator.validate("", "t").await.unwrap_err();
        assert!(matches!(err, NotifyError::EmptyDeviceId));
        assert!(err.is_precondition());

        let err = validator.validate("d", "").await.unwrap_err();
        assert!(matches!(err, NotifyError::EmptyToken));
    }
}
