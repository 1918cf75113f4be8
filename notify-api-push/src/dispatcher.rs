//! Notification dispatcher.
//!
//! One call, one `POST {base_url}/{device_id}?token={token}`. The response
//! is classified into a [`DispatchResult`]; nothing is retried or cached.

use async_trait::async_trait;
use reqwest::{Client, StatusCode, redirect};
use std::error::Error as _;
use tracing::{debug, error, info, warn};
use url::Url;

use crate::outcome::excerpt;
use crate::{
    DispatchResult, GatewayConfig, GatewayPayload, NotificationRequest, Notifier, NotifyError,
    NotifyTarget, Result,
};

/// Sends notifications to the gateway.
///
/// Holds only immutable configuration and a pooled HTTP client, so one
/// instance can be cloned into any number of concurrent tasks.
#[derive(Debug, Clone)]
pub struct NotificationDispatcher {
    config: GatewayConfig,
    base_url: Url,
    client: Client,
}

/// What came back from one gateway exchange.
#[derive(Debug)]
pub(crate) enum GatewayReply {
    /// Gateway answered with a status.
    Response { status: StatusCode, body: String },
    /// No response. The error has its URL stripped so the token never leaks.
    Transport(reqwest::Error),
}

impl NotificationDispatcher {
    /// Create a new dispatcher.
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(NotifyError::Config(format!(
                "Gateway URL cannot take a path: {}",
                config.base_url
            )));
        }

        // A redirected POST turns into a GET without the payload.
        let client = Client::builder()
            .redirect(redirect::Policy::none())
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| NotifyError::Config(e.to_string()))?;

        Ok(Self {
            config,
            base_url,
            client,
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Send one notification to a target.
    ///
    /// Returns `Err` only for caller precondition violations, which are
    /// caught before anything goes over the wire. Every gateway or network
    /// outcome comes back as a [`DispatchResult`].
    pub async fn send(
        &self,
        target: &NotifyTarget,
        request: &NotificationRequest,
    ) -> Result<DispatchResult> {
        request.validate()?;
        let payload = request.payload();

        debug!(
            device_id = %target.device_id(),
            title = ?payload.title,
            icon_url = ?payload.icon_url,
            group_type = ?payload.group_type,
            "Sending notification"
        );

        let result = match self.post(target.device_id(), target.token(), &payload).await? {
            GatewayReply::Response { status, .. } if status.is_success() => {
                info!(device_id = %target.device_id(), "Notification sent successfully");
                DispatchResult::delivered(status.as_u16())
            }
            GatewayReply::Response { status, body } if status.is_client_error() => {
                warn!(
                    device_id = %target.device_id(),
                    status = status.as_u16(),
                    response = %excerpt(&body),
                    "Gateway rejected notification"
                );
                DispatchResult::rejected(status.as_u16(), &body)
            }
            GatewayReply::Response { status, body } => {
                error!(
                    device_id = %target.device_id(),
                    status = status.as_u16(),
                    "Gateway failed to accept notification"
                );
                DispatchResult::transport(
                    Some(status.as_u16()),
                    format!("Gateway returned status {}: {}", status, excerpt(&body)),
                )
            }
            GatewayReply::Transport(err) => {
                let detail = transport_detail(&err);
                error!(device_id = %target.device_id(), error = %detail, "Error sending notification");
                DispatchResult::transport(None, detail)
            }
        };

        Ok(result)
    }

    /// Post a payload and collect the reply. Used by the validator probe too.
    pub(crate) async fn post(
        &self,
        device_id: &str,
        token: &str,
        payload: &GatewayPayload<'_>,
    ) -> Result<GatewayReply> {
        let url = self.endpoint(device_id)?;

        let response = self
            .client
            .post(url)
            .query(&[("token", token)])
            .json(payload)
            .send()
            .await;

        let reply = match response {
            Ok(response) => {
                let status = response.status();
                let body = match response.text().await {
                    Ok(body) => body,
                    Err(err) => {
                        debug!(
                            device_id = %device_id,
                            status = status.as_u16(),
                            error = %err.without_url(),
                            "Failed to read gateway response body"
                        );
                        String::new()
                    }
                };
                GatewayReply::Response { status, body }
            }
            Err(err) => GatewayReply::Transport(err.without_url()),
        };

        Ok(reply)
    }

    /// Gateway URL for a device, with the id as a single encoded path segment.
    pub(crate) fn endpoint(&self, device_id: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| NotifyError::Config("Gateway URL cannot take a path".to_string()))?
            .pop_if_empty()
            .push(device_id);
        Ok(url)
    }
}

#[async_trait]
impl Notifier for NotificationDispatcher {
    async fn send(
        &self,
        target: &NotifyTarget,
        request: &NotificationRequest,
    ) -> Result<DispatchResult> {
        NotificationDispatcher::send(self, target, request).await
    }
}

/// Human readable description of a transport error, causes included.
pub(crate) fn transport_detail(err: &reqwest::Error) -> String {
    let mut detail = if err.is_timeout() {
        "Connection to Notify API timed out".to_string()
    } else if err.is_connect() {
        "Could not connect to Notify API".to_string()
    } else {
        format!("Error sending notification: {}", err)
    };

    let mut source = err.source();
    while let Some(cause) = source {
        detail.push_str(": ");
        detail.push_str(&cause.to_string());
        source = cause.source();
    }
    detail
}
