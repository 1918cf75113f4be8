// Notify settings: the persisted configuration surface

use crate::validation::{ConfigValidator, Validate};
use crate::Result;
use notify_api_push::{GatewayConfig, NotifyDefaults, NotifyTarget};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Longest request timeout a configuration may ask for.
pub const MAX_TIMEOUT_SECS: u64 = 300;

/// Everything needed to build a target, its defaults and the gateway client.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifySettings {
    pub device_id: String,
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_icon_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_group_type: Option<String>,
    /// Override of the gateway endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl NotifySettings {
    pub fn new(device_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            token: token.into(),
            name: None,
            default_title: None,
            default_icon_url: None,
            default_group_type: None,
            base_url: None,
            timeout_secs: None,
        }
    }

    /// Build the target these settings describe
    pub fn target(&self) -> Result<NotifyTarget> {
        let target = NotifyTarget::new(self.device_id.trim(), self.token.trim())?;
        Ok(match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => target.with_display_name(name),
            _ => target,
        })
    }

    /// Per-target defaults from the options fields
    pub fn defaults(&self) -> NotifyDefaults {
        NotifyDefaults {
            title: non_blank(&self.default_title),
            icon_url: non_blank(&self.default_icon_url),
            group_type: non_blank(&self.default_group_type),
        }
    }

    /// Gateway client configuration
    pub fn gateway_config(&self) -> GatewayConfig {
        let mut builder = GatewayConfig::builder();
        if let Some(base_url) = non_blank(&self.base_url) {
            builder = builder.base_url(base_url);
        }
        if let Some(secs) = self.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        builder.build()
    }
}

impl Validate for NotifySettings {
    fn validate(&self) -> Result<()> {
        ConfigValidator::not_empty(&self.device_id, "device_id")?;
        ConfigValidator::not_empty(&self.token, "token")?;

        if let Some(icon_url) = non_blank(&self.default_icon_url) {
            ConfigValidator::is_https_url(&icon_url, "default_icon_url")?;
        }
        if let Some(base_url) = non_blank(&self.base_url) {
            ConfigValidator::is_url(&base_url, "base_url")?;
        }
        if let Some(secs) = self.timeout_secs {
            ConfigValidator::in_range(secs, 1, MAX_TIMEOUT_SECS, "timeout_secs")?;
        }

        Ok(())
    }
}

impl fmt::Debug for NotifySettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotifySettings")
            .field("device_id", &self.device_id)
            .field("token", &"<redacted>")
            .field("name", &self.name)
            .field("default_title", &self.default_title)
            .field("default_icon_url", &self.default_icon_url)
            .field("default_group_type", &self.default_group_type)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
