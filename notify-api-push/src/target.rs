//! Notification target (device or group identity).

use std::fmt;

use crate::{NotifyError, Result};

/// Device or group a dispatcher sends to, together with its API token.
///
/// Immutable once built. Changing credentials means building a new target
/// and validating it again.
///
/// A target carries its token, so it cannot be serialized:
///
/// ```compile_fail
/// let target = notify_api_push::NotifyTarget::new("abc123", "tok").unwrap();
/// serde_json::to_string(&target).unwrap();
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct NotifyTarget {
    device_id: String,
    token: String,
    display_name: Option<String>,
}

impl NotifyTarget {
    /// Create a new target. Both values must be non-empty.
    pub fn new(device_id: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let device_id = device_id.into();
        let token = token.into();
        check_credentials(&device_id, &token)?;

        Ok(Self {
            device_id,
            token,
            display_name: None,
        })
    }

    /// Set the display name.
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Device or group identifier.
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// API token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Display name, if one was given.
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Title for the configured entry.
    ///
    /// Falls back to `Notify! Alert (<DEVICE_ID>)` when no name was given.
    pub fn display_title(&self) -> String {
        match self.display_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("Notify! Alert ({})", self.device_id.to_uppercase()),
        }
    }

    /// Name under which a host exposes this target as a notify action.
    pub fn service_name(&self) -> String {
        let slug: String = self
            .display_title()
            .to_lowercase()
            .replace(' ', "_")
            .chars()
            .filter(|c| !matches!(c, '!' | '(' | ')' | '.'))
            .collect();

        if slug.is_empty() {
            let prefix: String = self.device_id.chars().take(8).collect();
            format!("notify_api_{}", prefix)
        } else {
            slug
        }
    }
}

impl fmt::Debug for NotifyTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotifyTarget")
            .field("device_id", &self.device_id)
            .field("token", &"<redacted>")
            .field("display_name", &self.display_name)
            .finish()
    }
}

pub(crate) fn check_credentials(device_id: &str, token: &str) -> Result<()> {
    if device_id.is_empty() {
        return Err(NotifyError::EmptyDeviceId);
    }
    if token.is_empty() {
        return Err(NotifyError::EmptyToken);
    }
    Ok(())
}
