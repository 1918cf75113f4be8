//! Notification request and gateway payload types.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::{NotifyError, Result};

/// One outbound notification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRequest {
    /// Message body.
    pub message: String,
    /// Notification title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Icon URL. Must use https.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    /// Grouping key. Notifications sharing it are threaded by the gateway.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_type: Option<String>,
}

impl NotificationRequest {
    /// Create a new notification with a message body.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }

    /// Create a builder.
    pub fn builder() -> NotificationBuilder {
        NotificationBuilder::new()
    }

    /// Map an inbound service call.
    pub fn from_call(call: ServiceCall) -> Self {
        let data = call.data.unwrap_or_default();
        Self {
            message: call.message,
            title: call.title,
            icon_url: data.icon_url,
            group_type: data.group_type,
        }
    }

    /// Set the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the icon URL.
    pub fn icon_url(mut self, url: impl Into<String>) -> Self {
        self.icon_url = Some(url.into());
        self
    }

    /// Set the group key.
    pub fn group_type(mut self, group: impl Into<String>) -> Self {
        self.group_type = Some(group.into());
        self
    }

    /// Fill absent fields from per-target defaults.
    ///
    /// Values set on the request are kept as they are.
    pub fn with_defaults(mut self, defaults: &NotifyDefaults) -> Self {
        if non_blank(&self.title).is_none() {
            self.title = non_blank(&defaults.title).map(str::to_string);
        }
        if non_blank(&self.icon_url).is_none() {
            self.icon_url = non_blank(&defaults.icon_url).map(str::to_string);
        }
        if non_blank(&self.group_type).is_none() {
            self.group_type = non_blank(&defaults.group_type).map(str::to_string);
        }
        self
    }

    /// Check caller preconditions: non-empty message, https icon URL.
    pub fn validate(&self) -> Result<()> {
        if self.message.is_empty() {
            return Err(NotifyError::EmptyMessage);
        }
        if let Some(icon_url) = non_blank(&self.icon_url) {
            check_icon_url(icon_url)?;
        }
        Ok(())
    }

    /// Build the wire payload. Blank optional fields are left out.
    pub fn payload(&self) -> GatewayPayload<'_> {
        GatewayPayload {
            text: &self.message,
            title: non_blank(&self.title),
            icon_url: non_blank(&self.icon_url),
            group_type: non_blank(&self.group_type),
        }
    }
}

/// Ensure an icon URL parses and uses https.
pub fn check_icon_url(value: &str) -> Result<()> {
    let url = Url::parse(value).map_err(|e| NotifyError::InvalidIconUrl(format!("{}: {}", value, e)))?;
    if url.scheme() != "https" {
        return Err(NotifyError::InsecureIconUrl(value.to_string()));
    }
    Ok(())
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// Builder for notifications.
#[derive(Debug, Default)]
pub struct NotificationBuilder {
    request: NotificationRequest,
}

impl NotificationBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the message.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.request.message = message.into();
        self
    }

    /// Set the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.request.title = Some(title.into());
        self
    }

    /// Set the icon URL.
    pub fn icon_url(mut self, url: impl Into<String>) -> Self {
        self.request.icon_url = Some(url.into());
        self
    }

    /// Set the group key.
    pub fn group_type(mut self, group: impl Into<String>) -> Self {
        self.request.group_type = Some(group.into());
        self
    }

    /// Build and check the notification.
    pub fn build(self) -> Result<NotificationRequest> {
        self.request.validate()?;
        Ok(self.request)
    }
}

/// Per-target defaults applied when a call leaves a field out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifyDefaults {
    /// Default title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Default icon URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    /// Default group key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_type: Option<String>,
}

impl NotifyDefaults {
    /// Whether no default is set.
    pub fn is_empty(&self) -> bool {
        non_blank(&self.title).is_none()
            && non_blank(&self.icon_url).is_none()
            && non_blank(&self.group_type).is_none()
    }
}

/// Inbound notify call as a host hands it over.
///
/// ```json
/// {"message": "Front door opened", "title": "Security",
///  "data": {"icon_url": "https://example.com/door.png", "group_type": "security"}}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceCall {
    /// Message body.
    pub message: String,
    /// Title.
    #[serde(default)]
    pub title: Option<String>,
    /// Presentation extras.
    #[serde(default)]
    pub data: Option<ServiceData>,
}

/// Extras carried in a service call's `data` field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceData {
    /// Icon URL.
    #[serde(default)]
    pub icon_url: Option<String>,
    /// Group key.
    #[serde(default)]
    pub group_type: Option<String>,
}

/// JSON body posted to the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayPayload<'a> {
    /// Message body.
    pub text: &'a str,
    /// Title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<&'a str>,
    /// Icon URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<&'a str>,
    /// Group key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_type: Option<&'a str>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_omits_absent_fields() {
        let request = NotificationRequest::new("Front door opened")
            .title("Security")
            .group_type("security");

        let body = serde_json::to_value(request.payload()).unwrap();
        assert_eq!(
            body,
            json!({"text": "Front door opened", "title": "Security", "groupType": "security"})
        );
        assert!(body.get("iconUrl").is_none());
    }

    #[test]
    fn test_payload_without_title_has_no_title_key() {
        let body = serde_json::to_value(NotificationRequest::new("hi").payload()).unwrap();
        assert_eq!(body, json!({"text": "hi"}));
    }

    #[test]
    fn test_blank_fields_are_dropped() {
        let request = NotificationRequest::new("hi").title("").group_type("  ");
        let body = serde_json::to_value(request.payload()).unwrap();
        assert_eq!(body, json!({"text": "hi"}));
    }

    #[test]
    fn test_icon_url_passed_verbatim() {
        let url = "https://cdn.example.com/icons/door.png?v=2";
        let request = NotificationRequest::new("hi").icon_url(url);
        request.validate().unwrap();
        assert_eq!(request.payload().icon_url, Some(url));
    }

    #[test]
    fn test_empty_message_rejected() {
        let err = NotificationRequest::new("").validate().unwrap_err();
        assert!(matches!(err, NotifyError::EmptyMessage));
    }

    #[test]
    fn test_http_icon_rejected() {
        let err = NotificationRequest::new("hi")
            .icon_url("http://example.com/a.png")
            .validate()
            .unwrap_err();
        assert!(matches!(err, NotifyError::InsecureIconUrl(_)));

        let err = NotificationRequest::new("hi")
            .icon_url("not a url")
            .validate()
            .unwrap_err();
        assert!(matches!(err, NotifyError::InvalidIconUrl(_)));
    }

    #[test]
    fn test_builder_validates() {
        assert!(NotificationRequest::builder().title("t").build().is_err());

        let request = NotificationRequest::builder()
            .message("Front door opened")
            .title("Security")
            .build()
            .unwrap();
        assert_eq!(request.title.as_deref(), Some("Security"));
    }

    #[test]
    fn test_from_call_maps_data() {
        let call: ServiceCall = serde_json::from_value(json!({
            "message": "Front door opened",
            "title": "Security",
            "data": {"icon_url": "https://example.com/door.png", "group_type": "security"}
        }))
        .unwrap();

        let request = NotificationRequest::from_call(call);
        assert_eq!(request.message, "Front door opened");
        assert_eq!(request.title.as_deref(), Some("Security"));
        assert_eq!(request.icon_url.as_deref(), Some("https://example.com/door.png"));
        assert_eq!(request.group_type.as_deref(), Some("security"));
    }

    #[test]
    fn test_from_call_without_data() {
        let call: ServiceCall = serde_json::from_value(json!({"message": "hi"})).unwrap();
        assert_eq!(NotificationRequest::from_call(call), NotificationRequest::new("hi"));
    }

    #[test]
    fn test_defaults_fill_only_missing_fields() {
        let defaults = NotifyDefaults {
            title: Some("Home".into()),
            icon_url: Some("https://example.com/home.png".into()),
            group_type: Some("home".into()),
        };

        let request = NotificationRequest::new("hi")
            .title("Security")
            .with_defaults(&defaults);

        assert_eq!(request.title.as_deref(), Some("Security"));
        assert_eq!(request.icon_url.as_deref(), Some("https://example.com/home.png"));
        assert_eq!(request.group_type.as_deref(), Some("home"));
    }

    #[test]
    fn test_blank_defaults_ignored() {
        let defaults = NotifyDefaults {
            title: Some(String::new()),
            ..Default::default()
        };
        assert!(defaults.is_empty());

        let request = NotificationRequest::new("hi").with_defaults(&defaults);
        assert_eq!(request.title, None);
    }
}
