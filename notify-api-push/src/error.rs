//! Notify error types.

use thiserror::Error;

use crate::ValidationResult;

/// Result type for notify operations.
pub type Result<T> = std::result::Result<T, NotifyError>;

/// Notify errors.
///
/// Gateway rejections and transport failures are not errors: they come back
/// as [`DispatchResult`](crate::DispatchResult) or [`ValidationResult`]
/// values. Only caller mistakes and local setup problems land here.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// Message body was empty.
    #[error("Notification message must not be empty")]
    EmptyMessage,

    /// Device or group identifier was empty.
    #[error("Device or group ID must not be empty")]
    EmptyDeviceId,

    /// API token was empty.
    #[error("API token must not be empty")]
    EmptyToken,

    /// Icon URL did not use https.
    #[error("Icon URL must use https: {0}")]
    InsecureIconUrl(String),

    /// Icon URL could not be parsed.
    #[error("Invalid icon URL: {0}")]
    InvalidIconUrl(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Setup refused because the credential check did not pass.
    #[error("Setup failed: {0}")]
    Setup(ValidationResult),
}

impl NotifyError {
    /// Check if this error is a caller precondition violation.
    ///
    /// These are raised before anything is sent over the wire.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::EmptyMessage
                | Self::EmptyDeviceId
                | Self::EmptyToken
                | Self::InsecureIconUrl(_)
                | Self::InvalidIconUrl(_)
        )
    }

    /// Get the validation result if setup was refused.
    pub fn validation_result(&self) -> Option<&ValidationResult> {
        if let Self::Setup(result) = self {
            Some(result)
        } else {
            None
        }
    }
}

impl From<serde_json::Error> for NotifyError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<url::ParseError> for NotifyError {
    fn from(err: url::ParseError) -> Self {
        Self::Config(format!("Invalid gateway URL: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precondition_grouping() {
        assert!(NotifyError::EmptyMessage.is_precondition());
        assert!(NotifyError::EmptyDeviceId.is_precondition());
        assert!(NotifyError::EmptyToken.is_precondition());
        assert!(NotifyError::InsecureIconUrl("http://x".into()).is_precondition());
        assert!(!NotifyError::Config("bad".into()).is_precondition());
    }

    #[test]
    fn test_setup_error_exposes_result() {
        let err = NotifyError::Setup(ValidationResult::Unreachable {
            detail: "down".into(),
        });
        assert!(matches!(
            err.validation_result(),
            Some(ValidationResult::Unreachable { .. })
        ));
        assert!(err.to_string().contains("down"));
    }
}
