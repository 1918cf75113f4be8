//! Dispatch and validation outcomes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Longest response body excerpt kept in a result detail.
pub(crate) const MAX_DETAIL_LEN: usize = 512;

/// How a single send ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchOutcome {
    /// Gateway accepted the notification (2xx).
    Delivered,
    /// Gateway refused the request (4xx).
    RejectedByGateway,
    /// No usable response: DNS, connect, TLS, timeout or a non-4xx error status.
    TransportFailure,
}

/// Outcome of one send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchResult {
    /// Classified outcome.
    pub outcome: DispatchOutcome,
    /// HTTP status, when a response arrived.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Human readable diagnostic.
    pub detail: String,
}

impl DispatchResult {
    pub(crate) fn delivered(status: u16) -> Self {
        Self {
            outcome: DispatchOutcome::Delivered,
            status: Some(status),
            detail: format!("Gateway accepted notification ({})", status),
        }
    }

    pub(crate) fn rejected(status: u16, body: &str) -> Self {
        let detail = if body.trim().is_empty() {
            format!("Gateway returned status {}", status)
        } else {
            excerpt(body)
        };
        Self {
            outcome: DispatchOutcome::RejectedByGateway,
            status: Some(status),
            detail,
        }
    }

    pub(crate) fn transport(status: Option<u16>, detail: impl Into<String>) -> Self {
        Self {
            outcome: DispatchOutcome::TransportFailure,
            status,
            detail: detail.into(),
        }
    }

    /// Whether the gateway accepted the notification.
    pub fn is_delivered(&self) -> bool {
        self.outcome == DispatchOutcome::Delivered
    }
}

impl fmt::Display for DispatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "{:?} ({}): {}", self.outcome, status, self.detail),
            None => write!(f, "{:?}: {}", self.outcome, self.detail),
        }
    }
}

/// Result of a credential check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum ValidationResult {
    /// Pair is usable. `title` is the entry title to persist it under.
    Valid {
        /// Entry title.
        title: String,
    },
    /// Gateway refused the pair (401, 403 or unknown device).
    InvalidCredentials {
        /// Diagnostic.
        detail: String,
    },
    /// Gateway could not be reached or answered unexpectedly.
    Unreachable {
        /// Diagnostic.
        detail: String,
    },
}

impl ValidationResult {
    /// Whether the pair may be persisted.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }

    /// Short error key for setup forms.
    pub fn error_key(&self) -> Option<&'static str> {
        match self {
            Self::Valid { .. } => None,
            Self::InvalidCredentials { .. } => Some("invalid_auth"),
            Self::Unreachable { .. } => Some("cannot_connect"),
        }
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid { title } => write!(f, "valid ({})", title),
            Self::InvalidCredentials { detail } => write!(f, "invalid credentials: {}", detail),
            Self::Unreachable { detail } => write!(f, "unreachable: {}", detail),
        }
    }
}

/// Trim a response body to [`MAX_DETAIL_LEN`] bytes without splitting a char.
pub(crate) fn excerpt(body: &str) -> String {
    let body = body.trim();
    if body.len() <= MAX_DETAIL_LEN {
        return body.to_string();
    }
    let mut end = MAX_DETAIL_LEN;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…", &body[..end])
}
