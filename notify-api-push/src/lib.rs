//! # Notify API Push
//!
//! Sends push notifications through the Notify gateway
//! (`POST /notify-json/{device_id}?token={token}`).
//!
//! ## Features
//!
//! - **Credential check**: probe a device id and token before storing them
//! - **Dispatch**: one HTTPS request per notification, classified into
//!   delivered, rejected or transport failure
//! - **Service binding**: a target-bound notify action with per-target defaults
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use notify_api_push::{
//!     CredentialValidator, GatewayConfig, NotificationDispatcher, NotificationRequest,
//!     NotifyTarget, ValidationResult,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let dispatcher = NotificationDispatcher::new(GatewayConfig::default())?;
//!     let validator = CredentialValidator::from_dispatcher(dispatcher.clone());
//!
//!     let target = NotifyTarget::new("abc123", "my-token")?;
//!     if let ValidationResult::Valid { title } = validator.validate_target(&target).await? {
//!         println!("configured {}", title);
//!     }
//!
//!     let notification = NotificationRequest::new("Front door opened")
//!         .title("Security")
//!         .group_type("security");
//!
//!     let result = dispatcher.send(&target, &notification).await?;
//!     println!("{}", result);
//!     Ok(())
//! }
//! ```

mod config;
mod dispatcher;
mod error;
mod notification;
mod outcome;
mod service;
mod target;
mod validator;

pub use config::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, GatewayConfig, GatewayConfigBuilder};
pub use dispatcher::NotificationDispatcher;
pub use error::{NotifyError, Result};
pub use notification::{
    GatewayPayload, NotificationBuilder, NotificationRequest, NotifyDefaults, ServiceCall,
    ServiceData, check_icon_url,
};
pub use outcome::{DispatchOutcome, DispatchResult, ValidationResult};
pub use service::{Notifier, NotifyService};
pub use target::NotifyTarget;
pub use validator::{CredentialValidator, PROBE_TEXT, PROBE_TITLE};

/// Prelude for common imports.
///
/// ```
/// use notify_api_push::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::GatewayConfig;
    pub use crate::dispatcher::NotificationDispatcher;
    pub use crate::error::{NotifyError, Result};
    pub use crate::notification::{NotificationRequest, NotifyDefaults, ServiceCall};
    pub use crate::outcome::{DispatchOutcome, DispatchResult, ValidationResult};
    pub use crate::service::{Notifier, NotifyService};
    pub use crate::target::NotifyTarget;
    pub use crate::validator::CredentialValidator;
}
