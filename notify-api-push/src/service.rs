//! Notifier trait and the target-bound notify service.

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use crate::{
    CredentialValidator, DispatchResult, NotificationRequest, NotifyDefaults, NotifyError,
    NotifyTarget, Result, ServiceCall, ValidationResult,
};

/// Anything that can deliver a notification to a target.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send one notification. Exactly one delivery attempt per call.
    async fn send(
        &self,
        target: &NotifyTarget,
        request: &NotificationRequest,
    ) -> Result<DispatchResult>;
}

/// A notify action bound to one target.
///
/// Hosts map their own service registration onto [`NotifyService::notify`].
/// The service keeps no state besides the target and its defaults.
pub struct NotifyService {
    notifier: Arc<dyn Notifier>,
    target: NotifyTarget,
    defaults: NotifyDefaults,
}

impl NotifyService {
    /// Bind a notifier to a target.
    pub fn new(notifier: Arc<dyn Notifier>, target: NotifyTarget) -> Self {
        Self {
            notifier,
            target,
            defaults: NotifyDefaults::default(),
        }
    }

    /// Set per-target defaults.
    pub fn with_defaults(mut self, defaults: NotifyDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Validate the target, then bind it.
    ///
    /// Anything but [`ValidationResult::Valid`] is returned as
    /// [`NotifyError::Setup`] so the pair never gets used or persisted.
    pub async fn setup(
        validator: &CredentialValidator,
        notifier: Arc<dyn Notifier>,
        target: NotifyTarget,
        defaults: NotifyDefaults,
    ) -> Result<Self> {
        match validator.validate_target(&target).await? {
            ValidationResult::Valid { title } => {
                debug!(title = %title, service = %target.service_name(), "Notify service ready");
                Ok(Self::new(notifier, target).with_defaults(defaults))
            }
            other => Err(NotifyError::Setup(other)),
        }
    }

    /// Get the bound target.
    pub fn target(&self) -> &NotifyTarget {
        &self.target
    }

    /// Get the defaults.
    pub fn defaults(&self) -> &NotifyDefaults {
        &self.defaults
    }

    /// Name a host should expose this service under.
    pub fn service_name(&self) -> String {
        self.target.service_name()
    }

    /// Handle an inbound service call.
    pub async fn notify(&self, call: ServiceCall) -> Result<DispatchResult> {
        let request = NotificationRequest::from_call(call).with_defaults(&self.defaults);
        self.notifier.send(&self.target, &request).await
    }

    /// Send a prepared request. Defaults are applied here too.
    pub async fn send(&self, request: NotificationRequest) -> Result<DispatchResult> {
        let request = request.with_defaults(&self.defaults);
        self.notifier.send(&self.target, &request).await
    }
}

impl fmt::Debug for NotifyService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotifyService")
            .field("target", &self.target)
            .field("defaults", &self.defaults)
            .finish_non_exhaustive()
    }
}
