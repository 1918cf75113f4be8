// Notify API - push notifications through the Notify gateway
//
// This library validates device credentials, builds notification requests
// and dispatches them over HTTPS, reporting a typed result for every call.

// Re-export the dispatcher
pub use notify_api_push::*;

// Re-export optional crates
#[cfg(feature = "config")]
pub use notify_api_config;

// Prelude for common imports
pub mod prelude {
    pub use notify_api_push::prelude::*;

    #[cfg(feature = "config")]
    pub use notify_api_config::{ConfigManager, NotifySettings};
}
