//! Shared basic library for the screen position services
//!
//! Provides functions shared by the service binaries:
//! - logging initialization and HTTP access logging
//! - startup banner
//! - shutdown signal handling

pub mod logging;
pub mod service_bootstrap;
pub mod shutdown;

pub use service_bootstrap::ServiceInfo;
pub use shutdown::{wait_for_shutdown, ShutdownSignal};
