//! Service bootstrap utilities
//!
//! Startup banner and logging initialization shared by the services.

use std::path::PathBuf;

use crate::logging::{self, LogConfig};
use tracing::info;

/// Service metadata for startup
pub struct ServiceInfo {
    /// Service name (e.g., "screensrv")
    pub name: String,
    /// Service version
    pub version: String,
    /// Service description
    pub description: String,
    /// Default HTTP port
    pub default_port: u16,
}

impl ServiceInfo {
    /// Create new service info
    ///
    /// The version is taken from the calling crate via the `version` argument
    /// so the banner reports the service version, not this library's.
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        description: impl Into<String>,
        default_port: u16,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            description: description.into(),
            default_port,
        }
    }
}

/// Print the startup banner
pub fn print_startup_banner(service: &ServiceInfo) {
    let banner = r#"
 ███████╗ ██████╗██████╗ ███████╗███████╗███╗   ██╗
 ██╔════╝██╔════╝██╔══██╗██╔════╝██╔════╝████╗  ██║
 ███████╗██║     ██████╔╝█████╗  █████╗  ██╔██╗ ██║
 ╚════██║██║     ██╔══██╗██╔══╝  ██╔══╝  ██║╚██╗██║
 ███████║╚██████╗██║  ██║███████╗███████╗██║ ╚████║
 ╚══════╝ ╚═════╝╚═╝  ╚═╝╚══════╝╚══════╝╚═╝  ╚═══╝
"#;

    info!("{}", banner);
    info!(" {} v{}", service.name.to_uppercase(), service.version);
    info!(" {}", service.description);
    info!(" Default Port: {}", service.default_port);
    info!("");
}

/// Initialize logging for a service
///
/// * `level` - filter directive, usually from `--log-level` / `RUST_LOG`
/// * `log_dir` - root log directory; files go to `{log_dir}/{service}`.
///   `None` disables file output.
pub fn init_logging(
    service: &ServiceInfo,
    level: &str,
    log_dir: Option<PathBuf>,
    ansi: bool,
) -> anyhow::Result<()> {
    let config = LogConfig {
        service_name: service.name.clone(),
        log_dir: log_dir.map(|dir| dir.join(&service.name)),
        level: level.to_string(),
        ansi,
    };

    logging::init_with_config(&config)
}
