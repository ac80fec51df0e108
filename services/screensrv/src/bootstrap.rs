//! Command line and startup helpers

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::config::{DEFAULT_BIND_ADDRESS, DEFAULT_CONFIG_FILE, DEFAULT_PORT};
use crate::error::{Result, ScreenSrvError};
use crate::protocol::DEFAULT_BAUD_RATE;
use crate::service::LinkSettings;
use common::service_bootstrap::ServiceInfo;

/// Command-line arguments for screensrv
#[derive(Parser, Debug, Clone)]
#[command(
    name = "screensrv",
    version = env!("CARGO_PKG_VERSION"),
    about = "Screen Position Service",
    long_about = None
)]
pub struct Args {
    /// Link configuration file, created with defaults when missing
    #[arg(short = 'c', long, env = "SCREENSRV_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Bind address for the API server
    #[arg(short = 'b', long, env = "SCREENSRV_BIND", default_value = DEFAULT_BIND_ADDRESS)]
    pub bind: String,

    /// Serial port used when no port matches the search attribute
    #[arg(short = 'p', long, env = "SCREENSRV_PORT")]
    pub port: Option<String>,

    /// Serial baud rate
    #[arg(long, default_value_t = DEFAULT_BAUD_RATE)]
    pub baud_rate: u32,

    /// Delay between connect attempts in milliseconds
    #[arg(long, default_value_t = 3000)]
    pub reconnect_delay_ms: u64,

    /// Log level or filter directive (trace, debug, info, warn, error)
    #[arg(short = 'l', long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Root directory for log files
    #[arg(long, env = "SCREENSRV_LOG_DIR", default_value = "logs")]
    pub log_dir: PathBuf,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl Args {
    pub fn link_settings(&self) -> LinkSettings {
        LinkSettings {
            fallback_port: self.port.clone().filter(|p| !p.is_empty()),
            baud_rate: self.baud_rate,
            reconnect_delay: Duration::from_millis(self.reconnect_delay_ms),
            ..LinkSettings::default()
        }
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.bind.parse().map_err(|e| {
            ScreenSrvError::config(format!("Invalid bind address '{}': {}", self.bind, e))
        })
    }

    /// Console plus daily rolling files under `{log_dir}/screensrv`
    pub fn initialize_logging(&self, service: &ServiceInfo) -> anyhow::Result<()> {
        common::service_bootstrap::init_logging(
            service,
            &self.log_level,
            Some(self.log_dir.clone()),
            !self.no_color,
        )
    }
}

pub fn service_info() -> ServiceInfo {
    ServiceInfo::new(
        "screensrv",
        env!("CARGO_PKG_VERSION"),
        "Screen Position Service - serial position sensor over HTTP",
        DEFAULT_PORT,
    )
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;

    #[test]
    fn test_link_settings_from_args() {
        let args = Args::try_parse_from([
            "screensrv",
            "--port",
            "COM10",
            "--baud-rate",
            "19200",
            "--reconnect-delay-ms",
            "500",
        ])
        .unwrap();

        let settings = args.link_settings();
        assert_eq!(settings.fallback_port.as_deref(), Some("COM10"));
        assert_eq!(settings.baud_rate, 19200);
        assert_eq!(settings.reconnect_delay, Duration::from_millis(500));
        assert_eq!(settings.idle_delay, Duration::from_millis(1));
        assert_eq!(settings.serial_config().baud_rate, 19200);
    }

    #[test]
    fn test_empty_port_is_no_fallback() {
        let args = Args::try_parse_from(["screensrv", "--port", ""]).unwrap();
        assert!(args.link_settings().fallback_port.is_none());
    }

    #[test]
    fn test_bind_addr() {
        let args =
            Args::try_parse_from(["screensrv", "--bind", "127.0.0.1:8080", "--no-color"]).unwrap();
        assert_eq!(args.bind_addr().unwrap(), "127.0.0.1:8080".parse().unwrap());
        assert!(args.no_color);

        let args = Args::try_parse_from(["screensrv", "--bind", "localhost"]).unwrap();
        assert!(matches!(
            args.bind_addr(),
            Err(ScreenSrvError::ConfigError(_))
        ));
    }

    #[test]
    fn test_service_info() {
        let info = service_info();
        assert_eq!(info.name, "screensrv");
        assert_eq!(info.default_port, 5000);
    }
}
