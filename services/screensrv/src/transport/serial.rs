//! Serial Link Implementation
//!
//! Receive-only serial port link to the position sensor (8N1, no flow
//! control). Reads are bounded by a short timeout so the link manager can
//! tell "quiet line" apart from "device gone".

use std::io::ErrorKind;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::AsyncReadExt;
use tokio::time::timeout;
use tokio_serial::{SerialPortBuilderExt, SerialStream};
use tracing::{debug, info};

use super::discovery::candidate_from_info;
use super::traits::{Link, LinkError, PortCandidate};
use crate::protocol::DEFAULT_BAUD_RATE;

/// Serial port settings
#[derive(Debug, Clone)]
pub struct SerialLinkConfig {
    /// Baud rate
    pub baud_rate: u32,
    /// Upper bound for a single read
    pub read_timeout: Duration,
}

impl Default for SerialLinkConfig {
    fn default() -> Self {
        Self {
            baud_rate: DEFAULT_BAUD_RATE,
            read_timeout: Duration::from_millis(50),
        }
    }
}

/// Serial link backed by `tokio-serial`
#[derive(Debug)]
pub struct SerialLink {
    config: SerialLinkConfig,
    port: Option<SerialStream>,
    port_name: Option<String>,
}

impl SerialLink {
    pub fn new(config: SerialLinkConfig) -> Self {
        Self {
            config,
            port: None,
            port_name: None,
        }
    }

    /// Name of the currently open port
    pub fn port_name(&self) -> Option<&str> {
        self.port_name.as_deref()
    }

    pub fn config(&self) -> &SerialLinkConfig {
        &self.config
    }
}

#[async_trait]
impl Link for SerialLink {
    fn kind(&self) -> &str {
        "serial"
    }

    fn list_ports(&self) -> Result<Vec<PortCandidate>, LinkError> {
        let ports =
            tokio_serial::available_ports().map_err(|e| LinkError::Enumeration(e.to_string()))?;
        Ok(ports.iter().map(candidate_from_info).collect())
    }

    async fn open(&mut self, port: &str) -> Result<(), LinkError> {
        self.close().await;

        debug!("Opening serial port: {} @ {} baud", port, self.config.baud_rate);

        let open_failed = |e: tokio_serial::Error| LinkError::OpenFailed {
            port: port.to_string(),
            reason: e.to_string(),
        };

        #[cfg_attr(not(unix), allow(unused_mut))]
        let mut stream = tokio_serial::new(port, self.config.baud_rate)
            .data_bits(tokio_serial::DataBits::Eight)
            .parity(tokio_serial::Parity::None)
            .stop_bits(tokio_serial::StopBits::One)
            .flow_control(tokio_serial::FlowControl::None)
            .timeout(self.config.read_timeout)
            .open_native_async()
            .map_err(open_failed)?;

        #[cfg(unix)]
        stream.set_exclusive(false).map_err(open_failed)?;

        self.port = Some(stream);
        self.port_name = Some(port.to_string());
        info!("Opened serial port: {}", port);
        Ok(())
    }

    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, LinkError> {
        let port = self.port.as_mut().ok_or(LinkError::NotOpen)?;

        match timeout(self.config.read_timeout, port.read(buf)).await {
            Ok(Ok(n)) => {
                if n > 0 {
                    debug!(hex_data = %buf[..n].iter().map(|b| format!("{b:02X}")).collect::<Vec<_>>().join(" "), length = n, "[Serial Link] Raw bytes");
                }
                Ok(n)
            },
            Ok(Err(e))
                if matches!(
                    e.kind(),
                    ErrorKind::TimedOut | ErrorKind::WouldBlock | ErrorKind::Interrupted
                ) =>
            {
                Ok(0)
            },
            Ok(Err(e)) => Err(LinkError::ReadFailed(e.to_string())),
            // Quiet line
            Err(_) => Ok(0),
        }
    }

    async fn close(&mut self) {
        if self.port.take().is_some() {
            if let Some(name) = self.port_name.take() {
                info!("Closed serial port: {}", name);
            }
        }
    }

    fn is_open(&self) -> bool {
        self.port.is_some()
    }
}
