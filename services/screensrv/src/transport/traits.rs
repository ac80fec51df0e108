//! Link layer traits
//!
//! The link manager talks to the sensor only through [`Link`], so the
//! reconnect state machine runs the same against a serial port and against
//! the scripted mock used in tests.

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// Link layer error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinkError {
    /// Opening the port failed (absent, busy, permission denied)
    #[error("Failed to open {port}: {reason}")]
    OpenFailed { port: String, reason: String },

    /// Read attempted without an open port
    #[error("Serial port not open")]
    NotOpen,

    /// Device disconnected or I/O failure while reading
    #[error("Read failed: {0}")]
    ReadFailed(String),

    /// Listing system ports failed
    #[error("Port enumeration failed: {0}")]
    Enumeration(String),
}

/// A serial port as seen by discovery
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortCandidate {
    /// OS port name (`/dev/ttyUSB0`, `COM10`)
    pub name: String,
    /// Human readable description (`USB-SERIAL CH340 (COM10)`)
    pub description: String,
}

impl PortCandidate {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Physical connection to the sensor
#[async_trait]
pub trait Link: Send + fmt::Debug {
    /// Link type identifier
    fn kind(&self) -> &str;

    /// Ports currently present on the system
    fn list_ports(&self) -> Result<Vec<PortCandidate>, LinkError>;

    /// Open `port`, closing any previously open handle first
    async fn open(&mut self, port: &str) -> Result<(), LinkError>;

    /// Read available bytes into `buf`
    ///
    /// Returns `Ok(0)` when nothing arrived within the read timeout. An error
    /// means the link is unusable and must be reopened.
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, LinkError>;

    /// Close the handle; no-op when already closed
    async fn close(&mut self);

    fn is_open(&self) -> bool;
}
