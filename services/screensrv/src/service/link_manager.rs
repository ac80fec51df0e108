//! Link manager
//!
//! Owns the sensor link and drives it through
//! `Disconnected -> Connecting -> Connected`. Bytes read while connected are
//! fed to the frame decoder and every valid reading is written to the
//! position store. Link failures are retried forever with a fixed delay;
//! frame and parse errors are logged and dropped without touching the
//! connection.

use std::time::Duration;

use tracing::{debug, error, info, warn};

use super::status::ConnectionState;
use crate::config::LinkConfig;
use crate::context::AppContext;
use crate::protocol::{FrameDecoder, FrameError, FrameResult, DEFAULT_BAUD_RATE};
use crate::reading::DecodedReading;
use crate::transport::{select_port, Link, SerialLinkConfig};

/// Runtime link parameters
#[derive(Debug, Clone)]
pub struct LinkSettings {
    /// Port tried when discovery finds nothing and no port was open before
    pub fallback_port: Option<String>,
    pub baud_rate: u32,
    /// Wait after a failed connect attempt
    pub reconnect_delay: Duration,
    /// Wait after a read that returned no bytes
    pub idle_delay: Duration,
    pub read_timeout: Duration,
    pub read_buffer_size: usize,
}

impl Default for LinkSettings {
    fn default() -> Self {
        Self {
            fallback_port: None,
            baud_rate: DEFAULT_BAUD_RATE,
            reconnect_delay: Duration::from_secs(3),
            idle_delay: Duration::from_millis(1),
            read_timeout: Duration::from_millis(50),
            read_buffer_size: 64,
        }
    }
}

impl LinkSettings {
    /// Serial port parameters derived from these settings
    pub fn serial_config(&self) -> SerialLinkConfig {
        SerialLinkConfig {
            baud_rate: self.baud_rate,
            read_timeout: self.read_timeout,
        }
    }
}

/// Reconnecting read loop over a [`Link`]
#[derive(Debug)]
pub struct LinkManager<L: Link> {
    link: L,
    decoder: FrameDecoder,
    config: LinkConfig,
    settings: LinkSettings,
    context: AppContext,
    state: ConnectionState,
    /// Last port opened successfully
    last_port: Option<String>,
    read_buf: Vec<u8>,
}

impl<L: Link> LinkManager<L> {
    pub fn new(link: L, config: LinkConfig, settings: LinkSettings, context: AppContext) -> Self {
        let read_buf = vec![0u8; settings.read_buffer_size.max(1)];
        Self {
            link,
            decoder: FrameDecoder::new(),
            config,
            settings,
            context,
            state: ConnectionState::Disconnected,
            last_port: None,
            read_buf,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Run one iteration of the state machine and return the resulting state
    pub async fn step(&mut self) -> ConnectionState {
        match self.state {
            ConnectionState::Disconnected | ConnectionState::Connecting => self.connect().await,
            ConnectionState::Connected => self.poll().await,
        }
        self.state
    }

    /// Drive the link until the task is dropped
    pub async fn run(mut self) {
        info!(
            "Link manager started ({} link, searching for '{}')",
            self.link.kind(),
            self.config.port_search_attribute
        );
        loop {
            self.step().await;
        }
    }

    async fn connect(&mut self) {
        self.transition(ConnectionState::Connecting);
        self.context
            .link
            .update_stats(|stats| stats.connect_attempts += 1);

        let Some(port) = self.resolve_port() else {
            warn!(
                "No serial port matching '{}' and no fallback port, retrying in {:?}",
                self.config.port_search_attribute, self.settings.reconnect_delay
            );
            self.back_off().await;
            return;
        };

        match self.link.open(&port).await {
            Ok(()) => {
                // A partial frame from the previous connection can never complete
                self.decoder.reset();
                info!("Connected to {}", port);
                self.context.link.set_port(Some(port.clone()));
                self.context.link.update_stats(|stats| stats.connects += 1);
                self.last_port = Some(port);
                self.transition(ConnectionState::Connected);
            },
            Err(e) => {
                warn!(
                    "Connect failed: {}, retrying in {:?}",
                    e, self.settings.reconnect_delay
                );
                self.back_off().await;
            },
        }
    }

    /// Discovered port, then the last port that worked, then the fallback
    fn resolve_port(&self) -> Option<String> {
        match self.link.list_ports() {
            Ok(candidates) => {
                if let Some(candidate) =
                    select_port(&candidates, &self.config.port_search_attribute)
                {
                    debug!(
                        "Selected {} ({})",
                        candidate.name, candidate.description
                    );
                    return Some(candidate.name.clone());
                }
                debug!(
                    "None of {} port(s) matches '{}'",
                    candidates.len(),
                    self.config.port_search_attribute
                );
            },
            Err(e) => warn!("Port enumeration failed: {}", e),
        }

        self.last_port
            .clone()
            .or_else(|| self.settings.fallback_port.clone())
    }

    async fn back_off(&mut self) {
        self.transition(ConnectionState::Disconnected);
        tokio::time::sleep(self.settings.reconnect_delay).await;
    }

    async fn poll(&mut self) {
        match self.link.read(&mut self.read_buf).await {
            Ok(0) => tokio::time::sleep(self.settings.idle_delay).await,
            Ok(n) => {
                self.context
                    .link
                    .update_stats(|stats| stats.bytes_received += n as u64);
                for result in self.decoder.feed(&self.read_buf[..n]) {
                    self.apply(result);
                }
            },
            Err(e) => {
                warn!("Link lost: {}", e);
                self.link.close().await;
                self.context.link.set_port(None);
                self.context.link.update_stats(|stats| stats.disconnects += 1);
                self.transition(ConnectionState::Disconnected);
            },
        }
    }

    fn apply(&mut self, result: FrameResult) {
        let payload = match result {
            Ok(payload) => payload,
            Err(e @ FrameError::CrcMismatch { .. }) => {
                warn!("Frame discarded: {}", e);
                self.context.link.update_stats(|stats| stats.crc_errors += 1);
                return;
            },
            Err(e @ FrameError::FrameTooLong { .. }) => {
                warn!("Frame discarded: {}", e);
                self.context
                    .link
                    .update_stats(|stats| stats.oversize_frames += 1);
                return;
            },
        };

        self.context.link.update_stats(|stats| stats.frames_ok += 1);
        match DecodedReading::from_payload(&payload, &self.config) {
            Ok(reading) => {
                debug!(raw = reading.raw, position = reading.percentage, "Reading");
                self.context.position.set(reading.percentage);
            },
            Err(e) => {
                warn!("Reading discarded: {}", e);
                self.context
                    .link
                    .update_stats(|stats| stats.parse_errors += 1);
            },
        }
    }

    fn transition(&mut self, state: ConnectionState) {
        if self.state != state {
            debug!("Link state {} -> {}", self.state, state);
        }
        self.state = state;
        self.context.link.set_state(state);
    }
}

/// Keep a link loop running for the process lifetime
///
/// Each loop runs in its own task. If it ever ends (a panic in a driver or in
/// frame handling), the failure is logged, the shared status is marked
/// disconnected and a fresh manager is built after the reconnect delay. The
/// position store keeps its last value across the restart.
pub async fn supervise<L, F>(
    mut make_link: F,
    config: LinkConfig,
    settings: LinkSettings,
    context: AppContext,
) where
    L: Link + 'static,
    F: FnMut() -> L + Send,
{
    loop {
        let manager = LinkManager::new(
            make_link(),
            config.clone(),
            settings.clone(),
            context.clone(),
        );
        match tokio::spawn(manager.run()).await {
            Ok(()) => warn!(
                "Link loop exited, restarting in {:?}",
                settings.reconnect_delay
            ),
            Err(e) => error!(
                "Link loop failed: {}, restarting in {:?}",
                e, settings.reconnect_delay
            ),
        }
        context.link.set_port(None);
        context.link.set_state(ConnectionState::Disconnected);
        tokio::time::sleep(settings.reconnect_delay).await;
    }
}
