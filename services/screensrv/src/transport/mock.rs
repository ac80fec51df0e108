//! Mock Link for Testing
//!
//! Scripted link used to drive the link manager without a serial device.
//! Clones share state, so a test keeps one handle to script reads and inspect
//! calls while the manager owns the other.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::debug;

use super::traits::{Link, LinkError, PortCandidate};

/// One scripted `read` outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockRead {
    /// Bytes returned by the read (split over several reads if the buffer is smaller)
    Data(Vec<u8>),
    /// Read fails as if the device was unplugged
    Fail(String),
}

#[derive(Debug, Default)]
struct MockLinkState {
    ports: Vec<PortCandidate>,
    /// Number of upcoming `open` calls that fail
    failing_opens: u32,
    reads: VecDeque<MockRead>,
    open_port: Option<String>,
    /// Every port `open` was called with, successful or not
    open_attempts: Vec<String>,
    closes: u32,
}

/// Mock link implementation
#[derive(Debug, Clone, Default)]
pub struct MockLink {
    state: Arc<Mutex<MockLinkState>>,
}

impl MockLink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ports reported by `list_ports`
    pub fn with_ports(self, ports: Vec<PortCandidate>) -> Self {
        self.state.lock().ports = ports;
        self
    }

    pub fn set_ports(&self, ports: Vec<PortCandidate>) {
        self.state.lock().ports = ports;
    }

    /// Make the next `count` open attempts fail
    pub fn fail_next_opens(&self, count: u32) {
        self.state.lock().failing_opens = count;
    }

    /// Queue bytes for a future read
    pub fn push_data(&self, data: impl Into<Vec<u8>>) {
        self.state.lock().reads.push_back(MockRead::Data(data.into()));
    }

    /// Queue a read failure
    pub fn push_failure(&self, reason: impl Into<String>) {
        self.state
            .lock()
            .reads
            .push_back(MockRead::Fail(reason.into()));
    }

    pub fn open_attempts(&self) -> Vec<String> {
        self.state.lock().open_attempts.clone()
    }

    pub fn open_port(&self) -> Option<String> {
        self.state.lock().open_port.clone()
    }

    pub fn close_count(&self) -> u32 {
        self.state.lock().closes
    }
}

#[async_trait]
impl Link for MockLink {
    fn kind(&self) -> &str {
        "mock"
    }

    fn list_ports(&self) -> Result<Vec<PortCandidate>, LinkError> {
        Ok(self.state.lock().ports.clone())
    }

    async fn open(&mut self, port: &str) -> Result<(), LinkError> {
        let mut state = self.state.lock();
        state.open_attempts.push(port.to_string());
        state.open_port = None;

        if state.failing_opens > 0 {
            state.failing_opens -= 1;
            return Err(LinkError::OpenFailed {
                port: port.to_string(),
                reason: "mock open failure".to_string(),
            });
        }

        debug!("Mock link opened on {}", port);
        state.open_port = Some(port.to_string());
        Ok(())
    }

    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, LinkError> {
        let mut state = self.state.lock();
        if state.open_port.is_none() {
            return Err(LinkError::NotOpen);
        }

        match state.reads.pop_front() {
            None => Ok(0),
            Some(MockRead::Fail(reason)) => {
                state.open_port = None;
                Err(LinkError::ReadFailed(reason))
            },
            Some(MockRead::Data(mut data)) => {
                let n = data.len().min(buf.len());
                buf[..n].copy_from_slice(&data[..n]);
                if n < data.len() {
                    let rest = data.split_off(n);
                    state.reads.push_front(MockRead::Data(rest));
                }
                Ok(n)
            },
        }
    }

    async fn close(&mut self) {
        let mut state = self.state.lock();
        state.open_port = None;
        state.closes += 1;
    }

    fn is_open(&self) -> bool {
        self.state.lock().open_port.is_some()
    }
}
