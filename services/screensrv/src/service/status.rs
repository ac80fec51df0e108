//! Link status shared with the HTTP API
//!
//! Written by the link manager only; the health route reads snapshots.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;

/// Maximum number of transitions kept for the health route
pub const MAX_TRANSITIONS: usize = 16;

/// Connection state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

impl std::fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ConnectionState::Disconnected => "disconnected",
            ConnectionState::Connecting => "connecting",
            ConnectionState::Connected => "connected",
        };
        f.write_str(name)
    }
}

/// Link counters, monotonic over the process lifetime
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LinkStats {
    pub bytes_received: u64,
    pub frames_ok: u64,
    pub crc_errors: u64,
    pub oversize_frames: u64,
    pub parse_errors: u64,
    pub connect_attempts: u64,
    pub connects: u64,
    pub disconnects: u64,
}

/// A state change and when it happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StateTransition {
    pub state: ConnectionState,
    pub at: DateTime<Utc>,
}

/// Point-in-time copy of [`LinkStatus`]
#[derive(Debug, Clone, Default, Serialize)]
pub struct LinkSnapshot {
    pub state: ConnectionState,
    pub port: Option<String>,
    pub stats: LinkStats,
    /// Oldest first
    pub transitions: Vec<StateTransition>,
}

#[derive(Debug, Default)]
struct LinkStatusInner {
    state: ConnectionState,
    port: Option<String>,
    stats: LinkStats,
    transitions: VecDeque<StateTransition>,
}

/// Shared link state
#[derive(Debug, Default)]
pub struct LinkStatus {
    inner: RwLock<LinkStatusInner>,
}

impl LinkStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ConnectionState {
        self.inner.read().state
    }

    /// Record `state`; repeated states are not logged as transitions
    pub fn set_state(&self, state: ConnectionState) {
        let mut inner = self.inner.write();
        if inner.state == state {
            return;
        }
        inner.state = state;
        if inner.transitions.len() == MAX_TRANSITIONS {
            inner.transitions.pop_front();
        }
        inner.transitions.push_back(StateTransition {
            state,
            at: Utc::now(),
        });
    }

    pub fn set_port(&self, port: Option<String>) {
        self.inner.write().port = port;
    }

    pub fn update_stats(&self, update: impl FnOnce(&mut LinkStats)) {
        update(&mut self.inner.write().stats);
    }

    pub fn stats(&self) -> LinkStats {
        self.inner.read().stats
    }

    pub fn snapshot(&self) -> LinkSnapshot {
        let inner = self.inner.read();
        LinkSnapshot {
            state: inner.state,
            port: inner.port.clone(),
            stats: inner.stats,
            transitions: inner.transitions.iter().copied().collect(),
        }
    }
}
