//! Screen Position Service (`screensrv`)
//!
//! Reads the position of a motorized projection screen from a serial sensor
//! and serves the latest value over HTTP.
//!
//! The sensor streams HDLC-style frames (`0x7E` flags, `0x7D` escapes,
//! CRC-16/MCRF4XX). [`service::LinkManager`] keeps the serial link up,
//! decodes frames with [`protocol::FrameDecoder`] and writes each reading,
//! normalized to a percentage of the configured range, to
//! [`store::PositionStore`]. The [`api`] router reads it back.

pub mod api;
pub mod bootstrap;
pub mod config;
pub mod context;
pub mod error;
pub mod protocol;
pub mod reading;
pub mod service;
pub mod store;
pub mod transport;

pub use config::LinkConfig;
pub use context::AppContext;
pub use error::{Result, ScreenSrvError};
pub use service::{ConnectionState, LinkManager, LinkSettings, LinkStatus};
pub use store::PositionStore;
