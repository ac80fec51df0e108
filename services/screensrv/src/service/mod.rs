//! Link service: reconnecting read loop and its shared status

pub mod link_manager;
pub mod status;

pub use link_manager::{supervise, LinkManager, LinkSettings};
pub use status::{ConnectionState, LinkSnapshot, LinkStats, LinkStatus, StateTransition};
