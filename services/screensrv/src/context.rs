//! Shared application state

use std::sync::Arc;

use crate::service::LinkStatus;
use crate::store::PositionStore;

/// State shared by the link task and the HTTP handlers
#[derive(Debug, Clone, Default)]
pub struct AppContext {
    pub position: Arc<PositionStore>,
    pub link: Arc<LinkStatus>,
}

impl AppContext {
    pub fn new() -> Self {
        Self::default()
    }
}
