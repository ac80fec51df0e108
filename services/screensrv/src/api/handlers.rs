//! HTTP handlers
//!
//! Read-only views over the shared context; none of them touch the link.

use axum::{extract::State, response::Json};
use chrono::Utc;

use super::dto::{HealthState, HealthStatus, ScreenPosition};
use crate::context::AppContext;
use crate::service::ConnectionState;

/// Latest screen position
///
/// @route GET /screen (alias GET /main)
/// @output `Json<ScreenPosition>` - `{"name": "Display position", "position": f64}`
/// @status 200 - Always; `0.0` until the first valid reading
pub async fn get_screen_position(State(ctx): State<AppContext>) -> Json<ScreenPosition> {
    Json(ScreenPosition::new(ctx.position.get()))
}

/// Health check endpoint
///
/// @route GET /health
/// @output `Json<HealthStatus>` - link state, counters and last reading
/// @status 200 - Service is running; `status` is `degraded` while disconnected
pub async fn health_check(State(ctx): State<AppContext>) -> Json<HealthStatus> {
    let connection = ctx.link.snapshot();
    let sample = ctx.position.snapshot();

    let status = if connection.state == ConnectionState::Connected {
        HealthState::Healthy
    } else {
        HealthState::Degraded
    };

    Json(HealthStatus {
        status,
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        connection,
        position: sample.position,
        updated_at: sample.updated_at,
        timestamp: Utc::now(),
    })
}
