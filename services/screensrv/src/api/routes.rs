//! API routes

use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};

use super::handlers::{get_screen_position, health_check};
use crate::context::AppContext;

/// Build the service router
pub fn create_routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/screen", get(get_screen_position))
        .route("/main", get(get_screen_position))
        .route("/health", get(health_check))
        .layer(CorsLayer::new().allow_origin(Any))
        .layer(axum::middleware::from_fn(common::logging::http_request_logger))
        .with_state(ctx)
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;
    use crate::service::ConnectionState;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Option<String>, Value) {
        let req = Request::builder()
            .uri(uri)
            .header(header::ORIGIN, "http://kiosk.local")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();

        let status = resp.status();
        let cors = resp
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .map(|v| v.to_str().unwrap().to_string());
        let body = axum::body::to_bytes(resp.into_body(), 10000).await.unwrap();
        (status, cors, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_screen_default_position() {
        let app = create_routes(AppContext::new());
        let (status, cors, body) = get_json(app, "/screen").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(cors.as_deref(), Some("*"));
        assert_eq!(body, json!({"name": "Display position", "position": 0.0}));
    }

    #[tokio::test]
    async fn test_screen_reports_latest_position() {
        let ctx = AppContext::new();
        ctx.position.set(37.31);
        let (_, _, body) = get_json(create_routes(ctx.clone()), "/screen").await;
        assert_eq!(body["position"], json!(37.31));

        ctx.position.set(50.0);
        let (_, _, body) = get_json(create_routes(ctx), "/main").await;
        assert_eq!(body, json!({"name": "Display position", "position": 50.0}));
    }

    #[tokio::test]
    async fn test_health_reflects_link_state() {
        let ctx = AppContext::new();
        let (status, _, body) = get_json(create_routes(ctx.clone()), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "degraded");
        assert_eq!(body["service"], "screensrv");
        assert_eq!(body["connection"]["state"], "disconnected");
        assert!(body["updated_at"].is_null());

        ctx.link.set_state(ConnectionState::Connected);
        ctx.link.set_port(Some("/dev/ttyUSB0".to_string()));
        ctx.position.set(100.0);
        let (_, _, body) = get_json(create_routes(ctx), "/health").await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["connection"]["port"], "/dev/ttyUSB0");
        assert_eq!(body["position"], json!(100.0));
        assert!(body["updated_at"].is_string());
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let req = Request::builder()
            .uri("/screen/extra")
            .body(Body::empty())
            .unwrap();
        let resp = create_routes(AppContext::new()).oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
