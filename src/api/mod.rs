//! HTTP API module
//!
//! Every tap target of the clock is an endpoint here.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/clock/:player/tap", post(tap_handler))
        .route("/pause", post(pause_handler))
        .route("/reset", post(reset_handler))
        .route("/duration", post(duration_handler))
        .route("/picker", get(picker_handler))
        .route("/picker/confirm", post(picker_confirm_handler))
        .route("/picker/:field/:direction", post(picker_adjust_handler))
        .route("/clock", get(clock_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use serde::de::DeserializeOwned;
    use tower::ServiceExt;

    use super::responses::{ApiResponse, PickerResponse, StatusResponse};
    use crate::state::{ClockSnapshot, Player};

    fn router(secs: u64) -> (Arc<AppState>, Router) {
        let state = Arc::new(AppState::new(0, "127.0.0.1".to_string(), Duration::from_secs(secs)));
        (Arc::clone(&state), create_router(state))
    }

    async fn send(router: &Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Vec<u8>) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let response = router
            .clone()
            .oneshot(request.body(body).expect("request"))
            .await
            .expect("response");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        (status, bytes.to_vec())
    }

    fn parse<T: DeserializeOwned>(bytes: &[u8]) -> T {
        serde_json::from_slice(bytes).expect("json")
    }

    #[tokio::test]
    async fn tap_starts_opponent_and_ignores_inactive() {
        let (_, router) = router(60);

        let (status, body) = send(&router, Method::POST, "/clock/1/tap", None).await;
        assert_eq!(status, StatusCode::OK);
        let res: ApiResponse = parse(&body);
        assert!(res.applied);
        assert_eq!(res.clock.active_player, Some(Player::Second));

        let (status, body) = send(&router, Method::POST, "/clock/1/tap", None).await;
        assert_eq!(status, StatusCode::OK);
        let res: ApiResponse = parse(&body);
        assert!(!res.applied);
        assert_eq!(res.status, "ignored");
        assert_eq!(res.clock.active_player, Some(Player::Second));
    }

    #[tokio::test]
    async fn unknown_player_is_not_found() {
        let (_, router) = router(60);
        for uri in ["/clock/3/tap", "/clock/300/tap", "/clock/abc/tap", "/clock/-1/tap"] {
            let (status, _) = send(&router, Method::POST, uri, None).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        }
    }

    #[tokio::test]
    async fn pause_and_resume() {
        let (_, router) = router(60);
        send(&router, Method::POST, "/clock/2/tap", None).await;

        let (_, body) = send(&router, Method::POST, "/pause", None).await;
        let res: ApiResponse = parse(&body);
        assert!(res.clock.paused);
        assert_eq!(res.clock.active_player, None);

        let (_, body) = send(&router, Method::POST, "/pause", None).await;
        let res: ApiResponse = parse(&body);
        assert!(!res.clock.paused);
        assert_eq!(res.clock.active_player, Some(Player::First));
    }

    #[tokio::test]
    async fn reset_with_and_without_body() {
        let (_, router) = router(60);
        send(&router, Method::POST, "/clock/2/tap", None).await;

        let (status, body) = send(&router, Method::POST, "/reset", Some(r#"{"minutes":2,"seconds":5}"#)).await;
        assert_eq!(status, StatusCode::OK);
        let res: ApiResponse = parse(&body);
        assert_eq!(res.clock.player_one.display, "2:05.0");
        assert_eq!(res.clock.active_player, None);

        let (_, body) = send(&router, Method::POST, "/reset", None).await;
        let res: ApiResponse = parse(&body);
        assert_eq!(res.clock.configured_seconds, 125);
    }

    #[tokio::test]
    async fn reset_clamps_negative_fields() {
        let (_, router) = router(60);

        let (status, body) = send(&router, Method::POST, "/reset", Some(r#"{"minutes":-1,"seconds":30}"#)).await;
        assert_eq!(status, StatusCode::OK);
        let res: ApiResponse = parse(&body);
        assert_eq!(res.clock.configured_seconds, 30);
        assert_eq!(res.clock.player_one.display, "0:30.0");

        let (status, body) = send(&router, Method::POST, "/reset", Some(r#"{"minutes":-5,"seconds":-5}"#)).await;
        assert_eq!(status, StatusCode::OK);
        let res: ApiResponse = parse(&body);
        assert_eq!(res.clock.configured_seconds, 1);
    }

    #[tokio::test]
    async fn reset_rejects_malformed_body() {
        let (_, router) = router(60);
        send(&router, Method::POST, "/reset", Some(r#"{"minutes":2}"#)).await;

        let (status, _) = send(&router, Method::POST, "/reset", Some("not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, body) = send(&router, Method::GET, "/clock", None).await;
        let clock: ClockSnapshot = parse(&body);
        assert_eq!(clock.configured_seconds, 120);
    }

    #[tokio::test]
    async fn duration_clamps_negative_fields() {
        let (_, router) = router(60);

        let (status, body) = send(&router, Method::POST, "/duration", Some(r#"{"minutes":-1,"seconds":30}"#)).await;
        assert_eq!(status, StatusCode::OK);
        let res: ApiResponse = parse(&body);
        assert_eq!(res.clock.configured_seconds, 30);
        assert_eq!(res.clock.player_two.display, "0:30.0");
    }

    #[tokio::test]
    async fn clock_face_follows_ticks() {
        let (state, router) = router(10);
        send(&router, Method::POST, "/clock/2/tap", None).await;
        for _ in 0..3 {
            state.tick().expect("tick");
        }

        let (status, body) = send(&router, Method::GET, "/clock", None).await;
        assert_eq!(status, StatusCode::OK);
        let clock: ClockSnapshot = parse(&body);
        assert_eq!(clock.player_one.display, "0:09.7");
        assert_eq!(clock.player_two.display, "0:10.0");
        assert!(clock.player_one.active);
    }

    #[tokio::test]
    async fn duration_conflicts_while_running() {
        let (_, router) = router(60);

        let (status, body) = send(&router, Method::POST, "/duration", Some(r#"{"minutes":90,"seconds":75}"#)).await;
        assert_eq!(status, StatusCode::OK);
        let res: ApiResponse = parse(&body);
        assert_eq!(res.clock.player_two.display, "60:59.0");

        send(&router, Method::POST, "/clock/1/tap", None).await;
        let (status, _) = send(&router, Method::POST, "/duration", Some(r#"{"minutes":1,"seconds":0}"#)).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn picker_controls_and_confirm() {
        let (state, router) = router(300);

        let (_, body) = send(&router, Method::POST, "/picker/minutes/down", None).await;
        let picker: PickerResponse = parse(&body);
        assert_eq!((picker.minutes, picker.seconds), (4, 0));

        let (_, body) = send(&router, Method::POST, "/picker/seconds/down", None).await;
        let picker: PickerResponse = parse(&body);
        assert_eq!((picker.minutes, picker.seconds), (4, 0));

        let (_, body) = send(&router, Method::POST, "/picker/seconds/up", None).await;
        let picker: PickerResponse = parse(&body);
        assert_eq!(picker.display, "4:01.0");

        let (status, _) = send(&router, Method::POST, "/picker/hours/up", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(&router, Method::POST, "/picker/confirm", None).await;
        assert_eq!(status, StatusCode::OK);
        let res: ApiResponse = parse(&body);
        assert_eq!(res.clock.configured_seconds, 241);
        assert_eq!(state.get_clock().expect("clock").player_one.display, "4:01.0");
    }

    #[tokio::test]
    async fn status_reports_clock_and_last_action() {
        let (_, router) = router(300);
        send(&router, Method::POST, "/clock/2/tap", None).await;

        let (status, body) = send(&router, Method::GET, "/status", None).await;
        assert_eq!(status, StatusCode::OK);
        let res: StatusResponse = parse(&body);
        assert_eq!(res.clock.active_player, Some(Player::First));
        assert_eq!(res.picker.display, "5:00.0");
        assert_eq!(res.last_action.as_deref(), Some("tap-2"));

        let (status, _) = send(&router, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
    }
}
