//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::{debug, error};

use crate::state::{AppState, ClockSnapshot, ClockUpdate, PickerField, Player};
use super::responses::{ApiResponse, DurationRequest, HealthResponse, PickerResponse, StatusResponse};

/// Handle POST /clock/:player/tap - Tap a player's clock
pub async fn tap_handler(
    State(state): State<Arc<AppState>>,
    Path(number): Path<String>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let Some(player) = number.parse().ok().and_then(Player::from_number) else {
        debug!("Tap on unknown player {}", number);
        return Err(StatusCode::NOT_FOUND);
    };

    match state.tap(player) {
        Ok(update) => Ok(Json(ApiResponse::from_update(
            update,
            &format!("Turn passed by {}", player),
            &format!("Tap on {} ignored", player),
        ))),
        Err(e) => {
            error!("Failed to tap clock: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /pause - Pause or resume the game
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.toggle_pause() {
        Ok(update) => {
            let message = if update.clock.paused { "Clock paused" } else { "Clock resumed" };
            Ok(Json(ApiResponse::from_update(update, message, "Nothing to pause")))
        }
        Err(e) => {
            error!("Failed to toggle pause: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /reset - Reset both clocks, optionally to a new duration
///
/// An empty body resets to the configured duration.
pub async fn reset_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ApiResponse>, StatusCode> {
    let duration = if body.iter().all(u8::is_ascii_whitespace) {
        None
    } else {
        let req: DurationRequest = serde_json::from_slice(&body).map_err(|e| {
            debug!("Invalid reset body: {}", e);
            StatusCode::BAD_REQUEST
        })?;
        Some(req.duration())
    };

    match state.reset(duration) {
        Ok(update) => Ok(Json(ApiResponse::applied("Clocks reset".to_string(), update.clock))),
        Err(e) => {
            error!("Failed to reset clocks: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /duration - Configure the starting time
pub async fn duration_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DurationRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let (minutes, seconds) = req.fields();
    duration_response(state.set_duration(minutes, seconds))
}

/// Handle GET /picker - Current duration dialog draft
pub async fn picker_handler(State(state): State<Arc<AppState>>) -> Result<Json<PickerResponse>, StatusCode> {
    match state.get_picker() {
        Ok(picker) => Ok(Json(picker.into())),
        Err(e) => {
            error!("Failed to get picker: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /picker/:field/:direction - Step a picker column up or down
pub async fn picker_adjust_handler(
    State(state): State<Arc<AppState>>,
    Path((field, direction)): Path<(String, String)>,
) -> Result<Json<PickerResponse>, StatusCode> {
    let field: PickerField = field.parse().map_err(|e| {
        debug!("{}", e);
        StatusCode::NOT_FOUND
    })?;
    let delta = match direction.as_str() {
        "up" => 1,
        "down" => -1,
        _ => return Err(StatusCode::NOT_FOUND),
    };

    match state.adjust_picker(field, delta) {
        Ok(picker) => Ok(Json(picker.into())),
        Err(e) => {
            error!("Failed to adjust picker: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /picker/confirm - Apply the picker draft to the clock
pub async fn picker_confirm_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    duration_response(state.confirm_picker())
}

fn duration_response(
    result: Result<ClockUpdate, String>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match result {
        Ok(update) if update.applied => Ok(Json(ApiResponse::applied(
            format!("Duration set to {}s", update.clock.configured_seconds),
            update.clock,
        ))),
        Ok(_) => {
            debug!("Duration change refused while a clock is running");
            Err(StatusCode::CONFLICT)
        }
        Err(e) => {
            error!("Failed to set duration: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /clock - Current clock faces
pub async fn clock_handler(State(state): State<Arc<AppState>>) -> Json<ClockSnapshot> {
    Json(state.latest_clock())
}

/// Handle GET /status - Return the clock and server status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let clock = state.latest_clock();

    let picker = match state.get_picker() {
        Ok(p) => p,
        Err(e) => {
            error!("Failed to get picker: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        clock,
        picker: picker.into(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
