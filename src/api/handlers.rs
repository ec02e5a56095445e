//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::error;

use crate::{
    error::TimerError,
    state::AppState,
    timer::{Countdown, Transition},
};
use super::responses::{ActionResponse, HealthResponse, StatusResponse};

/// Run a control operation and describe its outcome
fn control(
    state: &AppState,
    action: &str,
    operation: fn(&Countdown) -> Result<Transition, TimerError>,
) -> Result<Json<ActionResponse>, StatusCode> {
    let outcome = operation(&state.countdown).map_err(|e| {
        error!("Failed to {} countdown: {}", action, e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    if outcome.is_applied() {
        state.record_action(action);
    }

    let snapshot = state.countdown.snapshot().map_err(|e| {
        error!("Failed to read countdown after {}: {}", action, e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(ActionResponse::new(outcome, action, snapshot)))
}

/// Handle POST /start - Start or resume the countdown
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ActionResponse>, StatusCode> {
    control(&state, "start", Countdown::start)
}

/// Handle POST /pause - Pause the running countdown
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<ActionResponse>, StatusCode> {
    control(&state, "pause", Countdown::pause)
}

/// Handle POST /toggle - Start/pause button
pub async fn toggle_handler(State(state): State<Arc<AppState>>) -> Result<Json<ActionResponse>, StatusCode> {
    control(&state, "toggle", Countdown::toggle)
}

/// Handle POST /reset - Restore the full duration
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ActionResponse>, StatusCode> {
    control(&state, "reset", Countdown::reset)
}

/// Handle GET /status - Return the countdown and server status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let timer = match state.countdown.snapshot() {
        Ok(snapshot) => snapshot,
        Err(e) => {
            error!("Failed to get timer state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer,
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
