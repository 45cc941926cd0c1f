//! Timer control and the polling endpoint.

use axum::{extract::State, Json};
use pomoreward_core::timer::{StatusSnapshot, TimerUpdate};
use serde::Serialize;

use crate::error::ApiError;
use crate::state::AppState;

/// `GET /api/timer-status` body: the snapshot plus progress and reward flag.
#[derive(Debug, Serialize)]
pub struct TimerStatusResponse {
    #[serde(flatten)]
    pub snapshot: StatusSnapshot,
    pub session_progress: f64,
    pub cycle_progress: f64,
    /// True on the one poll that generated a fresh reward package.
    pub package_ready: bool,
}

pub(crate) fn log_event(update: &TimerUpdate) {
    if let Some(event) = &update.event {
        tracing::info!(?event, "timer event");
    }
}

/// GET|POST /start
pub async fn start(State(state): State<AppState>) -> Json<StatusSnapshot> {
    let update = state.timer.start();
    log_event(&update);
    Json(update.snapshot)
}

/// GET|POST /pause
pub async fn pause(State(state): State<AppState>) -> Json<StatusSnapshot> {
    let update = state.timer.pause();
    log_event(&update);
    Json(update.snapshot)
}

/// GET|POST /reset
pub async fn reset(State(state): State<AppState>) -> Json<StatusSnapshot> {
    let update = state.timer.reset();
    log_event(&update);
    Json(update.snapshot)
}

/// GET /api/timer-status
///
/// Once the cycle is complete, the first poll that finds no uncollected
/// package generates one and reports `package_ready: true`.
pub async fn timer_status(
    State(state): State<AppState>,
) -> Result<Json<TimerStatusResponse>, ApiError> {
    let (update, package_ready) = state.poll_for_rewards()?;
    log_event(&update);

    Ok(Json(TimerStatusResponse {
        snapshot: update.snapshot,
        session_progress: update.progress.session_progress,
        cycle_progress: update.progress.cycle_progress,
        package_ready,
    }))
}
