//! Router construction for the Pomoreward server.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the full axum router.
pub fn build_router(state: AppState) -> Router {
    // Timer control, reachable by GET for plain links and polling clients.
    let timer = Router::new()
        .route(
            "/start",
            get(handlers::timer::start).post(handlers::timer::start),
        )
        .route(
            "/pause",
            get(handlers::timer::pause).post(handlers::timer::pause),
        )
        .route(
            "/reset",
            get(handlers::timer::reset).post(handlers::timer::reset),
        )
        .route("/api/timer-status", get(handlers::timer::timer_status));

    let rewards = Router::new()
        .route(
            "/api/preferences",
            get(handlers::rewards::get_preferences).put(handlers::rewards::put_preferences),
        )
        .route("/api/rewards", get(handlers::rewards::get_rewards))
        .route(
            "/api/rewards/export",
            post(handlers::rewards::export_rewards),
        )
        .route(
            "/api/collect-rewards",
            post(handlers::rewards::collect_rewards),
        )
        .route("/api/add-quote", post(handlers::rewards::add_quote))
        .route("/api/custom-quotes", get(handlers::rewards::custom_quotes))
        .route("/api/earn-template", post(handlers::rewards::earn_template))
        .route(
            "/api/earned-templates",
            get(handlers::rewards::earned_templates),
        );

    Router::new()
        .route("/health", get(handlers::health))
        .merge(timer)
        .merge(rewards)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
