//! Pomoreward HTTP server.
//!
//! A JSON polling API over the core timer and reward store. Clients poll
//! `GET /api/timer-status` about once a second; the timer has no background
//! ticker, so each poll is what moves the countdown forward.

pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
