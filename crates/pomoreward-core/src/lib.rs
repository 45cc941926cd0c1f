//! # Pomoreward Core Library
//!
//! Core business logic for Pomoreward, a Pomodoro timer that unlocks photo
//! and quote rewards once a full focus cycle is finished. The HTTP server and
//! the CLI are thin layers over this crate.
//!
//! ## Architecture
//!
//! - **Timer Engine**: a pull-based state machine over a monotonic clock; the
//!   countdown is recomputed lazily on every read, with no background thread
//! - **Shared Timer**: the single process-wide engine behind one lock
//! - **Rewards**: JSON-file store of keyword preferences and earned packages
//! - **Storage**: TOML configuration and the data directory
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: Core timer state machine
//! - [`SharedTimer`]: Lock-guarded handle injected into request handlers
//! - [`RewardStore`]: Reward package persistence
//! - [`Config`]: Application configuration management

pub mod error;
pub mod events;
pub mod rewards;
pub mod storage;
pub mod timer;

pub use error::{ConfigError, CoreError, ValidationError};
pub use events::Event;
pub use rewards::{RewardPackage, RewardStore};
pub use storage::Config;
pub use timer::{Phase, SharedTimer, StatusSnapshot, TimerConfig, TimerEngine, TimerState};
