use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::Phase;

/// Every state change of the timer produces an Event.
/// The server logs them; the cycle-completion event is what triggers rewards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        phase: Phase,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    TimerResumed {
        phase: Phase,
        remaining_ms: u64,
        /// How long the countdown sat paused.
        paused_ms: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        phase: Phase,
        remaining_ms: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
    /// A phase ran out and the engine moved to the next one (Idle).
    PhaseCompleted {
        completed: Phase,
        next: Phase,
        completed_sessions: u32,
        at: DateTime<Utc>,
    },
    /// The last focus session of the cycle finished.
    CycleCompleted {
        completed_sessions: u32,
        at: DateTime<Utc>,
    },
}

impl Event {
    pub fn is_cycle_completed(&self) -> bool {
        matches!(self, Event::CycleCompleted { .. })
    }
}
