//! Timer engine implementation.
//!
//! The timer engine is a pull-based state machine. It has no internal thread
//! and never reads the clock itself: every operation receives the current
//! `Instant`, and the countdown is brought up to date lazily by `refresh()`
//! at the start of every read.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> Paused -> Running
//! Running --(phase expires)--> Idle (next phase)
//! Running --(last focus expires)--> Completed
//! any --reset--> Idle (Focus)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new(TimerConfig::default());
//! engine.start(Instant::now());
//! // On every poll:
//! let status = engine.status(Instant::now());
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use super::schedule::{Phase, TimerConfig};
use crate::events::Event;

/// Run-state of the current phase's countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
    /// The cycle is finished. Terminal until `reset()`.
    Completed,
}

/// Polling view of the engine, exposed verbatim by the status API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub phase: Phase,
    pub status: TimerState,
    pub completed_sessions: u32,
    pub total_sessions: u32,
    /// Whole seconds left, rounded down.
    pub remaining_seconds: u64,
    /// `MM:SS` rendering of `remaining_seconds`.
    pub remaining_time: String,
    pub is_complete: bool,
}

/// Core timer engine.
#[derive(Debug, Clone)]
pub struct TimerEngine {
    config: TimerConfig,
    phase: Phase,
    state: TimerState,
    completed_sessions: u32,
    /// Exact while not running; while running, exact as of `anchor`.
    remaining: Duration,
    /// Instant at which `remaining` was last known exact. Set only while running.
    anchor: Option<Instant>,
    paused_at: Option<Instant>,
}

impl TimerEngine {
    /// Create a new timer engine in `Idle`/`Focus` with the full focus duration loaded.
    pub fn new(config: TimerConfig) -> Self {
        let remaining = config.duration(Phase::Focus);
        Self {
            config,
            phase: Phase::Focus,
            state: TimerState::Idle,
            completed_sessions: 0,
            remaining,
            anchor: None,
            paused_at: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn completed_sessions(&self) -> u32 {
        self.completed_sessions
    }

    pub fn total_sessions(&self) -> u32 {
        self.config.sessions_per_cycle
    }

    /// Remaining time as of the last refresh.
    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Completed
    }

    /// 0.0 .. 100.0 progress within the current phase, as of the last refresh.
    pub fn session_progress(&self) -> f64 {
        match self.state {
            TimerState::Idle => 0.0,
            TimerState::Completed => 100.0,
            TimerState::Running | TimerState::Paused => {
                let total = self.config.duration(self.phase).as_secs_f64();
                if total == 0.0 {
                    return 0.0;
                }
                let elapsed = total - self.remaining.as_secs_f64();
                (elapsed / total * 100.0).clamp(0.0, 100.0)
            }
        }
    }

    /// 0.0 .. 100.0 share of the cycle's focus sessions already finished.
    pub fn cycle_progress(&self) -> f64 {
        let total = self.config.sessions_per_cycle;
        if total == 0 {
            return 0.0;
        }
        f64::from(self.completed_sessions) / f64::from(total) * 100.0
    }

    /// Snapshot without touching the countdown. Call `refresh()` first for a live view.
    pub fn snapshot(&self) -> StatusSnapshot {
        let remaining_seconds = self.remaining.as_secs();
        StatusSnapshot {
            phase: self.phase,
            status: self.state,
            completed_sessions: self.completed_sessions,
            total_sessions: self.config.sessions_per_cycle,
            remaining_seconds,
            remaining_time: format_time(remaining_seconds),
            is_complete: self.is_complete(),
        }
    }

    /// Refresh against `now`, then snapshot.
    pub fn status(&mut self, now: Instant) -> StatusSnapshot {
        self.refresh(now);
        self.snapshot()
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start from Idle or resume from Paused. No-op when running or completed.
    pub fn start(&mut self, now: Instant) -> Option<Event> {
        let event = match self.state {
            TimerState::Idle => {
                self.anchor = Some(now);
                self.paused_at = None;
                self.state = TimerState::Running;
                Some(Event::TimerStarted {
                    phase: self.phase,
                    duration_secs: self.config.duration(self.phase).as_secs(),
                    at: Utc::now(),
                })
            }
            TimerState::Paused => {
                let paused_for = self
                    .paused_at
                    .take()
                    .map(|at| now.saturating_duration_since(at))
                    .unwrap_or_default();
                // Counting restarts from here, so the pause never eats into `remaining`.
                self.anchor = Some(now);
                self.state = TimerState::Running;
                Some(Event::TimerResumed {
                    phase: self.phase,
                    remaining_ms: duration_ms(self.remaining),
                    paused_ms: duration_ms(paused_for),
                    at: Utc::now(),
                })
            }
            TimerState::Running | TimerState::Completed => None,
        };
        self.check_invariants();
        event
    }

    /// Freeze the countdown. Only effective while running.
    ///
    /// If the phase has already run out by `now`, the phase transition happens
    /// instead and its event is returned.
    pub fn pause(&mut self, now: Instant) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        if let Some(transition) = self.refresh(now) {
            return Some(transition);
        }
        self.anchor = None;
        self.paused_at = Some(now);
        self.state = TimerState::Paused;
        self.check_invariants();
        Some(Event::TimerPaused {
            phase: self.phase,
            remaining_ms: duration_ms(self.remaining),
            at: Utc::now(),
        })
    }

    /// Back to the start of a fresh cycle, from any state.
    pub fn reset(&mut self) -> Option<Event> {
        self.phase = Phase::Focus;
        self.state = TimerState::Idle;
        self.completed_sessions = 0;
        self.remaining = self.config.duration(Phase::Focus);
        self.anchor = None;
        self.paused_at = None;
        self.check_invariants();
        Some(Event::TimerReset { at: Utc::now() })
    }

    /// Bring a running countdown up to `now`.
    ///
    /// Returns the transition event when the phase runs out. A clock reading
    /// earlier than the anchor counts as no elapsed time.
    pub fn refresh(&mut self, now: Instant) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        let Some(anchor) = self.anchor else {
            debug_assert!(false, "running timer without an anchor");
            return None;
        };
        let elapsed = now.saturating_duration_since(anchor);
        self.remaining = self.remaining.saturating_sub(elapsed);
        self.anchor = Some(now.max(anchor));

        if self.remaining.is_zero() {
            let event = self.complete_phase();
            self.check_invariants();
            return Some(event);
        }
        None
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn complete_phase(&mut self) -> Event {
        let completed = self.phase;
        self.anchor = None;
        self.paused_at = None;

        if completed == Phase::Focus {
            self.completed_sessions += 1;
            if self.completed_sessions >= self.config.sessions_per_cycle {
                self.phase = Phase::Completed;
                self.state = TimerState::Completed;
                self.remaining = Duration::ZERO;
                tracing::debug!(
                    completed_sessions = self.completed_sessions,
                    "focus cycle completed"
                );
                return Event::CycleCompleted {
                    completed_sessions: self.completed_sessions,
                    at: Utc::now(),
                };
            }
            self.phase = if self.config.is_long_break_due(self.completed_sessions) {
                Phase::LongBreak
            } else {
                Phase::ShortBreak
            };
        } else {
            self.phase = Phase::Focus;
        }

        self.remaining = self.config.duration(self.phase);
        self.state = TimerState::Idle;
        tracing::debug!(
            completed = completed.label(),
            next = self.phase.label(),
            completed_sessions = self.completed_sessions,
            "phase completed"
        );
        Event::PhaseCompleted {
            completed,
            next: self.phase,
            completed_sessions: self.completed_sessions,
            at: Utc::now(),
        }
    }

    fn check_invariants(&self) {
        debug_assert_eq!(
            self.anchor.is_some(),
            self.state == TimerState::Running,
            "anchor must be set exactly while running"
        );
        debug_assert!(self.completed_sessions <= self.config.sessions_per_cycle);
        debug_assert!(self.remaining <= self.config.duration(self.phase));
    }
}

/// Format whole seconds as `MM:SS`.
pub fn format_time(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    fn demo_engine() -> (TimerEngine, Instant) {
        (TimerEngine::new(TimerConfig::demo()), Instant::now())
    }

    /// Run one focus phase (and the following break, unless it ends the cycle).
    fn finish_focus(engine: &mut TimerEngine, now: &mut Instant) {
        engine.start(*now);
        *now += secs(26);
        engine.refresh(*now);
        if engine.phase().is_break() {
            engine.start(*now);
            *now += secs(16);
            engine.refresh(*now);
        }
    }

    #[test]
    fn starts_idle_in_focus_with_full_duration() {
        let (engine, _) = demo_engine();
        assert_eq!(engine.state(), TimerState::Idle);
        assert_eq!(engine.phase(), Phase::Focus);
        assert_eq!(engine.remaining(), secs(25));
        assert_eq!(engine.session_progress(), 0.0);
    }

    #[test]
    fn start_pause_resume() {
        let (mut engine, t0) = demo_engine();
        assert!(matches!(engine.start(t0), Some(Event::TimerStarted { .. })));
        assert_eq!(engine.state(), TimerState::Running);

        assert!(matches!(engine.pause(t0 + secs(3)), Some(Event::TimerPaused { .. })));
        assert_eq!(engine.state(), TimerState::Paused);
        assert_eq!(engine.remaining(), secs(22));

        match engine.start(t0 + secs(10)) {
            Some(Event::TimerResumed { paused_ms, remaining_ms, .. }) => {
                assert_eq!(paused_ms, 7_000);
                assert_eq!(remaining_ms, 22_000);
            }
            other => panic!("Expected TimerResumed, got {other:?}"),
        }
        assert_eq!(engine.state(), TimerState::Running);
    }

    #[test]
    fn pause_time_does_not_count() {
        let (mut engine, t0) = demo_engine();
        engine.start(t0);
        engine.pause(t0 + secs(10));
        let frozen = engine.remaining();

        // A long pause, then resume.
        engine.start(t0 + secs(500));
        assert_eq!(engine.status(t0 + secs(500)).remaining_seconds, frozen.as_secs());
        assert_eq!(engine.status(t0 + secs(504)).remaining_seconds, 11);
    }

    #[test]
    fn paused_remaining_is_frozen() {
        let (mut engine, t0) = demo_engine();
        engine.start(t0);
        engine.pause(t0 + secs(5));
        assert_eq!(engine.status(t0 + secs(6)).remaining_seconds, 20);
        assert_eq!(engine.status(t0 + secs(600)).remaining_seconds, 20);
        assert_eq!(engine.state(), TimerState::Paused);
    }

    #[test]
    fn second_start_is_a_noop() {
        let (mut engine, t0) = demo_engine();
        assert!(engine.start(t0).is_some());
        assert!(engine.start(t0 + secs(5)).is_none());
        // The anchor was not reset by the second call.
        assert_eq!(engine.status(t0 + secs(10)).remaining_seconds, 15);
    }

    #[test]
    fn pause_when_not_running_is_a_noop() {
        let (mut engine, t0) = demo_engine();
        assert!(engine.pause(t0).is_none());
        assert_eq!(engine.state(), TimerState::Idle);

        engine.start(t0);
        engine.pause(t0 + secs(1));
        assert!(engine.pause(t0 + secs(2)).is_none());
        assert_eq!(engine.remaining(), secs(24));
    }

    #[test]
    fn focus_expiry_moves_to_short_break() {
        let (mut engine, t0) = demo_engine();
        engine.start(t0);
        let status = engine.status(t0 + secs(26));
        assert_eq!(status.completed_sessions, 1);
        assert_eq!(status.phase, Phase::ShortBreak);
        assert_eq!(status.status, TimerState::Idle);
        assert_eq!(status.remaining_seconds, 5);
        assert_eq!(status.remaining_time, "00:05");
    }

    #[test]
    fn expiry_emits_phase_completed_once() {
        let (mut engine, t0) = demo_engine();
        engine.start(t0);
        match engine.refresh(t0 + secs(25)) {
            Some(Event::PhaseCompleted { completed, next, completed_sessions, .. }) => {
                assert_eq!(completed, Phase::Focus);
                assert_eq!(next, Phase::ShortBreak);
                assert_eq!(completed_sessions, 1);
            }
            other => panic!("Expected PhaseCompleted, got {other:?}"),
        }
        // Next phase waits for an explicit start.
        assert!(engine.refresh(t0 + secs(100)).is_none());
        assert_eq!(engine.remaining(), secs(5));
    }

    #[test]
    fn break_expiry_returns_to_focus() {
        let (mut engine, mut now) = demo_engine();
        engine.start(now);
        now += secs(25);
        engine.refresh(now);
        engine.start(now);
        now += secs(5);
        engine.refresh(now);
        assert_eq!(engine.phase(), Phase::Focus);
        assert_eq!(engine.state(), TimerState::Idle);
        assert_eq!(engine.remaining(), secs(25));
        assert_eq!(engine.completed_sessions(), 1);
    }

    #[test]
    fn pause_after_expiry_transitions_instead() {
        let (mut engine, t0) = demo_engine();
        engine.start(t0);
        let event = engine.pause(t0 + secs(30));
        assert!(matches!(event, Some(Event::PhaseCompleted { .. })));
        assert_eq!(engine.state(), TimerState::Idle);
        assert_eq!(engine.phase(), Phase::ShortBreak);
    }

    #[test]
    fn full_cycle_completes_and_stays_completed() {
        let (mut engine, mut now) = demo_engine();
        for _ in 0..4 {
            finish_focus(&mut engine, &mut now);
        }
        let status = engine.status(now);
        assert_eq!(status.phase, Phase::Completed);
        assert_eq!(status.status, TimerState::Completed);
        assert!(status.is_complete);
        assert_eq!(status.completed_sessions, 4);
        assert_eq!(status.remaining_seconds, 0);

        assert!(engine.start(now).is_none());
        assert!(engine.pause(now).is_none());
        assert!(engine.status(now + secs(1000)).is_complete);
        assert_eq!(engine.cycle_progress(), 100.0);
        assert_eq!(engine.session_progress(), 100.0);
    }

    #[test]
    fn default_interval_never_schedules_long_break() {
        let (mut engine, mut now) = demo_engine();
        for _ in 0..3 {
            engine.start(now);
            now += secs(25);
            engine.refresh(now);
            assert_eq!(engine.phase(), Phase::ShortBreak);
            engine.start(now);
            now += secs(5);
            engine.refresh(now);
        }
    }

    #[test]
    fn long_break_interval_is_honoured() {
        let config = TimerConfig {
            long_break_interval: 2,
            ..TimerConfig::demo()
        };
        let mut engine = TimerEngine::new(config);
        let mut now = Instant::now();
        let mut breaks = Vec::new();
        for _ in 0..3 {
            engine.start(now);
            now += secs(25);
            engine.refresh(now);
            breaks.push(engine.phase());
            engine.start(now);
            now += secs(15);
            engine.refresh(now);
        }
        assert_eq!(breaks, vec![Phase::ShortBreak, Phase::LongBreak, Phase::ShortBreak]);
    }

    #[test]
    fn reset_from_any_state() {
        let (mut engine, mut now) = demo_engine();
        finish_focus(&mut engine, &mut now);
        engine.start(now);
        engine.pause(now + secs(3));
        assert!(matches!(engine.reset(), Some(Event::TimerReset { .. })));

        let status = engine.status(now + secs(60));
        assert_eq!(status.phase, Phase::Focus);
        assert_eq!(status.status, TimerState::Idle);
        assert_eq!(status.completed_sessions, 0);
        assert_eq!(status.remaining_seconds, 25);
    }

    #[test]
    fn reset_after_completion_starts_fresh_cycle() {
        let (mut engine, mut now) = demo_engine();
        for _ in 0..4 {
            finish_focus(&mut engine, &mut now);
        }
        engine.reset();
        assert!(!engine.is_complete());
        assert!(engine.start(now).is_some());
    }

    #[test]
    fn session_progress_tracks_elapsed_time() {
        let config = TimerConfig {
            focus_secs: 100,
            ..TimerConfig::default()
        };
        let mut engine = TimerEngine::new(config);
        let t0 = Instant::now();
        engine.start(t0);
        assert_eq!(engine.session_progress(), 0.0);
        engine.refresh(t0 + secs(40));
        assert!((engine.session_progress() - 40.0).abs() < 1e-9);
        engine.refresh(t0 + Duration::from_millis(99_900));
        assert!(engine.session_progress() > 99.0);
        // Entering the next phase idles again.
        engine.refresh(t0 + secs(100));
        assert_eq!(engine.session_progress(), 0.0);
    }

    #[test]
    fn cycle_progress_counts_focus_sessions() {
        let (mut engine, mut now) = demo_engine();
        assert_eq!(engine.cycle_progress(), 0.0);
        finish_focus(&mut engine, &mut now);
        assert_eq!(engine.cycle_progress(), 25.0);
    }

    #[test]
    fn earlier_instant_counts_as_no_time() {
        let (mut engine, t0) = demo_engine();
        engine.start(t0 + secs(10));
        assert_eq!(engine.status(t0).remaining_seconds, 25);
        assert_eq!(engine.status(t0 + secs(12)).remaining_seconds, 23);
    }

    #[test]
    fn remaining_seconds_rounds_down() {
        let (mut engine, t0) = demo_engine();
        engine.start(t0);
        let status = engine.status(t0 + Duration::from_millis(1_500));
        assert_eq!(status.remaining_seconds, 23);
    }

    #[test]
    fn format_time_pads_minutes_and_seconds() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(65), "01:05");
        assert_eq!(format_time(1500), "25:00");
        assert_eq!(format_time(6000), "100:00");
    }

    #[test]
    fn snapshot_serializes_polling_shape() {
        let (engine, _) = demo_engine();
        let json = serde_json::to_value(engine.snapshot()).unwrap();
        assert_eq!(json["phase"], "focus");
        assert_eq!(json["status"], "idle");
        assert_eq!(json["completed_sessions"], 0);
        assert_eq!(json["total_sessions"], 4);
        assert_eq!(json["remaining_seconds"], 25);
        assert_eq!(json["remaining_time"], "00:25");
        assert_eq!(json["is_complete"], false);
    }
}
