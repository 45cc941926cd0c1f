//! Process-wide handle to the single timer engine.
//!
//! Request handlers clone a `SharedTimer`; every operation, including the
//! lazy phase transition inside a status read, runs under one lock so two
//! near-simultaneous requests can never both fire a transition.

use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::clock::{Clock, MonotonicClock};
use super::engine::{StatusSnapshot, TimerEngine};
use super::schedule::TimerConfig;
use crate::events::Event;

/// Progress metrics reported next to the status snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Progress {
    pub session_progress: f64,
    pub cycle_progress: f64,
}

/// Result of one locked operation on the engine.
#[derive(Debug, Clone)]
pub struct TimerUpdate {
    pub snapshot: StatusSnapshot,
    pub progress: Progress,
    /// What the operation changed, if anything.
    pub event: Option<Event>,
}

#[derive(Clone)]
pub struct SharedTimer {
    engine: Arc<Mutex<TimerEngine>>,
    clock: Arc<dyn Clock>,
}

impl SharedTimer {
    pub fn new(config: TimerConfig) -> Self {
        Self::with_clock(config, Arc::new(MonotonicClock))
    }

    pub fn with_clock(config: TimerConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            engine: Arc::new(Mutex::new(TimerEngine::new(config))),
            clock,
        }
    }

    pub fn start(&self) -> TimerUpdate {
        self.apply(|engine, clock| {
            let now = clock.now();
            // A phase that ran out while nobody polled must transition before
            // `start` can act on the next one.
            engine.refresh(now).or_else(|| engine.start(now))
        })
    }

    pub fn pause(&self) -> TimerUpdate {
        self.apply(|engine, clock| engine.pause(clock.now()))
    }

    pub fn reset(&self) -> TimerUpdate {
        self.apply(|engine, _| engine.reset())
    }

    /// Refresh and report; the event is the transition this poll triggered.
    pub fn poll(&self) -> TimerUpdate {
        self.apply(|engine, clock| engine.refresh(clock.now()))
    }

    pub fn status(&self) -> StatusSnapshot {
        self.poll().snapshot
    }

    pub fn config(&self) -> TimerConfig {
        self.lock().config().clone()
    }

    fn apply<F>(&self, op: F) -> TimerUpdate
    where
        F: FnOnce(&mut TimerEngine, &dyn Clock) -> Option<Event>,
    {
        let mut engine = self.lock();
        let event = op(&mut *engine, self.clock.as_ref());
        // Always report the live countdown, whatever the operation was.
        let transition = engine.refresh(self.clock.now());
        TimerUpdate {
            snapshot: engine.snapshot(),
            progress: Progress {
                session_progress: engine.session_progress(),
                cycle_progress: engine.cycle_progress(),
            },
            event: event.or(transition),
        }
    }

    fn lock(&self) -> MutexGuard<'_, TimerEngine> {
        // Every operation leaves the engine consistent, so a panic elsewhere
        // never leaves it half-updated.
        self.engine.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for SharedTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedTimer").field("engine", &self.engine).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::{ManualClock, Phase, TimerState};
    use std::thread;

    fn demo_timer() -> (SharedTimer, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        (SharedTimer::with_clock(TimerConfig::demo(), clock.clone()), clock)
    }

    #[test]
    fn start_then_poll_counts_down() {
        let (timer, clock) = demo_timer();
        let update = timer.start();
        assert_eq!(update.snapshot.status, TimerState::Running);
        assert!(matches!(update.event, Some(Event::TimerStarted { .. })));

        clock.advance_secs(10);
        let update = timer.poll();
        assert_eq!(update.snapshot.remaining_seconds, 15);
        assert!((update.progress.session_progress - 40.0).abs() < 1e-9);
        assert!(update.event.is_none());
    }

    #[test]
    fn poll_reports_transition_once() {
        let (timer, clock) = demo_timer();
        timer.start();
        clock.advance_secs(26);
        let first = timer.poll();
        assert!(matches!(first.event, Some(Event::PhaseCompleted { .. })));
        assert_eq!(first.snapshot.phase, Phase::ShortBreak);
        assert!(timer.poll().event.is_none());
    }

    #[test]
    fn start_after_unpolled_expiry_transitions_first() {
        let (timer, clock) = demo_timer();
        timer.start();
        timer.start();
        clock.advance_secs(30);
        let update = timer.start();
        assert!(matches!(update.event, Some(Event::PhaseCompleted { .. })));
        assert_eq!(update.snapshot.status, TimerState::Idle);
        assert_eq!(update.snapshot.phase, Phase::ShortBreak);
    }

    #[test]
    fn concurrent_polls_fire_a_single_transition() {
        let (timer, clock) = demo_timer();
        timer.start();
        clock.advance_secs(25);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let timer = timer.clone();
                thread::spawn(move || timer.poll().event)
            })
            .collect();
        let transitions = handles
            .into_iter()
            .filter_map(|h| h.join().unwrap())
            .count();

        assert_eq!(transitions, 1);
        assert_eq!(timer.status().completed_sessions, 1);
    }

    #[test]
    fn reset_reports_fresh_state() {
        let (timer, clock) = demo_timer();
        timer.start();
        clock.advance_secs(3);
        timer.pause();
        let update = timer.reset();
        assert_eq!(update.snapshot.status, TimerState::Idle);
        assert_eq!(update.snapshot.remaining_seconds, 25);
        assert_eq!(update.progress.session_progress, 0.0);
        assert_eq!(update.progress.cycle_progress, 0.0);
    }
}
