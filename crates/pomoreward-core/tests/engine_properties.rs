//! Property tests for the timer engine over arbitrary command sequences.

use std::time::{Duration, Instant};

use pomoreward_core::timer::{Phase, TimerConfig, TimerEngine, TimerState};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Start,
    Pause,
    Reset,
    Wait(u64),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => Just(Op::Start),
        2 => Just(Op::Pause),
        1 => Just(Op::Reset),
        4 => (0u64..40_000).prop_map(Op::Wait),
    ]
}

fn apply(engine: &mut TimerEngine, now: &mut Instant, op: &Op) {
    match op {
        Op::Start => {
            engine.start(*now);
        }
        Op::Pause => {
            engine.pause(*now);
        }
        Op::Reset => {
            engine.reset();
        }
        Op::Wait(ms) => *now += Duration::from_millis(*ms),
    }
}

proptest! {
    #[test]
    fn remaining_never_exceeds_phase_duration(ops in prop::collection::vec(op(), 1..80)) {
        let config = TimerConfig::demo();
        let mut engine = TimerEngine::new(config.clone());
        let mut now = Instant::now();
        for op in &ops {
            apply(&mut engine, &mut now, op);
            let status = engine.status(now);
            prop_assert!(engine.remaining() <= config.duration(status.phase));
            prop_assert!(status.completed_sessions <= status.total_sessions);
            prop_assert_eq!(status.is_complete, status.phase == Phase::Completed);
            prop_assert!((0.0..=100.0).contains(&engine.session_progress()));
        }
    }

    #[test]
    fn running_countdown_is_non_increasing(waits in prop::collection::vec(0u64..3_000, 1..30)) {
        let mut engine = TimerEngine::new(TimerConfig::demo());
        let mut now = Instant::now();
        engine.start(now);
        let mut last = engine.remaining();
        for ms in waits {
            now += Duration::from_millis(ms);
            engine.refresh(now);
            if engine.state() != TimerState::Running || engine.phase() != Phase::Focus {
                break;
            }
            prop_assert!(engine.remaining() <= last);
            last = engine.remaining();
        }
    }

    #[test]
    fn paused_countdown_is_frozen(run_ms in 0u64..24_000, waits in prop::collection::vec(0u64..100_000, 1..10)) {
        let mut engine = TimerEngine::new(TimerConfig::demo());
        let mut now = Instant::now();
        engine.start(now);
        now += Duration::from_millis(run_ms);
        engine.pause(now);
        let frozen = engine.remaining();
        for ms in waits {
            now += Duration::from_millis(ms);
            let status = engine.status(now);
            prop_assert_eq!(status.status, TimerState::Paused);
            prop_assert_eq!(engine.remaining(), frozen);
        }
        // Resuming picks up exactly where the pause left off.
        engine.start(now);
        prop_assert_eq!(engine.remaining(), frozen);
    }

    #[test]
    fn reset_always_returns_to_fresh_focus(ops in prop::collection::vec(op(), 0..60)) {
        let mut engine = TimerEngine::new(TimerConfig::demo());
        let mut now = Instant::now();
        for op in &ops {
            apply(&mut engine, &mut now, op);
        }
        engine.reset();
        let status = engine.status(now + Duration::from_secs(3600));
        prop_assert_eq!(status.phase, Phase::Focus);
        prop_assert_eq!(status.status, TimerState::Idle);
        prop_assert_eq!(status.completed_sessions, 0);
        prop_assert_eq!(status.remaining_seconds, 25);
    }
}
