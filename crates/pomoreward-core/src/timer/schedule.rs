use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::ConfigError;

/// Which activity the timer currently represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Focus,
    ShortBreak,
    LongBreak,
    /// Terminal phase once every focus session of the cycle is done.
    Completed,
}

impl Phase {
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Focus => "Focus",
            Phase::ShortBreak => "Short Break",
            Phase::LongBreak => "Long Break",
            Phase::Completed => "Completed",
        }
    }

    pub fn is_break(&self) -> bool {
        matches!(self, Phase::ShortBreak | Phase::LongBreak)
    }
}

/// Phase durations and cycle shape, supplied at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(default = "default_focus_secs")]
    pub focus_secs: u64,
    #[serde(default = "default_short_break_secs")]
    pub short_break_secs: u64,
    #[serde(default = "default_long_break_secs")]
    pub long_break_secs: u64,
    /// Focus sessions per cycle.
    #[serde(default = "default_sessions_per_cycle")]
    pub sessions_per_cycle: u32,
    /// Every Nth completed focus session is followed by a long break.
    /// Zero disables long breaks entirely.
    #[serde(default = "default_long_break_interval")]
    pub long_break_interval: u32,
}

fn default_focus_secs() -> u64 {
    25 * 60
}
fn default_short_break_secs() -> u64 {
    5 * 60
}
fn default_long_break_secs() -> u64 {
    15 * 60
}
fn default_sessions_per_cycle() -> u32 {
    4
}
fn default_long_break_interval() -> u32 {
    4
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            focus_secs: default_focus_secs(),
            short_break_secs: default_short_break_secs(),
            long_break_secs: default_long_break_secs(),
            sessions_per_cycle: default_sessions_per_cycle(),
            long_break_interval: default_long_break_interval(),
        }
    }
}

impl TimerConfig {
    /// Second-scale durations for trying a whole cycle in about two minutes.
    pub fn demo() -> Self {
        Self {
            focus_secs: 25,
            short_break_secs: 5,
            long_break_secs: 15,
            ..Self::default()
        }
    }

    /// Duration of a phase. `Completed` has none.
    pub fn duration(&self, phase: Phase) -> Duration {
        match phase {
            Phase::Focus => Duration::from_secs(self.focus_secs),
            Phase::ShortBreak => Duration::from_secs(self.short_break_secs),
            Phase::LongBreak => Duration::from_secs(self.long_break_secs),
            Phase::Completed => Duration::ZERO,
        }
    }

    /// Whether finishing focus session number `completed_sessions` earns a long break.
    pub fn is_long_break_due(&self, completed_sessions: u32) -> bool {
        self.long_break_interval > 0 && completed_sessions % self.long_break_interval == 0
    }

    /// Wall time of one full cycle when every phase runs back to back.
    ///
    /// Uses the same progression as the engine, so with the default interval
    /// (equal to the cycle length) no long break is counted.
    pub fn cycle_duration(&self) -> Duration {
        let mut total = Duration::ZERO;
        for session in 1..=self.sessions_per_cycle {
            total += self.duration(Phase::Focus);
            if session == self.sessions_per_cycle {
                break;
            }
            total += if self.is_long_break_due(session) {
                self.duration(Phase::LongBreak)
            } else {
                self.duration(Phase::ShortBreak)
            };
        }
        total
    }

    /// Reject configurations the engine cannot make progress with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let durations = [
            ("timer.focus_secs", self.focus_secs),
            ("timer.short_break_secs", self.short_break_secs),
            ("timer.long_break_secs", self.long_break_secs),
        ];
        for (key, secs) in durations {
            if secs == 0 {
                return Err(ConfigError::InvalidValue {
                    key: key.into(),
                    message: "duration must be at least one second".into(),
                });
            }
        }
        if self.sessions_per_cycle == 0 {
            return Err(ConfigError::InvalidValue {
                key: "timer.sessions_per_cycle".into(),
                message: "a cycle needs at least one focus session".into(),
            });
        }
        Ok(())
    }
}
