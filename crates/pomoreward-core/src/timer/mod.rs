mod clock;
mod engine;
mod schedule;
mod shared;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use engine::{format_time, StatusSnapshot, TimerEngine, TimerState};
pub use schedule::{Phase, TimerConfig};
pub use shared::{Progress, SharedTimer, TimerUpdate};
