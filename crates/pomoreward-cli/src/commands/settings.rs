use pomoreward_core::storage::Config;
use pomoreward_core::{Phase, TimerConfig};

pub fn run(demo: bool) -> Result<(), Box<dyn std::error::Error>> {
    let timer = if demo {
        TimerConfig::demo()
    } else {
        Config::load()?.timer
    };
    print!("{}", render(&timer, demo));
    Ok(())
}

pub fn render(timer: &TimerConfig, demo: bool) -> String {
    let mode = if demo { "demo" } else { "configured" };
    let mut out = format!("Timer settings ({mode}):\n");
    for phase in [Phase::Focus, Phase::ShortBreak, Phase::LongBreak] {
        out.push_str(&format!(
            "  {:<12} {} seconds\n",
            format!("{}:", phase.label()),
            timer.duration(phase).as_secs()
        ));
    }
    out.push_str(&format!("  Sessions per cycle: {}\n", timer.sessions_per_cycle));
    out.push_str(&format!("  Long break every:   {} sessions\n", timer.long_break_interval));
    out.push_str(&format!(
        "  Total cycle time:   {} seconds\n",
        timer.cycle_duration().as_secs()
    ));
    out
}
