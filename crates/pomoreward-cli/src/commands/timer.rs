use std::time::{Duration, Instant};

use clap::Subcommand;
use pomoreward_core::StatusSnapshot;

use crate::client::ApiClient;

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start or resume the timer
    Start,
    /// Pause the timer
    Pause,
    /// Reset to a fresh cycle
    Reset,
    /// Print current timer state as JSON
    Status,
    /// Poll the timer once a second
    Monitor {
        /// How long to watch, in seconds
        #[arg(long, default_value = "30")]
        secs: u64,
    },
}

pub async fn run(client: &ApiClient, action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let json = match action {
        TimerAction::Start => client.get("/start").await?,
        TimerAction::Pause => client.get("/pause").await?,
        TimerAction::Reset => client.get("/reset").await?,
        TimerAction::Status => client.get("/api/timer-status").await?,
        TimerAction::Monitor { secs } => {
            monitor(client, secs).await?;
            return Ok(());
        }
    };
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

/// Print one status line per second until `secs` pass or the cycle completes.
pub async fn monitor(client: &ApiClient, secs: u64) -> Result<(), Box<dyn std::error::Error>> {
    println!("Monitoring timer for {secs} seconds...");
    let started = Instant::now();
    let limit = Duration::from_secs(secs);
    while started.elapsed() < limit {
        let status = client.status().await?;
        println!("{}", status_line(started.elapsed(), &status));
        if status.is_complete {
            println!("Cycle completed!");
            break;
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
    }
    Ok(())
}

pub fn status_line(elapsed: Duration, status: &StatusSnapshot) -> String {
    format!(
        "[{:5.1}s] {} | {} | {:?} | {}/{}",
        elapsed.as_secs_f64(),
        status.remaining_time,
        status.phase.label(),
        status.status,
        status.completed_sessions,
        status.total_sessions,
    )
}
