//! Scripted walk through the API against a running server.

use std::time::Duration;

use crate::client::ApiClient;
use crate::commands::timer::monitor;

pub async fn run(client: &ApiClient) -> Result<(), Box<dyn std::error::Error>> {
    println!("Pomoreward demo");
    println!("Start the server with --demo for second-scale phases.\n");

    let status = client.status().await?;
    println!(
        "Initial: {} {} ({}/{})",
        status.phase.label(),
        status.remaining_time,
        status.completed_sessions,
        status.total_sessions
    );

    println!("\nStarting timer...");
    client.get("/start").await?;
    monitor(client, 10).await?;

    println!("\nPausing for 3 seconds...");
    client.get("/pause").await?;
    tokio::time::sleep(Duration::from_secs(3)).await;
    let paused = client.status().await?;
    println!("Still at {} while paused", paused.remaining_time);

    println!("\nResuming...");
    client.get("/start").await?;
    monitor(client, 20).await?;

    println!("\nResetting...");
    let reset = client.status().await?;
    client.get("/reset").await?;
    println!(
        "Reset from {} ({}/{}) back to a fresh cycle",
        reset.phase.label(),
        reset.completed_sessions,
        reset.total_sessions
    );
    Ok(())
}
