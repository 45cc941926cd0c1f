//! pomoreward-server — serves the timer and reward API.
//!
//! Reads `config.toml` from the data directory; flags override it.
//!   RUST_LOG              — tracing filter (default: info,pomoreward_server=debug)
//!   POMOREWARD_DATA_DIR   — data directory override

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use pomoreward_core::storage::{self, Config};
use pomoreward_core::{RewardStore, SharedTimer, TimerConfig};
use pomoreward_server::{build_router, AppState};
use tokio::net::TcpListener;

const PHOTO_TIMEOUT_SECS: u64 = 30;

#[derive(Parser)]
#[command(name = "pomoreward-server", version, about = "Pomoreward HTTP server")]
struct Args {
    /// Use second-scale durations (25s focus, 5s short break, 15s long break)
    #[arg(long)]
    demo: bool,
    /// Listen host (overrides server.host)
    #[arg(long)]
    host: Option<String>,
    /// Listen port (overrides server.port)
    #[arg(long)]
    port: Option<u16>,
    /// Data directory holding config.toml and user_data.json
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,pomoreward_server=debug".into()),
        )
        .init();

    if let Err(e) = run(Args::parse()).await {
        tracing::error!(error = %e, "server stopped");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let data_dir = match args.data_dir {
        Some(dir) => {
            std::fs::create_dir_all(&dir)?;
            dir
        }
        None => storage::data_dir()?,
    };

    let mut config = Config::load_from(&data_dir.join("config.toml"))?;
    if args.demo {
        config.timer = TimerConfig::demo();
    }
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let rewards = RewardStore::open(&data_dir)?;
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(PHOTO_TIMEOUT_SECS))
        .build()?;
    let state = AppState::with_http_client(SharedTimer::new(config.timer.clone()), rewards, http);
    let app = build_router(state);

    let addr = config.server.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(
        %addr,
        data_dir = %data_dir.display(),
        focus_secs = config.timer.focus_secs,
        short_break_secs = config.timer.short_break_secs,
        long_break_secs = config.timer.long_break_secs,
        sessions_per_cycle = config.timer.sessions_per_cycle,
        "listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "could not install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
