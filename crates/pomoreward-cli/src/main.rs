use clap::{Parser, Subcommand};

mod client;
mod commands;

use client::{ApiClient, DEFAULT_URL};

#[derive(Parser)]
#[command(name = "pomoreward-cli", version, about = "Pomoreward CLI")]
struct Cli {
    /// Server base URL
    #[arg(long, global = true, default_value = DEFAULT_URL)]
    url: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Timer control
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Run a short scripted session against the server
    Demo,
    /// Reward packages, custom quotes and templates
    Rewards {
        #[command(subcommand)]
        action: commands::rewards::RewardsAction,
    },
    /// Reward keyword preferences
    Prefs {
        #[command(subcommand)]
        action: commands::rewards::PrefsAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print phase durations and total cycle time
    Settings {
        /// Show the second-scale demo preset instead of the config file
        #[arg(long)]
        demo: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let client = ApiClient::new(&cli.url);
    let result = match cli.command {
        Commands::Timer { action } => commands::timer::run(&client, action).await,
        Commands::Demo => commands::demo::run(&client).await,
        Commands::Rewards { action } => commands::rewards::run(&client, action).await,
        Commands::Prefs { action } => commands::rewards::run_prefs(&client, action).await,
        Commands::Config { action } => commands::config::run(action),
        Commands::Settings { demo } => commands::settings::run(demo),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
