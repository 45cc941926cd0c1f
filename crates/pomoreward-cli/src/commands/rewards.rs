use clap::Subcommand;
use serde_json::json;

use crate::client::ApiClient;

#[derive(Subcommand)]
pub enum RewardsAction {
    /// Show the current package and history
    Show,
    /// Collect the current package and start a new cycle
    Collect,
    /// Save the current package's photos and quotes to the data directory
    Export,
    /// Add a custom quote
    AddQuote {
        /// Quote text
        text: String,
    },
    /// List custom quotes
    Quotes,
    /// Earn a template (1-4)
    Earn {
        /// Template id
        id: i64,
    },
    /// List earned templates
    Templates,
}

#[derive(Subcommand)]
pub enum PrefsAction {
    /// Show reward keyword preferences
    Show,
    /// Replace reward keyword preferences
    Set {
        /// Photo keyword (repeatable)
        #[arg(long = "photo", required = true)]
        photo: Vec<String>,
        /// Quote keyword (repeatable)
        #[arg(long = "quote", required = true)]
        quote: Vec<String>,
    },
}

pub async fn run(client: &ApiClient, action: RewardsAction) -> Result<(), Box<dyn std::error::Error>> {
    let json = match action {
        RewardsAction::Show => client.get("/api/rewards").await?,
        RewardsAction::Collect => client.post("/api/collect-rewards", json!({})).await?,
        RewardsAction::Export => client.post("/api/rewards/export", json!({})).await?,
        RewardsAction::AddQuote { text } => {
            client.post("/api/add-quote", json!({ "quote": text })).await?
        }
        RewardsAction::Quotes => client.get("/api/custom-quotes").await?,
        RewardsAction::Earn { id } => {
            client.post("/api/earn-template", json!({ "template_id": id })).await?
        }
        RewardsAction::Templates => client.get("/api/earned-templates").await?,
    };
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

pub async fn run_prefs(client: &ApiClient, action: PrefsAction) -> Result<(), Box<dyn std::error::Error>> {
    let json = match action {
        PrefsAction::Show => client.get("/api/preferences").await?,
        PrefsAction::Set { photo, quote } => {
            client
                .send(
                    reqwest::Method::PUT,
                    "/api/preferences",
                    Some(json!({ "photo_keywords": photo, "quote_keywords": quote })),
                )
                .await?
        }
    };
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
