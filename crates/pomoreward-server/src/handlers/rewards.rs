//! Preferences, reward packages, custom quotes and earned templates.

use axum::{extract::State, Json};
use pomoreward_core::rewards::{self, CustomQuote, Preferences, RewardPackage};
use pomoreward_core::timer::StatusSnapshot;
use serde::{Deserialize, Serialize};

use super::timer::log_event;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct RewardsResponse {
    pub current_package: RewardPackage,
    pub completed_packages: Vec<RewardPackage>,
}

#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote: Option<CustomQuote>,
}

#[derive(Debug, Deserialize)]
pub struct AddQuoteRequest {
    #[serde(default)]
    pub quote: String,
}

#[derive(Debug, Deserialize)]
pub struct EarnTemplateRequest {
    pub template_id: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ExportResponse {
    pub saved: Vec<String>,
    pub failed: usize,
}

/// GET /api/preferences
pub async fn get_preferences(State(state): State<AppState>) -> Json<Preferences> {
    Json(state.rewards().preferences())
}

/// PUT /api/preferences
///
/// Both keyword lists are required and must keep at least one entry after
/// blank lines are dropped.
pub async fn put_preferences(
    State(state): State<AppState>,
    Json(req): Json<Preferences>,
) -> Result<Json<Preferences>, ApiError> {
    let has_entries = |keywords: &[String]| keywords.iter().any(|k| !k.trim().is_empty());
    if !has_entries(&req.photo_keywords) {
        return Err(ApiError::bad_request("photo_keywords: at least one keyword is required"));
    }
    if !has_entries(&req.quote_keywords) {
        return Err(ApiError::bad_request("quote_keywords: at least one keyword is required"));
    }
    let prefs = state
        .rewards()
        .update_preferences(req.photo_keywords, req.quote_keywords)?;
    Ok(Json(prefs))
}

/// GET /api/rewards
pub async fn get_rewards(State(state): State<AppState>) -> Json<RewardsResponse> {
    let store = state.rewards();
    Json(RewardsResponse {
        current_package: store.current_package().clone(),
        completed_packages: store.completed_packages().to_vec(),
    })
}

/// POST /api/collect-rewards
///
/// Clears the current package and starts a new cycle.
pub async fn collect_rewards(
    State(state): State<AppState>,
) -> Result<Json<StatusSnapshot>, ApiError> {
    let update = state.collect_rewards()?;
    log_event(&update);
    Ok(Json(update.snapshot))
}

/// POST /api/add-quote
pub async fn add_quote(
    State(state): State<AppState>,
    Json(req): Json<AddQuoteRequest>,
) -> Result<Json<ActionResponse>, ApiError> {
    if req.quote.trim().is_empty() {
        return Err(ApiError::bad_request("Quote cannot be empty"));
    }
    let quote = state.rewards().add_custom_quote(&req.quote)?;
    Ok(Json(ActionResponse {
        success: true,
        message: "Quote added successfully".into(),
        quote: Some(quote),
    }))
}

/// GET /api/custom-quotes
pub async fn custom_quotes(State(state): State<AppState>) -> Json<Vec<CustomQuote>> {
    Json(state.rewards().custom_quotes().to_vec())
}

/// POST /api/earn-template
pub async fn earn_template(
    State(state): State<AppState>,
    Json(req): Json<EarnTemplateRequest>,
) -> Result<Json<ActionResponse>, ApiError> {
    let template_id = req
        .template_id
        .filter(|id| rewards::TEMPLATE_IDS.contains(id))
        .ok_or_else(|| ApiError::bad_request("Invalid template ID"))?;

    let earned = state.rewards().earn_template(template_id)?;
    let (success, message) = if earned {
        (true, format!("Template {template_id} earned!"))
    } else {
        (false, format!("Template {template_id} already earned!"))
    };
    Ok(Json(ActionResponse {
        success,
        message,
        quote: None,
    }))
}

/// GET /api/earned-templates
pub async fn earned_templates(State(state): State<AppState>) -> Json<Vec<u8>> {
    Json(state.rewards().earned_templates().to_vec())
}

/// POST /api/rewards/export
///
/// Writes the current package's quotes to disk and downloads its photos.
/// Individual failures are logged and counted, not fatal.
pub async fn export_rewards(
    State(state): State<AppState>,
) -> Result<Json<ExportResponse>, ApiError> {
    let mut saved = Vec::new();
    let mut failed = 0;

    let (package, photos_dir) = {
        let store = state.rewards();
        let package = store.current_package().clone();
        for quote in &package.quotes {
            match store.save_quote_locally(quote) {
                Ok(path) => saved.push(path.display().to_string()),
                Err(e) => {
                    tracing::warn!(filename = %quote.filename, error = %e, "saving quote failed");
                    failed += 1;
                }
            }
        }
        (package, store.photos_dir())
    };

    for photo in &package.photos {
        match rewards::save_photo_locally(&state.http, photo, &photos_dir).await {
            Ok(path) => saved.push(path.display().to_string()),
            Err(e) => {
                tracing::warn!(url = %photo.url, error = %e, "downloading photo failed");
                failed += 1;
            }
        }
    }

    Ok(Json(ExportResponse { saved, failed }))
}
