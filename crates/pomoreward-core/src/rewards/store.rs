//! JSON-file reward store.
//!
//! Holds the user's keyword preferences and every package earned so far in
//! `<data_dir>/user_data.json`. The file is rewritten after every change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::package::{media_path, CustomQuote, Quote, RewardPackage};
use crate::error::{Result, ValidationError};

pub const USER_DATA_FILE: &str = "user_data.json";

/// Timer templates that can be earned, by id.
pub const TEMPLATE_IDS: std::ops::RangeInclusive<i64> = 1..=4;

/// Everything persisted in `user_data.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserData {
    #[serde(default)]
    pub photo_keywords: Vec<String>,
    #[serde(default)]
    pub quote_keywords: Vec<String>,
    #[serde(default)]
    pub completed_packages: Vec<RewardPackage>,
    #[serde(default)]
    pub current_package: RewardPackage,
    #[serde(default)]
    pub custom_quotes: Vec<CustomQuote>,
    #[serde(default)]
    pub earned_templates: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub photo_keywords: Vec<String>,
    pub quote_keywords: Vec<String>,
}

#[derive(Debug)]
pub struct RewardStore {
    dir: PathBuf,
    data: UserData,
}

impl RewardStore {
    /// Open the store in `dir`.
    ///
    /// A missing file is created with defaults. A file that is not valid
    /// JSON is replaced by defaults on the next write.
    pub fn open(dir: &Path) -> Result<Self> {
        let path = dir.join(USER_DATA_FILE);
        let store = match std::fs::read_to_string(&path) {
            Ok(content) => {
                let data = serde_json::from_str(&content).unwrap_or_else(|e| {
                    tracing::warn!(path = %path.display(), error = %e, "corrupt user data, starting fresh");
                    UserData::default()
                });
                Self {
                    dir: dir.to_path_buf(),
                    data,
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let store = Self {
                    dir: dir.to_path_buf(),
                    data: UserData::default(),
                };
                store.save()?;
                store
            }
            Err(e) => return Err(e.into()),
        };
        Ok(store)
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(USER_DATA_FILE)
    }

    pub fn photos_dir(&self) -> PathBuf {
        self.dir.join("photos")
    }

    pub fn quotes_dir(&self) -> PathBuf {
        self.dir.join("quotes")
    }

    pub fn data(&self) -> &UserData {
        &self.data
    }

    fn save(&self) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let content = serde_json::to_string_pretty(&self.data)?;
        std::fs::write(self.path(), content)?;
        Ok(())
    }

    // ── Preferences ─────────────────────────────────────────────────

    pub fn preferences(&self) -> Preferences {
        Preferences {
            photo_keywords: self.data.photo_keywords.clone(),
            quote_keywords: self.data.quote_keywords.clone(),
        }
    }

    /// Replace both keyword lists. Entries are trimmed and blanks dropped.
    pub fn update_preferences(
        &mut self,
        photo_keywords: Vec<String>,
        quote_keywords: Vec<String>,
    ) -> Result<Preferences> {
        self.data.photo_keywords = clean_keywords(photo_keywords);
        self.data.quote_keywords = clean_keywords(quote_keywords);
        self.save()?;
        Ok(self.preferences())
    }

    // ── Packages ────────────────────────────────────────────────────

    /// Build a package from the current preferences, make it current, and
    /// append it to the history.
    pub fn on_cycle_complete(&mut self) -> Result<RewardPackage> {
        self.generate_package_at(Utc::now())
    }

    fn generate_package_at(&mut self, at: DateTime<Utc>) -> Result<RewardPackage> {
        let package =
            RewardPackage::build(&self.data.photo_keywords, &self.data.quote_keywords, at);
        self.data.current_package = package.clone();
        self.data.completed_packages.push(package.clone());
        self.save()?;
        tracing::info!(
            photos = package.photos.len(),
            quotes = package.quotes.len(),
            "reward package generated"
        );
        Ok(package)
    }

    /// Generate a package unless one is already waiting to be collected.
    ///
    /// Returns the new package, or `None` if the current one is still uncollected.
    pub fn ensure_package_for_completion(&mut self) -> Result<Option<RewardPackage>> {
        if self.data.current_package.is_ready() {
            return Ok(None);
        }
        self.on_cycle_complete().map(Some)
    }

    pub fn current_package(&self) -> &RewardPackage {
        &self.data.current_package
    }

    pub fn completed_packages(&self) -> &[RewardPackage] {
        &self.data.completed_packages
    }

    /// Mark the current package as collected. History is kept.
    pub fn clear_current_package(&mut self) -> Result<()> {
        self.data.current_package = RewardPackage::default();
        self.save()
    }

    // ── Custom quotes & templates ───────────────────────────────────

    pub fn add_custom_quote(&mut self, text: &str) -> Result<CustomQuote> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::Empty("quote".into()).into());
        }
        let quote = CustomQuote {
            id: uuid::Uuid::new_v4().to_string(),
            text: text.to_string(),
            created_at: Utc::now(),
        };
        self.data.custom_quotes.push(quote.clone());
        self.save()?;
        Ok(quote)
    }

    pub fn custom_quotes(&self) -> &[CustomQuote] {
        &self.data.custom_quotes
    }

    /// Returns `true` if the template was newly earned, `false` if already held.
    pub fn earn_template(&mut self, template_id: i64) -> Result<bool> {
        let id = u8::try_from(template_id)
            .ok()
            .filter(|_| TEMPLATE_IDS.contains(&template_id))
            .ok_or_else(|| ValidationError::OutOfRange {
                field: "template_id".into(),
                value: template_id,
                min: *TEMPLATE_IDS.start(),
                max: *TEMPLATE_IDS.end(),
            })?;
        if self.data.earned_templates.contains(&id) {
            return Ok(false);
        }
        self.data.earned_templates.push(id);
        self.data.earned_templates.sort_unstable();
        self.save()?;
        Ok(true)
    }

    pub fn earned_templates(&self) -> &[u8] {
        &self.data.earned_templates
    }

    // ── Local export ────────────────────────────────────────────────

    /// Write a quote's text to `<data_dir>/quotes/<filename>`.
    pub fn save_quote_locally(&self, quote: &Quote) -> Result<PathBuf> {
        let dir = self.quotes_dir();
        std::fs::create_dir_all(&dir)?;
        let path = media_path(&dir, &quote.filename)?;
        std::fs::write(&path, &quote.text)?;
        Ok(path)
    }
}

fn clean_keywords(keywords: Vec<String>) -> Vec<String> {
    keywords
        .into_iter()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .collect()
}
