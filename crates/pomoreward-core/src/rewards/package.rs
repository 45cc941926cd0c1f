use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

use super::quotes;
use crate::error::{Result, ValidationError};

const PHOTO_SOURCE: &str = "https://source.unsplash.com/800x600/";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    pub url: String,
    pub alt: String,
    pub keyword: String,
    pub filename: String,
}

impl Photo {
    pub fn for_keyword(keyword: &str, at: DateTime<Utc>) -> Self {
        // The source takes the bare keyword as the whole query string.
        let query: String = url::form_urlencoded::byte_serialize(keyword.as_bytes()).collect();
        Self {
            url: format!("{PHOTO_SOURCE}?{query}"),
            alt: format!("Photo related to {keyword}"),
            keyword: keyword.to_string(),
            filename: media_filename(keyword, at, "jpg"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    pub keyword: String,
    pub filename: String,
}

impl Quote {
    pub fn for_keyword(keyword: &str, at: DateTime<Utc>) -> Self {
        Self {
            text: quotes::lookup(keyword).to_string(),
            keyword: keyword.to_string(),
            filename: media_filename(keyword, at, "txt"),
        }
    }
}

/// Photos and quotes unlocked by one completed cycle.
///
/// The "empty" package (`completed_at == None`) means nothing is waiting to
/// be collected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardPackage {
    #[serde(default)]
    pub photos: Vec<Photo>,
    #[serde(default)]
    pub quotes: Vec<Quote>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl RewardPackage {
    pub fn build(photo_keywords: &[String], quote_keywords: &[String], at: DateTime<Utc>) -> Self {
        Self {
            photos: photo_keywords
                .iter()
                .map(|k| Photo::for_keyword(k, at))
                .collect(),
            quotes: quote_keywords
                .iter()
                .map(|k| Quote::for_keyword(k, at))
                .collect(),
            completed_at: Some(at),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.completed_at.is_some()
    }
}

/// A quote the user typed in themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomQuote {
    pub id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// `<keyword>_<YYYYmmdd_HHMMSS>.<ext>`, with the keyword reduced to
/// `[A-Za-z0-9_-]` so the name is always a single path component.
fn media_filename(keyword: &str, at: DateTime<Utc>, ext: &str) -> String {
    let stem: String = keyword
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    format!("{stem}_{}.{ext}", at.format("%Y%m%d_%H%M%S"))
}

/// Join a stored filename onto `dir`, refusing anything but a plain name.
///
/// Packages are read back from `user_data.json`, so filenames are checked
/// again at write time.
pub(crate) fn media_path(dir: &Path, filename: &str) -> Result<PathBuf> {
    let mut components = Path::new(filename).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(dir.join(filename)),
        _ => Err(ValidationError::InvalidFilename(filename.to_string()).into()),
    }
}
