use crate::error::{LookbackError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

pub const DEFAULT_TITLE_FORMAT: &str = "Review {year}-cw{week}{mark}";

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// How a review resolves its candidate projects. The two modes are mutually
/// exclusive; holding them as a variant (rather than two optional fields)
/// makes an invalid combination unrepresentable after config load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// All projects whose containing area carries this tag, in store order.
    Tag(String),
    /// Explicit ordered list of area (or project) identifiers.
    Areas(Vec<String>),
}

impl Selection {
    /// Short human-readable form for listings, e.g. `tag:Work` or `3 ids`.
    pub fn describe(&self) -> String {
        match self {
            Selection::Tag(tag) => format!("tag:{tag}"),
            Selection::Areas(ids) => format!("{} ids", ids.len()),
        }
    }
}

// ---------------------------------------------------------------------------
// ReviewConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ReviewConfig {
    pub selection: Selection,
    /// Area the generated review project is written to.
    pub save_area: String,
}

/// On-disk shape of one review entry: two optional fields, validated into
/// `Selection` before anything else runs.
#[derive(Debug, Deserialize)]
struct RawReview {
    #[serde(default)]
    search_tag: Option<String>,
    #[serde(default)]
    area_ids: Option<Vec<String>>,
    save_area: String,
}

impl RawReview {
    fn validate(self, name: &str) -> Result<ReviewConfig> {
        // Blank strings and empty lists count as absent.
        let tag = self.search_tag.filter(|t| !t.trim().is_empty());
        let ids = self.area_ids.filter(|ids| !ids.is_empty());
        let selection = match (tag, ids) {
            (Some(tag), None) => Selection::Tag(tag),
            (None, Some(ids)) => Selection::Areas(ids),
            (Some(_), Some(_)) => return Err(LookbackError::ModeConflict(name.to_string())),
            (None, None) => return Err(LookbackError::ModeMissing(name.to_string())),
        };
        Ok(ReviewConfig {
            selection,
            save_area: self.save_area,
        })
    }
}

// ---------------------------------------------------------------------------
// GtdConfig
// ---------------------------------------------------------------------------

/// Settings for the guided checklist walkthrough. The selection engine never
/// reads these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GtdConfig {
    #[serde(default = "default_waiting_for_tag")]
    pub waiting_for_tag: String,
    #[serde(default = "default_someday_tag")]
    pub someday_tag: String,
    #[serde(default = "default_review_frequency_days")]
    pub review_frequency_days: u32,
}

fn default_waiting_for_tag() -> String {
    "waiting for".to_string()
}

fn default_someday_tag() -> String {
    "someday".to_string()
}

fn default_review_frequency_days() -> u32 {
    7
}

impl Default for GtdConfig {
    fn default() -> Self {
        Self {
            waiting_for_tag: default_waiting_for_tag(),
            someday_tag: default_someday_tag(),
            review_frequency_days: default_review_frequency_days(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config (top-level)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub title_format: String,
    pub reviews: BTreeMap<String, ReviewConfig>,
    pub gtd: GtdConfig,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default = "default_title_format")]
    title_format: String,
    #[serde(default)]
    reviews: BTreeMap<String, RawReview>,
    #[serde(default)]
    gtd_review: GtdConfig,
}

fn default_title_format() -> String {
    DEFAULT_TITLE_FORMAT.to_string()
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(LookbackError::ConfigNotFound(path.display().to_string()));
        }
        let data = std::fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    /// Parse and validate a config document. Every review entry must pass
    /// mode validation here; a config that reaches the engine can no longer
    /// be in an ambiguous state.
    pub fn from_json(data: &str) -> Result<Self> {
        let raw: RawConfig = serde_json::from_str(data)
            .map_err(|e| LookbackError::ConfigInvalid(e.to_string()))?;
        if raw.reviews.is_empty() {
            return Err(LookbackError::NoReviews);
        }
        let mut reviews = BTreeMap::new();
        for (name, entry) in raw.reviews {
            let validated = entry.validate(&name)?;
            reviews.insert(name, validated);
        }
        Ok(Config {
            title_format: raw.title_format,
            reviews,
            gtd: raw.gtd_review,
        })
    }

    pub fn review(&self, name: &str) -> Result<&ReviewConfig> {
        self.reviews
            .get(name)
            .ok_or_else(|| LookbackError::UnknownReview(name.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
