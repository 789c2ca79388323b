use thiserror::Error;

#[derive(Debug, Error)]
pub enum LookbackError {
    // -- configuration: always fatal, never retried ------------------------
    #[error("config file not found: {0}")]
    ConfigNotFound(String),

    #[error("invalid config: {0}")]
    ConfigInvalid(String),

    #[error("no reviews defined in config")]
    NoReviews,

    #[error("unknown review '{0}' — run 'lookback list' to see configured reviews")]
    UnknownReview(String),

    #[error("review '{0}': one of 'search_tag' or 'area_ids' must be set")]
    ModeMissing(String),

    #[error("review '{0}': 'search_tag' and 'area_ids' are mutually exclusive")]
    ModeConflict(String),

    #[error("unknown placeholder '{{{0}}}' in title format")]
    UnknownPlaceholder(String),

    #[error("limit must be non-negative, got {0}")]
    NegativeLimit(i64),

    // -- store I/O: fatal, no automatic retry ------------------------------
    #[error("store error: {0}")]
    Store(String),

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LookbackError>;
