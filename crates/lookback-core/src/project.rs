use serde::{Deserialize, Serialize};

/// A source project eligible for review.
///
/// Read-only snapshot fetched fresh from the store each run; lookback never
/// creates or mutates source projects, only links to them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectInfo {
    /// Store-assigned identifier, immutable.
    pub id: String,
    /// Display name, owned by the store and mutable there.
    pub title: String,
    /// Containing area, when the store reports one.
    pub area_id: Option<String>,
}

impl ProjectInfo {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            area_id: None,
        }
    }
}
