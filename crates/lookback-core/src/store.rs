use crate::error::Result;
use crate::project::ProjectInfo;
use chrono::{DateTime, Utc};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// One line of a review document body: a project's title plus a link back to
/// the source project. Line order in a committed document is exactly the
/// ranked order and is what future history scans recover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BodyLine {
    pub title: String,
    pub link: String,
}

impl BodyLine {
    pub fn for_project(project: &ProjectInfo) -> Self {
        Self {
            title: project.title.clone(),
            link: show_url(&project.id),
        }
    }

    /// Markdown form used in the committed document's notes.
    pub fn render(&self) -> String {
        format!("[Link]({})", self.link)
    }
}

/// A previously committed review document, as the history resolver sees it:
/// when it was created and the raw body text its links are parsed from.
#[derive(Debug, Clone)]
pub struct ReviewRecord {
    pub created_at: DateTime<Utc>,
    pub body: String,
}

// ---------------------------------------------------------------------------
// TaskStore
// ---------------------------------------------------------------------------

/// Read and write access to the external task store. The engine only ever
/// talks to the store through this trait; the production implementation is
/// [`crate::things::ThingsStore`].
pub trait TaskStore {
    /// Projects whose containing area carries `tag`, in store-reported order.
    fn find_projects_by_tag(&self, tag: &str) -> Result<Vec<ProjectInfo>>;

    /// Projects for each identifier in `ids`, preserving input order. An id
    /// may name an area (all its projects) or a single project.
    fn find_projects_by_ids(&self, ids: &[String]) -> Result<Vec<ProjectInfo>>;

    /// Previously created review documents in `save_area`, with body text.
    fn find_recent_review_documents(&self, save_area: &str) -> Result<Vec<ReviewRecord>>;

    /// Commit a new review document. Invoked at most once per run, as the
    /// terminal step; there is no partial-failure state to clean up.
    fn create_document(&self, save_area: &str, title: &str, body: &[BodyLine]) -> Result<()>;
}

// ---------------------------------------------------------------------------
// things:/// link-addressing convention
// ---------------------------------------------------------------------------

pub const URL_SCHEME: &str = "things:///";

/// Deep link to a single item (project, area, or built-in list) by id.
pub fn show_url(id: &str) -> String {
    format!("{URL_SCHEME}show?id={id}")
}

/// Deep link running a free-text query, e.g. opening a tag view.
pub fn query_url(text: &str) -> String {
    format!("{URL_SCHEME}show?query={}", percent_encode(text))
}

/// Creation endpoint carrying a JSON payload.
pub fn json_url(payload: &str) -> String {
    format!("{URL_SCHEME}json?data={}", percent_encode(payload))
}

const HEX: &[u8; 16] = b"0123456789ABCDEF";

/// RFC 3986 percent-encoding; unreserved characters pass through unchanged.
pub fn percent_encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char)
            }
            _ => {
                out.push('%');
                out.push(HEX[(b >> 4) as usize] as char);
                out.push(HEX[(b & 0x0f) as usize] as char);
            }
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Mock store (test double)
// ---------------------------------------------------------------------------


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
