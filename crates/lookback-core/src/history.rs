use crate::error::Result;
use crate::project::ProjectInfo;
use crate::store::TaskStore;
use chrono::{DateTime, Utc};
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

static LINK_RE: OnceLock<Regex> = OnceLock::new();

fn link_re() -> &'static Regex {
    LINK_RE.get_or_init(|| Regex::new(r"things:///show\?id=([A-Za-z0-9\-]+)").unwrap())
}

/// Fold prior review documents into a last-reviewed timestamp per project id.
///
/// There is no persisted "last reviewed" field anywhere: past documents are
/// treated as an append-only log and the view is recomputed from their
/// embedded links each run, max-by-timestamp per project. Candidates absent
/// from the returned map have never been reviewed.
///
/// Read-only and idempotent; each historical document is scanned once.
pub fn resolve(
    store: &dyn TaskStore,
    save_area: &str,
    candidates: &[ProjectInfo],
) -> Result<HashMap<String, DateTime<Utc>>> {
    let records = store.find_recent_review_documents(save_area)?;
    let wanted: HashSet<&str> = candidates.iter().map(|p| p.id.as_str()).collect();

    let mut last_reviewed: HashMap<String, DateTime<Utc>> = HashMap::new();
    for record in &records {
        for cap in link_re().captures_iter(&record.body) {
            let id = &cap[1];
            if !wanted.contains(id) {
                continue;
            }
            let entry = last_reviewed
                .entry(id.to_string())
                .or_insert(record.created_at);
            if record.created_at > *entry {
                *entry = record.created_at;
            }
        }
    }

    tracing::debug!(
        documents = records.len(),
        resolved = last_reviewed.len(),
        "history scan complete"
    );
    Ok(last_reviewed)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
