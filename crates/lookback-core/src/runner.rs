use crate::config::Config;
use crate::document::{self, ReviewDocument};
use crate::error::Result;
use crate::history;
use crate::project::ProjectInfo;
use crate::rank;
use crate::select::{self, LookupWarning};
use crate::store::TaskStore;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Run results
// ---------------------------------------------------------------------------

/// Per-project review metadata computed for one run. Derived entirely from
/// the history scan; never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewState {
    pub project: ProjectInfo,
    /// Most recent prior mention, `None` if never reviewed.
    pub last_reviewed: Option<DateTime<Utc>>,
}

#[derive(Debug)]
pub struct RunOutcome {
    /// The committed document.
    pub document: ReviewDocument,
    /// Selected projects in final ranked order, with their prior review dates.
    pub selected: Vec<ReviewState>,
    /// Configured sources that matched nothing (non-fatal, see `select`).
    pub warnings: Vec<LookupWarning>,
}

// ---------------------------------------------------------------------------
// run_review
// ---------------------------------------------------------------------------

/// Run one named review end to end: select candidates, derive their review
/// history, rank, truncate, and commit the summary document.
///
/// Stateless batch semantics: nothing is retained between invocations and
/// everything is recomputed from the store each run. Zero candidates still
/// commit an (empty-body) document; "nothing currently needs review" is a
/// valid end state.
pub fn run_review(
    store: &dyn TaskStore,
    config: &Config,
    name: &str,
    limit: Option<i64>,
    week_of: NaiveDate,
) -> Result<RunOutcome> {
    let review = config.review(name)?;
    // Reject a bad limit before any store traffic.
    rank::validate_limit(limit)?;

    let selection = select::select(store, review)?;
    let last_reviewed = history::resolve(store, &review.save_area, &selection.candidates)?;
    let ranked = rank::rank(selection.candidates, &last_reviewed);
    let (ranked, limited) = rank::truncate(ranked, limit)?;

    let document = document::build(review, &config.title_format, &ranked, limited, week_of)?;
    document::commit(store, &document)?;

    let selected = ranked
        .into_iter()
        .map(|project| ReviewState {
            last_reviewed: last_reviewed.get(&project.id).copied(),
            project,
        })
        .collect();

    Ok(RunOutcome {
        document,
        selected,
        warnings: selection.warnings,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
