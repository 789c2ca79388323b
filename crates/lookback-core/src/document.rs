use crate::config::ReviewConfig;
use crate::error::{LookbackError, Result};
use crate::project::ProjectInfo;
use crate::store::{BodyLine, TaskStore};
use chrono::{Datelike, NaiveDate};
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// Suffix appended to the title (via `{mark}`) when truncation dropped
/// candidates, so a partial review is recognizable at a glance.
pub const LIMIT_MARK: &str = "*";

// ---------------------------------------------------------------------------
// ReviewDocument
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ReviewDocument {
    pub title: String,
    /// Final ranked order, preserved verbatim into the committed document.
    pub body_lines: Vec<BodyLine>,
    pub save_area: String,
}

// ---------------------------------------------------------------------------
// Title rendering
// ---------------------------------------------------------------------------

static PLACEHOLDER_RE: OnceLock<Regex> = OnceLock::new();

fn placeholder_re() -> &'static Regex {
    PLACEHOLDER_RE.get_or_init(|| Regex::new(r"\{([a-z_]*)\}").unwrap())
}

/// Render the document title from the configured format template.
///
/// Placeholders: `{year}` (two-digit ISO week-year), `{week}` (zero-padded
/// ISO calendar week), `{mark}` ([`LIMIT_MARK`] when a limit was applied,
/// empty otherwise). Unknown placeholders are a configuration error, not
/// silently dropped. The reference date is an argument so rendering stays
/// deterministic under test.
pub fn render_title(template: &str, week_of: NaiveDate, limited: bool) -> Result<String> {
    let iso = week_of.iso_week();
    let mut out = String::with_capacity(template.len());
    let mut last = 0;
    for cap in placeholder_re().captures_iter(template) {
        let token = match cap.get(0) {
            Some(m) => m,
            None => continue,
        };
        out.push_str(&template[last..token.start()]);
        match &cap[1] {
            "year" => out.push_str(&format!("{:02}", iso.year().rem_euclid(100))),
            "week" => out.push_str(&format!("{:02}", iso.week())),
            "mark" => {
                if limited {
                    out.push_str(LIMIT_MARK);
                }
            }
            other => return Err(LookbackError::UnknownPlaceholder(other.to_string())),
        }
        last = token.end();
    }
    out.push_str(&template[last..]);
    Ok(out)
}

// ---------------------------------------------------------------------------
// Build and commit
// ---------------------------------------------------------------------------

/// Assemble the document for a ranked candidate list. Pure; the store is not
/// touched until [`commit`].
pub fn build(
    config: &ReviewConfig,
    title_format: &str,
    ranked: &[ProjectInfo],
    limited: bool,
    week_of: NaiveDate,
) -> Result<ReviewDocument> {
    let title = render_title(title_format, week_of, limited)?;
    let body_lines = ranked.iter().map(BodyLine::for_project).collect();
    Ok(ReviewDocument {
        title,
        body_lines,
        save_area: config.save_area.clone(),
    })
}

/// Commit the document to the store: the run's terminal step, invoked
/// exactly once. A failed write surfaces immediately; the store either
/// creates the document or leaves nothing behind.
pub fn commit(store: &dyn TaskStore, document: &ReviewDocument) -> Result<()> {
    store.create_document(&document.save_area, &document.title, &document.body_lines)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Selection;
    use crate::store::mock::MockStore;

    fn wednesday() -> NaiveDate {
        // ISO week 32 of 2026.
        NaiveDate::from_ymd_opt(2026, 8, 5).unwrap()
    }

    #[test]
    fn title_substitutes_year_and_week() {
        let title = render_title("Review {year}-cw{week}{mark}", wednesday(), false).unwrap();
        assert_eq!(title, "Review 26-cw32");
    }

    #[test]
    fn title_mark_renders_only_when_limited() {
        let title = render_title("Review {year}-cw{week}{mark}", wednesday(), true).unwrap();
        assert_eq!(title, "Review 26-cw32*");
    }

    #[test]
    fn week_is_zero_padded() {
        // First ISO week of 2026.
        let date = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let title = render_title("{year}-cw{week}", date, false).unwrap();
        assert_eq!(title, "26-cw01");
    }

    #[test]
    fn iso_week_year_used_at_year_boundary() {
        // 2024-12-30 falls in ISO week 1 of 2025.
        let date = NaiveDate::from_ymd_opt(2024, 12, 30).unwrap();
        let title = render_title("{year}-cw{week}", date, false).unwrap();
        assert_eq!(title, "25-cw01");
    }

    #[test]
    fn unknown_placeholder_is_config_error() {
        let err = render_title("Review {bogus}", wednesday(), false).unwrap_err();
        assert!(matches!(err, LookbackError::UnknownPlaceholder(t) if t == "bogus"));
    }

    #[test]
    fn literal_text_passes_through() {
        let title = render_title("plain title, no tokens", wednesday(), false).unwrap();
        assert_eq!(title, "plain title, no tokens");
    }

    #[test]
    fn build_preserves_ranked_order() {
        let config = ReviewConfig {
            selection: Selection::Tag("Work".to_string()),
            save_area: "A1".to_string(),
        };
        let ranked = vec![
            ProjectInfo::new("p2", "Second"),
            ProjectInfo::new("p1", "First"),
        ];
        let doc = build(&config, "{year}-cw{week}", &ranked, false, wednesday()).unwrap();
        assert_eq!(doc.save_area, "A1");
        assert_eq!(doc.body_lines.len(), 2);
        assert_eq!(doc.body_lines[0].link, "things:///show?id=p2");
        assert_eq!(doc.body_lines[1].link, "things:///show?id=p1");
    }

    #[test]
    fn commit_calls_create_exactly_once() {
        let store = MockStore::default();
        let doc = ReviewDocument {
            title: "t".to_string(),
            body_lines: Vec::new(),
            save_area: "A1".to_string(),
        };
        commit(&store, &doc).unwrap();
        assert_eq!(store.create_calls.get(), 1);
        assert_eq!(store.created.borrow()[0].save_area, "A1");
    }
}
