use crate::config::{ReviewConfig, Selection};
use crate::error::Result;
use crate::project::ProjectInfo;
use crate::store::TaskStore;
use std::collections::HashSet;
use std::fmt;

// ---------------------------------------------------------------------------
// LookupWarning
// ---------------------------------------------------------------------------

/// A configured source that matched nothing in the store.
///
/// Deliberately not an error: "nothing currently needs review" is a valid end
/// state, but the human reading the output should be able to tell it apart
/// from a typo in the config, so each empty source is reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupWarning {
    pub source: String,
}

impl fmt::Display for LookupWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no projects matched {}", self.source)
    }
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct SelectionOutcome {
    /// Candidates in source order, deduplicated by id (first occurrence wins).
    pub candidates: Vec<ProjectInfo>,
    pub warnings: Vec<LookupWarning>,
}

/// Resolve a review config into its concrete candidate set.
///
/// Mode validity is already guaranteed by the `Selection` type, so no store
/// query can be issued on behalf of an ambiguous config.
pub fn select(store: &dyn TaskStore, config: &ReviewConfig) -> Result<SelectionOutcome> {
    let mut candidates = Vec::new();
    let mut warnings = Vec::new();

    match &config.selection {
        Selection::Tag(tag) => {
            let projects = store.find_projects_by_tag(tag)?;
            if projects.is_empty() {
                warnings.push(LookupWarning {
                    source: format!("tag '{tag}'"),
                });
            }
            candidates.extend(projects);
        }
        Selection::Areas(ids) => {
            // One query per id keeps input order and lets each empty source
            // warn individually.
            for id in ids {
                let projects = store.find_projects_by_ids(std::slice::from_ref(id))?;
                if projects.is_empty() {
                    warnings.push(LookupWarning {
                        source: format!("id '{id}'"),
                    });
                }
                candidates.extend(projects);
            }
        }
    }

    let mut seen = HashSet::new();
    candidates.retain(|p| seen.insert(p.id.clone()));

    tracing::debug!(
        candidates = candidates.len(),
        warnings = warnings.len(),
        "selection complete"
    );
    Ok(SelectionOutcome {
        candidates,
        warnings,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReviewConfig;
    use crate::store::mock::MockStore;

    fn tag_config(tag: &str) -> ReviewConfig {
        ReviewConfig {
            selection: Selection::Tag(tag.to_string()),
            save_area: "A1".to_string(),
        }
    }

    fn ids_config(ids: &[&str]) -> ReviewConfig {
        ReviewConfig {
            selection: Selection::Areas(ids.iter().map(|s| s.to_string()).collect()),
            save_area: "A1".to_string(),
        }
    }

    #[test]
    fn tag_mode_preserves_store_order() {
        let store = MockStore::default().with_tag(
            "Work",
            vec![
                ProjectInfo::new("p2", "Second"),
                ProjectInfo::new("p1", "First"),
            ],
        );
        let outcome = select(&store, &tag_config("Work")).unwrap();
        let ids: Vec<_> = outcome.candidates.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["p2", "p1"]);
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn tag_mode_dedups_first_occurrence_wins() {
        let store = MockStore::default().with_tag(
            "Work",
            vec![
                ProjectInfo::new("p1", "Original"),
                ProjectInfo::new("p2", "Other"),
                ProjectInfo::new("p1", "Duplicate"),
            ],
        );
        let outcome = select(&store, &tag_config("Work")).unwrap();
        assert_eq!(outcome.candidates.len(), 2);
        assert_eq!(outcome.candidates[0].title, "Original");
    }

    #[test]
    fn id_mode_preserves_input_order() {
        let store = MockStore::default()
            .with_id("a2", vec![ProjectInfo::new("p3", "Three")])
            .with_id(
                "a1",
                vec![
                    ProjectInfo::new("p1", "One"),
                    ProjectInfo::new("p2", "Two"),
                ],
            );
        let outcome = select(&store, &ids_config(&["a2", "a1"])).unwrap();
        let ids: Vec<_> = outcome.candidates.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["p3", "p1", "p2"]);
    }

    #[test]
    fn id_mode_dedups_across_sources() {
        let store = MockStore::default()
            .with_id("a1", vec![ProjectInfo::new("p1", "One")])
            .with_id("a2", vec![ProjectInfo::new("p1", "One again")]);
        let outcome = select(&store, &ids_config(&["a1", "a2"])).unwrap();
        assert_eq!(outcome.candidates.len(), 1);
        assert_eq!(outcome.candidates[0].title, "One");
    }

    #[test]
    fn empty_tag_source_warns_but_succeeds() {
        let store = MockStore::default();
        let outcome = select(&store, &tag_config("Nothing")).unwrap();
        assert!(outcome.candidates.is_empty());
        assert_eq!(outcome.warnings.len(), 1);
        assert_eq!(outcome.warnings[0].to_string(), "no projects matched tag 'Nothing'");
    }

    #[test]
    fn each_empty_id_source_warns_individually() {
        let store = MockStore::default().with_id("a1", vec![ProjectInfo::new("p1", "One")]);
        let outcome = select(&store, &ids_config(&["a1", "ghost1", "ghost2"])).unwrap();
        assert_eq!(outcome.candidates.len(), 1);
        assert_eq!(outcome.warnings.len(), 2);
        assert!(outcome.warnings[0].source.contains("ghost1"));
        assert!(outcome.warnings[1].source.contains("ghost2"));
    }
}
