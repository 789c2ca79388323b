use crate::error::{LookbackError, Result};
use crate::project::ProjectInfo;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Sort candidates least-recently-reviewed first.
///
/// The key is `(last_reviewed, id)`: `Option`'s ordering puts `None` (never
/// reviewed) before any real timestamp, and the id tie-break keeps the order
/// total. Batches reviewed together all share one timestamp, so without it
/// the order between them would be arbitrary.
pub fn rank(
    mut candidates: Vec<ProjectInfo>,
    history: &HashMap<String, DateTime<Utc>>,
) -> Vec<ProjectInfo> {
    candidates.sort_by(|a, b| {
        (history.get(&a.id).copied(), a.id.as_str())
            .cmp(&(history.get(&b.id).copied(), b.id.as_str()))
    });
    candidates
}

/// Normalize a requested limit: `None` and `0` mean "no truncation", a
/// negative value is a configuration error rather than a silent clamp.
pub fn validate_limit(limit: Option<i64>) -> Result<Option<usize>> {
    match limit {
        None | Some(0) => Ok(None),
        Some(n) if n < 0 => Err(LookbackError::NegativeLimit(n)),
        Some(n) => Ok(Some(n as usize)),
    }
}

/// Keep the first `limit` entries of a ranked list. The returned flag records
/// whether anything was actually dropped (it drives the title marker).
pub fn truncate(ranked: Vec<ProjectInfo>, limit: Option<i64>) -> Result<(Vec<ProjectInfo>, bool)> {
    let Some(n) = validate_limit(limit)? else {
        return Ok((ranked, false));
    };
    let limited = n < ranked.len();
    let mut kept = ranked;
    kept.truncate(n);
    Ok((kept, limited))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, day, 12, 0, 0).unwrap()
    }

    fn projects(ids: &[&str]) -> Vec<ProjectInfo> {
        ids.iter().map(|id| ProjectInfo::new(*id, *id)).collect()
    }

    fn ranked_ids(ranked: &[ProjectInfo]) -> Vec<&str> {
        ranked.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn never_reviewed_sorts_before_any_timestamp() {
        let mut history = HashMap::new();
        // Even an ancient review still loses to "never".
        history.insert("ancient".to_string(), Utc.with_ymd_and_hms(1970, 1, 2, 0, 0, 0).unwrap());
        let ranked = rank(projects(&["ancient", "fresh"]), &history);
        assert_eq!(ranked_ids(&ranked), ["fresh", "ancient"]);
    }

    #[test]
    fn oldest_review_first() {
        let mut history = HashMap::new();
        history.insert("a".to_string(), ts(9));
        history.insert("b".to_string(), ts(1));
        history.insert("c".to_string(), ts(5));
        let ranked = rank(projects(&["a", "b", "c"]), &history);
        assert_eq!(ranked_ids(&ranked), ["b", "c", "a"]);
    }

    #[test]
    fn equal_timestamps_tie_break_by_id() {
        let mut history = HashMap::new();
        history.insert("z".to_string(), ts(1));
        history.insert("a".to_string(), ts(1));
        history.insert("m".to_string(), ts(1));
        let ranked = rank(projects(&["z", "a", "m"]), &history);
        assert_eq!(ranked_ids(&ranked), ["a", "m", "z"]);
    }

    #[test]
    fn all_never_reviewed_orders_by_id() {
        let history = HashMap::new();
        let ranked = rank(projects(&["p3", "p1", "p2"]), &history);
        assert_eq!(ranked_ids(&ranked), ["p1", "p2", "p3"]);
    }

    #[test]
    fn rank_is_deterministic() {
        let mut history = HashMap::new();
        history.insert("b".to_string(), ts(2));
        let first = rank(projects(&["c", "a", "b"]), &history);
        let second = rank(projects(&["c", "a", "b"]), &history);
        assert_eq!(first, second);
    }

    #[test]
    fn truncate_keeps_prefix() {
        let ranked = projects(&["a", "b", "c", "d", "e"]);
        let (kept, limited) = truncate(ranked, Some(2)).unwrap();
        assert_eq!(ranked_ids(&kept), ["a", "b"]);
        assert!(limited);
    }

    #[test]
    fn truncate_limit_beyond_len_is_not_limited() {
        let ranked = projects(&["a", "b"]);
        let (kept, limited) = truncate(ranked, Some(10)).unwrap();
        assert_eq!(kept.len(), 2);
        assert!(!limited);
    }

    #[test]
    fn zero_and_absent_limit_mean_no_truncation() {
        let (kept, limited) = truncate(projects(&["a", "b"]), Some(0)).unwrap();
        assert_eq!(kept.len(), 2);
        assert!(!limited);

        let (kept, limited) = truncate(projects(&["a", "b"]), None).unwrap();
        assert_eq!(kept.len(), 2);
        assert!(!limited);
    }

    #[test]
    fn negative_limit_is_config_error() {
        let err = truncate(projects(&["a"]), Some(-3)).unwrap_err();
        assert!(matches!(err, LookbackError::NegativeLimit(-3)));
    }
}
