//! PlayerStats normalizer.

use serde_json::Value;

use super::value::{coerce_i64, field};
use crate::dao::models::PlayerStats;

/// Coerce a raw stats block into a [`PlayerStats`].
///
/// Never fails: absent prior stats are a valid starting state, unlike
/// absent player identity, so missing input yields all-zero counters and an
/// empty run history. After coercion, `best_run` is raised to the largest
/// entry of `run_history` so the stored value is never smaller than any
/// historical run.
pub fn normalize_stats(raw: Option<&Value>) -> PlayerStats {
    let Some(raw) = raw.filter(|value| !value.is_null()) else {
        return PlayerStats::default();
    };

    let run_history = normalize_run_history(field(raw, "runHistory"));

    let mut stats = PlayerStats {
        score: coerce_i64(field(raw, "score")),
        total_points: coerce_i64(field(raw, "totalPoints")),
        total_innings: coerce_i64(field(raw, "totalInnings")),
        safes: coerce_i64(field(raw, "safes")),
        misses: coerce_i64(field(raw, "misses")),
        best_run: coerce_i64(field(raw, "bestRun")),
        scratches: coerce_i64(field(raw, "scratches")),
        fouls: coerce_i64(field(raw, "fouls")),
        intentional_fouls: coerce_i64(field(raw, "intentionalFouls")),
        breaking_fouls: coerce_i64(field(raw, "breakingFouls")),
        current_run: coerce_i64(field(raw, "currentRun")),
        run_history,
    };

    if let Some(longest) = stats.run_history.iter().copied().max() {
        stats.best_run = stats.best_run.max(longest);
    }

    stats
}

/// Non-array history collapses to empty; non-numeric entries coerce to 0 so
/// the chronological positions survive.
fn normalize_run_history(raw: Option<&Value>) -> Vec<i64> {
    match raw {
        Some(Value::Array(entries)) => entries.iter().map(|entry| coerce_i64(Some(entry))).collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_stats_yield_zeroed_counters() {
        let stats = normalize_stats(None);
        assert_eq!(stats, PlayerStats::default());

        let stats = normalize_stats(Some(&json!(null)));
        assert!(stats.run_history.is_empty());
        assert_eq!(stats.best_run, 0);
    }

    #[test]
    fn counters_coerce_with_zero_fallback() {
        let stats = normalize_stats(Some(&json!({
            "score": "14",
            "totalPoints": 21,
            "misses": "many",
            "fouls": 2.7,
        })));
        assert_eq!(stats.score, 14);
        assert_eq!(stats.total_points, 21);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.fouls, 2);
        assert_eq!(stats.safes, 0);
    }

    #[test]
    fn best_run_is_raised_to_history_maximum() {
        // bestRun unset: defaults to 0 then rises to the history max.
        let stats = normalize_stats(Some(&json!({"score": 10, "runHistory": [3, 7, 2]})));
        assert_eq!(stats.best_run, 7);
        assert_eq!(stats.run_history, vec![3, 7, 2]);

        // bestRun already larger than anything in history: kept.
        let stats = normalize_stats(Some(&json!({"bestRun": 9, "runHistory": [3, 7]})));
        assert_eq!(stats.best_run, 9);
    }

    #[test]
    fn best_run_unchanged_without_history() {
        let stats = normalize_stats(Some(&json!({"bestRun": 4})));
        assert_eq!(stats.best_run, 4);

        let stats = normalize_stats(Some(&json!({"bestRun": 4, "runHistory": "none"})));
        assert_eq!(stats.best_run, 4);
        assert!(stats.run_history.is_empty());
    }

    #[test]
    fn non_numeric_history_entries_become_zero() {
        let stats = normalize_stats(Some(&json!({"runHistory": [5, "x", null, 2]})));
        assert_eq!(stats.run_history, vec![5, 0, 0, 2]);
        assert_eq!(stats.best_run, 5);
    }
}
