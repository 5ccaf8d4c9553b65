//! Turn normalizer.

use std::time::SystemTime;

use serde_json::Value;

use super::ValidationError;
use super::value::{coerce_bool, coerce_i64, coerce_string, coerce_timestamp, field};
use crate::dao::models::Turn;

/// Coerce a raw innings payload into an ordered turn log.
///
/// Null entries are dropped before any numbering happens, so a retained
/// turn derives its `inning` fallback from its position in the *filtered*
/// sequence (`index + 1`). That fallback is positional, not a paired-turn
/// round number; clients that care about real inning numbering must send
/// `inning` explicitly. Turns are otherwise normalized independently; no
/// cross-turn consistency is enforced, and a decreasing score is accepted
/// as-is.
///
/// Absent input is an empty log. Input that is present but not a sequence
/// fails ingestion.
pub fn normalize_turns(
    raw: Option<&Value>,
    received_at: SystemTime,
) -> Result<Vec<Turn>, ValidationError> {
    let entries = match raw {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(entries)) => entries,
        Some(_) => {
            return Err(ValidationError::new("innings", "innings must be a sequence"));
        }
    };

    Ok(entries
        .iter()
        .filter(|entry| !entry.is_null())
        .enumerate()
        .map(|(index, entry)| normalize_turn(entry, index, received_at))
        .collect())
}

fn normalize_turn(raw: &Value, index: usize, received_at: SystemTime) -> Turn {
    let player_number = positive_or(coerce_i64(field(raw, "playerNumber")), 1);
    let player_name = coerce_string(
        field(raw, "playerName"),
        &format!("Player {player_number}"),
    );
    let inning = positive_or(coerce_i64(field(raw, "inning")), index as i64 + 1);

    Turn {
        player_number,
        player_name,
        balls_pocketed: coerce_i64(field(raw, "ballsPocketed")).max(0),
        action: coerce_string(field(raw, "action"), "unknown"),
        timestamp: coerce_timestamp(field(raw, "timestamp"), received_at),
        score: coerce_i64(field(raw, "score")),
        inning,
        points: coerce_i64(field(raw, "points")),
        is_break: coerce_bool(field(raw, "isBreak")),
        is_scratch: coerce_bool(field(raw, "isScratch")),
        is_safety_play: coerce_bool(field(raw, "isSafetyPlay")),
        is_defensive_shot: coerce_bool(field(raw, "isDefensiveShot")),
        is_foul: coerce_bool(field(raw, "isFoul")),
        is_breaking_foul: coerce_bool(field(raw, "isBreakingFoul")),
        is_intentional_foul: coerce_bool(field(raw, "isIntentionalFoul")),
        is_miss: coerce_bool(field(raw, "isMiss")),
        action_text: coerce_string(field(raw, "actionText"), ""),
        action_color: coerce_string(field(raw, "actionColor"), ""),
    }
}

/// 1-based fields treat zero and negative values like absence.
fn positive_or(value: i64, fallback: i64) -> i64 {
    if value >= 1 { value } else { fallback }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::UNIX_EPOCH;

    fn now() -> SystemTime {
        UNIX_EPOCH
    }

    #[test]
    fn absent_innings_are_an_empty_log() {
        assert!(normalize_turns(None, now()).unwrap().is_empty());
        assert!(normalize_turns(Some(&json!(null)), now()).unwrap().is_empty());
    }

    #[test]
    fn non_sequence_innings_are_rejected() {
        let err = normalize_turns(Some(&json!({"playerNumber": 1})), now()).unwrap_err();
        assert_eq!(err.field, "innings");

        let err = normalize_turns(Some(&json!("first")), now()).unwrap_err();
        assert_eq!(err.field, "innings");
    }

    #[test]
    fn null_entries_are_dropped_and_never_renumbered() {
        let raw = json!([
            {"playerNumber": 1, "ballsPocketed": 2},
            null,
            {"playerNumber": 2, "ballsPocketed": 1, "isFoul": true},
        ]);

        let turns = normalize_turns(Some(&raw), now()).unwrap();
        assert_eq!(turns.len(), 2);
        // Positional fallback counts within the filtered sequence.
        assert_eq!(turns[0].inning, 1);
        assert_eq!(turns[1].inning, 2);
        assert!(turns[1].is_foul);
        assert!(!turns[0].is_foul);
    }

    #[test]
    fn explicit_inning_wins_over_position() {
        let raw = json!([
            {"inning": 4},
            {},
        ]);

        let turns = normalize_turns(Some(&raw), now()).unwrap();
        assert_eq!(turns[0].inning, 4);
        assert_eq!(turns[1].inning, 2);
    }

    #[test]
    fn zero_or_garbage_inning_falls_back_to_position() {
        let raw = json!([
            {"inning": 0},
            {"inning": "third"},
        ]);

        let turns = normalize_turns(Some(&raw), now()).unwrap();
        assert_eq!(turns[0].inning, 1);
        assert_eq!(turns[1].inning, 2);
    }

    #[test]
    fn names_fall_back_to_the_player_number() {
        let raw = json!([
            {"playerNumber": 2},
            {},
        ]);

        let turns = normalize_turns(Some(&raw), now()).unwrap();
        assert_eq!(turns[0].player_name, "Player 2");
        assert_eq!(turns[1].player_number, 1);
        assert_eq!(turns[1].player_name, "Player 1");
    }

    #[test]
    fn numeric_fields_default_and_clamp() {
        let raw = json!([
            {"ballsPocketed": -3, "score": "9", "points": null},
        ]);

        let turn = &normalize_turns(Some(&raw), now()).unwrap()[0];
        assert_eq!(turn.balls_pocketed, 0);
        assert_eq!(turn.score, 9);
        assert_eq!(turn.points, 0);
        assert_eq!(turn.action, "unknown");
    }

    #[test]
    fn flags_default_to_false() {
        let turn = &normalize_turns(Some(&json!([{}])), now()).unwrap()[0];
        assert!(!turn.is_break);
        assert!(!turn.is_scratch);
        assert!(!turn.is_safety_play);
        assert!(!turn.is_defensive_shot);
        assert!(!turn.is_foul);
        assert!(!turn.is_breaking_foul);
        assert!(!turn.is_intentional_foul);
        assert!(!turn.is_miss);
    }

    #[test]
    fn unparseable_timestamps_take_the_ingestion_instant() {
        let raw = json!([
            {"timestamp": "not a date"},
            {"timestamp": "2024-03-01T12:00:00Z"},
        ]);

        let turns = normalize_turns(Some(&raw), now()).unwrap();
        assert_eq!(turns[0].timestamp, now());
        assert_ne!(turns[1].timestamp, now());
    }

    #[test]
    fn a_decreasing_score_is_accepted_verbatim() {
        // Cross-turn consistency is intentionally not enforced.
        let raw = json!([
            {"score": 10},
            {"score": 4},
        ]);

        let turns = normalize_turns(Some(&raw), now()).unwrap();
        assert_eq!(turns[0].score, 10);
        assert_eq!(turns[1].score, 4);
    }
}
