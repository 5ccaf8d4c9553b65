//! PlayerInfo normalizer.

use serde_json::Value;

use super::ValidationError;
use super::value::{coerce_f64, coerce_string, field};
use crate::dao::models::PlayerInfo;

/// Coerce a raw player descriptor into a [`PlayerInfo`], strict about
/// presence: a match cannot be owned without two named players, so an
/// absent or null descriptor fails the whole ingestion.
///
/// `position` is the player's slot (1 or 2) and feeds the name placeholder.
pub fn normalize_player(
    raw: Option<&Value>,
    position: u8,
    field_name: &'static str,
) -> Result<PlayerInfo, ValidationError> {
    match raw {
        Some(value) if !value.is_null() => {
            Ok(normalize_descriptor(value, &format!("Unknown Player {position}")))
        }
        _ => Err(ValidationError::new(field_name, "player info required")),
    }
}

/// Lenient variant for descriptors that are optional by contract (the
/// winner object): the caller has already established presence.
pub fn normalize_winner(raw: &Value) -> PlayerInfo {
    normalize_descriptor(raw, "Unknown Player")
}

fn normalize_descriptor(raw: &Value, name_placeholder: &str) -> PlayerInfo {
    PlayerInfo {
        name: coerce_string(field(raw, "name"), name_placeholder),
        handicap: coerce_f64(field(raw, "handicap")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_player_is_rejected() {
        let err = normalize_player(None, 1, "player1").unwrap_err();
        assert_eq!(err.field, "player1");

        let err = normalize_player(Some(&json!(null)), 2, "player2").unwrap_err();
        assert_eq!(err.field, "player2");
    }

    #[test]
    fn name_and_handicap_coerce_with_fallbacks() {
        let player = normalize_player(
            Some(&json!({"name": "Efren", "handicap": 9.5})),
            1,
            "player1",
        )
        .unwrap();
        assert_eq!(player.name, "Efren");
        assert_eq!(player.handicap, 9.5);

        let player = normalize_player(Some(&json!({})), 2, "player2").unwrap();
        assert_eq!(player.name, "Unknown Player 2");
        assert_eq!(player.handicap, 0.0);
    }

    #[test]
    fn non_numeric_handicap_falls_back_to_zero() {
        let player = normalize_player(
            Some(&json!({"name": "A", "handicap": "scratch"})),
            1,
            "player1",
        )
        .unwrap();
        assert_eq!(player.handicap, 0.0);
    }

    #[test]
    fn winner_placeholder_carries_no_position() {
        let winner = normalize_winner(&json!({"handicap": 3}));
        assert_eq!(winner.name, "Unknown Player");
        assert_eq!(winner.handicap, 3.0);
    }
}
