//! Match assembler: composes the three normalizers plus the top-level
//! match fields into one canonical record.

use super::IngestContext;
use super::ValidationError;
use super::player::{normalize_player, normalize_winner};
use super::stats::normalize_stats;
use super::turns::normalize_turns;
use super::value::{coerce_i64, coerce_string, coerce_timestamp};
use crate::dao::models::{MatchRecord, PlayerInfo};
use crate::dto::matches::MatchPayload;

/// Produce a canonical [`MatchRecord`] from a raw payload, or fail on the
/// first invalid required part. Nothing partial ever leaves this function.
///
/// Ordering matters in two places: both stats blocks are normalized
/// *before* their `score` is overwritten with the top-level score field
/// (a client-submitted `stats.score` is always discarded), and the winner
/// is resolved only after both players have been normalized.
pub fn assemble_match(
    payload: MatchPayload,
    ctx: &IngestContext,
) -> Result<MatchRecord, ValidationError> {
    let player1 = normalize_player(payload.player1.as_ref(), 1, "player1")?;
    let player2 = normalize_player(payload.player2.as_ref(), 2, "player2")?;

    let mut player1_stats = normalize_stats(payload.player1_stats.as_ref());
    let mut player2_stats = normalize_stats(payload.player2_stats.as_ref());
    let innings = normalize_turns(payload.innings.as_ref(), ctx.received_at)?;

    let player1_score = coerce_i64(payload.player1_score.as_ref());
    let player2_score = coerce_i64(payload.player2_score.as_ref());
    player1_stats.score = player1_score;
    player2_stats.score = player2_score;

    let winner = payload
        .winner
        .as_ref()
        .filter(|value| !value.is_null())
        .map(|raw| resolve_winner(normalize_winner(raw), &player1, &player2));

    Ok(MatchRecord {
        player1,
        player2,
        player1_stats,
        player2_stats,
        innings,
        match_date: coerce_timestamp(payload.match_date.as_ref(), ctx.received_at),
        duration: coerce_i64(payload.duration.as_ref()),
        player1_score,
        player2_score,
        target_score: coerce_i64(payload.target_score.as_ref()),
        game_type: coerce_string(payload.game_type.as_ref(), "8-ball"),
        winner,
        user_id: ctx.user_id.clone(),
    })
}

/// Tie the submitted winner back to one of the match players by exact name
/// equality, player 1 checked first.
///
/// Name matching is the only identity available in the payload; when both
/// players share a name the winner resolves to player 1, and a name that
/// matches neither player is kept verbatim. Clients wanting unambiguous
/// resolution should submit distinct player names.
fn resolve_winner(winner: PlayerInfo, player1: &PlayerInfo, player2: &PlayerInfo) -> PlayerInfo {
    if winner.name == player1.name {
        player1.clone()
    } else if winner.name == player2.name {
        player2.clone()
    } else {
        winner
    }
}
