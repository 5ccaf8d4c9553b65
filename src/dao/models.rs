use serde::{Deserialize, Serialize};
use std::time::SystemTime;
use uuid::Uuid;

/// Player identity within a single match. Not a foreign key to a user
/// account; two matches may name the same player independently.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerInfo {
    /// Display name of the player.
    pub name: String,
    /// Numeric skill adjustment applied for this match.
    pub handicap: f64,
}

/// Per-player aggregate counters for one match.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerStats {
    /// Final score, always equal to the match-level score for this player.
    pub score: i64,
    /// Total points accumulated across all turns.
    pub total_points: i64,
    /// Number of innings the player took part in.
    pub total_innings: i64,
    /// Safety shots played.
    pub safes: i64,
    /// Missed shots.
    pub misses: i64,
    /// Longest run, never smaller than any entry of `run_history`.
    pub best_run: i64,
    /// Scratch fouls committed.
    pub scratches: i64,
    /// Standard fouls committed.
    pub fouls: i64,
    /// Intentional fouls committed.
    pub intentional_fouls: i64,
    /// Fouls committed on the break.
    pub breaking_fouls: i64,
    /// Length of the run in progress when the match ended.
    pub current_run: i64,
    /// Chronological list of run lengths.
    pub run_history: Vec<i64>,
}

/// One recorded event within a match: a shot or sequence ending in a
/// defined outcome.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Turn {
    /// Which player took the turn (1 or 2).
    pub player_number: i64,
    /// Name of the player who took the turn.
    pub player_name: String,
    /// Balls pocketed during the turn, never negative.
    pub balls_pocketed: i64,
    /// Free-form classification of the turn outcome.
    pub action: String,
    /// When the turn happened.
    pub timestamp: SystemTime,
    /// Running score at the time of the turn.
    pub score: i64,
    /// 1-based inning number. Falls back to the turn's position in the
    /// submitted sequence when the client does not supply one.
    pub inning: i64,
    /// Points scored on this turn.
    pub points: i64,
    /// Turn was the opening break.
    pub is_break: bool,
    /// Cue ball was scratched.
    pub is_scratch: bool,
    /// Turn was a safety play.
    pub is_safety_play: bool,
    /// Turn was a defensive shot.
    pub is_defensive_shot: bool,
    /// Turn ended in a foul.
    pub is_foul: bool,
    /// Turn ended in a breaking foul.
    pub is_breaking_foul: bool,
    /// Turn ended in an intentional foul.
    pub is_intentional_foul: bool,
    /// Turn ended in a miss.
    pub is_miss: bool,
    /// Display label for the action.
    pub action_text: String,
    /// Display color hint for the action.
    pub action_color: String,
}

/// Fully-typed, defaulted match record ready for persistence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchRecord {
    /// First player of the match.
    pub player1: PlayerInfo,
    /// Second player of the match.
    pub player2: PlayerInfo,
    /// Aggregate counters for the first player.
    pub player1_stats: PlayerStats,
    /// Aggregate counters for the second player.
    pub player2_stats: PlayerStats,
    /// Chronological turn-by-turn log.
    pub innings: Vec<Turn>,
    /// When the match was played; defaults to ingestion time.
    pub match_date: SystemTime,
    /// Match duration in seconds.
    pub duration: i64,
    /// Final score of the first player; `player1_stats.score` mirrors it.
    pub player1_score: i64,
    /// Final score of the second player; `player2_stats.score` mirrors it.
    pub player2_score: i64,
    /// Score the players were racing to.
    pub target_score: i64,
    /// Game variant, e.g. "8-ball".
    pub game_type: String,
    /// Winning player, when the client reported one.
    pub winner: Option<PlayerInfo>,
    /// Owning account, supplied by the auth gate and never by the payload.
    pub user_id: String,
}

/// Match record as persisted, including the store-generated identity and
/// audit timestamps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredMatch {
    /// Primary key of the match.
    pub id: Uuid,
    /// The canonical record itself.
    #[serde(flatten)]
    pub record: MatchRecord,
    /// Creation timestamp for auditing.
    pub created_at: SystemTime,
    /// Last update timestamp; equals `created_at` (no edit operation).
    pub updated_at: SystemTime,
}
