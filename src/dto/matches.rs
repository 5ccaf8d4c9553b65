use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    dao::models::{PlayerInfo, PlayerStats, StoredMatch, Turn},
    dto::format_system_time,
};

/// Loosely-typed match submission as the client sends it.
///
/// Known top-level keys are named, but every field stays an untyped JSON
/// value: the assembler owns all coercion and defaulting, and untyped data
/// never travels past it. Unknown keys (including a forged `userId`) are
/// ignored.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct MatchPayload {
    /// First player descriptor; required by the assembler.
    #[schema(value_type = Option<Object>)]
    pub player1: Option<Value>,
    /// Second player descriptor; required by the assembler.
    #[schema(value_type = Option<Object>)]
    pub player2: Option<Value>,
    /// Aggregate counters reported for the first player.
    #[schema(value_type = Option<Object>)]
    pub player1_stats: Option<Value>,
    /// Aggregate counters reported for the second player.
    #[schema(value_type = Option<Object>)]
    pub player2_stats: Option<Value>,
    /// Turn-by-turn log; must be a sequence when present.
    #[schema(value_type = Option<Object>)]
    pub innings: Option<Value>,
    /// When the match was played.
    #[schema(value_type = Option<Object>)]
    pub match_date: Option<Value>,
    /// Match duration in seconds.
    #[schema(value_type = Option<Object>)]
    pub duration: Option<Value>,
    /// Final score of the first player.
    #[schema(value_type = Option<Object>)]
    pub player1_score: Option<Value>,
    /// Final score of the second player.
    #[schema(value_type = Option<Object>)]
    pub player2_score: Option<Value>,
    /// Score the players were racing to.
    #[schema(value_type = Option<Object>)]
    pub target_score: Option<Value>,
    /// Game variant name.
    #[schema(value_type = Option<Object>)]
    pub game_type: Option<Value>,
    /// Winning player descriptor.
    #[schema(value_type = Option<Object>)]
    pub winner: Option<Value>,
}

/// Player identity as returned to clients.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlayerInfoSummary {
    /// Display name.
    pub name: String,
    /// Skill adjustment for this match.
    pub handicap: f64,
}

/// Per-player counters as returned to clients.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStatsSummary {
    /// Final score, mirrors the match-level score field.
    pub score: i64,
    /// Total points accumulated.
    pub total_points: i64,
    /// Innings taken part in.
    pub total_innings: i64,
    /// Safety shots played.
    pub safes: i64,
    /// Missed shots.
    pub misses: i64,
    /// Longest run.
    pub best_run: i64,
    /// Scratch fouls.
    pub scratches: i64,
    /// Standard fouls.
    pub fouls: i64,
    /// Intentional fouls.
    pub intentional_fouls: i64,
    /// Fouls on the break.
    pub breaking_fouls: i64,
    /// Run in progress at match end.
    pub current_run: i64,
    /// Chronological run lengths.
    pub run_history: Vec<i64>,
}

/// One turn of the match log as returned to clients.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TurnSummary {
    /// Which player took the turn.
    pub player_number: i64,
    /// Name of that player.
    pub player_name: String,
    /// Balls pocketed during the turn.
    pub balls_pocketed: i64,
    /// Classification of the outcome.
    pub action: String,
    /// RFC3339 timestamp of the turn.
    pub timestamp: String,
    /// Running score at the time.
    pub score: i64,
    /// 1-based inning number.
    pub inning: i64,
    /// Points scored on the turn.
    pub points: i64,
    /// Opening break flag.
    pub is_break: bool,
    /// Scratch flag.
    pub is_scratch: bool,
    /// Safety-play flag.
    pub is_safety_play: bool,
    /// Defensive-shot flag.
    pub is_defensive_shot: bool,
    /// Foul flag.
    pub is_foul: bool,
    /// Breaking-foul flag.
    pub is_breaking_foul: bool,
    /// Intentional-foul flag.
    pub is_intentional_foul: bool,
    /// Miss flag.
    pub is_miss: bool,
    /// Display label for the action.
    pub action_text: String,
    /// Display color hint for the action.
    pub action_color: String,
}

/// Stored match as returned by every read and create endpoint.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MatchSummary {
    /// Primary key of the match.
    pub id: Uuid,
    /// First player.
    pub player1: PlayerInfoSummary,
    /// Second player.
    pub player2: PlayerInfoSummary,
    /// Counters for the first player.
    pub player1_stats: PlayerStatsSummary,
    /// Counters for the second player.
    pub player2_stats: PlayerStatsSummary,
    /// Turn-by-turn log, chronological.
    pub innings: Vec<TurnSummary>,
    /// RFC3339 match date.
    pub match_date: String,
    /// Duration in seconds.
    pub duration: i64,
    /// Final score of the first player.
    pub player1_score: i64,
    /// Final score of the second player.
    pub player2_score: i64,
    /// Race-to score.
    pub target_score: i64,
    /// Game variant.
    pub game_type: String,
    /// Winning player, when reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<PlayerInfoSummary>,
    /// Owning account.
    pub user_id: String,
    /// RFC3339 creation timestamp.
    pub created_at: String,
    /// RFC3339 last-update timestamp.
    pub updated_at: String,
}

impl From<PlayerInfo> for PlayerInfoSummary {
    fn from(player: PlayerInfo) -> Self {
        Self {
            name: player.name,
            handicap: player.handicap,
        }
    }
}

impl From<PlayerStats> for PlayerStatsSummary {
    fn from(stats: PlayerStats) -> Self {
        Self {
            score: stats.score,
            total_points: stats.total_points,
            total_innings: stats.total_innings,
            safes: stats.safes,
            misses: stats.misses,
            best_run: stats.best_run,
            scratches: stats.scratches,
            fouls: stats.fouls,
            intentional_fouls: stats.intentional_fouls,
            breaking_fouls: stats.breaking_fouls,
            current_run: stats.current_run,
            run_history: stats.run_history,
        }
    }
}

impl From<Turn> for TurnSummary {
    fn from(turn: Turn) -> Self {
        Self {
            player_number: turn.player_number,
            player_name: turn.player_name,
            balls_pocketed: turn.balls_pocketed,
            action: turn.action,
            timestamp: format_system_time(turn.timestamp),
            score: turn.score,
            inning: turn.inning,
            points: turn.points,
            is_break: turn.is_break,
            is_scratch: turn.is_scratch,
            is_safety_play: turn.is_safety_play,
            is_defensive_shot: turn.is_defensive_shot,
            is_foul: turn.is_foul,
            is_breaking_foul: turn.is_breaking_foul,
            is_intentional_foul: turn.is_intentional_foul,
            is_miss: turn.is_miss,
            action_text: turn.action_text,
            action_color: turn.action_color,
        }
    }
}

impl From<StoredMatch> for MatchSummary {
    fn from(stored: StoredMatch) -> Self {
        let record = stored.record;
        Self {
            id: stored.id,
            player1: record.player1.into(),
            player2: record.player2.into(),
            player1_stats: record.player1_stats.into(),
            player2_stats: record.player2_stats.into(),
            innings: record.innings.into_iter().map(Into::into).collect(),
            match_date: format_system_time(record.match_date),
            duration: record.duration,
            player1_score: record.player1_score,
            player2_score: record.player2_score,
            target_score: record.target_score,
            game_type: record.game_type,
            winner: record.winner.map(Into::into),
            user_id: record.user_id,
            created_at: format_system_time(stored.created_at),
            updated_at: format_system_time(stored.updated_at),
        }
    }
}
