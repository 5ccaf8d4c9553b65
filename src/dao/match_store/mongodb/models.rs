use mongodb::bson::{Binary, DateTime, Document, doc, spec::BinarySubtype};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dao::models::{MatchRecord, PlayerInfo, PlayerStats, StoredMatch, Turn};

/// Persisted shape of a match. Top-level timestamps are converted to BSON
/// `DateTime` so range queries and the `match_date` sort index behave;
/// nested turn timestamps ride through serde untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoMatchDocument {
    #[serde(rename = "_id")]
    id: Uuid,
    user_id: String,
    player1: PlayerInfo,
    player2: PlayerInfo,
    player1_stats: PlayerStats,
    player2_stats: PlayerStats,
    innings: Vec<Turn>,
    match_date: DateTime,
    duration: i64,
    player1_score: i64,
    player2_score: i64,
    target_score: i64,
    game_type: String,
    winner: Option<PlayerInfo>,
    created_at: DateTime,
    updated_at: DateTime,
}

impl MongoMatchDocument {
    pub fn owner(&self) -> &str {
        &self.user_id
    }
}

impl From<StoredMatch> for MongoMatchDocument {
    fn from(value: StoredMatch) -> Self {
        let StoredMatch {
            id,
            record,
            created_at,
            updated_at,
        } = value;
        Self {
            id,
            user_id: record.user_id,
            player1: record.player1,
            player2: record.player2,
            player1_stats: record.player1_stats,
            player2_stats: record.player2_stats,
            innings: record.innings,
            match_date: DateTime::from_system_time(record.match_date),
            duration: record.duration,
            player1_score: record.player1_score,
            player2_score: record.player2_score,
            target_score: record.target_score,
            game_type: record.game_type,
            winner: record.winner,
            created_at: DateTime::from_system_time(created_at),
            updated_at: DateTime::from_system_time(updated_at),
        }
    }
}

impl From<MongoMatchDocument> for StoredMatch {
    fn from(value: MongoMatchDocument) -> Self {
        Self {
            id: value.id,
            record: MatchRecord {
                player1: value.player1,
                player2: value.player2,
                player1_stats: value.player1_stats,
                player2_stats: value.player2_stats,
                innings: value.innings,
                match_date: value.match_date.to_system_time(),
                duration: value.duration,
                player1_score: value.player1_score,
                player2_score: value.player2_score,
                target_score: value.target_score,
                game_type: value.game_type,
                winner: value.winner,
                user_id: value.user_id,
            },
            created_at: value.created_at.to_system_time(),
            updated_at: value.updated_at.to_system_time(),
        }
    }
}

fn uuid_as_binary(id: Uuid) -> Binary {
    Binary {
        subtype: BinarySubtype::Uuid,
        bytes: id.into_bytes().to_vec(),
    }
}

pub fn doc_id(id: Uuid) -> Document {
    doc! {"_id": uuid_as_binary(id)}
}
