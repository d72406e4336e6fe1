//! Records handed to external collaborators (persistence, notification).

use std::string::{String, ToString};
use std::time::{SystemTime, UNIX_EPOCH};
use std::vec::Vec;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::{CellState, Game, Move};

/// One resolved move, numbered from 1 within its match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRecord {
    pub row: usize,
    pub col: usize,
    pub result: CellState,
    pub is_player_move: bool,
    pub turn_number: usize,
}

impl MoveRecord {
    pub fn new(mv: &Move, turn_number: usize) -> Self {
        Self {
            row: mv.row,
            col: mv.col,
            result: mv.result,
            is_player_move: mv.is_player_move,
            turn_number,
        }
    }
}

/// End-of-game summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSummary {
    /// "Player", "AI" or none.
    pub winner: Option<String>,
    pub winner_score: usize,
    pub total_moves: usize,
    pub player_score: usize,
    pub ai_score: usize,
    /// Unix seconds.
    pub timestamp: u64,
    pub ended_by_mine: bool,
}

impl GameSummary {
    /// Summarize `game`, stamped with the current time.
    pub fn from_game(game: &Game) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        Self::at(game, timestamp)
    }

    /// Summarize `game` with an explicit timestamp.
    pub fn at(game: &Game, timestamp: u64) -> Self {
        Self {
            winner: game.winner().map(|side| side.label().to_string()),
            winner_score: game.winner_score(),
            total_moves: game.state().moves.len(),
            player_score: game.player_score(),
            ai_score: game.ai_score(),
            timestamp,
            ended_by_mine: game.ended_by_mine(),
        }
    }
}

/// Sent to the notifier when the player wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VictoryNotice {
    pub recipient: String,
    pub winner_score: usize,
    pub total_moves: usize,
}

/// A finished match as stored by the file recorder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub match_id: Uuid,
    pub summary: GameSummary,
    pub moves: Vec<MoveRecord>,
}
