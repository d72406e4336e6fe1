//! Aggregate game state: board, fleet, mines and the move log.

use alloc::vec::Vec;

use super::board::Board;
use super::common::{BoardError, CellState, Side};
use super::config::FLEET;
use super::ship::Ship;

/// One resolved attack, by either side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Move {
    pub row: usize,
    pub col: usize,
    /// Outcome: HIT, MISS or MINE.
    pub result: CellState,
    pub is_player_move: bool,
}

impl Move {
    pub fn side(&self) -> Side {
        if self.is_player_move {
            Side::Player
        } else {
            Side::Ai
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct GameState {
    pub board: Board,
    pub ships: Vec<Ship>,
    pub mines: Vec<(usize, usize)>,
    /// Append-only, one entry per resolved attack.
    pub moves: Vec<Move>,
    pub player_turn: bool,
    pub last_sunk_by_player: bool,
    /// Set once a mine has been fired at; that cell counts as resolved.
    pub triggered_mine: Option<(usize, usize)>,
}

impl GameState {
    /// Fresh state: empty board, unplaced standard fleet, no mines or moves.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            ships: FLEET.iter().map(|&def| Ship::new(def)).collect(),
            mines: Vec::new(),
            moves: Vec::new(),
            player_turn: true,
            last_sunk_by_player: false,
            triggered_mine: None,
        }
    }

    /// Returns `true` if (`row`, `col`) was already fired at.
    pub fn is_resolved(&self, row: usize, col: usize) -> Result<bool, BoardError> {
        let state = self.board.get(row, col)?;
        Ok(matches!(state, CellState::Hit | CellState::Miss)
            || self.triggered_mine == Some((row, col)))
    }

    /// Index of the ship whose span covers (`row`, `col`).
    pub fn ship_at(&self, row: usize, col: usize) -> Option<usize> {
        self.ships.iter().position(|s| s.contains(row, col))
    }

    pub fn all_sunk(&self) -> bool {
        self.ships.iter().all(|s| s.is_sunk())
    }

    /// Number of HIT moves scored by `side`.
    pub fn score(&self, side: Side) -> usize {
        self.moves
            .iter()
            .filter(|m| m.result == CellState::Hit && m.side() == side)
            .count()
    }

    pub fn player_score(&self) -> usize {
        self.score(Side::Player)
    }

    pub fn ai_score(&self) -> usize {
        self.score(Side::Ai)
    }

    pub fn remaining_ships(&self) -> usize {
        self.ships.iter().filter(|s| !s.is_sunk()).count()
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
