//! Attack resolution: cell transitions, sink detection and win detection.

use super::common::{BoardError, CellState, Side};
use super::state::{GameState, Move};

/// Everything that happened as the result of one attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct Resolution {
    pub row: usize,
    pub col: usize,
    pub by: Side,
    /// HIT, MISS or MINE.
    pub outcome: CellState,
    /// Name of the ship this attack sank, if any.
    pub sunk: Option<&'static str>,
    /// Set when the attack ended the game.
    pub winner: Option<Side>,
}

/// Resolve an attack by `by` at (`row`, `col`).
///
/// EMPTY becomes MISS, SHIP becomes HIT, MINE stays MINE and is marked
/// triggered. Exactly one [`Move`] is appended. A triggered mine hands the
/// win to the other side before the fleet is even looked at; otherwise the
/// side that sinks the last ship wins.
///
/// Targeting a cell that is already resolved is rejected without touching
/// the state.
pub fn resolve(
    state: &mut GameState,
    row: usize,
    col: usize,
    by: Side,
) -> Result<Resolution, BoardError> {
    let current = state.board.get(row, col)?;
    if state.is_resolved(row, col)? {
        return Err(BoardError::AlreadyResolved { row, col });
    }

    let mut sunk = None;
    let outcome = match current {
        CellState::Empty => {
            state.board.set(row, col, CellState::Miss)?;
            CellState::Miss
        }
        CellState::Ship => {
            let idx = state
                .ship_at(row, col)
                .ok_or(BoardError::UnknownShipHit { row, col })?;
            state.board.set(row, col, CellState::Hit)?;
            let board = &state.board;
            let ship = &mut state.ships[idx];
            let hits = ship
                .cells()
                .filter(|&(r, c)| board.get(r, c) == Ok(CellState::Hit))
                .count();
            if hits == ship.size() && ship.mark_sunk() {
                sunk = Some(ship.name());
                state.last_sunk_by_player = by == Side::Player;
            }
            CellState::Hit
        }
        CellState::Mine => {
            state.triggered_mine = Some((row, col));
            CellState::Mine
        }
        CellState::Hit | CellState::Miss => {
            return Err(BoardError::AlreadyResolved { row, col });
        }
    };

    state.moves.push(Move {
        row,
        col,
        result: outcome,
        is_player_move: by == Side::Player,
    });

    let winner = if outcome == CellState::Mine {
        Some(by.opponent())
    } else if sunk.is_some() && state.all_sunk() {
        Some(by)
    } else {
        None
    };

    Ok(Resolution {
        row,
        col,
        by,
        outcome,
        sunk,
        winner,
    })
}
