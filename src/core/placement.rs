//! Randomized fleet and mine placement.
//!
//! Each ship or mine is placed by rejection sampling over the whole grid.
//! After `MAX_PLACEMENT_ATTEMPTS` rejected draws the remaining legal spots are
//! enumerated and one is picked uniformly, so placement either succeeds or
//! fails with `BoardError::InsufficientSpace`; it never spins.

use alloc::vec::Vec;
use rand::Rng;

use super::board::Board;
use super::common::{BoardError, CellState};
use super::config::{GameConfig, BOARD_SIZE, MAX_MINES, MAX_PLACEMENT_ATTEMPTS};
use super::ship::{Orientation, Placement, Ship};
use super::state::GameState;

/// Returns `true` if a ship of `length` at `placement` stays on the grid and
/// covers only EMPTY cells.
pub fn can_place(board: &Board, placement: Placement, length: usize) -> bool {
    placement.fits(length)
        && placement
            .span(length)
            .all(|(r, c)| board.get(r, c) == Ok(CellState::Empty))
}

/// Returns a random legal placement for a ship of `length`.
pub fn random_placement<R: Rng + ?Sized>(
    rng: &mut R,
    board: &Board,
    length: usize,
) -> Result<Placement, BoardError> {
    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let orientation = if rng.random::<bool>() {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        };
        let row = rng.random_range(0..BOARD_SIZE);
        let col = rng.random_range(0..BOARD_SIZE);
        let candidate = Placement::new(row, col, orientation);
        if can_place(board, candidate, length) {
            return Ok(candidate);
        }
    }

    let mut candidates = Vec::new();
    for orientation in [Orientation::Horizontal, Orientation::Vertical] {
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let candidate = Placement::new(row, col, orientation);
                if can_place(board, candidate, length) {
                    candidates.push(candidate);
                }
            }
        }
    }
    if candidates.is_empty() {
        return Err(BoardError::InsufficientSpace);
    }
    Ok(candidates[rng.random_range(0..candidates.len())])
}

/// Place `ship` at `placement`, marking its cells SHIP.
pub fn place_ship(board: &mut Board, ship: &mut Ship, placement: Placement) -> Result<(), BoardError> {
    if ship.placement().is_some() {
        return Err(BoardError::ShipAlreadyPlaced);
    }
    if !placement.fits(ship.size()) {
        return Err(BoardError::ShipOutOfBounds);
    }
    if !can_place(board, placement, ship.size()) {
        return Err(BoardError::ShipOverlaps);
    }
    ship.place(placement)?;
    for (r, c) in placement.span(ship.size()) {
        board.set(r, c, CellState::Ship)?;
    }
    Ok(())
}

/// Randomly place every ship in `ships`, in slice order.
pub fn place_fleet<R: Rng + ?Sized>(
    rng: &mut R,
    board: &mut Board,
    ships: &mut [Ship],
) -> Result<(), BoardError> {
    for ship in ships.iter_mut() {
        let placement = random_placement(rng, board, ship.size())?;
        place_ship(board, ship, placement)?;
    }
    Ok(())
}

/// Randomly place up to `count` mines (capped at `MAX_MINES`) on EMPTY cells
/// and return their coordinates in placement order.
pub fn place_mines<R: Rng + ?Sized>(
    rng: &mut R,
    board: &mut Board,
    count: usize,
) -> Result<Vec<(usize, usize)>, BoardError> {
    let wanted = count.min(MAX_MINES);
    let mut mines = Vec::with_capacity(wanted);
    while mines.len() < wanted {
        let spot = random_empty_cell(rng, board).ok_or(BoardError::InsufficientSpace)?;
        board.set(spot.0, spot.1, CellState::Mine)?;
        mines.push(spot);
    }
    Ok(mines)
}

fn random_empty_cell<R: Rng + ?Sized>(rng: &mut R, board: &Board) -> Option<(usize, usize)> {
    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let row = rng.random_range(0..BOARD_SIZE);
        let col = rng.random_range(0..BOARD_SIZE);
        if board.get(row, col) == Ok(CellState::Empty) {
            return Some((row, col));
        }
    }
    let empty: Vec<(usize, usize)> = board
        .iter()
        .filter(|&(_, s)| s == CellState::Empty)
        .map(|(pos, _)| pos)
        .collect();
    if empty.is_empty() {
        None
    } else {
        Some(empty[rng.random_range(0..empty.len())])
    }
}

/// Build a fresh game state with the standard fleet and `config.mines()`
/// mines placed.
pub fn deploy<R: Rng + ?Sized>(rng: &mut R, config: &GameConfig) -> Result<GameState, BoardError> {
    let mut state = GameState::new();
    place_fleet(rng, &mut state.board, &mut state.ships)?;
    state.mines = place_mines(rng, &mut state.board, config.mines())?;
    Ok(state)
}
