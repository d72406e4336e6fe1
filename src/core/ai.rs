// Uniform target sampling over unresolved cells.
// Shared by the opponent strategy and the timeout forced move.

use alloc::vec::Vec;
use rand::Rng;

use super::config::{BOARD_SIZE, MAX_SAMPLE_ATTEMPTS};
use super::state::GameState;

/// Pick a uniformly random coordinate that has not been fired at yet.
///
/// EMPTY, SHIP and untriggered MINE cells are all eligible. Returns `None`
/// only when every cell is resolved.
pub fn pick_unresolved<R: Rng + ?Sized>(rng: &mut R, state: &GameState) -> Option<(usize, usize)> {
    for _ in 0..MAX_SAMPLE_ATTEMPTS {
        let row = rng.random_range(0..BOARD_SIZE);
        let col = rng.random_range(0..BOARD_SIZE);
        if state.is_resolved(row, col) == Ok(false) {
            return Some((row, col));
        }
    }
    let open = unresolved_cells(state);
    if open.is_empty() {
        return None;
    }
    Some(open[rng.random_range(0..open.len())])
}

/// Every coordinate not yet fired at, row-major.
pub fn unresolved_cells(state: &GameState) -> Vec<(usize, usize)> {
    state
        .board
        .iter()
        .map(|(pos, _)| pos)
        .filter(|&(r, c)| state.is_resolved(r, c) == Ok(false))
        .collect()
}
