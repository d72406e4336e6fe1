use rand::rngs::SmallRng;

use super::ai;
use super::resolver::Resolution;
use super::state::GameState;

/// Interface implemented by scripted opponents.
pub trait Opponent: Send {
    /// Choose the next coordinate to attack, or `None` if nothing is left.
    fn select_target(&mut self, rng: &mut SmallRng, state: &GameState) -> Option<(usize, usize)>;

    /// Inform the opponent of the outcome of its last attack.
    fn handle_result(&mut self, _result: &Resolution) {}
}

/// Uniformly random opponent. It keeps no memory of earlier hits and never
/// targets cells next to them.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomOpponent;

impl RandomOpponent {
    pub fn new() -> Self {
        Self
    }
}

impl Opponent for RandomOpponent {
    fn select_target(&mut self, rng: &mut SmallRng, state: &GameState) -> Option<(usize, usize)> {
        ai::pick_unresolved(rng, state)
    }
}
