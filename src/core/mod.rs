//! Core naval battle engine (no_std compatible)
//!
//! Pure game logic: board, fleet placement, attack resolution, opponent
//! strategy, turn timer and the turn state machine. Needs only `alloc` and
//! `rand`; randomness is always injected by the caller.

pub mod ai;
pub mod board;
pub mod common;
pub mod config;
pub mod game;
pub mod opponent;
pub mod placement;
pub mod resolver;
pub mod ship;
pub mod state;
pub mod timer;

// Re-export commonly used types
pub use ai::{pick_unresolved, unresolved_cells};
pub use board::Board;
pub use common::{BoardError, CellState, Side, TurnError};
pub use config::*;
pub use game::{Game, GameView, Phase, Tick};
pub use opponent::{Opponent, RandomOpponent};
pub use placement::{can_place, deploy, place_fleet, place_mines, place_ship, random_placement};
pub use resolver::{resolve, Resolution};
pub use ship::{Orientation, Placement, Ship, ShipType};
pub use state::{GameState, Move};
pub use timer::{TimerTick, TurnTimer};
