//! Commonly used types and utilities for ease of import.

pub use crate::core::{
    CellState, Game, GameConfig, GameState, GameView, Opponent, Phase, RandomOpponent, Resolution,
    Side, Tick,
};

#[cfg(feature = "std")]
pub use crate::{
    controller::{Command, ControllerHandle, GameController, Snapshot},
    notify::{LogNotifier, Notifier},
    persistence::{FileRecorder, GameRecorder, MemoryRecorder, NullRecorder},
};
