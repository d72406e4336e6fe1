//! Common types for the naval battle engine: cell states, sides and errors.

/// State of a single board coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum CellState {
    /// Open water that has not been fired at.
    #[default]
    Empty,
    /// An untouched ship segment.
    Ship,
    /// A ship segment that has been hit.
    Hit,
    /// Open water that has been fired at.
    Miss,
    /// A hazard cell. Firing at it ends the game against the shooter.
    Mine,
}

/// The two sides taking turns against the shared board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Player,
    Ai,
}

impl Side {
    /// The side that is not `self`.
    pub fn opponent(self) -> Self {
        match self {
            Side::Player => Side::Ai,
            Side::Ai => Side::Player,
        }
    }

    /// Label used in summaries and messages.
    pub fn label(self) -> &'static str {
        match self {
            Side::Player => "Player",
            Side::Ai => "AI",
        }
    }
}

/// Errors returned by board, placement and resolver operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// Coordinate lies outside the 10×10 grid.
    OutOfBounds { row: usize, col: usize },
    /// Target was already hit, missed or a triggered mine.
    AlreadyResolved { row: usize, col: usize },
    /// Ship would run off the grid.
    ShipOutOfBounds,
    /// Ship placement overlaps a ship or a mine.
    ShipOverlaps,
    /// Ship already has a placement.
    ShipAlreadyPlaced,
    /// Not enough empty cells left for the requested ships or mines.
    InsufficientSpace,
    /// A SHIP cell was hit that no placed ship covers.
    UnknownShipHit { row: usize, col: usize },
}

impl core::fmt::Display for BoardError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BoardError::OutOfBounds { row, col } => {
                write!(f, "Coordinate ({}, {}) is outside the board", row, col)
            }
            BoardError::AlreadyResolved { row, col } => {
                write!(f, "Cell ({}, {}) has already been resolved", row, col)
            }
            BoardError::ShipOutOfBounds => write!(f, "Ship placement is out of bounds"),
            BoardError::ShipOverlaps => write!(f, "Ship placement overlaps an occupied cell"),
            BoardError::ShipAlreadyPlaced => write!(f, "Ship is already placed on the board"),
            BoardError::InsufficientSpace => write!(f, "Not enough empty cells to complete placement"),
            BoardError::UnknownShipHit { row, col } => {
                write!(f, "No placed ship covers the hit at ({}, {})", row, col)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BoardError {}

/// Errors returned by the turn state machine. None of them mutate the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnError {
    /// The fleet has not been deployed yet.
    NotStarted,
    NotPlayerTurn,
    NotAiTurn,
    GameOver,
    /// The turn timer is paused; moves are accepted only while it runs.
    Paused,
    AlreadyResolved { row: usize, col: usize },
    /// Every cell is resolved.
    NoTargetsLeft,
    Board(BoardError),
}

impl From<BoardError> for TurnError {
    fn from(err: BoardError) -> Self {
        match err {
            BoardError::AlreadyResolved { row, col } => TurnError::AlreadyResolved { row, col },
            other => TurnError::Board(other),
        }
    }
}

impl core::fmt::Display for TurnError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TurnError::NotStarted => write!(f, "Game has not been set up yet"),
            TurnError::NotPlayerTurn => write!(f, "It is not the player's turn"),
            TurnError::NotAiTurn => write!(f, "It is not the AI's turn"),
            TurnError::GameOver => write!(f, "Game is already over"),
            TurnError::Paused => write!(f, "Game is paused"),
            TurnError::AlreadyResolved { row, col } => {
                write!(f, "Cell ({}, {}) has already been resolved", row, col)
            }
            TurnError::NoTargetsLeft => write!(f, "No unresolved cells left to target"),
            TurnError::Board(e) => write!(f, "Board error: {}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TurnError {}
