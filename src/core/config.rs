use super::ship::ShipType;

pub const BOARD_SIZE: usize = 10;
pub const NUM_SHIPS: usize = 5;
pub const FLEET: [ShipType; NUM_SHIPS] = [
    ShipType::new("Aircraft Carrier", 5),
    ShipType::new("Battleship", 4),
    ShipType::new("Cruiser", 3),
    ShipType::new("Submarine", 3),
    ShipType::new("Destroyer", 2),
];

/// Total number of ship segments in the standard fleet.
pub const TOTAL_SHIP_CELLS: usize = 5 + 4 + 3 + 3 + 2;

pub const MIN_MINES: usize = 1;
pub const MAX_MINES: usize = 10;
pub const DEFAULT_MINES: usize = 5;

pub const MIN_TIMER_SECS: u8 = 1;
pub const MAX_TIMER_SECS: u8 = 10;
pub const DEFAULT_TIMER_SECS: u8 = 7;

/// Random draws tried per ship or mine before falling back to a full scan.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 100;
/// Random draws tried when picking a target before falling back to a full scan.
pub const MAX_SAMPLE_ATTEMPTS: usize = 100;

/// Setup options for one game. Values are always within their legal range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    mines: usize,
    timer_secs: u8,
}

impl GameConfig {
    /// Build a config, clamping both values into their allowed ranges.
    pub fn new(mines: usize, timer_secs: u8) -> Self {
        Self {
            mines: mines.clamp(MIN_MINES, MAX_MINES),
            timer_secs: timer_secs.clamp(MIN_TIMER_SECS, MAX_TIMER_SECS),
        }
    }

    pub fn mines(&self) -> usize {
        self.mines
    }

    pub fn timer_secs(&self) -> u8 {
        self.timer_secs
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MINES, DEFAULT_TIMER_SECS)
    }
}

