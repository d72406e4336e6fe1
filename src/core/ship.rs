//! Ship definitions and placement spans.

use super::common::BoardError;
use super::config::BOARD_SIZE;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Extends along columns from its start cell.
    Horizontal,
    /// Extends along rows from its start cell.
    Vertical,
}

/// Type of ship: name and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct ShipType {
    name: &'static str,
    length: usize,
}

impl ShipType {
    /// Create a new ship type.
    pub const fn new(name: &'static str, length: usize) -> Self {
        Self { name, length }
    }

    /// Ship's name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Ship's length.
    pub fn length(&self) -> usize {
        self.length
    }
}

/// Start cell and orientation of a placed ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    pub row: usize,
    pub col: usize,
    pub orientation: Orientation,
}

impl Placement {
    pub fn new(row: usize, col: usize, orientation: Orientation) -> Self {
        Self { row, col, orientation }
    }

    /// Returns `true` if a ship of `length` starting here stays on the grid.
    pub fn fits(&self, length: usize) -> bool {
        match self.orientation {
            Orientation::Horizontal => {
                self.row < BOARD_SIZE && self.col < BOARD_SIZE && length <= BOARD_SIZE - self.col
            }
            Orientation::Vertical => {
                self.col < BOARD_SIZE && self.row < BOARD_SIZE && length <= BOARD_SIZE - self.row
            }
        }
    }

    /// The `length` cells covered from this start, in order.
    pub fn span(self, length: usize) -> impl Iterator<Item = (usize, usize)> {
        (0..length).map(move |i| match self.orientation {
            Orientation::Horizontal => (self.row, self.col + i),
            Orientation::Vertical => (self.row + i, self.col),
        })
    }
}

/// One ship of the fleet together with its placement and sunk flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct Ship {
    ship_type: ShipType,
    sunk: bool,
    placement: Option<Placement>,
}

impl Ship {
    /// An unplaced, afloat ship.
    pub fn new(ship_type: ShipType) -> Self {
        Self {
            ship_type,
            sunk: false,
            placement: None,
        }
    }

    /// Record the ship's placement. Overlap is checked by the caller
    /// against the board.
    pub fn place(&mut self, placement: Placement) -> Result<(), BoardError> {
        if self.placement.is_some() {
            return Err(BoardError::ShipAlreadyPlaced);
        }
        if !placement.fits(self.ship_type.length()) {
            return Err(BoardError::ShipOutOfBounds);
        }
        self.placement = Some(placement);
        Ok(())
    }

    pub fn ship_type(&self) -> ShipType {
        self.ship_type
    }

    pub fn name(&self) -> &'static str {
        self.ship_type.name()
    }

    pub fn size(&self) -> usize {
        self.ship_type.length()
    }

    pub fn placement(&self) -> Option<Placement> {
        self.placement
    }

    pub fn is_sunk(&self) -> bool {
        self.sunk
    }

    /// Flip the ship to sunk. Returns `true` only on the first call.
    pub(crate) fn mark_sunk(&mut self) -> bool {
        let newly = !self.sunk;
        self.sunk = true;
        newly
    }

    /// Cells covered by the ship; empty while unplaced.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> {
        let len = if self.placement.is_some() { self.size() } else { 0 };
        let start = self
            .placement
            .unwrap_or(Placement::new(0, 0, Orientation::Horizontal));
        start.span(len)
    }

    /// Returns `true` if (`row`, `col`) lies within the ship's span.
    pub fn contains(&self, row: usize, col: usize) -> bool {
        match self.placement {
            Some(p) => match p.orientation {
                Orientation::Horizontal => row == p.row && col >= p.col && col - p.col < self.size(),
                Orientation::Vertical => col == p.col && row >= p.row && row - p.row < self.size(),
            },
            None => false,
        }
    }
}
