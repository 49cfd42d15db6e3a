#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::ops::Index;
use hashbrown::HashSet;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use error::*;
pub use generator::*;
pub use session::*;
pub use snapshot::*;
pub use types::*;

mod cell;
mod error;
mod generator;
mod session;
mod snapshot;
mod types;

/// Window width in pixels the default board is sized for.
pub const DEFAULT_WINDOW_WIDTH: u16 = 400;
/// Window height in pixels, one tile-row of it is taken by the header bar.
pub const DEFAULT_WINDOW_HEIGHT: u16 = 440;
pub const DEFAULT_TILE_SIZE: u16 = 40;
pub const DEFAULT_MINES: CellCount = 10;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub rows: Coord,
    pub cols: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(rows: Coord, cols: Coord, mines: CellCount) -> Self {
        Self { rows, cols, mines }
    }

    pub fn new(rows: Coord, cols: Coord, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(rows, cols, mines);
        config.validate()?;
        Ok(config)
    }

    /// Sizes the board to fill a window of `width` x `height` pixels, leaving the top tile-row for the header.
    ///
    /// Dimensions past what [`Coord`] can address are clamped to `Coord::MAX`.
    pub fn from_window(width: u16, height: u16, tile_size: u16, mines: CellCount) -> Result<Self> {
        let cols = width.checked_div(tile_size).unwrap_or(0);
        let rows = height
            .checked_div(tile_size)
            .unwrap_or(0)
            .saturating_sub(1);
        Self::new(
            Coord::try_from(rows).unwrap_or(Coord::MAX),
            Coord::try_from(cols).unwrap_or(Coord::MAX),
            mines,
        )
    }

    /// Checks the board is non-empty and leaves at least one safe cell.
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 || self.mines == 0 || self.mines >= self.total_cells() {
            Err(GameError::InvalidConfiguration {
                rows: self.rows,
                cols: self.cols,
                mines: self.mines,
            })
        } else {
            Ok(())
        }
    }

    /// Board size as `(cols, rows)`, the bounds for `(x, y)` coordinates.
    pub const fn size(&self) -> Coord2 {
        (self.cols, self.rows)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.cols, self.rows)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        // 400x440 window with 40px tiles
        Self::new_unchecked(10, 10, DEFAULT_MINES)
    }
}

/// Fully labeled minefield, immutable once generated.
///
/// Deserializing only trusts `size` and `mines`, labels are always recomputed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoardLayout")]
pub struct Board {
    size: Coord2,
    cells: Array2<Cell>,
    mines: HashSet<Coord2>,
}

impl Board {
    /// Builds and labels a board of `size` `(cols, rows)` with mines at exactly `mine_coords`.
    ///
    /// Duplicate coordinates are collapsed.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mines = HashSet::with_capacity(mine_coords.len());

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoords(coords));
            }
            mines.insert(coords);
        }

        Self::from_mine_set(size, mines)
    }

    pub(crate) fn from_mine_set(size: Coord2, mines: HashSet<Coord2>) -> Result<Self> {
        let (cols, rows) = size;
        if cols == 0 || rows == 0 {
            return Err(GameError::InvalidConfiguration {
                rows,
                cols,
                mines: mines.len().try_into().unwrap_or(CellCount::MAX),
            });
        }

        let cells = Array2::from_shape_fn(size.to_nd_index(), |(x, y)| {
            let coords = (x as Coord, y as Coord);
            if mines.contains(&coords) {
                Cell::Mine
            } else {
                let count = neighbors(coords, size)
                    .filter(|pos| mines.contains(pos))
                    .count();
                Cell::Count(count as u8)
            }
        });

        Ok(Self { size, cells, mines })
    }

    /// Board size as `(cols, rows)`.
    pub fn size(&self) -> Coord2 {
        self.size
    }

    pub fn cols(&self) -> Coord {
        self.size.0
    }

    pub fn rows(&self) -> Coord {
        self.size.1
    }

    pub fn mine_count(&self) -> CellCount {
        // bounded by total_cells, which always fits
        self.mines.len() as CellCount
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count()
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        coords.0 < self.size.0 && coords.1 < self.size.1
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<Cell> {
        if self.contains(coords) {
            Some(self.cells[coords.to_nd_index()])
        } else {
            None
        }
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self.mines.contains(&coords)
    }

    /// Coordinates of every mine, kept alongside the labels for inspection.
    pub fn mines(&self) -> &HashSet<Coord2> {
        &self.mines
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> impl Iterator<Item = Coord2> + use<> {
        neighbors(coords, self.size)
    }

    /// Counts mines around `coords` straight from the mine set, ignoring stored labels.
    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.iter_neighbors(coords)
            .filter(|pos| self.mines.contains(pos))
            .count() as u8
    }

    /// Iterates every cell with its coordinates, `x`-major.
    pub fn iter(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((x, y), &cell)| ((x as Coord, y as Coord), cell))
    }
}

/// Wire shape a [`Board`] is rebuilt from.
#[derive(Deserialize)]
struct BoardLayout {
    size: Coord2,
    mines: Vec<Coord2>,
}

impl TryFrom<BoardLayout> for Board {
    type Error = GameError;

    fn try_from(layout: BoardLayout) -> Result<Self> {
        Self::from_mine_coords(layout.size, &layout.mines)
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Flagged,
    Unflagged,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Flagged => true,
            Self::Unflagged => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
        }
    }
}
