use std::collections::BTreeSet;

use itertools::iproduct;
use ndarray::Array2;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use static_assertions::{const_assert, const_assert_eq};

use crate::{
    error::{GameError, GameResult},
    variables::{Cell, MAZE_COLS, MAZE_ROWS},
};

/// Static walkability of one maze cell.
#[derive(
    Clone, Copy, Debug, Eq, PartialEq, IntoPrimitive, TryFromPrimitive, Serialize, Deserialize,
)]
#[repr(u8)]
pub enum CellKind {
    Open = 0,
    Wall = 1,
}

/// Characters accepted in a textual maze layout.
#[derive(Clone, Copy, Debug, Eq, PartialEq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum LayoutSymbol {
    /// Open cell, nothing to collect
    Empty = b'0',
    Wall = b'1',
    /// Open cell holding a pellet
    Pellet = b'2',
    /// Open cell holding a power pellet
    PowerPellet = b'3',
}

/// The classic maze, row-major, (0, 0) in the top-left corner.
pub const CLASSIC_LAYOUT: [&str; MAZE_ROWS] = [
    "1111111111111111111111111111",
    "1222222222222112222222222221",
    "1211112111112112111112111121",
    "1310012100012112100012100131",
    "1211112111112112111112111121",
    "1222222222222222222222222221",
    "1211112121111111111212111121",
    "1222222122222112222212222221",
    "1111112122222112222212111111",
    "0000012111112112111112100000",
    "0000012122222222222212100000",
    "0000012120000000000212100000",
    "1111112120111001110212111111",
    "0000002000100000010002000000",
    "0000002000000000000002000000",
    "1111112120100000010212111111",
    "0000012120111001110212100000",
    "0000012120000000000212100000",
    "0000012122222222222212100000",
    "1111112121111111111212111111",
    "1222222222222112222222222221",
    "1211112222222112222222111121",
    "1322212111112112111112122231",
    "1111212222222222222222121111",
    "1111212121111111111212121111",
    "1222212122222112222212122221",
    "1222222122222112222212222221",
    "1211111111112112111111111121",
    "1222222222222222222222222221",
    "1111111111111111111111111111",
    "1111111111111111111111111111",
];

const fn all_rows_have_width(layout: &[&str], width: usize) -> bool {
    let mut i = 0;
    while i < layout.len() {
        if layout[i].len() != width {
            return false;
        }
        i += 1;
    }
    true
}

const_assert_eq!(CLASSIC_LAYOUT.len(), MAZE_ROWS);
const_assert!(all_rows_have_width(&CLASSIC_LAYOUT, MAZE_COLS));

/// Which kind of pickup was collected.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PickupKind {
    Pellet,
    PowerPellet,
}

/// The two shrinking sets of collectibles. Disjoint, and only ever on open cells.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Pickups {
    pub pellets: BTreeSet<Cell>,
    pub power_pellets: BTreeSet<Cell>,
}

impl Pickups {
    /// Removes whatever pickup lies on `cell`. Returns None if there was none.
    pub fn take(&mut self, cell: Cell) -> Option<PickupKind> {
        if self.pellets.remove(&cell) {
            Some(PickupKind::Pellet)
        } else if self.power_pellets.remove(&cell) {
            Some(PickupKind::PowerPellet)
        } else {
            None
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pellets.is_empty() && self.power_pellets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pellets.len() + self.power_pellets.len()
    }
}

/// Immutable wall/open classification of the maze.
#[derive(Clone, Debug, Serialize)]
pub struct Maze {
    cells: Array2<CellKind>,
}

impl Maze {
    /// Parses a rectangular textual layout into the maze and its initial pickups.
    pub fn parse(layout: &[&str]) -> GameResult<(Maze, Pickups)> {
        let width = layout.first().map_or(0, |row| row.len());
        if width == 0 {
            return Err(GameError::EmptyLayout);
        }

        let mut cells = Array2::from_elem((layout.len(), width), CellKind::Wall);
        let mut pickups = Pickups::default();
        for (row, line) in layout.iter().enumerate() {
            if line.len() != width {
                return Err(GameError::RaggedLayout {
                    row,
                    expected: width,
                    found: line.len(),
                });
            }
            for (col, ch) in line.chars().enumerate() {
                let symbol = u8::try_from(ch)
                    .ok()
                    .and_then(|b| LayoutSymbol::try_from_primitive(b).ok())
                    .ok_or(GameError::UnknownLayoutSymbol {
                        row,
                        col,
                        symbol: ch,
                    })?;
                let cell = (row as isize, col as isize);
                cells[(row, col)] = match symbol {
                    LayoutSymbol::Wall => CellKind::Wall,
                    LayoutSymbol::Empty => CellKind::Open,
                    LayoutSymbol::Pellet => {
                        pickups.pellets.insert(cell);
                        CellKind::Open
                    }
                    LayoutSymbol::PowerPellet => {
                        pickups.power_pellets.insert(cell);
                        CellKind::Open
                    }
                };
            }
        }
        Ok((Maze { cells }, pickups))
    }

    /// The built-in maze.
    pub fn classic() -> GameResult<(Maze, Pickups)> {
        Self::parse(&CLASSIC_LAYOUT)
    }

    pub fn rows(&self) -> usize {
        self.cells.nrows()
    }

    pub fn cols(&self) -> usize {
        self.cells.ncols()
    }

    pub fn cells(&self) -> &Array2<CellKind> {
        &self.cells
    }

    /// Returns the kind of the given cell, or None outside the maze.
    pub fn get(&self, cell: Cell) -> Option<CellKind> {
        let row = usize::try_from(cell.0).ok()?;
        let col = usize::try_from(cell.1).ok()?;
        self.cells.get((row, col)).copied()
    }

    /// Returns true if the cell is inside the maze and open.
    pub fn is_walkable(&self, cell: Cell) -> bool {
        self.get(cell) == Some(CellKind::Open)
    }

    /// Iterates over all wall cells in row-major order.
    pub fn walls(&self) -> impl Iterator<Item = Cell> + '_ {
        iproduct!(0..self.rows(), 0..self.cols())
            .filter(|&pos| self.cells[pos] == CellKind::Wall)
            .map(|(row, col)| (row as isize, col as isize))
    }
}
