use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};

/// A cardinal movement direction. "No direction" is expressed as
/// `Option<Direction>::None` wherever an agent can be stopped.
#[derive(
    Clone, Copy, Debug, Eq, PartialEq, Hash, IntoPrimitive, TryFromPrimitive, Serialize, Deserialize,
)]
#[repr(u8)]
pub enum Direction {
    Up = 0,
    Down = 1,
    Left = 2,
    Right = 3,
}

impl Direction {
    /// The fixed order in which ghosts evaluate candidate directions.
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Returns the (row, column) offset of one step in this direction.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Offset of one step in an optional direction; a stopped agent has no offset.
pub fn delta_of(direction: Option<Direction>) -> (isize, isize) {
    direction.map_or((0, 0), Direction::delta)
}

/// A grid coordinate, (row, column). Signed so that off-grid target tiles
/// (scatter corners, extrapolated chase targets) share the same type.
pub type Cell = (isize, isize);

/// Returns the cell one step away from `cell` in `direction`.
pub fn step(cell: Cell, direction: Direction) -> Cell {
    let (dr, dc) = direction.delta();
    (cell.0 + dr, cell.1 + dc)
}

pub fn manhattan_distance(a: Cell, b: Cell) -> usize {
    a.0.abs_diff(b.0) + a.1.abs_diff(b.1)
}

// maze dimensions
pub const MAZE_ROWS: usize = 31;
pub const MAZE_COLS: usize = 28;

// tick-rate assumption: speeds are per update, timers are in milliseconds
pub const UPDATES_PER_SECOND: u32 = 60;
pub const FRAME_MS: u32 = 1000 / UPDATES_PER_SECOND;

// game params
pub const CELL_SIZE: f32 = 24.0;
pub const STARTING_LIVES: u8 = 3;
pub const PELLET_SCORE: u32 = 10;
pub const POWER_PELLET_SCORE: u32 = 50;
pub const GHOST_SCORE: u32 = 200;
pub const SCATTER_DURATION_MS: u32 = 7000;
pub const CHASE_DURATION_MS: u32 = 20000;
pub const FRIGHTENED_DURATION_MS: u32 = 7000;
pub const PACMAN_SPEED: f32 = 0.1;
pub const GHOST_SPEED: f32 = 0.1;
pub const FRIGHTENED_GHOST_SPEED: f32 = 0.05;
pub const EATEN_GHOST_SPEED: f32 = 0.2;
pub const CAPTURE_DISTANCE: f32 = 1.5;
pub const MOUTH_TOGGLE_MS: u32 = 50;
pub const PACMAN_STARTING_POS: Cell = (21, 10);

// messages shown by the presentation layer
pub const START_MESSAGE: &str = "Press ENTER to Start";
pub const GAME_OVER_MESSAGE: &str = "GAME OVER! Press ENTER to Restart";
pub const LEVEL_COMPLETE_MESSAGE: &str = "LEVEL COMPLETE! Press ENTER to Play Again";
