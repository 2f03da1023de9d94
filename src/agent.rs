use serde::Serialize;

use crate::{
    grid::Maze,
    variables::{step, Cell, Direction},
};

/// Returns the pixel-space center (x, y) of a grid cell.
pub fn pixel_center(cell: Cell, cell_size: f32) -> (f32, f32) {
    (
        cell.1 as f32 * cell_size + cell_size / 2.0,
        cell.0 as f32 * cell_size + cell_size / 2.0,
    )
}

/// Moves `value` toward `target` by at most `max_step`, never past it.
fn approach(value: f32, target: f32, max_step: f32) -> f32 {
    if value < target {
        (value + max_step).min(target)
    } else if value > target {
        (value - max_step).max(target)
    } else {
        value
    }
}

/// State shared by the player and the ghosts.
///
/// `grid_pos` is the cell the agent is heading into (or resting on);
/// `pixel_pos` always converges monotonically on that cell's center. A new
/// `grid_pos` is only committed once `pixel_pos` sits exactly on the center,
/// so an agent is either centered (free to turn) or locked between two cells.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Agent {
    pub grid_pos: Cell,
    pub pixel_pos: (f32, f32),
    pub direction: Option<Direction>,
    /// Direction of the step that committed `grid_pos`, if any.
    pub heading: Option<Direction>,
    /// Fraction of a cell covered per update.
    pub speed: f32,
}

impl Agent {
    pub fn new(start: Cell, speed: f32, cell_size: f32) -> Self {
        Self {
            grid_pos: start,
            pixel_pos: pixel_center(start, cell_size),
            direction: None,
            heading: None,
            speed,
        }
    }

    /// Puts the agent on the center of `cell` immediately, with no interpolation.
    pub fn place(&mut self, cell: Cell, cell_size: f32) {
        self.grid_pos = cell;
        self.pixel_pos = pixel_center(cell, cell_size);
        self.heading = None;
    }

    pub fn is_centered(&self, cell_size: f32) -> bool {
        self.pixel_pos == pixel_center(self.grid_pos, cell_size)
    }

    /// The cell that currently contains the agent's pixel position.
    pub fn occupied_cell(&self, cell_size: f32) -> Cell {
        (
            (self.pixel_pos.1 / cell_size).floor() as isize,
            (self.pixel_pos.0 / cell_size).floor() as isize,
        )
    }

    /// Returns true if one step in `direction` from the current grid cell is open.
    pub fn can_move(&self, direction: Direction, maze: &Maze) -> bool {
        maze.is_walkable(step(self.grid_pos, direction))
    }

    /// Advances the agent by one update.
    ///
    /// Each axis moves toward the current cell's center independently, clamped
    /// at the center. Once centered, the next cell in `direction` is committed
    /// if it is open; otherwise the agent stops.
    pub fn advance(&mut self, maze: &Maze, cell_size: f32) {
        let (target_x, target_y) = pixel_center(self.grid_pos, cell_size);
        let max_step = self.speed * cell_size;
        self.pixel_pos.0 = approach(self.pixel_pos.0, target_x, max_step);
        self.pixel_pos.1 = approach(self.pixel_pos.1, target_y, max_step);

        if self.pixel_pos != (target_x, target_y) {
            return;
        }
        if let Some(direction) = self.direction {
            if self.can_move(direction, maze) {
                self.grid_pos = step(self.grid_pos, direction);
                self.heading = Some(direction);
            } else {
                self.direction = None;
            }
        }
    }
}
