use serde::Serialize;

use crate::{
    agent::Agent,
    grid::Maze,
    variables::{Cell, Direction, PACMAN_STARTING_POS},
};

/// The player-controlled agent.
#[derive(Clone, Debug, Serialize)]
pub struct Pacman {
    pub agent: Agent,
    /// Buffered direction request, applied as soon as it leads somewhere open.
    pub queued_direction: Option<Direction>,
    pub mouth_open: bool,
    mouth_timer: u32,
}

impl Pacman {
    pub fn new(speed: f32, cell_size: f32) -> Self {
        Self {
            agent: Agent::new(PACMAN_STARTING_POS, speed, cell_size),
            queued_direction: None,
            mouth_open: true,
            mouth_timer: 0,
        }
    }

    pub fn pos(&self) -> Cell {
        self.agent.grid_pos
    }

    pub fn direction(&self) -> Option<Direction> {
        self.agent.direction
    }

    pub fn queue_direction(&mut self, direction: Direction) {
        self.queued_direction = Some(direction);
    }

    /// Puts the player back on its starting cell, stopped and with no queued turn.
    pub fn respawn(&mut self, cell_size: f32) {
        self.agent.place(PACMAN_STARTING_POS, cell_size);
        self.agent.direction = None;
        self.queued_direction = None;
    }

    /// Wrap corridors: leaving column 0 to the left reappears in the last
    /// column and vice versa, provided the cell on the far side is open.
    fn handle_teleportation(&mut self, maze: &Maze, cell_size: f32) {
        let (row, col) = self.agent.grid_pos;
        let last_col = maze.cols() as isize - 1;
        let destination = match self.agent.direction {
            Some(Direction::Left) if col == 0 => (row, last_col),
            Some(Direction::Right) if col == last_col => (row, 0),
            _ => return,
        };
        if maze.is_walkable(destination) {
            self.agent.place(destination, cell_size);
        }
    }

    /// Applies the queued direction if it leads to an open cell from the
    /// current grid position.
    fn apply_queued_direction(&mut self, maze: &Maze) {
        if let Some(queued) = self.queued_direction {
            if self.agent.can_move(queued, maze) {
                self.agent.direction = Some(queued);
                self.queued_direction = None;
            }
        }
    }

    /// Advances the player by one update of `dt_ms` milliseconds.
    pub fn update(&mut self, maze: &Maze, cell_size: f32, dt_ms: u32, mouth_toggle_ms: u32) {
        self.handle_teleportation(maze, cell_size);
        self.apply_queued_direction(maze);

        self.mouth_timer += dt_ms;
        if self.mouth_timer >= mouth_toggle_ms {
            self.mouth_open = !self.mouth_open;
            self.mouth_timer = 0;
        }

        self.agent.advance(maze, cell_size);
    }
}
