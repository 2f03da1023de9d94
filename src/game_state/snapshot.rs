use std::collections::BTreeSet;

use itertools::Itertools;
use serde::Serialize;

use super::{RoundPhase, RoundState};
use crate::{
    ghost_agent::{GhostAgent, GhostLook, GhostVariant},
    grid::{CellKind, Maze},
    pacman::Pacman,
    variables::{Cell, Direction},
};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PacmanView {
    pub grid_pos: Cell,
    pub pixel_pos: (f32, f32),
    pub direction: Option<Direction>,
    pub mouth_open: bool,
}

impl From<&Pacman> for PacmanView {
    fn from(pacman: &Pacman) -> Self {
        Self {
            grid_pos: pacman.agent.grid_pos,
            pixel_pos: pacman.agent.pixel_pos,
            direction: pacman.agent.direction,
            mouth_open: pacman.mouth_open,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GhostView {
    pub variant: GhostVariant,
    pub grid_pos: Cell,
    pub pixel_pos: (f32, f32),
    pub direction: Option<Direction>,
    pub look: GhostLook,
}

impl From<&GhostAgent> for GhostView {
    fn from(ghost: &GhostAgent) -> Self {
        Self {
            variant: ghost.variant(),
            grid_pos: ghost.agent.grid_pos,
            pixel_pos: ghost.agent.pixel_pos,
            direction: ghost.agent.direction,
            look: ghost.look(),
        }
    }
}

/// What the presentation layer draws for one frame. Borrows the static parts
/// of the round instead of copying them.
#[derive(Clone, Debug, Serialize)]
pub struct Snapshot<'a> {
    pub maze: &'a Maze,
    pub pellets: &'a BTreeSet<Cell>,
    pub power_pellets: &'a BTreeSet<Cell>,
    pub pacman: PacmanView,
    pub ghosts: [GhostView; 4],
    pub score: u32,
    pub lives: u8,
    pub fright_timer_ms: u32,
    pub phase: RoundPhase,
    pub message: &'static str,
}

impl<'a> Snapshot<'a> {
    pub fn new(round: &'a RoundState) -> Self {
        Self {
            maze: round.maze(),
            pellets: &round.pickups().pellets,
            power_pellets: &round.pickups().power_pellets,
            pacman: PacmanView::from(&round.pacman),
            ghosts: array_init::array_init(|i| GhostView::from(&round.ghosts()[i])),
            score: round.score(),
            lives: round.lives(),
            fright_timer_ms: round.fright_timer_ms(),
            phase: round.phase(),
            message: round.message(),
        }
    }

    fn ghost_char(&self, cell: Cell) -> Option<char> {
        let ghost = self.ghosts.iter().find(|g| g.grid_pos == cell)?;
        Some(match ghost.look {
            GhostLook::Eaten => '"',
            GhostLook::Frightened => 'w',
            GhostLook::Normal => match ghost.variant {
                GhostVariant::Lead => 'L',
                GhostVariant::Ambush => 'A',
                GhostVariant::Flank => 'F',
                GhostVariant::Erratic => 'E',
            },
        })
    }

    fn cell_char(&self, cell: Cell) -> char {
        if cell == self.pacman.grid_pos {
            '@'
        } else if let Some(ch) = self.ghost_char(cell) {
            ch
        } else if self.maze.get(cell) == Some(CellKind::Wall) {
            '#'
        } else if self.power_pellets.contains(&cell) {
            'o'
        } else if self.pellets.contains(&cell) {
            '.'
        } else {
            ' '
        }
    }

    /// Renders the frame as text: a status line followed by one line per maze row.
    pub fn to_ascii(&self) -> String {
        let status = format!("Score: {}  Lives: {}  {}", self.score, self.lives, self.message);
        let rows = (0..self.maze.rows() as isize).map(|row| {
            (0..self.maze.cols() as isize)
                .map(|col| self.cell_char((row, col)))
                .collect::<String>()
        });
        std::iter::once(status.trim_end().to_owned()).chain(rows).join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    #[test]
    fn ascii_frame_shows_agents_and_pickups() {
        let round = RoundState::new(GameConfig::default().with_seed(9)).unwrap();
        let frame = round.snapshot().to_ascii();
        let lines: Vec<&str> = frame.lines().collect();
        assert_eq!(lines.len(), 1 + 31);
        assert_eq!(lines[0], "Score: 0  Lives: 3  Press ENTER to Start");
        assert_eq!(lines[1], "#".repeat(28));
        assert_eq!(lines[1 + 21].chars().nth(10), Some('@'));
        assert_eq!(lines[1 + 11].chars().nth(13), Some('L'));
        assert_eq!(lines[1 + 3].chars().nth(1), Some('o'));
    }

    #[test]
    fn snapshot_reflects_ghost_looks() {
        let mut round = RoundState::new(GameConfig::default().with_seed(9)).unwrap();
        let config = round.config().clone();
        round.ghost_mut(GhostVariant::Ambush).become_frightened(&config);
        round.ghost_mut(GhostVariant::Flank).become_eaten(&config);
        let looks = round.snapshot().ghosts.map(|g| g.look);
        assert_eq!(
            looks,
            [GhostLook::Normal, GhostLook::Frightened, GhostLook::Eaten, GhostLook::Normal]
        );
    }
}
