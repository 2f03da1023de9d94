use arrayvec::ArrayVec;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use rand::{seq::SliceRandom, Rng};
use serde::Serialize;
use tracing::trace;

use crate::{
    agent::Agent,
    config::GameConfig,
    ghost_homes::*,
    grid::Maze,
    mode::{GhostMode, ModeTimer},
    variables::{
        delta_of, manhattan_distance, step,
        Direction::{self, *},
        Cell,
    },
};

/// The four targeting strategies. The order of `ALL` is also the order in
/// which ghosts are updated each tick.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, IntoPrimitive, TryFromPrimitive, Serialize)]
#[repr(u8)]
pub enum GhostVariant {
    Lead = 0,
    Ambush = 1,
    Flank = 2,
    Erratic = 3,
}

impl GhostVariant {
    pub const ALL: [GhostVariant; 4] = [
        GhostVariant::Lead,
        GhostVariant::Ambush,
        GhostVariant::Flank,
        GhostVariant::Erratic,
    ];

    pub fn spawn_pos(self) -> Cell {
        match self {
            GhostVariant::Lead => LEAD_SPAWN_POS,
            GhostVariant::Ambush => AMBUSH_SPAWN_POS,
            GhostVariant::Flank => FLANK_SPAWN_POS,
            GhostVariant::Erratic => ERRATIC_SPAWN_POS,
        }
    }

    pub fn scatter_pos(self) -> Cell {
        match self {
            GhostVariant::Lead => LEAD_SCATTER_POS,
            GhostVariant::Ambush => AMBUSH_SCATTER_POS,
            GhostVariant::Flank => FLANK_SCATTER_POS,
            GhostVariant::Erratic => ERRATIC_SCATTER_POS,
        }
    }
}

/// What the presentation layer needs to pick a ghost's colors.
#[derive(Clone, Copy, Debug, Eq, PartialEq, IntoPrimitive, TryFromPrimitive, Serialize)]
#[repr(u8)]
pub enum GhostLook {
    Normal = 0,
    Frightened = 1,
    Eaten = 2,
}

/// The part of the round every ghost reads when picking a chase target.
/// Captured once per tick, before any ghost moves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChaseContext {
    pub pacman_pos: Cell,
    pub pacman_direction: Option<Direction>,
    /// Position of the LEAD ghost, used as the pivot for FLANK.
    pub lead_pos: Cell,
}

/// Returns the chase-mode target tile for a ghost of the given variant.
///
/// - LEAD targets the player's cell.
/// - AMBUSH targets 4 cells ahead of the player. When the player faces up the
///   target is also shifted 4 cells to the left, replicating the overflow bug
///   of the arcade original.
/// - FLANK takes the cell 2 ahead of the player and doubles the vector from
///   the LEAD ghost to it.
/// - ERRATIC targets the player while at least 8 cells away, and retreats to
///   its scatter corner when closer.
pub fn chase_target(variant: GhostVariant, own_pos: Cell, scatter_pos: Cell, ctx: &ChaseContext) -> Cell {
    let (pr, pc) = ctx.pacman_pos;
    let (dr, dc) = delta_of(ctx.pacman_direction);
    match variant {
        GhostVariant::Lead => ctx.pacman_pos,
        GhostVariant::Ambush => {
            if ctx.pacman_direction == Some(Up) {
                (pr + 4 * dr, pc + 4 * dc - 4)
            } else {
                (pr + 4 * dr, pc + 4 * dc)
            }
        }
        GhostVariant::Flank => {
            let ahead = (pr + 2 * dr, pc + 2 * dc);
            let (lr, lc) = ctx.lead_pos;
            (lr + 2 * (ahead.0 - lr), lc + 2 * (ahead.1 - lc))
        }
        GhostVariant::Erratic => {
            if manhattan_distance(own_pos, ctx.pacman_pos) < 8 {
                scatter_pos
            } else {
                ctx.pacman_pos
            }
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct GhostAgent {
    variant: GhostVariant,
    pub agent: Agent,
    spawn_pos: Cell,
    scatter_pos: Cell,
    pub mode: ModeTimer,
    frightened: bool,
    eaten: bool,
}

impl GhostAgent {
    pub fn new(variant: GhostVariant, config: &GameConfig) -> Self {
        Self {
            variant,
            agent: Agent::new(variant.spawn_pos(), config.ghost_speed, config.cell_size),
            spawn_pos: variant.spawn_pos(),
            scatter_pos: variant.scatter_pos(),
            mode: ModeTimer::new(),
            frightened: false,
            eaten: false,
        }
    }

    pub fn variant(&self) -> GhostVariant {
        self.variant
    }

    pub fn pos(&self) -> Cell {
        self.agent.grid_pos
    }

    pub fn spawn_pos(&self) -> Cell {
        self.spawn_pos
    }

    pub fn scatter_pos(&self) -> Cell {
        self.scatter_pos
    }

    pub fn is_frightened(&self) -> bool {
        self.frightened
    }

    pub fn is_eaten(&self) -> bool {
        self.eaten
    }

    pub fn look(&self) -> GhostLook {
        if self.eaten {
            GhostLook::Eaten
        } else if self.frightened {
            GhostLook::Frightened
        } else {
            GhostLook::Normal
        }
    }

    /// Makes the ghost frightened: slower, and turned around on the spot.
    /// Eaten ghosts are unaffected.
    pub fn become_frightened(&mut self, config: &GameConfig) {
        if self.eaten {
            return;
        }
        self.frightened = true;
        self.agent.speed = config.frightened_ghost_speed;
        self.agent.direction = self.agent.direction.map(Direction::opposite);
    }

    /// Ends the frightened state, if the ghost is not eaten.
    pub fn end_frightened(&mut self, config: &GameConfig) {
        if self.eaten {
            return;
        }
        self.frightened = false;
        self.agent.speed = config.ghost_speed;
    }

    /// Marks the ghost eaten and sends it straight to its spawn cell.
    pub fn become_eaten(&mut self, config: &GameConfig) {
        self.eaten = true;
        self.frightened = false;
        self.agent.speed = config.eaten_ghost_speed;
        self.agent.place(self.spawn_pos, config.cell_size);
        self.agent.direction = None;
    }

    /// Back to normal after returning home: scatter mode with a fresh clock.
    fn revive(&mut self, config: &GameConfig) {
        trace!(variant = ?self.variant, "ghost revived at spawn");
        self.eaten = false;
        self.frightened = false;
        self.agent.speed = config.ghost_speed;
        self.mode.reset();
    }

    /// Returns the ghost to its spawn cell facing a random direction, with all
    /// state cleared. Called when the player loses a life.
    pub fn respawn<R: Rng + ?Sized>(&mut self, config: &GameConfig, rng: &mut R) {
        self.agent.place(self.spawn_pos, config.cell_size);
        self.agent.direction = Direction::ALL.choose(rng).copied();
        self.agent.heading = self.agent.direction;
        self.agent.speed = config.ghost_speed;
        self.frightened = false;
        self.eaten = false;
        self.mode.reset();
    }

    /// Returns the tile the ghost is currently steering towards.
    pub fn target_tile(&self, ctx: &ChaseContext) -> Cell {
        if self.eaten {
            GHOST_HOUSE_CENTER
        } else if self.frightened {
            self.pos()
        } else if self.mode.mode == GhostMode::Scatter {
            self.scatter_pos
        } else {
            chase_target(self.variant, self.pos(), self.scatter_pos, ctx)
        }
    }

    /// Returns the directions leading to an open cell, in the given order.
    fn possible_moves(&self, order: [Direction; 4], maze: &Maze) -> ArrayVec<Direction, 4> {
        order
            .into_iter()
            .filter(|&direction| self.agent.can_move(direction, maze))
            .collect()
    }

    /// Picks the direction whose next cell is closest (Manhattan) to `target`.
    ///
    /// Reversing the heading that brought the ghost into its cell is off the
    /// table unless it is the only way out, or the ghost is frightened or
    /// eaten; in that case the candidates are also shuffled.
    /// Ties go to the earliest candidate in evaluation order. With no
    /// candidate at all the current direction is kept.
    pub fn choose_direction<R: Rng + ?Sized>(
        &self,
        maze: &Maze,
        target: Cell,
        rng: &mut R,
    ) -> Option<Direction> {
        let roaming = self.frightened || self.eaten;
        let mut order = Direction::ALL;
        if roaming {
            order.shuffle(rng);
        }

        let possible = self.possible_moves(order, maze);
        let reverse = self.agent.heading.map(Direction::opposite);
        let allow_reverse = roaming || possible.len() <= 1;

        possible
            .into_iter()
            .filter(|&direction| allow_reverse || Some(direction) != reverse)
            .min_by_key(|&direction| manhattan_distance(step(self.pos(), direction), target))
            .or(self.agent.direction)
    }

    /// Advances the mode clock, steers, and moves the ghost by one update.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        maze: &Maze,
        ctx: &ChaseContext,
        dt_ms: u32,
        config: &GameConfig,
        rng: &mut R,
    ) {
        let held = self.frightened || self.eaten;
        self.mode.advance(
            dt_ms,
            held,
            config.scatter_duration_ms,
            config.chase_duration_ms,
        );

        if self.eaten && self.pos() == self.spawn_pos {
            self.revive(config);
        }

        let target = self.target_tile(ctx);
        self.agent.direction = self.choose_direction(maze, target, rng);
        self.agent.advance(maze, config.cell_size);
    }
}
