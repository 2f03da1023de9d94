#[cfg(feature = "python")]
mod py_wrappers;
pub mod snapshot;

use num_enum::{IntoPrimitive, TryFromPrimitive};
use rand::{rngs::StdRng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info, trace};

use crate::{
    config::GameConfig,
    error::GameResult,
    events::{GameEvent, InputEvent},
    ghost_agent::{ChaseContext, GhostAgent, GhostVariant},
    grid::{Maze, PickupKind, Pickups, CLASSIC_LAYOUT},
    mode::FrightTimer,
    pacman::Pacman,
    variables::{manhattan_distance, GAME_OVER_MESSAGE, LEVEL_COMPLETE_MESSAGE, START_MESSAGE},
};

pub use self::snapshot::Snapshot;

#[derive(Clone, Copy, Debug, Eq, PartialEq, IntoPrimitive, TryFromPrimitive, Serialize)]
#[repr(u8)]
pub enum RoundPhase {
    NotStarted = 0,
    Active = 1,
    Lost = 2,
    Won = 3,
}

impl RoundPhase {
    /// The text the presentation layer shows for this phase.
    pub fn message(self) -> &'static str {
        match self {
            RoundPhase::NotStarted => START_MESSAGE,
            RoundPhase::Active => "",
            RoundPhase::Lost => GAME_OVER_MESSAGE,
            RoundPhase::Won => LEVEL_COMPLETE_MESSAGE,
        }
    }
}

/// Everything that changes during a round, advanced one update at a time by
/// [`RoundState::tick`].
#[derive(Clone)]
#[cfg_attr(feature = "python", pyo3::pyclass)]
pub struct RoundState {
    config: GameConfig,
    maze: Maze,
    initial_pickups: Pickups,
    pickups: Pickups,
    pub pacman: Pacman,
    /// Kept in update order: LEAD, AMBUSH, FLANK, ERRATIC.
    ghosts: [GhostAgent; 4],
    score: u32,
    lives: u8,
    fright: FrightTimer,
    phase: RoundPhase,
    rng: StdRng,
    events: Vec<GameEvent>,
}

impl RoundState {
    /// Creates a round on the classic maze, waiting for a restart to begin.
    pub fn new(config: GameConfig) -> GameResult<Self> {
        Self::with_layout(config, &CLASSIC_LAYOUT)
    }

    /// Creates a round on the given layout. Spawn cells and scatter corners
    /// stay those of the classic maze.
    pub fn with_layout(config: GameConfig, layout: &[&str]) -> GameResult<Self> {
        config.validate()?;
        let (maze, pickups) = Maze::parse(layout)?;
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        info!(
            pellets = pickups.pellets.len(),
            power_pellets = pickups.power_pellets.len(),
            "maze loaded"
        );
        Ok(Self {
            pacman: Pacman::new(config.pacman_speed, config.cell_size),
            ghosts: array_init::array_init(|i| GhostAgent::new(GhostVariant::ALL[i], &config)),
            score: 0,
            lives: config.starting_lives,
            fright: FrightTimer::default(),
            phase: RoundPhase::NotStarted,
            rng,
            events: vec![GameEvent::RoundStart],
            initial_pickups: pickups.clone(),
            pickups,
            maze,
            config,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn pickups(&self) -> &Pickups {
        &self.pickups
    }

    pub fn ghosts(&self) -> &[GhostAgent; 4] {
        &self.ghosts
    }

    pub fn ghosts_mut(&mut self) -> &mut [GhostAgent; 4] {
        &mut self.ghosts
    }

    pub fn ghost(&self, variant: GhostVariant) -> &GhostAgent {
        &self.ghosts[u8::from(variant) as usize]
    }

    pub fn ghost_mut(&mut self, variant: GhostVariant) -> &mut GhostAgent {
        &mut self.ghosts[u8::from(variant) as usize]
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn message(&self) -> &'static str {
        self.phase.message()
    }

    /// Remaining global fright time in milliseconds; 0 when inactive.
    pub fn fright_timer_ms(&self) -> u32 {
        self.fright.remaining_ms
    }

    pub fn is_frightened(&self) -> bool {
        self.fright.is_active()
    }

    /// Drains the sound triggers queued since the last call.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::Direction(direction) => self.pacman.queue_direction(direction),
            InputEvent::Restart => {
                self.restart();
            }
        }
    }

    /// Rebuilds the round from the layout and makes it active. Does nothing
    /// (and returns false) while a round is in progress.
    pub fn restart(&mut self) -> bool {
        if self.phase == RoundPhase::Active {
            return false;
        }
        let config = &self.config;
        self.pickups = self.initial_pickups.clone();
        self.pacman = Pacman::new(config.pacman_speed, config.cell_size);
        self.ghosts = array_init::array_init(|i| GhostAgent::new(GhostVariant::ALL[i], config));
        self.score = 0;
        self.lives = config.starting_lives;
        self.fright = FrightTimer::default();
        self.phase = RoundPhase::Active;
        self.events.push(GameEvent::RoundStart);
        info!("round started");
        true
    }

    /// Advances the round by one update of `dt_ms` milliseconds.
    ///
    /// Order: player, pickup under the player, fright countdown, ghosts (each
    /// followed by its collision check), then the win check.
    pub fn tick(&mut self, dt_ms: u32) {
        if self.phase != RoundPhase::Active {
            return;
        }

        self.pacman.update(
            &self.maze,
            self.config.cell_size,
            dt_ms,
            self.config.mouth_toggle_ms,
        );

        // the countdown starts on the update after a power pellet
        let power_pellet_eaten = self.collect_pickup();
        if !power_pellet_eaten && self.fright.countdown(dt_ms) {
            self.end_fright();
        }

        self.update_ghosts(dt_ms);

        // clearing the board wins even if the last life went on this update
        if self.pickups.is_empty() {
            self.phase = RoundPhase::Won;
            info!(score = self.score, "round won");
        }
    }

    /// Eats whatever lies in the cell the player occupies. Returns true if it
    /// was a power pellet.
    fn collect_pickup(&mut self) -> bool {
        let cell = self.pacman.agent.occupied_cell(self.config.cell_size);
        match self.pickups.take(cell) {
            Some(PickupKind::Pellet) => {
                self.score += self.config.pellet_score;
                self.events.push(GameEvent::PelletEaten);
                trace!(?cell, "pellet eaten");
                false
            }
            Some(PickupKind::PowerPellet) => {
                self.score += self.config.power_pellet_score;
                self.events.push(GameEvent::PowerPelletEaten);
                self.become_frightened();
                true
            }
            None => false,
        }
    }

    /// Starts (or restarts) the global fright countdown and frightens every
    /// ghost that is not eaten.
    fn become_frightened(&mut self) {
        debug!(duration_ms = self.config.frightened_duration_ms, "fright mode on");
        self.fright.start(self.config.frightened_duration_ms);
        for ghost in &mut self.ghosts {
            ghost.become_frightened(&self.config);
        }
    }

    fn end_fright(&mut self) {
        debug!("fright mode off");
        for ghost in &mut self.ghosts {
            ghost.end_frightened(&self.config);
        }
    }

    /// Moves every ghost in order and resolves its contact with the player.
    fn update_ghosts(&mut self, dt_ms: u32) {
        let ctx = ChaseContext {
            pacman_pos: self.pacman.pos(),
            pacman_direction: self.pacman.direction(),
            lead_pos: self.ghost(GhostVariant::Lead).pos(),
        };

        for i in 0..self.ghosts.len() {
            let ghost = &mut self.ghosts[i];
            ghost.update(&self.maze, &ctx, dt_ms, &self.config, &mut self.rng);

            let distance = manhattan_distance(ghost.pos(), self.pacman.pos());
            if distance as f32 >= self.config.capture_distance {
                continue;
            }
            if ghost.is_frightened() && !ghost.is_eaten() {
                ghost.become_eaten(&self.config);
                self.score += self.config.ghost_score;
                self.events.push(GameEvent::GhostEaten);
                debug!(variant = ?ghost.variant(), score = self.score, "ghost eaten");
            } else if !ghost.is_frightened() && !ghost.is_eaten() {
                debug!(variant = ?ghost.variant(), "player caught");
                self.lose_life();
                // everyone was just reset; the remaining ghosts wait for the next tick
                break;
            }
        }
    }

    fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        self.events.push(GameEvent::LifeLost);
        self.respawn_agents();
        if self.lives == 0 {
            self.phase = RoundPhase::Lost;
            info!(score = self.score, "round lost");
        } else {
            debug!(lives = self.lives, "life lost");
        }
    }

    /// Puts every agent back on its spawn cell. Pickups, score and the fright
    /// countdown are left alone.
    fn respawn_agents(&mut self) {
        self.pacman.respawn(self.config.cell_size);
        for ghost in &mut self.ghosts {
            ghost.respawn(&self.config, &mut self.rng);
        }
    }

    /// A read-only view of the round for the presentation layer.
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot::new(self)
    }

    pub fn snapshot_json(&self) -> GameResult<String> {
        Ok(serde_json::to_string(&self.snapshot())?)
    }
}
