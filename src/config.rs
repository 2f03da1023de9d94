use serde::{Deserialize, Serialize};

use crate::{
    error::{GameError, GameResult},
    variables::*,
};

/// Tunable game parameters. Every field falls back to the classic value when
/// missing from a JSON config.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side of one cell in pixels.
    pub cell_size: f32,
    /// Speeds are fractions of a cell covered per update.
    pub pacman_speed: f32,
    pub ghost_speed: f32,
    pub frightened_ghost_speed: f32,
    pub eaten_ghost_speed: f32,
    pub scatter_duration_ms: u32,
    pub chase_duration_ms: u32,
    pub frightened_duration_ms: u32,
    pub pellet_score: u32,
    pub power_pellet_score: u32,
    pub ghost_score: u32,
    pub starting_lives: u8,
    /// A ghost touches the player when their Manhattan cell distance is below this.
    pub capture_distance: f32,
    pub mouth_toggle_ms: u32,
    /// Seed for the ghosts' random choices; drawn from the OS when absent.
    pub rng_seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cell_size: CELL_SIZE,
            pacman_speed: PACMAN_SPEED,
            ghost_speed: GHOST_SPEED,
            frightened_ghost_speed: FRIGHTENED_GHOST_SPEED,
            eaten_ghost_speed: EATEN_GHOST_SPEED,
            scatter_duration_ms: SCATTER_DURATION_MS,
            chase_duration_ms: CHASE_DURATION_MS,
            frightened_duration_ms: FRIGHTENED_DURATION_MS,
            pellet_score: PELLET_SCORE,
            power_pellet_score: POWER_PELLET_SCORE,
            ghost_score: GHOST_SCORE,
            starting_lives: STARTING_LIVES,
            capture_distance: CAPTURE_DISTANCE,
            mouth_toggle_ms: MOUTH_TOGGLE_MS,
            rng_seed: None,
        }
    }
}

impl GameConfig {
    /// Parses and validates a JSON config.
    pub fn from_json(json: &str) -> GameResult<Self> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    pub fn validate(&self) -> GameResult<()> {
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(GameError::InvalidConfig(format!(
                "cell_size must be positive, got {}",
                self.cell_size
            )));
        }
        for (name, speed) in [
            ("pacman_speed", self.pacman_speed),
            ("ghost_speed", self.ghost_speed),
            ("frightened_ghost_speed", self.frightened_ghost_speed),
            ("eaten_ghost_speed", self.eaten_ghost_speed),
        ] {
            if !(speed > 0.0 && speed <= 1.0) {
                return Err(GameError::InvalidConfig(format!(
                    "{name} must be in (0, 1], got {speed}"
                )));
            }
        }
        for (name, duration) in [
            ("scatter_duration_ms", self.scatter_duration_ms),
            ("chase_duration_ms", self.chase_duration_ms),
            ("frightened_duration_ms", self.frightened_duration_ms),
        ] {
            if duration == 0 {
                return Err(GameError::InvalidConfig(format!("{name} must be positive")));
            }
        }
        if self.starting_lives == 0 {
            return Err(GameError::InvalidConfig("starting_lives must be at least 1".into()));
        }
        if !(self.capture_distance > 0.0) {
            return Err(GameError::InvalidConfig(format!(
                "capture_distance must be positive, got {}",
                self.capture_distance
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_use_defaults() {
        let config = GameConfig::from_json(r#"{"ghost_score": 400, "rng_seed": 3}"#).unwrap();
        assert_eq!(config.ghost_score, 400);
        assert_eq!(config.rng_seed, Some(3));
        assert_eq!(config.scatter_duration_ms, 7000);
        assert_eq!(config.chase_duration_ms, 20000);
        assert_eq!(config.starting_lives, 3);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            GameConfig::from_json(r#"{"pacman_speed": 0.0}"#),
            Err(GameError::InvalidConfig(_))
        ));
        assert!(matches!(
            GameConfig::from_json(r#"{"starting_lives": 0}"#),
            Err(GameError::InvalidConfig(_))
        ));
        for field in ["scatter_duration_ms", "chase_duration_ms", "frightened_duration_ms"] {
            assert!(matches!(
                GameConfig::from_json(&format!(r#"{{"{field}": 0}}"#)),
                Err(GameError::InvalidConfig(_))
            ));
        }
        assert!(matches!(GameConfig::from_json("{"), Err(GameError::Json(_))));
    }
}
