pub mod agent;
pub mod config;
pub mod error;
pub mod events;
pub mod game_state;
pub mod ghost_agent;
pub mod ghost_homes;
pub mod grid;
pub mod mode;
pub mod pacman;
pub mod variables;

pub use config::GameConfig;
pub use error::{GameError, GameResult};
pub use game_state::{RoundPhase, RoundState};

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// A Python module exposing the maze-chase game core to a presentation layer.
#[cfg(feature = "python")]
#[pymodule]
fn mazechase_rs(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<RoundState>()?;
    m.add("UPDATES_PER_SECOND", variables::UPDATES_PER_SECOND)?;
    m.add("FRAME_MS", variables::FRAME_MS)?;
    Ok(())
}
