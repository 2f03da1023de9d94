use num_enum::TryFromPrimitive;
use numpy::{IntoPyArray, PyArray2};
use pyo3::{exceptions::PyValueError, prelude::*};

use super::RoundState;
use crate::{
    config::GameConfig,
    error::GameError,
    events::InputEvent,
    variables::{Cell, Direction},
};

fn to_py_err(err: GameError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

type PyAgentView = (Cell, (f32, f32), Option<u8>);

#[pymethods]
impl RoundState {
    /// Creates a round on the classic maze. `config_json` overrides any of the
    /// default parameters.
    #[new]
    #[pyo3(signature = (config_json=None))]
    fn py_new(config_json: Option<&str>) -> PyResult<Self> {
        let config = match config_json {
            Some(json) => GameConfig::from_json(json).map_err(to_py_err)?,
            None => GameConfig::default(),
        };
        RoundState::new(config).map_err(to_py_err)
    }

    /// Queues a direction request (0 = up, 1 = down, 2 = left, 3 = right).
    fn key(&mut self, direction: u8) -> PyResult<()> {
        let direction = Direction::try_from_primitive(direction)
            .map_err(|_| PyValueError::new_err("Invalid direction"))?;
        self.handle_input(InputEvent::Direction(direction));
        Ok(())
    }

    /// Starts a fresh round if none is in progress. Returns whether it did.
    #[pyo3(name = "restart")]
    fn py_restart(&mut self) -> bool {
        self.restart()
    }

    /// Advances by `dt_ms` milliseconds and returns the queued sound event codes.
    #[pyo3(name = "tick")]
    fn py_tick(&mut self, dt_ms: u32) -> Vec<u8> {
        self.tick(dt_ms);
        self.take_events().into_iter().map(u8::from).collect()
    }

    #[getter(score)]
    fn py_score(&self) -> u32 {
        self.score
    }

    #[getter(lives)]
    fn py_lives(&self) -> u8 {
        self.lives
    }

    /// The round phase as an integer (0 = not started, 1 = active, 2 = lost, 3 = won).
    #[getter(phase)]
    fn py_phase(&self) -> u8 {
        self.phase.into()
    }

    #[getter(message)]
    fn py_message(&self) -> &'static str {
        self.message()
    }

    #[getter(fright_timer_ms)]
    fn py_fright_timer_ms(&self) -> u32 {
        self.fright.remaining_ms
    }

    /// (grid position, pixel position, direction, mouth open)
    fn player(&self) -> (Cell, (f32, f32), Option<u8>, bool) {
        let agent = &self.pacman.agent;
        (
            agent.grid_pos,
            agent.pixel_pos,
            agent.direction.map(u8::from),
            self.pacman.mouth_open,
        )
    }

    /// One (variant, look, (grid position, pixel position, direction)) tuple per ghost.
    #[pyo3(name = "ghosts")]
    fn py_ghosts(&self) -> Vec<(u8, u8, PyAgentView)> {
        self.ghosts
            .iter()
            .map(|ghost| {
                let agent = &ghost.agent;
                (
                    ghost.variant().into(),
                    ghost.look().into(),
                    (agent.grid_pos, agent.pixel_pos, agent.direction.map(u8::from)),
                )
            })
            .collect()
    }

    fn pellets(&self) -> Vec<Cell> {
        self.pickups.pellets.iter().copied().collect()
    }

    fn power_pellets(&self) -> Vec<Cell> {
        self.pickups.power_pellets.iter().copied().collect()
    }

    /// The maze as a (rows, cols) array: 0 = open, 1 = wall.
    fn cells_numpy(&self, py: Python<'_>) -> Py<PyArray2<u8>> {
        self.maze.cells().mapv(u8::from).into_pyarray(py).into()
    }

    #[pyo3(name = "snapshot_json")]
    fn py_snapshot_json(&self) -> PyResult<String> {
        self.snapshot_json().map_err(to_py_err)
    }

    fn __str__(&self) -> String {
        self.snapshot().to_ascii()
    }
}
