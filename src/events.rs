use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::Serialize;

use crate::variables::Direction;

/// Input delivered by the presentation layer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InputEvent {
    /// The player wants to go this way as soon as it is possible.
    Direction(Direction),
    /// Start a fresh round. Ignored while a round is in progress.
    Restart,
}

/// Discrete triggers for the sound player. The core never waits on them.
#[derive(Clone, Copy, Debug, Eq, PartialEq, IntoPrimitive, TryFromPrimitive, Serialize)]
#[repr(u8)]
pub enum GameEvent {
    RoundStart = 0,
    PelletEaten = 1,
    PowerPelletEaten = 2,
    LifeLost = 3,
    GhostEaten = 4,
}
