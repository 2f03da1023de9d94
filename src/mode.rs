use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::Serialize;
use tracing::trace;

/// The scatter/chase alternation followed by ghosts that are neither
/// frightened nor eaten.
#[derive(Clone, Copy, Debug, Eq, PartialEq, IntoPrimitive, TryFromPrimitive, Serialize)]
#[repr(u8)]
pub enum GhostMode {
    Scatter = 1,
    Chase = 2,
}

/// Per-ghost scatter/chase clock.
///
/// Elapsed time accumulates on every update, but the mode only flips while the
/// ghost is neither frightened nor eaten. A flip restarts the clock at zero, so
/// a ghost that was held past its deadline flips on its first free update.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ModeTimer {
    pub mode: GhostMode,
    pub elapsed_ms: u32,
}

impl ModeTimer {
    pub fn new() -> Self {
        Self {
            mode: GhostMode::Scatter,
            elapsed_ms: 0,
        }
    }

    /// Back to scatter with a fresh clock.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Adds `dt_ms` and flips the mode if it has run its course.
    /// Returns true if the mode flipped.
    pub fn advance(&mut self, dt_ms: u32, held: bool, scatter_ms: u32, chase_ms: u32) -> bool {
        self.elapsed_ms = self.elapsed_ms.saturating_add(dt_ms);
        if held {
            return false;
        }
        let (limit, next) = match self.mode {
            GhostMode::Scatter => (scatter_ms, GhostMode::Chase),
            GhostMode::Chase => (chase_ms, GhostMode::Scatter),
        };
        if self.elapsed_ms < limit {
            return false;
        }
        trace!(from = ?self.mode, to = ?next, "ghost mode flip");
        self.mode = next;
        self.elapsed_ms = 0;
        true
    }
}

impl Default for ModeTimer {
    fn default() -> Self {
        Self::new()
    }
}

/// The global countdown started by a power pellet.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct FrightTimer {
    pub remaining_ms: u32,
}

impl FrightTimer {
    pub fn is_active(&self) -> bool {
        self.remaining_ms > 0
    }

    /// (Re)starts the countdown.
    pub fn start(&mut self, duration_ms: u32) {
        self.remaining_ms = duration_ms;
    }

    /// Counts down by `dt_ms`. Returns true on the update the countdown expires.
    pub fn countdown(&mut self, dt_ms: u32) -> bool {
        if !self.is_active() {
            return false;
        }
        self.remaining_ms = self.remaining_ms.saturating_sub(dt_ms);
        self.remaining_ms == 0
    }
}
