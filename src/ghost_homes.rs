use crate::variables::Cell;

// These are the cells the ghosts occupy at the start of a round, after a life
// is lost, and right after being eaten.

pub const LEAD_SPAWN_POS: Cell = (11, 13);
pub const AMBUSH_SPAWN_POS: Cell = (14, 13);
pub const FLANK_SPAWN_POS: Cell = (14, 11);
pub const ERRATIC_SPAWN_POS: Cell = (14, 15);

// These are the coordinates the ghosts attempt to move towards when they are in
// scatter mode. The bottom two lie on the maze's outer wall row.

pub const LEAD_SCATTER_POS: Cell = (1, 23);
pub const AMBUSH_SCATTER_POS: Cell = (1, 6);
pub const FLANK_SCATTER_POS: Cell = (30, 25);
pub const ERRATIC_SCATTER_POS: Cell = (30, 3);

/// Eaten ghosts head here.
pub const GHOST_HOUSE_CENTER: Cell = (14, 13);
