//! Constants for board geometry, size limits and the engine-driven mover.
//!
//! Boards are built at runtime from a shape descriptor, so nothing here fixes
//! the board size. These values bound what the configuration layer accepts
//! and tune the adjacency rule shared by every lattice.

// =============================================================================
// Adjacency
// =============================================================================

/// Two nodes are neighbors when their squared distance is within this much
/// of 1.0.
pub const ADJACENCY_TOLERANCE: f64 = 0.01;

/// Points closer than this (squared) are treated as the same point.
pub const DUPLICATE_TOLERANCE: f64 = 1e-6;

/// Padding added on each side of the bounding box, in board units.
pub const BOUNDS_PADDING: f64 = 1.0;

// =============================================================================
// Size limits
// =============================================================================

/// Smallest size parameter any shape accepts.
pub const MIN_BOARD_SIZE: usize = 1;

/// Largest size parameter any shape accepts. Keeps the pairwise adjacency
/// build cheap.
pub const MAX_BOARD_SIZE: usize = 25;

/// Smallest dodecagon radius that yields a non-empty board.
pub const MIN_DODECAGON_RADIUS: usize = 2;

// =============================================================================
// Starpoints
// =============================================================================

/// Starpoint `(x, y)` coordinates on a 9x9 grid.
pub const STARPOINTS_9X9: [(usize, usize); 5] = [(2, 2), (2, 6), (4, 4), (6, 2), (6, 6)];

/// Starpoint `(x, y)` coordinates on a 19x19 grid.
pub const STARPOINTS_19X19: [(usize, usize); 9] = [
    (3, 3),
    (3, 9),
    (3, 15),
    (9, 3),
    (9, 9),
    (9, 15),
    (15, 3),
    (15, 9),
    (15, 15),
];

// =============================================================================
// Move log
// =============================================================================

/// Move-log index marking a pass.
pub const PASS_INDEX: i64 = -1;

// =============================================================================
// Engine-driven mover
// =============================================================================

/// Default cap on consecutive engine plays, so a cycle made only of engine
/// moves can't loop forever.
pub const MAX_ENGINE_PLAYS: usize = 1000;

/// Default number of plays generated by the `selfplay` command.
pub const SELFPLAY_MOVES: usize = 200;
