//! Configuration errors.
//!
//! Only malformed configuration is an error: an illegal placement is reported
//! through [`MoveResult`](crate::board::MoveResult), and scoring against a
//! stale board yields `None`.

use thiserror::Error;

/// Errors raised while building a board, a turn cycle, or a position.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A move-cycle token is not 1 to 3 characters long.
    #[error("move token {token:?} must be 1 to 3 characters long")]
    TokenLength { token: String },

    /// A move-cycle token names a player the alphabet doesn't know.
    #[error("unknown player {ch:?} in move token {token:?}")]
    UnknownPlayer { token: String, ch: char },

    /// A move-cycle token names a color the alphabet doesn't know.
    #[error("unknown color {ch:?} in move token {token:?}")]
    UnknownColor { token: String, ch: char },

    /// The repeating turn cycle has no entries.
    #[error("turn cycle is empty")]
    EmptyCycle,

    /// A size parameter is out of range for the shape.
    #[error("{shape} size {size} is out of range ({min}..={max})")]
    InvalidSize {
        shape: &'static str,
        size: usize,
        min: usize,
        max: usize,
    },

    /// The shape only takes one size parameter but got two different ones.
    #[error("{shape} boards take a single size, got {width}x{height}")]
    UnsupportedDimensions {
        shape: &'static str,
        width: usize,
        height: usize,
    },

    /// The geometry produced no nodes.
    #[error("board has no nodes")]
    EmptyBoard,

    /// A preset stone refers to a node the board doesn't have.
    #[error("preset stone at node {index} is outside the board ({len} nodes)")]
    PresetOutOfRange { index: usize, len: usize },

    /// A preset stone is a pass marker or otherwise not a placement.
    #[error("preset stones must be placements")]
    PresetNotPlacement,

    /// A move-log entry has an index below -1.
    #[error("invalid move-log index {0}")]
    InvalidPlayIndex(i64),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EngineError>;
