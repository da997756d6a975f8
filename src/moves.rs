//! Move-log entries and replay.
//!
//! The log is an append-only list of `{"i": index, "c": color}` records, with
//! `i = -1` marking a pass. A position is reconstructed by replaying the log
//! into a fresh position built from the same settings, which is also how a
//! game is rewound to an earlier move.

use serde::{Deserialize, Serialize};

use crate::board::Color;
use crate::constants::PASS_INDEX;
use crate::error::{EngineError, Result};
use crate::position::Position;
use crate::settings::GameSettings;

/// One entry of the move log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPlay", into = "RawPlay")]
pub enum Play {
    Place { index: usize, color: Color },
    Pass { color: Color },
}

impl Play {
    pub fn color(&self) -> Color {
        match *self {
            Play::Place { color, .. } | Play::Pass { color } => color,
        }
    }

    /// Node index, or `None` for a pass.
    pub fn index(&self) -> Option<usize> {
        match *self {
            Play::Place { index, .. } => Some(index),
            Play::Pass { .. } => None,
        }
    }
}

/// Wire shape of a [`Play`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct RawPlay {
    i: i64,
    c: Color,
}

impl TryFrom<RawPlay> for Play {
    type Error = EngineError;

    fn try_from(raw: RawPlay) -> Result<Self> {
        if raw.i == PASS_INDEX {
            return Ok(Play::Pass { color: raw.c });
        }
        let index = usize::try_from(raw.i).map_err(|_| EngineError::InvalidPlayIndex(raw.i))?;
        Ok(Play::Place {
            index,
            color: raw.c,
        })
    }
}

impl From<Play> for RawPlay {
    fn from(play: Play) -> Self {
        match play {
            // Indices past i64::MAX can't exist on a real board; saturate so
            // they still fail the range check on the way back in.
            Play::Place { index, color } => RawPlay {
                i: i64::try_from(index).unwrap_or(i64::MAX),
                c: color,
            },
            Play::Pass { color } => RawPlay {
                i: PASS_INDEX,
                c: color,
            },
        }
    }
}

/// Rebuild the position reached after the whole log.
pub fn replay(settings: &GameSettings, plays: &[Play]) -> Result<Position> {
    replay_to(settings, plays, plays.len())
}

/// Rebuild the position reached after the first `n` log entries.
///
/// Entries the position rejects are skipped with a warning; they consume no
/// turn, the same way a live game ignores a failed placement.
pub fn replay_to(settings: &GameSettings, plays: &[Play], n: usize) -> Result<Position> {
    let mut position = Position::from_settings(settings)?;
    for (k, play) in plays.iter().take(n).enumerate() {
        if !position.apply(play) {
            tracing::warn!(entry = k, ?play, "skipping illegal move-log entry");
        }
    }
    Ok(position)
}
