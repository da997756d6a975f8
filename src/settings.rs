//! Game settings: the configuration a game is created from.
//!
//! Settings are plain serde data, stored as JSON by the surrounding app:
//!
//! ```json
//! {
//!   "boardType": "grid",
//!   "boardWidth": 9,
//!   "boardHeight": 9,
//!   "pregameSequence": "XEV,XEV",
//!   "turnCycle": "B,W",
//!   "presetStones": [{"i": 40, "c": 1}],
//!   "alphabet": "letters"
//! }
//! ```
//!
//! Every field is optional. This layer is where size parameters are checked
//! against the shape; the geometry builders assume valid input.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::geometry::Shape;
use crate::moves::Play;
use crate::notation::AlphabetKind;
use crate::turn::TurnOrder;

/// Board shape names as they appear in settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BoardType {
    #[default]
    Grid,
    Star,
    Dodecagon,
    RotatedGrid,
    Hexagon,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameSettings {
    pub board_type: BoardType,
    pub board_width: usize,
    /// Defaults to the width. Only grids take a different height.
    pub board_height: Option<usize>,
    /// One-off moves played before the turn cycle starts.
    pub pregame_sequence: String,
    pub turn_cycle: String,
    /// Stones set on the board before play begins.
    pub preset_stones: Vec<Play>,
    pub alphabet: AlphabetKind,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            board_type: BoardType::Grid,
            board_width: 9,
            board_height: None,
            pregame_sequence: String::new(),
            turn_cycle: "B,W".to_string(),
            preset_stones: Vec::new(),
            alphabet: AlphabetKind::Letters,
        }
    }
}

impl GameSettings {
    /// Settings for a board of the given type and size, with the default
    /// two-player cycle.
    pub fn new(board_type: BoardType, size: usize) -> Self {
        Self {
            board_type,
            board_width: size,
            ..Self::default()
        }
    }

    pub fn with_height(mut self, height: usize) -> Self {
        self.board_height = Some(height);
        self
    }

    pub fn with_turn_cycle(mut self, cycle: impl Into<String>) -> Self {
        self.turn_cycle = cycle.into();
        self
    }

    pub fn with_pregame(mut self, sequence: impl Into<String>) -> Self {
        self.pregame_sequence = sequence.into();
        self
    }

    pub fn with_presets(mut self, presets: Vec<Play>) -> Self {
        self.preset_stones = presets;
        self
    }

    pub fn with_alphabet(mut self, alphabet: AlphabetKind) -> Self {
        self.alphabet = alphabet;
        self
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Resolve and validate the board shape.
    pub fn shape(&self) -> Result<Shape> {
        let width = self.board_width;
        let height = self.board_height.unwrap_or(width);

        let shape = match self.board_type {
            BoardType::Grid => Shape::Grid { width, height },
            BoardType::RotatedGrid => Shape::RotatedGrid { width, height },
            BoardType::Star => Shape::Star { radius: width },
            BoardType::Dodecagon => Shape::Dodecagon { radius: width },
            BoardType::Hexagon => Shape::Hexagon { radius: width },
        };

        let rectangular = matches!(shape, Shape::Grid { .. } | Shape::RotatedGrid { .. });
        if !rectangular && height != width {
            return Err(EngineError::UnsupportedDimensions {
                shape: shape.name(),
                width,
                height,
            });
        }

        shape.validate()?;
        Ok(shape)
    }

    /// Parse the turn cycle and pre-game sequence.
    pub fn turn_order(&self) -> Result<TurnOrder> {
        let alphabet = self.alphabet.alphabet();
        let order = alphabet.parse_cycle(&self.turn_cycle)?;
        let pregame = alphabet.parse_cycle(&self.pregame_sequence)?;
        TurnOrder::new(order, pregame)
    }

    /// Seats that must be filled before the game can run, sorted.
    pub fn required_seats(&self) -> Result<Vec<u8>> {
        Ok(self.turn_order()?.seats())
    }
}
