//! Game position: a board, its turn order and the move history.
//!
//! A position only moves forward. Rewinding is done by replaying the move
//! log from a fresh position (see [`crate::moves`]), which is cheap at these
//! board sizes and keeps the failure model simple.

use crate::board::{Board, Color, MoveResult};
use crate::error::{EngineError, Result};
use crate::moves::Play;
use crate::notation::Move;
use crate::settings::GameSettings;
use crate::turn::TurnOrder;

/// A board together with whose turn it is and what has been played.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    board: Board,
    turns: TurnOrder,
    history: Vec<Play>,
}

impl Position {
    pub fn new(board: Board, turns: TurnOrder) -> Self {
        Self {
            board,
            turns,
            history: Vec::new(),
        }
    }

    /// Build the starting position described by a game's settings: board,
    /// preset stones and turn order. Fails without building anything if any
    /// part of the configuration is malformed.
    pub fn from_settings(settings: &GameSettings) -> Result<Self> {
        let mut board = Board::from_shape(settings.shape()?)?;
        let turns = settings.turn_order()?;

        for preset in &settings.preset_stones {
            let Play::Place { index, color } = *preset else {
                return Err(EngineError::PresetNotPlacement);
            };
            if !board.set_color(index, color) {
                return Err(EngineError::PresetOutOfRange {
                    index,
                    len: board.len(),
                });
            }
        }

        Ok(Self::new(board, turns))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The move expected now.
    pub fn current_move(&self) -> Move {
        self.turns.current()
    }

    pub fn turns(&self) -> &TurnOrder {
        &self.turns
    }

    /// Every play applied so far, in order.
    pub fn history(&self) -> &[Play] {
        &self.history
    }

    /// Number of plays applied so far.
    pub fn move_number(&self) -> usize {
        self.history.len()
    }

    /// Nodes the current move may target: those holding its `from` color.
    pub fn legal_targets(&self) -> Vec<usize> {
        let from = self.current_move().from;
        self.board
            .nodes()
            .iter()
            .filter(|n| n.color == from)
            .map(|n| n.index)
            .collect()
    }

    /// Place `color` on `index`.
    ///
    /// The target must hold the current move's `from` color (normally
    /// Empty); otherwise nothing changes and the result is not legal. Empty
    /// is only placed when the current move calls for it. On success the
    /// turn advances and the play is appended to the history.
    pub fn place(&mut self, index: usize, color: Color) -> MoveResult {
        let Move { from, to, .. } = self.current_move();
        if color == Color::Empty && to != Color::Empty {
            tracing::debug!(index, "rejected empty placement");
            return MoveResult::default();
        }
        let result = self.board.play(index, from, color);
        if !result.legal {
            tracing::debug!(index, %color, %from, "rejected placement");
            return result;
        }

        tracing::trace!(
            n = self.history.len(),
            index,
            %color,
            captured = result.captured,
            "placed"
        );
        self.turns.advance();
        self.history.push(Play::Place { index, color });
        result
    }

    /// Pass: advance the turn and record it, without touching the board.
    pub fn pass(&mut self, color: Color) {
        tracing::trace!(n = self.history.len(), %color, "pass");
        self.turns.advance();
        self.history.push(Play::Pass { color });
    }

    /// Apply one move-log entry. Returns false if a placement was rejected,
    /// or for an Empty-colored pass the current move doesn't call for.
    pub fn apply(&mut self, play: &Play) -> bool {
        match *play {
            Play::Place { index, color } => self.place(index, color).legal,
            Play::Pass { color } => {
                if color == Color::Empty && self.current_move().to != Color::Empty {
                    return false;
                }
                self.pass(color);
                true
            }
        }
    }

    /// Would the current move at `index` be suicide?
    pub fn is_suicide(&self, index: usize) -> bool {
        self.board.is_suicide(index, self.current_move().to)
    }

    /// Would the current move at `index` leave its chain in atari or dead?
    pub fn is_self_atari(&self, index: usize) -> bool {
        self.board.is_self_atari(index, self.current_move().to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Shape;
    use crate::notation::{Alphabet, Player};

    fn position(cycle: &str) -> Position {
        let board = Board::from_shape(Shape::Grid {
            width: 9,
            height: 9,
        })
        .unwrap();
        let order = Alphabet::LETTERS.parse_cycle(cycle).unwrap();
        Position::new(board, TurnOrder::new(order, vec![]).unwrap())
    }

    #[test]
    fn test_new_position() {
        let pos = position("B,W");
        assert_eq!(pos.move_number(), 0);
        assert_eq!(pos.current_move().player, Player::Seat(1));
        assert_eq!(pos.legal_targets().len(), 81);
    }

    #[test]
    fn test_place_advances_turn() {
        let mut pos = position("B,W");
        let result = pos.place(40, Color::Black);
        assert!(result.legal);
        assert_eq!(pos.move_number(), 1);
        assert_eq!(pos.current_move().to, Color::White);
        assert_eq!(pos.history(), &[Play::Place { index: 40, color: Color::Black }]);
        assert_eq!(pos.legal_targets().len(), 80);
    }

    #[test]
    fn test_rejected_place_changes_nothing() {
        let mut pos = position("B,W");
        pos.place(40, Color::Black);
        let before = pos.clone();
        assert!(!pos.place(40, Color::White).legal);
        assert!(!pos.place(500, Color::White).legal);
        assert_eq!(pos, before);
    }

    #[test]
    fn test_pass() {
        let mut pos = position("B,W");
        let colors = pos.board().colors();
        pos.pass(Color::Black);
        assert_eq!(pos.board().colors(), colors);
        assert_eq!(pos.current_move().to, Color::White);
        assert_eq!(pos.history(), &[Play::Pass { color: Color::Black }]);
    }

    #[test]
    fn test_from_targets_follow_cycle() {
        // Player 1 drops a black stone, then turns a black stone red.
        let mut pos = position("B,BBR");
        assert!(pos.place(0, Color::Black).legal);
        assert_eq!(pos.current_move().from, Color::Black);
        assert_eq!(pos.legal_targets(), vec![0]);
        assert!(!pos.place(1, Color::Red).legal);
        assert!(pos.place(0, Color::Red).legal);
        assert_eq!(pos.board().color(0), Some(Color::Red));
    }

    #[test]
    fn test_empty_color_entries_rejected() {
        let mut pos = position("B,W");
        let before = pos.clone();
        assert!(!pos.place(5, Color::Empty).legal);
        assert!(!pos.apply(&Play::Pass { color: Color::Empty }));
        assert_eq!(pos, before);
    }

    #[test]
    fn test_advisory_uses_current_color() {
        let mut pos = position("B,W");
        pos.place(1, Color::Black);
        pos.pass(Color::White);
        pos.place(9, Color::Black);
        // White to play into the corner
        assert!(pos.is_suicide(0));
        assert!(pos.is_self_atari(0));
        assert!(!pos.is_suicide(40));
    }
}
