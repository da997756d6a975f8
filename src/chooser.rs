//! Engine-driven move choice.
//!
//! Turn-cycle entries owned by [`Player::Engine`] are played automatically
//! (random pre-game holes, random stones, bot seats). The policy sits behind
//! [`MoveChooser`] so variants can plug in their own.

use crate::moves::Play;
use crate::notation::Player;
use crate::position::Position;

/// Picks a target node for the current move.
pub trait MoveChooser {
    /// Node to play the current move on, or `None` to pass.
    fn choose(&mut self, position: &Position) -> Option<usize>;
}

/// Uniformly random legal move.
///
/// Candidates are nodes holding the current move's `from` color where the
/// placement isn't suicide. With `avoid_self_atari`, moves that leave the
/// placed chain with a single liberty are skipped too, unless nothing else
/// is left.
pub struct RandomMover {
    rng: fastrand::Rng,
    avoid_self_atari: bool,
}

impl Default for RandomMover {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomMover {
    pub fn new() -> Self {
        Self {
            rng: fastrand::Rng::new(),
            avoid_self_atari: false,
        }
    }

    /// Deterministic mover for tests and reproducible self-play.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
            avoid_self_atari: false,
        }
    }

    pub fn avoid_self_atari(mut self, avoid: bool) -> Self {
        self.avoid_self_atari = avoid;
        self
    }

    /// Nodes the current move could be played on.
    pub fn candidates(&self, position: &Position) -> Vec<usize> {
        let to = position.current_move().to;
        let board = position.board();
        let legal: Vec<usize> = position
            .legal_targets()
            .into_iter()
            .filter(|&i| !board.is_suicide(i, to))
            .collect();

        if self.avoid_self_atari && to.is_stone() {
            let safe: Vec<usize> = legal
                .iter()
                .copied()
                .filter(|&i| !board.is_self_atari(i, to))
                .collect();
            if !safe.is_empty() {
                return safe;
            }
        }
        legal
    }
}

impl MoveChooser for RandomMover {
    fn choose(&mut self, position: &Position) -> Option<usize> {
        let candidates = self.candidates(position);
        if candidates.is_empty() {
            return None;
        }
        Some(candidates[self.rng.usize(..candidates.len())])
    }
}

/// Ask `chooser` for one move and apply it. Returns the play made.
pub fn play_chosen(position: &mut Position, chooser: &mut impl MoveChooser) -> Play {
    let to = position.current_move().to;
    if let Some(index) = chooser.choose(position) {
        if position.place(index, to).legal {
            return Play::Place { index, color: to };
        }
        tracing::warn!(index, "chooser picked an illegal target, passing");
    }
    position.pass(to);
    Play::Pass { color: to }
}

/// Play every consecutive engine-owned move, stopping at the first human
/// seat or after `limit` plays. Returns the plays made, for the caller to
/// append to the shared move log.
pub fn play_engine_turns(
    position: &mut Position,
    chooser: &mut impl MoveChooser,
    limit: usize,
) -> Vec<Play> {
    let mut plays = Vec::new();
    while plays.len() < limit && position.current_move().player == Player::Engine {
        let play = play_chosen(position, chooser);
        tracing::debug!(?play, "engine move");
        plays.push(play);
    }
    plays
}

/// Let `chooser` make the next `moves` plays, whoever owns the turn.
pub fn self_play(
    position: &mut Position,
    chooser: &mut impl MoveChooser,
    moves: usize,
) -> Vec<Play> {
    (0..moves).map(|_| play_chosen(position, chooser)).collect()
}

/// True when the current move can't be played anywhere without suicide.
pub fn has_no_moves(position: &Position) -> bool {
    let board = position.board();
    let to = position.current_move().to;
    position
        .legal_targets()
        .into_iter()
        .all(|i| board.is_suicide(i, to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Color;
    use crate::settings::{BoardType, GameSettings};

    fn position(settings: GameSettings) -> Position {
        Position::from_settings(&settings).unwrap()
    }

    #[test]
    fn test_candidates_exclude_suicide() {
        let settings = GameSettings::new(BoardType::Grid, 3).with_presets(vec![
            Play::Place {
                index: 1,
                color: Color::White,
            },
            Play::Place {
                index: 3,
                color: Color::White,
            },
        ]);
        let pos = position(settings);
        let candidates = RandomMover::with_seed(1).candidates(&pos);
        assert!(!candidates.contains(&0));
        assert!(!candidates.contains(&1));
        assert_eq!(candidates.len(), 6);
    }

    #[test]
    fn test_engine_turns_stop_at_human() {
        let settings = GameSettings::default()
            .with_pregame("XEV,XEV,XB")
            .with_turn_cycle("B,W");
        let mut pos = position(settings);
        let mut mover = RandomMover::with_seed(7);
        let plays = play_engine_turns(&mut pos, &mut mover, 100);

        assert_eq!(plays.len(), 3);
        assert_eq!(plays[0].color(), Color::Removed);
        assert_eq!(plays[2].color(), Color::Black);
        assert_eq!(pos.current_move().player, Player::Seat(1));
        assert_eq!(pos.history(), plays.as_slice());
        assert_eq!(pos.board().color_counts().get(&Color::Removed), Some(&2));
    }

    #[test]
    fn test_engine_turns_respect_limit() {
        let settings = GameSettings::default().with_turn_cycle("XB,XW");
        let mut pos = position(settings);
        let plays = play_engine_turns(&mut pos, &mut RandomMover::with_seed(3), 10);
        assert_eq!(plays.len(), 10);
        assert_eq!(pos.move_number(), 10);
    }

    #[test]
    fn test_full_board_passes() {
        let settings = GameSettings::new(BoardType::Grid, 1).with_turn_cycle("XB");
        let mut pos = position(settings);
        let mut mover = RandomMover::with_seed(0);
        // single node: black can't play there (no liberties)
        assert!(has_no_moves(&pos));
        let plays = play_engine_turns(&mut pos, &mut mover, 2);
        assert_eq!(plays, vec![Play::Pass { color: Color::Black }; 2]);
    }

    #[test]
    fn test_has_no_moves_follows_current_move() {
        // 2x1 with white at 1: black at 0 captures, so black has a move.
        let settings = GameSettings::new(BoardType::Grid, 2)
            .with_height(1)
            .with_turn_cycle("B,W")
            .with_presets(vec![Play::Place {
                index: 1,
                color: Color::White,
            }]);
        let mut pos = position(settings);
        assert!(!has_no_moves(&pos));
        // white to play: its only target is suicide
        pos.pass(Color::Black);
        assert!(has_no_moves(&pos));
    }

    #[test]
    fn test_seeded_mover_is_deterministic() {
        let settings = GameSettings::new(BoardType::Hexagon, 4);
        let mut a = position(settings.clone());
        let mut b = position(settings);
        let plays_a = self_play(&mut a, &mut RandomMover::with_seed(42), 30);
        let plays_b = self_play(&mut b, &mut RandomMover::with_seed(42), 30);
        assert_eq!(plays_a, plays_b);
        assert_eq!(a, b);
    }

    #[test]
    fn test_avoid_self_atari() {
        // 3x1 board with black at 0. White at 1 captures it and keeps two
        // liberties; white at 2 is left with one.
        let settings = GameSettings::new(BoardType::Grid, 3)
            .with_height(1)
            .with_turn_cycle("W")
            .with_presets(vec![Play::Place {
                index: 0,
                color: Color::Black,
            }]);
        let pos = position(settings);
        assert_eq!(RandomMover::with_seed(5).candidates(&pos), vec![1, 2]);
        let careful = RandomMover::with_seed(5).avoid_self_atari(true);
        assert_eq!(careful.candidates(&pos), vec![1]);
    }
}
