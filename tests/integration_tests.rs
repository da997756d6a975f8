//! Integration tests for polygo
//!
//! Whole-game scenarios driven through settings, the turn cycle and the
//! move log, across every board shape.

use polygo::board::{Board, Color};
use polygo::chooser::{RandomMover, play_engine_turns, self_play};
use polygo::geometry::Shape;
use polygo::moves::{Play, replay, replay_to};
use polygo::notation::{AlphabetKind, Player};
use polygo::position::Position;
use polygo::settings::{BoardType, GameSettings};

// =============================================================================
// Helper functions
// =============================================================================

fn place(index: usize, color: Color) -> Play {
    Play::Place { index, color }
}

fn new_game(settings: &GameSettings) -> Position {
    Position::from_settings(settings).unwrap()
}

fn all_shapes() -> Vec<Shape> {
    vec![
        Shape::Grid {
            width: 9,
            height: 9,
        },
        Shape::Grid {
            width: 7,
            height: 4,
        },
        Shape::Star { radius: 4 },
        Shape::Dodecagon { radius: 3 },
        Shape::RotatedGrid {
            width: 5,
            height: 6,
        },
        Shape::Hexagon { radius: 5 },
    ]
}

/// Surround the white stone at 9x9 center (index 40) with black.
fn surround_center() -> Vec<Play> {
    vec![
        place(31, Color::Black),
        place(40, Color::White),
        place(39, Color::Black),
        place(0, Color::White),
        place(41, Color::Black),
        place(1, Color::White),
        place(49, Color::Black),
    ]
}

// =============================================================================
// Geometry and board construction
// =============================================================================

#[test]
fn test_adjacency_symmetric_for_every_shape() {
    for shape in all_shapes() {
        let board = Board::from_shape(shape).unwrap();
        for node in board.nodes() {
            assert!(!node.neighbors().contains(&node.index), "{shape}: self loop");
            for &n in node.neighbors() {
                assert!(
                    board.neighbors(n).contains(&node.index),
                    "{shape}: {} -> {n} has no reverse edge",
                    node.index
                );
            }
        }
        let degree_sum: usize = board.nodes().iter().map(|n| n.neighbors().len()).sum();
        assert_eq!(degree_sum, 2 * board.edges().len(), "{shape}");
    }
}

#[test]
fn test_known_board_sizes() {
    let cases = [
        (BoardType::Grid, 9, 81, 144),
        (BoardType::Star, 3, 31, 50),
        (BoardType::Dodecagon, 2, 18, 30),
        (BoardType::Hexagon, 3, 19, 42),
    ];
    for (board_type, size, nodes, edges) in cases {
        let pos = new_game(&GameSettings::new(board_type, size));
        assert_eq!(pos.board().len(), nodes, "{board_type:?}");
        assert_eq!(pos.board().edges().len(), edges, "{board_type:?}");
    }
}

#[test]
fn test_node_indices_are_stable() {
    for shape in all_shapes() {
        let a = Board::from_shape(shape).unwrap();
        let b = Board::from_shape(shape).unwrap();
        assert_eq!(a, b);
        for (i, node) in a.nodes().iter().enumerate() {
            assert_eq!(node.index, i);
        }
    }
}

#[test]
fn test_invalid_settings_fail_cleanly() {
    let bad = [
        GameSettings::new(BoardType::Grid, 0),
        GameSettings::new(BoardType::Star, 30),
        GameSettings::new(BoardType::Hexagon, 4).with_height(6),
        GameSettings::default().with_turn_cycle("B,WWWW"),
        GameSettings::default().with_presets(vec![place(81, Color::Black)]),
        GameSettings::default().with_presets(vec![Play::Pass { color: Color::Black }]),
    ];
    for settings in bad {
        assert!(Position::from_settings(&settings).is_err(), "{settings:?}");
    }
}

// =============================================================================
// Captures and suicide
// =============================================================================

#[test]
fn test_single_stone_capture_letters() {
    let pos = replay(&GameSettings::default(), &surround_center()).unwrap();
    assert_eq!(pos.board().color(40), Some(Color::Empty));
    assert_eq!(pos.move_number(), 7);
    assert_eq!(pos.current_move().to, Color::White);
}

#[test]
fn test_single_stone_capture_digits() {
    let settings = GameSettings::default()
        .with_alphabet(AlphabetKind::Digits)
        .with_turn_cycle("101,202");
    let mut pos = new_game(&settings);
    let plays = surround_center();
    let (last, setup) = plays.split_last().unwrap();
    for play in setup {
        assert!(pos.apply(play));
    }
    let Play::Place { index, color } = *last else {
        unreachable!()
    };
    let result = pos.place(index, color);
    assert!(result.legal);
    assert_eq!(result.captured, 1);
    assert!(!result.suicide);
    assert_eq!(pos.board().color(40), Some(Color::Empty));
}

#[test]
fn test_occupied_node_rejected() {
    let mut pos = new_game(&GameSettings::default());
    assert!(pos.place(10, Color::Black).legal);
    let history = pos.history().to_vec();
    let turn = pos.current_move();

    assert!(!pos.place(10, Color::White).legal);
    assert_eq!(pos.history(), history.as_slice());
    assert_eq!(pos.current_move(), turn);
    assert_eq!(pos.board().color(10), Some(Color::Black));
}

#[test]
fn test_capture_takes_precedence_over_suicide() {
    // Corner fight on 9x9 (index = x * 9 + y). White stones at (0,0) and
    // (0,2) are each in atari; black at (0,1) has no empty neighbor but
    // captures both.
    let presets = vec![
        place(0, Color::White),
        place(2, Color::White),
        place(9, Color::Black),
        place(11, Color::Black),
        place(3, Color::Black),
        place(10, Color::White),
    ];
    let settings = GameSettings::default().with_presets(presets);
    let mut pos = new_game(&settings);
    let result = pos.place(1, Color::Black);
    assert!(result.legal);
    assert!(!result.suicide);
    assert_eq!(result.captured, 2);
    assert_eq!(pos.board().color(1), Some(Color::Black));
    assert_eq!(pos.board().color(0), Some(Color::Empty));
    assert_eq!(pos.board().color(2), Some(Color::Empty));
}

#[test]
fn test_suicide_consumes_the_turn() {
    let presets = vec![place(1, Color::Black), place(9, Color::Black)];
    let settings = GameSettings::default().with_presets(presets);
    let mut pos = new_game(&settings);
    pos.pass(Color::Black);

    let result = pos.place(0, Color::White);
    assert!(result.legal);
    assert!(result.suicide);
    assert_eq!(pos.board().color(0), Some(Color::Empty));
    assert_eq!(pos.move_number(), 2);
    assert_eq!(pos.current_move().to, Color::Black);
}

#[test]
fn test_three_color_capture() {
    // Red at the center of a hexagon, surrounded by black and white. The
    // surrounding stones all keep liberties on the outer ring.
    let settings = GameSettings::new(BoardType::Hexagon, 3).with_turn_cycle("B,W,R");
    let mut pos = new_game(&settings);
    let board = pos.board();
    let interior = |i: usize| board.neighbors(i).len() == 6;
    let center = (0..board.len())
        .find(|&i| interior(i) && board.neighbors(i).iter().all(|&n| interior(n)))
        .unwrap();
    let around: Vec<usize> = board.neighbors(center).to_vec();

    pos.pass(Color::Black);
    pos.pass(Color::White);
    assert!(pos.place(center, Color::Red).legal);

    let mut captured = 0;
    for (k, &n) in around.iter().enumerate() {
        let color = if k % 2 == 0 { Color::Black } else { Color::White };
        // keep the cycle in step: whoever's turn it is plays or passes
        while pos.current_move().to != color {
            let to = pos.current_move().to;
            pos.pass(to);
        }
        captured += pos.place(n, color).captured;
    }
    assert_eq!(captured, 1);
    assert_eq!(pos.board().color(center), Some(Color::Empty));
}

// =============================================================================
// Turn cycle, passes and replay
// =============================================================================

#[test]
fn test_pass_changes_no_colors() {
    let mut pos = replay(&GameSettings::default(), &surround_center()[..3]).unwrap();
    let colors = pos.board().colors();
    let n = pos.move_number();
    let before = pos.current_move();

    pos.pass(before.to);
    assert_eq!(pos.board().colors(), colors);
    assert_eq!(pos.move_number(), n + 1);
    assert_ne!(pos.current_move(), before);
    assert_eq!(pos.history().last(), Some(&Play::Pass { color: before.to }));
}

#[test]
fn test_replay_is_idempotent() {
    let settings = GameSettings::new(BoardType::Star, 4).with_turn_cycle("B,W,R");
    let mut live = new_game(&settings);
    let plays = self_play(&mut live, &mut RandomMover::with_seed(11), 60);

    let replayed = replay(&settings, &plays).unwrap();
    assert_eq!(replayed, live);
    assert_eq!(replayed.history(), plays.as_slice());

    let json = serde_json::to_string(&plays).unwrap();
    let reloaded: Vec<Play> = serde_json::from_str(&json).unwrap();
    assert_eq!(replay(&settings, &reloaded).unwrap(), live);
}

#[test]
fn test_replay_ignores_empty_color_entries() {
    let plays: Vec<Play> =
        serde_json::from_str(r#"[{"i":5,"c":0},{"i":6,"c":1},{"i":-1,"c":0}]"#).unwrap();
    let pos = replay(&GameSettings::default(), &plays).unwrap();

    assert_eq!(pos.move_number(), 1);
    assert_eq!(pos.history(), &[place(6, Color::Black)]);
    assert_eq!(pos.current_move().player, Player::Seat(2));
    assert_eq!(pos.board().color(5), Some(Color::Empty));
    assert_eq!(pos.board().color(6), Some(Color::Black));
}

#[test]
fn test_rewind_by_replaying_prefix() {
    let settings = GameSettings::default();
    let plays = surround_center();
    let before_capture = replay_to(&settings, &plays, 6).unwrap();
    assert_eq!(before_capture.board().color(40), Some(Color::White));
    let after = replay_to(&settings, &plays, 7).unwrap();
    assert_eq!(after.board().color(40), Some(Color::Empty));
}

#[test]
fn test_multi_color_cycle() {
    let settings = GameSettings::new(BoardType::Grid, 5).with_turn_cycle("B,W,R,Y,C");
    let mut pos = new_game(&settings);
    let colors = [
        Color::Black,
        Color::White,
        Color::Red,
        Color::Yellow,
        Color::Cyan,
    ];
    for round in 0..2 {
        for (seat, color) in colors.into_iter().enumerate() {
            assert_eq!(pos.current_move().player, Player::Seat(seat as u8 + 1));
            assert!(pos.place(round * 5 + seat, color).legal);
        }
    }
    assert_eq!(pos.board().color_counts().get(&Color::Cyan), Some(&2));
}

#[test]
fn test_pregame_holes_then_cycle() {
    let settings = GameSettings::default()
        .with_pregame("XEV,XEV,XEV")
        .with_turn_cycle("B,W")
        .with_presets(vec![place(40, Color::Black)]);
    let mut pos = new_game(&settings);
    assert_eq!(pos.board().color(40), Some(Color::Black));
    assert_eq!(pos.current_move().player, Player::Engine);

    let plays = play_engine_turns(&mut pos, &mut RandomMover::with_seed(9), 100);
    assert_eq!(plays.len(), 3);
    assert!(plays.iter().all(|p| p.color() == Color::Removed));
    assert_eq!(pos.board().color_counts().get(&Color::Removed), Some(&3));
    assert_eq!(pos.current_move().player, Player::Seat(1));

    // the holes are permanent: nobody can play there
    let hole = plays[0].index().unwrap();
    assert!(!pos.place(hole, Color::Black).legal);

    // and the engine plays replay like any other entry
    assert_eq!(replay(&settings, &plays).unwrap(), pos);
}

#[test]
fn test_required_seats() {
    let settings = GameSettings::default()
        .with_pregame("XEV")
        .with_turn_cycle("B,XR,W");
    assert_eq!(settings.required_seats().unwrap(), vec![1, 2]);
}
