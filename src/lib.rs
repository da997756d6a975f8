//! Polygo: a rules engine for Go on arbitrary board graphs.
//!
//! Boards are built from a point layout (square grids, five-fold stars,
//! hexagons, dodecagons, rotated grids) and play on the resulting graph, so
//! the same capture and scoring rules work on every shape. Games may have 2
//! to 5 colors, a configurable turn cycle and a pre-game setup sequence.
//!
//! ## Modules
//!
//! - [`geometry`] - Board shapes and their point layouts
//! - [`board`] - Board graph, colors, captures and the liberty search
//! - [`notation`] - Move-cycle notation and its alphabets
//! - [`turn`] - Turn-order state machine
//! - [`position`] - Board plus turn order plus history
//! - [`moves`] - Move-log entries and replay
//! - [`settings`] - Game configuration
//! - [`scoring`] - Regions, dead groups and territory
//! - [`chooser`] - Automatic moves for engine-owned turns
//! - [`constants`] - Tolerances and limits
//! - [`error`] - Configuration errors
//!
//! ## Example
//!
//! ```
//! use polygo::board::Color;
//! use polygo::position::Position;
//! use polygo::scoring::ScoringSession;
//! use polygo::settings::{BoardType, GameSettings};
//!
//! let settings = GameSettings::new(BoardType::Hexagon, 3);
//! let mut pos = Position::from_settings(&settings).unwrap();
//!
//! assert!(pos.place(0, Color::Black).legal);
//! pos.pass(Color::White);
//!
//! let session = ScoringSession::open(pos.board());
//! let scores = session.scores(pos.board()).unwrap();
//! assert_eq!(scores[&Color::Black], pos.board().len());
//! ```

#![deny(unsafe_code)]

pub mod board;
pub mod chooser;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod moves;
pub mod notation;
pub mod position;
pub mod scoring;
pub mod settings;
pub mod turn;

pub use board::{Board, Color, MoveResult};
pub use error::EngineError;
pub use moves::Play;
pub use position::Position;
pub use settings::GameSettings;
