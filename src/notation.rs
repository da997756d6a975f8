//! Move-cycle notation.
//!
//! A cycle is a comma-separated list of 1 to 3 character tokens:
//!
//! | Token | Meaning                                            |
//! |-------|----------------------------------------------------|
//! | `P`   | player `P` places color `P` on an empty node       |
//! | `PT`  | player `P` places color `T` on an empty node       |
//! | `PFT` | player `P` turns a node of color `F` into color `T` |
//!
//! Characters are resolved through an [`Alphabet`]. The canonical alphabet is
//! [`Alphabet::LETTERS`]:
//!
//! | Char | Player          | Color         |
//! |------|-----------------|---------------|
//! | `X`  | engine (random) | –             |
//! | `E`  | –               | empty         |
//! | `V`  | –               | void/removed  |
//! | `B`  | seat 1          | black (1)     |
//! | `W`  | seat 2          | white (2)     |
//! | `R`  | seat 3          | red (3)       |
//! | `Y`  | seat 4          | yellow (4)    |
//! | `C`  | seat 5          | cyan (5)      |
//!
//! [`Alphabet::DIGITS`] is the numeric alternative: `0` is the engine player
//! and the empty color, `1`–`5` are seats and colors. It has no code for
//! removed nodes. The two alphabets are not compatible; pick one per game.
//!
//! ```
//! use polygo::board::Color;
//! use polygo::notation::{Alphabet, Player};
//!
//! let cycle = Alphabet::LETTERS.parse_cycle("B, W, XEV").unwrap();
//! assert_eq!(cycle[0].player, Player::Seat(1));
//! assert_eq!(cycle[2].to, Color::Removed);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::Color;
use crate::error::{EngineError, Result};

/// Who makes a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Player {
    /// Played automatically by a [`MoveChooser`](crate::chooser::MoveChooser).
    Engine,
    /// A human seat, numbered 1 to 5.
    Seat(u8),
}

impl Player {
    /// 0 for the engine, otherwise the seat number.
    pub fn number(self) -> u8 {
        match self {
            Player::Engine => 0,
            Player::Seat(n) => n,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Engine => f.write_str("engine"),
            Player::Seat(n) => write!(f, "player {n}"),
        }
    }
}

/// One entry of a turn cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub player: Player,
    /// Color the target node must currently hold.
    pub from: Color,
    /// Color placed on the target.
    pub to: Color,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} -> {}", self.player, self.from, self.to)
    }
}

/// Which alphabet a game's notation uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlphabetKind {
    #[default]
    Letters,
    Digits,
}

impl AlphabetKind {
    pub fn alphabet(self) -> &'static Alphabet {
        match self {
            AlphabetKind::Letters => &Alphabet::LETTERS,
            AlphabetKind::Digits => &Alphabet::DIGITS,
        }
    }
}

/// Lookup tables from notation characters to players and colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alphabet {
    players: &'static [(char, Player)],
    colors: &'static [(char, Color)],
}

impl Alphabet {
    /// Letter codes. This is the canonical alphabet.
    pub const LETTERS: Alphabet = Alphabet {
        players: &[
            ('X', Player::Engine),
            ('B', Player::Seat(1)),
            ('W', Player::Seat(2)),
            ('R', Player::Seat(3)),
            ('Y', Player::Seat(4)),
            ('C', Player::Seat(5)),
        ],
        colors: &[
            ('E', Color::Empty),
            ('V', Color::Removed),
            ('B', Color::Black),
            ('W', Color::White),
            ('R', Color::Red),
            ('Y', Color::Yellow),
            ('C', Color::Cyan),
        ],
    };

    /// Digit codes.
    pub const DIGITS: Alphabet = Alphabet {
        players: &[
            ('0', Player::Engine),
            ('1', Player::Seat(1)),
            ('2', Player::Seat(2)),
            ('3', Player::Seat(3)),
            ('4', Player::Seat(4)),
            ('5', Player::Seat(5)),
        ],
        colors: &[
            ('0', Color::Empty),
            ('1', Color::Black),
            ('2', Color::White),
            ('3', Color::Red),
            ('4', Color::Yellow),
            ('5', Color::Cyan),
        ],
    };

    pub fn player(&self, ch: char) -> Option<Player> {
        self.players.iter().find(|(c, _)| *c == ch).map(|&(_, p)| p)
    }

    pub fn color(&self, ch: char) -> Option<Color> {
        self.colors.iter().find(|(c, _)| *c == ch).map(|&(_, col)| col)
    }

    fn player_char(&self, player: Player) -> Option<char> {
        self.players.iter().find(|(_, p)| *p == player).map(|&(c, _)| c)
    }

    fn color_char(&self, color: Color) -> Option<char> {
        self.colors.iter().find(|(_, c)| *c == color).map(|&(ch, _)| ch)
    }

    /// Parse a single token.
    pub fn parse_move(&self, token: &str) -> Result<Move> {
        let chars: Vec<char> = token.chars().collect();
        let player_of = |ch: char| {
            self.player(ch).ok_or_else(|| EngineError::UnknownPlayer {
                token: token.to_string(),
                ch,
            })
        };
        let color_of = |ch: char| {
            self.color(ch).ok_or_else(|| EngineError::UnknownColor {
                token: token.to_string(),
                ch,
            })
        };

        match chars.as_slice() {
            &[p] => Ok(Move {
                player: player_of(p)?,
                from: Color::Empty,
                to: color_of(p)?,
            }),
            &[p, t] => Ok(Move {
                player: player_of(p)?,
                from: Color::Empty,
                to: color_of(t)?,
            }),
            &[p, f, t] => Ok(Move {
                player: player_of(p)?,
                from: color_of(f)?,
                to: color_of(t)?,
            }),
            _ => Err(EngineError::TokenLength {
                token: token.to_string(),
            }),
        }
    }

    /// Parse a comma-separated cycle. Whitespace around tokens and empty
    /// tokens are ignored, so an empty string yields an empty cycle.
    pub fn parse_cycle(&self, text: &str) -> Result<Vec<Move>> {
        text.split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(|t| self.parse_move(t))
            .collect()
    }

    /// Shortest token for a move, or `None` if this alphabet can't express it.
    pub fn format_move(&self, mv: &Move) -> Option<String> {
        let p = self.player_char(mv.player)?;
        let t = self.color_char(mv.to)?;
        if mv.from == Color::Empty {
            if p == t {
                Some(p.to_string())
            } else {
                Some([p, t].iter().collect())
            }
        } else {
            let f = self.color_char(mv.from)?;
            Some([p, f, t].iter().collect())
        }
    }

    /// Render a whole cycle back to notation.
    pub fn format_cycle(&self, moves: &[Move]) -> Option<String> {
        let tokens: Option<Vec<String>> = moves.iter().map(|m| self.format_move(m)).collect();
        tokens.map(|t| t.join(","))
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Alphabet::LETTERS
    }
}
