//! Board graph: nodes, adjacency and stone colors.
//!
//! Nodes are created once from a [`Layout`] and never change shape; only
//! their colors mutate. Adjacency is index based: each node keeps the indices
//! of its neighbors in the board's node array.
//!
//! This module also holds the placement primitives (capture, suicide removal)
//! and the chain-liberty search they share. Turn order and history live one
//! level up, in [`Position`](crate::position::Position).

use std::collections::BTreeMap;
use std::fmt;

use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::constants::{ADJACENCY_TOLERANCE, BOUNDS_PADDING};
use crate::error::{EngineError, Result};
use crate::geometry::{Layout, Shape};

/// Color of a node. Encoded on the wire as a small integer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize_repr, Deserialize_repr,
)]
#[repr(i8)]
pub enum Color {
    /// Permanently out of play.
    Removed = -1,
    Empty = 0,
    Black = 1,
    White = 2,
    Red = 3,
    Yellow = 4,
    Cyan = 5,
}

impl Color {
    /// The five stone colors, in numeric order.
    pub const STONES: [Color; 5] = [
        Color::Black,
        Color::White,
        Color::Red,
        Color::Yellow,
        Color::Cyan,
    ];

    /// True for the five playable stone colors.
    pub fn is_stone(self) -> bool {
        !matches!(self, Color::Empty | Color::Removed)
    }

    pub fn to_i8(self) -> i8 {
        self as i8
    }

    pub fn from_i8(value: i8) -> Option<Self> {
        match value {
            -1 => Some(Color::Removed),
            0 => Some(Color::Empty),
            1 => Some(Color::Black),
            2 => Some(Color::White),
            3 => Some(Color::Red),
            4 => Some(Color::Yellow),
            5 => Some(Color::Cyan),
            _ => None,
        }
    }

    /// Stone color for seat number `1..=5`.
    pub fn from_seat(seat: u8) -> Option<Self> {
        Self::from_i8(i8::try_from(seat).ok()?).filter(|c| c.is_stone())
    }

    /// Character used by the text rendering.
    pub fn symbol(self) -> char {
        match self {
            Color::Removed => ' ',
            Color::Empty => '.',
            Color::Black => 'X',
            Color::White => 'O',
            Color::Red => 'R',
            Color::Yellow => 'Y',
            Color::Cyan => 'C',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Color::Removed => "removed",
            Color::Empty => "empty",
            Color::Black => "black",
            Color::White => "white",
            Color::Red => "red",
            Color::Yellow => "yellow",
            Color::Cyan => "cyan",
        };
        f.write_str(name)
    }
}

/// An intersection of the board.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Stable index, assigned at construction.
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub color: Color,
    /// Cosmetic marker, fixed at construction.
    pub is_starpoint: bool,
    neighbors: Vec<usize>,
}

impl Node {
    /// Indices of adjacent nodes.
    pub fn neighbors(&self) -> &[usize] {
        &self.neighbors
    }
}

/// Bounding box of the node coordinates, padded by one unit on each side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Outcome of a placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveResult {
    /// False when the target didn't exist or held the wrong color. Nothing
    /// changed in that case.
    pub legal: bool,
    /// Opposing stones removed by the placement.
    pub captured: usize,
    /// The placed chain had no liberties and was removed.
    pub suicide: bool,
}

impl MoveResult {
    fn illegal() -> Self {
        MoveResult::default()
    }
}

/// A board: the node set, its adjacency, and the current colors.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    nodes: Vec<Node>,
    edges: Vec<(usize, usize)>,
    bounds: Bounds,
}

impl Board {
    /// Build a board from a point layout.
    ///
    /// Two nodes are adjacent iff their squared distance is within
    /// [`ADJACENCY_TOLERANCE`] of 1. Adjacency is found by a pairwise check,
    /// which is fine for the board sizes the builders produce.
    pub fn new(layout: Layout) -> Result<Self> {
        if layout.points.is_empty() {
            return Err(EngineError::EmptyBoard);
        }

        let mut nodes: Vec<Node> = layout
            .points
            .iter()
            .enumerate()
            .map(|(index, p)| Node {
                index,
                x: p.x,
                y: p.y,
                color: Color::Empty,
                is_starpoint: layout.starpoints.contains(&index),
                neighbors: Vec::new(),
            })
            .collect();

        let mut bounds = Bounds {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        };
        for p in &layout.points {
            bounds.min_x = bounds.min_x.min(p.x - BOUNDS_PADDING);
            bounds.min_y = bounds.min_y.min(p.y - BOUNDS_PADDING);
            bounds.max_x = bounds.max_x.max(p.x + BOUNDS_PADDING);
            bounds.max_y = bounds.max_y.max(p.y + BOUNDS_PADDING);
        }

        let mut edges = Vec::new();
        for i in 0..layout.points.len() {
            for j in i + 1..layout.points.len() {
                let dist_sq = layout.points[i].dist_sq(layout.points[j]);
                if (dist_sq - 1.0).abs() < ADJACENCY_TOLERANCE {
                    edges.push((i, j));
                    nodes[i].neighbors.push(j);
                    nodes[j].neighbors.push(i);
                }
            }
        }

        tracing::debug!(nodes = nodes.len(), edges = edges.len(), "built board");
        Ok(Self {
            nodes,
            edges,
            bounds,
        })
    }

    /// Validate a shape and build its board.
    pub fn from_shape(shape: Shape) -> Result<Self> {
        shape.validate()?;
        Self::new(shape.layout())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    pub fn color(&self, index: usize) -> Option<Color> {
        self.nodes.get(index).map(|n| n.color)
    }

    /// Neighbor indices of a node; empty for an unknown index.
    pub fn neighbors(&self, index: usize) -> &[usize] {
        match self.nodes.get(index) {
            Some(node) => &node.neighbors,
            None => &[],
        }
    }

    /// Edge list as `(i, j)` pairs with `i < j`.
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Indices of the starpoint nodes.
    pub fn starpoints(&self) -> Vec<usize> {
        self.nodes
            .iter()
            .filter(|n| n.is_starpoint)
            .map(|n| n.index)
            .collect()
    }

    /// Copy of every node's color, in index order.
    pub fn colors(&self) -> Vec<Color> {
        self.nodes.iter().map(|n| n.color).collect()
    }

    /// Number of nodes holding each color.
    pub fn color_counts(&self) -> BTreeMap<Color, usize> {
        let mut counts = BTreeMap::new();
        for node in &self.nodes {
            *counts.entry(node.color).or_insert(0) += 1;
        }
        counts
    }

    /// Overwrite a node's color without any capture logic. Used for preset
    /// stones applied before play begins.
    pub fn set_color(&mut self, index: usize, color: Color) -> bool {
        match self.nodes.get_mut(index) {
            Some(node) => {
                node.color = color;
                true
            }
            None => false,
        }
    }

    /// Place `color` on a node currently holding `from`, then resolve
    /// captures and suicide.
    ///
    /// Captures are applied before the suicide check, so a placement that
    /// captures anything always keeps its own stone.
    pub fn play(&mut self, index: usize, from: Color, color: Color) -> MoveResult {
        match self.color(index) {
            Some(current) if current == from => {}
            _ => return MoveResult::illegal(),
        }

        self.nodes[index].color = color;
        let captured = self.capture_around(index, color);

        let mut suicide = false;
        if color.is_stone() {
            let own = self.find_chain_if_dead(index);
            if !own.is_empty() {
                tracing::debug!(index, %color, stones = own.len(), "suicide");
                self.clear(&own);
                suicide = true;
            }
        }

        MoveResult {
            legal: true,
            captured,
            suicide,
        }
    }

    /// Remove every opposing chain adjacent to `index` that has no
    /// liberties. Returns the number of stones removed.
    fn capture_around(&mut self, index: usize, color: Color) -> usize {
        let mut to_remove: Vec<usize> = Vec::new();
        for &n in self.neighbors(index) {
            let c = self.nodes[n].color;
            if c.is_stone() && c != color && !to_remove.contains(&n) {
                to_remove.extend(self.find_chain_if_dead(n));
            }
        }
        to_remove.sort_unstable();
        to_remove.dedup();

        if !to_remove.is_empty() {
            tracing::debug!(index, %color, stones = to_remove.len(), "captured");
        }
        self.clear(&to_remove);
        to_remove.len()
    }

    fn clear(&mut self, stones: &[usize]) {
        for &s in stones {
            self.nodes[s].color = Color::Empty;
        }
    }

    /// Chain-liberty search.
    ///
    /// Walks the chain containing `start`. Returns an empty vector as soon as
    /// any Empty neighbor is found (the chain is alive); otherwise returns
    /// every stone of the chain (it is dead). Non-stone starts are alive.
    pub fn find_chain_if_dead(&self, start: usize) -> Vec<usize> {
        let Some(color) = self.color(start).filter(|c| c.is_stone()) else {
            return Vec::new();
        };

        let mut visited = vec![false; self.nodes.len()];
        let mut chain = vec![start];
        let mut stack = vec![start];
        visited[start] = true;

        while let Some(current) = stack.pop() {
            for &n in &self.nodes[current].neighbors {
                if visited[n] {
                    continue;
                }
                match self.nodes[n].color {
                    Color::Empty => return Vec::new(),
                    c if c == color => {
                        visited[n] = true;
                        chain.push(n);
                        stack.push(n);
                    }
                    _ => {}
                }
            }
        }
        chain
    }

    /// Number of distinct Empty nodes adjacent to the chain at `start`.
    pub fn chain_liberties(&self, start: usize) -> usize {
        let Some(color) = self.color(start).filter(|c| c.is_stone()) else {
            return 0;
        };

        let mut visited = vec![false; self.nodes.len()];
        let mut liberty_seen = vec![false; self.nodes.len()];
        let mut stack = vec![start];
        let mut libs = 0;
        visited[start] = true;

        while let Some(current) = stack.pop() {
            for &n in &self.nodes[current].neighbors {
                match self.nodes[n].color {
                    Color::Empty => {
                        if !liberty_seen[n] {
                            liberty_seen[n] = true;
                            libs += 1;
                        }
                    }
                    c if c == color && !visited[n] => {
                        visited[n] = true;
                        stack.push(n);
                    }
                    _ => {}
                }
            }
        }
        libs
    }

    /// Liberties the chain at `index` would have after placing `color` there
    /// and resolving captures. `None` if `color` is not a stone or the node
    /// doesn't exist.
    fn liberties_after(&self, index: usize, color: Color) -> Option<usize> {
        if !color.is_stone() || index >= self.nodes.len() {
            return None;
        }
        let mut scratch = self.clone();
        scratch.nodes[index].color = color;
        scratch.capture_around(index, color);
        Some(scratch.chain_liberties(index))
    }

    /// Would placing `color` at `index` leave the placed chain without
    /// liberties, after captures?
    pub fn is_suicide(&self, index: usize, color: Color) -> bool {
        self.liberties_after(index, color) == Some(0)
    }

    /// Would placing `color` at `index` leave the placed chain with at most
    /// one liberty, after captures?
    pub fn is_self_atari(&self, index: usize, color: Color) -> bool {
        matches!(self.liberties_after(index, color), Some(0 | 1))
    }
}

impl fmt::Display for Board {
    /// Rows of nodes sharing (roughly) the same y, left to right. Exact for
    /// grids, an approximation for the other lattices.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rows: BTreeMap<i64, Vec<&Node>> = BTreeMap::new();
        for node in &self.nodes {
            rows.entry((node.y * 2.0).round() as i64).or_default().push(node);
        }
        for row in rows.values_mut() {
            row.sort_by(|a, b| a.x.total_cmp(&b.x));
            let line: String = row
                .iter()
                .map(|n| match n.color {
                    Color::Empty if n.is_starpoint => '+',
                    c => c.symbol(),
                })
                .flat_map(|c| [c, ' '])
                .collect();
            writeln!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}
