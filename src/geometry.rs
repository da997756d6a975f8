//! Board geometry builders.
//!
//! Every builder returns a set of points in the board plane laid out so that
//! intended neighbors sit at unit distance. The board graph is then derived
//! from distances alone (see [`Board::new`](crate::board::Board::new)), which
//! lets every lattice share one adjacency rule.

use std::f64::consts::TAU;
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub};

use serde::{Deserialize, Serialize};

use crate::constants::{
    DUPLICATE_TOLERANCE, MAX_BOARD_SIZE, MIN_BOARD_SIZE, MIN_DODECAGON_RADIUS, STARPOINTS_9X9,
    STARPOINTS_19X19,
};
use crate::error::{EngineError, Result};

const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// A point in the board plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Rotate counter-clockwise around the origin.
    pub fn rotate(self, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    pub fn dist_sq(self, other: Self) -> f64 {
        (self.x - other.x).powi(2) + (self.y - other.y).powi(2)
    }
}

impl Add for Point2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point2 {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

/// Output of a geometry builder: node coordinates plus the indices of the
/// nodes drawn as starpoints.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    pub points: Vec<Point2>,
    pub starpoints: Vec<usize>,
}

impl Layout {
    /// A layout with no starpoints.
    pub fn from_points(points: Vec<Point2>) -> Self {
        Self {
            points,
            starpoints: Vec::new(),
        }
    }
}

/// The supported board shapes.
///
/// `Grid` and `RotatedGrid` take independent width and height; the
/// rotationally symmetric shapes take a single radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// Cartesian lattice.
    Grid { width: usize, height: usize },
    /// Five-fold symmetric lattice.
    Star { radius: usize },
    /// Twelve-fold symmetric lattice made of six pairs of spikes.
    Dodecagon { radius: usize },
    /// Square lattice plus its dual, giving interior nodes eight neighbors.
    RotatedGrid { width: usize, height: usize },
    /// Triangular lattice clipped to a hexagon with `radius` nodes per side.
    Hexagon { radius: usize },
}

impl Shape {
    /// Short name used in messages and settings.
    pub fn name(&self) -> &'static str {
        match self {
            Shape::Grid { .. } => "grid",
            Shape::Star { .. } => "star",
            Shape::Dodecagon { .. } => "dodecagon",
            Shape::RotatedGrid { .. } => "rotatedGrid",
            Shape::Hexagon { .. } => "hexagon",
        }
    }

    /// Check the size parameters against the accepted range.
    pub fn validate(&self) -> Result<()> {
        let name = self.name();
        match *self {
            Shape::Grid { width, height } | Shape::RotatedGrid { width, height } => {
                check_size(name, width, MIN_BOARD_SIZE)?;
                check_size(name, height, MIN_BOARD_SIZE)
            }
            Shape::Star { radius } | Shape::Hexagon { radius } => {
                check_size(name, radius, MIN_BOARD_SIZE)
            }
            Shape::Dodecagon { radius } => check_size(name, radius, MIN_DODECAGON_RADIUS),
        }
    }

    /// Build the point layout for this shape.
    pub fn layout(&self) -> Layout {
        let layout = match *self {
            Shape::Grid { width, height } => grid(width, height),
            Shape::Star { radius } => Layout::from_points(star(radius)),
            Shape::Dodecagon { radius } => Layout::from_points(dodecagon(radius)),
            Shape::RotatedGrid { width, height } => {
                Layout::from_points(rotated_grid(width, height))
            }
            Shape::Hexagon { radius } => Layout::from_points(hexagon(radius)),
        };
        dedup(layout)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Shape::Grid { width, height } | Shape::RotatedGrid { width, height } => {
                write!(f, "{} {width}x{height}", self.name())
            }
            Shape::Star { radius } | Shape::Dodecagon { radius } | Shape::Hexagon { radius } => {
                write!(f, "{} {radius}", self.name())
            }
        }
    }
}

fn check_size(shape: &'static str, size: usize, min: usize) -> Result<()> {
    if (min..=MAX_BOARD_SIZE).contains(&size) {
        Ok(())
    } else {
        Err(EngineError::InvalidSize {
            shape,
            size,
            min,
            max: MAX_BOARD_SIZE,
        })
    }
}

/// Cartesian `width` x `height` lattice. Node index is `x * height + y`.
///
/// The classical 9x9 and 19x19 boards get their starpoints.
pub fn grid(width: usize, height: usize) -> Layout {
    let mut points = Vec::with_capacity(width * height);
    for x in 0..width {
        for y in 0..height {
            points.push(Point2::new(x as f64, y as f64));
        }
    }

    let table: &[(usize, usize)] = match (width, height) {
        (9, 9) => &STARPOINTS_9X9,
        (19, 19) => &STARPOINTS_19X19,
        _ => &[],
    };
    let starpoints = table.iter().map(|&(x, y)| x * height + y).collect();

    Layout { points, starpoints }
}

/// Five-fold star lattice. Each sector is spanned by two unit vectors 72
/// degrees apart.
pub fn star(radius: usize) -> Vec<Point2> {
    let mut points = vec![Point2::default()];
    for i in 0..5 {
        let a = Point2::new(0.0, 1.0).rotate(i as f64 * TAU / 5.0);
        let b = a.rotate(TAU / 5.0);
        for j in 1..radius {
            for k in 0..radius {
                points.push(a * j as f64 + b * k as f64);
            }
        }
    }
    points
}

/// One arm of the dodecagon: columns of growing height, alternating a unit
/// step right with a step down-right at 30 degrees.
fn spike(len: usize) -> Vec<Point2> {
    let mut points = Vec::new();
    let mut origin = Point2::default();
    let mut height = 1;
    for i in 0..len {
        for j in 0..height {
            points.push(origin + Point2::new(0.0, j as f64));
        }
        if i % 2 == 1 {
            origin += Point2::new(SQRT_3 / 2.0, -0.5);
            height += 1;
        } else {
            origin += Point2::new(1.0, 0.0);
        }
    }
    points
}

/// Twelve-fold lattice: six long spikes plus six shorter ones rotated by half
/// a sector.
pub fn dodecagon(radius: usize) -> Vec<Point2> {
    let len = 2 * radius.saturating_sub(1);
    let mut points = Vec::new();

    let long_offset = Point2::new(SQRT_3 / 2.0, 0.5);
    for i in 0..6 {
        let angle = TAU / 6.0 * i as f64;
        points.extend(spike(len).into_iter().map(|p| (p + long_offset).rotate(angle)));
    }

    let short_offset = Point2::new(1.0 + SQRT_3 / 2.0, 0.5);
    for i in 0..6 {
        let angle = TAU / 6.0 * (i as f64 + 0.5);
        points.extend(
            spike(len.saturating_sub(1))
                .into_iter()
                .map(|p| (p + short_offset).rotate(angle)),
        );
    }
    points
}

/// Square lattice scaled by sqrt(2) plus the dual lattice at the cell
/// centers. Orthogonal lattice neighbors are no longer adjacent; each node
/// connects diagonally to the dual lattice instead.
pub fn rotated_grid(width: usize, height: usize) -> Vec<Point2> {
    let e1 = Point2::new(std::f64::consts::SQRT_2, 0.0);
    let e2 = Point2::new(0.0, std::f64::consts::SQRT_2);
    let center = (e1 + e2) * 0.5;

    let mut points = Vec::new();
    for x in 0..width {
        for y in 0..height {
            points.push(e1 * x as f64 + e2 * y as f64);
        }
    }
    for x in 0..width.saturating_sub(1) {
        for y in 0..height.saturating_sub(1) {
            points.push(e1 * x as f64 + e2 * y as f64 + center);
        }
    }
    points
}

/// Triangular lattice clipped to a hexagon. `radius` counts nodes along one
/// side, so `hexagon(1)` is a single node.
pub fn hexagon(radius: usize) -> Vec<Point2> {
    let e1 = Point2::new(1.0, 0.0);
    let e2 = Point2::new(0.5, SQRT_3 / 2.0);
    let r = radius.saturating_sub(1) as i64;

    let mut points = Vec::new();
    for q in -r..=r {
        for s in -r..=r {
            if (q + s).abs() <= r {
                points.push(e1 * q as f64 + e2 * s as f64);
            }
        }
    }
    points
}

/// Drop coincident points, keeping the first occurrence and remapping the
/// starpoint indices.
fn dedup(layout: Layout) -> Layout {
    let mut points: Vec<Point2> = Vec::with_capacity(layout.points.len());
    let mut remap = Vec::with_capacity(layout.points.len());

    for p in layout.points {
        match points.iter().position(|q| q.dist_sq(p) < DUPLICATE_TOLERANCE) {
            Some(existing) => remap.push(existing),
            None => {
                remap.push(points.len());
                points.push(p);
            }
        }
    }

    let mut starpoints: Vec<usize> = layout
        .starpoints
        .into_iter()
        .filter_map(|i| remap.get(i).copied())
        .collect();
    starpoints.sort_unstable();
    starpoints.dedup();

    Layout { points, starpoints }
}
