//! Territory scoring with collaborative dead-stone marking.
//!
//! Scoring works in three steps:
//!
//! 1. [`canonical_index_map`] groups stones into regions: same-color stones
//!    connected through each other and through empty nodes, never crossing a
//!    stone of another color. Each region is keyed by its lowest node index,
//!    so marking a group dead doesn't depend on which stone was clicked.
//! 2. Players mark regions dead or alive in a [`DeadGroups`] map, keyed by
//!    those representatives.
//! 3. [`territory`] assigns every node an owner: living stones own
//!    themselves; empty and dead nodes are flood-filled, and a region bordered
//!    by exactly one living color goes to that color. Anything else is
//!    neutral.
//!
//! [`ScoringSession`] ties the three together and refuses to classify a board
//! whose stones have changed since the session was opened.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::board::{Board, Color};

/// Same-color stones reachable from `stone` through same-color stones and
/// empty nodes. Empty for a non-stone start.
pub fn region_of(board: &Board, stone: usize) -> Vec<usize> {
    let Some(color) = board.color(stone).filter(|c| c.is_stone()) else {
        return Vec::new();
    };

    let mut visited = vec![false; board.len()];
    let mut stack = vec![stone];
    let mut stones = Vec::new();
    visited[stone] = true;

    while let Some(current) = stack.pop() {
        if board.color(current) == Some(color) {
            stones.push(current);
        }
        for &n in board.neighbors(current) {
            if visited[n] {
                continue;
            }
            let c = board.color(n);
            if c == Some(color) || c == Some(Color::Empty) {
                visited[n] = true;
                stack.push(n);
            }
        }
    }
    stones
}

/// Stone index to region representative (the lowest index in the region).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CanonicalMap {
    reps: Vec<Option<usize>>,
}

impl CanonicalMap {
    /// Representative of the region holding `index`; `None` for non-stones.
    pub fn get(&self, index: usize) -> Option<usize> {
        self.reps.get(index).copied().flatten()
    }

    /// Distinct representatives, sorted.
    pub fn representatives(&self) -> BTreeSet<usize> {
        self.reps.iter().flatten().copied().collect()
    }

    /// All stones of the region keyed by `rep`.
    pub fn members(&self, rep: usize) -> Vec<usize> {
        self.iter()
            .filter(|&(_, r)| r == rep)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.reps
            .iter()
            .enumerate()
            .filter_map(|(i, rep)| rep.map(|r| (i, r)))
    }

    pub fn to_map(&self) -> BTreeMap<usize, usize> {
        self.iter().collect()
    }
}

/// Compute the region representative of every stone on the board.
pub fn canonical_index_map(board: &Board) -> CanonicalMap {
    let mut reps: Vec<Option<usize>> = vec![None; board.len()];
    for node in board.nodes() {
        if !node.color.is_stone() || reps[node.index].is_some() {
            continue;
        }
        let region = region_of(board, node.index);
        let rep = region.iter().copied().min().unwrap_or(node.index);
        for stone in region {
            reps[stone] = Some(rep);
        }
    }
    CanonicalMap { reps }
}

/// Dead flags keyed by region representative. Serialized as a JSON object,
/// e.g. `{"12": true, "40": false}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeadGroups(BTreeMap<usize, bool>);

impl DeadGroups {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dead(&self, rep: usize) -> bool {
        self.0.get(&rep).copied().unwrap_or(false)
    }

    pub fn set(&mut self, rep: usize, dead: bool) {
        self.0.insert(rep, dead);
    }

    /// Flip a group's flag and return the new value.
    pub fn toggle(&mut self, rep: usize) -> bool {
        let dead = !self.is_dead(rep);
        self.set(rep, dead);
        dead
    }

    /// Representatives currently marked dead.
    pub fn marked(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().filter(|&(_, &dead)| dead).map(|(&rep, _)| rep)
    }
}

impl FromIterator<(usize, bool)> for DeadGroups {
    fn from_iter<I: IntoIterator<Item = (usize, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Owner of every node. `Color::Empty` means neutral; removed nodes have no
/// entry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Territory {
    owners: Vec<Option<Color>>,
}

impl Territory {
    pub fn owner(&self, index: usize) -> Option<Color> {
        self.owners.get(index).copied().flatten()
    }

    pub fn owners(&self) -> &[Option<Color>] {
        &self.owners
    }

    /// Nodes owned by each color. Neutral nodes are not counted.
    pub fn scores(&self) -> BTreeMap<Color, usize> {
        let mut scores = BTreeMap::new();
        for owner in self.owners.iter().flatten() {
            if owner.is_stone() {
                *scores.entry(*owner).or_insert(0) += 1;
            }
        }
        scores
    }

    pub fn neutral_count(&self) -> usize {
        self.owners
            .iter()
            .filter(|o| **o == Some(Color::Empty))
            .count()
    }
}

/// Assign an owner to every non-removed node.
pub fn territory(board: &Board, dead: &DeadGroups, map: &CanonicalMap) -> Territory {
    let is_living = |index: usize| -> bool {
        board.color(index).is_some_and(Color::is_stone)
            && !map.get(index).is_some_and(|rep| dead.is_dead(rep))
    };

    let mut owners: Vec<Option<Color>> = vec![None; board.len()];
    let mut classified = vec![false; board.len()];

    for node in board.nodes() {
        let start = node.index;
        if classified[start] || node.color == Color::Removed {
            continue;
        }
        if is_living(start) {
            owners[start] = Some(node.color);
            classified[start] = true;
            continue;
        }

        // Flood through empty and dead nodes, noting which living colors
        // touch the region.
        let mut region = vec![start];
        let mut borders = BTreeSet::new();
        let mut stack = vec![start];
        classified[start] = true;

        while let Some(current) = stack.pop() {
            for &n in board.neighbors(current) {
                match board.color(n) {
                    Some(Color::Removed) | None => {}
                    Some(c) if is_living(n) => {
                        borders.insert(c);
                    }
                    Some(_) => {
                        if !classified[n] {
                            classified[n] = true;
                            region.push(n);
                            stack.push(n);
                        }
                    }
                }
            }
        }

        let owner = match borders.len() {
            1 => borders.into_iter().next().unwrap_or(Color::Empty),
            _ => Color::Empty,
        };
        for index in region {
            owners[index] = Some(owner);
        }
    }

    Territory { owners }
}

/// A scoring session over one board state.
///
/// The canonical map is computed once when the session opens and stays
/// bound to the stone colors it was computed from. Once the board changes,
/// every query returns `None` until [`refresh`](Self::refresh) is called.
///
/// Seats accept the current classification with [`accept`](Self::accept).
/// Any change to the dead flags withdraws every acceptance, and the game is
/// over once all required seats have accepted the same classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringSession {
    snapshot: Vec<Color>,
    canonical: CanonicalMap,
    dead: DeadGroups,
    territory: Territory,
    accepted: BTreeSet<u8>,
}

impl ScoringSession {
    /// Open scoring with no groups marked dead.
    pub fn open(board: &Board) -> Self {
        Self::with_dead(board, DeadGroups::new())
    }

    /// Open scoring with previously shared dead flags (e.g. after a reload).
    pub fn with_dead(board: &Board, dead: DeadGroups) -> Self {
        let canonical = canonical_index_map(board);
        let territory = territory(board, &dead, &canonical);
        tracing::debug!(
            regions = canonical.representatives().len(),
            "opened scoring session"
        );
        Self {
            snapshot: board.colors(),
            canonical,
            dead,
            territory,
            accepted: BTreeSet::new(),
        }
    }

    /// Does the board still hold the stones this session was computed from?
    pub fn is_current(&self, board: &Board) -> bool {
        board
            .nodes()
            .iter()
            .map(|n| n.color)
            .eq(self.snapshot.iter().copied())
    }

    pub fn canonical(&self) -> &CanonicalMap {
        &self.canonical
    }

    pub fn dead(&self) -> &DeadGroups {
        &self.dead
    }

    /// Territory for `board`, or `None` if the board has changed.
    pub fn territory(&self, board: &Board) -> Option<&Territory> {
        self.is_current(board).then_some(&self.territory)
    }

    /// Per-color totals for `board`, or `None` if the board has changed.
    pub fn scores(&self, board: &Board) -> Option<BTreeMap<Color, usize>> {
        self.territory(board).map(Territory::scores)
    }

    /// Toggle the group holding the stone at `index`. Returns the group's
    /// new dead flag, or `None` if the node isn't a stone or the board has
    /// changed.
    pub fn toggle(&mut self, board: &Board, index: usize) -> Option<bool> {
        if !self.is_current(board) {
            return None;
        }
        let rep = self.canonical.get(index)?;
        let dead = self.dead.toggle(rep);
        tracing::debug!(rep, dead, "toggled group");
        self.recompute(board);
        Some(dead)
    }

    /// Set a group's flag by representative. Returns false if the board has
    /// changed.
    pub fn set_dead(&mut self, board: &Board, rep: usize, dead: bool) -> bool {
        if !self.is_current(board) {
            return false;
        }
        self.dead.set(rep, dead);
        self.recompute(board);
        true
    }

    /// Replace all dead flags, e.g. with the collaboratively shared copy.
    /// Returns false if the board has changed.
    pub fn replace_dead(&mut self, board: &Board, dead: DeadGroups) -> bool {
        if !self.is_current(board) {
            return false;
        }
        self.dead = dead;
        self.recompute(board);
        true
    }

    /// Rebind the session to the board's current stones, keeping the dead
    /// flags. Acceptances are cleared.
    pub fn refresh(&mut self, board: &Board) {
        self.snapshot = board.colors();
        self.canonical = canonical_index_map(board);
        self.recompute(board);
    }

    /// Record that `seat` accepts the current classification. Returns false
    /// if the board has changed.
    pub fn accept(&mut self, board: &Board, seat: u8) -> bool {
        if !self.is_current(board) {
            return false;
        }
        self.accepted.insert(seat);
        tracing::debug!(seat, "accepted score");
        true
    }

    /// Seats that have accepted, sorted.
    pub fn accepted(&self) -> impl Iterator<Item = u8> + '_ {
        self.accepted.iter().copied()
    }

    /// True once every seat in `required` has accepted.
    pub fn is_finished(&self, required: &[u8]) -> bool {
        required.iter().all(|seat| self.accepted.contains(seat))
    }

    fn recompute(&mut self, board: &Board) {
        self.accepted.clear();
        self.territory = territory(board, &self.dead, &self.canonical);
    }
}
