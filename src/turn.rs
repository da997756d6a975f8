//! Turn-order state machine.
//!
//! A [`TurnOrder`] holds the repeating cycle (`order`) and the queue of
//! upcoming moves. The queue starts out holding the pre-game sequence (or a
//! copy of the cycle when there is none) and is refilled from the cycle
//! whenever it runs dry, so the current move is always defined.

use std::collections::{BTreeSet, VecDeque};

use crate::error::{EngineError, Result};
use crate::notation::{Move, Player};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOrder {
    order: Vec<Move>,
    queue: VecDeque<Move>,
    current: Move,
    consumed: usize,
}

impl TurnOrder {
    /// Build a turn order and advance once, so `current()` is the first
    /// move of the game.
    pub fn new(order: Vec<Move>, pregame: Vec<Move>) -> Result<Self> {
        let Some(&first) = order.first() else {
            return Err(EngineError::EmptyCycle);
        };

        let queue: VecDeque<Move> = if pregame.is_empty() {
            order.iter().copied().collect()
        } else {
            pregame.into()
        };

        let mut turns = Self {
            order,
            queue,
            current: first,
            consumed: 0,
        };
        turns.pop();
        Ok(turns)
    }

    /// The move to be made now.
    pub fn current(&self) -> Move {
        self.current
    }

    /// The repeating cycle.
    pub fn order(&self) -> &[Move] {
        &self.order
    }

    /// Moves queued after the current one.
    pub fn queue(&self) -> &VecDeque<Move> {
        &self.queue
    }

    /// How many moves have been consumed since construction.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Move on to the next entry.
    pub fn advance(&mut self) {
        self.consumed += 1;
        self.pop();
    }

    fn pop(&mut self) {
        if self.queue.is_empty() {
            self.refill();
        }
        if let Some(next) = self.queue.pop_front() {
            self.current = next;
        }
        if self.queue.is_empty() {
            self.refill();
        }
    }

    fn refill(&mut self) {
        self.queue.extend(self.order.iter().copied());
    }

    /// Seats that take part in the repeating cycle, sorted.
    pub fn seats(&self) -> Vec<u8> {
        self.order
            .iter()
            .filter_map(|m| match m.player {
                Player::Seat(n) => Some(n),
                Player::Engine => None,
            })
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
