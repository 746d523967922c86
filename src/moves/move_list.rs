//! Fixed-capacity buffer of packed moves.
//!
//! One list is allocated per search frame (or reused by the caller) and
//! never grows past the theoretical per-side ply bound, so generation stays
//! allocation-free in steady state. Iteration uses an explicit read cursor
//! separate from the write cursor, letting the search walk moves by index
//! while it mutates the board in place.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::game_state::amazons_types::MAX_MOVES_PER_SIDE;
use crate::moves::move_codec::Move;

#[derive(Debug, Clone)]
pub struct MoveList {
    moves: Vec<Move>,
    cursor: usize,
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveList {
    pub fn new() -> Self {
        MoveList {
            moves: Vec::with_capacity(MAX_MOVES_PER_SIDE),
            cursor: 0,
        }
    }

    /// Append a move. Returns `false` when the list is at capacity.
    pub fn push(&mut self, mv: Move) -> bool {
        if self.moves.len() >= MAX_MOVES_PER_SIDE {
            return false;
        }
        self.moves.push(mv);
        true
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Move {
        self.moves[index]
    }

    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves
    }

    /// Clear moves and cursor for reuse without releasing the buffer.
    pub fn reset(&mut self) {
        self.moves.clear();
        self.cursor = 0;
    }

    /// Rewind the read cursor; the next [`MoveList::next_index`] returns 0.
    #[inline]
    pub fn reset_cursor(&mut self) {
        self.cursor = 0;
    }

    #[inline]
    pub fn has_next(&self) -> bool {
        self.cursor < self.moves.len()
    }

    /// Return the current read position and advance the cursor.
    #[inline]
    pub fn next_index(&mut self) -> usize {
        let index = self.cursor;
        self.cursor += 1;
        index
    }

    /// Sort moves descending by a parallel score array, permuting the
    /// prefix of `scores` the same way so score slots keep following their
    /// moves across iterative-deepening rounds.
    pub fn sort_by_scores(&mut self, scores: &mut [i32]) {
        let n = self.moves.len().min(scores.len());
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by_key(|&i| std::cmp::Reverse(scores[i]));

        let sorted_moves: Vec<Move> = order.iter().map(|&i| self.moves[i]).collect();
        let sorted_scores: Vec<i32> = order.iter().map(|&i| scores[i]).collect();
        self.moves[..n].copy_from_slice(&sorted_moves);
        scores[..n].copy_from_slice(&sorted_scores);
    }

    /// Move `mv` in front of the unread portion of the list, if present.
    /// Used to try table/killer moves first without a full sort.
    pub fn promote(&mut self, mv: Move, front: usize) -> bool {
        if front >= self.moves.len() {
            return false;
        }
        if let Some(pos) = self.moves[front..].iter().position(|&m| m == mv) {
            self.moves.swap(front, front + pos);
            return true;
        }
        false
    }

    /// Shuffle the buffered moves uniformly.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.moves.shuffle(rng);
    }
}
