//! Killer-move bookkeeping.
//!
//! A move that caused a beta cutoff at some depth is likely to cut off
//! sibling nodes at the same depth, so a small number of recent cutoff
//! moves are remembered per depth and tried early during move ordering.

use crate::moves::move_codec::Move;

/// Killer slots kept per depth.
pub const KILLERS_PER_DEPTH: usize = 2;

#[derive(Debug, Clone)]
pub struct KillerTable {
    slots: Vec<[Option<Move>; KILLERS_PER_DEPTH]>,
    /// Round-robin write position per depth.
    cursors: Vec<usize>,
}

impl KillerTable {
    pub fn new(max_depth: usize) -> Self {
        KillerTable {
            slots: vec![[None; KILLERS_PER_DEPTH]; max_depth + 1],
            cursors: vec![0; max_depth + 1],
        }
    }

    /// Remember a cutoff move for `depth`, overwriting the oldest slot.
    pub fn put(&mut self, mv: Move, depth: usize) {
        if depth >= self.slots.len() {
            return;
        }
        let cursor = self.cursors[depth];
        self.slots[depth][cursor] = Some(mv);
        self.cursors[depth] = (cursor + 1) % KILLERS_PER_DEPTH;
    }

    /// Killer candidates for `depth`, most slots first.
    pub fn moves_at(&self, depth: usize) -> [Option<Move>; KILLERS_PER_DEPTH] {
        self.slots.get(depth).copied().unwrap_or([None; KILLERS_PER_DEPTH])
    }

    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = [None; KILLERS_PER_DEPTH];
        }
        self.cursors.fill(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::amazons_types::Color;

    fn mv(n: u8) -> Move {
        Move::new(Color::White, (n % 4) as usize, n % 10, 0, 1, 1)
    }

    #[test]
    fn put_fills_slots_round_robin() {
        let mut killers = KillerTable::new(8);
        killers.put(mv(1), 3);
        killers.put(mv(2), 3);
        assert_eq!(killers.moves_at(3), [Some(mv(1)), Some(mv(2))]);
        // Third insert evicts the oldest.
        killers.put(mv(3), 3);
        assert_eq!(killers.moves_at(3), [Some(mv(3)), Some(mv(2))]);
    }

    #[test]
    fn depths_are_independent_and_bounded() {
        let mut killers = KillerTable::new(4);
        killers.put(mv(1), 0);
        assert_eq!(killers.moves_at(1), [None, None]);
        // Out-of-range depth is ignored rather than panicking.
        killers.put(mv(2), 99);
        assert_eq!(killers.moves_at(99), [None, None]);
    }
}
