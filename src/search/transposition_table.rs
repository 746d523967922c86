//! Always-replace transposition table keyed by Zobrist hash.
//!
//! Slots are indexed by `key % len`. A store always overwrites and bumps a
//! collision counter when it evicts a live record. Records carry no board
//! signature beyond the key they were stored under, so two distinct
//! positions may alias one slot; the search sanity-checks a hit (stored
//! side to move, stored move pseudo-legality) before trusting it, matching
//! the original table's probabilistic design.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// `score` is the true value for the stored depth.
    Exact,
    /// Fail high: `score` is a lower bound; probing raises alpha.
    Lower,
    /// Fail low: `score` is an upper bound; probing lowers beta.
    Upper,
}

use crate::game_state::amazons_types::Color;
use crate::moves::move_codec::Move;

#[derive(Debug, Clone, Copy)]
pub struct TableRecord {
    /// Remaining search depth below the node when the record was stored.
    pub depth: i8,
    pub flag: Bound,
    pub score: i32,
    pub best_move: Option<Move>,
    /// Side to move at the stored node. A probe whose node side differs
    /// is treated as a miss.
    pub side: Color,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TableStats {
    pub probes: u64,
    pub hits: u64,
    pub stores: u64,
    pub collisions: u64,
}

#[derive(Debug, Clone)]
pub struct TranspositionTable {
    slots: Vec<Option<TableRecord>>,
    stats: TableStats,
}

impl TranspositionTable {
    /// Allocate a table with a fixed number of slots, sized once per
    /// search session by the caller.
    pub fn new(entries: usize) -> Self {
        TranspositionTable {
            slots: vec![None; entries.max(1)],
            stats: TableStats::default(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[inline]
    pub fn stats(&self) -> TableStats {
        self.stats
    }

    #[inline]
    pub fn collisions(&self) -> u64 {
        self.stats.collisions
    }

    pub fn clear(&mut self) {
        self.slots.fill(None);
        self.stats = TableStats::default();
    }

    #[inline]
    fn index(&self, key: u32) -> usize {
        key as usize % self.slots.len()
    }

    /// Look up the record stored under `key`'s slot. An empty slot is a
    /// miss; a live record is returned as-is and must be sanity-checked by
    /// the caller.
    pub fn probe(&mut self, key: u32) -> Option<TableRecord> {
        self.stats.probes += 1;
        let record = self.slots[self.index(key)];
        if record.is_some() {
            self.stats.hits += 1;
        }
        record
    }

    /// Store unconditionally, counting a collision when a live record is
    /// overwritten.
    pub fn store(&mut self, key: u32, record: TableRecord) {
        self.stats.stores += 1;
        let index = self.index(key);
        if self.slots[index].is_some() {
            self.stats.collisions += 1;
        }
        self.slots[index] = Some(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(depth: i8, score: i32) -> TableRecord {
        TableRecord {
            depth,
            flag: Bound::Exact,
            score,
            best_move: Some(Move::new(Color::White, 0, 5, 0, 4, 0)),
            side: Color::White,
        }
    }

    #[test]
    fn probe_on_empty_slot_misses() {
        let mut table = TranspositionTable::new(128);
        assert!(table.probe(42).is_none());
        assert_eq!(table.stats().probes, 1);
        assert_eq!(table.stats().hits, 0);
    }

    #[test]
    fn store_then_probe_round_trips() {
        let mut table = TranspositionTable::new(128);
        table.store(42, record(3, 17));
        let hit = table.probe(42).expect("record should be present");
        assert_eq!(hit.depth, 3);
        assert_eq!(hit.score, 17);
        assert_eq!(hit.flag, Bound::Exact);
    }

    #[test]
    fn always_replace_counts_collisions() {
        let mut table = TranspositionTable::new(16);
        table.store(5, record(2, 1));
        // Same slot, different key: 5 + 16 aliases to slot 5.
        table.store(21, record(7, 99));
        assert_eq!(table.collisions(), 1);
        // The newer record won unconditionally.
        assert_eq!(table.probe(5).expect("slot is live").score, 99);
    }

    #[test]
    fn clear_resets_slots_and_stats() {
        let mut table = TranspositionTable::new(8);
        table.store(1, record(1, 1));
        table.clear();
        assert!(table.probe(1).is_none());
        assert_eq!(table.stats().stores, 0);
    }
}
