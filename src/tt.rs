//! Transposition table: a fixed `2^22`-entry, single-slot-per-index array
//! shared across root-parallel search workers. Grounded on `pleco`'s
//! `tt.rs`/`transposition_table.rs` for the `Entry`/`NodeBound` shape,
//! simplified to the flat `key`/`depth`/`score`/`type` layout spec.md §4.6
//! names rather than pleco's 3-entry clustered table (a pleco-specific
//! optimization with no named counterpart here). Unlike pleco's `Unique`
//! heap pointer and raw `Cluster` transmute, entries are plain atomics:
//! concurrent relaxed reads/writes are tolerated by design (spec.md §4.6,
//! §5 "torn reads are acceptable"), so no unsafe code or locking is needed.

use std::sync::atomic::{AtomicU64, Ordering};

/// Number of slots; a power of two so `key & (SIZE - 1)` is the index.
pub const SIZE: usize = 1 << 22;

const ORDERING: Ordering = Ordering::Relaxed;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
#[repr(u8)]
pub enum Bound {
    Exact = 0,
    Lower = 1,
    Upper = 2,
}

fn pack(score: i32, depth: u16, bound: Bound) -> u64 {
    (score as u32 as u64) | ((depth as u64) << 32) | ((bound as u64) << 48)
}

fn unpack(data: u64) -> (i32, u16, Bound) {
    let score = (data & 0xFFFF_FFFF) as u32 as i32;
    let depth = ((data >> 32) & 0xFFFF) as u16;
    let bound = match (data >> 48) & 0xFF {
        1 => Bound::Lower,
        2 => Bound::Upper,
        _ => Bound::Exact,
    };
    (score, depth, bound)
}

struct Slot {
    key: AtomicU64,
    data: AtomicU64,
}

impl Slot {
    fn empty() -> Slot {
        Slot {
            key: AtomicU64::new(0),
            data: AtomicU64::new(0),
        }
    }
}

/// A lock-free, fixed-size transposition table. `key == 0` is treated as
/// "empty" (the all-zero Zobrist key is astronomically unlikely to occur
/// in practice and is never stored).
pub struct TranspositionTable {
    slots: Vec<Slot>,
    mask: u64,
}

impl TranspositionTable {
    pub fn new() -> TranspositionTable {
        TranspositionTable::with_capacity(SIZE)
    }

    /// Builds a table sized to the next power of two at or above `entries`,
    /// for callers (e.g. `EngineConfig`) that size the table themselves.
    pub fn with_capacity(entries: usize) -> TranspositionTable {
        let size = entries.max(1).next_power_of_two();
        let slots = (0..size).map(|_| Slot::empty()).collect();
        TranspositionTable {
            slots,
            mask: (size - 1) as u64,
        }
    }

    #[inline(always)]
    fn index(&self, key: u64) -> usize {
        (key & self.mask) as usize
    }

    /// Overwrites the slot at `key`'s index iff `depth >= stored_depth`,
    /// regardless of whether the slot currently holds `key`, a colliding
    /// key, or nothing at all.
    pub fn store(&self, key: u64, score: i32, depth: u16, bound: Bound) {
        let idx = self.index(key);
        let slot = &self.slots[idx];
        let (_, stored_depth, _) = unpack(slot.data.load(ORDERING));
        if depth < stored_depth {
            return;
        }
        slot.key.store(key, ORDERING);
        slot.data.store(pack(score, depth, bound), ORDERING);
    }

    /// Returns a usable score iff the stored entry's key matches, its depth
    /// is at least `depth`, and its bound permits an immediate return at
    /// `(alpha, beta)`. Exact: always usable. Lower: usable iff
    /// `stored_score >= beta`. Upper: usable iff `stored_score <= alpha`.
    pub fn probe(&self, key: u64, depth: u16, alpha: i32, beta: i32) -> Option<i32> {
        let idx = self.index(key);
        let slot = &self.slots[idx];
        let stored_key = slot.key.load(ORDERING);
        if stored_key != key {
            return None;
        }
        let (score, stored_depth, bound) = unpack(slot.data.load(ORDERING));
        if stored_depth < depth {
            return None;
        }
        match bound {
            Bound::Exact => Some(score),
            Bound::Lower if score >= beta => Some(score),
            Bound::Upper if score <= alpha => Some(score),
            _ => None,
        }
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        TranspositionTable::new()
    }
}
