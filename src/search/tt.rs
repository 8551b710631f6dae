//! Transposition table for caching search results.
//!
//! A plain unbounded map from Zobrist hash to the last result computed for
//! that position. Entries are overwritten unconditionally; game trees are
//! bounded and engines are short-lived, so no eviction policy is needed.
//! Each [`crate::search::SearchEngine`] owns its own table; tables are never
//! shared across concurrent searches.

use std::collections::HashMap;

use crate::board::Move;

/// How a stored score relates to the window it was searched with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundType {
    /// Score is the exact value
    Exact,
    /// Score is at least this value (search failed high)
    LowerBound,
    /// Score is at most this value (search failed low)
    UpperBound,
}

impl BoundType {
    /// Classify a finished search result against the window it started with.
    #[must_use]
    pub fn classify(score: i32, original_alpha: i32, original_beta: i32) -> BoundType {
        if score <= original_alpha {
            BoundType::UpperBound
        } else if score >= original_beta {
            BoundType::LowerBound
        } else {
            BoundType::Exact
        }
    }
}

/// One cached search result.
#[derive(Clone, Copy, Debug)]
pub struct TtEntry {
    pub score: i32,
    pub best_move: Option<Move>,
    /// Remaining search depth below the position when the entry was written
    pub depth: u8,
    pub bound: BoundType,
}

/// Unbounded Zobrist-keyed cache of search results.
#[derive(Default)]
pub struct TranspositionTable {
    entries: HashMap<u64, TtEntry>,
}

impl TranspositionTable {
    #[must_use]
    pub fn new() -> Self {
        TranspositionTable {
            entries: HashMap::new(),
        }
    }

    /// Look up the entry for a position hash.
    #[must_use]
    pub fn probe(&self, hash: u64) -> Option<&TtEntry> {
        self.entries.get(&hash)
    }

    /// Store a result, unconditionally replacing any previous entry.
    pub fn store(
        &mut self,
        hash: u64,
        score: i32,
        best_move: Option<Move>,
        depth: u8,
        bound: BoundType,
    ) {
        self.entries.insert(
            hash,
            TtEntry {
                score,
                best_move,
                depth,
                bound,
            },
        );
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry (used between unrelated games).
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Move, Square};

    #[test]
    fn test_store_and_probe() {
        let mut tt = TranspositionTable::new();
        let hash = 0x1234_5678_9ABC_DEF0;
        let mv = Move::normal(Square(6, 4), Square(4, 4));

        tt.store(hash, 42, Some(mv), 3, BoundType::Exact);

        let entry = tt.probe(hash).expect("entry should be present");
        assert_eq!(entry.score, 42);
        assert_eq!(entry.best_move, Some(mv));
        assert_eq!(entry.depth, 3);
        assert_eq!(entry.bound, BoundType::Exact);
    }

    #[test]
    fn test_miss_on_unknown_hash() {
        let mut tt = TranspositionTable::new();
        tt.store(1, 10, None, 1, BoundType::LowerBound);
        assert!(tt.probe(2).is_none());
    }

    #[test]
    fn test_store_overwrites_unconditionally() {
        let mut tt = TranspositionTable::new();
        tt.store(7, 100, None, 5, BoundType::Exact);
        tt.store(7, -3, None, 1, BoundType::UpperBound);

        let entry = tt.probe(7).unwrap();
        assert_eq!(entry.score, -3);
        assert_eq!(entry.depth, 1);
        assert_eq!(tt.len(), 1);
    }

    #[test]
    fn test_bound_classification() {
        assert_eq!(BoundType::classify(5, 10, 20), BoundType::UpperBound);
        assert_eq!(BoundType::classify(25, 10, 20), BoundType::LowerBound);
        assert_eq!(BoundType::classify(15, 10, 20), BoundType::Exact);
        // Window edges count as bounds, not exact values
        assert_eq!(BoundType::classify(10, 10, 20), BoundType::UpperBound);
        assert_eq!(BoundType::classify(20, 10, 20), BoundType::LowerBound);
    }
}
