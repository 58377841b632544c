//! Pairwise AABB collision detection.
//!
//! Entity counts are small (tens), so this is a plain O(n²) scan over the
//! active entities. Inactive entities are filtered out before the scan, each
//! unordered pair is tested once and self-pairs are never produced.
//!
//! Pairs come out in scan order: by the first slot, then the second, both in
//! insertion order. When one entity hits several others in the same frame
//! the engine assigns no priority beyond that order; games that care ("first
//! hit wins") decide while walking the pairs.

use crate::entity::Entity;

/// Two colliding slots, with `a < b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollisionPair {
    pub a: usize,
    pub b: usize,
}

impl CollisionPair {
    pub fn involves(&self, slot: usize) -> bool {
        self.a == slot || self.b == slot
    }

    /// The partner of `slot` in this pair, if `slot` is part of it.
    pub fn other(&self, slot: usize) -> Option<usize> {
        if self.a == slot {
            Some(self.b)
        } else if self.b == slot {
            Some(self.a)
        } else {
            None
        }
    }
}

/// Reusable collision scanner.
///
/// Keeps its scratch buffers between frames, so a warm scan over a similar
/// number of entities does not allocate.
#[derive(Debug, Default, Clone)]
pub struct CollisionDetector {
    active: Vec<usize>,
    pairs: Vec<CollisionPair>,
    comparisons: usize,
}

impl CollisionDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find every colliding pair among the active entities of `entities`.
    ///
    /// Slots in the returned pairs index into `entities`.
    pub fn scan<E: Entity>(&mut self, entities: &[E]) -> &[CollisionPair] {
        self.active.clear();
        self.pairs.clear();
        self.comparisons = 0;

        self.active.extend(
            entities
                .iter()
                .enumerate()
                .filter(|(_, e)| e.is_active())
                .map(|(i, _)| i),
        );

        for (n, &a) in self.active.iter().enumerate() {
            for &b in &self.active[n + 1..] {
                self.comparisons += 1;
                if entities[a].check_collision(&entities[b]) {
                    self.pairs.push(CollisionPair { a, b });
                }
            }
        }

        &self.pairs
    }

    /// Pairs found by the last scan.
    pub fn pairs(&self) -> &[CollisionPair] {
        &self.pairs
    }

    /// Pairwise tests performed by the last scan.
    pub fn comparisons(&self) -> usize {
        self.comparisons
    }
}

/// One-off scan without keeping a detector around.
pub fn colliding_pairs<E: Entity>(entities: &[E]) -> Vec<CollisionPair> {
    let mut detector = CollisionDetector::new();
    detector.scan(entities);
    detector.pairs
}
