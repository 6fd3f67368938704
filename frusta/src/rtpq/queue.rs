//! The outer heap-of-pairs selection loop (§4.4).

use super::compare::is_lower;
use super::paired_queue::PairedSetQueue;
use super::tile::TilingSetRasterQueue;
use super::types::{TreePriority, WhichTree};

/// One layer pair's active/pending queues, as the constructor needs them.
pub struct PairInput<Q> {
    pub active: Option<Q>,
    pub pending: Option<Q>,
}

/// Owns a set of [`PairedSetQueue`]s arranged as a binary max-heap under
/// [`is_lower`], parameterized by the [`TreePriority`] chosen at `build`.
///
/// Deliberately not built on `std::collections::BinaryHeap`: the comparator
/// needs `policy` as external state rather than baked into `Ord`, so sifting
/// is hand-rolled over a plain `Vec` (§4.4, §9).
pub struct RasterTilePriorityQueue<Q: TilingSetRasterQueue> {
    pairs: Vec<Box<PairedSetQueue<Q>>>,
    policy: TreePriority,
}

impl<Q: TilingSetRasterQueue> RasterTilePriorityQueue<Q> {
    /// `Build(pairs, policy)`: O(n).
    pub fn build(pairs: Vec<PairInput<Q>>, policy: TreePriority) -> Self {
        let pairs = pairs
            .into_iter()
            .map(|p| Box::new(PairedSetQueue::new(p.active, p.pending, policy)))
            .collect();
        let mut this = Self { pairs, policy };
        this.heapify();
        this
    }

    /// `Reset()`: clear all pairs.
    pub fn reset(&mut self) {
        self.pairs.clear();
    }

    /// True iff the sequence is empty or the root pair is empty. The
    /// comparator puts empties lowest, so if the root is empty, all are.
    pub fn empty(&self) -> bool {
        self.pairs.first().is_none_or(|root| root.empty())
    }

    /// `Top()`: O(1). Precondition: `!self.empty()`.
    pub fn top(&self) -> &Q::Item {
        self.pairs[0].top(self.policy)
    }

    /// Which tree the root pair's top tile would come from. Ambient
    /// helper for metrics/logging — not part of the core's public
    /// contract, just a peek at what `pop` is about to do.
    pub fn current_tree(&self) -> WhichTree {
        self.pairs[0].next_tile_iterator_tree(self.policy)
    }

    /// Number of layer pairs currently held (heap depth), for metrics.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// `Pop()`: remove the root, mutate it, reinsert. O(log n) outer work
    /// plus iterator/skip-loop cost. Precondition: `!self.empty()`.
    pub fn pop(&mut self) {
        debug_assert!(!self.empty(), "pop on an empty RasterTilePriorityQueue");
        self.pairs[0].pop(self.policy);
        // The root's key changed; sift it down to restore the heap rather
        // than mutating it in place and hoping the invariant still holds.
        self.sift_down(0);
    }

    fn heapify(&mut self) {
        if self.pairs.len() < 2 {
            return;
        }
        for i in (0..self.pairs.len() / 2).rev() {
            self.sift_down(i);
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let len = self.pairs.len();
        loop {
            let left = 2 * i + 1;
            let right = 2 * i + 2;
            let mut largest = i;
            if left < len && is_lower(self.policy, &self.pairs[largest], &self.pairs[left]) {
                largest = left;
            }
            if right < len && is_lower(self.policy, &self.pairs[largest], &self.pairs[right]) {
                largest = right;
            }
            if largest == i {
                return;
            }
            self.pairs.swap(i, largest);
            i = largest;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rtpq::tile::Tile;
    use crate::rtpq::types::{PriorityBin, Resolution, TilePriority, WhichTree};
    use std::collections::VecDeque;

    #[derive(Clone)]
    struct T {
        id: u32,
        active: TilePriority,
        pending: TilePriority,
        shared: bool,
    }

    impl Tile for T {
        type Id = u32;
        fn id(&self) -> u32 {
            self.id
        }
        fn priority(&self, tree: WhichTree) -> TilePriority {
            match tree {
                WhichTree::Active => self.active,
                WhichTree::Pending => self.pending,
            }
        }
        fn is_shared(&self) -> bool {
            self.shared
        }
    }

    struct VecQueue(VecDeque<T>);
    impl TilingSetRasterQueue for VecQueue {
        type Item = T;
        fn empty(&self) -> bool {
            self.0.is_empty()
        }
        fn top(&self) -> &T {
            self.0.front().unwrap()
        }
        fn pop(&mut self) {
            self.0.pop_front();
        }
    }

    fn tp(bin: PriorityBin, dist: f32) -> TilePriority {
        TilePriority::new(bin, Resolution::High, dist)
    }

    fn solo(id: u32, bin: PriorityBin, dist: f32) -> T {
        T {
            id,
            active: tp(bin, dist),
            pending: tp(bin, dist),
            shared: false,
        }
    }

    fn active_pair(tiles: Vec<T>) -> PairInput<VecQueue> {
        PairInput {
            active: Some(VecQueue(VecDeque::from(tiles))),
            pending: None,
        }
    }

    /// Scenario 1: single pair, active only, three tiles A,B,C in iterator
    /// order, all NOW/HIGH, distances 1,2,3 — pops yield A,B,C then empty.
    #[test]
    fn scenario_single_pair_active_only() {
        let pairs = vec![active_pair(vec![
            solo(1, PriorityBin::Now, 1.0),
            solo(2, PriorityBin::Now, 2.0),
            solo(3, PriorityBin::Now, 3.0),
        ])];
        let mut q = RasterTilePriorityQueue::build(pairs, TreePriority::SamePriorityForBothTrees);
        let mut order = Vec::new();
        while !q.empty() {
            order.push(q.top().id);
            q.pop();
        }
        assert_eq!(order, vec![1, 2, 3]);
    }

    /// Scenario 2: two pairs under SmoothnessTakesPriority. P1 active-top
    /// EVENTUALLY, pending-top NOW; P2 active-top SOON, pending-top
    /// EVENTUALLY. First pop from P1's pending, second from P2's active.
    #[test]
    fn scenario_two_pairs_smoothness() {
        let p1 = PairInput {
            active: Some(VecQueue(VecDeque::from([solo(1, PriorityBin::Eventually, 1.0)]))),
            pending: Some(VecQueue(VecDeque::from([solo(2, PriorityBin::Now, 1.0)]))),
        };
        let p2 = PairInput {
            active: Some(VecQueue(VecDeque::from([solo(3, PriorityBin::Soon, 1.0)]))),
            pending: Some(VecQueue(VecDeque::from([solo(
                4,
                PriorityBin::Eventually,
                1.0,
            )]))),
        };
        let mut q =
            RasterTilePriorityQueue::build(vec![p1, p2], TreePriority::SmoothnessTakesPriority);
        assert_eq!(q.top().id, 2);
        q.pop();
        assert_eq!(q.top().id, 3);
    }

    /// Scenario 6: three pairs, the middle one empty at Build. The pop
    /// sequence must exhaust the other two and never surface the empty one.
    #[test]
    fn scenario_empty_pair_coexistence() {
        let p1 = active_pair(vec![solo(1, PriorityBin::Now, 1.0)]);
        let p2 = PairInput {
            active: None,
            pending: None,
        };
        let p3 = active_pair(vec![solo(3, PriorityBin::Soon, 1.0)]);
        let mut q = RasterTilePriorityQueue::build(
            vec![p1, p2, p3],
            TreePriority::SamePriorityForBothTrees,
        );
        let mut seen = Vec::new();
        while !q.empty() {
            seen.push(q.top().id);
            q.pop();
        }
        seen.sort();
        assert_eq!(seen, vec![1, 3]);
        assert!(q.empty());
    }

    /// Lifecycle: `Reset` empties the queue; a subsequent `Build` starts over.
    #[test]
    fn reset_empties_then_build_starts_over() {
        let pairs = vec![active_pair(vec![
            solo(1, PriorityBin::Now, 1.0),
            solo(2, PriorityBin::Now, 2.0),
        ])];
        let mut q = RasterTilePriorityQueue::build(pairs, TreePriority::SamePriorityForBothTrees);
        assert!(!q.empty());

        q.reset();
        assert!(q.empty());

        let pairs = vec![active_pair(vec![solo(3, PriorityBin::Now, 1.0)])];
        q = RasterTilePriorityQueue::build(pairs, TreePriority::SamePriorityForBothTrees);
        assert!(!q.empty());
        assert_eq!(q.top().id, 3);
        q.pop();
        assert!(q.empty());
    }
}
