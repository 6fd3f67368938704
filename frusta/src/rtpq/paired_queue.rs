//! One layer pair's two tile iterators, merged and deduplicated (§4.3).

use rustc_hash::FxHashSet;

use super::arbiter::higher_priority_tree;
use super::tile::{Tile, TilingSetRasterQueue};
use super::types::{TreePriority, WhichTree};

/// Wraps up to two [`TilingSetRasterQueue`]s (active, pending) belonging to
/// one logical layer identity, exposing `top`/`pop`/`empty` with shared-tile
/// deduplication baked in.
pub struct PairedSetQueue<Q: TilingSetRasterQueue> {
    active: Option<Q>,
    pending: Option<Q>,
    has_both: bool,
    /// Debug-only: tiles already emitted by this pair, to catch I3
    /// violations (a tile returned twice) as soon as they'd happen.
    #[cfg(debug_assertions)]
    returned: FxHashSet<<Q::Item as Tile>::Id>,
}

impl<Q: TilingSetRasterQueue> PairedSetQueue<Q> {
    /// Construct from up to two iterators, skipping wrong-side shared tiles
    /// immediately so I2 holds from the start.
    pub fn new(active: Option<Q>, pending: Option<Q>, policy: TreePriority) -> Self {
        let has_both = active.is_some() && pending.is_some();
        let mut this = Self {
            active,
            pending,
            has_both,
            #[cfg(debug_assertions)]
            returned: FxHashSet::default(),
        };
        if has_both {
            this.skip_tiles_returned_by_twin(policy);
        }
        this
    }

    pub fn empty(&self) -> bool {
        let active_empty = self.active.as_ref().is_none_or(|q| q.empty());
        let pending_empty = self.pending.as_ref().is_none_or(|q| q.empty());
        active_empty && pending_empty
    }

    fn queue_has_tiles(&self, tree: WhichTree) -> bool {
        match tree {
            WhichTree::Active => self.active.as_ref().is_some_and(|q| !q.empty()),
            WhichTree::Pending => self.pending.as_ref().is_some_and(|q| !q.empty()),
        }
    }

    fn queue(&self, tree: WhichTree) -> &Q {
        match tree {
            WhichTree::Active => self.active.as_ref().expect("active queue missing"),
            WhichTree::Pending => self.pending.as_ref().expect("pending queue missing"),
        }
    }

    fn queue_mut(&mut self, tree: WhichTree) -> &mut Q {
        match tree {
            WhichTree::Active => self.active.as_mut().expect("active queue missing"),
            WhichTree::Pending => self.pending.as_mut().expect("pending queue missing"),
        }
    }

    /// Which tree's top should currently be emitted: the only non-empty one,
    /// or the arbiter's pick when both are non-empty.
    pub fn next_tile_iterator_tree(&self, policy: TreePriority) -> WhichTree {
        let active_has = self.queue_has_tiles(WhichTree::Active);
        let pending_has = self.queue_has_tiles(WhichTree::Pending);
        if active_has && !pending_has {
            return WhichTree::Active;
        }
        if pending_has && !active_has {
            return WhichTree::Pending;
        }
        let active_top = self.active.as_ref().map(|q| q.top());
        let pending_top = self.pending.as_ref().map(|q| q.top());
        higher_priority_tree(policy, active_top, pending_top, None)
    }

    /// Read the top of the currently-selected tree. Precondition: `!self.empty()`.
    pub fn top(&self, policy: TreePriority) -> &Q::Item {
        let tree = self.next_tile_iterator_tree(policy);
        let tile = self.queue(tree).top();
        #[cfg(debug_assertions)]
        debug_assert!(
            !self.returned.contains(&tile.id()),
            "tile returned twice from the same paired queue (I3 violation)"
        );
        tile
    }

    /// Advance the selected tree's iterator, re-skip duplicates, and record
    /// the emitted tile for the I3 debug check.
    pub fn pop(&mut self, policy: TreePriority) {
        let tree = self.next_tile_iterator_tree(policy);
        #[cfg(debug_assertions)]
        {
            let id = self.queue(tree).top().id();
            self.returned.insert(id);
        }
        self.queue_mut(tree).pop();
        if self.has_both {
            self.skip_tiles_returned_by_twin(policy);
        }
        debug_assert!(
            self.empty() || !self.top_is_unsafe(policy),
            "paired queue left in an inconsistent state after pop"
        );
    }

    #[cfg(debug_assertions)]
    fn top_is_unsafe(&self, policy: TreePriority) -> bool {
        let tree = self.next_tile_iterator_tree(policy);
        self.returned.contains(&self.queue(tree).top().id())
    }

    #[cfg(not(debug_assertions))]
    fn top_is_unsafe(&self, _policy: TreePriority) -> bool {
        false
    }

    /// While non-empty, drop shared tiles parked on the "wrong" side: a
    /// shared tile is only accepted when the arbiter says this pair's
    /// current side is its rightful emitter. Resolves the spiral-iterator
    /// ordering quirk where a shared tile can surface on either side first.
    fn skip_tiles_returned_by_twin(&mut self, policy: TreePriority) {
        loop {
            if self.empty() {
                return;
            }
            let ts = self.next_tile_iterator_tree(policy);
            if !self.queue_has_tiles(ts) {
                // The other side is the only one with tiles; nothing to skip.
                return;
            }
            let is_shared = self.queue(ts).top().is_shared();
            if !is_shared {
                return;
            }
            let owner = {
                let tile = self.queue(ts).top();
                higher_priority_tree(policy, None, None, Some(tile))
            };
            if owner == ts {
                return;
            }
            self.queue_mut(ts).pop();
        }
    }
}
