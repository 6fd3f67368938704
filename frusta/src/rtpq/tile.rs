//! External interface contracts (§6): what the core requires from a tile
//! and from a tile-producing iterator. Concrete implementations live outside
//! this module — see `crate::layer` for the grid-based demo/test adapters.

use super::types::{TilePriority, TreePriority, WhichTree};

/// A unit of rasterization work with one priority record per tree.
///
/// Implementations are expected to be cheap to clone/share (the scheduler
/// boundary clones `Q::Item` out on every `pop`) since the same tile may be
/// referenced by both trees of a pair.
pub trait Tile {
    /// Stable identity used by the debug-only duplicate-emission check (I3).
    type Id: Eq + std::hash::Hash + Clone;

    fn id(&self) -> Self::Id;

    /// The tile's priority as seen from the given tree.
    fn priority(&self, tree: WhichTree) -> TilePriority;

    /// The tile's priority under a given global policy: `Active` for
    /// `SmoothnessTakesPriority`/`SamePriorityForBothTrees`, `Pending` for
    /// `NewContentTakesPriority`.
    fn priority_for_tree_priority(&self, policy: TreePriority) -> TilePriority {
        self.priority(tree_for_policy(policy))
    }

    /// True when this tile is simultaneously referenced by both trees of its
    /// owning pair (same content, same grid position).
    fn is_shared(&self) -> bool;
}

/// Which tree's priority record `priority_for_tree_priority` reads.
pub fn tree_for_policy(policy: TreePriority) -> WhichTree {
    match policy {
        TreePriority::NewContentTakesPriority => WhichTree::Pending,
        TreePriority::SmoothnessTakesPriority | TreePriority::SamePriorityForBothTrees => {
            WhichTree::Active
        }
    }
}

/// A single tree's tile-producing iterator within one layer.
///
/// Semi-ordered: traversal is "spiral" (outward from the viewport) and does
/// not guarantee shared tiles surface first on either side. The core must
/// not assume otherwise — this is exactly what `SkipTilesReturnedByTwin`
/// exists to paper over.
pub trait TilingSetRasterQueue {
    type Item: Tile;

    fn empty(&self) -> bool;

    /// Precondition: `!self.empty()`.
    fn top(&self) -> &Self::Item;

    /// Precondition: `!self.empty()`. Advances the iterator.
    fn pop(&mut self);
}
