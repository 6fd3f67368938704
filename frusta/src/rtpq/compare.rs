//! Strict weak order over [`PairedSetQueue`]s for the outer heap (§4.2).

use super::paired_queue::PairedSetQueue;
use super::tile::{Tile, TilingSetRasterQueue};
use super::types::{PriorityBin, Resolution, TreePriority};

/// `a ≺ b`: is `a` lower priority than `b`?
///
/// Strict weak order, parameterized by the build-time [`TreePriority`].
/// Do not capture mutable state here — it's cheap enough to recompute per
/// heap operation (§9, Comparator state).
pub fn is_lower<Q: TilingSetRasterQueue>(
    policy: TreePriority,
    a: &PairedSetQueue<Q>,
    b: &PairedSetQueue<Q>,
) -> bool {
    // 1. Empty dominance.
    let a_empty = a.empty();
    let b_empty = b.empty();
    match (a_empty, b_empty) {
        (true, true) => return false,
        (true, false) => return true,
        (false, true) => return false,
        (false, false) => {}
    }

    let tile_a = a.top(policy);
    let tile_b = b.top(policy);
    let pa = tile_a.priority_for_tree_priority(policy);
    let pb = tile_b.priority_for_tree_priority(policy);

    // 3. Smoothness pending-NOW override.
    if policy == TreePriority::SmoothnessTakesPriority
        && pa.bin == PriorityBin::Eventually
        && pb.bin == PriorityBin::Eventually
    {
        let a_pending_now = tile_a.priority(super::types::WhichTree::Pending).bin == PriorityBin::Now;
        let b_pending_now = tile_b.priority(super::types::WhichTree::Pending).bin == PriorityBin::Now;
        if a_pending_now != b_pending_now {
            // Exactly one is NOW; that one wins (is not lower).
            return b_pending_now;
        }
        // both or neither: fall through
    }

    // 4. Bin equal, resolution differs.
    if pa.bin == pb.bin && pa.resolution != pb.resolution {
        if pa.resolution == Resolution::NonIdeal {
            return true;
        }
        if pb.resolution == Resolution::NonIdeal {
            return false;
        }
        let low_beats_high = policy == TreePriority::SmoothnessTakesPriority;
        return if low_beats_high {
            pa.resolution == Resolution::High && pb.resolution == Resolution::Low
        } else {
            pa.resolution == Resolution::Low && pb.resolution == Resolution::High
        };
    }

    // 5. Fallback.
    pb.is_higher_priority_than(&pa)
}
