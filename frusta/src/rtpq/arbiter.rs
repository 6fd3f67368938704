//! Pure decision of which tree a paired queue should currently draw from.

use super::tile::Tile;
use super::types::{PriorityBin, TreePriority, WhichTree};

/// Decide which tree is preferred given each tree's own priority record.
///
/// Shared by both call shapes: comparing two different tiles' tops
/// (`active_priority` from the active top, `pending_priority` from the
/// pending top), and comparing one shared tile's two records against each
/// other.
fn decide(policy: TreePriority, active_priority: PriorityBin, pending_bin_is_now: bool, active_higher: bool) -> WhichTree {
    match policy {
        TreePriority::NewContentTakesPriority => WhichTree::Pending,
        TreePriority::SamePriorityForBothTrees => {
            if active_higher {
                WhichTree::Active
            } else {
                WhichTree::Pending
            }
        }
        TreePriority::SmoothnessTakesPriority => {
            if active_priority == PriorityBin::Eventually && pending_bin_is_now {
                WhichTree::Pending
            } else {
                WhichTree::Active
            }
        }
    }
}

/// `HigherPriorityTree(policy, active_top, pending_top, shared_tile?)`.
///
/// When `shared_tile` is given it short-circuits the lookup: the caller
/// already holds a shared tile and only wants to know which tree would have
/// emitted it, so both tops are ignored and the tile's own two priority
/// records are compared instead.
pub fn higher_priority_tree<T: Tile + ?Sized>(
    policy: TreePriority,
    active_top: Option<&T>,
    pending_top: Option<&T>,
    shared_tile: Option<&T>,
) -> WhichTree {
    use super::types::WhichTree::{Active, Pending};

    if let Some(t) = shared_tile {
        let active_p = t.priority(Active);
        let pending_p = t.priority(Pending);
        return decide(
            policy,
            active_p.bin,
            pending_p.bin == PriorityBin::Now,
            active_p.is_higher_priority_than(&pending_p),
        );
    }

    let active_top = active_top.expect("active_top required when shared_tile is absent");
    let pending_top = pending_top.expect("pending_top required when shared_tile is absent");
    let active_p = active_top.priority(Active);
    let pending_p = pending_top.priority(Pending);
    decide(
        policy,
        active_p.bin,
        pending_p.bin == PriorityBin::Now,
        active_p.is_higher_priority_than(&pending_p),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rtpq::types::{Resolution, TilePriority};

    struct StubTile {
        active: TilePriority,
        pending: TilePriority,
        shared: bool,
    }

    impl Tile for StubTile {
        type Id = usize;

        fn id(&self) -> usize {
            self as *const _ as usize
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

    fn tp(bin: PriorityBin, dist: f32) -> TilePriority {
        TilePriority::new(bin, Resolution::High, dist)
    }

    #[test]
    fn new_content_always_picks_pending() {
        let active = StubTile {
            active: tp(PriorityBin::Now, 0.0),
            pending: tp(PriorityBin::Eventually, 100.0),
            shared: false,
        };
        let pending = StubTile {
            active: tp(PriorityBin::Eventually, 100.0),
            pending: tp(PriorityBin::Eventually, 100.0),
            shared: false,
        };
        assert_eq!(
            higher_priority_tree(
                TreePriority::NewContentTakesPriority,
                Some(&active),
                Some(&pending),
                None
            ),
            WhichTree::Pending
        );
    }

    #[test]
    fn same_priority_ties_go_to_pending() {
        let active = StubTile {
            active: tp(PriorityBin::Soon, 5.0),
            pending: tp(PriorityBin::Soon, 5.0),
            shared: false,
        };
        let pending = StubTile {
            active: tp(PriorityBin::Soon, 5.0),
            pending: tp(PriorityBin::Soon, 5.0),
            shared: false,
        };
        assert_eq!(
            higher_priority_tree(
                TreePriority::SamePriorityForBothTrees,
                Some(&active),
                Some(&pending),
                None
            ),
            WhichTree::Pending
        );
    }

    #[test]
    fn smoothness_promotes_pending_on_activation_blocker() {
        let active = StubTile {
            active: tp(PriorityBin::Eventually, 10.0),
            pending: tp(PriorityBin::Now, 1.0),
            shared: false,
        };
        let pending = StubTile {
            active: tp(PriorityBin::Eventually, 10.0),
            pending: tp(PriorityBin::Now, 1.0),
            shared: false,
        };
        assert_eq!(
            higher_priority_tree(
                TreePriority::SmoothnessTakesPriority,
                Some(&active),
                Some(&pending),
                None
            ),
            WhichTree::Pending
        );
    }

    #[test]
    fn smoothness_otherwise_favors_active() {
        let active = StubTile {
            active: tp(PriorityBin::Soon, 10.0),
            pending: tp(PriorityBin::Eventually, 1.0),
            shared: false,
        };
        let pending = StubTile {
            active: tp(PriorityBin::Soon, 10.0),
            pending: tp(PriorityBin::Eventually, 1.0),
            shared: false,
        };
        assert_eq!(
            higher_priority_tree(
                TreePriority::SmoothnessTakesPriority,
                Some(&active),
                Some(&pending),
                None
            ),
            WhichTree::Active
        );
    }

    #[test]
    fn shared_tile_short_circuit_ignores_tops() {
        let shared = StubTile {
            active: tp(PriorityBin::Now, 1.0),
            pending: tp(PriorityBin::Eventually, 100.0),
            shared: true,
        };
        // Tops passed in would say the opposite; shared_tile wins.
        let misleading_active = StubTile {
            active: tp(PriorityBin::Eventually, 100.0),
            pending: tp(PriorityBin::Now, 1.0),
            shared: false,
        };
        assert_eq!(
            higher_priority_tree(
                TreePriority::SamePriorityForBothTrees,
                Some(&misleading_active),
                Some(&misleading_active),
                Some(&shared),
            ),
            WhichTree::Active
        );
    }
}
