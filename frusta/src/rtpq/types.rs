//! The value types the raster tile priority queue orders tiles by.

use std::cmp::Ordering;

/// Global scheduler policy chosen once when the queue is built.
///
/// Not re-evaluated afterward: re-prioritization after `Build` is out of
/// scope, so this is a plain `Copy` value rather than something swappable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreePriority {
    SmoothnessTakesPriority,
    NewContentTakesPriority,
    SamePriorityForBothTrees,
}

/// Which of a layer pair's two trees a tile or decision belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WhichTree {
    Active,
    Pending,
}

/// Coarse urgency class. Ordered `Now > Soon > Eventually`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PriorityBin {
    Eventually,
    Soon,
    Now,
}

/// Rendering scale class. `NonIdeal` is always the worst choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    High,
    Low,
    NonIdeal,
}

/// `(bin, resolution, distance_to_visible)` with a total order.
///
/// Resolution is deliberately *not* part of [`TilePriority::is_higher_priority_than`]:
/// the comparator (`compare.rs`, step 4) handles resolution explicitly
/// because its ranking flips under [`TreePriority::SmoothnessTakesPriority`].
/// This mirrors an ambiguity in the source `IsHigherPriorityThan` that the
/// spec resolves by pinning resolution comparison to the comparator alone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TilePriority {
    pub bin: PriorityBin,
    pub resolution: Resolution,
    pub distance_to_visible: f32,
}

impl TilePriority {
    pub fn new(bin: PriorityBin, resolution: Resolution, distance_to_visible: f32) -> Self {
        Self {
            bin,
            resolution,
            distance_to_visible,
        }
    }

    /// `x.IsHigherPriorityThan(y)`: higher bin wins; tied bins fall back to
    /// lower distance. Ties (equal bin and distance) are not higher priority.
    pub fn is_higher_priority_than(&self, other: &Self) -> bool {
        match self.bin.cmp(&other.bin) {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => self.distance_to_visible < other.distance_to_visible,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(bin: PriorityBin, dist: f32) -> TilePriority {
        TilePriority::new(bin, Resolution::High, dist)
    }

    #[test]
    fn higher_bin_always_wins() {
        let now = p(PriorityBin::Now, 100.0);
        let soon = p(PriorityBin::Soon, 0.0);
        assert!(now.is_higher_priority_than(&soon));
        assert!(!soon.is_higher_priority_than(&now));
    }

    #[test]
    fn same_bin_falls_back_to_distance() {
        let near = p(PriorityBin::Soon, 1.0);
        let far = p(PriorityBin::Soon, 2.0);
        assert!(near.is_higher_priority_than(&far));
        assert!(!far.is_higher_priority_than(&near));
    }

    #[test]
    fn ties_are_not_higher_priority() {
        let a = p(PriorityBin::Soon, 1.0);
        let b = p(PriorityBin::Soon, 1.0);
        assert!(!a.is_higher_priority_than(&b));
        assert!(!b.is_higher_priority_than(&a));
    }
}
