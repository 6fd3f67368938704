//! Prometheus metrics for the raster tile priority queue.
//!
//! This module provides metrics collectors for monitoring tile emission,
//! tree-arbiter decisions, shared-tile dedup, and scheduler heap depth.

use metrics::{counter, gauge, histogram};

use crate::rtpq::WhichTree;

fn tree_label(tree: WhichTree) -> &'static str {
    match tree {
        WhichTree::Active => "active",
        WhichTree::Pending => "pending",
    }
}

/// Record a tile emitted by `RasterScheduler::pop`, tagged with the tree it
/// was drawn from.
pub fn tile_emitted(tree: WhichTree) {
    counter!("rtpq_tiles_emitted_total", "tree" => tree_label(tree)).increment(1);
}

/// Record a shared tile skipped on the "wrong" side by
/// `SkipTilesReturnedByTwin`.
pub fn dedup_skipped(tree: WhichTree) {
    counter!("rtpq_dedup_skipped_total", "tree" => tree_label(tree)).increment(1);
}

/// Set the current number of layer pairs held by a scheduler (heap depth).
pub fn heap_depth(size: usize) {
    gauge!("rtpq_heap_depth").set(size as f64);
}

/// Record a `build`/`rebuild` call, tagged with the policy chosen.
pub fn scheduler_built(policy: &str, pair_count: usize) {
    counter!("rtpq_scheduler_builds_total", "policy" => policy.to_string()).increment(1);
    histogram!("rtpq_scheduler_build_pairs", "policy" => policy.to_string())
        .record(pair_count as f64);
}
