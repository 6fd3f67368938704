//! Async host wrapper around [`RasterTilePriorityQueue`].
//!
//! The core is single-threaded-cooperative by design (§5): all public
//! operations assume one owner thread. `RasterScheduler` is that owner —
//! a `parking_lot::Mutex` serializes access so that, at any instant, exactly
//! one caller holds it, and a `tokio::sync::Notify` lets async workers park
//! when the queue is momentarily empty instead of busy-polling. This is the
//! same shape as `priority_queue.rs`'s `PriorityWorkQueue`, generalized from
//! a single mip-level key to the full paired-tree comparator.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::Notify;

use crate::metrics;
use crate::rtpq::{PairInput, RasterTilePriorityQueue, Tile, TilingSetRasterQueue, TreePriority};

struct Inner<Q: TilingSetRasterQueue> {
    queue: Option<RasterTilePriorityQueue<Q>>,
    closed: bool,
}

/// Shared, cloneable handle to a single raster tile priority queue.
///
/// Unlike `PriorityWorkQueue`, there is no `push`: per the spec's
/// Non-goals, re-prioritization after `Build` is out of scope. A viewport
/// change that changes the pair set calls [`RasterScheduler::rebuild`],
/// which replaces the inner queue wholesale and wakes anyone parked on the
/// stale, now-irrelevant empty state.
#[derive(Clone)]
pub struct RasterScheduler<Q: TilingSetRasterQueue> {
    inner: Arc<Mutex<Inner<Q>>>,
    notify: Arc<Notify>,
}

impl<Q> RasterScheduler<Q>
where
    Q: TilingSetRasterQueue,
    Q::Item: Tile + Clone,
{
    /// `Build(pairs, policy)`.
    pub fn build(pairs: Vec<PairInput<Q>>, policy: TreePriority) -> Self {
        let queue = RasterTilePriorityQueue::build(pairs, policy);
        Self {
            inner: Arc::new(Mutex::new(Inner {
                queue: Some(queue),
                closed: false,
            })),
            notify: Arc::new(Notify::new()),
        }
    }

    /// Replace the inner queue with a fresh `Build`, waking any parked
    /// poppers so they re-observe the new state instead of waiting on the
    /// previous, now-discarded queue forever.
    pub fn rebuild(&self, pairs: Vec<PairInput<Q>>, policy: TreePriority) {
        let queue = RasterTilePriorityQueue::build(pairs, policy);
        {
            let mut inner = self.inner.lock();
            inner.queue = Some(queue);
        }
        self.notify.notify_waiters();
    }

    /// Pop the highest-priority tile, waiting if the queue is momentarily
    /// empty. Returns `None` once the scheduler is closed and drained.
    pub async fn pop(&self) -> Option<Q::Item> {
        loop {
            {
                let mut inner = self.inner.lock();
                if let Some(queue) = inner.queue.as_mut() {
                    if !queue.empty() {
                        let tree = queue.current_tree();
                        let tile = queue.top().clone();
                        queue.pop();
                        metrics::tile_emitted(tree);
                        tracing::debug!(tree = ?tree, "emitted tile from raster scheduler");
                        return Some(tile);
                    }
                }
                if inner.closed {
                    return None;
                }
            }
            self.notify.notified().await;
        }
    }

    /// Close the scheduler, preventing further `pop` waits and waking all
    /// waiters so they can exit.
    pub fn close(&self) {
        let mut inner = self.inner.lock();
        inner.closed = true;
        drop(inner);
        self.notify.notify_waiters();
    }

    /// True if the current queue has no more tiles to emit.
    pub fn is_empty(&self) -> bool {
        self.inner
            .lock()
            .queue
            .as_ref()
            .is_none_or(|q| q.empty())
    }

    /// Current number of layer pairs held, for metrics/health reporting.
    pub fn len(&self) -> usize {
        self.inner.lock().queue.as_ref().map_or(0, |q| q.len())
    }
}
