//! The raster tile priority queue core: a merge-and-dedup priority selector
//! that produces the next tile to rasterize across a collection of layer
//! pairs. See `SPEC_FULL.md` §§2-4 for the full component breakdown.
//!
//! This module has no I/O and no async dependency — it is pure scheduling
//! logic over the external traits in [`tile`]. The async host wrapper lives
//! in `crate::scheduler`.

mod arbiter;
mod compare;
mod paired_queue;
mod queue;
mod tile;
mod types;

pub use paired_queue::PairedSetQueue;
pub use queue::{PairInput, RasterTilePriorityQueue};
pub use tile::{Tile, TilingSetRasterQueue};
pub use types::{PriorityBin, Resolution, TilePriority, TreePriority, WhichTree};
