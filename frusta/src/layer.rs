//! Concrete `Tile`/`TilingSetRasterQueue` adapters over a synthetic tile
//! grid, so the RTPQ core can be exercised without a real compositor.
//!
//! Ported out of the old NATS/WebSocket-serving `viewport.rs`: the tile
//! grid geometry (`visible_tiles_for_level`, ideal-level math) is the same,
//! stripped of everything async/wire-format related and extended to
//! produce both trees' `TilePriority` records per tile, since the RTPQ
//! needs both to arbitrate and to dedup shared tiles.

use std::collections::{HashSet, VecDeque};

use crate::rtpq::{
    PriorityBin, Resolution, Tile, TilePriority, TilingSetRasterQueue, TreePriority, WhichTree,
};

const TILE_SIZE: f32 = 512.0;

/// A rectangular view into a layer, in level-0 pixels.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: u32,
    pub height: u32,
    pub zoom: f32,
}

impl Viewport {
    fn safe_zoom(&self) -> f32 {
        self.zoom.max(1e-6)
    }
}

/// Dimensions of the tile grid a layer's trees are rasterized into.
#[derive(Debug, Clone, Copy)]
pub struct GridDesc {
    pub width: u32,
    pub height: u32,
    pub levels: u32,
}

/// A demo/test tile: identity is `(x, y, level)`, carrying the priority
/// record computed from both the active and pending viewports so the
/// arbiter and dedup logic can evaluate either side regardless of which
/// tree's iterator currently holds it.
#[derive(Debug, Clone, Copy)]
pub struct GridTile {
    pub x: u32,
    pub y: u32,
    pub level: u32,
    active: TilePriority,
    pending: TilePriority,
    shared: bool,
}

impl Tile for GridTile {
    type Id = (u32, u32, u32);

    fn id(&self) -> Self::Id {
        (self.x, self.y, self.level)
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

/// FIFO tile iterator over a precomputed, spiral-ish ordered tile list.
pub struct GridTilingSetQueue(VecDeque<GridTile>);

impl TilingSetRasterQueue for GridTilingSetQueue {
    type Item = GridTile;

    fn empty(&self) -> bool {
        self.0.is_empty()
    }

    fn top(&self) -> &GridTile {
        self.0.front().expect("top on empty grid queue")
    }

    fn pop(&mut self) {
        self.0.pop_front();
    }
}

/// Ideal mip level for the current zoom: the lowest (finest) level whose
/// downsample still resolves at least one screen pixel per tile pixel.
/// Mirrors the old `compute_min_level`'s `idealLevel = round(-log2(zoom))`.
fn ideal_level(viewport: &Viewport, levels: u32) -> u32 {
    if levels == 0 {
        return 0;
    }
    let zoom = viewport.safe_zoom();
    let ideal = if zoom >= 1.0 {
        0u32
    } else {
        (-zoom.log2()).max(0.0).round() as u32
    };
    ideal.min(levels - 1)
}

fn resolution_for_level(level: u32, ideal: u32) -> Resolution {
    if level == ideal {
        Resolution::High
    } else if level == ideal + 1 {
        Resolution::Low
    } else {
        Resolution::NonIdeal
    }
}

/// Tile coordinates visible within the viewport at the given level, plus
/// each tile's distance from the viewport center in level-0 pixels.
fn visible_tiles_for_level(
    viewport: &Viewport,
    grid: &GridDesc,
    level: u32,
) -> Vec<(u32, u32, f32)> {
    let downsample = 2f32.powi(level as i32);
    let px_per_tile = downsample * TILE_SIZE;
    let zoom = viewport.safe_zoom();

    let view_x0 = viewport.x / px_per_tile;
    let view_y0 = viewport.y / px_per_tile;
    let view_x1 = (viewport.x + viewport.width as f32 / zoom) / px_per_tile;
    let view_y1 = (viewport.y + viewport.height as f32 / zoom) / px_per_tile;
    let tiles_x = (grid.width as f32 / px_per_tile).ceil().max(0.0);
    let tiles_y = (grid.height as f32 / px_per_tile).ceil().max(0.0);

    let min_tx = view_x0.floor().max(0.0) as u32;
    let min_ty = view_y0.floor().max(0.0) as u32;
    let max_tx = view_x1.ceil().max(0.0).min(tiles_x) as u32;
    let max_ty = view_y1.ceil().max(0.0).min(tiles_y) as u32;

    let center_x = viewport.x + viewport.width as f32 / 2.0;
    let center_y = viewport.y + viewport.height as f32 / 2.0;

    let mut tiles = Vec::new();
    for ty in min_ty..max_ty {
        for tx in min_tx..max_tx {
            let tile_cx = (tx as f32 + 0.5) * px_per_tile;
            let tile_cy = (ty as f32 + 0.5) * px_per_tile;
            let dx = tile_cx - center_x;
            let dy = tile_cy - center_y;
            tiles.push((tx, ty, (dx * dx + dy * dy).sqrt()));
        }
    }
    tiles
}

fn bin_for_distance(distance: f32, viewport_width: u32) -> PriorityBin {
    if distance <= viewport_width as f32 / 2.0 {
        PriorityBin::Now
    } else if distance <= viewport_width as f32 * 1.5 {
        PriorityBin::Soon
    } else {
        PriorityBin::Eventually
    }
}

/// Enumerate every visible `(x, y, level)` across all levels for one tree's
/// viewport, coarsest first (matching the old dispatch-coarse-first order).
fn visible_set(
    viewport: &Viewport,
    grid: &GridDesc,
    dpi: f32,
) -> Vec<(u32, u32, u32, TilePriority)> {
    const BASE_DPI: f32 = 96.0;
    let dpi_scaled = Viewport {
        zoom: viewport.zoom * (dpi / BASE_DPI),
        ..*viewport
    };
    let ideal = ideal_level(&dpi_scaled, grid.levels);

    let mut out = Vec::new();
    for level in (0..grid.levels).rev() {
        let resolution = resolution_for_level(level, ideal);
        for (x, y, dist) in visible_tiles_for_level(viewport, grid, level) {
            let bin = bin_for_distance(dist, viewport.width);
            out.push((x, y, level, TilePriority::new(bin, resolution, dist)));
        }
    }
    out
}

/// Request a single tree's tile iterator (§6, "layer pair provider"): the
/// one knob the core hands back down to the provider is `prioritize_low_res`
/// (set when the build policy is `SmoothnessTakesPriority`), which this
/// adapter honors by enumerating `Resolution::Low` tiles ahead of `High`
/// ones instead of in raw distance order — still a "semi-ordered spiral",
/// just one whose spiral favors coarse tiles first.
fn create_raster_queue(
    viewport: &Viewport,
    grid: &GridDesc,
    dpi: f32,
    prioritize_low_res: bool,
) -> Vec<(u32, u32, u32, TilePriority)> {
    let mut tiles = visible_set(viewport, grid, dpi);
    if prioritize_low_res {
        tiles.sort_by_key(|(_, _, _, p)| match p.resolution {
            Resolution::Low => 0,
            Resolution::High => 1,
            Resolution::NonIdeal => 2,
        });
    }
    tiles
}

/// Build one layer pair's active/pending tile queues from the two trees'
/// current viewports, marking tiles present in both as shared.
///
/// `policy` selects `prioritize_low_res` per §4.3's construction rule
/// (`prioritize_low_res = policy == SmoothnessTakesPriority`) before asking
/// each tree for its iterator.
pub fn build_layer_pair(
    active_viewport: &Viewport,
    pending_viewport: &Viewport,
    grid: &GridDesc,
    dpi: f32,
    policy: TreePriority,
) -> (GridTilingSetQueue, GridTilingSetQueue) {
    let prioritize_low_res = policy == TreePriority::SmoothnessTakesPriority;
    let active_set = create_raster_queue(active_viewport, grid, dpi, prioritize_low_res);
    let pending_set = create_raster_queue(pending_viewport, grid, dpi, prioritize_low_res);

    let active_ids: HashSet<(u32, u32, u32)> =
        active_set.iter().map(|(x, y, l, _)| (*x, *y, *l)).collect();
    let pending_ids: HashSet<(u32, u32, u32)> = pending_set
        .iter()
        .map(|(x, y, l, _)| (*x, *y, *l))
        .collect();

    let pending_priority_of = |x: u32, y: u32, l: u32| -> TilePriority {
        pending_set
            .iter()
            .find(|(px, py, pl, _)| *px == x && *py == y && *pl == l)
            .map(|(_, _, _, p)| *p)
            .unwrap_or(TilePriority::new(PriorityBin::Eventually, Resolution::NonIdeal, f32::MAX))
    };
    let active_priority_of = |x: u32, y: u32, l: u32| -> TilePriority {
        active_set
            .iter()
            .find(|(ax, ay, al, _)| *ax == x && *ay == y && *al == l)
            .map(|(_, _, _, p)| *p)
            .unwrap_or(TilePriority::new(PriorityBin::Eventually, Resolution::NonIdeal, f32::MAX))
    };

    let active_tiles = active_set
        .into_iter()
        .map(|(x, y, level, priority)| GridTile {
            x,
            y,
            level,
            active: priority,
            pending: pending_priority_of(x, y, level),
            shared: pending_ids.contains(&(x, y, level)),
        })
        .collect();

    let pending_tiles = pending_set
        .into_iter()
        .map(|(x, y, level, priority)| GridTile {
            x,
            y,
            level,
            active: active_priority_of(x, y, level),
            pending: priority,
            shared: active_ids.contains(&(x, y, level)),
        })
        .collect();

    (
        GridTilingSetQueue(active_tiles),
        GridTilingSetQueue(pending_tiles),
    )
}
