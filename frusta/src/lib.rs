//! Raster tile priority queue: the scheduling core of a tiled compositor's
//! raster work dispatcher, plus the async host wrapper and demo scaffolding
//! needed to run it standalone. See `SPEC_FULL.md` for the full breakdown.

pub mod args;
pub mod layer;
pub mod metrics;
pub mod rtpq;
pub mod scheduler;

use anyhow::{Context, Result, bail};

use args::DemoArgs;
use layer::{GridDesc, Viewport, build_layer_pair};
use rtpq::{PairInput, Tile, TreePriority};
use scheduler::RasterScheduler;

fn parse_policy(name: &str) -> Result<TreePriority> {
    match name {
        "smoothness" => Ok(TreePriority::SmoothnessTakesPriority),
        "new-content" => Ok(TreePriority::NewContentTakesPriority),
        "same" => Ok(TreePriority::SamePriorityForBothTrees),
        other => bail!("unknown policy {other:?} (expected smoothness, new-content, or same)"),
    }
}

/// Build `args.pairs` synthetic layer pairs spread across a shared grid,
/// each pair's active/pending viewports slightly offset from one another so
/// some tiles come out shared and some don't, then drain the resulting
/// scheduler in priority order, logging every pick.
pub async fn run_demo(args: DemoArgs) -> Result<()> {
    let policy = parse_policy(&args.policy).context("invalid --policy")?;
    let grid = GridDesc {
        width: 8192,
        height: 8192,
        levels: 5,
    };

    let mut pairs = Vec::with_capacity(args.pairs as usize);
    for i in 0..args.pairs {
        let offset = i as f32 * 256.0;
        let active = Viewport {
            x: offset,
            y: 0.0,
            width: 1024,
            height: 768,
            zoom: 1.0,
        };
        let pending = Viewport {
            x: offset + 128.0,
            y: 0.0,
            width: 1024,
            height: 768,
            zoom: 1.0,
        };
        let (active_q, pending_q) =
            build_layer_pair(&active, &pending, &grid, args.dpi, policy);
        pairs.push(PairInput {
            active: Some(active_q),
            pending: Some(pending_q),
        });
    }

    metrics::scheduler_built(&args.policy, pairs.len());
    let scheduler = RasterScheduler::build(pairs, policy);
    metrics::heap_depth(scheduler.len());
    // One-shot demo: no rebuilds will ever arrive, so close immediately and
    // let `pop` return `None` once drained instead of parking forever.
    scheduler.close();

    let mut emitted = 0usize;
    while let Some(tile) = scheduler.pop().await {
        tracing::info!(
            x = tile.x,
            y = tile.y,
            level = tile.level,
            shared = tile.is_shared(),
            "picked tile"
        );
        emitted += 1;
    }
    tracing::info!(emitted, "raster scheduler drained");
    Ok(())
}
