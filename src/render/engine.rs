use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use rayon::prelude::*;

use crate::{
    foundation::color::Color,
    foundation::error::{TileshadeError, TileshadeResult},
    kernel::Kernel,
    render::buffer::PixelBuffer,
    render::tile::{PartitionScheme, Tile, partition},
};

/// Worker count used when none is configured.
pub const DEFAULT_WORKERS: usize = 5;

/// Largest accepted worker count.
pub const MAX_WORKERS: usize = 1024;

/// Shared flag for cooperative cancellation, checked between pixels.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Fresh, un-cancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask every render holding a clone of this token to stop.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// `true` once [`CancelToken::cancel`] has been called.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Render engine configuration.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderOptions {
    /// Number of worker threads; also the strip count for strip partitions.
    pub workers: usize,
    /// Domain decomposition.
    pub partition: PartitionScheme,
    /// Optional cancellation token.
    #[serde(skip)]
    pub cancel: Option<CancelToken>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            partition: PartitionScheme::VerticalStrips,
            cancel: None,
        }
    }
}

impl RenderOptions {
    /// Default options with `workers` threads.
    pub fn with_workers(workers: usize) -> Self {
        Self {
            workers,
            ..Self::default()
        }
    }

    /// Check the configuration without spawning anything.
    pub fn validate(&self) -> TileshadeResult<()> {
        if self.workers == 0 {
            return Err(TileshadeError::validation("render 'workers' must be >= 1"));
        }
        if self.workers > MAX_WORKERS {
            return Err(TileshadeError::validation(format!(
                "render 'workers' must be <= {MAX_WORKERS}, got {}",
                self.workers
            )));
        }
        if let PartitionScheme::Grid { columns, rows } = self.partition
            && (columns == 0 || rows == 0)
        {
            return Err(TileshadeError::validation(
                "grid partition needs at least one column and one row",
            ));
        }
        Ok(())
    }
}

/// Counters and timing for one render call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Non-empty tiles that ran as tasks.
    pub tiles: usize,
    /// Pixels evaluated.
    pub pixels: u64,
    /// Wall-clock time spent inside the render call.
    pub elapsed: Duration,
}

/// Tile-parallel kernel evaluator with its own worker pool.
///
/// `render` takes `&mut self`: one renderer never runs two renders at once. The pool is started
/// by the first render that has pixels to evaluate and reused afterwards.
pub struct Renderer {
    opts: RenderOptions,
    pool: Option<rayon::ThreadPool>,
}

impl Renderer {
    /// Validate `opts`. No threads are spawned yet.
    pub fn new(opts: RenderOptions) -> TileshadeResult<Self> {
        opts.validate()?;
        Ok(Self { opts, pool: None })
    }

    /// Options this renderer was built with.
    pub fn options(&self) -> &RenderOptions {
        &self.opts
    }

    /// Render a `width x height` image with `channels` channels per pixel.
    pub fn render<K: Kernel + ?Sized>(
        &mut self,
        width: u32,
        height: u32,
        channels: usize,
        kernel: &K,
    ) -> TileshadeResult<PixelBuffer> {
        self.render_with_stats(width, height, channels, kernel)
            .map(|(buffer, _)| buffer)
    }

    /// Render and also report [`RenderStats`].
    ///
    /// On a kernel failure the first error observed is returned and the remaining pixels of
    /// every tile are abandoned; the partially written buffer is dropped.
    #[tracing::instrument(
        skip(self, kernel),
        fields(kernel_name = kernel.name(), workers = self.opts.workers)
    )]
    pub fn render_with_stats<K: Kernel + ?Sized>(
        &mut self,
        width: u32,
        height: u32,
        channels: usize,
        kernel: &K,
    ) -> TileshadeResult<(PixelBuffer, RenderStats)> {
        let started = Instant::now();
        if channels == 0 || channels > Color::CHANNELS {
            return Err(TileshadeError::validation(format!(
                "channels must be in 1..={}, got {channels}",
                Color::CHANNELS
            )));
        }

        if width == 0 || height == 0 {
            let buffer = PixelBuffer::allocate(width, height, channels)?;
            return Ok((
                buffer,
                RenderStats {
                    elapsed: started.elapsed(),
                    ..RenderStats::default()
                },
            ));
        }

        let tiles = partition(width, height, self.opts.partition, self.opts.workers)?;
        let mut buffer = PixelBuffer::allocate(width, height, channels)?;
        let targets = split_targets(buffer.as_mut_slice(), width, channels, &tiles)?;
        let tile_count = targets.len();

        let pool = match self.pool.take() {
            Some(pool) => pool,
            None => build_thread_pool(self.opts.workers)?,
        };
        let pool = self.pool.insert(pool);

        let ctx = TileCtx {
            kernel,
            width,
            height,
            channels,
            cancel: self.opts.cancel.as_ref(),
            abort: AtomicBool::new(false),
            cancelled: AtomicBool::new(false),
            failure: Mutex::new(None),
        };
        pool.install(|| {
            targets
                .into_par_iter()
                .with_max_len(1)
                .for_each(|t| render_tile(&ctx, t))
        });

        let TileCtx {
            failure, cancelled, ..
        } = ctx;
        if let Some(err) = failure.into_inner().unwrap_or_else(PoisonError::into_inner) {
            return Err(err);
        }
        if cancelled.into_inner() {
            return Err(TileshadeError::Cancelled);
        }

        let stats = RenderStats {
            tiles: tile_count,
            pixels: u64::from(width) * u64::from(height),
            elapsed: started.elapsed(),
        };
        tracing::debug!(
            tiles = stats.tiles,
            pixels = stats.pixels,
            elapsed_ms = stats.elapsed.as_secs_f64() * 1000.0,
            "render finished"
        );
        Ok((buffer, stats))
    }
}

/// One-shot render with vertical strips on a fresh `workers`-thread pool.
pub fn render<K: Kernel + ?Sized>(
    width: u32,
    height: u32,
    channels: usize,
    kernel: &K,
    workers: usize,
) -> TileshadeResult<PixelBuffer> {
    Renderer::new(RenderOptions::with_workers(workers))?.render(width, height, channels, kernel)
}

/// The rows of one tile, each a mutable slice only this tile can reach.
struct TileTarget<'a> {
    tile: Tile,
    rows: Vec<&'a mut [f32]>,
}

struct TileCtx<'a, K: ?Sized> {
    kernel: &'a K,
    width: u32,
    height: u32,
    channels: usize,
    cancel: Option<&'a CancelToken>,
    /// Set after the first kernel failure.
    abort: AtomicBool,
    /// Set when a tile stopped because of `cancel`.
    cancelled: AtomicBool,
    failure: Mutex<Option<TileshadeError>>,
}

impl<K: ?Sized> TileCtx<'_, K> {
    fn should_stop(&self) -> bool {
        if self.abort.load(Ordering::Relaxed) {
            return true;
        }
        if self.cancel.is_some_and(CancelToken::is_cancelled) {
            self.cancelled.store(true, Ordering::Relaxed);
            return true;
        }
        false
    }

    fn fail(&self, err: TileshadeError) {
        self.abort.store(true, Ordering::Relaxed);
        let mut slot = self.failure.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.is_none() {
            *slot = Some(err);
        }
    }
}

fn render_tile<K: Kernel + ?Sized>(ctx: &TileCtx<'_, K>, target: TileTarget<'_>) {
    let TileTarget { tile, rows } = target;
    for (row, y) in rows.into_iter().zip(tile.y0..tile.y1) {
        for (px, x) in row.chunks_exact_mut(ctx.channels).zip(tile.x0..tile.x1) {
            if ctx.should_stop() {
                return;
            }
            match ctx.kernel.evaluate(x, y, ctx.width, ctx.height) {
                Ok(color) => {
                    let rgba = color.clamped(0.0, 1.0).to_array();
                    px.copy_from_slice(&rgba[..ctx.channels]);
                }
                Err(e) => {
                    ctx.fail(TileshadeError::at_pixel(x, y, e));
                    return;
                }
            }
        }
    }
    tracing::debug!(?tile, "tile done");
}

/// Carve `data` into per-tile row segments.
///
/// Empty tiles are dropped. Overlapping tiles are rejected; the borrow checker would not allow
/// them anyway.
fn split_targets<'a>(
    data: &'a mut [f32],
    width: u32,
    channels: usize,
    tiles: &[Tile],
) -> TileshadeResult<Vec<TileTarget<'a>>> {
    let mut targets: Vec<TileTarget<'a>> = tiles
        .iter()
        .filter(|t| !t.is_empty())
        .map(|&tile| TileTarget {
            tile,
            rows: Vec::with_capacity(tile.height() as usize),
        })
        .collect();

    let mut by_x0: Vec<usize> = (0..targets.len()).collect();
    by_x0.sort_by_key(|&i| targets[i].tile.x0);

    let stride = width as usize * channels;
    for (y, row) in data.chunks_exact_mut(stride).enumerate() {
        let y = y as u32;
        let mut rest: &'a mut [f32] = row;
        let mut cursor = 0u32;
        for &i in &by_x0 {
            let tile = targets[i].tile;
            if y < tile.y0 || y >= tile.y1 {
                continue;
            }
            let gap = tile.x0.checked_sub(cursor).ok_or_else(|| {
                TileshadeError::validation(format!("{tile:?} overlaps a neighbouring tile"))
            })?;
            let (_, tail) = std::mem::take(&mut rest).split_at_mut(gap as usize * channels);
            let (segment, tail) = tail.split_at_mut(tile.width() as usize * channels);
            targets[i].rows.push(segment);
            rest = tail;
            cursor = tile.x1;
        }
    }

    Ok(targets)
}

fn build_thread_pool(workers: usize) -> TileshadeResult<rayon::ThreadPool> {
    if workers == 0 {
        return Err(TileshadeError::validation("render 'workers' must be >= 1"));
    }

    rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("tileshade-worker-{i}"))
        .build()
        .map_err(|e| TileshadeError::allocation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/engine.rs"]
mod tests;
