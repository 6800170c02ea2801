//! Render driver.
//!
//! Validates the configuration, cuts the image into work orders and lets a
//! fixed pool of workers drain the queue, one tile at a time.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use raylane_core::World;
use raylane_math::{DefaultLane, LaneF32};
use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::error::{RenderError, Result};
use crate::framebuffer::ImageBuffer;
use crate::kernel::SampleParams;
use crate::queue::{RenderProgress, WorkQueue};
use crate::shading::Shading;
use crate::tile::{generate_tiles, sort_spiral, WorkOrder, DEFAULT_TILE_SIZE};

/// Order in which tiles are handed out.
///
/// Does not change the image, only which parts finish first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileOrder {
    #[default]
    RowMajor,
    /// Center tiles first
    Spiral,
}

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    /// Must be a multiple of the lane width
    pub rays_per_pixel: u32,
    pub max_bounces: u32,
    pub tile_size: u32,
    pub tile_order: TileOrder,
    pub shading: Shading,
    /// Worker count; `None` uses one per available core
    pub threads: Option<usize>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            rays_per_pixel: 32,
            max_bounces: 8,
            tile_size: DEFAULT_TILE_SIZE,
            tile_order: TileOrder::RowMajor,
            shading: Shading::Cosine,
            threads: None,
        }
    }
}

impl RenderConfig {
    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set quality settings.
    pub fn with_quality(mut self, rays_per_pixel: u32, max_bounces: u32) -> Self {
        self.rays_per_pixel = rays_per_pixel;
        self.max_bounces = max_bounces;
        self
    }

    pub fn with_tile_size(mut self, tile_size: u32) -> Self {
        self.tile_size = tile_size;
        self
    }

    pub fn with_tile_order(mut self, tile_order: TileOrder) -> Self {
        self.tile_order = tile_order;
        self
    }

    pub fn with_shading(mut self, shading: Shading) -> Self {
        self.shading = shading;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Check the configuration for lane type `F` before any work starts.
    pub fn validate<F: LaneF32>(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::EmptyImage {
                width: self.width,
                height: self.height,
            });
        }
        if self.rays_per_pixel == 0 || self.rays_per_pixel as usize % F::WIDTH != 0 {
            return Err(RenderError::RaysPerPixel {
                rays: self.rays_per_pixel,
                lane_width: F::WIDTH,
            });
        }
        if self.max_bounces == 0 {
            return Err(RenderError::ZeroBounces);
        }
        if self.tile_size == 0 {
            return Err(RenderError::ZeroTileSize);
        }
        Ok(())
    }

    /// Worker count after resolving `None` to the core count.
    pub fn worker_count(&self) -> usize {
        self.threads
            .unwrap_or_else(|| std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1))
            .max(1)
    }

    fn sample_params(&self) -> SampleParams {
        SampleParams {
            rays_per_pixel: self.rays_per_pixel,
            max_bounces: self.max_bounces,
            shading: self.shading,
        }
    }
}

/// Runs render workers on threads.
pub trait WorkerPool {
    /// Number of workers that can run at once.
    fn available_parallelism(&self) -> usize;

    /// Run `worker(i)` for every `i` in `0..workers` and wait for all of them.
    fn run(&self, workers: usize, worker: &(dyn Fn(usize) + Sync));
}

/// [`WorkerPool`] backed by a dedicated rayon thread pool.
pub struct RayonPool {
    pool: rayon::ThreadPool,
}

impl RayonPool {
    /// Build a pool with `threads` threads.
    pub fn new(threads: usize) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("raylane-worker-{i}"))
            .build()?;
        Ok(Self { pool })
    }
}

impl WorkerPool for RayonPool {
    fn available_parallelism(&self) -> usize {
        self.pool.current_num_threads()
    }

    fn run(&self, workers: usize, worker: &(dyn Fn(usize) + Sync)) {
        self.pool.scope(|scope| {
            for index in 0..workers {
                scope.spawn(move |_| worker(index));
            }
        });
    }
}

/// Flag that stops a render between tiles.
#[derive(Debug, Default)]
pub struct CancelToken {
    cancelled: AtomicBool,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Receives a progress snapshot after every finished tile.
///
/// Called from the worker threads while the render runs, so it must be
/// cheap and thread-safe. Any `Fn(RenderProgress) + Sync` closure works.
pub trait ProgressReporter: Sync {
    fn report(&self, progress: RenderProgress);
}

impl<T: Fn(RenderProgress) + Sync> ProgressReporter for T {
    fn report(&self, progress: RenderProgress) {
        self(progress)
    }
}

/// Finished render.
#[derive(Debug, Clone)]
pub struct RenderOutput {
    pub image: ImageBuffer,
    pub total_bounces: u64,
    pub tiles: u64,
    pub elapsed: Duration,
}

impl RenderOutput {
    /// Bounces traced per millisecond of wall time.
    pub fn bounces_per_ms(&self) -> f64 {
        let ms = self.elapsed.as_secs_f64() * 1000.0;
        if ms > 0.0 {
            self.total_bounces as f64 / ms
        } else {
            0.0
        }
    }
}

/// Render with the build's default lane width on a fresh rayon pool.
pub fn render(world: &World, camera: &Camera, config: &RenderConfig) -> Result<RenderOutput> {
    render_with_lanes::<DefaultLane>(world, camera, config)
}

/// Render with lane type `F` on a fresh rayon pool.
pub fn render_with_lanes<F: LaneF32>(world: &World, camera: &Camera, config: &RenderConfig) -> Result<RenderOutput> {
    config.validate::<F>()?;
    let pool = RayonPool::new(config.worker_count())?;
    render_with::<F>(world, camera, config, &pool, None, None)
}

/// Render with lane type `F` on `pool`, one worker per pool thread.
///
/// With a `cancel` token, workers stop claiming tiles once it is set and
/// the render fails with [`RenderError::Cancelled`]. A `reporter` sees the
/// queue's progress after each tile.
pub fn render_with<F: LaneF32>(
    world: &World,
    camera: &Camera,
    config: &RenderConfig,
    pool: &dyn WorkerPool,
    cancel: Option<&CancelToken>,
    reporter: Option<&dyn ProgressReporter>,
) -> Result<RenderOutput> {
    config.validate::<F>()?;
    let film = camera.film(config.width, config.height)?;

    let mut tiles = generate_tiles(config.width, config.height, config.tile_size);
    if config.tile_order == TileOrder::Spiral {
        sort_spiral(&mut tiles, config.width, config.height);
    }
    let orders: Vec<WorkOrder<F>> = tiles.into_iter().map(WorkOrder::new).collect();
    let queue = WorkQueue::new(world, film, config.sample_params(), orders);

    let workers = pool.available_parallelism().max(1);
    log::info!(
        "Rendering {}x{} @ {} rays/px, {} bounces: {} tiles, {} workers, {} lanes",
        config.width,
        config.height,
        config.rays_per_pixel,
        config.max_bounces,
        queue.tile_count(),
        workers,
        F::WIDTH
    );

    let start = Instant::now();
    pool.run(workers, &|worker: usize| {
        let mut tiles = 0;
        while !cancel.is_some_and(CancelToken::is_cancelled) && queue.render_next_tile() {
            tiles += 1;
            if let Some(reporter) = reporter {
                reporter.report(queue.progress());
            }
        }
        log::debug!("Worker {worker} finished after {tiles} tiles");
    });
    let elapsed = start.elapsed();

    let progress = queue.progress();
    if !progress.is_complete() {
        log::warn!("Render cancelled at {:.0}%", progress.fraction() * 100.0);
        return Err(RenderError::Cancelled {
            tiles_done: progress.tiles_done,
            tile_count: progress.tile_count,
        });
    }

    let output = RenderOutput {
        image: queue.into_image(),
        total_bounces: progress.total_bounces,
        tiles: progress.tiles_done,
        elapsed,
    };
    log::info!(
        "Rendered in {:.2?}: {} bounces ({:.0} bounces/ms)",
        output.elapsed,
        output.total_bounces,
        output.bounces_per_ms()
    );
    Ok(output)
}
