//! Lock-free work queue shared by the render workers.
//!
//! Workers claim orders with a single atomic fetch-add on a cursor; nothing
//! else is shared between them except the result counters and the disjoint
//! frame-buffer writes.

use std::sync::atomic::{AtomicU64, Ordering};

use raylane_core::World;
use raylane_math::LaneF32;

use crate::camera::CameraFilm;
use crate::framebuffer::{FrameBuffer, ImageBuffer};
use crate::kernel::SampleParams;
use crate::tile::{render_tile, WorkOrder};

/// Snapshot of a render's progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderProgress {
    pub tiles_done: u64,
    pub tile_count: u64,
    pub total_bounces: u64,
}

impl RenderProgress {
    /// Fraction of tiles finished, in [0, 1].
    pub fn fraction(&self) -> f32 {
        if self.tile_count == 0 {
            return 1.0;
        }
        self.tiles_done as f32 / self.tile_count as f32
    }

    pub fn is_complete(&self) -> bool {
        self.tiles_done >= self.tile_count
    }
}

/// Every work order of a render plus what the workers need to execute them.
pub struct WorkQueue<'a, F: LaneF32> {
    orders: Vec<WorkOrder<F>>,
    world: &'a World,
    film: CameraFilm,
    params: SampleParams,
    target: FrameBuffer,

    next_order: AtomicU64,
    tiles_done: AtomicU64,
    total_bounces: AtomicU64,
}

impl<'a, F: LaneF32> WorkQueue<'a, F> {
    /// Create a queue rendering into a fresh frame buffer the size of `film`.
    pub fn new(world: &'a World, film: CameraFilm, params: SampleParams, orders: Vec<WorkOrder<F>>) -> Self {
        Self {
            target: FrameBuffer::new(film.width, film.height),
            orders,
            world,
            film,
            params,
            next_order: AtomicU64::new(0),
            tiles_done: AtomicU64::new(0),
            total_bounces: AtomicU64::new(0),
        }
    }

    pub fn orders(&self) -> &[WorkOrder<F>] {
        &self.orders
    }

    pub fn tile_count(&self) -> u64 {
        self.orders.len() as u64
    }

    /// Claim the index of the next unclaimed order.
    ///
    /// Each index is returned exactly once across all callers.
    #[inline]
    pub fn claim_next_index(&self) -> Option<usize> {
        let index = self.next_order.fetch_add(1, Ordering::Relaxed);
        (index < self.tile_count()).then_some(index as usize)
    }

    /// Claim the next unclaimed order.
    pub fn claim_next(&self) -> Option<&WorkOrder<F>> {
        self.claim_next_index().map(|index| &self.orders[index])
    }

    /// Record a finished tile and the bounces it traced.
    pub fn report_tile_done(&self, bounces: u64) {
        self.total_bounces.fetch_add(bounces, Ordering::Relaxed);
        let done = self.tiles_done.fetch_add(1, Ordering::AcqRel) + 1;
        let count = self.tile_count();
        log::trace!("Tile {}/{} done ({} bounces)", done, count, bounces);
        // Only the worker crossing a 10% step logs it
        if count > 0 && done * 10 / count > (done - 1) * 10 / count {
            log::info!("Rendered {}% ({}/{} tiles)", done * 100 / count, done, count);
        }
    }

    /// Claim, render and report one tile.
    ///
    /// Returns `false` once every order has been claimed.
    pub fn render_next_tile(&self) -> bool {
        let Some(order) = self.claim_next() else {
            return false;
        };

        let bounces = render_tile(order, self.world, &self.film, &self.params, &self.target);
        self.report_tile_done(bounces);
        true
    }

    pub fn progress(&self) -> RenderProgress {
        RenderProgress {
            tiles_done: self.tiles_done.load(Ordering::Acquire),
            tile_count: self.tile_count(),
            total_bounces: self.total_bounces.load(Ordering::Relaxed),
        }
    }

    /// Frame buffer the workers write into.
    pub fn target(&self) -> &FrameBuffer {
        &self.target
    }

    /// Consume the queue and return the rendered image.
    pub fn into_image(self) -> ImageBuffer {
        self.target.to_image()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Mutex;

    use raylane_math::{Color, F32x4};

    use crate::camera::Camera;
    use crate::shading::Shading;
    use crate::tile::generate_tiles;

    fn queue(world: &World, width: u32, height: u32, tile_size: u32) -> WorkQueue<'_, F32x4> {
        let film = Camera::default().film(width, height).unwrap();
        let params = SampleParams {
            rays_per_pixel: 4,
            max_bounces: 2,
            shading: Shading::Cosine,
        };
        let orders = generate_tiles(width, height, tile_size)
            .into_iter()
            .map(WorkOrder::new)
            .collect();
        WorkQueue::new(world, film, params, orders)
    }

    #[test]
    fn test_claim_exhausts() {
        let world = World::empty(Color::ONE);
        let queue = queue(&world, 16, 16, 8);
        assert_eq!(queue.tile_count(), 4);

        let claimed: Vec<_> = std::iter::from_fn(|| queue.claim_next_index()).collect();
        assert_eq!(claimed, vec![0, 1, 2, 3]);
        assert!(queue.claim_next().is_none());
        assert!(queue.claim_next().is_none());
    }

    #[test]
    fn test_concurrent_claims_are_unique() {
        let world = World::empty(Color::ONE);
        let queue = queue(&world, 256, 256, 4);
        let claimed = Mutex::new(Vec::new());

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    let mut local = Vec::new();
                    while let Some(index) = queue.claim_next_index() {
                        local.push(index);
                    }
                    claimed.lock().unwrap().extend(local);
                });
            }
        });

        let claimed = claimed.into_inner().unwrap();
        let unique: HashSet<_> = claimed.iter().copied().collect();
        assert_eq!(claimed.len(), queue.orders().len());
        assert_eq!(unique.len(), claimed.len());
    }

    #[test]
    fn test_render_next_tile_reports_progress() {
        let world = World::empty(Color::splat(0.5));
        let queue = queue(&world, 8, 8, 4);

        let mut rendered = 0;
        while queue.render_next_tile() {
            rendered += 1;
        }
        assert_eq!(rendered, 4);

        let progress = queue.progress();
        assert!(progress.is_complete());
        assert_eq!(progress.fraction(), 1.0);
        assert_eq!(progress.total_bounces, 0);

        let image = queue.into_image();
        assert!(image.pixels.iter().all(|&c| c == Color::splat(0.5)));
    }

    #[test]
    fn test_report_accumulates() {
        let world = World::empty(Color::ONE);
        let queue = queue(&world, 8, 8, 8);
        queue.report_tile_done(10);
        queue.report_tile_done(5);
        let progress = queue.progress();
        assert_eq!(progress.tiles_done, 2);
        assert_eq!(progress.total_bounces, 15);
    }
}
