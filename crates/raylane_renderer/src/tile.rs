//! Tiles: the unit of work handed to render workers.
//!
//! The image is cut into square tiles that can be rendered independently.
//! Each tile carries its own random series, seeded from its grid position,
//! so the result does not depend on which worker renders it or when.

use raylane_core::World;
use raylane_math::LaneF32;

use crate::camera::CameraFilm;
use crate::framebuffer::FrameBuffer;
use crate::kernel::{render_pixel, SampleParams};
use crate::random::RandomSeries;

/// Default tile size in pixels.
pub const DEFAULT_TILE_SIZE: u32 = 64;

/// Pixel rectangle `[min_x, max_x) x [min_y, max_y)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
    /// Column of this tile in the tile grid
    pub grid_x: u32,
    /// Row of this tile in the tile grid
    pub grid_y: u32,
}

impl Tile {
    pub fn width(&self) -> u32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> u32 {
        self.max_y - self.min_y
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        (self.min_x..self.max_x).contains(&x) && (self.min_y..self.max_y).contains(&y)
    }

    fn center(&self) -> (f32, f32) {
        (
            (self.min_x + self.max_x) as f32 / 2.0,
            (self.min_y + self.max_y) as f32 / 2.0,
        )
    }
}

/// Cut a `width` x `height` image into tiles in row-major grid order.
///
/// Tiles on the right and bottom edges are clipped to the image.
pub fn generate_tiles(width: u32, height: u32, tile_size: u32) -> Vec<Tile> {
    debug_assert!(tile_size > 0);

    let columns = width.div_ceil(tile_size);
    let rows = height.div_ceil(tile_size);
    let mut tiles = Vec::with_capacity((columns * rows) as usize);

    for grid_y in 0..rows {
        for grid_x in 0..columns {
            let min_x = grid_x * tile_size;
            let min_y = grid_y * tile_size;
            tiles.push(Tile {
                min_x,
                min_y,
                max_x: (min_x + tile_size).min(width),
                max_y: (min_y + tile_size).min(height),
                grid_x,
                grid_y,
            });
        }
    }

    tiles
}

/// Reorder tiles by distance from the image center, nearest first.
///
/// Equally distant tiles keep their relative order.
pub fn sort_spiral(tiles: &mut [Tile], width: u32, height: u32) {
    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;
    let distance = |tile: &Tile| {
        let (x, y) = tile.center();
        (x - center_x).powi(2) + (y - center_y).powi(2)
    };

    tiles.sort_by(|a, b| {
        distance(a)
            .partial_cmp(&distance(b))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// A tile together with the random series its pixels draw from.
#[derive(Debug, Clone, Copy)]
pub struct WorkOrder<F: LaneF32> {
    pub tile: Tile,
    pub series: RandomSeries<F>,
}

impl<F: LaneF32> WorkOrder<F> {
    /// Seed the order from the tile's grid position.
    pub fn new(tile: Tile) -> Self {
        Self {
            tile,
            series: RandomSeries::for_tile(tile.grid_x, tile.grid_y),
        }
    }
}

/// Render every pixel of a work order into `target`.
///
/// Returns the number of bounces traced.
pub fn render_tile<F: LaneF32>(
    order: &WorkOrder<F>,
    world: &World,
    film: &CameraFilm,
    params: &SampleParams,
    target: &FrameBuffer,
) -> u64 {
    let tile = &order.tile;
    let mut series = order.series;
    let mut bounces = 0;

    for y in tile.min_y..tile.max_y {
        for x in tile.min_x..tile.max_x {
            let result = render_pixel(world, film, x, y, params, &mut series);
            target.set(x, y, result.color);
            bounces += result.bounces;
        }
    }

    bounces
}
