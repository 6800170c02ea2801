//! raylane renderer - lane-parallel CPU path tracing
//!
//! A Monte Carlo path tracer over the planes and spheres of a
//! [`raylane_core::World`]. Rays are traced in lane groups (one path per
//! lane), the image is cut into tiles, and a fixed pool of workers drains
//! a lock-free tile queue.
//!
//! # Example
//!
//! ```no_run
//! use raylane_core::reference_world;
//! use raylane_renderer::{render, Camera, RenderConfig};
//!
//! let config = RenderConfig::default().with_resolution(320, 180);
//! let output = render(&reference_world(), &Camera::default(), &config).unwrap();
//! let rgba = output.image.to_rgba();
//! assert_eq!(rgba.len(), 320 * 180 * 4);
//! ```

mod camera;
mod error;
mod framebuffer;
mod intersect;
mod kernel;
mod queue;
mod random;
mod renderer;
mod shading;
mod tile;

pub use camera::{Camera, CameraFilm};
pub use error::{RenderError, Result};
pub use framebuffer::{FrameBuffer, ImageBuffer};
pub use intersect::{closest_hit, Intersect, LaneHit, EPSILON, MIN_HIT_DIST, NO_PLANE};
pub use kernel::{cast_sample_rays, render_pixel, trace_path, PathSample, SampleParams, SampleResult};
pub use queue::{RenderProgress, WorkQueue};
pub use random::{tile_seed, RandomSeries};
pub use renderer::{
    render, render_with, render_with_lanes, CancelToken, ProgressReporter, RayonPool, RenderConfig, RenderOutput,
    TileOrder, WorkerPool,
};
pub use shading::{brdf_attenuation, cosine_attenuation, next_direction, random_bounce, reflect, Shading};
pub use tile::{generate_tiles, render_tile, sort_spiral, Tile, WorkOrder, DEFAULT_TILE_SIZE};

/// Re-export the lane types and scalar math from raylane_math
pub use raylane_math::{Color, DefaultLane, F32x4, LaneF32, LaneU32, U32x4, Vec2, Vec3, LANE_WIDTH};
