//! Math for raylane.
//!
//! - Scalar vectors come from glam
//! - [`lane`] provides the lane groups the kernel is written against
//! - [`LaneV3`], [`LaneV2`] and [`LaneRay`] are their vector counterparts

// Re-export glam for convenience
pub use glam::*;

pub mod lane;
mod lane_vec;
mod ray;
mod interval;
mod color;

pub use lane::{DefaultLane, F32x4, LaneF32, LaneU32, U32x4, LANE_WIDTH, MASK_SET};
pub use lane_vec::{LaneV2, LaneV3, NORMALIZE_EPSILON_SQ};
pub use ray::LaneRay;
pub use interval::LaneInterval;
pub use color::{color_to_rgba, linear_to_gamma, linear_to_srgb, pack_argb, Color};
