use crate::lane::LaneF32;
use crate::lane_vec::LaneV3;
use crate::Vec3;

/// W rays traced together, one per lane.
///
/// The direction is kept normalized by the kernel but nothing here
/// depends on that.
#[derive(Debug, Copy, Clone)]
pub struct LaneRay<F: LaneF32> {
    pub origin: LaneV3<F>,
    pub direction: LaneV3<F>,
}

impl<F: LaneF32> LaneRay<F> {
    /// Create a new ray group.
    #[inline]
    pub fn new(origin: LaneV3<F>, direction: LaneV3<F>) -> Self {
        Self { origin, direction }
    }

    /// Same ray in every lane.
    #[inline]
    pub fn splat(origin: Vec3, direction: Vec3) -> Self {
        Self::new(LaneV3::splat(origin), LaneV3::splat(direction))
    }

    /// Get the point along each lane's ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: F) -> LaneV3<F> {
        self.origin + self.direction * t
    }
}
