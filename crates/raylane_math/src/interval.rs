use crate::lane::LaneF32;

/// Per-lane open parameter range used for closest-hit searches.
#[derive(Debug, Clone, Copy)]
pub struct LaneInterval<F: LaneF32> {
    pub min: F,
    pub max: F,
}

impl<F: LaneF32> LaneInterval<F> {
    /// Create a new interval given min and max values.
    #[inline]
    pub fn new(min: F, max: F) -> Self {
        Self { min, max }
    }

    /// Same `(min, max)` range in every lane.
    #[inline]
    pub fn splat(min: f32, max: f32) -> Self {
        Self::new(F::splat(min), F::splat(max))
    }

    /// Mask of lanes where x is strictly within (min, max).
    #[inline]
    pub fn surrounds(&self, x: F) -> F::U32 {
        x.cmp_gt(self.min) & x.cmp_lt(self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lane::{F32x4, LaneU32, MASK_SET};

    #[test]
    fn test_interval_surrounds() {
        let interval = LaneInterval::<F32x4>::splat(0.0, 10.0);
        let mask = interval.surrounds(F32x4::from_array([0.0, 5.0, 10.0, 10.1]));

        // Exclusive bounds - endpoints NOT included
        assert_eq!(mask.lane(0), 0);
        assert_eq!(mask.lane(1), MASK_SET);
        assert_eq!(mask.lane(2), 0);
        assert_eq!(mask.lane(3), 0);
    }

    #[test]
    fn test_interval_per_lane_bounds() {
        let interval = LaneInterval::new(F32x4::splat(0.001), F32x4::from_array([4.0, f32::MAX, 4.0, 1.0]));
        let mask = interval.surrounds(F32x4::splat(5.0));

        assert_eq!(mask.lane(0), 0);
        assert_eq!(mask.lane(1), MASK_SET);
        assert_eq!(mask.lane(2), 0);
        assert_eq!(mask.lane(3), 0);
        assert_eq!(interval.surrounds(F32x4::splat(0.0)).lane(1), 0);
    }
}
