//! Lane-parallel 2D and 3D vectors.
//!
//! Structure-of-arrays layout: each component is a lane group, so one
//! `LaneV3<F32x4>` holds four independent vectors.

use std::ops::{Add, AddAssign, Mul, Neg, Sub};

use glam::{Vec2, Vec3};

use crate::lane::LaneF32;

/// Squared length below which `normalize` yields the zero vector.
pub const NORMALIZE_EPSILON_SQ: f32 = 0.0001 * 0.0001;

/// W independent 3D vectors.
#[derive(Clone, Copy, Debug)]
pub struct LaneV3<F: LaneF32> {
    pub x: F,
    pub y: F,
    pub z: F,
}

impl<F: LaneF32> LaneV3<F> {
    #[inline]
    pub fn new(x: F, y: F, z: F) -> Self {
        Self { x, y, z }
    }

    /// Same vector in every lane.
    #[inline]
    pub fn splat(v: Vec3) -> Self {
        Self::new(F::splat(v.x), F::splat(v.y), F::splat(v.z))
    }

    #[inline]
    pub fn zero() -> Self {
        Self::splat(Vec3::ZERO)
    }

    /// Read the vector stored in one lane.
    #[inline]
    pub fn extract(self, lane: usize) -> Vec3 {
        Vec3::new(self.x.lane(lane), self.y.lane(lane), self.z.lane(lane))
    }

    #[inline]
    pub fn dot(self, other: Self) -> F {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[inline]
    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Component-wise product.
    #[inline]
    pub fn hadamard(self, other: Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y, self.z * other.z)
    }

    #[inline]
    pub fn length_squared(self) -> F {
        self.dot(self)
    }

    /// Normalize every lane; near-zero vectors become zero instead of NaN.
    #[inline]
    pub fn normalize(self) -> Self {
        let len_sq = self.length_squared();
        let valid = len_sq.cmp_gt(F::splat(NORMALIZE_EPSILON_SQ));
        let inv_len = F::splat(1.0) / len_sq.sqrt();
        let mut result = Self::zero();
        result.conditional_assign(valid, self * inv_len);
        result
    }

    /// `(1 - t) * a + t * b`, per lane.
    #[inline]
    pub fn lerp(a: Self, b: Self, t: F) -> Self {
        a * (F::splat(1.0) - t) + b * t
    }

    #[inline]
    pub fn conditional_assign(&mut self, mask: F::U32, source: Self) {
        self.x.conditional_assign(mask, source.x);
        self.y.conditional_assign(mask, source.y);
        self.z.conditional_assign(mask, source.z);
    }

    /// Zero the lanes not selected by `mask`.
    #[inline]
    pub fn mask_and(self, mask: F::U32) -> Self {
        Self::new(self.x.mask_and(mask), self.y.mask_and(mask), self.z.mask_and(mask))
    }

    /// Sum of all lanes.
    #[inline]
    pub fn horizontal_add(self) -> Vec3 {
        Vec3::new(
            self.x.horizontal_add(),
            self.y.horizontal_add(),
            self.z.horizontal_add(),
        )
    }

    /// Read a vector field of `items[indices[lane]]` for every lane.
    #[inline]
    pub fn gather<T>(items: &[T], indices: F::U32, field: impl Fn(&T) -> Vec3) -> Self {
        Self::new(
            F::gather(items, indices, |item| field(item).x),
            F::gather(items, indices, |item| field(item).y),
            F::gather(items, indices, |item| field(item).z),
        )
    }
}

impl<F: LaneF32> Add for LaneV3<F> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl<F: LaneF32> AddAssign for LaneV3<F> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<F: LaneF32> Sub for LaneV3<F> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl<F: LaneF32> Neg for LaneV3<F> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

/// Scale by a per-lane factor.
impl<F: LaneF32> Mul<F> for LaneV3<F> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: F) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// W independent 2D vectors.
#[derive(Clone, Copy, Debug)]
pub struct LaneV2<F: LaneF32> {
    pub x: F,
    pub y: F,
}

impl<F: LaneF32> LaneV2<F> {
    #[inline]
    pub fn new(x: F, y: F) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn splat(v: Vec2) -> Self {
        Self::new(F::splat(v.x), F::splat(v.y))
    }

    #[inline]
    pub fn extract(self, lane: usize) -> Vec2 {
        Vec2::new(self.x.lane(lane), self.y.lane(lane))
    }
}

impl<F: LaneF32> Add for LaneV2<F> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lane::F32x4;

    #[test]
    fn test_cross_and_dot_match_glam() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(-4.0, 0.5, 2.0);
        let la = LaneV3::<F32x4>::splat(a);
        let lb = LaneV3::<F32x4>::splat(b);

        for lane in 0..4 {
            assert_eq!(la.cross(lb).extract(lane), a.cross(b));
            assert_eq!(la.dot(lb).lane(lane), a.dot(b));
        }
    }

    #[test]
    fn test_normalize_zero_safe() {
        let v = LaneV3::<F32x4>::new(
            F32x4::from_array([3.0, 0.0, 1e-6, 0.0]),
            F32x4::from_array([4.0, 0.0, 0.0, 2.0]),
            F32x4::splat(0.0),
        );
        let n = v.normalize();
        assert!((n.extract(0) - Vec3::new(0.6, 0.8, 0.0)).length() < 1e-6);
        assert_eq!(n.extract(1), Vec3::ZERO);
        assert_eq!(n.extract(2), Vec3::ZERO);
        assert_eq!(n.extract(3), Vec3::Y);

        let scalar = LaneV3::<f32>::splat(Vec3::ZERO).normalize();
        assert_eq!(scalar.extract(0), Vec3::ZERO);
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = LaneV3::<f32>::splat(Vec3::X);
        let b = LaneV3::<f32>::splat(Vec3::Y);
        assert_eq!(LaneV3::lerp(a, b, 0.0).extract(0), Vec3::X);
        assert_eq!(LaneV3::lerp(a, b, 1.0).extract(0), Vec3::Y);
        assert_eq!(LaneV3::lerp(a, b, 0.5).extract(0), Vec3::new(0.5, 0.5, 0.0));
    }

    #[test]
    fn test_mask_and_zeroes_dead_lanes() {
        use crate::lane::{LaneU32, U32x4, MASK_SET};

        let v = LaneV3::<F32x4>::splat(Vec3::ONE);
        let mask = U32x4::from_fn(|i| if i % 2 == 0 { MASK_SET } else { 0 });
        let masked = v.mask_and(mask);
        assert_eq!(masked.extract(0), Vec3::ONE);
        assert_eq!(masked.extract(1), Vec3::ZERO);
        assert_eq!(masked.horizontal_add(), Vec3::splat(2.0));
    }

    #[test]
    fn test_gather_vec3_field() {
        use crate::lane::{LaneU32, U32x4};

        let colors = [Vec3::X, Vec3::Y, Vec3::Z];
        let gathered = LaneV3::<F32x4>::gather(&colors, U32x4::from_fn(|i| (i % 3) as u32), |c| *c);
        assert_eq!(gathered.extract(0), Vec3::X);
        assert_eq!(gathered.extract(2), Vec3::Z);
        assert_eq!(gathered.extract(3), Vec3::X);
    }

    #[test]
    fn test_lane_v2_ops() {
        let a = LaneV2::<f32>::splat(Vec2::new(1.0, 2.0));
        let b = LaneV2::<f32>::splat(Vec2::new(3.0, 4.0));
        assert_eq!((a + b).extract(0), Vec2::new(4.0, 6.0));
    }
}
