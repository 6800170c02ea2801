//! Lane arithmetic layer.
//!
//! A lane group is a fixed-width register of independent `f32` or `u32`
//! values. Every operation is element-wise across the lanes, comparisons
//! produce per-lane masks that are either all ones or all zeros, and
//! conditional assignment only touches lanes whose mask is set.
//!
//! Two backends exist:
//! - `f32` / `u32` themselves (width 1)
//! - [`F32x4`] / [`U32x4`] backed by `wide` (width 4)
//!
//! Kernel code is written once against [`LaneF32`] and [`LaneU32`] and
//! produces the same per-lane results on either backend.

mod scalar;
mod wide4;

use std::fmt::Debug;
use std::ops::{
    Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitXor, BitXorAssign, Div, Mul, MulAssign, Neg,
    Not, Shl, Shr, Sub, SubAssign,
};

pub use wide4::{F32x4, U32x4};

/// Mask value of a set lane.
pub const MASK_SET: u32 = 0xFFFF_FFFF;

/// Lane group of 32-bit unsigned integers, also used as the mask type.
pub trait LaneU32:
    Copy
    + Debug
    + PartialEq
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + AddAssign
    + BitAnd<Output = Self>
    + BitAndAssign
    + BitOr<Output = Self>
    + BitXor<Output = Self>
    + BitXorAssign
    + Not<Output = Self>
    + Shl<u32, Output = Self>
    + Shr<u32, Output = Self>
{
    /// Number of lanes.
    const WIDTH: usize;

    /// Broadcast a scalar into every lane.
    fn splat(value: u32) -> Self;

    /// Build a lane group from a per-lane generator.
    fn from_fn(f: impl FnMut(usize) -> u32) -> Self;

    /// Read a single lane.
    fn lane(self, index: usize) -> u32;

    /// Per-lane equality mask.
    fn cmp_eq(self, other: Self) -> Self;

    /// Per-lane inequality mask.
    #[inline]
    fn cmp_ne(self, other: Self) -> Self {
        !self.cmp_eq(other)
    }

    /// True when no lane of the mask has any bit set.
    fn is_zero(self) -> bool;

    /// Fold all lanes into one scalar.
    #[inline]
    fn horizontal_add(self) -> u64 {
        (0..Self::WIDTH).map(|i| self.lane(i) as u64).sum()
    }

    /// Overwrite only the lanes selected by `mask` with `source`.
    #[inline]
    fn conditional_assign(&mut self, mask: Self, source: Self) {
        *self = (*self & !mask) | (source & mask);
    }
}

/// Lane group of 32-bit floats.
pub trait LaneF32:
    Copy
    + Debug
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + AddAssign
    + Sub<Output = Self>
    + SubAssign
    + Mul<Output = Self>
    + MulAssign
    + Div<Output = Self>
    + Neg<Output = Self>
{
    /// Matching integer/mask lane group.
    type U32: LaneU32;

    /// Number of lanes.
    const WIDTH: usize;

    /// Broadcast a scalar into every lane.
    fn splat(value: f32) -> Self;

    /// Build a lane group from a per-lane generator.
    fn from_fn(f: impl FnMut(usize) -> f32) -> Self;

    /// Read a single lane.
    fn lane(self, index: usize) -> f32;

    fn cmp_lt(self, other: Self) -> Self::U32;
    fn cmp_le(self, other: Self) -> Self::U32;
    fn cmp_gt(self, other: Self) -> Self::U32;
    fn cmp_ge(self, other: Self) -> Self::U32;
    fn cmp_eq(self, other: Self) -> Self::U32;
    fn cmp_ne(self, other: Self) -> Self::U32;

    /// Per lane: `if_true` where `mask` is set, `if_false` elsewhere.
    fn select(mask: Self::U32, if_true: Self, if_false: Self) -> Self;

    /// Keep lanes selected by `mask`, zero the rest.
    fn mask_and(self, mask: Self::U32) -> Self;

    fn sqrt(self) -> Self;
    fn min(self, other: Self) -> Self;
    fn max(self, other: Self) -> Self;

    /// Numeric conversion of each integer lane.
    fn from_u32(value: Self::U32) -> Self;

    /// Fold all lanes into one scalar, summing in lane order.
    #[inline]
    fn horizontal_add(self) -> f32 {
        (0..Self::WIDTH).fold(0.0, |acc, i| acc + self.lane(i))
    }

    #[inline]
    fn zero() -> Self {
        Self::splat(0.0)
    }

    #[inline]
    fn clamp01(self) -> Self {
        self.max(Self::zero()).min(Self::splat(1.0))
    }

    /// Overwrite only the lanes selected by `mask` with `source`.
    ///
    /// Unselected lanes keep their exact bit pattern.
    #[inline]
    fn conditional_assign(&mut self, mask: Self::U32, source: Self) {
        *self = Self::select(mask, source, *self);
    }

    /// Read `field` of `items[indices[lane]]` for every lane.
    ///
    /// Panics if an index is out of bounds; scene construction guarantees
    /// all material indices are valid.
    #[inline]
    fn gather<T>(items: &[T], indices: Self::U32, field: impl Fn(&T) -> f32) -> Self {
        Self::from_fn(|lane| field(&items[indices.lane(lane) as usize]))
    }
}

/// Lane type used by the renderer unless a width is requested explicitly.
#[cfg(feature = "simd")]
pub type DefaultLane = F32x4;

/// Lane type used by the renderer unless a width is requested explicitly.
#[cfg(not(feature = "simd"))]
pub type DefaultLane = f32;

/// Width of [`DefaultLane`].
pub const LANE_WIDTH: usize = <DefaultLane as LaneF32>::WIDTH;
