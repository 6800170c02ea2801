//! Width-1 backend: plain `f32` and `u32`.

use super::{LaneF32, LaneU32, MASK_SET};

#[inline]
fn mask_from(condition: bool) -> u32 {
    if condition {
        MASK_SET
    } else {
        0
    }
}

impl LaneU32 for u32 {
    const WIDTH: usize = 1;

    #[inline]
    fn splat(value: u32) -> Self {
        value
    }

    #[inline]
    fn from_fn(mut f: impl FnMut(usize) -> u32) -> Self {
        f(0)
    }

    #[inline]
    fn lane(self, index: usize) -> u32 {
        debug_assert_eq!(index, 0);
        self
    }

    #[inline]
    fn cmp_eq(self, other: Self) -> Self {
        mask_from(self == other)
    }

    #[inline]
    fn is_zero(self) -> bool {
        self == 0
    }

    #[inline]
    fn horizontal_add(self) -> u64 {
        self as u64
    }
}

impl LaneF32 for f32 {
    type U32 = u32;

    const WIDTH: usize = 1;

    #[inline]
    fn splat(value: f32) -> Self {
        value
    }

    #[inline]
    fn from_fn(mut f: impl FnMut(usize) -> f32) -> Self {
        f(0)
    }

    #[inline]
    fn lane(self, index: usize) -> f32 {
        debug_assert_eq!(index, 0);
        self
    }

    #[inline]
    fn cmp_lt(self, other: Self) -> u32 {
        mask_from(self < other)
    }

    #[inline]
    fn cmp_le(self, other: Self) -> u32 {
        mask_from(self <= other)
    }

    #[inline]
    fn cmp_gt(self, other: Self) -> u32 {
        mask_from(self > other)
    }

    #[inline]
    fn cmp_ge(self, other: Self) -> u32 {
        mask_from(self >= other)
    }

    #[inline]
    fn cmp_eq(self, other: Self) -> u32 {
        mask_from(self == other)
    }

    #[inline]
    fn cmp_ne(self, other: Self) -> u32 {
        mask_from(self != other)
    }

    #[inline]
    fn select(mask: u32, if_true: Self, if_false: Self) -> Self {
        f32::from_bits((if_true.to_bits() & mask) | (if_false.to_bits() & !mask))
    }

    #[inline]
    fn mask_and(self, mask: u32) -> Self {
        f32::from_bits(self.to_bits() & mask)
    }

    #[inline]
    fn sqrt(self) -> Self {
        f32::sqrt(self)
    }

    // Written out instead of f32::min/max so NaN handling matches the
    // 4-wide backend (the second operand wins when unordered).
    #[inline]
    fn min(self, other: Self) -> Self {
        if self < other {
            self
        } else {
            other
        }
    }

    #[inline]
    fn max(self, other: Self) -> Self {
        if self > other {
            self
        } else {
            other
        }
    }

    #[inline]
    fn from_u32(value: u32) -> Self {
        value as f32
    }

    #[inline]
    fn horizontal_add(self) -> f32 {
        self
    }
}
