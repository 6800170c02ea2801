//! Width-4 backend built on `wide::f32x4` / `wide::u32x4`.

use std::ops::{
    Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitXor, BitXorAssign, Div, Mul, MulAssign, Neg,
    Not, Shl, Shr, Sub, SubAssign,
};

use wide::{f32x4, i32x4, u32x4, CmpEq, CmpGe, CmpGt, CmpLe, CmpLt, CmpNe};

use super::{LaneF32, LaneU32};

/// Four `f32` lanes.
#[derive(Clone, Copy, Debug)]
#[repr(transparent)]
pub struct F32x4(pub f32x4);

/// Four `u32` lanes; doubles as the mask type of [`F32x4`].
#[derive(Clone, Copy, Debug)]
#[repr(transparent)]
pub struct U32x4(pub u32x4);

impl PartialEq for U32x4 {
    fn eq(&self, other: &Self) -> bool {
        self.to_array() == other.to_array()
    }
}

impl U32x4 {
    #[inline]
    pub fn from_array(lanes: [u32; 4]) -> Self {
        Self(bytemuck::cast(lanes))
    }

    #[inline]
    pub fn to_array(self) -> [u32; 4] {
        bytemuck::cast(self.0)
    }

    #[inline]
    fn as_f32(self) -> f32x4 {
        bytemuck::cast(self.0)
    }
}

impl F32x4 {
    #[inline]
    pub fn from_array(lanes: [f32; 4]) -> Self {
        Self(bytemuck::cast(lanes))
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        bytemuck::cast(self.0)
    }

    #[inline]
    fn mask(cmp: f32x4) -> U32x4 {
        U32x4(bytemuck::cast(cmp))
    }
}

macro_rules! forward_binop {
    ($ty:ident, $trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident) => {
        impl $trait for $ty {
            type Output = Self;

            #[inline]
            fn $method(self, rhs: Self) -> Self {
                Self($trait::$method(self.0, rhs.0))
            }
        }

        impl $assign_trait for $ty {
            #[inline]
            fn $assign_method(&mut self, rhs: Self) {
                *self = $trait::$method(*self, rhs);
            }
        }
    };
}

forward_binop!(F32x4, Add, add, AddAssign, add_assign);
forward_binop!(F32x4, Sub, sub, SubAssign, sub_assign);
forward_binop!(F32x4, Mul, mul, MulAssign, mul_assign);
forward_binop!(U32x4, Add, add, AddAssign, add_assign);
forward_binop!(U32x4, BitAnd, bitand, BitAndAssign, bitand_assign);
forward_binop!(U32x4, BitXor, bitxor, BitXorAssign, bitxor_assign);

impl Div for F32x4 {
    type Output = Self;

    #[inline]
    fn div(self, rhs: Self) -> Self {
        Self(self.0 / rhs.0)
    }
}

impl Neg for F32x4 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl BitOr for U32x4 {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl Not for U32x4 {
    type Output = Self;

    #[inline]
    fn not(self) -> Self {
        Self(self.0 ^ u32x4::splat(u32::MAX))
    }
}

impl Shl<u32> for U32x4 {
    type Output = Self;

    #[inline]
    fn shl(self, shift: u32) -> Self {
        Self(self.0 << shift)
    }
}

impl Shr<u32> for U32x4 {
    type Output = Self;

    #[inline]
    fn shr(self, shift: u32) -> Self {
        Self(self.0 >> shift)
    }
}

impl LaneU32 for U32x4 {
    const WIDTH: usize = 4;

    #[inline]
    fn splat(value: u32) -> Self {
        Self(u32x4::splat(value))
    }

    #[inline]
    fn from_fn(f: impl FnMut(usize) -> u32) -> Self {
        Self::from_array(std::array::from_fn(f))
    }

    #[inline]
    fn lane(self, index: usize) -> u32 {
        self.to_array()[index]
    }

    #[inline]
    fn cmp_eq(self, other: Self) -> Self {
        Self(self.0.cmp_eq(other.0))
    }

    #[inline]
    fn is_zero(self) -> bool {
        self.to_array() == [0; 4]
    }

    #[inline]
    fn horizontal_add(self) -> u64 {
        self.to_array().iter().map(|&v| v as u64).sum()
    }
}

impl LaneF32 for F32x4 {
    type U32 = U32x4;

    const WIDTH: usize = 4;

    #[inline]
    fn splat(value: f32) -> Self {
        Self(f32x4::splat(value))
    }

    #[inline]
    fn from_fn(f: impl FnMut(usize) -> f32) -> Self {
        Self::from_array(std::array::from_fn(f))
    }

    #[inline]
    fn lane(self, index: usize) -> f32 {
        self.to_array()[index]
    }

    #[inline]
    fn cmp_lt(self, other: Self) -> U32x4 {
        Self::mask(self.0.cmp_lt(other.0))
    }

    #[inline]
    fn cmp_le(self, other: Self) -> U32x4 {
        Self::mask(self.0.cmp_le(other.0))
    }

    #[inline]
    fn cmp_gt(self, other: Self) -> U32x4 {
        Self::mask(self.0.cmp_gt(other.0))
    }

    #[inline]
    fn cmp_ge(self, other: Self) -> U32x4 {
        Self::mask(self.0.cmp_ge(other.0))
    }

    #[inline]
    fn cmp_eq(self, other: Self) -> U32x4 {
        Self::mask(self.0.cmp_eq(other.0))
    }

    #[inline]
    fn cmp_ne(self, other: Self) -> U32x4 {
        Self::mask(self.0.cmp_ne(other.0))
    }

    #[inline]
    fn select(mask: U32x4, if_true: Self, if_false: Self) -> Self {
        let t: u32x4 = bytemuck::cast(if_true.0);
        let f: u32x4 = bytemuck::cast(if_false.0);
        let bits = (t & mask.0) | (f & (!mask).0);
        Self(bytemuck::cast(bits))
    }

    #[inline]
    fn mask_and(self, mask: U32x4) -> Self {
        Self(self.0 & mask.as_f32())
    }

    #[inline]
    fn sqrt(self) -> Self {
        Self(self.0.sqrt())
    }

    #[inline]
    fn min(self, other: Self) -> Self {
        Self::select(self.cmp_lt(other), self, other)
    }

    #[inline]
    fn max(self, other: Self) -> Self {
        Self::select(self.cmp_gt(other), self, other)
    }

    /// Rounds like `v as f32`: both 16-bit halves convert exactly through
    /// the signed conversion, and the final add rounds once.
    #[inline]
    fn from_u32(value: U32x4) -> Self {
        let high: i32x4 = bytemuck::cast(value.0 >> 16_u32);
        let low: i32x4 = bytemuck::cast(value.0 & u32x4::splat(0xFFFF));
        Self(f32x4::from_i32x4(high) * f32x4::splat(65536.0) + f32x4::from_i32x4(low))
    }

    #[inline]
    fn horizontal_add(self) -> f32 {
        let [a, b, c, d] = self.to_array();
        a + b + c + d
    }
}
