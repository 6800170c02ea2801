//! Per-lane xorshift random series.
//!
//! Every lane carries its own 32-bit state and is advanced independently,
//! so a 4-wide draw is four parallel streams rather than four consecutive
//! values of one stream.

use raylane_math::{LaneF32, LaneU32};

/// Per-lane seed constants for tile seeding: `BASE + x * MUL_X + y * MUL_Y`.
const SEED_BASE: [u32; 4] = [29_807_612, 56_094_376, 10_957_868, 67_820_193];
const SEED_MUL_X: [u32; 4] = [12_301, 31_085, 29_067, 17_453];
const SEED_MUL_Y: [u32; 4] = [127_659, 805_672, 310_784, 209_485];

/// Replaces an all-zero lane, which xorshift would never leave.
const ZERO_STATE_SUBSTITUTE: u32 = 0x9E37_79B9;

/// 2^-24: maps the top 24 bits of a draw onto [0, 1).
const UNIT_SCALE: f32 = 1.0 / 16_777_216.0;

/// Mutable generator state, one word per lane.
#[derive(Clone, Copy, Debug)]
pub struct RandomSeries<F: LaneF32> {
    state: F::U32,
}

impl<F: LaneF32> RandomSeries<F> {
    /// Start from an explicit state; zero lanes are replaced.
    pub fn new(state: F::U32) -> Self {
        let mut state = state;
        let zero = state.cmp_eq(F::U32::splat(0));
        state.conditional_assign(zero, F::U32::splat(ZERO_STATE_SUBSTITUTE));
        Self { state }
    }

    /// Seed lane `i` with `seeds[i]`.
    pub fn from_seeds(seeds: &[u32]) -> Self {
        debug_assert!(seeds.len() >= F::WIDTH);
        Self::new(F::U32::from_fn(|lane| seeds[lane]))
    }

    /// Deterministic seed for the tile at grid position `(tile_x, tile_y)`.
    pub fn for_tile(tile_x: u32, tile_y: u32) -> Self {
        Self::new(F::U32::from_fn(|lane| tile_seed(lane, tile_x, tile_y)))
    }

    /// Current state of every lane.
    pub fn state(&self) -> F::U32 {
        self.state
    }

    /// Advance each lane by one xorshift32 step and return the new state.
    #[inline]
    pub fn next_u32(&mut self) -> F::U32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Uniform floats in [0, 1).
    #[inline]
    pub fn uniform(&mut self) -> F {
        F::from_u32(self.next_u32() >> 8) * F::splat(UNIT_SCALE)
    }

    /// Uniform floats in [-1, 1).
    #[inline]
    pub fn signed(&mut self) -> F {
        F::splat(-1.0) + F::splat(2.0) * self.uniform()
    }
}

/// Seed word of one lane for a tile.
pub fn tile_seed(lane: usize, tile_x: u32, tile_y: u32) -> u32 {
    SEED_BASE[lane]
        .wrapping_add(tile_x.wrapping_mul(SEED_MUL_X[lane]))
        .wrapping_add(tile_y.wrapping_mul(SEED_MUL_Y[lane]))
}
