//! Measured BRDF lookup.
//!
//! A table is addressed by three quantized angles of the half/difference
//! parameterization: half-vector elevation, difference-vector elevation and
//! difference-vector azimuth. Loading tables from disk is left to callers;
//! this module only defines the lookup contract.

use std::f32::consts::{FRAC_PI_2, PI};

use raylane_math::{Color, Vec3};

use crate::error::{Result, SceneError};

/// Dense table of reflectance colors over `counts[0] x counts[1] x counts[2]`
/// buckets, stored row-major with the azimuth axis fastest.
#[derive(Clone, Debug)]
pub struct BrdfTable {
    counts: [u32; 3],
    values: Vec<Color>,
}

impl BrdfTable {
    /// Create a table, checking that `values` fills every bucket.
    pub fn new(counts: [u32; 3], values: Vec<Color>) -> Result<Self> {
        let expected = counts.iter().map(|&c| c as usize).product::<usize>();
        if expected == 0 || values.len() != expected {
            return Err(SceneError::BrdfSize {
                expected,
                actual: values.len(),
            });
        }
        Ok(Self { counts, values })
    }

    /// A single black bucket; absorbs everything.
    pub fn null() -> Self {
        Self {
            counts: [1, 1, 1],
            values: vec![Color::ZERO],
        }
    }

    /// Same color in every bucket.
    pub fn constant(counts: [u32; 3], color: Color) -> Result<Self> {
        let len = counts.iter().map(|&c| c as usize).product::<usize>();
        Self::new(counts, vec![color; len])
    }

    pub fn counts(&self) -> [u32; 3] {
        self.counts
    }

    /// Flat index of the nearest bucket for the given angles.
    pub fn bucket_index(&self, theta_half: f32, theta_diff: f32, phi_diff: f32) -> usize {
        let [c0, c1, c2] = self.counts;

        let f0 = (theta_half / FRAC_PI_2).clamp(0.0, 1.0).sqrt();
        let f1 = (theta_diff / FRAC_PI_2).clamp(0.0, 1.0);
        let f2 = (phi_diff / PI).clamp(0.0, 1.0);

        let i0 = round_to_u32((c0 - 1) as f32 * f0);
        let i1 = round_to_u32((c1 - 1) as f32 * f1);
        let i2 = round_to_u32((c2 - 1) as f32 * f2);

        (i2 + i1 * c2 + i0 * c1 * c2) as usize
    }

    /// Reflectance for the given half/difference angles (radians).
    pub fn lookup(&self, theta_half: f32, theta_diff: f32, phi_diff: f32) -> Color {
        self.values[self.bucket_index(theta_half, theta_diff, phi_diff)]
    }

    /// Reflectance for a view/light pair at a surface with the given frame.
    pub fn evaluate(&self, view: Vec3, light: Vec3, frame: &TangentFrame) -> Color {
        let (theta_half, theta_diff, phi_diff) = frame.half_diff_angles(view, light);
        self.lookup(theta_half, theta_diff, phi_diff)
    }
}

#[inline]
fn round_to_u32(value: f32) -> u32 {
    (value + 0.5) as u32
}

/// Orthonormal shading frame at a hit point.
#[derive(Clone, Copy, Debug)]
pub struct TangentFrame {
    pub normal: Vec3,
    pub tangent: Vec3,
    pub binormal: Vec3,
}

impl TangentFrame {
    /// Build a frame around `normal`, picking a helper axis away from it.
    pub fn from_normal(normal: Vec3) -> Self {
        let helper = if normal.z.abs() < 0.999 { Vec3::Z } else { Vec3::X };
        let tangent = helper.cross(normal).normalize_or_zero();
        let binormal = normal.cross(tangent);
        Self {
            normal,
            tangent,
            binormal,
        }
    }

    /// Express a world-space direction in this frame.
    #[inline]
    pub fn to_local(&self, v: Vec3) -> Vec3 {
        Vec3::new(v.dot(self.tangent), v.dot(self.binormal), v.dot(self.normal))
    }

    /// `(theta_half, theta_diff, phi_diff)` for a view/light pair.
    ///
    /// `phi_diff` is folded into [0, pi] since the tables are stored for
    /// half the azimuth range.
    pub fn half_diff_angles(&self, view: Vec3, light: Vec3) -> (f32, f32, f32) {
        let half = (0.5 * (view + light)).normalize_or_zero();
        let lw = self.to_local(light);
        let hw = self.to_local(half);

        let diff_y = hw.cross(Vec3::X).normalize_or_zero();
        let diff_x = diff_y.cross(hw);

        let theta_half = hw.z.clamp(-1.0, 1.0).acos();
        let theta_diff = hw.dot(lw).clamp(-1.0, 1.0).acos();
        let mut phi_diff = diff_y.dot(lw).atan2(diff_x.dot(lw));
        if phi_diff < 0.0 {
            phi_diff += PI;
        }

        (theta_half, theta_diff, phi_diff)
    }
}

/// `(theta_half, theta_diff, phi_diff)` of a view/light pair in the frame
/// spanned by `tangent`, `binormal` and `normal`.
pub fn local_angles(view: Vec3, light: Vec3, normal: Vec3, tangent: Vec3, binormal: Vec3) -> (f32, f32, f32) {
    TangentFrame {
        normal,
        tangent,
        binormal,
    }
    .half_diff_angles(view, light)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_angles_match_frame() {
        let frame = TangentFrame::from_normal(Vec3::new(0.0, 0.6, 0.8));
        let view = Vec3::new(0.1, 0.2, 0.9).normalize();
        let light = Vec3::new(-0.5, 0.3, 0.6).normalize();
        assert_eq!(
            local_angles(view, light, frame.normal, frame.tangent, frame.binormal),
            frame.half_diff_angles(view, light)
        );
    }

    fn ramp_table() -> BrdfTable {
        let counts = [3, 4, 5];
        let values = (0..60).map(|i| Color::splat(i as f32)).collect();
        BrdfTable::new(counts, values).unwrap()
    }

    #[test]
    fn test_size_mismatch_rejected() {
        let err = BrdfTable::new([2, 2, 2], vec![Color::ONE; 7]).unwrap_err();
        assert!(matches!(err, SceneError::BrdfSize { expected: 8, actual: 7 }));
        assert!(BrdfTable::new([0, 2, 2], Vec::new()).is_err());
    }

    #[test]
    fn test_row_major_index() {
        let table = ramp_table();
        assert_eq!(table.bucket_index(0.0, 0.0, 0.0), 0);
        // phi axis is fastest
        assert_eq!(table.bucket_index(0.0, 0.0, PI), 4);
        // theta_diff strides by counts[2]
        assert_eq!(table.bucket_index(0.0, FRAC_PI_2, 0.0), 3 * 5);
        // theta_half strides by counts[1] * counts[2]
        assert_eq!(table.bucket_index(FRAC_PI_2, 0.0, 0.0), 2 * 4 * 5);
        assert_eq!(table.lookup(FRAC_PI_2, FRAC_PI_2, PI), Color::splat(59.0));
    }

    #[test]
    fn test_nearest_bucket_rounding() {
        let table = ramp_table();
        // counts[2] - 1 = 4 buckets over [0, pi]; 0.6 * 4 = 2.4 rounds to 2
        assert_eq!(table.bucket_index(0.0, 0.0, 0.6 * PI), 2);
        // 0.65 * 4 = 2.6 rounds to 3
        assert_eq!(table.bucket_index(0.0, 0.0, 0.65 * PI), 3);
        // out of range angles clamp
        assert_eq!(table.bucket_index(-1.0, -1.0, 10.0), 4);
    }

    #[test]
    fn test_null_table_is_black() {
        let table = BrdfTable::null();
        assert_eq!(table.lookup(0.3, 0.2, 1.0), Color::ZERO);
    }

    #[test]
    fn test_normal_incidence_angles() {
        let frame = TangentFrame::from_normal(Vec3::Z);
        let (theta_half, theta_diff, _) = frame.half_diff_angles(Vec3::Z, Vec3::Z);
        assert!(theta_half.abs() < 1e-3);
        assert!(theta_diff.abs() < 1e-3);
    }

    #[test]
    fn test_frame_is_orthonormal() {
        for normal in [Vec3::Z, Vec3::X, Vec3::new(0.3, -0.4, 0.866).normalize()] {
            let frame = TangentFrame::from_normal(normal);
            assert!((frame.tangent.length() - 1.0).abs() < 1e-5);
            assert!((frame.binormal.length() - 1.0).abs() < 1e-5);
            assert!(frame.tangent.dot(normal).abs() < 1e-5);
            assert!(frame.binormal.dot(frame.tangent).abs() < 1e-5);
        }
    }
}
