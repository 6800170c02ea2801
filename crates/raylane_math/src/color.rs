//! Linear color encoding for display.

use glam::Vec3;

/// Color type alias (linear RGB, typically 0-1)
pub type Color = Vec3;

/// Encode a linear value with the sRGB transfer curve.
///
/// Input is clamped to [0, 1] first.
#[inline]
pub fn linear_to_srgb(linear: f32) -> f32 {
    let l = linear.clamp(0.0, 1.0);
    if l > 0.003_130_8 {
        1.055 * l.powf(1.0 / 2.4) - 0.055
    } else {
        l * 12.92
    }
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

#[inline]
fn to_u8(encoded: f32) -> u8 {
    (255.0 * encoded + 0.5) as u8
}

/// Convert a linear color to 8-bit sRGB RGBA.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    [
        to_u8(linear_to_srgb(color.x)),
        to_u8(linear_to_srgb(color.y)),
        to_u8(linear_to_srgb(color.z)),
        255,
    ]
}

/// Pack a linear color into a 32-bit A8R8G8B8 pixel (sRGB encoded).
pub fn pack_argb(color: Color) -> u32 {
    let [r, g, b, a] = color_to_rgba(color);
    u32::from_be_bytes([a, r, g, b])
}
