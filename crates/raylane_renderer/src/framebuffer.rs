//! Render targets.
//!
//! [`FrameBuffer`] is written concurrently by the workers, one tile each;
//! [`ImageBuffer`] is the finished image handed to whatever saves or shows it.

use std::sync::atomic::{AtomicU32, Ordering};

use raylane_math::{color_to_rgba, pack_argb, Color};

/// Linear RGB pixels shared by all workers.
///
/// Channels are stored as `f32` bit patterns in relaxed atomics. Tiles never
/// overlap, so no pixel has two writers.
pub struct FrameBuffer {
    width: u32,
    height: u32,
    channels: Vec<AtomicU32>,
}

impl FrameBuffer {
    /// Create a black buffer.
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize * 3;
        Self {
            width,
            height,
            channels: (0..len).map(|_| AtomicU32::new(0)).collect(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 3
    }

    /// Store the pixel at (x, y).
    #[inline]
    pub fn set(&self, x: u32, y: u32, color: Color) {
        let offset = self.offset(x, y);
        for (channel, value) in self.channels[offset..offset + 3].iter().zip(color.to_array()) {
            channel.store(value.to_bits(), Ordering::Relaxed);
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        let offset = self.offset(x, y);
        let load = |i: usize| f32::from_bits(self.channels[offset + i].load(Ordering::Relaxed));
        Color::new(load(0), load(1), load(2))
    }

    /// Snapshot the buffer once the workers have finished.
    pub fn to_image(&self) -> ImageBuffer {
        let pixels = self
            .channels
            .chunks_exact(3)
            .map(|c| {
                Color::new(
                    f32::from_bits(c[0].load(Ordering::Relaxed)),
                    f32::from_bits(c[1].load(Ordering::Relaxed)),
                    f32::from_bits(c[2].load(Ordering::Relaxed)),
                )
            })
            .collect();
        ImageBuffer {
            width: self.width,
            height: self.height,
            pixels,
        }
    }
}

/// Finished linear RGB image, row-major with row 0 at the top.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// sRGB-encoded 8-bit RGBA bytes.
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgba(*color));
        }
        bytes
    }

    /// sRGB-encoded pixels packed as A8R8G8B8 words.
    pub fn to_packed_argb(&self) -> Vec<u32> {
        self.pixels.iter().map(|color| pack_argb(*color)).collect()
    }

    /// Mean linear color over all pixels.
    pub fn average(&self) -> Color {
        if self.pixels.is_empty() {
            return Color::ZERO;
        }
        self.pixels.iter().copied().sum::<Color>() / self.pixels.len() as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_framebuffer_roundtrip_bits() {
        let fb = FrameBuffer::new(3, 2);
        let color = Color::new(0.1, f32::MIN_POSITIVE, 7.5);
        fb.set(2, 1, color);
        assert_eq!(fb.get(2, 1), color);
        assert_eq!(fb.get(0, 0), Color::ZERO);

        let image = fb.to_image();
        assert_eq!(image.get(2, 1), color);
        assert_eq!(image.pixels.len(), 6);
    }

    #[test]
    fn test_image_indexing_matches_framebuffer() {
        let fb = FrameBuffer::new(7, 3);
        for y in 0..3 {
            for x in 0..7 {
                fb.set(x, y, Color::new(x as f32, y as f32, (y * 7 + x) as f32));
            }
        }

        let image = fb.to_image();
        for y in 0..3 {
            for x in 0..7 {
                assert_eq!(image.get(x, y), fb.get(x, y));
                assert_eq!(image.pixels[y as usize * 7 + x as usize], fb.get(x, y));
            }
        }
    }

    #[test]
    fn test_disjoint_concurrent_writes() {
        let fb = FrameBuffer::new(8, 8);
        std::thread::scope(|scope| {
            for row in 0..8 {
                let fb = &fb;
                scope.spawn(move || {
                    for x in 0..8 {
                        fb.set(x, row, Color::splat((row * 8 + x) as f32));
                    }
                });
            }
        });
        assert_eq!(fb.get(5, 6), Color::splat(53.0));
    }

    #[test]
    fn test_image_encoding() {
        let image = ImageBuffer {
            width: 2,
            height: 1,
            pixels: vec![Color::new(1.0, 0.0, 2.0), Color::ZERO],
        };
        assert_eq!(image.to_rgba(), vec![255, 0, 255, 255, 0, 0, 0, 255]);
        assert_eq!(image.to_packed_argb(), vec![0xFFFF_00FF, 0xFF00_0000]);
    }

    #[test]
    fn test_image_average() {
        let image = ImageBuffer {
            width: 2,
            height: 1,
            pixels: vec![Color::ZERO, Color::splat(2.0)],
        };
        assert_eq!(image.average(), Color::ONE);
    }
}
