//! Pinhole camera and its film rectangle.

use raylane_math::{LaneF32, LaneV2, LaneV3, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::{RenderError, Result};

/// Camera placement.
///
/// The film sits `film_distance` in front of the position, facing it; its
/// longer side spans one unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub film_distance: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, -10.0, 1.0),
            target: Vec3::ZERO,
            up: Vec3::Z,
            film_distance: 1.0,
        }
    }
}

impl Camera {
    /// Create a camera looking from `position` at `target`.
    pub fn new(position: Vec3, target: Vec3, up: Vec3) -> Self {
        Self {
            position,
            target,
            up,
            ..Default::default()
        }
    }

    /// Set camera position.
    pub fn with_position(mut self, position: Vec3, target: Vec3, up: Vec3) -> Self {
        self.position = position;
        self.target = target;
        self.up = up;
        self
    }

    /// Set the distance from the position to the film plane.
    pub fn with_film_distance(mut self, film_distance: f32) -> Self {
        self.film_distance = film_distance;
        self
    }

    /// Derive the camera basis and film rectangle for a `width` x `height` image.
    pub fn film(&self, width: u32, height: u32) -> Result<CameraFilm> {
        if width == 0 || height == 0 {
            return Err(RenderError::EmptyImage { width, height });
        }
        if !(self.film_distance.is_finite() && self.film_distance > 0.0) {
            return Err(RenderError::DegenerateCamera);
        }

        // Z points backwards, away from the target
        let z = (self.position - self.target).try_normalize().ok_or(RenderError::DegenerateCamera)?;
        let x = self.up.cross(z).try_normalize().ok_or(RenderError::DegenerateCamera)?;
        let y = z.cross(x);

        let mut film_w = 1.0;
        let mut film_h = 1.0;
        if width > height {
            film_h = film_w * height as f32 / width as f32;
        } else if height > width {
            film_w = film_h * width as f32 / height as f32;
        }

        Ok(CameraFilm {
            position: self.position,
            x,
            y,
            z,
            center: self.position - z * self.film_distance,
            half_size: Vec2::new(0.5 * film_w, 0.5 * film_h),
            half_pixel: Vec2::new(1.0 / width as f32, 1.0 / height as f32),
            width,
            height,
        })
    }
}

/// Camera basis and film rectangle resolved for one image size.
#[derive(Debug, Clone, Copy)]
pub struct CameraFilm {
    pub position: Vec3,
    /// Right
    pub x: Vec3,
    /// Up
    pub y: Vec3,
    /// Backwards
    pub z: Vec3,
    /// Center of the film rectangle
    pub center: Vec3,
    pub half_size: Vec2,
    /// Half a pixel in film coordinates, which run from -1 to 1
    pub half_pixel: Vec2,
    pub width: u32,
    pub height: u32,
}

impl CameraFilm {
    /// Film coordinates of the center of pixel `(x, y)`; row 0 is the top.
    pub fn pixel_position(&self, x: u32, y: u32) -> Vec2 {
        Vec2::new(
            -1.0 + 2.0 * (x as f32 + 0.5) / self.width as f32,
            1.0 - 2.0 * (y as f32 + 0.5) / self.height as f32,
        )
    }

    /// World-space point on the film for every lane's film coordinate.
    #[inline]
    pub fn film_point<F: LaneF32>(&self, film: LaneV2<F>) -> LaneV3<F> {
        LaneV3::splat(self.center)
            + LaneV3::splat(self.x * self.half_size.x) * film.x
            + LaneV3::splat(self.y * self.half_size.y) * film.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_basis() {
        let film = Camera::default().film(100, 100).unwrap();
        assert!((film.x - Vec3::X).length() < 1e-6);
        assert!(film.y.z > 0.0);
        assert!(film.z.y < 0.0);
        assert!(film.x.dot(film.y).abs() < 1e-6);
        assert!(film.y.dot(film.z).abs() < 1e-6);
        // Film sits between the camera and the target
        assert!(((film.center - film.position).length() - 1.0).abs() < 1e-6);
        assert!(film.center.y > film.position.y);
    }

    #[test]
    fn test_aspect_correction() {
        let wide = Camera::default().film(200, 100).unwrap();
        assert_eq!(wide.half_size, Vec2::new(0.5, 0.25));

        let tall = Camera::default().film(100, 400).unwrap();
        assert_eq!(tall.half_size, Vec2::new(0.125, 0.5));
    }

    #[test]
    fn test_pixel_position() {
        let film = Camera::default().film(4, 2).unwrap();
        assert_eq!(film.pixel_position(0, 0), Vec2::new(-0.75, 0.5));
        assert_eq!(film.pixel_position(3, 1), Vec2::new(0.75, -0.5));
        assert_eq!(film.half_pixel, Vec2::new(0.25, 0.5));
    }

    #[test]
    fn test_top_row_looks_up() {
        let film = Camera::default().film(32, 32).unwrap();
        let top = film.pixel_position(16, 0);
        let point = film.film_point(LaneV2::<f32>::new(top.x, top.y)).extract(0);
        assert!(point.z > film.position.z);
    }

    #[test]
    fn test_degenerate_camera() {
        let camera = Camera::new(Vec3::ONE, Vec3::ONE, Vec3::Z);
        assert!(matches!(camera.film(8, 8), Err(RenderError::DegenerateCamera)));

        // up parallel to the view axis
        let camera = Camera::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Z);
        assert!(matches!(camera.film(8, 8), Err(RenderError::DegenerateCamera)));

        assert!(matches!(
            Camera::default().film(0, 8),
            Err(RenderError::EmptyImage { width: 0, height: 8 })
        ));
    }
}
