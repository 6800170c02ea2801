//! Path tracer kernel.
//!
//! Traces `rays_per_pixel` paths per pixel in groups of `F::WIDTH`, one
//! path per lane. A path gathers the emission of every surface it touches,
//! weighted by the attenuation accumulated so far, and ends when it escapes
//! to the background or runs out of bounces.

use raylane_core::World;
use raylane_math::{Color, LaneF32, LaneRay, LaneU32, LaneV2, LaneV3, Vec2, Vec3, MASK_SET};

use crate::camera::CameraFilm;
use crate::intersect::closest_hit;
use crate::random::RandomSeries;
use crate::shading::{brdf_attenuation, cosine_attenuation, next_direction, Shading};

/// Quality parameters shared by every pixel of a render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleParams {
    /// Multiple of the lane width
    pub rays_per_pixel: u32,
    pub max_bounces: u32,
    pub shading: Shading,
}

/// Estimate for one pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleResult {
    /// Mean linear radiance over all rays
    pub color: Color,
    /// Surface hits summed over all rays
    pub bounces: u64,
}

/// Radiance and hit count of one lane group of paths.
#[derive(Debug, Clone, Copy)]
pub struct PathSample<F: LaneF32> {
    pub color: LaneV3<F>,
    pub bounces: F::U32,
}

/// Follow one path per lane from `ray` for at most `max_bounces` segments.
pub fn trace_path<F: LaneF32>(
    world: &World,
    mut ray: LaneRay<F>,
    max_bounces: u32,
    shading: Shading,
    rng: &mut RandomSeries<F>,
) -> PathSample<F> {
    let materials = world.materials();

    let mut sample = LaneV3::<F>::zero();
    let mut attenuation = LaneV3::<F>::splat(Vec3::ONE);
    let mut alive = F::U32::splat(MASK_SET);
    let mut bounces = F::U32::splat(0);

    for _ in 0..max_bounces {
        let hit = closest_hit(world, &ray);

        let emit = LaneV3::gather(materials, hit.material, |m| m.emit_color);
        sample += attenuation.hadamard(emit).mask_and(alive);

        alive &= hit.hit_mask();
        if alive.is_zero() {
            break;
        }
        bounces += F::U32::splat(1) & alive;

        let reflect_color = LaneV3::gather(materials, hit.material, |m| m.reflect_color);
        let specular = F::gather(materials, hit.material, |m| m.specular);

        let direction = next_direction(ray.direction, hit.normal, specular, rng);
        let surface = match shading {
            Shading::Cosine => cosine_attenuation(ray.direction, hit.normal, reflect_color),
            Shading::MeasuredBrdf => brdf_attenuation(world, &hit, -ray.direction, direction, reflect_color),
        };
        attenuation = attenuation.hadamard(surface);

        // Dead lanes keep their last ray
        let origin = ray.at(hit.distance);
        ray.origin.conditional_assign(alive, origin);
        ray.direction.conditional_assign(alive, direction);
    }

    PathSample {
        color: sample,
        bounces,
    }
}

/// Estimate the radiance through film position `pixel`.
///
/// `params.rays_per_pixel` must be a nonzero multiple of `F::WIDTH`.
pub fn cast_sample_rays<F: LaneF32>(
    world: &World,
    film: &CameraFilm,
    pixel: Vec2,
    params: &SampleParams,
    rng: &mut RandomSeries<F>,
) -> SampleResult {
    debug_assert!(params.rays_per_pixel > 0 && params.rays_per_pixel as usize % F::WIDTH == 0);

    let batches = params.rays_per_pixel / F::WIDTH as u32;
    let origin = LaneV3::splat(film.position);

    let mut color_sum = LaneV3::<F>::zero();
    let mut bounces = 0;

    for _ in 0..batches {
        // Box filter over the pixel footprint
        let x = F::splat(pixel.x) + rng.signed() * F::splat(film.half_pixel.x);
        let y = F::splat(pixel.y) + rng.signed() * F::splat(film.half_pixel.y);
        let target = film.film_point(LaneV2::new(x, y));

        let ray = LaneRay::new(origin, (target - origin).normalize());
        let path = trace_path(world, ray, params.max_bounces, params.shading, rng);

        color_sum += path.color;
        bounces += path.bounces.horizontal_add();
    }

    SampleResult {
        color: color_sum.horizontal_add() * (1.0 / params.rays_per_pixel as f32),
        bounces,
    }
}

/// Estimate pixel `(x, y)`; row 0 is the top of the image.
pub fn render_pixel<F: LaneF32>(
    world: &World,
    film: &CameraFilm,
    x: u32,
    y: u32,
    params: &SampleParams,
    rng: &mut RandomSeries<F>,
) -> SampleResult {
    cast_sample_rays(world, film, film.pixel_position(x, y), params, rng)
}
