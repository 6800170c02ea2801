//! Surface response at a hit: attenuation and the next bounce direction.

use raylane_core::{TangentFrame, World};
use raylane_math::{Color, LaneF32, LaneU32, LaneV3};
use serde::{Deserialize, Serialize};

use crate::intersect::{LaneHit, NO_PLANE};
use crate::random::RandomSeries;

/// Widest lane group the per-lane BRDF evaluation handles.
const MAX_LANES: usize = 4;

/// How a hit attenuates the light arriving along the rest of the path.
///
/// Fixed for a whole render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shading {
    /// `max(-d . n, 0) * reflect_color`
    #[default]
    Cosine,
    /// Reflectance from the hit material's measured BRDF table; materials
    /// without a table shade as [`Shading::Cosine`]
    MeasuredBrdf,
}

/// Mirror `direction` about `normal`.
#[inline]
pub fn reflect<F: LaneF32>(direction: LaneV3<F>, normal: LaneV3<F>) -> LaneV3<F> {
    direction - normal * (F::splat(2.0) * direction.dot(normal))
}

/// Random direction in the hemisphere-ish lobe around `normal`.
#[inline]
pub fn random_bounce<F: LaneF32>(normal: LaneV3<F>, rng: &mut RandomSeries<F>) -> LaneV3<F> {
    let x = rng.signed();
    let y = rng.signed();
    let z = rng.signed();
    (normal + LaneV3::new(x, y, z)).normalize()
}

/// Blend of a random bounce and the mirror direction by `specular`.
#[inline]
pub fn next_direction<F: LaneF32>(
    direction: LaneV3<F>,
    normal: LaneV3<F>,
    specular: F,
    rng: &mut RandomSeries<F>,
) -> LaneV3<F> {
    let mirror = reflect(direction, normal);
    let bounce = random_bounce(normal, rng);
    LaneV3::lerp(bounce, mirror, specular).normalize()
}

/// Cosine-weighted albedo.
#[inline]
pub fn cosine_attenuation<F: LaneF32>(
    direction: LaneV3<F>,
    normal: LaneV3<F>,
    reflect_color: LaneV3<F>,
) -> LaneV3<F> {
    let cos = (-direction.dot(normal)).max(F::zero());
    reflect_color * cos
}

/// Measured reflectance for `view`/`light` at every lane's hit.
///
/// Plane hits use the plane's stored frame; sphere hits build one from the
/// normal. Lanes whose material has no table get the cosine term.
pub fn brdf_attenuation<F: LaneF32>(
    world: &World,
    hit: &LaneHit<F>,
    view: LaneV3<F>,
    light: LaneV3<F>,
    reflect_color: LaneV3<F>,
) -> LaneV3<F> {
    debug_assert!(F::WIDTH <= MAX_LANES);

    let cosine = cosine_attenuation(-view, hit.normal, reflect_color);
    let mut colors = [Color::ZERO; MAX_LANES];

    for (lane, color) in colors.iter_mut().enumerate().take(F::WIDTH) {
        let material = &world.materials()[hit.material.lane(lane) as usize];
        *color = match &material.brdf {
            Some(table) => {
                let plane = hit.plane.lane(lane);
                let frame = if plane == NO_PLANE {
                    TangentFrame::from_normal(hit.normal.extract(lane))
                } else {
                    *world.planes()[plane as usize].frame()
                };
                table.evaluate(view.extract(lane), light.extract(lane), &frame)
            }
            None => cosine.extract(lane),
        };
    }

    LaneV3::new(
        F::from_fn(|lane| colors[lane].x),
        F::from_fn(|lane| colors[lane].y),
        F::from_fn(|lane| colors[lane].z),
    )
}
