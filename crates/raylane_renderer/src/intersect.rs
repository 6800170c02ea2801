//! Closest-hit search of lane rays against the world's planes and spheres.

use raylane_core::{Plane, Sphere, World, BACKGROUND_MATERIAL};
use raylane_math::{LaneF32, LaneInterval, LaneRay, LaneU32, LaneV3};

/// Hits closer than this are ignored, so a bounce does not re-hit its origin.
pub const MIN_HIT_DIST: f32 = 0.001;

/// Threshold for grazing plane hits and tangent sphere hits.
pub const EPSILON: f32 = 0.0001;

/// `plane` value of lanes whose closest hit is not a plane.
pub const NO_PLANE: u32 = u32::MAX;

/// Closest hit found so far, per lane.
#[derive(Debug, Clone, Copy)]
pub struct LaneHit<F: LaneF32> {
    /// Ray parameter of the hit; `f32::MAX` for lanes that hit nothing
    pub distance: F,
    /// Material index; [`BACKGROUND_MATERIAL`] on a miss
    pub material: F::U32,
    pub normal: LaneV3<F>,
    /// Index of the plane hit, or [`NO_PLANE`]
    pub plane: F::U32,
}

impl<F: LaneF32> LaneHit<F> {
    /// Every lane missed.
    pub fn miss() -> Self {
        Self {
            distance: F::splat(f32::MAX),
            material: F::U32::splat(BACKGROUND_MATERIAL),
            normal: LaneV3::zero(),
            plane: F::U32::splat(NO_PLANE),
        }
    }

    /// Lanes that hit a surface.
    #[inline]
    pub fn hit_mask(&self) -> F::U32 {
        self.material.cmp_ne(F::U32::splat(BACKGROUND_MATERIAL))
    }

    /// Accepted range for the next candidate: beyond `MIN_HIT_DIST`, nearer
    /// than the current hit.
    #[inline]
    fn range(&self) -> LaneInterval<F> {
        LaneInterval::new(F::splat(MIN_HIT_DIST), self.distance)
    }

    #[inline]
    fn record(&mut self, mask: F::U32, distance: F, material: u32, normal: LaneV3<F>) {
        self.distance.conditional_assign(mask, distance);
        self.material.conditional_assign(mask, F::U32::splat(material));
        self.normal.conditional_assign(mask, normal);
    }
}

/// Surfaces that can be intersected by lane rays.
pub trait Intersect {
    /// Update `hit` on every lane where this surface is closer.
    ///
    /// Returns the mask of updated lanes. Equal distances keep the earlier hit.
    fn intersect<F: LaneF32>(&self, ray: &LaneRay<F>, hit: &mut LaneHit<F>) -> F::U32;
}

impl Intersect for Plane {
    fn intersect<F: LaneF32>(&self, ray: &LaneRay<F>, hit: &mut LaneHit<F>) -> F::U32 {
        let normal = LaneV3::splat(self.normal());
        let denom = normal.dot(ray.direction);
        let facing = denom.max(-denom).cmp_gt(F::splat(EPSILON));

        let t = (F::splat(-self.dist()) - normal.dot(ray.origin)) / denom;
        let mask = facing & hit.range().surrounds(t);

        hit.record(mask, t, self.material, normal);
        mask
    }
}

impl Intersect for Sphere {
    fn intersect<F: LaneF32>(&self, ray: &LaneRay<F>, hit: &mut LaneHit<F>) -> F::U32 {
        let center = LaneV3::splat(self.center);
        let rel = ray.origin - center;

        let a = ray.direction.dot(ray.direction);
        let b = F::splat(2.0) * ray.direction.dot(rel);
        let c = rel.dot(rel) - F::splat(self.radius * self.radius);

        let discriminant = b * b - F::splat(4.0) * a * c;
        let root_term = discriminant.max(F::zero()).sqrt();
        let crossing = root_term.cmp_gt(F::splat(EPSILON));

        let denom = F::splat(2.0) * a;
        let t_near = (-b - root_term) / denom;
        let t_far = (-b + root_term) / denom;
        let t = F::select(t_near.cmp_gt(F::splat(MIN_HIT_DIST)), t_near, t_far);

        let mask = crossing & hit.range().surrounds(t);
        if mask.is_zero() {
            return mask;
        }

        let normal = (ray.at(t) - center).normalize();
        hit.record(mask, t, self.material, normal);
        mask
    }
}

/// Closest surface along every lane's ray: planes first, then spheres.
pub fn closest_hit<F: LaneF32>(world: &World, ray: &LaneRay<F>) -> LaneHit<F> {
    let mut hit = LaneHit::miss();

    for (index, plane) in world.planes().iter().enumerate() {
        let mask = plane.intersect(ray, &mut hit);
        hit.plane.conditional_assign(mask, F::U32::splat(index as u32));
    }

    for sphere in world.spheres() {
        let mask = sphere.intersect(ray, &mut hit);
        hit.plane.conditional_assign(mask, F::U32::splat(NO_PLANE));
    }

    hit
}
