//! Scene model: materials, planes, spheres and the world that owns them.
//!
//! Everything here is immutable once a [`World`] is built and is shared
//! read-only by all render workers.

use std::sync::Arc;

use raylane_math::{Color, Vec3};

use crate::brdf::{BrdfTable, TangentFrame};
use crate::error::{Result, SceneError};

/// Index of the material returned for rays that hit nothing.
pub const BACKGROUND_MATERIAL: u32 = 0;

/// Surface appearance.
///
/// Emission doubles as the light source signal: there are no explicit
/// lights, paths only gather what the surfaces they touch emit.
#[derive(Clone, Debug)]
pub struct Material {
    /// Material name, for diagnostics only
    pub name: String,

    /// Radiance added when a path reaches this surface
    pub emit_color: Color,

    /// Albedo applied to light arriving from further along the path
    pub reflect_color: Color,

    /// 0 = pure diffuse, 1 = mirror
    pub specular: f32,

    /// Optional measured reflectance, used by the BRDF shading policy
    pub brdf: Option<Arc<BrdfTable>>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: String::new(),
            emit_color: Color::ZERO,
            reflect_color: Color::new(0.5, 0.5, 0.5), // Grey default
            specular: 0.0,
            brdf: None,
        }
    }
}

impl Material {
    /// Create a diffuse material with the given albedo.
    pub fn diffuse(name: impl Into<String>, reflect_color: Color) -> Self {
        Self {
            name: name.into(),
            reflect_color,
            ..Default::default()
        }
    }

    /// Create a pure emitter that reflects nothing.
    pub fn emissive(name: impl Into<String>, emit_color: Color) -> Self {
        Self {
            name: name.into(),
            emit_color,
            reflect_color: Color::ZERO,
            ..Default::default()
        }
    }

    /// Set the specular mix (clamped to [0, 1]).
    pub fn with_specular(mut self, specular: f32) -> Self {
        self.specular = specular.clamp(0.0, 1.0);
        self
    }

    /// Attach a measured BRDF table.
    pub fn with_brdf(mut self, table: Arc<BrdfTable>) -> Self {
        self.brdf = Some(table);
        self
    }
}

/// Infinite plane `normal . p + dist = 0`.
///
/// Normal and distance are fixed at construction so the shading frame
/// always matches the normal.
#[derive(Clone, Copy, Debug)]
pub struct Plane {
    normal: Vec3,
    dist: f32,
    pub material: u32,
    frame: TangentFrame,
}

impl Plane {
    /// Create a plane; the normal is normalized here.
    pub fn new(normal: Vec3, dist: f32, material: u32) -> Self {
        let normal = normal.normalize_or_zero();
        Self {
            normal,
            dist,
            material,
            frame: TangentFrame::from_normal(normal),
        }
    }

    /// Unit normal.
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Signed distance of the origin along the normal.
    pub fn dist(&self) -> f32 {
        self.dist
    }

    /// Shading frame shared by every point of the plane.
    pub fn frame(&self) -> &TangentFrame {
        &self.frame
    }
}

/// Sphere given by center and radius.
#[derive(Clone, Copy, Debug)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
    pub material: u32,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32, material: u32) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }
}

/// Largest accepted deviation of a plane normal's squared length from 1.
const UNIT_NORMAL_TOLERANCE: f32 = 1e-3;

/// The complete, validated scene.
///
/// Material 0 is the background: it is what a ray that hits nothing
/// "sees", and its emission is the sky light of the scene.
#[derive(Clone, Debug)]
pub struct World {
    materials: Vec<Material>,
    planes: Vec<Plane>,
    spheres: Vec<Sphere>,
}

impl World {
    /// Validate and assemble a world.
    pub fn new(materials: Vec<Material>, planes: Vec<Plane>, spheres: Vec<Sphere>) -> Result<Self> {
        if materials.is_empty() {
            return Err(SceneError::NoMaterials);
        }
        let count = materials.len();

        for (index, material) in materials.iter().enumerate() {
            if !(0.0..=1.0).contains(&material.specular) {
                return Err(SceneError::InvalidSpecular {
                    index,
                    specular: material.specular,
                });
            }
        }

        for (index, plane) in planes.iter().enumerate() {
            let unit = (plane.normal.length_squared() - 1.0).abs() <= UNIT_NORMAL_TOLERANCE;
            if !plane.normal.is_finite() || !unit || !plane.dist.is_finite() {
                return Err(SceneError::DegenerateNormal(index));
            }
            check_material("Plane", index, plane.material, count)?;
        }

        for (index, sphere) in spheres.iter().enumerate() {
            if !(sphere.radius.is_finite() && sphere.radius > 0.0) || !sphere.center.is_finite() {
                return Err(SceneError::InvalidRadius {
                    index,
                    radius: sphere.radius,
                });
            }
            check_material("Sphere", index, sphere.material, count)?;
        }

        log::debug!(
            "World built: {} materials, {} planes, {} spheres",
            materials.len(),
            planes.len(),
            spheres.len()
        );

        Ok(Self {
            materials,
            planes,
            spheres,
        })
    }

    /// A world with only a background material; every ray misses.
    pub fn empty(background: Color) -> Self {
        Self {
            materials: vec![Material::emissive("background", background)],
            planes: Vec::new(),
            spheres: Vec::new(),
        }
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }

    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }

    /// The material rays see when they hit nothing.
    pub fn background(&self) -> &Material {
        &self.materials[BACKGROUND_MATERIAL as usize]
    }
}

fn check_material(kind: &'static str, index: usize, material: u32, count: usize) -> Result<()> {
    if material as usize >= count {
        return Err(SceneError::MaterialOutOfRange {
            kind,
            index,
            material,
            count,
        });
    }
    Ok(())
}

/// Incremental scene construction returning material ids.
#[derive(Clone, Debug, Default)]
pub struct SceneBuilder {
    materials: Vec<Material>,
    planes: Vec<Plane>,
    spheres: Vec<Sphere>,
}

impl SceneBuilder {
    /// Start a scene with the given background material at index 0.
    pub fn new(background: Material) -> Self {
        Self {
            materials: vec![background],
            ..Default::default()
        }
    }

    /// Add a material to the scene and return its ID.
    pub fn add_material(&mut self, material: Material) -> u32 {
        let id = self.materials.len() as u32;
        self.materials.push(material);
        id
    }

    pub fn add_plane(&mut self, normal: Vec3, dist: f32, material: u32) -> &mut Self {
        self.planes.push(Plane::new(normal, dist, material));
        self
    }

    pub fn add_sphere(&mut self, center: Vec3, radius: f32, material: u32) -> &mut Self {
        self.spheres.push(Sphere::new(center, radius, material));
        self
    }

    /// Validate and produce the world.
    pub fn build(self) -> Result<World> {
        World::new(self.materials, self.planes, self.spheres)
    }
}

/// Ground plane and a blue sphere lit by a pale blue sky.
pub fn reference_world() -> World {
    let mut builder = SceneBuilder::new(Material::emissive("sky", Color::new(0.5, 0.8, 1.0)));
    let ground = builder.add_material(Material::diffuse("ground", Color::new(0.6, 0.6, 0.6)));
    let blue = builder.add_material(Material::diffuse("blue", Color::new(0.5, 0.5, 1.0)));
    let lamp = builder.add_material(Material::emissive("lamp", Color::new(50.0, 15.0, 1.0)));
    let teal = builder.add_material(Material::diffuse("teal", Color::new(0.1, 1.0, 0.8)).with_specular(1.0));
    let violet = builder.add_material(Material::diffuse("violet", Color::new(0.5, 0.2, 0.9)).with_specular(0.85));
    let mirror = builder.add_material(Material::diffuse("mirror", Color::new(0.99, 0.99, 0.99)).with_specular(1.0));

    builder
        .add_plane(Vec3::Z, 0.0, ground)
        .add_sphere(Vec3::new(0.0, -1.0, 0.0), 1.0, blue)
        .add_sphere(Vec3::new(3.0, -2.0, 0.0), 1.0, lamp)
        .add_sphere(Vec3::new(-2.0, -1.0, 2.0), 1.0, teal)
        .add_sphere(Vec3::new(1.0, -1.0, 2.5), 1.0, violet)
        .add_sphere(Vec3::new(-3.0, 5.0, 0.0), 3.0, mirror);

    // Every index above is in range and every radius positive.
    World {
        materials: builder.materials,
        planes: builder.planes,
        spheres: builder.spheres,
    }
}
