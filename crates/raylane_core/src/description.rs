//! Serializable scene description.
//!
//! ```json
//! {
//!   "materials": [
//!     { "name": "sky", "emit": [0.5, 0.8, 1.0] },
//!     { "name": "ground", "reflect": [0.6, 0.6, 0.6] }
//!   ],
//!   "planes": [ { "normal": [0, 0, 1], "dist": 0, "material": 1 } ],
//!   "spheres": [ { "center": [0, -1, 0], "radius": 1, "material": 1 } ]
//! }
//! ```

use raylane_math::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::scene::{Material, Plane, Sphere, World};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MaterialDescription {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub emit: Vec3,
    #[serde(default)]
    pub reflect: Vec3,
    #[serde(default)]
    pub specular: f32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlaneDescription {
    pub normal: Vec3,
    pub dist: f32,
    pub material: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SphereDescription {
    pub center: Vec3,
    pub radius: f32,
    pub material: u32,
}

/// Scene as read from configuration. Material 0 is the background.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SceneDescription {
    pub materials: Vec<MaterialDescription>,
    #[serde(default)]
    pub planes: Vec<PlaneDescription>,
    #[serde(default)]
    pub spheres: Vec<SphereDescription>,
}

impl SceneDescription {
    /// Parse a description from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate and build the world this description describes.
    pub fn to_world(&self) -> Result<World> {
        let materials = self
            .materials
            .iter()
            .map(|m| Material {
                name: m.name.clone(),
                emit_color: m.emit,
                reflect_color: m.reflect,
                specular: m.specular,
                brdf: None,
            })
            .collect();
        let planes = self
            .planes
            .iter()
            .map(|p| Plane::new(p.normal, p.dist, p.material))
            .collect();
        let spheres = self
            .spheres
            .iter()
            .map(|s| Sphere::new(s.center, s.radius, s.material))
            .collect();

        World::new(materials, planes, spheres)
    }
}
