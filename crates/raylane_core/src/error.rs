//! Error types for scene construction.

use thiserror::Error;

/// Errors raised while building or loading a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    /// A world needs at least the background material at index 0
    #[error("Scene has no materials; index 0 must hold the background material")]
    NoMaterials,

    /// A surface references a material that does not exist
    #[error("{kind} {index} references material {material} (count: {count})")]
    MaterialOutOfRange {
        kind: &'static str,
        index: usize,
        material: u32,
        count: usize,
    },

    /// Plane normal is not unit length or not finite
    #[error("Plane {0} has a degenerate normal")]
    DegenerateNormal(usize),

    /// Sphere radius is not a positive finite number
    #[error("Sphere {index} has invalid radius {radius}")]
    InvalidRadius { index: usize, radius: f32 },

    /// Specular mix outside [0, 1]
    #[error("Material {index} has specular {specular} outside [0, 1]")]
    InvalidSpecular { index: usize, specular: f32 },

    /// BRDF table value count does not match its bucket counts
    #[error("BRDF table expects {expected} values, got {actual}")]
    BrdfSize { expected: usize, actual: usize },

    /// Scene description could not be parsed
    #[error("Invalid scene description: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for scene operations.
pub type Result<T> = std::result::Result<T, SceneError>;
