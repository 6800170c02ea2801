//! raylane core - scene model for the path tracer.
//!
//! This crate provides:
//!
//! - **Scene types**: `Material`, `Plane`, `Sphere`, `World`
//! - **Measured BRDF lookup**: `BrdfTable`
//! - **Scene descriptions**: JSON-loadable `SceneDescription`
//!
//! # Example
//!
//! ```
//! use raylane_core::{Material, SceneBuilder};
//! use raylane_math::{Color, Vec3};
//!
//! let mut builder = SceneBuilder::new(Material::emissive("sky", Color::new(0.5, 0.8, 1.0)));
//! let grey = builder.add_material(Material::diffuse("grey", Color::splat(0.6)));
//! builder.add_plane(Vec3::Z, 0.0, grey);
//! let world = builder.build().unwrap();
//! assert_eq!(world.planes().len(), 1);
//! ```

pub mod brdf;
pub mod description;
pub mod error;
pub mod scene;

// Re-export commonly used types
pub use brdf::{local_angles, BrdfTable, TangentFrame};
pub use description::SceneDescription;
pub use error::{Result, SceneError};
pub use scene::{reference_world, Material, Plane, SceneBuilder, Sphere, World, BACKGROUND_MATERIAL};
