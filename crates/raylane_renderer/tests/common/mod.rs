#![allow(dead_code)]

use raylane_core::{Material, SceneBuilder, World};
use raylane_renderer::{Color, Vec3};

pub const SKY: Color = Color::new(0.25, 0.5, 0.75);

/// Gray ground plane and a blue unit sphere resting on it, under a pale sky.
pub fn ground_and_sphere() -> World {
    let mut builder = SceneBuilder::new(Material::emissive("sky", SKY));
    let gray = builder.add_material(Material::diffuse("gray", Color::splat(0.5)));
    let blue = builder.add_material(Material::diffuse("blue", Color::new(0.2, 0.2, 0.9)));
    builder
        .add_plane(Vec3::Z, 0.0, gray)
        .add_sphere(Vec3::new(0.0, -1.0, 0.0), 1.0, blue);
    builder.build().unwrap()
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
