//! Render a scene to a PNG.
//!
//! ```text
//! cargo run --release --example render_scene -- [scene.json] [output.png]
//! ```
//!
//! Without a scene file the built-in reference scene is rendered.

use anyhow::Context;
use raylane_core::{reference_world, SceneDescription, World};
use raylane_renderer::{render, Camera, RenderConfig, LANE_WIDTH};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let scene_path = args.next();
    let output_path = args.next().unwrap_or_else(|| "render.png".to_string());

    let start = std::time::Instant::now();
    let world = load_world(scene_path.as_deref())?;
    log::info!("Scene ready in {:?}", start.elapsed());

    let config = RenderConfig::default();
    let camera = Camera::default();
    log::info!(
        "Rendering {}x{} @ {} rays/px with {}-wide lanes",
        config.width,
        config.height,
        config.rays_per_pixel,
        LANE_WIDTH
    );

    let output = render(&world, &camera, &config)?;
    log::info!(
        "{} tiles, {} bounces in {:.2?}",
        output.tiles,
        output.total_bounces,
        output.elapsed
    );

    let image = &output.image;
    image::save_buffer(
        &output_path,
        &image.to_rgba(),
        image.width,
        image.height,
        image::ColorType::Rgba8,
    )
    .with_context(|| format!("Failed to save {output_path}"))?;
    log::info!("Saved to {output_path}");

    Ok(())
}

fn load_world(path: Option<&str>) -> anyhow::Result<World> {
    let Some(path) = path else {
        return Ok(reference_world());
    };
    let text = std::fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))?;
    let world = SceneDescription::from_json(&text)?.to_world()?;
    Ok(world)
}
