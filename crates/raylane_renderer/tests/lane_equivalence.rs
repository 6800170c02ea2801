//! The 1-wide and 4-wide backends trace the same paths.

mod common;

use raylane_core::reference_world;
use raylane_renderer::{
    cast_sample_rays, render_with_lanes, tile_seed, Camera, Color, F32x4, RandomSeries, RenderConfig, SampleParams,
    Shading,
};

fn close(a: Color, b: Color) -> bool {
    (a - b).length() <= 1e-5 * (1.0 + a.length())
}

#[test]
fn test_wide_lanes_match_scalar_rays() {
    let world = reference_world();
    let film = Camera::default().film(32, 32).unwrap();

    for (px, py) in [(0, 0), (16, 16), (5, 27), (31, 20), (24, 12), (9, 18)] {
        let seeds: Vec<u32> = (0..4).map(|lane| tile_seed(lane, px, py)).collect();
        let position = film.pixel_position(px, py);

        let wide_params = SampleParams {
            rays_per_pixel: 4,
            max_bounces: 8,
            shading: Shading::Cosine,
        };
        let mut wide_rng = RandomSeries::<F32x4>::from_seeds(&seeds);
        let wide = cast_sample_rays(&world, &film, position, &wide_params, &mut wide_rng);

        let scalar_params = SampleParams {
            rays_per_pixel: 1,
            ..wide_params
        };
        let mut color_sum = Color::ZERO;
        let mut bounces = 0;
        for &seed in &seeds {
            let mut rng = RandomSeries::<f32>::new(seed);
            let one = cast_sample_rays(&world, &film, position, &scalar_params, &mut rng);
            color_sum += one.color;
            bounces += one.bounces;
        }
        let scalar = color_sum * 0.25;

        assert!(
            close(wide.color, scalar),
            "pixel ({px}, {py}): wide {:?} vs scalar {:?}",
            wide.color,
            scalar
        );
        assert_eq!(wide.bounces, bounces, "pixel ({px}, {py})");
    }
}

#[test]
fn test_widths_agree_statistically() {
    common::init_logging();
    let world = common::ground_and_sphere();
    let camera = Camera::default();
    let config = RenderConfig::default()
        .with_resolution(24, 24)
        .with_quality(16, 6)
        .with_tile_size(8);

    let scalar = render_with_lanes::<f32>(&world, &camera, &config).unwrap();
    let wide = render_with_lanes::<F32x4>(&world, &camera, &config).unwrap();

    let a = scalar.image.average();
    let b = wide.image.average();
    for channel in 0..3 {
        let relative = (a[channel] - b[channel]).abs() / a[channel].max(1e-3);
        assert!(relative < 0.05, "channel {channel}: {a:?} vs {b:?}");
    }

    let bounce_ratio = scalar.total_bounces as f64 / wide.total_bounces as f64;
    assert!((bounce_ratio - 1.0).abs() < 0.05, "bounces {} vs {}", scalar.total_bounces, wide.total_bounces);
}
