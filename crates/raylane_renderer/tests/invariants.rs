mod common;

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use raylane_core::{Material, SceneBuilder, World};
use raylane_renderer::{
    generate_tiles, render, render_pixel, render_with_lanes, Camera, Color, F32x4, RandomSeries, RayonPool,
    RenderConfig, SampleParams, Shading, Vec3, WorkOrder, WorkQueue, WorkerPool,
};

#[test]
fn test_empty_scene_is_background() {
    common::init_logging();
    let world = World::empty(common::SKY);
    let camera = Camera::default();
    let config = RenderConfig::default()
        .with_resolution(40, 24)
        .with_quality(8, 4)
        .with_tile_size(16);

    for output in [
        render_with_lanes::<f32>(&world, &camera, &config).unwrap(),
        render_with_lanes::<F32x4>(&world, &camera, &config).unwrap(),
    ] {
        assert!(output.image.pixels.iter().all(|&c| c == common::SKY));
        assert_eq!(output.total_bounces, 0);
    }
}

#[test]
fn test_emitter_facing_camera() {
    // Plane y = 5 facing the camera, on a black background
    let emission = Color::new(4.0, 2.0, 1.0);
    let mut builder = SceneBuilder::new(Material::emissive("void", Color::ZERO));
    let light = builder.add_material(Material::emissive("light", emission));
    builder.add_plane(-Vec3::Y, 5.0, light);
    let world = builder.build().unwrap();

    let config = RenderConfig::default().with_resolution(16, 16).with_quality(8, 4);
    let output = render(&world, &Camera::default(), &config).unwrap();

    for color in &output.image.pixels {
        assert!((*color - emission).length() < 1e-5, "{color:?}");
    }
    // Every ray hits the emitter once, then leaves into the void
    assert_eq!(output.total_bounces, 16 * 16 * 8);
}

#[test]
fn test_ground_and_sphere_scenario() {
    common::init_logging();
    let world = common::ground_and_sphere();
    let camera = Camera::default();
    let config = RenderConfig::default().with_resolution(32, 32).with_quality(64, 8);

    let output = render(&world, &camera, &config).unwrap();
    let image = &output.image;

    // Upper rows look past everything into the sky
    for y in 0..4 {
        for x in 0..32 {
            let color = image.get(x, y);
            assert!((color - common::SKY).length() < 1e-5, "({x}, {y}): {color:?}");
        }
    }

    let center = image.get(16, 16);
    assert!(center.z > center.x, "center {center:?}");
    assert!(output.total_bounces > 0);

    // The center pixel sees the sphere
    let film = camera.film(32, 32).unwrap();
    let params = SampleParams {
        rays_per_pixel: 64,
        max_bounces: 8,
        shading: Shading::Cosine,
    };
    let mut rng = RandomSeries::<F32x4>::for_tile(0, 0);
    let pixel = render_pixel(&world, &film, 16, 16, &params, &mut rng);
    assert!(pixel.bounces >= 64);
    assert!(pixel.color.z > pixel.color.x);
}

#[test]
fn test_tiles_cover_image_once() {
    for (width, height, tile_size) in [(64, 64, 64), (100, 37, 16), (1, 1, 64), (130, 7, 3)] {
        let tiles = generate_tiles(width, height, tile_size);
        let mut coverage = vec![0_u8; (width * height) as usize];
        for tile in &tiles {
            assert!(tile.width() <= tile_size && tile.height() <= tile_size);
            for y in tile.min_y..tile.max_y {
                for x in tile.min_x..tile.max_x {
                    coverage[(y * width + x) as usize] += 1;
                }
            }
        }
        assert!(coverage.iter().all(|&n| n == 1), "{width}x{height} / {tile_size}");
    }
}

#[test]
fn test_tiles_claimed_exactly_once() {
    let world = World::empty(Color::ONE);
    let film = Camera::default().film(200, 120).unwrap();
    let params = SampleParams {
        rays_per_pixel: 4,
        max_bounces: 1,
        shading: Shading::Cosine,
    };
    let orders: Vec<WorkOrder<F32x4>> = generate_tiles(200, 120, 5).into_iter().map(WorkOrder::new).collect();
    let queue = WorkQueue::new(&world, film, params, orders);

    let claims: Vec<AtomicU32> = (0..queue.orders().len()).map(|_| AtomicU32::new(0)).collect();
    let per_worker = Mutex::new(Vec::new());

    let pool = RayonPool::new(8).unwrap();
    pool.run(8, &|_worker: usize| {
        let mut count = 0;
        while let Some(index) = queue.claim_next_index() {
            claims[index].fetch_add(1, Ordering::Relaxed);
            queue.report_tile_done(0);
            count += 1;
        }
        per_worker.lock().unwrap().push(count);
    });

    assert!(claims.iter().all(|c| c.load(Ordering::Relaxed) == 1));
    assert_eq!(per_worker.into_inner().unwrap().iter().sum::<usize>(), claims.len());
    assert!(queue.progress().is_complete());
    assert!(queue.claim_next().is_none());
}
