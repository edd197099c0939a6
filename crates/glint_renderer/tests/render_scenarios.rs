//! End-to-end render scenarios over small scenes.

use std::sync::Arc;

use glint_renderer::{
    make_box, render_pixel, Background, BvhNode, Camera, Color, Dielectric, DiffuseLight, Hittable, HittableList,
    Lambertian, Material, Metal, Quad, RenderConfig, RotateY, Sphere, Translate, Vec3,
};

fn sequential(seed: u64) -> RenderConfig {
    RenderConfig {
        seed,
        parallel: false,
        ..RenderConfig::default()
    }
}

/// A quad light filling the middle of the frame against a black background.
fn quad_light_scene() -> (HittableList, Camera) {
    let mut world = HittableList::new();
    world.add(Arc::new(Quad::new(
        Vec3::new(-1.0, -1.0, -2.0),
        Vec3::new(2.0, 0.0, 0.0),
        Vec3::new(0.0, 2.0, 0.0),
        Arc::new(DiffuseLight::new(Color::new(4.0, 3.0, 2.0))),
    )));

    let camera = Camera::new()
        .with_resolution(24, 1.0)
        .with_quality(8, 10)
        .with_position(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
        .with_lens(90.0, 0.0, 1.0)
        .with_background(Background::Solid(Color::ZERO));

    (world, camera)
}

/// A reduced cornell box with every material and transform in it.
fn small_cornell() -> (BvhNode, Camera) {
    let red: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.65, 0.05, 0.05)));
    let white: Arc<dyn Material> = Arc::new(Lambertian::new(Color::splat(0.73)));
    let green: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.12, 0.45, 0.15)));
    let light: Arc<dyn Material> = Arc::new(DiffuseLight::new(Color::splat(15.0)));

    let quad = |q: Vec3, u: Vec3, v: Vec3, material: &Arc<dyn Material>| -> Arc<dyn Hittable> {
        Arc::new(Quad::new(q, u, v, material.clone()))
    };

    let mut world = HittableList::new();
    world.add(quad(Vec3::new(555.0, 0.0, 0.0), 555.0 * Vec3::Y, 555.0 * Vec3::Z, &green));
    world.add(quad(Vec3::ZERO, 555.0 * Vec3::Y, 555.0 * Vec3::Z, &red));
    world.add(quad(Vec3::new(343.0, 554.0, 332.0), -130.0 * Vec3::X, -105.0 * Vec3::Z, &light));
    world.add(quad(Vec3::ZERO, 555.0 * Vec3::X, 555.0 * Vec3::Z, &white));
    world.add(quad(Vec3::splat(555.0), -555.0 * Vec3::X, -555.0 * Vec3::Z, &white));
    world.add(quad(Vec3::new(0.0, 0.0, 555.0), 555.0 * Vec3::X, 555.0 * Vec3::Y, &white));

    let tall: Arc<dyn Hittable> = Arc::new(make_box(Vec3::ZERO, Vec3::new(165.0, 330.0, 165.0), white));
    let tall: Arc<dyn Hittable> = Arc::new(RotateY::new(tall, 15.0));
    world.add(Arc::new(Translate::new(tall, Vec3::new(265.0, 0.0, 295.0))));

    world.add(Arc::new(Sphere::new(Vec3::new(190.0, 90.0, 190.0), 90.0, Arc::new(Dielectric::new(1.5)))));
    world.add(Arc::new(Sphere::new(
        Vec3::new(400.0, 60.0, 120.0),
        60.0,
        Arc::new(Metal::new(Color::new(0.8, 0.85, 0.88), 0.1)),
    )));

    let camera = Camera::new()
        .with_resolution(20, 1.5)
        .with_quality(3, 5)
        .with_position(Vec3::new(278.0, 278.0, -800.0), Vec3::new(278.0, 278.0, 0.0), Vec3::Y)
        .with_lens(40.0, 0.0, 10.0);

    (BvhNode::from_list(world), camera)
}

#[test]
fn quad_light_pixels_are_emission_background_or_mix() {
    let (world, mut camera) = quad_light_scene();
    let emission = Color::new(4.0, 3.0, 2.0);
    let image = camera.render(&world, &sequential(3));

    assert_eq!((image.width, image.height), (24, 24));
    for color in &image.pixels {
        assert!(color.is_finite(), "non-finite pixel {:?}", color);
        assert!(color.min_element() >= 0.0, "negative pixel {:?}", color);
        // Any mix of emission and black is a scalar multiple of the emission
        let fraction = color.x / emission.x;
        assert!(fraction <= 1.0 + 1e-5);
        assert!((*color - fraction * emission).length() < 1e-4, "pixel {:?}", color);
    }

    // Center sees only the light, the corner only the background
    assert!((image.get(12, 12) - emission).length() < 1e-4);
    assert_eq!(image.get(0, 0), Color::ZERO);
}

#[test]
fn zero_max_depth_renders_black() {
    let (world, mut camera) = small_cornell();
    camera.max_depth = 0;
    camera.background = Background::sky();

    let image = camera.render(&world, &RenderConfig::default());
    assert!(image.pixels.iter().all(|c| *c == Color::ZERO));
    assert!(image.to_rgb8().iter().all(|b| *b == 0));
}

#[test]
fn more_samples_reduce_variance() {
    let mut world = HittableList::new();
    world.add(Arc::new(Sphere::new(
        Vec3::new(0.0, 0.0, -1.0),
        0.5,
        Arc::new(Lambertian::new(Color::splat(0.5))),
    )));
    world.add(Arc::new(Sphere::new(
        Vec3::new(0.0, -100.5, -1.0),
        100.0,
        Arc::new(Lambertian::new(Color::splat(0.5))),
    )));

    let stats = |samples: u32| {
        let mut camera = Camera::new()
            .with_resolution(16, 1.0)
            .with_quality(samples, 10)
            .with_lens(90.0, 0.0, 1.0)
            .with_background(Background::sky());
        camera.initialize();

        let values: Vec<f32> = (0..200)
            .map(|seed| render_pixel(&camera, &world, 8, 9, seed).x)
            .collect();
        let mean = values.iter().sum::<f32>() / values.len() as f32;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f32>() / values.len() as f32;
        (mean, variance)
    };

    let (mean_low, var_low) = stats(1);
    let (mean_high, var_high) = stats(32);

    assert!(var_high < var_low, "variance {} vs {}", var_high, var_low);
    assert!(var_high < var_low / 4.0);
    // Both estimate the same pixel
    assert!((mean_high - mean_low).abs() < 0.1, "means {} vs {}", mean_high, mean_low);
    assert!(mean_high > 0.0 && mean_high < 1.0);
}

#[test]
fn sequential_and_parallel_renders_match() {
    let (world, camera) = small_cornell();

    let mut seq_camera = camera.clone();
    let mut par_camera = camera;

    let seq = seq_camera.render(&world, &sequential(11));
    let par = par_camera.render(
        &world,
        &RenderConfig {
            seed: 11,
            bucket_size: 7,
            parallel: true,
        },
    );

    assert_eq!((seq.width, seq.height), (20, 13));
    assert_eq!(seq, par);

    // A different seed changes the noise
    let other = seq_camera.render(&world, &sequential(12));
    assert_ne!(seq, other);
}

#[test]
fn renders_are_reproducible_per_seed() {
    let (world, mut camera) = quad_light_scene();
    camera.background = Background::sky();

    let a = camera.render(&world, &RenderConfig::default());
    let b = camera.render(&world, &RenderConfig::default());
    assert_eq!(a.to_rgb8(), b.to_rgb8());
}
