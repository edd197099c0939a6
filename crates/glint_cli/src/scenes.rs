//! Built-in demo scenes.

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use glint_renderer::sampling::{gen_f32, gen_range_f32};
use glint_renderer::{
    make_box, Background, BvhNode, Camera, CheckerTexture, Color, Dielectric, DiffuseLight, Hittable, HittableList,
    ImageTexture, Lambertian, Material, Metal, Quad, RotateY, Sphere, Translate, Vec3,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// A world plus the camera that frames it.
pub struct Scene {
    pub world: HittableList,
    pub camera: Camera,
}

/// The scenes selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneKind {
    CornellBox,
    Quads,
    BouncingSpheres,
    Earth,
    SimpleLight,
}

impl SceneKind {
    pub const NAMES: [&'static str; 5] = ["cornell-box", "quads", "bouncing-spheres", "earth", "simple-light"];

    pub fn name(self) -> &'static str {
        match self {
            SceneKind::CornellBox => "cornell-box",
            SceneKind::Quads => "quads",
            SceneKind::BouncingSpheres => "bouncing-spheres",
            SceneKind::Earth => "earth",
            SceneKind::SimpleLight => "simple-light",
        }
    }

    /// Build the scene. `seed` drives the random sphere field, `texture` is
    /// the earth map.
    pub fn build(self, seed: u64, texture: &Path) -> Scene {
        let scene = match self {
            SceneKind::CornellBox => cornell_box(),
            SceneKind::Quads => quads(),
            SceneKind::BouncingSpheres => bouncing_spheres(seed),
            SceneKind::Earth => earth(texture),
            SceneKind::SimpleLight => simple_light(),
        };
        log::info!("Built scene '{}' with {} top-level objects", self.name(), scene.world.len());
        scene
    }
}

impl FromStr for SceneKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cornell-box" => Ok(SceneKind::CornellBox),
            "quads" => Ok(SceneKind::Quads),
            "bouncing-spheres" => Ok(SceneKind::BouncingSpheres),
            "earth" => Ok(SceneKind::Earth),
            "simple-light" => Ok(SceneKind::SimpleLight),
            other => Err(format!("unknown scene '{}' (expected one of: {})", other, Self::NAMES.join(", "))),
        }
    }
}

impl fmt::Display for SceneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn quad(q: Vec3, u: Vec3, v: Vec3, material: &Arc<dyn Material>) -> Arc<dyn Hittable> {
    Arc::new(Quad::new(q, u, v, material.clone()))
}

fn lambertian(albedo: Color) -> Arc<dyn Material> {
    Arc::new(Lambertian::new(albedo))
}

/// The Cornell box: five walls, a ceiling light and two rotated boxes.
pub fn cornell_box() -> Scene {
    let red = lambertian(Color::new(0.65, 0.05, 0.05));
    let white = lambertian(Color::splat(0.73));
    let green = lambertian(Color::new(0.12, 0.45, 0.15));
    let light: Arc<dyn Material> = Arc::new(DiffuseLight::new(Color::splat(15.0)));

    let mut world = HittableList::new();
    world.add(quad(Vec3::new(555.0, 0.0, 0.0), Vec3::new(0.0, 555.0, 0.0), Vec3::new(0.0, 0.0, 555.0), &green));
    world.add(quad(Vec3::ZERO, Vec3::new(0.0, 555.0, 0.0), Vec3::new(0.0, 0.0, 555.0), &red));
    world.add(quad(
        Vec3::new(343.0, 554.0, 332.0),
        Vec3::new(-130.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, -105.0),
        &light,
    ));
    world.add(quad(Vec3::ZERO, Vec3::new(555.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 555.0), &white));
    world.add(quad(Vec3::splat(555.0), Vec3::new(-555.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -555.0), &white));
    world.add(quad(Vec3::new(0.0, 0.0, 555.0), Vec3::new(555.0, 0.0, 0.0), Vec3::new(0.0, 555.0, 0.0), &white));

    let box1: Arc<dyn Hittable> = Arc::new(make_box(Vec3::ZERO, Vec3::new(165.0, 330.0, 165.0), white.clone()));
    let box1: Arc<dyn Hittable> = Arc::new(RotateY::new(box1, 15.0));
    world.add(Arc::new(Translate::new(box1, Vec3::new(265.0, 0.0, 295.0))));

    let box2: Arc<dyn Hittable> = Arc::new(make_box(Vec3::ZERO, Vec3::splat(165.0), white));
    let box2: Arc<dyn Hittable> = Arc::new(RotateY::new(box2, -18.0));
    world.add(Arc::new(Translate::new(box2, Vec3::new(130.0, 0.0, 65.0))));

    let camera = Camera::new()
        .with_resolution(400, 1.0)
        .with_quality(50, 5)
        .with_position(Vec3::new(278.0, 278.0, -800.0), Vec3::new(278.0, 278.0, 0.0), Vec3::Y)
        .with_lens(40.0, 0.0, 10.0)
        .with_background(Background::Solid(Color::ZERO));

    Scene { world, camera }
}

/// Five colored quads forming an open box around the camera's view.
pub fn quads() -> Scene {
    let left_red = lambertian(Color::new(1.0, 0.2, 0.2));
    let back_green = lambertian(Color::new(0.2, 1.0, 0.2));
    let right_blue = lambertian(Color::new(0.2, 0.2, 1.0));
    let upper_orange = lambertian(Color::new(1.0, 0.5, 0.0));
    let lower_teal = lambertian(Color::new(0.2, 0.8, 0.8));

    let mut world = HittableList::new();
    world.add(quad(Vec3::new(-3.0, -2.0, 5.0), Vec3::new(0.0, 0.0, -4.0), Vec3::new(0.0, 4.0, 0.0), &left_red));
    world.add(quad(Vec3::new(-2.0, -2.0, 0.0), Vec3::new(4.0, 0.0, 0.0), Vec3::new(0.0, 4.0, 0.0), &back_green));
    world.add(quad(Vec3::new(3.0, -2.0, 1.0), Vec3::new(0.0, 0.0, 4.0), Vec3::new(0.0, 4.0, 0.0), &right_blue));
    world.add(quad(Vec3::new(-2.0, 3.0, 1.0), Vec3::new(4.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 4.0), &upper_orange));
    world.add(quad(Vec3::new(-2.0, -3.0, 5.0), Vec3::new(4.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -4.0), &lower_teal));

    let camera = Camera::new()
        .with_resolution(400, 1.0)
        .with_quality(100, 50)
        .with_position(Vec3::new(0.0, 0.0, 9.0), Vec3::ZERO, Vec3::Y)
        .with_lens(80.0, 0.0, 10.0)
        .with_background(Background::sky());

    Scene { world, camera }
}

/// Random small spheres on a checkered ground around three large ones.
///
/// The sphere layout is a pure function of `seed`.
pub fn bouncing_spheres(seed: u64) -> Scene {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut objects: Vec<Arc<dyn Hittable>> = Vec::new();

    let checker = Arc::new(CheckerTexture::from_colors(
        0.32,
        Color::new(0.2, 0.3, 0.1),
        Color::new(0.9, 0.9, 0.9),
    ));
    objects.push(Arc::new(Sphere::new(
        Vec3::new(0.0, -1000.0, 0.0),
        1000.0,
        Arc::new(Lambertian::with_texture(checker)),
    )));

    let glass: Arc<dyn Material> = Arc::new(Dielectric::new(1.5));

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = gen_f32(&mut rng);
            let center = Vec3::new(
                a as f32 + 0.9 * gen_f32(&mut rng),
                0.2,
                b as f32 + 0.9 * gen_f32(&mut rng),
            );

            if (center - Vec3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let material: Arc<dyn Material> = if choose_mat < 0.8 {
                // diffuse
                let albedo = random_color(&mut rng, 0.0, 1.0) * random_color(&mut rng, 0.0, 1.0);
                lambertian(albedo)
            } else if choose_mat < 0.95 {
                // metal
                let albedo = random_color(&mut rng, 0.5, 1.0);
                let fuzz = gen_range_f32(&mut rng, 0.0, 0.5);
                Arc::new(Metal::new(albedo, fuzz))
            } else {
                glass.clone()
            };
            objects.push(Arc::new(Sphere::new(center, 0.2, material)));
        }
    }

    objects.push(Arc::new(Sphere::new(Vec3::new(0.0, 1.0, 0.0), 1.0, glass)));
    objects.push(Arc::new(Sphere::new(
        Vec3::new(-4.0, 1.0, 0.0),
        1.0,
        lambertian(Color::new(0.4, 0.2, 0.1)),
    )));
    objects.push(Arc::new(Sphere::new(
        Vec3::new(4.0, 1.0, 0.0),
        1.0,
        Arc::new(Metal::new(Color::new(0.7, 0.6, 0.5), 0.0)),
    )));

    let world = HittableList::with_object(Arc::new(BvhNode::new(objects)));

    let camera = Camera::new()
        .with_resolution(400, 16.0 / 9.0)
        .with_quality(10, 10)
        .with_position(Vec3::new(13.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.6, 10.0)
        .with_background(Background::sky());

    Scene { world, camera }
}

fn random_color(rng: &mut StdRng, min: f32, max: f32) -> Color {
    Color::new(
        gen_range_f32(rng, min, max),
        gen_range_f32(rng, min, max),
        gen_range_f32(rng, min, max),
    )
}

/// A globe wrapped in an image texture. A missing image renders cyan.
pub fn earth(texture: &Path) -> Scene {
    let earth_texture = Arc::new(ImageTexture::open(texture));
    let earth_surface = Arc::new(Lambertian::with_texture(earth_texture));
    let globe = Arc::new(Sphere::new(Vec3::ZERO, 2.0, earth_surface));

    let camera = Camera::new()
        .with_resolution(400, 16.0 / 9.0)
        .with_quality(100, 50)
        .with_position(Vec3::new(0.0, 0.0, 12.0), Vec3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.0, 10.0)
        .with_background(Background::sky());

    Scene {
        world: HittableList::with_object(globe),
        camera,
    }
}

/// Two spheres lit only by a quad light and a sphere light.
pub fn simple_light() -> Scene {
    let checker = Arc::new(CheckerTexture::from_colors(
        1.0,
        Color::new(0.2, 0.3, 0.1),
        Color::new(0.9, 0.9, 0.9),
    ));
    let light: Arc<dyn Material> = Arc::new(DiffuseLight::new(Color::splat(4.0)));

    let mut world = HittableList::new();
    world.add(Arc::new(Sphere::new(
        Vec3::new(0.0, -1000.0, 0.0),
        1000.0,
        Arc::new(Lambertian::with_texture(checker)),
    )));
    world.add(Arc::new(Sphere::new(
        Vec3::new(0.0, 2.0, 0.0),
        2.0,
        lambertian(Color::new(0.7, 0.5, 0.3)),
    )));
    world.add(quad(Vec3::new(3.0, 1.0, -2.0), Vec3::new(2.0, 0.0, 0.0), Vec3::new(0.0, 2.0, 0.0), &light));
    world.add(Arc::new(Sphere::new(Vec3::new(0.0, 7.0, 0.0), 2.0, light)));

    let camera = Camera::new()
        .with_resolution(400, 16.0 / 9.0)
        .with_quality(100, 50)
        .with_position(Vec3::new(26.0, 3.0, 6.0), Vec3::new(0.0, 2.0, 0.0), Vec3::Y)
        .with_lens(20.0, 0.0, 10.0)
        .with_background(Background::Solid(Color::ZERO));

    Scene { world, camera }
}
