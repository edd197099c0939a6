mod scenes;
mod settings;

use std::path::PathBuf;

use anyhow::{Context, Result};
use glint_renderer::{Camera, RenderConfig, DEFAULT_BUCKET_SIZE};
use structopt::StructOpt;

use scenes::SceneKind;
use settings::RenderSettings;

/// Offline Monte Carlo path tracer.
#[derive(Debug, StructOpt)]
#[structopt(name = "glint")]
struct Opt {
    /// Scene to render
    #[structopt(long, default_value = "cornell-box", possible_values = &SceneKind::NAMES)]
    scene: SceneKind,

    /// Output image; the format follows the extension (png, ppm, ...)
    #[structopt(short, long, parse(from_os_str), default_value = "output.png")]
    output: PathBuf,

    /// Image width in pixels
    #[structopt(long)]
    width: Option<u32>,

    /// Samples per pixel
    #[structopt(long)]
    samples: Option<u32>,

    /// Maximum bounces per path
    #[structopt(long)]
    max_depth: Option<u32>,

    /// Seed for pixel sampling and random scene layout
    #[structopt(long, default_value = "0")]
    seed: u64,

    /// Worker threads (defaults to one per core)
    #[structopt(long)]
    threads: Option<usize>,

    /// Bucket edge length in pixels
    #[structopt(long, default_value = "64")]
    bucket_size: u32,

    /// Render row by row on the main thread
    #[structopt(long)]
    single_threaded: bool,

    /// Image map for the earth scene
    #[structopt(long, parse(from_os_str), default_value = "res/earthmap.jpg")]
    texture: PathBuf,

    /// JSON file of camera overrides
    #[structopt(long, parse(from_os_str))]
    settings: Option<PathBuf>,
}

impl Opt {
    /// Command line flags take precedence over the settings file.
    fn apply_overrides(&self, camera: &mut Camera) {
        if let Some(width) = self.width {
            camera.image_width = width;
        }
        if let Some(samples) = self.samples {
            camera.samples_per_pixel = samples;
        }
        if let Some(max_depth) = self.max_depth {
            camera.max_depth = max_depth;
        }
    }

    fn render_config(&self) -> RenderConfig {
        RenderConfig {
            seed: self.seed,
            bucket_size: if self.bucket_size == 0 { DEFAULT_BUCKET_SIZE } else { self.bucket_size },
            parallel: !self.single_threaded,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let opt = Opt::from_args();

    if let Some(threads) = opt.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure the render thread pool")?;
    }

    let mut scene = opt.scene.build(opt.seed, &opt.texture);

    if let Some(path) = &opt.settings {
        RenderSettings::load(path)?.apply(&mut scene.camera)?;
    }
    opt.apply_overrides(&mut scene.camera);

    let image = scene.camera.render(&scene.world, &opt.render_config());

    glint_core::write_rgb8(&opt.output, image.width, image.height, &image.to_rgb8())
        .with_context(|| format!("Failed to write {}", opt.output.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opt = Opt::from_iter(["glint"]);
        assert_eq!(opt.scene, SceneKind::CornellBox);
        assert_eq!(opt.output, PathBuf::from("output.png"));
        assert_eq!(opt.seed, 0);

        let config = opt.render_config();
        assert!(config.parallel);
        assert_eq!(config.bucket_size, 64);
    }

    #[test]
    fn test_flags_override_settings() {
        let opt = Opt::from_iter([
            "glint",
            "--scene",
            "quads",
            "--width",
            "64",
            "--samples",
            "2",
            "--single-threaded",
            "--bucket-size",
            "0",
        ]);
        assert_eq!(opt.scene, SceneKind::Quads);

        let mut camera = Camera::new();
        RenderSettings::from_json(r#"{ "image_width": 500, "samples_per_pixel": 9, "max_depth": 4 }"#)
            .unwrap()
            .apply(&mut camera)
            .unwrap();
        opt.apply_overrides(&mut camera);

        assert_eq!(camera.image_width, 64);
        assert_eq!(camera.samples_per_pixel, 2);
        // Not given on the command line: the file's value stands
        assert_eq!(camera.max_depth, 4);

        let config = opt.render_config();
        assert!(!config.parallel);
        assert_eq!(config.bucket_size, DEFAULT_BUCKET_SIZE);
    }

    #[test]
    fn test_unknown_scene_is_rejected() {
        assert!(Opt::from_iter_safe(["glint", "--scene", "teapot"]).is_err());
    }
}
