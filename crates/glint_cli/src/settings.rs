//! JSON render settings: optional overrides of a scene's camera.

use std::fs;
use std::path::Path;

use anyhow::{ensure, Context, Result};
use glint_renderer::{Background, Camera, Color, Vec3};
use serde::Deserialize;

/// Background as written in a settings file.
///
/// `"sky"`, `{ "solid": [r, g, b] }` or
/// `{ "gradient": { "horizon": [r, g, b], "zenith": [r, g, b] } }`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackgroundSettings {
    Sky,
    Solid([f32; 3]),
    Gradient { horizon: [f32; 3], zenith: [f32; 3] },
}

impl From<BackgroundSettings> for Background {
    fn from(settings: BackgroundSettings) -> Self {
        match settings {
            BackgroundSettings::Sky => Background::sky(),
            BackgroundSettings::Solid(c) => Background::Solid(Color::from_array(c)),
            BackgroundSettings::Gradient { horizon, zenith } => Background::Gradient {
                horizon: Color::from_array(horizon),
                zenith: Color::from_array(zenith),
            },
        }
    }
}

/// Camera overrides; every field is optional and absent fields keep the
/// scene's value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderSettings {
    pub image_width: Option<u32>,
    pub aspect_ratio: Option<f32>,
    pub samples_per_pixel: Option<u32>,
    pub max_depth: Option<u32>,
    pub vfov: Option<f32>,
    pub look_from: Option<[f32; 3]>,
    pub look_at: Option<[f32; 3]>,
    pub vup: Option<[f32; 3]>,
    pub defocus_angle: Option<f32>,
    pub focus_dist: Option<f32>,
    pub background: Option<BackgroundSettings>,
}

impl RenderSettings {
    /// Read settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        let settings = Self::from_json(&text)
            .with_context(|| format!("Failed to parse settings file {}", path.display()))?;
        log::info!("Loaded render settings from {}", path.display());
        Ok(settings)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the camera cannot build a viewport from.
    pub fn validate(&self) -> Result<()> {
        if let Some(aspect_ratio) = self.aspect_ratio {
            ensure!(
                aspect_ratio.is_finite() && aspect_ratio > 0.0,
                "aspect_ratio must be a positive number, got {}",
                aspect_ratio
            );
        }
        if let Some(vfov) = self.vfov {
            ensure!(
                vfov.is_finite() && vfov > 0.0 && vfov < 180.0,
                "vfov must lie strictly between 0 and 180 degrees, got {}",
                vfov
            );
        }
        if let Some(focus_dist) = self.focus_dist {
            ensure!(
                focus_dist.is_finite() && focus_dist > 0.0,
                "focus_dist must be a positive number, got {}",
                focus_dist
            );
        }
        if let Some(defocus_angle) = self.defocus_angle {
            ensure!(
                defocus_angle.is_finite() && defocus_angle >= 0.0,
                "defocus_angle must be zero or positive, got {}",
                defocus_angle
            );
        }
        Ok(())
    }

    /// Overwrite the camera fields this file sets.
    pub fn apply(&self, camera: &mut Camera) -> Result<()> {
        self.validate()?;
        if let Some(width) = self.image_width {
            camera.image_width = width;
        }
        if let Some(aspect_ratio) = self.aspect_ratio {
            camera.aspect_ratio = aspect_ratio;
        }
        if let Some(samples) = self.samples_per_pixel {
            camera.samples_per_pixel = samples;
        }
        if let Some(max_depth) = self.max_depth {
            camera.max_depth = max_depth;
        }
        if let Some(vfov) = self.vfov {
            camera.vfov = vfov;
        }
        if let Some(look_from) = self.look_from {
            camera.look_from = Vec3::from_array(look_from);
        }
        if let Some(look_at) = self.look_at {
            camera.look_at = Vec3::from_array(look_at);
        }
        if let Some(vup) = self.vup {
            camera.vup = Vec3::from_array(vup);
        }
        if let Some(defocus_angle) = self.defocus_angle {
            camera.defocus_angle = defocus_angle;
        }
        if let Some(focus_dist) = self.focus_dist {
            camera.focus_dist = focus_dist;
        }
        if let Some(background) = self.background {
            camera.background = background.into();
        }
        Ok(())
    }
}
