//! Writing rendered images to disk.

use std::path::Path;

use thiserror::Error;

/// Errors that can occur while writing an image.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error writing {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Image encoding error: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Pixel buffer holds {actual} bytes, expected {expected} for {width}x{height} RGB")]
    BufferSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

pub type OutputResult<T> = Result<T, OutputError>;

/// Write an 8-bit RGB buffer (row-major, top row first) to `path`.
///
/// The file format follows the extension (`.png`, `.ppm`, `.jpg`, ...).
/// Missing parent directories are created.
pub fn write_rgb8(path: impl AsRef<Path>, width: u32, height: u32, rgb: &[u8]) -> OutputResult<()> {
    let path = path.as_ref();

    let expected = width as usize * height as usize * 3;
    if rgb.len() != expected {
        return Err(OutputError::BufferSize {
            width,
            height,
            expected,
            actual: rgb.len(),
        });
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| OutputError::Io {
            path: parent.display().to_string(),
            source,
        })?;
    }

    image::save_buffer(path, rgb, width, height, image::ColorType::Rgb8)?;

    log::info!("Wrote {}x{} image to {}", width, height, path.display());
    Ok(())
}
