//! Glint Core - image I/O for the glint path tracer.
//!
//! This crate provides:
//!
//! - **Texture images**: decoding image files into linear float pixels
//!   that image-mapped textures sample from
//! - **Output**: encoding rendered 8-bit pixels to PNG, PPM, or any other
//!   format the `image` crate infers from the file extension
//!
//! # Example
//!
//! ```ignore
//! use glint_core::{load_texture_image, write_rgb8};
//!
//! let earth = load_texture_image("res/earthmap.jpg")?;
//! println!("Loaded {}x{} texture", earth.width, earth.height);
//!
//! write_rgb8("out/render.png", width, height, &pixels)?;
//! ```

pub mod output;
pub mod texture;

pub use output::{write_rgb8, OutputError, OutputResult};
pub use texture::{load_texture_image, TextureError, TextureImage, TextureResult};
