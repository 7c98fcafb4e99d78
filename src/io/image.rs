//! Seed pattern loading and result export through the `image` crate

use crate::algorithm::executor::Wave;
use crate::io::error::{AlgorithmError, Result};
use image::{Rgba, RgbaImage};
use std::path::Path;

/// RGBA pixel value used as the tile payload for images
pub type Color = [u8; 4];

/// Row-major pixel buffer decoded from a seed image
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
    /// Pixels in row-major order
    pub pixels: Vec<Color>,
    /// Width in pixels
    pub width: usize,
    /// Height in pixels
    pub height: usize,
}

/// Load a seed image as an RGBA pattern
///
/// Any format the `image` crate decodes is accepted.
///
/// # Errors
///
/// Returns an error if:
/// - The file at the given path cannot be opened or read
/// - The file is not a valid image format
pub fn load_pattern(path: &Path) -> Result<Pattern> {
    let img = image::open(path).map_err(|e| AlgorithmError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    let rgba_img = img.to_rgba8();
    let (width, height) = (rgba_img.width() as usize, rgba_img.height() as usize);
    let pixels = rgba_img.pixels().map(|pixel| pixel.0).collect();

    Ok(Pattern {
        pixels,
        width,
        height,
    })
}

/// Export a solved wave as an image, one pixel per cell
///
/// # Errors
///
/// Returns an error if:
/// - Any cell does not hold exactly one tile
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_wave(wave: &Wave<Color>, path: &Path) -> Result<()> {
    let pixels = wave.render().ok_or_else(|| AlgorithmError::Unsolved {
        remaining: wave
            .field()
            .cells()
            .iter()
            .filter(|cell| !cell.is_single())
            .count(),
    })?;

    let width = wave.width() as u32;
    let height = wave.height() as u32;
    let mut img = RgbaImage::new(width, height);
    for (pixel, color) in img.pixels_mut().zip(pixels) {
        *pixel = Rgba(color);
    }

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(path).map_err(|e| AlgorithmError::ImageExport {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}
