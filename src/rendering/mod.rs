//! Rendering: display list, text placement, rasterization and PNG output

pub mod layout;
pub mod paint;
pub mod raster;

use std::fs;
use std::path::Path;

use image::{Rgba, RgbaImage};
use sha2::{Digest, Sha256};

use crate::{Error, Result};

/// RGBA drawing surface, transparent until something is painted on it.
#[derive(Debug, Clone)]
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self { image: RgbaImage::from_pixel(width, height, crate::TRANSPARENT) }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    fn index(&self, x: i32, y: i32) -> Option<(u32, u32)> {
        let (x, y) = (u32::try_from(x).ok()?, u32::try_from(y).ok()?);
        (x < self.width() && y < self.height()).then_some((x, y))
    }

    /// Pixel at (x, y); transparent outside the canvas.
    pub fn pixel(&self, x: i32, y: i32) -> Rgba<u8> {
        self.index(x, y).map_or(crate::TRANSPARENT, |(x, y)| *self.image.get_pixel(x, y))
    }

    /// Overwrite a pixel. Off-canvas writes are dropped.
    pub fn set(&mut self, x: i32, y: i32, color: Rgba<u8>) {
        if let Some((x, y)) = self.index(x, y) {
            self.image.put_pixel(x, y, color);
        }
    }

    /// Source-over composite of `color` at `coverage` (straight alpha).
    pub fn blend(&mut self, x: i32, y: i32, color: Rgba<u8>, coverage: f32) {
        let Some((x, y)) = self.index(x, y) else { return };
        let sa = f32::from(color[3]) / 255.0 * coverage.clamp(0.0, 1.0);
        if sa <= 0.0 {
            return;
        }
        if sa >= 1.0 {
            self.image.put_pixel(x, y, color);
            return;
        }
        let dst = *self.image.get_pixel(x, y);
        let da = f32::from(dst[3]) / 255.0;
        let oa = sa + da * (1.0 - sa);
        let mut out = [0u8; 4];
        for c in 0..3 {
            let v = (f32::from(color[c]) * sa + f32::from(dst[c]) * da * (1.0 - sa)) / oa;
            out[c] = v.round().clamp(0.0, 255.0) as u8;
        }
        out[3] = (oa * 255.0).round().clamp(0.0, 255.0) as u8;
        self.image.put_pixel(x, y, Rgba(out));
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    /// Hex SHA-256 of the raw RGBA pixels, row-major.
    ///
    /// Unlike [`EncodedImage::fingerprint`] this does not depend on the PNG
    /// encoder's compression choices.
    pub fn fingerprint(&self) -> String {
        hex::encode(Sha256::digest(self.image.as_raw()))
    }
}

/// An encoded PNG together with its dimensions.
#[derive(Debug, Clone)]
pub struct EncodedImage {
    pub width: u32,
    pub height: u32,
    pub png_data: Vec<u8>,
}

impl EncodedImage {
    /// Hex SHA-256 of the PNG bytes.
    pub fn fingerprint(&self) -> String {
        hex::encode(Sha256::digest(&self.png_data))
    }

    /// Write the PNG to `path`, replacing any existing file. Missing parent
    /// directories are an error.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        fs::write(path, &self.png_data).map_err(|source| Error::Io { path: path.to_path_buf(), source })
    }
}
