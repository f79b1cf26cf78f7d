//! CHJ logo renderer
//!
//! Draws the CHJ logo onto a transparent 500×500 canvas and writes it as a
//! PNG: three blue orbit arcs, an orange nucleus, the "CHJ" wordmark centered
//! on the canvas, and a registered-trademark glyph next to the nucleus.
//!
//! The preferred typeface is `arial.ttf`. When it cannot be found, text falls
//! back to a built-in 8×8 bitmap font and rendering still succeeds.
//!
//! # Example
//!
//! ```no_run
//! use chj_logo::LogoConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let image = chj_logo::generate_logo(&LogoConfig::default())?;
//! println!("wrote {}x{} ({})", image.width, image.height, image.fingerprint());
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

pub use image::Rgba;

pub mod error;
pub use error::{Error, FontLoadError, Result};

pub mod fonts;
pub mod logo;
pub mod rendering;

pub use fonts::{FontHandle, TextBounds};
pub use logo::{DisplayList, LogoRenderer, TextPlacement};
pub use rendering::{Canvas, EncodedImage};

/// Orbit stroke color
pub const BLUE: Rgba<u8> = Rgba([44, 64, 152, 255]);
/// Nucleus color
pub const ORANGE: Rgba<u8> = Rgba([245, 150, 0, 255]);
/// Initial canvas fill
pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// An axis-aligned box in canvas coordinates.
///
/// Both corners are inclusive, so `(0, 0, 9, 9)` covers 10×10 pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BBox {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl BBox {
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> i32 {
        self.x1 - self.x0 + 1
    }

    pub fn height(&self) -> i32 {
        self.y1 - self.y0 + 1
    }

    pub fn is_empty(&self) -> bool {
        self.x1 < self.x0 || self.y1 < self.y0
    }

    /// Shrink every side by `by` pixels.
    pub fn inset(&self, by: i32) -> Self {
        Self::new(self.x0 + by, self.y0 + by, self.x1 - by, self.y1 - by)
    }
}

/// One orbit stroke: an elliptical arc inscribed in `bbox`.
///
/// Angles are in degrees, 0° along +x and increasing clockwise (y points
/// down). `end` may exceed 360.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSpec {
    pub bbox: BBox,
    pub start: f32,
    pub end: f32,
    pub width: u32,
}

/// The filled circle of the logo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nucleus {
    pub center_x: i32,
    pub center_y: i32,
    pub radius: i32,
}

impl Nucleus {
    pub fn bbox(&self) -> BBox {
        BBox::new(
            self.center_x - self.radius,
            self.center_y - self.radius,
            self.center_x + self.radius,
            self.center_y + self.radius,
        )
    }
}

/// Every constant the renderer uses.
///
/// The defaults are the logo. Nothing reads these from the outside world; the
/// struct exists so tests and benches can redirect the output file.
///
/// # Examples
///
/// ```
/// let cfg = chj_logo::LogoConfig::default();
/// assert_eq!(cfg.size, 500);
/// assert_eq!(cfg.wordmark, "CHJ");
/// ```
#[derive(Debug, Clone)]
pub struct LogoConfig {
    /// Canvas edge length in pixels (the canvas is square)
    pub size: u32,
    /// Orbit and text color
    pub blue: Rgba<u8>,
    /// Nucleus color
    pub orange: Rgba<u8>,
    /// Orbit strokes, drawn in order
    pub arcs: Vec<ArcSpec>,
    pub nucleus: Nucleus,
    /// File name of the preferred typeface
    pub font_name: String,
    pub wordmark: String,
    /// Em size of the wordmark in pixels
    pub wordmark_size: f32,
    /// Added to the vertically centered wordmark position
    pub wordmark_offset_y: i32,
    pub trademark: String,
    /// Em size of the trademark glyph in pixels
    pub trademark_size: f32,
    /// Horizontal gap between the nucleus and the trademark glyph
    pub trademark_gap: i32,
    /// Where the PNG is written; relative to the working directory
    pub output_path: PathBuf,
}

impl Default for LogoConfig {
    fn default() -> Self {
        let stroke = 26;
        Self {
            size: 500,
            blue: BLUE,
            orange: ORANGE,
            arcs: vec![
                ArcSpec { bbox: BBox::new(60, 140, 440, 440), start: 10.0, end: 190.0, width: stroke },
                ArcSpec { bbox: BBox::new(90, 40, 410, 360), start: 200.0, end: 380.0, width: stroke },
                ArcSpec { bbox: BBox::new(40, 80, 470, 400), start: 220.0, end: 400.0, width: stroke },
            ],
            nucleus: Nucleus { center_x: 320, center_y: 120, radius: 48 },
            font_name: "arial.ttf".to_string(),
            wordmark: "CHJ".to_string(),
            wordmark_size: 140.0,
            wordmark_offset_y: 20,
            trademark: "\u{00AE}".to_string(),
            trademark_size: 60.0,
            trademark_gap: 15,
            output_path: PathBuf::from("assets/chj-logo.png"),
        }
    }
}

/// Render the logo and write it to `config.output_path`, replacing any
/// existing file.
pub fn generate_logo(config: &LogoConfig) -> Result<EncodedImage> {
    LogoRenderer::new(config.clone()).generate()
}
