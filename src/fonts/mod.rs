//! Font acquisition and text measurement
//!
//! A [`FontHandle`] is either a scalable TrueType/OpenType face at a fixed em
//! size, or the built-in [`BitmapFont`]. Both expose the same two operations
//! the renderer needs: tight ink bounds of a string, and per-pixel coverage for
//! drawing it.

pub mod bitmap;
pub mod locator;

use std::fmt;
use std::fs;

use log::info;
use rusttype::{point, Font, Scale};

use crate::{Error, FontLoadError, Result};
pub use bitmap::BitmapFont;
pub use locator::{DirFontLocator, FontLocator, SystemFontLocator};

/// Ink box of a string, relative to a draw origin whose y is the ascender
/// line. `right` and `bottom` are exclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextBounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl TextBounds {
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub fn union(&self, other: &TextBounds) -> TextBounds {
        TextBounds {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }
}

/// A font ready to measure and draw text.
#[derive(Clone)]
pub enum FontHandle {
    /// A parsed face; `size` is the em size in pixels
    Scalable { font: Font<'static>, size: f32 },
    /// The always-available fallback
    Bitmap(BitmapFont),
}

impl fmt::Debug for FontHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontHandle::Scalable { size, .. } => f.debug_struct("Scalable").field("size", size).finish(),
            FontHandle::Bitmap(b) => f.debug_tuple("Bitmap").field(b).finish(),
        }
    }
}

impl FontHandle {
    pub fn fallback() -> Self {
        FontHandle::Bitmap(BitmapFont)
    }

    /// Parse font bytes; `None` if they are not a usable face.
    pub fn from_bytes(bytes: Vec<u8>, size: f32) -> Option<Self> {
        Font::try_from_vec(bytes).map(|font| FontHandle::Scalable { font, size })
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, FontHandle::Bitmap(_))
    }

    // rusttype scales so that ascent - descent equals the requested height;
    // convert the em size into that height.
    fn scale(font: &Font<'static>, size: f32) -> Scale {
        let units = font.v_metrics_unscaled();
        let upem = f32::from(font.units_per_em().max(1));
        Scale::uniform(size * (units.ascent - units.descent) / upem)
    }

    /// Tight ink bounds of `text`.
    pub fn text_bounds(&self, text: &str) -> TextBounds {
        match self {
            FontHandle::Scalable { font, size } => {
                let scale = Self::scale(font, *size);
                let ascent = font.v_metrics(scale).ascent;
                font.layout(text, scale, point(0.0, ascent))
                    .filter_map(|g| g.pixel_bounding_box())
                    .map(|bb| TextBounds { left: bb.min.x, top: bb.min.y, right: bb.max.x, bottom: bb.max.y })
                    .reduce(|a, b| a.union(&b))
                    .unwrap_or_default()
            }
            FontHandle::Bitmap(b) => b.text_bounds(text),
        }
    }

    /// Call `f(x, y, coverage)` for each pixel `text` touches when drawn at
    /// `origin`. Coverage is in `0.0..=1.0`.
    pub fn for_each_coverage(&self, text: &str, origin: (i32, i32), mut f: impl FnMut(i32, i32, f32)) {
        match self {
            FontHandle::Scalable { font, size } => {
                let scale = Self::scale(font, *size);
                let ascent = font.v_metrics(scale).ascent;
                let at = point(origin.0 as f32, origin.1 as f32 + ascent);
                for glyph in font.layout(text, scale, at) {
                    if let Some(bb) = glyph.pixel_bounding_box() {
                        glyph.draw(|gx, gy, v| f(bb.min.x + gx as i32, bb.min.y + gy as i32, v));
                    }
                }
            }
            FontHandle::Bitmap(b) => b.for_each_pixel(text, origin, |x, y| f(x, y, 1.0)),
        }
    }
}

/// Locate and parse `name` at `size`.
pub fn load_font(locator: &dyn FontLocator, name: &str, size: f32) -> std::result::Result<FontHandle, FontLoadError> {
    let path = locator
        .locate(name)
        .ok_or_else(|| FontLoadError::NotFound(name.to_string()))?;
    let bytes = fs::read(&path).map_err(|e| FontLoadError::from_io(name, path.clone(), e))?;
    FontHandle::from_bytes(bytes, size).ok_or(FontLoadError::Invalid { path })
}

/// Like [`load_font`], but substitutes `fallback()` when the font is missing
/// or unreadable. A file that exists and fails to parse is still an error.
pub fn load_font_or(
    locator: &dyn FontLocator,
    name: &str,
    size: f32,
    fallback: impl FnOnce() -> FontHandle,
) -> Result<FontHandle> {
    match load_font(locator, name, size) {
        Ok(font) => Ok(font),
        Err(FontLoadError::Invalid { path }) => Err(Error::InvalidFont { path }),
        Err(e) => {
            let substitute = fallback();
            info!("{}; using {:?} instead", e, substitute);
            Ok(substitute)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn missing_font_falls_back() {
        let font = load_font_or(&DirFontLocator::empty(), "arial.ttf", 140.0, FontHandle::fallback).unwrap();
        assert!(font.is_fallback());
    }

    #[test]
    fn missing_font_reports_not_found() {
        let err = load_font(&DirFontLocator::empty(), "arial.ttf", 60.0).unwrap_err();
        assert!(matches!(err, FontLoadError::NotFound(ref n) if n == "arial.ttf"));
    }

    #[test]
    fn fallback_closure_picks_the_substitute() {
        let bytes = fs::read(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fonts/DejaVuSansMono.ttf")).unwrap();
        let wordmark = FontHandle::from_bytes(bytes, 140.0).unwrap();
        let font = load_font_or(&DirFontLocator::empty(), "arial.ttf", 60.0, || wordmark.clone()).unwrap();
        assert!(matches!(font, FontHandle::Scalable { size, .. } if size == 140.0));
    }

    #[test]
    fn corrupt_font_is_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("arial.ttf"), b"definitely not a font").unwrap();
        let locator = DirFontLocator::new([tmp.path()]);

        let err = load_font_or(&locator, "arial.ttf", 140.0, FontHandle::fallback).unwrap_err();
        assert!(matches!(err, Error::InvalidFont { .. }));
    }

    #[test]
    fn coverage_matches_bounds_for_bitmap() {
        let font = FontHandle::fallback();
        let b = font.text_bounds("CHJ");
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (i32::MAX, i32::MAX, i32::MIN, i32::MIN);
        font.for_each_coverage("CHJ", (0, 0), |x, y, v| {
            assert_eq!(v, 1.0);
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        });
        assert_eq!(b, TextBounds { left: min_x, top: min_y, right: max_x + 1, bottom: max_y + 1 });
    }

    #[test]
    fn bounds_union() {
        let a = TextBounds { left: 0, top: 2, right: 5, bottom: 6 };
        let b = TextBounds { left: 3, top: 0, right: 9, bottom: 4 };
        let u = a.union(&b);
        assert_eq!((u.width(), u.height()), (9, 6));
    }
}
