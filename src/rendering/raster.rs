/// Rasterizer: paint commands onto a [`Canvas`], canvas to PNG bytes
///
/// Shapes are aliased: a pixel is painted iff its center is inside the shape,
/// so every shape pixel is fully opaque. Text keeps the glyph coverage.

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, Rgba};
use log::debug;

use crate::rendering::paint::PaintCommand;
use crate::rendering::{Canvas, EncodedImage};
use crate::{BBox, Result};

/// Ellipse inscribed in an inclusive pixel box.
///
/// Coordinates are kept doubled so pixel centers land on integers and the
/// inside test is exact.
#[derive(Debug, Clone, Copy)]
struct Ellipse {
    sum_x: i64,
    sum_y: i64,
    w: i64,
    h: i64,
}

impl Ellipse {
    fn inscribed(bbox: &BBox) -> Option<Self> {
        if bbox.is_empty() {
            return None;
        }
        Some(Self {
            sum_x: i64::from(bbox.x0) + i64::from(bbox.x1),
            sum_y: i64::from(bbox.y0) + i64::from(bbox.y1),
            w: i64::from(bbox.width()),
            h: i64::from(bbox.height()),
        })
    }

    /// Twice the offset of pixel (x, y)'s center from the ellipse center.
    fn offset(&self, x: i32, y: i32) -> (i64, i64) {
        (2 * i64::from(x) - self.sum_x, 2 * i64::from(y) - self.sum_y)
    }

    /// Whether the center of pixel (x, y) is inside.
    fn contains(&self, x: i32, y: i32) -> bool {
        let (dx, dy) = self.offset(x, y);
        dx * dx * self.h * self.h + dy * dy * self.w * self.w <= self.w * self.w * self.h * self.h
    }

    /// Clockwise angle of the pixel center in degrees, `0.0..360.0`.
    fn angle_of(&self, x: i32, y: i32) -> f64 {
        let (dx, dy) = self.offset(x, y);
        (dy as f64).atan2(dx as f64).to_degrees().rem_euclid(360.0)
    }
}

/// Whether `angle` lies on the clockwise sweep from `start` to `end`.
fn in_sweep(angle: f64, start: f64, end: f64) -> bool {
    let span = end - start;
    if span >= 360.0 {
        return true;
    }
    // end < start sweeps clockwise through 0°
    let span = span.rem_euclid(360.0);
    (angle - start.rem_euclid(360.0)).rem_euclid(360.0) <= span
}

fn pixel_range(bbox: &BBox, canvas: &Canvas) -> (std::ops::RangeInclusive<i32>, std::ops::RangeInclusive<i32>) {
    let xs = bbox.x0.max(0)..=bbox.x1.min(canvas.width() as i32 - 1);
    let ys = bbox.y0.max(0)..=bbox.y1.min(canvas.height() as i32 - 1);
    (xs, ys)
}

pub fn fill_ellipse(canvas: &mut Canvas, bbox: &BBox, fill: Rgba<u8>) {
    let Some(shape) = Ellipse::inscribed(bbox) else { return };
    let (xs, ys) = pixel_range(bbox, canvas);
    for y in ys {
        for x in xs.clone() {
            if shape.contains(x, y) {
                canvas.set(x, y, fill);
            }
        }
    }
}

/// Stroke the part of the ring between `bbox`'s ellipse and the ellipse of
/// `bbox` inset by `width` that falls within the sweep.
pub fn stroke_arc(canvas: &mut Canvas, bbox: &BBox, start: f32, end: f32, width: u32, color: Rgba<u8>) {
    let Some(outer) = Ellipse::inscribed(bbox) else { return };
    let inner = Ellipse::inscribed(&bbox.inset(width as i32));
    let (xs, ys) = pixel_range(bbox, canvas);
    for y in ys {
        for x in xs.clone() {
            if !outer.contains(x, y) || inner.is_some_and(|i| i.contains(x, y)) {
                continue;
            }
            if in_sweep(outer.angle_of(x, y), f64::from(start), f64::from(end)) {
                canvas.set(x, y, color);
            }
        }
    }
}

/// Execute `commands` in order on a fresh transparent canvas.
pub fn rasterize(width: u32, height: u32, commands: &[PaintCommand]) -> Result<Canvas> {
    let mut canvas = Canvas::new(width, height);
    for cmd in commands {
        cmd.validate()?;
        debug!("paint {}: {:?}", cmd.kind(), cmd);
        match cmd {
            PaintCommand::Arc { bbox, start, end, width, color } => {
                stroke_arc(&mut canvas, bbox, *start, *end, *width, *color)
            }
            PaintCommand::Ellipse { bbox, fill } => fill_ellipse(&mut canvas, bbox, *fill),
            PaintCommand::Text { origin, text, font, color } => {
                font.for_each_coverage(text, *origin, |x, y, v| canvas.blend(x, y, *color, v))
            }
        }
    }
    Ok(canvas)
}

/// Encode as 8-bit RGBA PNG.
pub fn encode_png(canvas: &Canvas) -> Result<EncodedImage> {
    let mut png_data = Vec::new();
    PngEncoder::new(&mut png_data).write_image(
        canvas.as_image().as_raw(),
        canvas.width(),
        canvas.height(),
        ExtendedColorType::Rgba8,
    )?;
    Ok(EncodedImage { width: canvas.width(), height: canvas.height(), png_data })
}
