/// Paint command set for the logo display list

use image::Rgba;

use crate::fonts::FontHandle;
use crate::{BBox, Error, Result};

#[derive(Debug, Clone)]
pub enum PaintCommand {
    /// Elliptical stroke inscribed in `bbox`, swept clockwise from `start` to
    /// `end` degrees, `width` pixels thick measured inward.
    Arc {
        bbox: BBox,
        start: f32,
        end: f32,
        width: u32,
        color: Rgba<u8>,
    },
    /// Filled ellipse inscribed in `bbox`
    Ellipse { bbox: BBox, fill: Rgba<u8> },
    /// Text whose ascender line starts at `origin`
    Text {
        origin: (i32, i32),
        text: String,
        font: FontHandle,
        color: Rgba<u8>,
    },
}

impl PaintCommand {
    pub fn kind(&self) -> &'static str {
        match self {
            PaintCommand::Arc { .. } => "arc",
            PaintCommand::Ellipse { .. } => "ellipse",
            PaintCommand::Text { .. } => "text",
        }
    }

    /// Reject commands that cannot produce a sensible shape.
    pub fn validate(&self) -> Result<()> {
        match self {
            PaintCommand::Arc { bbox, start, end, width, .. } => {
                if bbox.is_empty() {
                    return Err(Error::InvalidGeometry(format!("arc box {:?} is empty", bbox)));
                }
                if *width == 0 {
                    return Err(Error::InvalidGeometry("arc stroke width is zero".into()));
                }
                if !start.is_finite() || !end.is_finite() {
                    return Err(Error::InvalidGeometry(format!("arc angles {}..{} are not finite", start, end)));
                }
                Ok(())
            }
            PaintCommand::Ellipse { bbox, .. } if bbox.is_empty() => {
                Err(Error::InvalidGeometry(format!("ellipse box {:?} is empty", bbox)))
            }
            _ => Ok(()),
        }
    }
}
