/// Text placement

use crate::fonts::TextBounds;
use crate::Nucleus;

/// Origin that centers `bounds` on a square canvas of edge `size`, then moves
/// it down by `offset_y`. Halving rounds toward negative infinity.
pub fn centered_origin(size: u32, bounds: &TextBounds, offset_y: i32) -> (i32, i32) {
    let size = size as i32;
    let x = (size - bounds.width()).div_euclid(2);
    let y = (size - bounds.height()).div_euclid(2) + offset_y;
    (x, y)
}

/// Origin to the right of the nucleus, level with its top edge.
pub fn beside_nucleus(nucleus: &Nucleus, gap: i32) -> (i32, i32) {
    (nucleus.center_x + nucleus.radius + gap, nucleus.center_y - nucleus.radius)
}
