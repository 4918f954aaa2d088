// File: crates/pie-core/src/tooltip.rs
// Summary: Tooltip placement that keeps the content box inside the viewport.

use crate::geometry::{Point, Size};

/// Place a tooltip anchored at `point`.
///
/// A box overflowing the right (bottom) edge is shifted left (up) by exactly
/// the overflow. Final coordinates never go below zero.
pub fn place(point: Point, content: Size, viewport: Size) -> Point {
    let mut x = point.x;
    let mut y = point.y;

    let overflow_x = x + content.width - viewport.width;
    if overflow_x > 0.0 {
        x -= overflow_x;
    }
    let overflow_y = y + content.height - viewport.height;
    if overflow_y > 0.0 {
        y -= overflow_y;
    }

    Point::new(x.max(0.0), y.max(0.0))
}
