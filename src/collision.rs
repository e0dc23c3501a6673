use crate::entities::Rect;

/// Axis-aligned overlap test.
///
/// Strict on both axes: rectangles that only share an edge or a corner do not
/// collide.
pub fn collide(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.width && a.x + a.width > b.x && a.y < b.y + b.height && a.y + a.height > b.y
}
