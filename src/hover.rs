//! Hover and click hit testing shared by the views.

use crate::galaxy::{Bounds, Point};

/// True when `point` lies inside or on the circle.
pub fn is_within_circle(point: Point, center: (f64, f64), radius: f64) -> bool {
    let dx = point.x as f64 - center.0;
    let dy = point.y as f64 - center.1;
    dx * dx + dy * dy <= radius * radius
}

/// Index of the first item hit by `point`.
///
/// When `area` is given, points outside it never hit anything.
pub fn find_hovered<T, F>(point: Point, items: &[T], area: Option<Bounds>, hit: F) -> Option<usize>
where
    F: Fn(Point, &T) -> bool,
{
    if let Some(area) = area {
        if !area.contains(point) {
            return None;
        }
    }
    items.iter().position(|item| hit(point, item))
}
