//! Collision detection for axis-aligned boxes and circles
//!
//! Both predicates are pure. The tick decides which pairs get tested.

use glam::Vec2;

/// Axis-aligned rectangle, `min` is the top-left corner (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Bottom-right corner
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(x: f32, y: f32, radius: f32) -> Self {
        Self {
            center: Vec2::new(x, y),
            radius,
        }
    }
}

/// Overlap on both axes. Touching edges do not count.
pub fn rect_hits_rect(a: &Rect, b: &Rect) -> bool {
    let (a_max, b_max) = (a.max(), b.max());
    a.min.x < b_max.x && a_max.x > b.min.x && a.min.y < b_max.y && a_max.y > b.min.y
}

/// Closest point on the rect to the circle center, within the radius.
/// Exact tangency counts as a hit.
pub fn rect_hits_circle(rect: &Rect, circle: &Circle) -> bool {
    let closest = circle.center.clamp(rect.min, rect.max());
    closest.distance_squared(circle.center) <= circle.radius * circle.radius
}
