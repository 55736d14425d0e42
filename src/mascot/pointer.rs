//! Pointer Tracker: maps raw page coordinates onto the `[-1, 1]` square
//! the eye-tracking animation expects.

use serde::{Deserialize, Serialize};

/// Normalized pointer position. `x` grows to the right, `y` grows upward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: f32,
    pub y: f32,
}

impl PointerPosition {
    pub const CENTER: PointerPosition = PointerPosition { x: 0.0, y: 0.0 };

    /// Build a position, clamping both axes into `[-1, 1]`.
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x: clamp_unit(x),
            y: clamp_unit(y),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Convert client coordinates (origin top-left, y down) to a normalized
/// position. A degenerate viewport maps everything to the centre.
pub fn normalize(client_x: f32, client_y: f32, viewport: Viewport) -> PointerPosition {
    if !(viewport.width > 0.0 && viewport.height > 0.0) {
        return PointerPosition::CENTER;
    }
    PointerPosition::new(
        (client_x / viewport.width) * 2.0 - 1.0,
        -(client_y / viewport.height) * 2.0 + 1.0,
    )
}

fn clamp_unit(v: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(-1.0, 1.0)
    }
}

/// Remembers the viewport and the last normalized position.
#[derive(Debug, Clone)]
pub struct PointerTracker {
    viewport: Viewport,
    last: PointerPosition,
}

impl PointerTracker {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            last: PointerPosition::CENTER,
        }
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Record a raw pointer event and return its normalized position.
    pub fn track(&mut self, client_x: f32, client_y: f32) -> PointerPosition {
        self.last = normalize(client_x, client_y, self.viewport);
        self.last
    }

    pub fn position(&self) -> PointerPosition {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_map_to_unit_square() {
        let vp = Viewport::new(800.0, 600.0);
        assert_eq!(normalize(0.0, 0.0, vp), PointerPosition::new(-1.0, 1.0));
        assert_eq!(normalize(800.0, 600.0, vp), PointerPosition::new(1.0, -1.0));
        assert_eq!(normalize(400.0, 300.0, vp), PointerPosition::CENTER);
    }

    #[test]
    fn outside_viewport_is_clamped() {
        let vp = Viewport::new(100.0, 100.0);
        let p = normalize(-50.0, 250.0, vp);
        assert_eq!(p.x, -1.0);
        assert_eq!(p.y, -1.0);
    }

    #[test]
    fn zero_viewport_is_centered() {
        let p = normalize(10.0, 10.0, Viewport::new(0.0, 0.0));
        assert_eq!(p, PointerPosition::CENTER);
    }

    #[test]
    fn tracker_remembers_last_position() {
        let mut tracker = PointerTracker::new(Viewport::new(200.0, 200.0));
        assert_eq!(tracker.position(), PointerPosition::CENTER);
        let p = tracker.track(200.0, 100.0);
        assert_eq!(p, PointerPosition::new(1.0, 0.0));
        assert_eq!(tracker.position(), p);

        tracker.resize(Viewport::new(400.0, 200.0));
        assert_eq!(tracker.track(200.0, 100.0), PointerPosition::CENTER);
    }
}
