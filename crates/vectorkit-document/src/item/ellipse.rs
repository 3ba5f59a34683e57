use serde::{Deserialize, Serialize};

use vectorkit_core::Rect;

/// Ellipse defined by center and two radii.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EllipseItem {
    pub cx: f64,
    pub cy: f64,
    pub radius_x: f64,
    pub radius_y: f64,
}

impl EllipseItem {
    /// Creates an ellipse; radii are clamped non-negative.
    pub fn new(cx: f64, cy: f64, radius_x: f64, radius_y: f64) -> Self {
        Self {
            cx,
            cy,
            radius_x: radius_x.max(0.0),
            radius_y: radius_y.max(0.0),
        }
    }

    /// Circle shorthand.
    pub fn circle(cx: f64, cy: f64, radius: f64) -> Self {
        Self::new(cx, cy, radius, radius)
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.cx - self.radius_x,
            self.cy - self.radius_y,
            self.radius_x * 2.0,
            self.radius_y * 2.0,
        )
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.cx += dx;
        self.cy += dy;
    }

    pub fn clamped(mut self) -> Self {
        self.radius_x = self.radius_x.max(0.0);
        self.radius_y = self.radius_y.max(0.0);
        self
    }
}
