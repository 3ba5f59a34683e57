use serde::{Deserialize, Serialize};

use vectorkit_core::Rect;

/// Axis-aligned rectangle with four independent corner radii
/// (top-left, top-right, bottom-right, bottom-left).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectangleItem {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub corner_radii: [f64; 4],
}

impl RectangleItem {
    /// Creates a rectangle; width and height are clamped non-negative.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
            corner_radii: [0.0; 4],
        }
    }

    pub fn with_corner_radii(mut self, radii: [f64; 4]) -> Self {
        self.corner_radii = radii;
        self
    }

    /// Corner radii clamped to at most half the shorter side.
    pub fn effective_corner_radii(&self) -> [f64; 4] {
        let limit = self.width.min(self.height) / 2.0;
        self.corner_radii.map(|r| r.clamp(0.0, limit))
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }

    /// Re-applies the clamping rules; used when loading records.
    pub fn clamped(mut self) -> Self {
        self.width = self.width.max(0.0);
        self.height = self.height.max(0.0);
        self.corner_radii = self.effective_corner_radii();
        self
    }
}
