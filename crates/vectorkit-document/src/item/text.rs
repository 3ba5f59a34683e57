use serde::{Deserialize, Serialize};

use vectorkit_core::Rect;

/// Line-height factor used when no explicit height is set. Real font
/// metrics live with the renderer, not the document core.
const AUTO_HEIGHT_FACTOR: f64 = 1.2;

/// Text block anchored at its top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextItem {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    /// Explicit height; zero means auto (derived from the font size).
    #[serde(default)]
    pub height: f64,
    pub content: String,
    pub font_size: f64,
}

impl TextItem {
    pub fn new(content: impl Into<String>, x: f64, y: f64, width: f64, font_size: f64) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: 0.0,
            content: content.into(),
            font_size: font_size.max(0.0),
        }
    }

    /// Height used for layout: the explicit height, or the line-height
    /// fallback when the height is auto/zero.
    pub fn effective_height(&self) -> f64 {
        if self.height > 0.0 {
            self.height
        } else {
            self.font_size * AUTO_HEIGHT_FACTOR
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.effective_height())
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }

    pub fn clamped(mut self) -> Self {
        self.width = self.width.max(0.0);
        self.height = self.height.max(0.0);
        self.font_size = self.font_size.max(0.0);
        self
    }
}
