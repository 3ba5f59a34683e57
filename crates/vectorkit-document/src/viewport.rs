//! Viewport state: zoom and pixel offset.
//!
//! Maps between screen space and canvas space for the renderer contract;
//! the document itself always works in canvas units. Serialized with the
//! document so a file reopens at the same view.

use serde::{Deserialize, Serialize};

use vectorkit_core::Point;

const MIN_ZOOM: f64 = 0.1;
const MAX_ZOOM: f64 = 50.0;
const ZOOM_STEP: f64 = 1.2;

fn default_zoom() -> f64 {
    1.0
}

/// Zoom and pan of the canvas view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    #[serde(default = "default_zoom", rename = "zoomLevel")]
    pub zoom: f64,
    #[serde(default)]
    pub offset_x: f64,
    #[serde(default)]
    pub offset_y: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the zoom level, constrained to [0.1, 50.0].
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom * ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom / ZOOM_STEP);
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.offset_x += dx;
        self.offset_y += dy;
    }

    /// Screen pixels to canvas units.
    pub fn screen_to_world(&self, sx: f64, sy: f64) -> Point {
        Point::new((sx - self.offset_x) / self.zoom, (sy - self.offset_y) / self.zoom)
    }

    /// Canvas units to screen pixels.
    pub fn world_to_screen(&self, wx: f64, wy: f64) -> (f64, f64) {
        (wx * self.zoom + self.offset_x, wy * self.zoom + self.offset_y)
    }
}
