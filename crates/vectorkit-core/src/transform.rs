//! Non-destructive affine transforms.
//!
//! A [`Transform`] is layered on top of an item's raw geometry and never
//! mutates it. Composition order is fixed: translate, then rotate and scale
//! about a pivot derived from the item's own bounds, then undo the pivot
//! shift. The pivot (`origin_x`/`origin_y`) is expressed as 0..1 fractions
//! of the untransformed bounds, so `0.5, 0.5` pins the center.
//!
//! Matrix math is delegated to `kurbo::Affine`.

use kurbo::Affine;
use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect};

fn default_scale() -> f64 {
    1.0
}

fn default_origin() -> f64 {
    0.5
}

/// Non-destructive affine adjustment: translate, rotate (degrees), and
/// scale about a fractional pivot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transform {
    #[serde(default)]
    pub translate_x: f64,
    #[serde(default)]
    pub translate_y: f64,
    #[serde(default)]
    pub rotate_degrees: f64,
    #[serde(default = "default_scale")]
    pub scale_x: f64,
    #[serde(default = "default_scale")]
    pub scale_y: f64,
    #[serde(default = "default_origin")]
    pub origin_x: f64,
    #[serde(default = "default_origin")]
    pub origin_y: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translate_x: 0.0,
            translate_y: 0.0,
            rotate_degrees: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            origin_x: 0.5,
            origin_y: 0.5,
        }
    }
}

impl Transform {
    /// A pure translation.
    pub fn translation(dx: f64, dy: f64) -> Self {
        Self {
            translate_x: dx,
            translate_y: dy,
            ..Self::default()
        }
    }

    /// True iff translate is zero, rotation is zero, and scale is one.
    /// Origin values do not affect identity.
    pub fn is_identity(&self) -> bool {
        self.translate_x == 0.0
            && self.translate_y == 0.0
            && self.rotate_degrees == 0.0
            && self.scale_x == 1.0
            && self.scale_y == 1.0
    }

    /// Pivot point in geometry space for the given untransformed bounds.
    pub fn pivot(&self, bounds: &Rect) -> Point {
        Point::new(
            bounds.x + self.origin_x * bounds.width,
            bounds.y + self.origin_y * bounds.height,
        )
    }

    /// Composes the affine matrix for geometry with the given untransformed
    /// bounds: translate, shift to pivot, rotate, scale, shift back.
    pub fn matrix(&self, bounds: &Rect) -> Affine {
        let pivot = self.pivot(bounds);
        Affine::translate((self.translate_x, self.translate_y))
            * Affine::translate((pivot.x, pivot.y))
            * Affine::rotate(self.rotate_degrees.to_radians())
            * Affine::scale_non_uniform(self.scale_x, self.scale_y)
            * Affine::translate((-pivot.x, -pivot.y))
    }

    /// Applies the composed matrix to a geometry-space point.
    pub fn apply(&self, bounds: &Rect, p: Point) -> Point {
        (self.matrix(bounds) * kurbo::Point::from(p)).into()
    }

    /// Maps a canvas-space point back into geometry space by inverting the
    /// composed matrix. A singular matrix (degenerate zero scale) passes
    /// the point through unchanged.
    pub fn map_to_geometry(&self, bounds: &Rect, p: Point) -> Point {
        let m = self.matrix(bounds);
        if m.determinant().abs() < 1e-12 {
            return p;
        }
        (m.inverse() * kurbo::Point::from(p)).into()
    }

    /// Bounding rectangle of the transformed corners of `bounds`.
    pub fn transformed_bounds(&self, bounds: &Rect) -> Rect {
        if self.is_identity() {
            return *bounds;
        }
        let m = self.matrix(bounds);
        m.transform_rect_bbox(kurbo::Rect::from(*bounds)).into()
    }
}

/// Recomputes a scale factor from a resize-handle drag.
///
/// `delta` is in local (unrotated) space. Dragging the min edge shrinks the
/// displayed size for a positive delta; dragging the max edge grows it. The
/// resulting displayed size is floored at one canvas unit. A non-positive
/// `original_size` leaves the scale unchanged.
pub fn scale_for_resize(
    current_scale: f64,
    original_size: f64,
    delta: f64,
    from_min_edge: bool,
) -> f64 {
    if original_size <= 0.0 {
        return current_scale;
    }
    let displayed = original_size * current_scale;
    let new_displayed = if from_min_edge {
        displayed - delta
    } else {
        displayed + delta
    };
    new_displayed.max(1.0) / original_size
}
