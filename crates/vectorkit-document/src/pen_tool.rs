//! Pen-tool state machine for interactive bezier path construction.
//!
//! Lives entirely outside the document: points accumulate here during a
//! pen session and become a path item only on completion. A press starts a
//! drag; releasing below the drag threshold commits a corner point, above
//! it a smooth point whose backward handle mirrors the forward one so the
//! incoming segment curves symmetrically.

use smallvec::{smallvec, SmallVec};

use vectorkit_core::{Error, Point, Result};

use crate::appearance::{Appearance, Fill, Stroke};
use crate::item::{Item, ItemKind, PathItem, PathPoint};

/// Drag distance below which a release commits a corner point.
pub const CORNER_DRAG_THRESHOLD: f64 = 6.0;

/// Default per-axis tolerance for closing onto the first point.
pub const DEFAULT_CLOSE_TOLERANCE: f64 = 10.0;

/// Style overrides applied when the accumulated points become a path item.
#[derive(Debug, Clone, Default)]
pub struct PathStyle {
    pub fill: Option<Fill>,
    pub stroke: Option<Stroke>,
}

/// Interactive path-construction state.
#[derive(Debug, Clone, Default)]
pub struct PenToolState {
    points: Vec<PathPoint>,
    drag_anchor: Option<Point>,
    preview: Option<Point>,
    closed: bool,
}

impl PenToolState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn points(&self) -> &[PathPoint] {
        &self.points
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Current rubber-band preview endpoint, if any.
    pub fn preview(&self) -> Option<Point> {
        self.preview
    }

    /// Starts a drag at the pressed position. Invalid once the path is
    /// closed.
    pub fn begin_point(&mut self, x: f64, y: f64) {
        if self.closed {
            return;
        }
        self.drag_anchor = Some(Point::new(x, y));
        self.preview = None;
    }

    /// Live handle preview while dragging; `None` when no drag is active.
    pub fn update_drag(&self, x: f64, y: f64) -> Option<Point> {
        self.drag_anchor?;
        Some(Point::new(x, y))
    }

    /// Commits the point for the active drag. Below the threshold the
    /// anchor becomes a corner point; at or above it, a smooth point with
    /// a forward handle at the drag endpoint and, unless this is the first
    /// point, a mirrored backward handle.
    pub fn end_point(&mut self, x: f64, y: f64) {
        let Some(anchor) = self.drag_anchor.take() else {
            return;
        };
        let end = Point::new(x, y);
        if anchor.distance_to(&end) < CORNER_DRAG_THRESHOLD {
            self.points.push(PathPoint::corner(anchor.x, anchor.y));
            return;
        }
        let forward = (end.x - anchor.x, end.y - anchor.y);
        let backward = if self.points.is_empty() {
            None
        } else {
            Some((-forward.0, -forward.1))
        };
        self.points.push(PathPoint::with_handles(
            anchor.x,
            anchor.y,
            backward,
            Some(forward),
        ));
    }

    /// Updates the rubber-band preview endpoint. Ignored while dragging.
    pub fn preview_to(&mut self, x: f64, y: f64) {
        if self.drag_anchor.is_some() {
            return;
        }
        self.preview = Some(Point::new(x, y));
    }

    /// Closes the path if the position lands within `tolerance` of the
    /// first point on both axes. Requires at least two committed points.
    /// Returns whether closing occurred.
    pub fn try_close(&mut self, x: f64, y: f64, tolerance: f64) -> bool {
        if self.closed || self.points.len() < 2 {
            return false;
        }
        let first = self.points[0];
        if (x - first.x).abs() > tolerance || (y - first.y).abs() > tolerance {
            return false;
        }
        self.closed = true;
        // Mirror the first point's forward handle so the closing segment
        // curves consistently.
        let first = &mut self.points[0];
        if let (Some((ox, oy)), None) = (first.handle_out, first.handle_in) {
            first.handle_in = Some((-ox, -oy));
        }
        true
    }

    /// Clears all points and flags, returning to the initial state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Converts the accumulated points into a path item. Fewer than two
    /// points is a validation error.
    pub fn to_item(&self, style: &PathStyle) -> Result<Item> {
        if self.points.len() < 2 {
            return Err(Error::validation(
                "a path requires at least 2 points",
            ));
        }
        let mut item = Item::new(ItemKind::Path(PathItem::new(
            self.points.clone(),
            self.closed,
        )));
        let appearances: SmallVec<[Appearance; 2]> = smallvec![
            Appearance::Fill(style.fill.unwrap_or_default()),
            Appearance::Stroke(style.stroke.unwrap_or_default()),
        ];
        item.appearances = appearances;
        Ok(item)
    }
}
