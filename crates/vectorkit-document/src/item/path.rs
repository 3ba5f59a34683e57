use lyon::math::point;
use lyon::path::iterator::*;
use lyon::path::Path;
use serde::{Deserialize, Serialize};

use vectorkit_core::{Point, Rect};

/// Anchor point of a path, with optional cubic-bezier control handles.
/// Handles are offsets relative to the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathPoint {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handle_in: Option<(f64, f64)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handle_out: Option<(f64, f64)>,
}

impl PathPoint {
    /// A corner point with no handles.
    pub fn corner(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            handle_in: None,
            handle_out: None,
        }
    }

    pub fn with_handles(
        x: f64,
        y: f64,
        handle_in: Option<(f64, f64)>,
        handle_out: Option<(f64, f64)>,
    ) -> Self {
        Self {
            x,
            y,
            handle_in,
            handle_out,
        }
    }

    pub fn anchor(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Open or closed bezier path / polyline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathItem {
    pub points: Vec<PathPoint>,
    #[serde(default)]
    pub closed: bool,
}

impl PathItem {
    pub fn new(points: Vec<PathPoint>, closed: bool) -> Self {
        Self { points, closed }
    }

    /// Polyline shorthand: corner points only.
    pub fn polyline(points: &[(f64, f64)], closed: bool) -> Self {
        Self::new(
            points.iter().map(|&(x, y)| PathPoint::corner(x, y)).collect(),
            closed,
        )
    }

    /// Bounding rectangle over the anchor points. Control handles do not
    /// participate; only anchors bound the box. `None` when empty.
    pub fn bounds(&self) -> Option<Rect> {
        let first = self.points.first()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) =
            (first.x, first.y, first.x, first.y);
        for p in &self.points[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Some(Rect::from_min_max(min_x, min_y, max_x, max_y))
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        for p in &mut self.points {
            p.x += dx;
            p.y += dy;
        }
    }

    /// Builds the lyon path for this item, emitting cubic segments where
    /// either endpoint carries a handle and lines elsewhere.
    pub fn to_lyon_path(&self) -> Path {
        let mut builder = Path::builder();
        let Some(first) = self.points.first() else {
            return builder.build();
        };
        builder.begin(point(first.x as f32, first.y as f32));

        let segment_ends: Vec<(usize, usize)> = {
            let mut pairs: Vec<(usize, usize)> =
                (1..self.points.len()).map(|i| (i - 1, i)).collect();
            if self.closed && self.points.len() >= 2 {
                pairs.push((self.points.len() - 1, 0));
            }
            pairs
        };

        for (from, to) in segment_ends {
            let a = &self.points[from];
            let b = &self.points[to];
            match (a.handle_out, b.handle_in) {
                (None, None) => {
                    builder.line_to(point(b.x as f32, b.y as f32));
                }
                (out, inn) => {
                    let (ox, oy) = out.unwrap_or((0.0, 0.0));
                    let (ix, iy) = inn.unwrap_or((0.0, 0.0));
                    builder.cubic_bezier_to(
                        point((a.x + ox) as f32, (a.y + oy) as f32),
                        point((b.x + ix) as f32, (b.y + iy) as f32),
                        point(b.x as f32, b.y as f32),
                    );
                }
            }
        }
        builder.end(self.closed);
        builder.build()
    }

    /// Flattens the bezier path into a polyline at the given tolerance.
    pub fn flatten(&self, tolerance: f32) -> Vec<Point> {
        let path = self.to_lyon_path();
        let mut out = Vec::new();
        for event in path.iter().flattened(tolerance) {
            match event {
                lyon::path::Event::Begin { at } => {
                    out.push(Point::new(at.x as f64, at.y as f64));
                }
                lyon::path::Event::Line { to, .. } => {
                    out.push(Point::new(to.x as f64, to.y as f64));
                }
                lyon::path::Event::End { .. } => {}
                _ => {}
            }
        }
        out
    }
}
