//! Render and hit-test query layer.
//!
//! Derives ordered, visible, spatially filtered item lists for painting
//! and pointer hit testing. Paint order is model order (bottom to top);
//! hit testing is a separate concern that includes containers and is
//! walked top-down by the caller.

use std::collections::HashSet;

use vectorkit_core::Rect;

use crate::document::Document;
use crate::item::{Item, ItemId};

/// Ordered renderable items: containers excluded, effectively-visible
/// only, model order preserved (bottom to top).
pub fn render_items(document: &Document) -> Vec<(usize, &Item)> {
    document
        .iter_ordered()
        .enumerate()
        .filter(|(index, item)| item.is_renderable() && document.is_effectively_visible(*index))
        .collect()
}

/// Viewport-culled variant of [`render_items`]: the spatial-index query
/// intersected with the same visibility filter, in the same relative model
/// order. Painters rely on that order for correct z-stacking.
///
/// An item the index has no entry for is treated as intersecting (fail
/// open): a missed culling opportunity is preferable to a missing shape.
pub fn render_items_in_bounds<'a>(document: &'a Document, bounds: &Rect) -> Vec<(usize, &'a Item)> {
    let hits: HashSet<ItemId> = document.spatial_index().query(bounds).into_iter().collect();
    render_items(document)
        .into_iter()
        .filter(|(_, item)| {
            hits.contains(&item.id) || !document.spatial_index().contains(&item.id)
        })
        .collect()
}

/// All items paired with their model index, containers included, filtered
/// only by effective visibility. Callers iterate in reverse for top-down
/// pointer hit testing.
pub fn hit_test_items(document: &Document) -> Vec<(usize, &Item)> {
    document
        .iter_ordered()
        .enumerate()
        .filter(|(index, _)| document.is_effectively_visible(*index))
        .collect()
}

/// Topmost effectively-visible renderable item whose transformed bounds
/// contain the point.
pub fn hit_test_at(document: &Document, x: f64, y: f64) -> Option<(usize, &Item)> {
    let hits: HashSet<ItemId> = document
        .spatial_index()
        .query_point(x, y)
        .into_iter()
        .collect();
    render_items(document)
        .into_iter()
        .rev()
        .find(|(_, item)| hits.contains(&item.id))
}

/// Level-of-detail contract for external renderers: skip painting when the
/// projected on-screen size falls under `min_pixels` in both dimensions.
pub fn is_below_lod_threshold(bounds: &Rect, zoom: f64, min_pixels: f64) -> bool {
    bounds.width * zoom < min_pixels && bounds.height * zoom < min_pixels
}
