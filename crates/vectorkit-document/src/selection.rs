//! Selection state and per-interaction edit context.
//!
//! Selection is tracked by model index in selection order. The toggle
//! semantics are shared between click handling and programmatic selection:
//! multi-select toggles membership, plain select replaces the selection,
//! and an invalid target clears a plain selection entirely.

use std::collections::HashMap;

use vectorkit_core::{Point, Rect};

use crate::document::Document;
use crate::query;

/// Pure toggle rule over a selection of model indices. `index` is `None`
/// for a click that resolved to nothing (empty canvas, stale index).
pub fn toggle_selection(current: &[usize], index: Option<usize>, multi: bool) -> Vec<usize> {
    match (index, multi) {
        (Some(index), true) => {
            let mut next = current.to_vec();
            if let Some(pos) = next.iter().position(|&i| i == index) {
                next.remove(pos);
            } else {
                next.push(index);
            }
            next
        }
        (Some(index), false) => vec![index],
        (None, true) => current.to_vec(),
        (None, false) => Vec::new(),
    }
}

/// Tracks which items are selected, in selection order.
#[derive(Debug, Clone, Default)]
pub struct SelectionManager {
    selected: Vec<usize>,
}

impl SelectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies the toggle rule to the current selection.
    pub fn toggle(&mut self, index: Option<usize>, multi: bool) {
        self.selected = toggle_selection(&self.selected, index, multi);
    }

    /// Selected model indices in selection order.
    pub fn selected(&self) -> &[usize] {
        &self.selected
    }

    /// Most recently selected index.
    pub fn primary(&self) -> Option<usize> {
        self.selected.last().copied()
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Selects every item in the document, bottom to top.
    pub fn select_all(&mut self, document: &Document) {
        self.selected = (0..document.len()).collect();
    }

    /// Replaces (or extends, with `multi`) the selection with the
    /// effectively-visible renderable items intersecting the rectangle,
    /// in model order.
    pub fn select_in_rect(&mut self, document: &Document, rect: &Rect, multi: bool) {
        let hits: Vec<usize> = query::render_items_in_bounds(document, rect)
            .into_iter()
            .map(|(index, _)| index)
            .collect();
        if multi {
            for index in hits {
                if !self.selected.contains(&index) {
                    self.selected.push(index);
                }
            }
        } else {
            self.selected = hits;
        }
    }

    /// Drops indices that no longer exist after a structural change.
    pub fn prune(&mut self, document: &Document) {
        let len = document.len();
        self.selected.retain(|&index| index < len);
    }
}

/// Ephemeral per-interaction state: pivot points locked at the start of a
/// rotate/scale drag so the pivot stays fixed across the whole gesture.
/// Owned by the interaction layer; never serialized, cleared between
/// document loads.
#[derive(Debug, Clone, Default)]
pub struct EditContext {
    pivots: HashMap<usize, Point>,
}

impl EditContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Locks the pivot for an item for the duration of a drag.
    pub fn lock_pivot(&mut self, index: usize, pivot: Point) {
        self.pivots.insert(index, pivot);
    }

    /// The locked pivot, if one is held for this item.
    pub fn pivot(&self, index: usize) -> Option<Point> {
        self.pivots.get(&index).copied()
    }

    pub fn unlock(&mut self, index: usize) {
        self.pivots.remove(&index);
    }

    pub fn clear(&mut self) {
        self.pivots.clear();
    }
}
