//! The authoritative item collection.
//!
//! Items live in an arena keyed by id; a separately maintained order
//! sequence of ids is the render z-order (lower position paints first).
//! Public positional operations speak "index = position in render order",
//! so external holders of an index survive arena internals changing.
//!
//! Every structural mutator keeps three things consistent in one call:
//! the order sequence, the parent links of affected items, and the spatial
//! index entries of every renderable item whose effective bounds changed.
//!
//! Error policy: stale indices and unknown ids are silent no-ops returning
//! sentinels; only malformed input (duplicate id, hierarchy cycle) is a
//! validation error.

use std::collections::{HashMap, HashSet, VecDeque};

use tracing::{debug, warn};

use vectorkit_core::{union_all, Error, Rect, Result};

use crate::item::{GroupItem, Item, ItemId, ItemKind};
use crate::spatial_index::SpatialIndex;

/// The editable document: item arena, render order, and spatial index.
#[derive(Debug, Clone, Default)]
pub struct Document {
    items: HashMap<ItemId, Item>,
    order: Vec<ItemId>,
    index: SpatialIndex,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Lookup

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Item at a render-order position.
    pub fn get(&self, index: usize) -> Option<&Item> {
        self.order.get(index).and_then(|id| self.items.get(id))
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Item> {
        self.items.get(id)
    }

    /// Render-order position of an id.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.order.iter().position(|o| o == id)
    }

    /// Items bottom-to-top.
    pub fn iter_ordered(&self) -> impl Iterator<Item = &Item> {
        self.order.iter().filter_map(|id| self.items.get(id))
    }

    pub fn ids_ordered(&self) -> &[ItemId] {
        &self.order
    }

    pub fn spatial_index(&self) -> &SpatialIndex {
        &self.index
    }

    // ------------------------------------------------------------------
    // Hierarchy

    /// Resolves an id to a container item. Non-container or unknown ids
    /// resolve to `None`, which callers treat as "no parent".
    pub fn container_by_id(&self, id: &str) -> Option<&Item> {
        self.items.get(id).filter(|item| item.is_container())
    }

    /// Render-order positions of the container's direct children,
    /// in model order.
    pub fn direct_children_indices(&self, container_id: &str) -> Vec<usize> {
        if self.container_by_id(container_id).is_none() {
            return Vec::new();
        }
        self.order
            .iter()
            .enumerate()
            .filter(|(_, id)| {
                self.items
                    .get(*id)
                    .and_then(|item| item.parent_id.as_deref())
                    == Some(container_id)
            })
            .map(|(i, _)| i)
            .collect()
    }

    /// All descendants of the container, breadth-first over the levels.
    pub fn descendant_indices(&self, container_id: &str) -> Vec<usize> {
        let mut out = Vec::new();
        let mut queue = VecDeque::from([container_id.to_string()]);
        let mut seen: HashSet<ItemId> = HashSet::new();
        while let Some(current) = queue.pop_front() {
            for child_index in self.direct_children_indices(&current) {
                let child = &self.items[&self.order[child_index]];
                if !seen.insert(child.id.clone()) {
                    continue;
                }
                out.push(child_index);
                if child.is_container() {
                    queue.push_back(child.id.clone());
                }
            }
        }
        out
    }

    /// Walks the candidate's ancestor chain looking for `ancestor_id`.
    /// A cycle in the chain terminates the walk and answers false.
    pub fn is_descendant_of(&self, candidate_id: &str, ancestor_id: &str) -> bool {
        let mut visited: HashSet<&str> = HashSet::new();
        let mut current = self
            .items
            .get(candidate_id)
            .and_then(|item| item.parent_id.as_deref());
        while let Some(parent_id) = current {
            if parent_id == ancestor_id {
                return true;
            }
            if !visited.insert(parent_id) {
                return false;
            }
            current = self
                .container_by_id(parent_id)
                .and_then(|parent| parent.parent_id.as_deref());
        }
        false
    }

    fn fold_ancestors<F>(&self, index: usize, predicate: F) -> bool
    where
        F: Fn(&Item) -> bool,
    {
        let Some(item) = self.get(index) else {
            return false;
        };
        if predicate(item) {
            return true;
        }
        let mut visited: HashSet<&str> = HashSet::new();
        let mut current = item.parent_id.as_deref();
        while let Some(parent_id) = current {
            if !visited.insert(parent_id) {
                return false;
            }
            let Some(parent) = self.container_by_id(parent_id) else {
                // Dangling parent reference: treated as no parent.
                return false;
            };
            if predicate(parent) {
                return true;
            }
            current = parent.parent_id.as_deref();
        }
        false
    }

    /// Hidden if the item or any ancestor is hidden. Out-of-range: false.
    pub fn is_effectively_visible(&self, index: usize) -> bool {
        if self.get(index).is_none() {
            return false;
        }
        !self.fold_ancestors(index, |item| !item.visible)
    }

    /// Locked if the item or any ancestor is locked. Out-of-range: false.
    pub fn is_effectively_locked(&self, index: usize) -> bool {
        self.fold_ancestors(index, |item| item.locked)
    }

    /// Extent of a container: union of its descendants' transformed
    /// bounds, derived on demand. Containers are never spatially indexed.
    pub fn layer_bounds(&self, index: usize) -> Option<Rect> {
        let item = self.get(index)?;
        if !item.is_container() {
            return None;
        }
        let rects = self
            .descendant_indices(&item.id)
            .into_iter()
            .filter_map(|i| self.get(i))
            .filter_map(|child| child.transformed_bounds());
        union_all(rects)
    }

    // ------------------------------------------------------------------
    // Spatial index maintenance

    fn reindex(&mut self, id: &str) {
        let Some(item) = self.items.get(id) else {
            self.index.remove(id);
            return;
        };
        match item.transformed_bounds().filter(|_| item.is_renderable()) {
            Some(bounds) => self.index.update(id.to_string(), &bounds),
            None => {
                self.index.remove(id);
            }
        }
    }

    // ------------------------------------------------------------------
    // Structural mutators

    /// Appends an item on top. Duplicate ids are a validation error.
    pub fn add_item(&mut self, item: Item) -> Result<usize> {
        self.insert_item_at(item, self.order.len())
    }

    /// Inserts an item at a render-order position (clamped to the end).
    pub fn insert_item_at(&mut self, item: Item, index: usize) -> Result<usize> {
        if self.items.contains_key(&item.id) {
            return Err(Error::validation(format!(
                "duplicate item id: {}",
                item.id
            )));
        }
        let at = index.min(self.order.len());
        let id = item.id.clone();
        debug!(id = %id, kind = item.kind.kind_name(), at, "add item");
        self.items.insert(id.clone(), item);
        self.order.insert(at, id.clone());
        self.reindex(&id);
        Ok(at)
    }

    /// Removes the single item at `index`, returning it. No recursion; the
    /// item's children (if any) keep their dangling parent reference.
    pub fn remove_at_return(&mut self, index: usize) -> Option<Item> {
        if index >= self.order.len() {
            return None;
        }
        let id = self.order.remove(index);
        self.index.remove(&id);
        self.items.remove(&id)
    }

    pub fn remove_by_id_return(&mut self, id: &str) -> Option<(Item, usize)> {
        let index = self.index_of(id)?;
        self.remove_at_return(index).map(|item| (item, index))
    }

    /// Replaces the whole state of the item at `index`. The replacement
    /// must carry the same id; anything else is a stale command.
    pub fn set_item(&mut self, index: usize, item: Item) -> bool {
        let Some(existing_id) = self.order.get(index) else {
            return false;
        };
        if *existing_id != item.id {
            return false;
        }
        let id = item.id.clone();
        self.items.insert(id.clone(), item);
        self.reindex(&id);
        true
    }

    /// Expands a set of render-order positions into the full deletion set:
    /// descendants of containers included recursively, directly-locked
    /// items (and their subtrees) refused, duplicates and invalid indices
    /// ignored. Returned ascending.
    pub fn deletion_set(&self, indices: &[usize]) -> Vec<usize> {
        let mut out: HashSet<usize> = HashSet::new();
        for &index in indices {
            self.expand_deletion(index, &mut out);
        }
        let mut sorted: Vec<usize> = out.into_iter().collect();
        sorted.sort_unstable();
        sorted
    }

    fn expand_deletion(&self, index: usize, out: &mut HashSet<usize>) {
        let Some(item) = self.get(index) else {
            return;
        };
        if item.locked {
            // Only a direct lock protects an item; effective lock via an
            // ancestor does not.
            warn!(id = %item.id, "refusing to delete locked item");
            return;
        }
        if !out.insert(index) {
            return;
        }
        if item.is_container() {
            for child_index in self.direct_children_indices(&item.id) {
                self.expand_deletion(child_index, out);
            }
        }
    }

    /// Deletes the items at the given positions (containers recursively).
    /// Returns the number of items actually removed.
    pub fn remove_items(&mut self, indices: &[usize]) -> usize {
        let set = self.deletion_set(indices);
        for &index in set.iter().rev() {
            self.remove_at_return(index);
        }
        debug!(count = set.len(), "removed items");
        set.len()
    }

    /// Checks whether reparenting the item at `index` under `new_parent`
    /// would create a hierarchy cycle.
    pub fn would_create_cycle(&self, index: usize, new_parent: Option<&str>) -> bool {
        let (Some(item), Some(parent_id)) = (self.get(index), new_parent) else {
            return false;
        };
        parent_id == item.id || self.is_descendant_of(parent_id, &item.id)
    }

    /// Moves the item under a new parent (or to the root with `None`).
    ///
    /// Unknown or non-container parent ids are a silent no-op returning
    /// `Ok(false)`. Reparenting an item under itself or one of its own
    /// descendants is rejected with a validation error.
    pub fn reparent(&mut self, index: usize, new_parent: Option<ItemId>) -> Result<bool> {
        let Some(item) = self.get(index) else {
            return Ok(false);
        };
        if let Some(parent_id) = new_parent.as_deref() {
            if self.container_by_id(parent_id).is_none() {
                return Ok(false);
            }
            if self.would_create_cycle(index, Some(parent_id)) {
                return Err(Error::validation(format!(
                    "cannot move {} under its own descendant {}",
                    item.id, parent_id
                )));
            }
        }
        let id = self.order[index].clone();
        if let Some(item) = self.items.get_mut(&id) {
            item.parent_id = new_parent;
        }
        Ok(true)
    }

    /// Reorders within the render order. Both positions must be in range.
    pub fn move_item(&mut self, from: usize, to: usize) -> bool {
        if from >= self.order.len() || to >= self.order.len() {
            return false;
        }
        let id = self.order.remove(from);
        self.order.insert(to, id);
        true
    }

    pub fn bring_to_front(&mut self, index: usize) -> bool {
        let last = self.order.len().saturating_sub(1);
        self.move_item(index, last)
    }

    pub fn send_to_back(&mut self, index: usize) -> bool {
        self.move_item(index, 0)
    }

    pub fn bring_forward(&mut self, index: usize) -> bool {
        if index + 1 >= self.order.len() {
            return false;
        }
        self.order.swap(index, index + 1);
        true
    }

    pub fn send_backward(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.order.len() {
            return false;
        }
        self.order.swap(index, index - 1);
        true
    }

    /// Groups the items at the given positions under a fresh group
    /// container, preserving their relative order and on-screen position.
    /// Returns the group's position, or `None` when nothing valid was
    /// selected.
    pub fn group_items(&mut self, indices: &[usize]) -> Option<usize> {
        let mut child_ids: Vec<ItemId> = Vec::new();
        let mut seen = HashSet::new();
        for &index in indices {
            if let Some(item) = self.get(index) {
                if seen.insert(item.id.clone()) {
                    child_ids.push(item.id.clone());
                }
            }
        }
        if child_ids.is_empty() {
            return None;
        }
        // Children stay where they are in the order; their relative order
        // and geometry are untouched, so on-screen position is preserved.
        let parents: HashSet<Option<ItemId>> = child_ids
            .iter()
            .map(|id| self.items[id].parent_id.clone())
            .collect();
        let common_parent = if parents.len() == 1 {
            parents.into_iter().next().unwrap()
        } else {
            None
        };

        let mut group = Item::with_name(ItemKind::Group(GroupItem::new()), "group");
        group.parent_id = common_parent;
        let group_id = group.id.clone();
        let Ok(group_index) = self.add_item(group) else {
            return None;
        };
        for id in &child_ids {
            if let Some(item) = self.items.get_mut(id) {
                item.parent_id = Some(group_id.clone());
            }
        }
        debug!(group = %group_id, children = child_ids.len(), "grouped items");
        Some(group_index)
    }

    /// Dissolves the container at `index`: its direct children move to the
    /// container's former parent, keeping their relative order, and the
    /// container itself is removed. Non-container or out-of-range
    /// positions are a no-op returning an empty vec.
    pub fn ungroup(&mut self, index: usize) -> Vec<usize> {
        let Some(container) = self.get(index).filter(|item| item.is_container()) else {
            return Vec::new();
        };
        let container_id = container.id.clone();
        let new_parent = container.parent_id.clone();
        let child_ids: Vec<ItemId> = self
            .direct_children_indices(&container_id)
            .into_iter()
            .map(|i| self.order[i].clone())
            .collect();
        for id in &child_ids {
            if let Some(item) = self.items.get_mut(id) {
                item.parent_id = new_parent.clone();
            }
        }
        let container_index = self.index_of(&container_id).unwrap_or(index);
        self.remove_at_return(container_index);
        debug!(container = %container_id, children = child_ids.len(), "ungrouped");
        child_ids
            .iter()
            .filter_map(|id| self.index_of(id))
            .collect()
    }

    /// Deep-copies the items at the given positions (containers with their
    /// whole subtree) with fresh ids, translated by the offset and placed
    /// on top. Returns the new positions.
    pub fn duplicate_items(&mut self, indices: &[usize], dx: f64, dy: f64) -> Vec<usize> {
        let clones = self.build_duplicates(indices, dx, dy);
        let mut out = Vec::with_capacity(clones.len());
        for item in clones {
            if let Ok(index) = self.add_item(item) {
                out.push(index);
            }
        }
        out
    }

    /// Builds the duplicate items without inserting them; used by the
    /// duplicate command so apply/undo can restore the exact clones.
    pub fn build_duplicates(&self, indices: &[usize], dx: f64, dy: f64) -> Vec<Item> {
        // Collect roots and their subtrees in render order.
        let mut take: Vec<usize> = Vec::new();
        let mut seen = HashSet::new();
        for &index in indices {
            let Some(item) = self.get(index) else {
                continue;
            };
            if seen.insert(index) {
                take.push(index);
            }
            if item.is_container() {
                for child in self.descendant_indices(&item.id) {
                    if seen.insert(child) {
                        take.push(child);
                    }
                }
            }
        }
        take.sort_unstable();

        let mut id_map: HashMap<ItemId, ItemId> = HashMap::new();
        let mut clones: Vec<Item> = Vec::with_capacity(take.len());
        for index in take {
            let original = &self.items[&self.order[index]];
            let mut clone = original.clone();
            clone.id = crate::item::new_item_id();
            id_map.insert(original.id.clone(), clone.id.clone());
            clone.translate(dx, dy);
            clones.push(clone);
        }
        // Remap parent links inside the cloned set; parents outside it
        // (the roots' original parents) are kept as-is.
        for clone in &mut clones {
            if let Some(parent) = clone.parent_id.as_ref() {
                if let Some(mapped) = id_map.get(parent) {
                    clone.parent_id = Some(mapped.clone());
                }
            }
        }
        clones
    }

    /// Translates the items at the given positions (containers move their
    /// whole subtree), updating every affected spatial index entry.
    pub fn translate_items(&mut self, indices: &[usize], dx: f64, dy: f64) -> usize {
        let ids = self.translation_set(indices);
        for id in &ids {
            if let Some(item) = self.items.get_mut(id) {
                item.translate(dx, dy);
            }
            self.reindex(id);
        }
        ids.len()
    }

    /// The distinct ids moved by a translate of the given positions.
    pub fn translation_set(&self, indices: &[usize]) -> Vec<ItemId> {
        let mut ids: Vec<ItemId> = Vec::new();
        let mut seen = HashSet::new();
        for &index in indices {
            let Some(item) = self.get(index) else {
                continue;
            };
            if seen.insert(item.id.clone()) {
                ids.push(item.id.clone());
            }
            if item.is_container() {
                for child_index in self.descendant_indices(&item.id) {
                    let child_id = self.order[child_index].clone();
                    if seen.insert(child_id.clone()) {
                        ids.push(child_id);
                    }
                }
            }
        }
        ids
    }

    /// Translates items by id, containers included as given (no subtree
    /// expansion; callers pass the exact affected set).
    pub fn translate_by_ids(&mut self, ids: &[ItemId], dx: f64, dy: f64) {
        for id in ids {
            if let Some(item) = self.items.get_mut(id) {
                item.translate(dx, dy);
            }
            self.reindex(id);
        }
    }

    /// Replaces an item's geometry wholesale, refreshing its index entry.
    pub fn set_kind_by_id(&mut self, id: &str, kind: ItemKind) -> bool {
        let Some(item) = self.items.get_mut(id) else {
            return false;
        };
        item.kind = kind;
        self.reindex(id);
        true
    }

    /// Rewrites a parent link without validation; callers have already
    /// checked the hierarchy (see [`Document::reparent`]).
    pub fn set_parent_by_id(&mut self, id: &str, parent: Option<ItemId>) -> bool {
        let Some(item) = self.items.get_mut(id) else {
            return false;
        };
        item.parent_id = parent;
        true
    }

    /// Drops every item and index entry.
    pub fn clear(&mut self) {
        self.items.clear();
        self.order.clear();
        self.index.clear();
    }

    /// Rebuilds the spatial index from scratch; used after bulk loads.
    pub fn rebuild_spatial_index(&mut self) {
        self.index.clear();
        let ids: Vec<ItemId> = self.order.clone();
        for id in ids {
            self.reindex(&id);
        }
    }
}
