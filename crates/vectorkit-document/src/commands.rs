//! Reversible document commands.
//!
//! Every structural or geometric edit is expressed as a [`DocumentCommand`]
//! whose `apply` and `undo` are exact inverses over all observable state:
//! the item arena, the render order, parent links, and the spatial index.
//! Removed subtrees are stowed inside the command (with their original
//! positions) so undo restores them byte-for-byte.
//!
//! Commands are constructed against the current document state and executed
//! immediately through the [`CommandStack`](crate::history::CommandStack);
//! a constructor returns `None` when the edit would be a no-op (stale
//! index, empty selection), matching the silent-degradation policy.

use vectorkit_core::Result;

use crate::document::Document;
use crate::item::{Item, ItemId, ItemKind};

/// One stowed item: its render-order position and, when currently detached
/// from the document, the item itself.
#[derive(Debug, Clone)]
pub struct StowedItem {
    index: usize,
    item: Option<Box<Item>>,
}

impl StowedItem {
    fn detached(index: usize, item: Item) -> Self {
        Self {
            index,
            item: Some(Box::new(item)),
        }
    }

    fn attached(index: usize) -> Self {
        Self { index, item: None }
    }
}

/// An executable/undoable unit of change.
#[derive(Debug, Clone)]
pub enum DocumentCommand {
    /// Insert a prebuilt item at a position.
    AddItem { id: ItemId, entry: StowedItem },
    /// Remove a set of items (already expanded over container subtrees).
    RemoveItems { entries: Vec<StowedItem> },
    /// Translate geometry of an exact id set by a delta. Snapshots of the
    /// original geometry are captured on first apply so undo restores
    /// coordinates exactly rather than translating back.
    TranslateItems {
        ids: Vec<ItemId>,
        dx: f64,
        dy: f64,
        snapshots: Option<Vec<(ItemId, ItemKind)>>,
    },
    /// Whole-state replacement of one item (property edits, resize).
    ChangeItem {
        index: usize,
        old: Box<Item>,
        new: Box<Item>,
    },
    /// Move within the render order.
    ReorderItem { from: usize, to: usize },
    /// Rewrite one parent link (validated at construction).
    ReparentItem {
        id: ItemId,
        old_parent: Option<ItemId>,
        new_parent: Option<ItemId>,
    },
    /// Put a fresh group container over a set of children.
    GroupItems {
        group_id: ItemId,
        group: StowedItem,
        children: Vec<(ItemId, Option<ItemId>)>,
    },
    /// Dissolve a container, lifting children to its former parent.
    UngroupItems {
        group_id: ItemId,
        group: StowedItem,
        group_parent: Option<ItemId>,
        child_ids: Vec<ItemId>,
    },
    /// Insert prebuilt deep copies on top of the document.
    DuplicateItems { entries: Vec<(ItemId, StowedItem)> },
    /// An ordered sequence treated as one atomic undo step.
    Composite {
        label: String,
        commands: Vec<DocumentCommand>,
    },
}

impl DocumentCommand {
    // ------------------------------------------------------------------
    // Constructors

    /// Adds `item` on top of the document.
    pub fn add_item(document: &Document, item: Item) -> Self {
        Self::AddItem {
            id: item.id.clone(),
            entry: StowedItem::detached(document.len(), item),
        }
    }

    /// Removes the items at the given positions, containers recursively.
    /// `None` when the expanded deletion set is empty (all stale or
    /// locked).
    pub fn remove_items(document: &Document, indices: &[usize]) -> Option<Self> {
        let set = document.deletion_set(indices);
        if set.is_empty() {
            return None;
        }
        Some(Self::RemoveItems {
            entries: set.into_iter().map(StowedItem::attached).collect(),
        })
    }

    /// Translates the items at the given positions (containers move their
    /// subtree). `None` for an empty affected set.
    pub fn translate_items(document: &Document, indices: &[usize], dx: f64, dy: f64) -> Option<Self> {
        let ids = document.translation_set(indices);
        if ids.is_empty() {
            return None;
        }
        Some(Self::TranslateItems {
            ids,
            dx,
            dy,
            snapshots: None,
        })
    }

    /// Replaces the item at `index` with `new` (same id). `None` for a
    /// stale index or mismatched id.
    pub fn change_item(document: &Document, index: usize, new: Item) -> Option<Self> {
        let old = document.get(index)?;
        if old.id != new.id {
            return None;
        }
        Some(Self::ChangeItem {
            index,
            old: Box::new(old.clone()),
            new: Box::new(new),
        })
    }

    /// Reorders within the render order. `None` when out of range or a
    /// no-op.
    pub fn reorder_item(document: &Document, from: usize, to: usize) -> Option<Self> {
        if from == to || from >= document.len() || to >= document.len() {
            return None;
        }
        Some(Self::ReorderItem { from, to })
    }

    /// Moves the item under a new parent. `Ok(None)` for stale positions
    /// and unknown/non-container parents; `Err` when the move would create
    /// a hierarchy cycle.
    pub fn reparent_item(
        document: &Document,
        index: usize,
        new_parent: Option<ItemId>,
    ) -> Result<Option<Self>> {
        let Some(item) = document.get(index) else {
            return Ok(None);
        };
        if let Some(parent_id) = new_parent.as_deref() {
            if document.container_by_id(parent_id).is_none() {
                return Ok(None);
            }
            if document.would_create_cycle(index, Some(parent_id)) {
                return Err(vectorkit_core::Error::validation(format!(
                    "cannot move {} under its own descendant {}",
                    item.id, parent_id
                )));
            }
        }
        Ok(Some(Self::ReparentItem {
            id: item.id.clone(),
            old_parent: item.parent_id.clone(),
            new_parent,
        }))
    }

    /// Groups the items at the given positions under a fresh container.
    /// The group item is built here so redo reuses the same id.
    pub fn group_items(document: &Document, indices: &[usize]) -> Option<Self> {
        let mut children: Vec<(ItemId, Option<ItemId>)> = Vec::new();
        for &index in indices {
            if let Some(item) = document.get(index) {
                if !children.iter().any(|(id, _)| *id == item.id) {
                    children.push((item.id.clone(), item.parent_id.clone()));
                }
            }
        }
        if children.is_empty() {
            return None;
        }
        let parents: std::collections::HashSet<&Option<ItemId>> =
            children.iter().map(|(_, parent)| parent).collect();
        let common_parent = if parents.len() == 1 {
            children[0].1.clone()
        } else {
            None
        };

        let mut group = Item::with_name(
            ItemKind::Group(crate::item::GroupItem::new()),
            "group",
        );
        group.parent_id = common_parent;
        Some(Self::GroupItems {
            group_id: group.id.clone(),
            group: StowedItem::detached(document.len(), group),
            children,
        })
    }

    /// Dissolves the container at `index`. `None` for non-containers and
    /// stale positions.
    pub fn ungroup_items(document: &Document, index: usize) -> Option<Self> {
        let container = document.get(index).filter(|item| item.is_container())?;
        let child_ids = document
            .direct_children_indices(&container.id)
            .into_iter()
            .filter_map(|i| document.get(i))
            .map(|child| child.id.clone())
            .collect();
        Some(Self::UngroupItems {
            group_id: container.id.clone(),
            group: StowedItem::attached(index),
            group_parent: container.parent_id.clone(),
            child_ids,
        })
    }

    /// Deep-copies the items at the given positions with fresh ids,
    /// translated by the offset. `None` for an empty set.
    pub fn duplicate_items(
        document: &Document,
        indices: &[usize],
        dx: f64,
        dy: f64,
    ) -> Option<Self> {
        let clones = document.build_duplicates(indices, dx, dy);
        if clones.is_empty() {
            return None;
        }
        let base = document.len();
        Some(Self::DuplicateItems {
            entries: clones
                .into_iter()
                .enumerate()
                .map(|(offset, item)| {
                    (item.id.clone(), StowedItem::detached(base + offset, item))
                })
                .collect(),
        })
    }

    /// Wraps a sequence as one atomic undo step.
    pub fn composite(label: impl Into<String>, commands: Vec<DocumentCommand>) -> Self {
        Self::Composite {
            label: label.into(),
            commands,
        }
    }

    // ------------------------------------------------------------------
    // Execution

    /// Human-readable description for undo/redo UI affordances.
    pub fn description(&self) -> &str {
        match self {
            Self::AddItem { .. } => "Add item",
            Self::RemoveItems { .. } => "Delete items",
            Self::TranslateItems { .. } => "Move items",
            Self::ChangeItem { .. } => "Change item",
            Self::ReorderItem { .. } => "Reorder item",
            Self::ReparentItem { .. } => "Move into container",
            Self::GroupItems { .. } => "Group items",
            Self::UngroupItems { .. } => "Ungroup items",
            Self::DuplicateItems { .. } => "Duplicate items",
            Self::Composite { label, .. } => label,
        }
    }

    /// The id minted for an add/group command, for callers that need to
    /// find the new item after execution.
    pub fn created_id(&self) -> Option<&ItemId> {
        match self {
            Self::AddItem { id, .. } => Some(id),
            Self::GroupItems { group_id, .. } => Some(group_id),
            _ => None,
        }
    }

    /// Number of items this command removes when applied.
    pub fn removal_count(&self) -> usize {
        match self {
            Self::RemoveItems { entries } => entries.len(),
            Self::Composite { commands, .. } => {
                commands.iter().map(|c| c.removal_count()).sum()
            }
            _ => 0,
        }
    }

    /// Applies the change (first execution and redo).
    pub fn apply(&mut self, document: &mut Document) {
        match self {
            Self::AddItem { entry, .. } => {
                if let Some(item) = entry.item.take() {
                    let _ = document.insert_item_at(*item, entry.index);
                }
            }
            Self::RemoveItems { entries } => {
                for entry in entries.iter_mut().rev() {
                    if let Some(item) = document.remove_at_return(entry.index) {
                        entry.item = Some(Box::new(item));
                    }
                }
            }
            Self::TranslateItems {
                ids,
                dx,
                dy,
                snapshots,
            } => {
                if snapshots.is_none() {
                    *snapshots = Some(
                        ids.iter()
                            .filter_map(|id| {
                                document
                                    .get_by_id(id)
                                    .map(|item| (id.clone(), item.kind.clone()))
                            })
                            .collect(),
                    );
                }
                document.translate_by_ids(ids, *dx, *dy);
            }
            Self::ChangeItem { index, new, .. } => {
                document.set_item(*index, (**new).clone());
            }
            Self::ReorderItem { from, to } => {
                document.move_item(*from, *to);
            }
            Self::ReparentItem { id, new_parent, .. } => {
                document.set_parent_by_id(id, new_parent.clone());
            }
            Self::GroupItems {
                group_id,
                group,
                children,
            } => {
                if let Some(item) = group.item.take() {
                    let _ = document.insert_item_at(*item, group.index);
                }
                for (child_id, _) in children.iter() {
                    document.set_parent_by_id(child_id, Some(group_id.clone()));
                }
            }
            Self::UngroupItems {
                group,
                group_parent,
                child_ids,
                ..
            } => {
                for child_id in child_ids.iter() {
                    document.set_parent_by_id(child_id, group_parent.clone());
                }
                if let Some(item) = document.remove_at_return(group.index) {
                    group.item = Some(Box::new(item));
                }
            }
            Self::DuplicateItems { entries } => {
                for (_, entry) in entries.iter_mut() {
                    if let Some(item) = entry.item.take() {
                        let _ = document.insert_item_at(*item, entry.index);
                    }
                }
            }
            Self::Composite { commands, .. } => {
                for command in commands.iter_mut() {
                    command.apply(document);
                }
            }
        }
    }

    /// Reverts the change. Exact inverse of [`apply`](Self::apply).
    pub fn undo(&mut self, document: &mut Document) {
        match self {
            Self::AddItem { entry, .. } => {
                if let Some(item) = document.remove_at_return(entry.index) {
                    entry.item = Some(Box::new(item));
                }
            }
            Self::RemoveItems { entries } => {
                for entry in entries.iter_mut() {
                    if let Some(item) = entry.item.take() {
                        let _ = document.insert_item_at(*item, entry.index);
                    }
                }
            }
            Self::TranslateItems { snapshots, .. } => {
                if let Some(snapshots) = snapshots {
                    for (id, kind) in snapshots.iter() {
                        document.set_kind_by_id(id, kind.clone());
                    }
                }
            }
            Self::ChangeItem { index, old, .. } => {
                document.set_item(*index, (**old).clone());
            }
            Self::ReorderItem { from, to } => {
                document.move_item(*to, *from);
            }
            Self::ReparentItem { id, old_parent, .. } => {
                document.set_parent_by_id(id, old_parent.clone());
            }
            Self::GroupItems {
                group, children, ..
            } => {
                for (child_id, old_parent) in children.iter() {
                    document.set_parent_by_id(child_id, old_parent.clone());
                }
                if let Some(item) = document.remove_at_return(group.index) {
                    group.item = Some(Box::new(item));
                }
            }
            Self::UngroupItems {
                group_id,
                group,
                child_ids,
                ..
            } => {
                if let Some(item) = group.item.take() {
                    let _ = document.insert_item_at(*item, group.index);
                }
                for child_id in child_ids.iter() {
                    document.set_parent_by_id(child_id, Some(group_id.clone()));
                }
            }
            Self::DuplicateItems { entries } => {
                for (id, entry) in entries.iter_mut().rev() {
                    if let Some((item, _)) = document.remove_by_id_return(id) {
                        entry.item = Some(Box::new(item));
                    }
                }
            }
            Self::Composite { commands, .. } => {
                for command in commands.iter_mut().rev() {
                    command.undo(document);
                }
            }
        }
    }
}
