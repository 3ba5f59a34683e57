//! The item model: typed document entities.
//!
//! Every document entity is an [`Item`] wrapping a closed [`ItemKind`]
//! variant. Bounds, translation, and serialization logic match exhaustively
//! over the variants; there is no attribute probing anywhere in the crate.
//!
//! Containers (groups and layers) hold children by parent-id reference.
//! They have no bounds of their own; their extent derives from descendants
//! on demand.

mod container;
mod ellipse;
mod path;
mod rectangle;
mod text;

pub use container::{GroupItem, LayerItem};
pub use ellipse::EllipseItem;
pub use path::{PathItem, PathPoint};
pub use rectangle::RectangleItem;
pub use text::TextItem;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use uuid::Uuid;

use vectorkit_core::{Rect, Transform};

use crate::appearance::Appearance;

/// Stable string identifier of an item. Unique across the whole document.
pub type ItemId = String;

/// Mints a fresh item id.
pub fn new_item_id() -> ItemId {
    Uuid::new_v4().to_string()
}

/// Type-specific geometry of an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ItemKind {
    Rectangle(RectangleItem),
    Ellipse(EllipseItem),
    Path(PathItem),
    Text(TextItem),
    Group(GroupItem),
    Layer(LayerItem),
}

impl ItemKind {
    /// Wire/display name of the variant.
    pub fn kind_name(&self) -> &'static str {
        match self {
            ItemKind::Rectangle(_) => "rectangle",
            ItemKind::Ellipse(_) => "ellipse",
            ItemKind::Path(_) => "path",
            ItemKind::Text(_) => "text",
            ItemKind::Group(_) => "group",
            ItemKind::Layer(_) => "layer",
        }
    }

    /// Untransformed bounding rectangle. Containers have none.
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            ItemKind::Rectangle(s) => Some(s.bounds()),
            ItemKind::Ellipse(s) => Some(s.bounds()),
            ItemKind::Path(s) => s.bounds(),
            ItemKind::Text(s) => Some(s.bounds()),
            ItemKind::Group(_) | ItemKind::Layer(_) => None,
        }
    }

    /// Translates the raw geometry in place.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        match self {
            ItemKind::Rectangle(s) => s.translate(dx, dy),
            ItemKind::Ellipse(s) => s.translate(dx, dy),
            ItemKind::Path(s) => s.translate(dx, dy),
            ItemKind::Text(s) => s.translate(dx, dy),
            ItemKind::Group(_) => {}
            ItemKind::Layer(s) => s.translate(dx, dy),
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, ItemKind::Group(_) | ItemKind::Layer(_))
    }
}

/// An atomic document entity: a shape, text, group, or layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub kind: ItemKind,
    #[serde(default)]
    pub transform: Transform,
    #[serde(default)]
    pub appearances: SmallVec<[Appearance; 2]>,
    pub visible: bool,
    pub locked: bool,
    /// Weak reference to a container item; a dangling id means "no parent".
    #[serde(default)]
    pub parent_id: Option<ItemId>,
}

impl Item {
    /// Creates an item with a fresh id and a default name derived from the
    /// kind.
    pub fn new(kind: ItemKind) -> Self {
        let name = kind.kind_name().to_string();
        Self {
            id: new_item_id(),
            name,
            kind,
            transform: Transform::default(),
            appearances: SmallVec::new(),
            visible: true,
            locked: false,
            parent_id: None,
        }
    }

    pub fn with_name(kind: ItemKind, name: impl Into<String>) -> Self {
        let mut item = Self::new(kind);
        item.name = name.into();
        item
    }

    /// Untransformed bounds; `None` for containers.
    pub fn bounds(&self) -> Option<Rect> {
        self.kind.bounds()
    }

    /// Bounds after applying the item's non-destructive transform.
    pub fn transformed_bounds(&self) -> Option<Rect> {
        let raw = self.bounds()?;
        Some(self.transform.transformed_bounds(&raw))
    }

    pub fn is_container(&self) -> bool {
        self.kind.is_container()
    }

    /// Renderable items carry geometry of their own; containers do not.
    pub fn is_renderable(&self) -> bool {
        !self.is_container()
    }

    /// Translates the raw geometry; the transform is left untouched.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.kind.translate(dx, dy);
    }
}
