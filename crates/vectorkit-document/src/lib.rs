//! # VectorKit Document
//!
//! The editable-document core of a 2D vector graphics editor: an in-memory
//! scene of typed items, a quadtree spatial index kept in sync with every
//! edit, a command-based undo/redo engine with transaction grouping, and
//! the query layer an external renderer paints from.
//!
//! ## Core Components
//!
//! - **Items**: rectangles, ellipses, bezier paths, text, and the group and
//!   layer containers that hold them by parent-id reference
//! - **Document**: the arena + render-order store with hierarchy-derived
//!   predicates (effective visibility/lock, descendant walks)
//! - **Spatial index**: quadtree range queries over item bounds
//! - **Commands / history**: every mutation is reversible and replayable;
//!   transactions collapse a gesture into one undo step
//! - **Query layer**: ordered, visible, viewport-culled item lists for
//!   painting plus hit-test lists for pointer dispatch
//! - **Pen tool**: interactive bezier path construction, independent of the
//!   document until committed
//!
//! ## Architecture
//!
//! ```text
//! Editor (facade)
//!   ├── Document (items, render order, spatial index)
//!   ├── CommandStack (undo/redo, transactions)
//!   ├── SelectionManager / EditContext (interaction state)
//!   ├── Viewport (zoom/pan)
//!   └── PenToolState (path construction)
//! ```
//!
//! Edits flow through [`DocumentCommand`]s executed by the
//! [`CommandStack`]; the document keeps its spatial index synchronized on
//! every structural change; renderers consume [`query::render_items`] and
//! [`query::render_items_in_bounds`].

pub mod appearance;
pub mod commands;
pub mod document;
pub mod editor;
pub mod history;
pub mod item;
pub mod pen_tool;
pub mod query;
pub mod selection;
pub mod serialization;
pub mod spatial_index;
pub mod viewport;

pub use appearance::{Appearance, Color, Fill, Stroke, StrokeAlign, StrokeCap, StrokeOrder};
pub use commands::DocumentCommand;
pub use document::Document;
pub use editor::Editor;
pub use history::CommandStack;
pub use item::{
    EllipseItem, GroupItem, Item, ItemId, ItemKind, LayerItem, PathItem, PathPoint,
    RectangleItem, TextItem,
};
pub use pen_tool::{PathStyle, PenToolState};
pub use selection::{toggle_selection, EditContext, SelectionManager};
pub use serialization::{
    from_json_str, load_document, load_from_file, save_document, save_to_file, to_json_string,
    DocumentFile, DocumentMeta, ItemRecord, DOCUMENT_FORMAT_VERSION,
};
pub use spatial_index::{Bounds, SpatialIndex, SpatialIndexStats};
pub use viewport::Viewport;
