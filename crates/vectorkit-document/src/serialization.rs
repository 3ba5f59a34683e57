//! Document (de)serialization.
//!
//! Implements save/load for VectorKit documents as versioned JSON with
//! complete state preservation: metadata, viewport, and every item in
//! render order. Unknown fields are ignored; missing optional fields fall
//! back to documented defaults. Loading a file written by a newer version
//! is a hard failure, distinguished from a corrupt file so the host can
//! show the right message.

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::path::Path;
use tracing::debug;

use vectorkit_core::{Error, Rect, Result, Transform, Unit};

use crate::appearance::Appearance;
use crate::document::Document;
use crate::item::{
    EllipseItem, GroupItem, Item, ItemKind, LayerItem, PathItem, PathPoint, RectangleItem,
    TextItem,
};
use crate::viewport::Viewport;

/// Highest document format version this build can read.
pub const DOCUMENT_FORMAT_VERSION: u32 = 1;

const DEFAULT_DPI: f64 = 72.0;

fn default_dpi() -> f64 {
    DEFAULT_DPI
}

fn default_grid_spacing() -> f64 {
    10.0
}

fn default_true() -> bool {
    true
}

/// Document metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMeta {
    #[serde(default)]
    pub name: String,
    #[serde(default = "Utc::now")]
    pub created: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub modified: DateTime<Utc>,
    #[serde(default)]
    pub display_unit: Unit,
    #[serde(default = "default_dpi", rename = "previewDPI")]
    pub preview_dpi: f64,
    #[serde(default = "default_grid_spacing")]
    pub grid_spacing_value: f64,
    #[serde(default)]
    pub grid_spacing_unit: Unit,
    #[serde(default = "default_dpi", rename = "documentDPI")]
    pub document_dpi: f64,
}

impl Default for DocumentMeta {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            name: String::new(),
            created: now,
            modified: now,
            display_unit: Unit::default(),
            preview_dpi: DEFAULT_DPI,
            grid_spacing_value: default_grid_spacing(),
            grid_spacing_unit: Unit::default(),
            document_dpi: DEFAULT_DPI,
        }
    }
}

/// Complete document file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentFile {
    pub version: u32,
    #[serde(default)]
    pub meta: DocumentMeta,
    #[serde(default)]
    pub viewport: Viewport,
    #[serde(default)]
    pub items: Vec<ItemRecord>,
}

/// Serialized item record. One flat struct covers every kind; the `type`
/// tag decides which geometry fields are meaningful.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type")]
    pub item_type: String,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub corner_radii: [f64; 4],
    #[serde(default)]
    pub cx: f64,
    #[serde(default)]
    pub cy: f64,
    #[serde(default)]
    pub radius_x: f64,
    #[serde(default)]
    pub radius_y: f64,
    #[serde(default)]
    pub points: Vec<PathPoint>,
    #[serde(default)]
    pub closed: bool,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub font_size: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artboard: Option<Rect>,
    #[serde(default)]
    pub appearances: Vec<Appearance>,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default)]
    pub locked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// Omitted entirely when the transform is identity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform: Option<Transform>,
}

impl ItemRecord {
    /// Builds the wire record for an item.
    pub fn from_item(item: &Item) -> Self {
        let mut record = Self {
            id: item.id.clone(),
            item_type: item.kind.kind_name().to_string(),
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            corner_radii: [0.0; 4],
            cx: 0.0,
            cy: 0.0,
            radius_x: 0.0,
            radius_y: 0.0,
            points: Vec::new(),
            closed: false,
            content: String::new(),
            font_size: 0.0,
            artboard: None,
            appearances: item.appearances.to_vec(),
            name: item.name.clone(),
            visible: item.visible,
            locked: item.locked,
            parent_id: item.parent_id.clone(),
            transform: (!item.transform.is_identity()).then_some(item.transform),
        };
        match &item.kind {
            ItemKind::Rectangle(s) => {
                record.x = s.x;
                record.y = s.y;
                record.width = s.width;
                record.height = s.height;
                record.corner_radii = s.corner_radii;
            }
            ItemKind::Ellipse(s) => {
                record.cx = s.cx;
                record.cy = s.cy;
                record.radius_x = s.radius_x;
                record.radius_y = s.radius_y;
            }
            ItemKind::Path(s) => {
                record.points = s.points.clone();
                record.closed = s.closed;
            }
            ItemKind::Text(s) => {
                record.x = s.x;
                record.y = s.y;
                record.width = s.width;
                record.height = s.height;
                record.content = s.content.clone();
                record.font_size = s.font_size;
            }
            ItemKind::Group(_) => {}
            ItemKind::Layer(s) => {
                record.artboard = s.artboard;
            }
        }
        record
    }

    /// Validates the record into a document item, applying the clamping
    /// rules. Unknown types and under-specified paths are validation
    /// errors.
    pub fn into_item(self) -> Result<Item> {
        let kind = match self.item_type.as_str() {
            "rectangle" => ItemKind::Rectangle(
                RectangleItem::new(self.x, self.y, self.width, self.height)
                    .with_corner_radii(self.corner_radii)
                    .clamped(),
            ),
            "ellipse" => {
                ItemKind::Ellipse(EllipseItem::new(self.cx, self.cy, self.radius_x, self.radius_y))
            }
            "path" => {
                if self.points.len() < 2 {
                    return Err(Error::validation(format!(
                        "path item {:?} has {} points; at least 2 required",
                        self.name,
                        self.points.len()
                    )));
                }
                ItemKind::Path(PathItem::new(self.points, self.closed))
            }
            "text" => {
                let mut text = TextItem::new(self.content, self.x, self.y, self.width, self.font_size);
                text.height = self.height;
                ItemKind::Text(text.clamped())
            }
            "group" => ItemKind::Group(GroupItem::new()),
            "layer" => ItemKind::Layer(LayerItem {
                artboard: self.artboard,
            }),
            other => {
                return Err(Error::validation(format!("unknown item type: {}", other)));
            }
        };

        let appearances: SmallVec<[Appearance; 2]> =
            self.appearances.into_iter().map(Appearance::clamped).collect();
        let mut item = Item::new(kind);
        if !self.id.is_empty() {
            item.id = self.id;
        }
        item.name = self.name;
        item.appearances = appearances;
        item.visible = self.visible;
        item.locked = self.locked;
        item.parent_id = self.parent_id;
        item.transform = self.transform.unwrap_or_default();
        Ok(item)
    }
}

/// Snapshots a document (plus metadata and viewport) into its file form,
/// stamping the modification time.
pub fn save_document(document: &Document, meta: &DocumentMeta, viewport: &Viewport) -> DocumentFile {
    let mut meta = meta.clone();
    meta.modified = Utc::now();
    DocumentFile {
        version: DOCUMENT_FORMAT_VERSION,
        meta,
        viewport: *viewport,
        items: document.iter_ordered().map(ItemRecord::from_item).collect(),
    }
}

/// Reconstructs a document from its file form, rebuilding the spatial
/// index. Fails on future versions and on records that do not validate.
pub fn load_document(file: DocumentFile) -> Result<(Document, DocumentMeta, Viewport)> {
    if file.version > DOCUMENT_FORMAT_VERSION {
        return Err(Error::UnsupportedVersion {
            found: file.version,
            supported: DOCUMENT_FORMAT_VERSION,
        });
    }
    let mut document = Document::new();
    for record in file.items {
        let item = record.into_item()?;
        document.add_item(item)?;
    }
    debug!(items = document.len(), version = file.version, "loaded document");
    Ok((document, file.meta, file.viewport))
}

/// Serializes the file form to pretty JSON.
pub fn to_json_string(file: &DocumentFile) -> Result<String> {
    serde_json::to_string_pretty(file).map_err(|e| Error::InvalidFormat {
        message: e.to_string(),
    })
}

/// Parses a document file from JSON.
///
/// A record without a `version` field fails with
/// [`Error::MissingVersion`]; a future version fails with
/// [`Error::UnsupportedVersion`] even if the rest of the record does not
/// parse. Unknown fields are ignored.
pub fn from_json_str(json: &str) -> Result<DocumentFile> {
    let value: serde_json::Value = serde_json::from_str(json).map_err(|e| Error::InvalidFormat {
        message: e.to_string(),
    })?;
    let Some(version) = value.get("version") else {
        return Err(Error::MissingVersion);
    };
    let Some(version) = version.as_u64() else {
        return Err(Error::InvalidFormat {
            message: "version must be a non-negative integer".to_string(),
        });
    };
    if version > DOCUMENT_FORMAT_VERSION as u64 {
        return Err(Error::UnsupportedVersion {
            found: version as u32,
            supported: DOCUMENT_FORMAT_VERSION,
        });
    }
    serde_json::from_value(value).map_err(|e| Error::InvalidFormat {
        message: e.to_string(),
    })
}

/// Writes a document to disk as JSON.
pub fn save_to_file(
    path: &Path,
    document: &Document,
    meta: &DocumentMeta,
    viewport: &Viewport,
) -> anyhow::Result<()> {
    let file = save_document(document, meta, viewport);
    let json = to_json_string(&file)
        .with_context(|| format!("Failed to serialize document: {}", path.display()))?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write document file: {}", path.display()))?;
    Ok(())
}

/// Reads a document from disk.
pub fn load_from_file(path: &Path) -> anyhow::Result<(Document, DocumentMeta, Viewport)> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read document file: {}", path.display()))?;
    let file = from_json_str(&json)
        .with_context(|| format!("Failed to parse document file: {}", path.display()))?;
    let loaded = load_document(file)
        .with_context(|| format!("Failed to load document: {}", path.display()))?;
    Ok(loaded)
}
