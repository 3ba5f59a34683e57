use serde::{Deserialize, Serialize};

use vectorkit_core::Rect;

/// Group container. Holds children by parent-id reference; its extent is
/// the union of its descendants, derived on demand.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GroupItem {}

impl GroupItem {
    pub fn new() -> Self {
        Self {}
    }
}

/// Layer / artboard container. May carry a fixed artboard rectangle for
/// display purposes; like groups, it is never rendered or spatially
/// indexed itself.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LayerItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artboard: Option<Rect>,
}

impl LayerItem {
    pub fn new() -> Self {
        Self { artboard: None }
    }

    pub fn with_artboard(artboard: Rect) -> Self {
        Self {
            artboard: Some(artboard),
        }
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        if let Some(rect) = &mut self.artboard {
            *rect = rect.translated(dx, dy);
        }
    }
}
