//! Drag payload protocol between the palette and the canvas.
//!
//! A palette item puts two strings on the drag event: the node type tag
//! and a display label. The canvas reads them back on drop.

use fg_core::model::NodeKind;
use fg_core::palette::PaletteItem;

/// Data-transfer key carrying the node type tag.
pub const DRAG_TYPE_KEY: &str = "application/reactflow/type";
/// Data-transfer key carrying the display label.
pub const DRAG_LABEL_KEY: &str = "application/reactflow/label";

/// The two strings carried by a palette drag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DropPayload {
    /// Raw type tag; empty when the drag did not come from the palette.
    pub kind: String,
    pub label: String,
}

impl DropPayload {
    pub fn new(kind: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            label: label.into(),
        }
    }

    /// Read a payload through a data-transfer style getter. Missing keys
    /// read as empty strings, the way browsers report them.
    pub fn from_data_transfer(get: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            kind: get(DRAG_TYPE_KEY).unwrap_or_default(),
            label: get(DRAG_LABEL_KEY).unwrap_or_default(),
        }
    }

    /// The key/value pairs a palette item writes when a drag starts.
    pub fn entries(&self) -> [(&'static str, &str); 2] {
        [(DRAG_TYPE_KEY, &self.kind), (DRAG_LABEL_KEY, &self.label)]
    }

    /// Parsed type tag, or `None` if the payload has none.
    pub fn node_kind(&self) -> Option<NodeKind> {
        let tag = self.kind.trim();
        if tag.is_empty() {
            None
        } else {
            Some(NodeKind::from_tag(tag))
        }
    }
}

impl From<&PaletteItem> for DropPayload {
    fn from(item: &PaletteItem) -> Self {
        Self::new(item.kind.as_tag(), item.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn palette_item_payload_roundtrips_through_data_transfer() {
        let item = &fg_core::palette::palette()[4];
        let payload = DropPayload::from(item);

        let store: HashMap<&str, String> = payload
            .entries()
            .iter()
            .map(|(k, v)| (*k, v.to_string()))
            .collect();
        let read = DropPayload::from_data_transfer(|k| store.get(k).cloned());

        assert_eq!(read, payload);
        assert_eq!(read.node_kind(), Some(NodeKind::UmlClass));
        assert_eq!(read.label, "ClassName");
    }

    #[test]
    fn foreign_drag_has_no_kind() {
        let payload = DropPayload::from_data_transfer(|_| None);
        assert_eq!(payload.node_kind(), None);
    }
}
