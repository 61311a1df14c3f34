//! Sidebar palette: the items a user can drag onto the canvas.

use crate::model::{Members, NodeKind};
use serde::Serialize;

/// Attributes a freshly placed class node starts with.
pub const DEFAULT_UML_ATTRIBUTES: [&str; 2] = ["+ id: int", "+ name: string"];
/// Methods a freshly placed class node starts with.
pub const DEFAULT_UML_METHODS: [&str; 2] = ["+ save(): void", "+ update(): boolean"];

pub fn default_uml_attributes() -> Members {
    DEFAULT_UML_ATTRIBUTES.iter().map(|s| s.to_string()).collect()
}

pub fn default_uml_methods() -> Members {
    DEFAULT_UML_METHODS.iter().map(|s| s.to_string()).collect()
}

/// Which sidebar section an item is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PaletteSection {
    Flowchart,
    Structure,
}

/// One draggable palette entry. `kind` and `label` are what the drag
/// payload carries; `title` is the text shown in the sidebar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaletteItem {
    pub section: PaletteSection,
    pub title: &'static str,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub label: &'static str,
}

/// The palette in sidebar order.
pub fn palette() -> Vec<PaletteItem> {
    use PaletteSection::*;
    vec![
        PaletteItem {
            section: Flowchart,
            title: "Start",
            kind: NodeKind::Start,
            label: "Start",
        },
        PaletteItem {
            section: Flowchart,
            title: "Process",
            kind: NodeKind::Process,
            label: "Process",
        },
        PaletteItem {
            section: Flowchart,
            title: "Decision",
            kind: NodeKind::Decision,
            label: "Decision?",
        },
        PaletteItem {
            section: Flowchart,
            title: "End",
            kind: NodeKind::End,
            label: "End",
        },
        PaletteItem {
            section: Structure,
            title: "Class Node",
            kind: NodeKind::UmlClass,
            label: "ClassName",
        },
        PaletteItem {
            section: Structure,
            title: "State",
            kind: NodeKind::Process,
            label: "State",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_covers_every_known_kind() {
        let items = palette();
        for kind in [
            NodeKind::Start,
            NodeKind::Process,
            NodeKind::Decision,
            NodeKind::End,
            NodeKind::UmlClass,
        ] {
            assert!(items.iter().any(|i| i.kind == kind), "missing {kind:?}");
        }
    }

    #[test]
    fn palette_serializes_wire_tags() {
        let json = serde_json::to_value(palette()).unwrap();
        assert_eq!(json[4]["type"], "umlClass");
        assert_eq!(json[4]["section"], "structure");
        assert_eq!(json[2]["label"], "Decision?");
    }

    #[test]
    fn uml_defaults_are_non_empty() {
        assert_eq!(default_uml_attributes().len(), 2);
        assert_eq!(default_uml_methods()[0], "+ save(): void");
    }
}
