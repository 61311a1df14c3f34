//! Integration tests: palette drops through the editor (fg-editor).
//!
//! Covers coordinate mapping under pan and zoom, id uniqueness when the
//! clock does not move, and the silent handling of unresolvable drops.

use fg_core::model::NodeKind;
use fg_core::palette::palette;
use fg_core::viewport::{Point, ViewTransform, Viewport};
use fg_editor::{DiagramEditor, DropPayload, EditorConfig, EditorEvent};
use pretty_assertions::assert_eq;
use std::collections::HashSet;

const FROZEN_MS: u64 = 1_700_000_000_000;

fn frozen_editor() -> DiagramEditor {
    DiagramEditor::new().with_clock(|| FROZEN_MS)
}

// ─── Coordinates ─────────────────────────────────────────────────────────

#[test]
fn decision_drop_under_pan_and_zoom() {
    let mut editor = frozen_editor();
    let transform = ViewTransform::new(
        Point::new(100.0, 50.0),
        Viewport {
            x: 20.0,
            y: -30.0,
            zoom: 2.0,
        },
    );

    assert!(editor.handle_drop(
        &DropPayload::new("decision", "Decision?"),
        Point::new(320.0, 180.0),
        Some(&transform),
    ));

    let node = editor.document().nodes.last().unwrap();
    assert_eq!(node.kind, NodeKind::Decision);
    assert_eq!(node.position, Point::new(100.0, 80.0));
    assert_eq!(node.data.label, "Decision?");
    assert!(node.data.attributes.is_none());
    assert!(node.style.is_none());
}

#[test]
fn drop_at_uses_document_viewport_and_snap_grid() {
    let mut editor = frozen_editor().with_config(EditorConfig {
        snap_grid: Some((15.0, 15.0)),
        ..EditorConfig::default()
    });
    editor.set_viewport(Viewport {
        x: 0.0,
        y: 0.0,
        zoom: 1.0,
    });

    assert!(editor.handle_drop_at(
        &DropPayload::new("default", "Process"),
        Point::new(107.0, 52.0),
        Some(Point::new(0.0, 0.0)),
    ));
    let node = editor.document().nodes.last().unwrap();
    assert_eq!(node.position, Point::new(105.0, 45.0));
}

// ─── Identity ────────────────────────────────────────────────────────────

#[test]
fn many_drops_in_one_millisecond_get_distinct_ids() {
    let mut editor = frozen_editor();
    let t = ViewTransform::default();
    for item in palette().iter().cycle().take(60) {
        let payload = DropPayload::from(item);
        assert!(editor.handle_drop(&payload, Point::new(10.0, 10.0), Some(&t)));
    }

    let ids: HashSet<_> = editor.document().nodes.iter().map(|n| n.id).collect();
    assert_eq!(ids.len(), editor.document().nodes.len());
    assert_eq!(editor.document().nodes.len(), 61);
}

#[test]
fn class_drop_carries_sample_members() {
    let mut editor = frozen_editor();
    let t = ViewTransform::default();
    assert!(editor.handle_drop(
        &DropPayload::new("umlClass", "ClassName"),
        Point::new(0.0, 0.0),
        Some(&t),
    ));

    let node = editor.document().nodes.last().unwrap();
    let attributes: Vec<&str> = node
        .data
        .attributes
        .iter()
        .flatten()
        .map(String::as_str)
        .collect();
    let methods: Vec<&str> = node
        .data
        .methods
        .iter()
        .flatten()
        .map(String::as_str)
        .collect();
    assert_eq!(attributes, vec!["+ id: int", "+ name: string"]);
    assert_eq!(methods, vec!["+ save(): void", "+ update(): boolean"]);
}

// ─── Ignored drops ───────────────────────────────────────────────────────

#[test]
fn unresolvable_drops_change_nothing() {
    let mut editor = frozen_editor();
    let _ = editor.take_events();
    let rev = editor.revision();
    let t = ViewTransform::default();

    let process = DropPayload::new("default", "Process");
    let start = DropPayload::new("input", "Start");
    assert!(!editor.handle_drop(&process, Point::default(), None));
    assert!(!editor.handle_drop(&DropPayload::default(), Point::default(), Some(&t)));
    assert!(!editor.handle_drop_at(&start, Point::default(), None));

    assert_eq!(editor.revision(), rev);
    assert_eq!(editor.document().nodes.len(), 1);
    assert!(editor.take_events().is_empty());
}

#[test]
fn drop_requests_a_render() {
    let mut editor = frozen_editor();
    let _ = editor.take_events();
    let t = ViewTransform::default();
    let end = DropPayload::new("output", "End");
    editor.handle_drop(&end, Point::default(), Some(&t));
    assert_eq!(editor.take_events(), vec![EditorEvent::Render]);
}
