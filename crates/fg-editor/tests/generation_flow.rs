//! Integration tests: generation and import through the editor (fg-editor).
//!
//! A successful generation replaces the whole diagram; any failure leaves
//! it untouched and produces exactly one alert. Imports are all-or-nothing.

use async_trait::async_trait;
use fg_ai::{DiagramGenerator, GenerateError, GenerativeService, ServiceError, interpret_response};
use fg_core::id::NodeId;
use fg_core::viewport::Viewport;
use fg_editor::{AlertKind, DiagramEditor, EditorError, EditorEvent};
use pretty_assertions::assert_eq;
use std::time::Duration;

struct Canned(Result<Option<String>, ServiceError>);

#[async_trait]
impl GenerativeService for Canned {
    fn is_configured(&self) -> bool {
        true
    }

    async fn complete(&self, _: &str, _: &str) -> Result<Option<String>, ServiceError> {
        self.0.clone()
    }
}

const THREE_STEPS: &str = r#"{
  "nodes": [
    {"id": "a", "type": "input", "position": {"x": 0, "y": 0}, "data": {"label": "Begin"}},
    {"id": "b", "type": "default", "position": {"x": 0, "y": 150}, "data": {"label": "Work"}},
    {"id": "c", "type": "output", "position": {"x": 0, "y": 300}, "data": {"label": "Done"}}
  ],
  "edges": [
    {"id": "ab", "source": "a", "target": "b"},
    {"id": "bc", "source": "b", "target": "c"}
  ]
}"#;

fn alerts(events: &[EditorEvent]) -> Vec<AlertKind> {
    events
        .iter()
        .filter_map(|e| match e {
            EditorEvent::Alert(alert) => Some(alert.kind),
            _ => None,
        })
        .collect()
}

// ─── Generation ──────────────────────────────────────────────────────────

#[test]
fn success_replaces_nodes_and_edges_and_schedules_fit() {
    let mut editor = DiagramEditor::new();
    editor.connect(NodeId::intern("1"), NodeId::intern("1"));
    editor.set_viewport(Viewport {
        x: 5.0,
        y: 6.0,
        zoom: 1.5,
    });
    let _ = editor.take_events();

    let ticket = editor.begin_generation().unwrap();
    editor
        .finish_generation(ticket, interpret_response(Some(THREE_STEPS)))
        .unwrap();

    let doc = editor.document();
    let ids: Vec<&str> = doc.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
    assert_eq!(doc.edges.len(), 2);
    assert_eq!(doc.viewport.zoom, 1.5);
    assert!(!editor.is_generating());

    assert_eq!(
        editor.take_events(),
        vec![
            EditorEvent::Render,
            EditorEvent::FitView {
                delay: Duration::from_millis(100)
            }
        ]
    );
}

#[test]
fn edits_during_generation_are_overwritten() {
    let mut editor = DiagramEditor::new();
    let ticket = editor.begin_generation().unwrap();
    editor.clear();
    editor.connect(NodeId::intern("x"), NodeId::intern("y"));

    editor
        .finish_generation(ticket, interpret_response(Some(THREE_STEPS)))
        .unwrap();
    assert_eq!(editor.document().nodes.len(), 3);
    let sources: Vec<&str> = editor
        .document()
        .edges
        .iter()
        .map(|e| e.source.as_str())
        .collect();
    assert!(!sources.contains(&"x"));
}

#[test]
fn reply_without_nodes_keeps_current_nodes() {
    let mut editor = DiagramEditor::new();
    editor.connect(NodeId::intern("1"), NodeId::intern("1"));

    let ticket = editor.begin_generation().unwrap();
    editor
        .finish_generation(ticket, interpret_response(Some(r#"{"edges":[]}"#)))
        .unwrap();

    assert_eq!(editor.document().nodes.len(), 1);
    assert_eq!(editor.document().nodes[0].id.as_str(), "1");
    assert!(editor.document().edges.is_empty());
}

#[test]
fn null_nodes_keep_current_nodes_and_apply_edges() {
    let mut editor = DiagramEditor::new();
    let reply = r#"{"nodes": null, "edges": [{"id": "loop", "source": "1", "target": "1"}]}"#;

    let ticket = editor.begin_generation().unwrap();
    editor
        .finish_generation(ticket, interpret_response(Some(reply)))
        .unwrap();

    assert_eq!(editor.document().nodes.len(), 1);
    let edges: Vec<&str> = editor
        .document()
        .edges
        .iter()
        .map(|e| e.id.as_str())
        .collect();
    assert_eq!(edges, vec!["loop"]);
}

#[test]
fn failures_leave_the_document_untouched() {
    let cases = [
        (GenerateError::MissingCredential, AlertKind::Configuration),
        (
            GenerateError::Connection(ServiceError::Transport("offline".into())),
            AlertKind::Connectivity,
        ),
        (
            GenerateError::NoDiagram("empty".into()),
            AlertKind::NoDiagram,
        ),
    ];

    for (err, kind) in cases {
        let mut editor = DiagramEditor::new();
        let before = editor.document().clone();
        let _ = editor.take_events();

        let ticket = editor.begin_generation().unwrap();
        let result = editor.finish_generation(ticket, Err(err));

        assert!(matches!(result, Err(EditorError::Generation(_))));
        assert_eq!(editor.document(), &before);
        assert!(!editor.is_generating());
        assert_eq!(alerts(&editor.take_events()), vec![kind]);
    }
}

#[test]
fn busy_editor_rejects_a_second_request() {
    let mut editor = DiagramEditor::new();
    let _first = editor.begin_generation().unwrap();
    assert!(matches!(editor.begin_generation(), Err(EditorError::Busy)));
}

#[tokio::test]
async fn generate_runs_one_request_end_to_end() {
    let mut editor = DiagramEditor::new();
    let generator = DiagramGenerator::new(Canned(Ok(Some(THREE_STEPS.into()))));

    assert!(editor.generate(&generator, "three steps").await.unwrap());
    assert_eq!(editor.document().nodes.len(), 3);
    assert!(!editor.is_generating());
}

#[tokio::test]
async fn blank_prompt_is_ignored_without_alert() {
    let mut editor = DiagramEditor::new();
    let _ = editor.take_events();
    let generator = DiagramGenerator::new(Canned(Ok(Some(THREE_STEPS.into()))));

    assert!(!editor.generate(&generator, "  ").await.unwrap());
    assert_eq!(editor.document().nodes.len(), 1);
    assert!(editor.take_events().is_empty());
}

#[tokio::test]
async fn prose_reply_alerts_no_diagram() {
    let mut editor = DiagramEditor::new();
    let _ = editor.take_events();
    let generator = DiagramGenerator::new(Canned(Ok(Some("I cannot help with that.".into()))));

    assert!(editor.generate(&generator, "anything").await.is_err());
    assert_eq!(alerts(&editor.take_events()), vec![AlertKind::NoDiagram]);
    assert_eq!(editor.document().nodes.len(), 1);
}

// ─── Import / export ─────────────────────────────────────────────────────

#[test]
fn import_restores_exported_document() {
    let mut source = DiagramEditor::new();
    source.set_viewport(Viewport {
        x: -40.0,
        y: 12.5,
        zoom: 0.75,
    });
    let text = source.export_json().unwrap();

    let mut target = DiagramEditor::with_document(fg_core::Document::empty());
    let _ = target.take_events();
    target.import_json(&text).unwrap();

    assert_eq!(target.document(), source.document());
    let events = target.take_events();
    let restore = EditorEvent::SetViewport(source.document().viewport);
    assert!(events.contains(&restore));
}

#[test]
fn bad_import_keeps_document_and_alerts() {
    let mut editor = DiagramEditor::new();
    let before = editor.document().clone();
    let _ = editor.take_events();

    for text in ["", "not json", "[1, 2]", r#"{"nodes": [{"id": 3}]}"#] {
        let err = editor.import_json(text).unwrap_err();
        assert!(matches!(err, EditorError::Import(_)));
    }

    assert_eq!(editor.document(), &before);
    assert_eq!(alerts(&editor.take_events()), vec![AlertKind::Parse; 4]);
}

#[test]
fn import_without_viewport_keeps_current_view() {
    let mut editor = DiagramEditor::new();
    let view = Viewport {
        x: 1.0,
        y: 2.0,
        zoom: 1.25,
    };
    editor.set_viewport(view);
    editor.import_json(r#"{"nodes": [], "edges": []}"#).unwrap();
    assert!(editor.document().nodes.is_empty());
    assert_eq!(editor.document().viewport, view);
}
