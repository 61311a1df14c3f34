//! JSON shapes handed across the JS boundary.

use fg_editor::{AlertKind, EditorEvent};
use serde_json::{Value, json};

fn alert_kind_name(kind: AlertKind) -> &'static str {
    match kind {
        AlertKind::Configuration => "configuration",
        AlertKind::Parse => "parse",
        AlertKind::Connectivity => "connectivity",
        AlertKind::NoDiagram => "noDiagram",
    }
}

pub(crate) fn event_to_json(event: &EditorEvent) -> Value {
    match event {
        EditorEvent::Render => json!({ "type": "render" }),
        EditorEvent::SetViewport(viewport) => json!({
            "type": "setViewport",
            "viewport": viewport,
        }),
        EditorEvent::FitView { delay } => json!({
            "type": "fitView",
            "delayMs": delay.as_millis() as u64,
        }),
        EditorEvent::Alert(alert) => json!({
            "type": "alert",
            "kind": alert_kind_name(alert.kind),
            "message": alert.message,
        }),
    }
}

pub(crate) fn events_to_json(events: &[EditorEvent]) -> String {
    Value::Array(events.iter().map(event_to_json).collect()).to_string()
}

/// `{"ok":true}` or `{"ok":false,"error":"..."}`.
pub(crate) fn result_json<E: std::fmt::Display>(result: Result<(), E>) -> String {
    match result {
        Ok(()) => json!({ "ok": true }).to_string(),
        Err(e) => json!({ "ok": false, "error": e.to_string() }).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fg_core::viewport::Viewport;
    use fg_editor::Alert;
    use std::time::Duration;

    #[test]
    fn fit_view_carries_delay_in_ms() {
        let v = event_to_json(&EditorEvent::FitView {
            delay: Duration::from_millis(100),
        });
        assert_eq!(v, json!({ "type": "fitView", "delayMs": 100 }));
    }

    #[test]
    fn alert_and_viewport_shapes() {
        let v = event_to_json(&EditorEvent::Alert(Alert {
            kind: AlertKind::NoDiagram,
            message: "nope".into(),
        }));
        assert_eq!(v["kind"], "noDiagram");
        assert_eq!(v["message"], "nope");

        let v = event_to_json(&EditorEvent::SetViewport(Viewport::default()));
        assert_eq!(v["viewport"]["zoom"], 1.0);
    }

    #[test]
    fn error_messages_are_escaped() {
        let s = result_json::<String>(Err(r#"bad "quote""#.into()));
        let v: Value = serde_json::from_str(&s).unwrap();
        assert_eq!(v["ok"], false);
        assert_eq!(v["error"], r#"bad "quote""#);
        assert_eq!(result_json::<String>(Ok(())), r#"{"ok":true}"#);
    }
}
